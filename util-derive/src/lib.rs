#![warn(clippy::nursery)]
#![allow(clippy::option_if_let_else)]

use check_keyword::CheckKeyword;
use convert_case::{Case, Casing};
use darling::{
    FromDeriveInput, FromField, FromVariant,
    ast::{Data, Fields, Style},
    util::Ignored,
};
use proc_macro::TokenStream;
use proc_macro2::{Ident, Span, TokenStream as TokenStream2};
use quote::quote;
use syn::{DeriveInput, Generics, Type};

#[derive(Debug, FromField)]
#[darling(attributes(rc_term))]
struct RcTermField {
    ident: Option<Ident>,
    ty: Type,
    #[darling(default)]
    into: bool,
}

impl RcTermField {
    fn arg_ident(&self, i: usize) -> Ident {
        if let Some(ident) = &self.ident {
            ident.clone()
        } else {
            Ident::new(&format!("arg{i}"), Span::call_site())
        }
    }

    /// The constructor argument and the expression that stores it in the variant.
    fn arg_and_value(&self, i: usize) -> (TokenStream2, TokenStream2) {
        let arg_ident = self.arg_ident(i);
        let ty = &self.ty;
        if self.into {
            (
                quote! { #arg_ident: impl ::std::convert::Into<#ty> },
                quote! { #arg_ident.into() },
            )
        } else {
            (quote! { #arg_ident: #ty }, quote! { #arg_ident })
        }
    }
}

#[derive(Debug, FromVariant)]
#[darling(attributes(rc_term))]
struct RcTermVariant {
    ident: Ident,
    fields: Fields<RcTermField>,
}

impl RcTermVariant {
    fn snake_name(&self, prefix: &str) -> Ident {
        let mut name = format!("{prefix}{}", self.ident.to_string().to_case(Case::Snake));
        if name.is_keyword() {
            name.push('_');
        }
        Ident::new(&name, self.ident.span())
    }

    fn constructor(&self) -> TokenStream2 {
        let variant_ident = &self.ident;
        let fn_ident = self.snake_name("");

        let (args, values): (Vec<_>, Vec<_>) = self
            .fields
            .iter()
            .enumerate()
            .map(|(i, field)| field.arg_and_value(i))
            .unzip();

        let body = match self.fields.style {
            Style::Unit => quote! { Self::#variant_ident },
            Style::Tuple => quote! { Self::#variant_ident(#(#values),*) },
            Style::Struct => {
                let idents = self.fields.iter().filter_map(|field| field.ident.as_ref());
                quote! { Self::#variant_ident { #(#idents: #values),* } }
            }
        };

        quote! {
            pub fn #fn_ident(#(#args),*) -> ::std::rc::Rc<Self> {
                ::std::rc::Rc::new(#body)
            }
        }
    }

    fn predicate(&self) -> TokenStream2 {
        let variant_ident = &self.ident;
        let fn_ident = self.snake_name("is_");

        let pattern = match self.fields.style {
            Style::Unit => quote! { Self::#variant_ident },
            Style::Tuple => quote! { Self::#variant_ident(..) },
            Style::Struct => quote! { Self::#variant_ident { .. } },
        };

        quote! {
            pub const fn #fn_ident(&self) -> bool {
                matches!(self, #pattern)
            }
        }
    }
}

#[derive(Debug, FromDeriveInput)]
#[darling(supports(enum_any))]
struct RcTermDeriveInput {
    ident: Ident,
    generics: Generics,
    data: Data<RcTermVariant, Ignored>,
}

impl RcTermDeriveInput {
    fn derive_rc_term(&self) -> TokenStream2 {
        let ident = &self.ident;
        let (impl_generics, ty_generics, where_clause) = self.generics.split_for_impl();
        let Some(variants) = self.data.as_ref().take_enum() else {
            return syn::Error::new(ident.span(), "RcTerm can only be derived for enums")
                .to_compile_error();
        };

        let items = variants.iter().map(|variant| {
            let constructor = variant.constructor();
            let predicate = variant.predicate();
            quote! {
                #constructor
                #predicate
            }
        });

        quote! {
            impl #impl_generics #ident #ty_generics #where_clause {
                #(#items)*
            }
        }
    }
}

/// For each variant in the enum, generate a constructor function that wraps the variant in an
/// `Rc`, and an `is_<variant>` predicate.
///
/// Fields marked `#[rc_term(into)]` take `impl Into<T>` arguments.
#[proc_macro_derive(RcTerm, attributes(rc_term))]
pub fn rc_term_derive(input: TokenStream) -> TokenStream {
    let ast = syn::parse_macro_input!(input as DeriveInput);
    match RcTermDeriveInput::from_derive_input(&ast) {
        Ok(input) => input.derive_rc_term().into(),
        Err(err) => err.write_errors().into(),
    }
}
