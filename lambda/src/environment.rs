use crate::syntax::{RawTerm, Term};
use std::{collections::HashMap, rc::Rc};
use tracing::debug;
use util::{Context, Result};

/// Top-level definitions, kept in resolved form.
///
/// Definitions are indexed against the [`Context`] they were bound in, and the resolver
/// inlines them into later terms resolved against that same context. The reducer never sees
/// a definition by name.
#[derive(Clone, Debug, Default)]
pub struct Environment {
    values: HashMap<String, Rc<Term>>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&Rc<Term>> {
        self.values.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// Resolves `raw` and binds it to `name`, replacing any previous definition.
    ///
    /// Occurrences of `name` inside `raw` refer to the previous definition if there is one,
    /// and are free otherwise.
    pub fn define(
        &mut self,
        name: impl Into<String>,
        raw: &RawTerm,
        ctx: &mut Context,
    ) -> Result<Rc<Term>> {
        let name = name.into();
        let term = raw.to_de_bruijn(ctx, self)?;
        debug!(%name, size = term.size(), "bound definition");
        self.values.insert(name, Rc::clone(&term));
        Ok(term)
    }
}
