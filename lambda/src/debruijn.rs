use crate::{
    environment::Environment,
    syntax::{RawTerm, Term},
};
use std::rc::Rc;
use tracing::debug;
use util::{Context, Error, Result};

fn check_name(name: &str) -> Result<()> {
    if name.is_empty() {
        Err(Error::MalformedTerm("empty identifier".to_string()))
    } else {
        Ok(())
    }
}

impl RawTerm {
    /// Converts to de Bruijn form.
    ///
    /// A name resolves to the nearest enclosing binder, then to a definition in `env`, and
    /// otherwise to a free variable registered in `ctx`. Free variables are never an error.
    pub fn to_de_bruijn(&self, ctx: &mut Context, env: &Environment) -> Result<Rc<Term>> {
        let depth = ctx.depth();
        let term = self.to_de_bruijn_walk(ctx, env)?;
        term.validate_at(depth)?;
        Ok(term)
    }

    fn to_de_bruijn_walk(&self, ctx: &mut Context, env: &Environment) -> Result<Rc<Term>> {
        match self {
            Self::Var(x) => {
                check_name(x)?;
                if let Some(i) = ctx.bound_index(x) {
                    Ok(Term::bound_var(i))
                } else if let Some(t) = env.get(x) {
                    Ok(t.shift(ctx.depth() as isize))
                } else {
                    if ctx.free_index(x).is_none() {
                        debug!(name = %x, slot = ctx.free_names().count(), "free variable");
                    }
                    Ok(Term::free_var(ctx.add_free(x.as_str())))
                }
            }
            Self::Abs(x, t) => {
                check_name(x)?;
                Ok(Term::abs(
                    x.clone(),
                    ctx.with_name(x.clone(), |ctx| t.to_de_bruijn_walk(ctx, env))?,
                ))
            }
            Self::App(t1, t2) => Ok(Term::app(
                t1.to_de_bruijn_walk(ctx, env)?,
                t2.to_de_bruijn_walk(ctx, env)?,
            )),
        }
    }
}

impl Term {
    /// Converts back to named form. Binders keep their hint unless it would clash with a
    /// name already in scope, in which case primes are appended.
    pub fn to_named(&self, ctx: &mut Context) -> Result<Rc<RawTerm>> {
        match self {
            Self::Var { index, .. } => Ok(RawTerm::var(ctx.index_to_name(*index)?)),
            Self::Abs { hint, body } => {
                let name = ctx.pick_fresh_name(hint);
                Ok(RawTerm::abs(
                    name.clone(),
                    ctx.with_name(name, |ctx| body.to_named(ctx))?,
                ))
            }
            Self::App { left, right } => {
                Ok(RawTerm::app(left.to_named(ctx)?, right.to_named(ctx)?))
            }
        }
    }
}

/// Resolves `raw` in a fresh context with no definitions, returning the context that names
/// its free variables.
pub fn resolve(raw: &RawTerm) -> Result<(Rc<Term>, Context)> {
    let mut ctx = Context::new();
    let term = raw.to_de_bruijn(&mut ctx, &Environment::new())?;
    Ok((term, ctx))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn indexed(src: &str) -> Rc<Term> {
        resolve(&RawTerm::parse(src).unwrap()).unwrap().0
    }

    #[test]
    fn identity_application() {
        assert_eq!(
            indexed(r"(\x. x) y"),
            Term::app(Term::abs("x", Term::bound_var(0)), Term::free_var(0))
        );
    }

    #[test]
    fn alpha_equivalent_terms_are_identical() {
        let pairs = [
            (r"\x. x", r"\y. y"),
            (r"\x y. x y", r"\a b. a b"),
            (r"\f. (\x. f (x x)) (\x. f (x x))", r"\g. (\y. g (y y)) (\z. g (z z))"),
            (r"\x. x free", r"\q. q free"),
        ];
        for (a, b) in pairs {
            assert_eq!(indexed(a), indexed(b), "{a} vs {b}");
        }
        assert_ne!(indexed(r"\x y. x"), indexed(r"\x y. y"));
    }

    #[test]
    fn inner_binder_shadows_outer() {
        assert_eq!(
            indexed(r"\x. \x. x"),
            Term::abs("x", Term::abs("x", Term::bound_var(0)))
        );
        assert_eq!(
            indexed(r"\x. \y. x"),
            Term::abs("x", Term::abs("y", Term::bound_var(1)))
        );
    }

    #[test]
    fn free_names_share_a_slot() {
        let (t, ctx) = resolve(&RawTerm::parse(r"a (\x. a b) b").unwrap()).unwrap();
        assert_eq!(
            t,
            Term::app(
                Term::app(
                    Term::free_var(0),
                    Term::abs("x", Term::app(Term::free_var(1), Term::free_var(2)))
                ),
                Term::free_var(1)
            )
        );
        assert_eq!(ctx.free_names().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(ctx.depth(), 0);
    }

    #[test]
    fn empty_names_are_malformed() {
        let raw = RawTerm::abs("", RawTerm::var("x"));
        assert_eq!(
            resolve(&raw).map(|(t, _)| t),
            Err(Error::MalformedTerm("empty identifier".to_string()))
        );
        assert!(resolve(&RawTerm::var("")).is_err());
    }

    #[test]
    fn round_trip_through_names() {
        let raw = RawTerm::parse(r"\f x. f (g x)").unwrap();
        let (t, mut ctx) = resolve(&raw).unwrap();
        assert_eq!(t.to_named(&mut ctx).unwrap(), raw);
    }

    #[test]
    fn display_avoids_free_names() {
        let mut ctx = Context::new();
        ctx.add_free("y");
        let t = Term::abs("y", Term::free_var(1));
        assert_eq!(t.to_named(&mut ctx).unwrap().to_string(), "λy'. y");
    }

    #[test]
    fn dangling_index_fails_to_print() {
        let mut ctx = Context::new();
        assert_eq!(
            Term::free_var(0).to_named(&mut ctx),
            Err(Error::VariableLookupFailure(0, 0))
        );
    }
}
