use crate::syntax::Term;
use std::rc::Rc;
use tracing::{debug, trace};
use util::{Error, Result};

/// How a call to [`Term::normalize`] ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Normalization {
    /// No redex is left.
    Normal { term: Rc<Term>, steps: usize },
    /// The step bound ran out first; `term` is the last state reached.
    StepLimitExceeded { term: Rc<Term>, steps: usize },
}

impl Normalization {
    pub fn term(&self) -> &Rc<Term> {
        match self {
            Self::Normal { term, .. } | Self::StepLimitExceeded { term, .. } => term,
        }
    }

    pub const fn steps(&self) -> usize {
        match self {
            Self::Normal { steps, .. } | Self::StepLimitExceeded { steps, .. } => *steps,
        }
    }

    pub const fn is_normal(&self) -> bool {
        matches!(self, Self::Normal { .. })
    }
}

impl Term {
    /// Whether the term contains no redex.
    pub fn is_normal(&self) -> bool {
        match self {
            Self::Var { .. } => true,
            Self::Abs { body, .. } => body.is_normal(),
            Self::App { left, right } => !left.is_abs() && left.is_normal() && right.is_normal(),
        }
    }

    /// One leftmost-outermost beta step. Arguments are substituted unevaluated.
    pub fn eval1(&self) -> Result<Rc<Self>> {
        match self {
            Self::App { left, right } => match left.as_ref() {
                Self::Abs { body, .. } => Ok(body.substitute(right)),
                _ => match left.eval1() {
                    Ok(left_) => Ok(Self::app(left_, Rc::clone(right))),
                    Err(Error::NoRuleApplies) => Ok(Self::app(Rc::clone(left), right.eval1()?)),
                    Err(err) => Err(err),
                },
            },
            Self::Abs { hint, body } => Ok(Self::abs(hint.clone(), body.eval1()?)),
            Self::Var { .. } => Err(Error::NoRuleApplies),
        }
    }

    /// Reduces until no rule applies or `max_steps` steps have been taken.
    pub fn normalize(self: &Rc<Self>, max_steps: usize) -> Normalization {
        let mut t = Rc::clone(self);
        let mut steps = 0;
        debug!(max_steps, size = t.size(), "normalizing");
        loop {
            if steps == max_steps && !t.is_normal() {
                debug!(steps, size = t.size(), "step limit exceeded");
                return Normalization::StepLimitExceeded { term: t, steps };
            }
            match t.eval1() {
                Ok(t_) => {
                    steps += 1;
                    trace!(step = steps, term = %t_);
                    t = t_;
                }
                Err(_) => {
                    debug!(steps, size = t.size(), "normal form reached");
                    return Normalization::Normal { term: t, steps };
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{debruijn::resolve, syntax::RawTerm};
    use pretty_assertions::assert_eq;
    use util::Context;

    fn normalize(src: &str, max_steps: usize) -> (Normalization, Context) {
        let (t, ctx) = resolve(&RawTerm::parse(src).unwrap()).unwrap();
        (t.normalize(max_steps), ctx)
    }

    fn show(result: &Normalization, ctx: &mut Context) -> String {
        result.term().to_named(ctx).unwrap().to_string()
    }

    #[test]
    fn identity_application() {
        let (result, mut ctx) = normalize(r"(\x. x) y", 1000);
        assert_eq!(
            result,
            Normalization::Normal {
                term: Term::free_var(0),
                steps: 1
            }
        );
        assert_eq!(show(&result, &mut ctx), "y");
    }

    #[test]
    fn constant_function() {
        let (result, mut ctx) = normalize(r"(\x. \y. x) a b", 1000);
        assert!(result.is_normal());
        assert_eq!(result.term(), &Term::free_var(0));
        assert_eq!(show(&result, &mut ctx), "a");
    }

    #[test]
    fn self_application_exhausts_the_bound() {
        let (omega, _) = resolve(&RawTerm::parse(r"(\x. x x) (\x. x x)").unwrap()).unwrap();
        let result = omega.normalize(1000);
        assert!(!result.is_normal());
        assert_eq!(result.steps(), 1000);
        assert_eq!(result.term(), &omega);
        assert_eq!(omega.eval1().unwrap(), omega);
    }

    #[test]
    fn substituted_argument_is_not_captured() {
        let (result, mut ctx) = normalize(r"(\x. \y. x) y", 1000);
        assert_eq!(
            result.term(),
            &Term::abs("y", Term::free_var(1))
        );
        assert_eq!(show(&result, &mut ctx), "λy'. y");
    }

    #[test]
    fn normal_forms_take_no_steps() {
        let (result, _) = normalize(r"(\f x. f (f x)) (\y. y)", 1000);
        let normal = Rc::clone(result.term());
        assert_eq!(normal, Term::abs("x", Term::bound_var(0)));
        let again = normal.normalize(1000);
        assert_eq!(
            again,
            Normalization::Normal {
                term: normal,
                steps: 0
            }
        );
    }

    #[test]
    fn normal_order_skips_divergent_arguments() {
        let (result, mut ctx) = normalize(r"(\x. z) ((\x. x x) (\x. x x))", 1);
        assert!(result.is_normal());
        assert_eq!(result.steps(), 1);
        assert_eq!(show(&result, &mut ctx), "z");
    }

    #[test]
    fn reduces_under_binders_and_in_arguments() {
        let (result, mut ctx) = normalize(r"\a. f ((\x. x) a) ((\y. y) b)", 10);
        assert!(result.is_normal());
        assert_eq!(show(&result, &mut ctx), "λa. f a b");
    }

    #[test]
    fn church_arithmetic() {
        let plus = r"(\m n f x. m f (n f x))";
        let two = r"(\f x. f (f x))";
        let three = r"(\f x. f (f (f x)))";
        let (result, mut ctx) = normalize(&format!("{plus} {two} {three} s z"), 1000);
        assert!(result.is_normal());
        assert_eq!(show(&result, &mut ctx), "s (s (s (s (s z))))");
    }

    #[test]
    fn zero_steps_allowed() {
        let (result, _) = normalize(r"(\x. x) y", 0);
        assert_eq!(result.steps(), 0);
        assert!(!result.is_normal());
        let (result, _) = normalize(r"\x. x", 0);
        assert!(result.is_normal());
    }

    #[test]
    fn stuck_terms_are_normal() {
        let (t, _) = resolve(&RawTerm::parse("x (y z)").unwrap()).unwrap();
        assert!(t.is_normal());
        assert_eq!(t.eval1(), Err(Error::NoRuleApplies));
    }
}
