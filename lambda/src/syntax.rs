use std::{
    fmt::{self, Display, Formatter},
    rc::Rc,
};
use util::{Error, RcTerm, Result};

pub const KEYWORDS: &[&str] = &["lambda"];
pub const COMMANDS: &[&str] = &["eval", "eval1", "debruijn", "bind", "steps"];

/// A lambda term with named variables, as produced by the parser.
#[derive(Clone, Debug, PartialEq, Eq, RcTerm)]
pub enum RawTerm {
    Var(#[rc_term(into)] String),
    Abs(#[rc_term(into)] String, Rc<Self>),
    App(Rc<Self>, Rc<Self>),
}

/// A lambda term in de Bruijn form.
///
/// A bound variable's index counts the abstractions between it and its binder. A free
/// variable under `d` abstractions has index `d + slot`, where `slot` is its position in the
/// free-name table of the [`util::Context`] the term was resolved in.
///
/// `hint` is the binder's original name. It is only used to pick display names and is
/// ignored by equality, so alpha-equivalent terms compare equal.
#[derive(Clone, Debug, RcTerm)]
pub enum Term {
    Var {
        index: usize,
        free: bool,
    },
    Abs {
        #[rc_term(into)]
        hint: String,
        body: Rc<Self>,
    },
    App {
        left: Rc<Self>,
        right: Rc<Self>,
    },
}

impl Term {
    pub fn bound_var(index: usize) -> Rc<Self> {
        Self::var(index, false)
    }

    pub fn free_var(index: usize) -> Rc<Self> {
        Self::var(index, true)
    }

    /// Number of nodes.
    pub fn size(&self) -> usize {
        match self {
            Self::Var { .. } => 1,
            Self::Abs { body, .. } => 1 + body.size(),
            Self::App { left, right } => 1 + left.size() + right.size(),
        }
    }

    /// Checks that every bound variable points at an enclosing abstraction and every free
    /// variable points past all of them.
    pub fn validate(&self) -> Result<()> {
        self.validate_at(0)
    }

    pub(crate) fn validate_at(&self, depth: usize) -> Result<()> {
        match self {
            Self::Var { index, free } => {
                if *free == (*index >= depth) {
                    Ok(())
                } else {
                    Err(Error::IndexOutOfScope {
                        index: *index,
                        depth,
                    })
                }
            }
            Self::Abs { body, .. } => body.validate_at(depth + 1),
            Self::App { left, right } => {
                left.validate_at(depth)?;
                right.validate_at(depth)
            }
        }
    }
}

impl PartialEq for Term {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Var { index: i, free: f }, Self::Var { index: j, free: g }) => i == j && f == g,
            (Self::Abs { body: b1, .. }, Self::Abs { body: b2, .. }) => b1 == b2,
            (
                Self::App {
                    left: l1,
                    right: r1,
                },
                Self::App {
                    left: l2,
                    right: r2,
                },
            ) => l1 == l2 && r1 == r2,
            _ => false,
        }
    }
}

impl Eq for Term {}

impl RawTerm {
    fn fmt_atom(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Var(x) => write!(f, "{x}"),
            t => write!(f, "({t})"),
        }
    }

    fn fmt_app(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::App(t1, t2) => {
                t1.fmt_app(f)?;
                write!(f, " ")?;
                t2.fmt_atom(f)
            }
            _ => self.fmt_atom(f),
        }
    }
}

impl Display for RawTerm {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Abs(x, t) => write!(f, "λ{x}. {t}"),
            _ => self.fmt_app(f),
        }
    }
}

impl Term {
    fn fmt_atom(&self, depth: usize, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Var { index, free: false } => write!(f, "{index}"),
            Self::Var { index, free: true } => write!(f, "${}", index.saturating_sub(depth)),
            t => {
                write!(f, "(")?;
                t.fmt_term(depth, f)?;
                write!(f, ")")
            }
        }
    }

    fn fmt_app(&self, depth: usize, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::App { left, right } => {
                left.fmt_app(depth, f)?;
                write!(f, " ")?;
                right.fmt_atom(depth, f)
            }
            _ => self.fmt_atom(depth, f),
        }
    }

    fn fmt_term(&self, depth: usize, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Abs { body, .. } => {
                write!(f, "λ. ")?;
                body.fmt_term(depth + 1, f)
            }
            _ => self.fmt_app(depth, f),
        }
    }
}

/// Nameless form: bound variables print as their index, free variables as `$slot`.
impl Display for Term {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.fmt_term(0, f)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Eval(Rc<RawTerm>),
    Eval1(Rc<RawTerm>),
    DeBruijn(Rc<RawTerm>),
    Bind(String, Rc<RawTerm>),
    Steps(usize),
    Noop,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn equality_ignores_binder_hints() {
        let id_x = Term::abs("x", Term::bound_var(0));
        let id_y = Term::abs("y", Term::bound_var(0));
        assert_eq!(id_x, id_y);
        assert_ne!(Term::bound_var(0), Term::free_var(0));
        assert_ne!(
            Term::abs("x", Term::bound_var(0)),
            Term::app(Term::bound_var(0), Term::bound_var(0))
        );
    }

    #[test]
    fn raw_display_uses_minimal_parentheses() {
        let t = RawTerm::app(
            RawTerm::app(
                RawTerm::abs("x", RawTerm::app(RawTerm::var("x"), RawTerm::var("x"))),
                RawTerm::var("y"),
            ),
            RawTerm::app(RawTerm::var("f"), RawTerm::var("z")),
        );
        assert_eq!(t.to_string(), "(λx. x x) y (f z)");
    }

    #[test]
    fn nameless_display() {
        let t = Term::abs(
            "x",
            Term::app(
                Term::app(Term::bound_var(0), Term::free_var(1)),
                Term::abs("y", Term::app(Term::bound_var(1), Term::free_var(3))),
            ),
        );
        assert_eq!(t.to_string(), "λ. 0 $0 (λ. 1 $1)");
    }

    #[test]
    fn validate_rejects_escaping_indices() {
        assert_eq!(Term::abs("x", Term::bound_var(0)).validate(), Ok(()));
        assert_eq!(
            Term::abs("x", Term::bound_var(1)).validate(),
            Err(Error::IndexOutOfScope { index: 1, depth: 1 })
        );
        assert_eq!(
            Term::abs("x", Term::free_var(0)).validate(),
            Err(Error::IndexOutOfScope { index: 0, depth: 1 })
        );
    }

    #[test]
    fn size_counts_nodes() {
        let t = Term::app(Term::abs("x", Term::bound_var(0)), Term::free_var(0));
        assert_eq!(t.size(), 4);
        assert!(t.is_app());
        assert!(!t.is_abs());
    }
}
