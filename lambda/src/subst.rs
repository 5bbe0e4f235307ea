use crate::syntax::Term;
use std::rc::Rc;

impl Term {
    fn map_vars_walk(
        &self,
        cutoff: usize,
        f: &mut impl FnMut(usize, usize, bool) -> Rc<Self>,
    ) -> Rc<Self> {
        match self {
            Self::Var { index, free } => f(cutoff, *index, *free),
            Self::Abs { hint, body } => Self::abs(hint.clone(), body.map_vars_walk(cutoff + 1, f)),
            Self::App { left, right } => {
                Self::app(left.map_vars_walk(cutoff, f), right.map_vars_walk(cutoff, f))
            }
        }
    }

    /// Rebuilds the term, replacing every variable with `f(cutoff, index, free)`, where
    /// `cutoff` is the number of abstractions entered since the start (plus the initial one).
    fn map_vars(&self, cutoff: usize, f: impl FnMut(usize, usize, bool) -> Rc<Self>) -> Rc<Self> {
        let mut f = f;
        self.map_vars_walk(cutoff, &mut f)
    }

    /// Adds `d` to every free variable and to every bound variable that points outside the
    /// `c` innermost abstractions surrounding it.
    pub fn shift_above(&self, d: isize, c: usize) -> Rc<Self> {
        self.map_vars(c, |c, x, free| {
            if free || x >= c {
                let Some(x_) = x.checked_add_signed(d) else {
                    panic!("shifting index {x} by {d} leaves the context");
                };
                Self::var(x_, free)
            } else {
                Self::var(x, free)
            }
        })
    }

    pub fn shift(&self, d: isize) -> Rc<Self> {
        self.shift_above(d, 0)
    }

    fn subst(&self, j: usize, s: &Self) -> Rc<Self> {
        self.map_vars(0, |c, x, free| {
            if !free && x == j + c {
                s.shift(c as isize)
            } else {
                Self::var(x, free)
            }
        })
    }

    /// The body of `λ. self` applied to `value`: index 0 is replaced by `value`, and every
    /// reference that pointed past the consumed binder moves one binder closer.
    pub fn substitute(&self, value: &Self) -> Rc<Self> {
        self.subst(0, &value.shift(1)).shift(-1)
    }
}
