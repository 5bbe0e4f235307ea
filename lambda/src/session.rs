use crate::{
    environment::Environment,
    eval::Normalization,
    syntax::{Command, RawTerm, Term},
};
use std::{
    fmt::{self, Display, Formatter},
    rc::Rc,
};
use util::{Context, Error, Result};

pub const DEFAULT_MAX_STEPS: usize = 10_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    pub max_steps: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_steps: DEFAULT_MAX_STEPS,
        }
    }
}

/// What a command produced, ready to be printed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Output {
    Normal(Rc<RawTerm>),
    StepLimitExceeded { term: Rc<RawTerm>, steps: usize },
    Step(Rc<RawTerm>),
    AlreadyNormal(Rc<RawTerm>),
    Indexed(Rc<Term>),
    Bound(String),
    MaxSteps(usize),
    Nothing,
}

impl Display for Output {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Normal(t) | Self::Step(t) => write!(f, "{t}"),
            Self::StepLimitExceeded { term, steps } => {
                write!(f, "no normal form after {steps} steps; stopped at: {term}")
            }
            Self::AlreadyNormal(t) => write!(f, "{t} is already in normal form"),
            Self::Indexed(t) => write!(f, "{t}"),
            Self::Bound(x) => write!(f, "{x} defined"),
            Self::MaxSteps(n) => write!(f, "step limit set to {n}"),
            Self::Nothing => Ok(()),
        }
    }
}

/// The state carried between commands: free names seen so far, definitions and settings.
#[derive(Clone, Debug, Default)]
pub struct Session {
    ctx: Context,
    env: Environment,
    config: Config,
}

impl Session {
    pub fn new(config: Config) -> Self {
        Self {
            ctx: Context::new(),
            env: Environment::new(),
            config,
        }
    }

    pub const fn config(&self) -> &Config {
        &self.config
    }

    pub const fn environment(&self) -> &Environment {
        &self.env
    }

    fn resolve(&mut self, t: &RawTerm) -> Result<Rc<Term>> {
        t.to_de_bruijn(&mut self.ctx, &self.env)
    }

    pub fn execute(&mut self, cmd: Command) -> Result<Output> {
        match cmd {
            Command::Eval(t) => {
                let t = self.resolve(&t)?;
                match t.normalize(self.config.max_steps) {
                    Normalization::Normal { term, .. } => {
                        Ok(Output::Normal(term.to_named(&mut self.ctx)?))
                    }
                    Normalization::StepLimitExceeded { term, steps } => {
                        Ok(Output::StepLimitExceeded {
                            term: term.to_named(&mut self.ctx)?,
                            steps,
                        })
                    }
                }
            }
            Command::Eval1(t) => {
                let t = self.resolve(&t)?;
                match t.eval1() {
                    Ok(t_) => Ok(Output::Step(t_.to_named(&mut self.ctx)?)),
                    Err(Error::NoRuleApplies) => {
                        Ok(Output::AlreadyNormal(t.to_named(&mut self.ctx)?))
                    }
                    Err(err) => Err(err),
                }
            }
            Command::DeBruijn(t) => Ok(Output::Indexed(self.resolve(&t)?)),
            Command::Bind(x, t) => {
                self.env.define(x.clone(), &t, &mut self.ctx)?;
                Ok(Output::Bound(x))
            }
            Command::Steps(n) => {
                self.config.max_steps = n;
                Ok(Output::MaxSteps(n))
            }
            Command::Noop => Ok(Output::Nothing),
        }
    }
}
