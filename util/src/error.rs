use std::result::Result as StdResult;
use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Error {
    #[error("Variable lookup failure: offset: {0}, ctx size: {1}")]
    VariableLookupFailure(usize, usize),
    #[error("Index {index} is out of scope at binder depth {depth}")]
    IndexOutOfScope { index: usize, depth: usize },
    #[error("Malformed term: {0}")]
    MalformedTerm(String),
    #[error("No rule applies")]
    NoRuleApplies,
}

pub type Result<T, E = Error> = StdResult<T, E>;
