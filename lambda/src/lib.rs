#![warn(clippy::nursery)]
#![warn(clippy::unnested_or_patterns)]
#![warn(clippy::uninlined_format_args)]

pub mod debruijn;
pub mod environment;
pub mod eval;
pub mod parser;
pub mod session;
pub mod subst;
pub mod syntax;

pub use debruijn::resolve;
pub use environment::Environment;
pub use eval::Normalization;
pub use session::{Config, Output, Session};
pub use syntax::{Command, RawTerm, Term};
