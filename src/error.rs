use thiserror::Error;

use crate::kind::Kind;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("unknown literal id {0}")]
    UnknownId(u32),

    #[error("expected a variable, got {0}")]
    NotAVariable(String),

    #[error("expected a constant, got {0}")]
    NotAConstant(String),

    #[error("expected an operator, got {0}")]
    NotAnOperator(String),

    #[error("{kind} expects {expected} arguments, got {found}")]
    Arity {
        kind: Kind,
        expected: usize,
        found: usize,
    },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
