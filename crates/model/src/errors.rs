use crate::core::lookup::LookupKind;
use thiserror::Error;

/// Failure to turn one atomic term into a predicate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("term has no field")]
    MissingField,

    #[error("term has no lookup")]
    MissingLookup,

    #[error("missing value for lookup '{0}'")]
    MissingValue(LookupKind),

    #[error("invalid date '{0}': should be \"DD/MM/YYYY\"")]
    InvalidDate(String),

    #[error("invalid date range '{0}': should be \"DD/MM/YYYY, DD/MM/YYYY\"")]
    InvalidDateRange(String),

    #[error("invalid number '{0}'")]
    InvalidNumber(String),

    #[error("unknown field '{field}' for model '{model}'")]
    UnknownField { model: String, field: String },
}
