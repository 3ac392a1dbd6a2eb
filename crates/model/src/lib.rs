pub mod core;
pub mod errors;
pub mod filter;
pub mod validation;

pub use crate::core::{
    lookup::LookupKind,
    operand::Operand,
    operator::Operator,
    term::Term,
    value::Value,
};
pub use errors::LookupError;
pub use filter::{ColumnPref, FilterExpr, SortPref};
