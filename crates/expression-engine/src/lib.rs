pub mod balance;
pub mod builder;
pub mod compiler;
pub mod error;
pub mod eval;
pub mod normalize;
pub mod symbolic;
pub mod token;

pub use balance::check_balance;
pub use builder::PredicateBuilder;
pub use compiler::{FilterCompiler, compile};
pub use error::{CompileError, Result, StructuralError};
pub use eval::Evaluator;
pub use normalize::{normalize, normalize_tokens};
pub use symbolic::SymbolicBuilder;
pub use token::{Token, TokenKind};
