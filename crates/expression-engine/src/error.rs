use model::LookupError;
use thiserror::Error;

/// Malformed parenthesization.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StructuralError {
    #[error("missing opening parenthesis for ')' at term #{}", .position + 1)]
    UnmatchedClose { position: usize },

    #[error("missing closing parenthesis ({depth} left open)")]
    UnclosedOpen { depth: usize },
}

#[derive(Debug, Error)]
pub enum CompileError {
    #[error("malformed filter expression: {0}")]
    Structural(#[from] StructuralError),

    #[error("term #{} cannot be compiled: {source}", .position + 1)]
    Lookup {
        position: usize,
        source: LookupError,
    },

    /// The operand stack did not reduce to a single value. Indicates a defect
    /// in normalization rather than a user error.
    #[error("internal invariant violated: {0}")]
    Invariant(String),
}

impl CompileError {
    pub fn is_structural(&self) -> bool {
        matches!(self, CompileError::Structural(_))
    }

    pub fn lookup_error(&self) -> Option<&LookupError> {
        match self {
            CompileError::Lookup { source, .. } => Some(source),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, CompileError>;
