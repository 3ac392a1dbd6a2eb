use expression_engine::CompileError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlannerError {
    #[error("model '{0}' is not registered for dynamic filtering")]
    UnknownModel(String),

    #[error("model '{0}' is registered twice")]
    DuplicateModel(String),

    #[error("field '{path}' of model '{model}' needs a relation that is not declared")]
    MissingRelation { model: String, path: String },

    #[error("invalid model registry: {0}")]
    Registry(#[from] serde_json::Error),

    #[error(transparent)]
    Compile(#[from] CompileError),
}

pub type Result<T> = std::result::Result<T, PlannerError>;
