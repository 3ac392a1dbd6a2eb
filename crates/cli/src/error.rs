use expression_engine::CompileError;
use planner::PlannerError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Failed to read input file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("Failed to deserialize input file as JSON: {0}")]
    Deserialize(#[from] serde_json::Error),

    #[error("Failed to serialize data to JSON: {0}")]
    JsonSerialize(serde_json::Error),

    #[error("No model registry given; pass --registry or set DYNFILTER_REGISTRY")]
    MissingRegistry,

    #[error("Records file must contain a JSON array, got {0}")]
    InvalidRecords(String),

    #[error("Filter has {0} problem(s)")]
    InvalidFilter(usize),

    #[error(transparent)]
    Planner(#[from] PlannerError),

    #[error("Failed to compile filter: {0}")]
    Compile(#[from] CompileError),
}
