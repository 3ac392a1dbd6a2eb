pub mod builder;
pub mod condition;
pub mod error;
pub mod matcher;
pub mod plan;
pub mod query;
pub mod registry;
pub mod schema;

pub use builder::ConditionBuilder;
pub use condition::Condition;
pub use error::PlannerError;
pub use plan::{FilterPlan, RenderedQuery};
pub use registry::ModelRegistry;
pub use schema::{FieldChoice, ModelSchema, humanize};
