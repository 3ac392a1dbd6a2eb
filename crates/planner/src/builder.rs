use crate::{condition::Condition, schema::ModelSchema};
use expression_engine::PredicateBuilder;
use model::{LookupError, LookupKind, Operand};
use tracing::trace;

/// Compiles terms into [`Condition`] trees.
///
/// When bound to a schema, only the field paths it offers are accepted.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConditionBuilder<'s> {
    schema: Option<&'s ModelSchema>,
}

impl<'s> ConditionBuilder<'s> {
    pub fn new() -> Self {
        Self { schema: None }
    }

    pub fn for_schema(schema: &'s ModelSchema) -> Self {
        Self {
            schema: Some(schema),
        }
    }
}

impl PredicateBuilder for ConditionBuilder<'_> {
    type Predicate = Condition;

    fn compile_atomic(
        &self,
        field: &str,
        lookup: LookupKind,
        value: Option<&str>,
    ) -> Result<Condition, LookupError> {
        if let Some(schema) = self.schema
            && !schema.allows(field)
        {
            return Err(LookupError::UnknownField {
                model: schema.qualified_name(),
                field: field.to_string(),
            });
        }

        let operand = Operand::parse(field, lookup, value)?;
        trace!("Compiled {} {} {}", field, lookup, operand);
        Ok(Condition::compare(field, lookup, operand))
    }

    fn negate(&self, predicate: Condition) -> Condition {
        Condition::negate(predicate)
    }

    fn and(&self, left: Condition, right: Condition) -> Condition {
        Condition::and(left, right)
    }

    fn or(&self, left: Condition, right: Condition) -> Condition {
        Condition::or(left, right)
    }

    fn true_value(&self) -> Condition {
        Condition::True
    }
}
