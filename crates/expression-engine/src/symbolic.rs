use crate::builder::PredicateBuilder;
use model::{LookupError, LookupKind};

/// Builds a textual rendition of the predicate tree, e.g.
/// `or(status=open, and(priority=high, not(closed_at__isnull=True)))`.
///
/// Useful to inspect how a filter was grouped without a query layer.
#[derive(Debug, Clone, Copy, Default)]
pub struct SymbolicBuilder;

impl PredicateBuilder for SymbolicBuilder {
    type Predicate = String;

    fn compile_atomic(
        &self,
        field: &str,
        lookup: LookupKind,
        value: Option<&str>,
    ) -> Result<String, LookupError> {
        let keypath = lookup.keypath(field);
        Ok(match lookup {
            LookupKind::IsNull | LookupKind::IsTrue => format!("{keypath}=True"),
            LookupKind::IsNotNull | LookupKind::IsFalse => format!("{keypath}=False"),
            _ => format!("{keypath}={}", value.unwrap_or_default()),
        })
    }

    fn negate(&self, predicate: String) -> String {
        format!("not({predicate})")
    }

    fn and(&self, left: String, right: String) -> String {
        format!("and({left}, {right})")
    }

    fn or(&self, left: String, right: String) -> String {
        format!("or({left}, {right})")
    }

    fn true_value(&self) -> String {
        "TRUE".to_string()
    }
}
