use crate::core::{
    lookup::LookupKind,
    operand::Operand,
    operator::Operator,
    utils::{FIELD_SEPARATOR, split_fields},
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One user-ordered element of a filter expression: an atomic condition or a
/// control operator.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Term {
    #[serde(default)]
    pub operator: Operator,

    /// Alternative field paths; a match on any of them satisfies the term.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lookup: Option<LookupKind>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,

    #[serde(default)]
    pub order: u32,

    /// Marked for removal but not yet committed.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub deleted: bool,
}

impl Term {
    /// Atomic term over a `|`-separated field path, e.g. `title|subtitle`.
    pub fn atomic(fields: &str, lookup: LookupKind, value: Option<&str>) -> Self {
        Self {
            operator: Operator::None,
            fields: split_fields(fields),
            lookup: Some(lookup),
            value: value.map(str::to_string),
            ..Default::default()
        }
    }

    pub fn negated(fields: &str, lookup: LookupKind, value: Option<&str>) -> Self {
        Self {
            operator: Operator::Not,
            ..Self::atomic(fields, lookup, value)
        }
    }

    pub fn control(operator: Operator) -> Self {
        Self {
            operator,
            ..Default::default()
        }
    }

    pub fn and() -> Self {
        Self::control(Operator::And)
    }

    pub fn or() -> Self {
        Self::control(Operator::Or)
    }

    pub fn open() -> Self {
        Self::control(Operator::Open)
    }

    pub fn close() -> Self {
        Self::control(Operator::Close)
    }

    pub fn with_order(mut self, order: u32) -> Self {
        self.order = order;
        self
    }

    pub fn mark_deleted(mut self) -> Self {
        self.deleted = true;
        self
    }

    pub fn is_atomic(&self) -> bool {
        self.operator.is_atomic()
    }

    pub fn field_path(&self) -> String {
        self.fields.join(FIELD_SEPARATOR)
    }

    /// Drops payload that is meaningless for the term's operator or lookup.
    pub fn cleaned(mut self) -> Self {
        if !self.operator.is_atomic() {
            self.fields.clear();
            self.lookup = None;
            self.value = None;
        } else if self.lookup.is_some_and(|l| !l.takes_value()) {
            self.value = None;
        }
        self
    }

    fn describe_field(&self, f: &mut fmt::Formatter<'_>, field: &str, lookup: LookupKind) -> fmt::Result {
        write!(f, "{} == ", lookup.keypath(field))?;
        match Operand::parse(field, lookup, self.value.as_deref()) {
            Ok(operand) => write!(f, "{operand}"),
            Err(_) => write!(f, "{}", self.value.as_deref().unwrap_or("?")),
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.is_atomic() {
            return write!(f, "{}", self.operator);
        }

        let Some(lookup) = self.lookup else {
            return write!(f, "{} ?", self.field_path());
        };

        if self.operator == Operator::Not {
            write!(f, "NOT(")?;
        }
        for (i, field) in self.fields.iter().enumerate() {
            if i > 0 {
                write!(f, " OR ")?;
            }
            self.describe_field(f, field, lookup)?;
        }
        if self.operator == Operator::Not {
            write!(f, ")")?;
        }
        Ok(())
    }
}
