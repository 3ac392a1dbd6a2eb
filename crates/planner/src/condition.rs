//! Predicate tree produced by compiling a filter against a model.

use model::{LookupKind, Operand};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Condition {
    /// Matches every record.
    True,

    /// `field <lookup> operand`, where `field` is a `__`-separated path.
    Compare {
        field: String,
        lookup: LookupKind,
        operand: Operand,
    },

    Not(Box<Condition>),
    And(Box<Condition>, Box<Condition>),
    Or(Box<Condition>, Box<Condition>),
}

impl Condition {
    pub fn compare(field: &str, lookup: LookupKind, operand: Operand) -> Self {
        Condition::Compare {
            field: field.to_string(),
            lookup,
            operand,
        }
    }

    pub fn negate(inner: Condition) -> Self {
        Condition::Not(Box::new(inner))
    }

    pub fn and(left: Condition, right: Condition) -> Self {
        Condition::And(Box::new(left), Box::new(right))
    }

    pub fn or(left: Condition, right: Condition) -> Self {
        Condition::Or(Box::new(left), Box::new(right))
    }

    /// Field paths referenced anywhere in the tree, in first-seen order.
    pub fn fields(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_fields(&mut out);
        out
    }

    fn collect_fields<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            Condition::True => {}
            Condition::Compare { field, .. } => {
                if !out.contains(&field.as_str()) {
                    out.push(field);
                }
            }
            Condition::Not(inner) => inner.collect_fields(out),
            Condition::And(a, b) | Condition::Or(a, b) => {
                a.collect_fields(out);
                b.collect_fields(out);
            }
        }
    }

    fn precedence(&self) -> u8 {
        match self {
            Condition::Or(..) => 1,
            Condition::And(..) => 2,
            Condition::True | Condition::Compare { .. } | Condition::Not(_) => 3,
        }
    }

    fn fmt_child(&self, f: &mut fmt::Formatter<'_>, parent: u8) -> fmt::Result {
        if self.precedence() < parent {
            write!(f, "({self})")
        } else {
            write!(f, "{self}")
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Condition::True => write!(f, "TRUE"),
            Condition::Compare {
                field,
                lookup,
                operand,
            } => write!(f, "{} == {operand}", lookup.keypath(field)),
            Condition::Not(inner) => write!(f, "NOT({inner})"),
            Condition::And(a, b) => {
                a.fmt_child(f, 2)?;
                write!(f, " AND ")?;
                b.fmt_child(f, 2)
            }
            Condition::Or(a, b) => {
                a.fmt_child(f, 1)?;
                write!(f, " OR ")?;
                b.fmt_child(f, 1)
            }
        }
    }
}
