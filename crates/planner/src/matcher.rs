//! In-memory evaluation of a [`Condition`] against JSON records.
//!
//! Field paths walk nested objects one `__` segment at a time; arrays met on
//! the way fan out, and a comparison holds when any reached value satisfies
//! it. Values that cannot be coerced to the operand's type never match.

use crate::condition::Condition;
use bigdecimal::BigDecimal;
use chrono::{Datelike, NaiveDate, NaiveDateTime};
use model::{
    LookupKind, Operand, Value,
    core::utils::{PATH_SEPARATOR, str_as_date},
};
use serde_json::Value as JsonValue;
use std::{cmp::Ordering, str::FromStr};

impl Condition {
    pub fn matches(&self, record: &JsonValue) -> bool {
        match self {
            Condition::True => true,
            Condition::Not(inner) => !inner.matches(record),
            Condition::And(a, b) => a.matches(record) && b.matches(record),
            Condition::Or(a, b) => a.matches(record) || b.matches(record),
            Condition::Compare {
                field,
                lookup,
                operand,
            } => {
                let values = resolve(record, field);
                compare(&values, *lookup, operand)
            }
        }
    }

    /// Records of `records` matching this condition, in input order.
    pub fn filter<'r>(&self, records: &'r [JsonValue]) -> Vec<&'r JsonValue> {
        records.iter().filter(|r| self.matches(r)).collect()
    }
}

fn resolve<'r>(record: &'r JsonValue, path: &str) -> Vec<&'r JsonValue> {
    let mut current = vec![record];
    for segment in path.split(PATH_SEPARATOR) {
        current = current
            .into_iter()
            .flat_map(|value| match value {
                JsonValue::Array(items) => items.iter().collect::<Vec<_>>(),
                other => vec![other],
            })
            .filter_map(|value| value.get(segment))
            .collect();
    }
    current
        .into_iter()
        .flat_map(|value| match value {
            JsonValue::Array(items) => items.iter().collect::<Vec<_>>(),
            other => vec![other],
        })
        .collect()
}

fn compare(values: &[&JsonValue], lookup: LookupKind, operand: &Operand) -> bool {
    match (lookup, operand) {
        (LookupKind::IsNull | LookupKind::IsNotNull, Operand::Scalar(v)) => {
            let is_null = values.iter().all(|j| j.is_null());
            is_null == v.as_bool().unwrap_or(true)
        }
        (_, Operand::List(items)) => values
            .iter()
            .any(|j| items.iter().any(|item| coerce_equal(j, item))),
        (_, Operand::Range(start, end)) => values.iter().any(|j| {
            let after_start = coerce(j, start).and_then(|v| v.compare(start));
            let before_end = coerce(j, end).and_then(|v| v.compare(end));
            matches!(after_start, Some(Ordering::Greater | Ordering::Equal))
                && matches!(before_end, Some(Ordering::Less | Ordering::Equal))
        }),
        (_, Operand::Scalar(v)) => values.iter().any(|j| compare_scalar(j, lookup, v)),
    }
}

fn compare_scalar(json: &JsonValue, lookup: LookupKind, expected: &Value) -> bool {
    match lookup {
        LookupKind::Contains | LookupKind::StartsWith | LookupKind::EndsWith => {
            let Some(text) = as_text(json) else {
                return false;
            };
            let (text, needle) = (text.to_lowercase(), expected.as_string().to_lowercase());
            match lookup {
                LookupKind::StartsWith => text.starts_with(&needle),
                LookupKind::EndsWith => text.ends_with(&needle),
                _ => text.contains(&needle),
            }
        }
        LookupKind::Year | LookupKind::Month | LookupKind::Day => {
            let Some(date) = as_date(json) else {
                return false;
            };
            let part = match lookup {
                LookupKind::Year => i64::from(date.year()),
                LookupKind::Month => i64::from(date.month()),
                _ => i64::from(date.day()),
            };
            Value::Int(part).equal(expected)
        }
        LookupKind::DateEquals => as_date(json).is_some_and(|d| Value::Date(d).equal(expected)),
        LookupKind::Lt | LookupKind::Gt | LookupKind::Lte | LookupKind::Gte => {
            let Some(ordering) = coerce(json, expected).and_then(|v| v.compare(expected)) else {
                return false;
            };
            match lookup {
                LookupKind::Lt => ordering == Ordering::Less,
                LookupKind::Gt => ordering == Ordering::Greater,
                LookupKind::Lte => ordering != Ordering::Greater,
                _ => ordering != Ordering::Less,
            }
        }
        _ => coerce_equal(json, expected),
    }
}

fn coerce_equal(json: &JsonValue, expected: &Value) -> bool {
    coerce(json, expected).is_some_and(|v| v.equal(expected))
}

/// Converts a JSON value into the variant of `like`.
fn coerce(json: &JsonValue, like: &Value) -> Option<Value> {
    match like {
        Value::String(_) => as_text(json).map(Value::String),
        Value::Int(_) | Value::Decimal(_) => match json {
            JsonValue::Number(n) => BigDecimal::from_str(&n.to_string()).ok().map(Value::Decimal),
            JsonValue::String(s) => BigDecimal::from_str(s.trim()).ok().map(Value::Decimal),
            _ => None,
        },
        Value::Boolean(_) => json.as_bool().map(Value::Boolean),
        Value::Date(_) => as_date(json).map(Value::Date),
    }
}

fn as_text(json: &JsonValue) -> Option<String> {
    match json {
        JsonValue::String(s) => Some(s.clone()),
        JsonValue::Number(n) => Some(n.to_string()),
        JsonValue::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Accepts ISO dates, ISO timestamps (truncated) and `DD/MM/YYYY`.
fn as_date(json: &JsonValue) -> Option<NaiveDate> {
    let s = json.as_str()?.trim();
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
                .ok()
                .map(|dt| dt.date())
        })
        .or_else(|| s.get(..10).and_then(|p| NaiveDate::parse_from_str(p, "%Y-%m-%d").ok()))
        .or_else(|| str_as_date(s))
}
