use crate::{
    core::{
        lookup::LookupKind,
        utils::{is_date_field, split_list, str_as_date, str_as_date_range},
        value::Value,
    },
    errors::LookupError,
};
use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Typed right-hand side of an atomic comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operand {
    Scalar(Value),
    Range(Value, Value),
    List(Vec<Value>),
}

impl Operand {
    /// Interprets a raw term value according to the lookup and the field it
    /// applies to.
    ///
    /// Null and boolean checks ignore `raw` entirely. Date values use
    /// `DD/MM/YYYY`; ranges take two comma-separated dates in the order given.
    /// Ordering lookups on non-date fields never fail: numbers become decimals
    /// and any other text is passed through.
    pub fn parse(field: &str, lookup: LookupKind, raw: Option<&str>) -> Result<Self, LookupError> {
        let required = || {
            raw.filter(|v| !v.trim().is_empty())
                .ok_or(LookupError::MissingValue(lookup))
        };

        match lookup {
            LookupKind::IsNull | LookupKind::IsTrue => Ok(Operand::Scalar(Value::Boolean(true))),
            LookupKind::IsNotNull | LookupKind::IsFalse => {
                Ok(Operand::Scalar(Value::Boolean(false)))
            }
            LookupKind::In => {
                let items = split_list(required()?);
                if items.is_empty() {
                    return Err(LookupError::MissingValue(lookup));
                }
                Ok(Operand::List(items.into_iter().map(Value::String).collect()))
            }
            LookupKind::DateRange => {
                let raw = required()?;
                let (start, end) = str_as_date_range(raw)
                    .ok_or_else(|| LookupError::InvalidDateRange(raw.to_string()))?;
                Ok(Operand::Range(Value::Date(start), Value::Date(end)))
            }
            LookupKind::DateEquals => parse_date(required()?),
            LookupKind::Year | LookupKind::Month | LookupKind::Day => {
                let raw = required()?;
                raw.trim()
                    .parse::<i64>()
                    .map(|v| Operand::Scalar(Value::Int(v)))
                    .map_err(|_| LookupError::InvalidNumber(raw.to_string()))
            }
            LookupKind::Lt | LookupKind::Gt | LookupKind::Lte | LookupKind::Gte => {
                let raw = required()?;
                if is_date_field(field) {
                    return parse_date(raw);
                }
                // Numeric text orders numerically; anything else is compared as text.
                Ok(Operand::Scalar(match BigDecimal::from_str(raw.trim()) {
                    Ok(number) => Value::Decimal(number),
                    Err(_) => Value::String(raw.to_string()),
                }))
            }
            LookupKind::Equals if is_date_field(field) => parse_date(required()?),
            LookupKind::Equals
            | LookupKind::Contains
            | LookupKind::StartsWith
            | LookupKind::EndsWith => Ok(Operand::Scalar(Value::String(required()?.to_string()))),
        }
    }

    pub fn as_scalar(&self) -> Option<&Value> {
        match self {
            Operand::Scalar(v) => Some(v),
            _ => None,
        }
    }

    /// Flattens the operand into bind parameters in rendering order.
    pub fn values(&self) -> Vec<&Value> {
        match self {
            Operand::Scalar(v) => vec![v],
            Operand::Range(start, end) => vec![start, end],
            Operand::List(items) => items.iter().collect(),
        }
    }
}

fn parse_date(raw: &str) -> Result<Operand, LookupError> {
    str_as_date(raw)
        .map(|d| Operand::Scalar(Value::Date(d)))
        .ok_or_else(|| LookupError::InvalidDate(raw.to_string()))
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Scalar(v) => write!(f, "{v}"),
            Operand::Range(start, end) => write!(f, "[{start}, {end}]"),
            Operand::List(items) => {
                let joined = items
                    .iter()
                    .map(|v| v.to_string())
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(f, "[{joined}]")
            }
        }
    }
}
