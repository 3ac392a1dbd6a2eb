use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::{cmp::Ordering, fmt, str::FromStr};

/// Scalar comparison value carried by a parsed lookup operand and bound as a
/// query parameter.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Value {
    Int(i64),
    Decimal(BigDecimal),
    String(String),
    Boolean(bool),
    Date(NaiveDate),
}

impl Value {
    pub fn as_decimal(&self) -> Option<BigDecimal> {
        match self {
            Value::Int(v) => Some(BigDecimal::from(*v)),
            Value::Decimal(v) => Some(v.clone()),
            Value::String(v) => BigDecimal::from_str(v.trim()).ok(),
            Value::Boolean(_) => None,
            Value::Date(_) => None,
        }
    }

    pub fn as_string(&self) -> String {
        match self {
            Value::Int(v) => v.to_string(),
            Value::Decimal(v) => v.to_string(),
            Value::String(v) => v.clone(),
            Value::Boolean(v) => v.to_string(),
            Value::Date(v) => v.to_string(),
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(v) => Some(*v),
            Value::Int(v) => Some(*v != 0),
            Value::String(v) => match v.to_lowercase().as_str() {
                "true" | "1" => Some(true),
                "false" | "0" => Some(false),
                _ => None,
            },
            Value::Decimal(_) | Value::Date(_) => None,
        }
    }

    pub fn compare(&self, other: &Value) -> Option<Ordering> {
        use Value::*;
        match (self, other) {
            (Int(a), Int(b)) => Some(a.cmp(b)),
            (String(a), String(b)) => Some(a.cmp(b)),
            (Boolean(a), Boolean(b)) => Some(a.cmp(b)),
            (Date(a), Date(b)) => Some(a.cmp(b)),
            (Int(_) | Decimal(_), Int(_) | Decimal(_)) => {
                Some(self.as_decimal()?.cmp(&other.as_decimal()?))
            }
            _ => None,
        }
    }

    pub fn equal(&self, other: &Value) -> bool {
        self.compare(other) == Some(Ordering::Equal)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(v) => write!(f, "{v}"),
            Value::Decimal(v) => write!(f, "{v}"),
            Value::String(v) => write!(f, "'{}'", v.replace('\'', "''")),
            Value::Boolean(true) => write!(f, "True"),
            Value::Boolean(false) => write!(f, "False"),
            Value::Date(v) => write!(f, "'{v}'"),
        }
    }
}
