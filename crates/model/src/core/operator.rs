use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Operator column of a filter term.
///
/// `None` and `Not` mark a term carrying an atomic predicate (negated for
/// `Not`); the remaining variants are control operators with no payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Operator {
    #[default]
    #[serde(rename = "none", alias = "-")]
    None,
    #[serde(rename = "not", alias = "!")]
    Not,
    #[serde(rename = "and", alias = "&")]
    And,
    #[serde(rename = "or", alias = "|")]
    Or,
    #[serde(rename = "open", alias = "(")]
    Open,
    #[serde(rename = "close", alias = ")")]
    Close,
}

impl Operator {
    pub const ALL: [Operator; 6] = [
        Operator::None,
        Operator::Not,
        Operator::And,
        Operator::Or,
        Operator::Open,
        Operator::Close,
    ];

    /// Whether the term carries an atomic predicate.
    pub fn is_atomic(self) -> bool {
        matches!(self, Operator::None | Operator::Not)
    }

    /// Persisted single-character code.
    pub fn code(self) -> char {
        match self {
            Operator::None => '-',
            Operator::Not => '!',
            Operator::And => '&',
            Operator::Or => '|',
            Operator::Open => '(',
            Operator::Close => ')',
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Operator::None => "-",
            Operator::Not => "NOT",
            Operator::And => "AND",
            Operator::Or => "OR",
            Operator::Open => "(",
            Operator::Close => ")",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Operator {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "-" | "none" => Ok(Operator::None),
            "!" | "not" => Ok(Operator::Not),
            "&" | "and" => Ok(Operator::And),
            "|" | "or" => Ok(Operator::Or),
            "(" | "open" => Ok(Operator::Open),
            ")" | "close" => Ok(Operator::Close),
            other => Err(format!("unknown operator '{other}'")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operator_codes_round_trip_through_from_str() {
        for op in Operator::ALL {
            assert_eq!(op.code().to_string().parse::<Operator>(), Ok(op));
        }
    }

    #[test]
    fn test_operator_accepts_legacy_codes_in_json() {
        let op: Operator = serde_json::from_str(r#""&""#).unwrap();
        assert_eq!(op, Operator::And);
        let op: Operator = serde_json::from_str(r#""not""#).unwrap();
        assert_eq!(op, Operator::Not);
    }
}
