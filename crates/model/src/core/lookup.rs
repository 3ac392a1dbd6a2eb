use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Comparison applied between a field and a term's value.
///
/// Codes follow the persisted lookup column (`icontains`, `range`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LookupKind {
    #[serde(rename = "=")]
    Equals,
    #[serde(rename = "icontains")]
    Contains,
    #[serde(rename = "istartswith")]
    StartsWith,
    #[serde(rename = "iendswith")]
    EndsWith,
    #[serde(rename = "in")]
    In,
    #[serde(rename = "date")]
    DateEquals,
    #[serde(rename = "range")]
    DateRange,
    #[serde(rename = "year")]
    Year,
    #[serde(rename = "month")]
    Month,
    #[serde(rename = "day")]
    Day,
    #[serde(rename = "isnull")]
    IsNull,
    #[serde(rename = "isnotnull")]
    IsNotNull,
    #[serde(rename = "istrue")]
    IsTrue,
    #[serde(rename = "isfalse")]
    IsFalse,
    #[serde(rename = "lt")]
    Lt,
    #[serde(rename = "gt")]
    Gt,
    #[serde(rename = "lte")]
    Lte,
    #[serde(rename = "gte")]
    Gte,
}

impl LookupKind {
    pub const ALL: [LookupKind; 18] = [
        LookupKind::Equals,
        LookupKind::Contains,
        LookupKind::StartsWith,
        LookupKind::EndsWith,
        LookupKind::In,
        LookupKind::DateEquals,
        LookupKind::DateRange,
        LookupKind::Year,
        LookupKind::Month,
        LookupKind::Day,
        LookupKind::IsNull,
        LookupKind::IsNotNull,
        LookupKind::IsTrue,
        LookupKind::IsFalse,
        LookupKind::Lt,
        LookupKind::Gt,
        LookupKind::Lte,
        LookupKind::Gte,
    ];

    pub fn code(self) -> &'static str {
        match self {
            LookupKind::Equals => "=",
            LookupKind::Contains => "icontains",
            LookupKind::StartsWith => "istartswith",
            LookupKind::EndsWith => "iendswith",
            LookupKind::In => "in",
            LookupKind::DateEquals => "date",
            LookupKind::DateRange => "range",
            LookupKind::Year => "year",
            LookupKind::Month => "month",
            LookupKind::Day => "day",
            LookupKind::IsNull => "isnull",
            LookupKind::IsNotNull => "isnotnull",
            LookupKind::IsTrue => "istrue",
            LookupKind::IsFalse => "isfalse",
            LookupKind::Lt => "lt",
            LookupKind::Gt => "gt",
            LookupKind::Lte => "lte",
            LookupKind::Gte => "gte",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            LookupKind::Equals => "Equals",
            LookupKind::Contains => "Contains",
            LookupKind::StartsWith => "Starts with",
            LookupKind::EndsWith => "Ends with",
            LookupKind::In => "One of",
            LookupKind::DateEquals => "Date",
            LookupKind::DateRange => "Date Range",
            LookupKind::Year => "Date Year",
            LookupKind::Month => "Date Month",
            LookupKind::Day => "Date Day",
            LookupKind::IsNull => "Is NULL",
            LookupKind::IsNotNull => "Is not NULL",
            LookupKind::IsTrue => "Is TRUE",
            LookupKind::IsFalse => "Is FALSE",
            LookupKind::Lt => "Less Than",
            LookupKind::Gt => "Greater Than",
            LookupKind::Lte => "Less Than or Equal To",
            LookupKind::Gte => "Greater Than or Equal To",
        }
    }

    /// Null and boolean checks ignore the term's value.
    pub fn takes_value(self) -> bool {
        !matches!(
            self,
            LookupKind::IsNull | LookupKind::IsNotNull | LookupKind::IsTrue | LookupKind::IsFalse
        )
    }

    pub fn is_date_part(self) -> bool {
        matches!(self, LookupKind::Year | LookupKind::Month | LookupKind::Day)
    }

    pub fn is_ordering(self) -> bool {
        matches!(
            self,
            LookupKind::Lt | LookupKind::Gt | LookupKind::Lte | LookupKind::Gte
        )
    }

    /// Lookup key path of `field`, e.g. `name__icontains` or `deleted_at__isnull`.
    pub fn keypath(self, field: &str) -> String {
        match self {
            LookupKind::Equals | LookupKind::IsTrue | LookupKind::IsFalse => field.to_string(),
            LookupKind::IsNull | LookupKind::IsNotNull => format!("{field}__isnull"),
            other => format!("{field}__{}", other.code()),
        }
    }
}

impl fmt::Display for LookupKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for LookupKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        LookupKind::ALL
            .into_iter()
            .find(|kind| kind.code() == needle)
            .ok_or_else(|| format!("unknown lookup '{s}'"))
    }
}
