use crate::{
    core::{operand::Operand, term::Term},
    errors::LookupError,
    filter::FilterExpr,
};
use std::fmt;

/// Which column of a term an issue refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TermSlot {
    Field,
    Lookup,
    Value,
}

impl fmt::Display for TermSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TermSlot::Field => write!(f, "field"),
            TermSlot::Lookup => write!(f, "lookup"),
            TermSlot::Value => write!(f, "value"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TermIssue {
    pub slot: TermSlot,
    pub message: String,
}

impl TermIssue {
    fn new(slot: TermSlot, message: &str) -> Self {
        Self {
            slot,
            message: message.to_string(),
        }
    }
}

impl fmt::Display for TermIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.slot, self.message)
    }
}

/// Issue attached to the term at `position` in evaluation order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterIssue {
    pub position: usize,
    pub issue: TermIssue,
}

impl fmt::Display for FilterIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "term #{}: {}", self.position + 1, self.issue)
    }
}

const MISSING: &str = "Missing value";

/// Message shown next to the value input for a rejected operand.
pub fn value_message(err: &LookupError) -> &'static str {
    match err {
        LookupError::InvalidDate(_) => "Should be \"DD/MM/YYYY\"",
        LookupError::InvalidDateRange(_) => "Should be \"DD/MM/YYYY, DD/MM/YYYY\"",
        LookupError::InvalidNumber(_) => "Should be a number",
        LookupError::MissingValue(_) => MISSING,
        LookupError::MissingField => "Missing field",
        LookupError::MissingLookup => "Missing lookup",
        LookupError::UnknownField { .. } => "Unknown field",
    }
}

/// Checks one term the way the editing form does, reporting at most one issue
/// per slot. Control operators are never rejected here.
pub fn validate_term(term: &Term) -> Vec<TermIssue> {
    let mut issues = Vec::new();
    if !term.is_atomic() {
        return issues;
    }

    if term.fields.is_empty() {
        issues.push(TermIssue::new(TermSlot::Field, MISSING));
    }

    let Some(lookup) = term.lookup else {
        issues.push(TermIssue::new(TermSlot::Lookup, MISSING));
        if term.value.as_deref().is_none_or(|v| v.trim().is_empty()) {
            issues.push(TermIssue::new(TermSlot::Value, MISSING));
        }
        return issues;
    };

    let value_error = term
        .fields
        .iter()
        .find_map(|field| Operand::parse(field, lookup, term.value.as_deref()).err());

    if let Some(err) = value_error {
        issues.push(TermIssue::new(TermSlot::Value, value_message(&err)));
    } else if term.fields.is_empty()
        && lookup.takes_value()
        && term.value.as_deref().is_none_or(|v| v.trim().is_empty())
    {
        issues.push(TermIssue::new(TermSlot::Value, MISSING));
    }

    issues
}

/// Validates every live term of a filter in evaluation order.
pub fn validate_filter(filter: &FilterExpr) -> Vec<FilterIssue> {
    filter
        .ordered_terms()
        .into_iter()
        .filter(|term| !term.deleted)
        .enumerate()
        .flat_map(|(position, term)| {
            validate_term(term)
                .into_iter()
                .map(move |issue| FilterIssue { position, issue })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{lookup::LookupKind, operator::Operator};

    fn slots(issues: &[TermIssue]) -> Vec<TermSlot> {
        issues.iter().map(|i| i.slot).collect()
    }

    #[test]
    fn test_control_terms_are_always_valid() {
        assert!(validate_term(&Term::open()).is_empty());
        assert!(validate_term(&Term::control(Operator::Or)).is_empty());
    }

    #[test]
    fn test_empty_atomic_term_reports_every_slot() {
        let term = Term::control(Operator::None);
        assert_eq!(
            slots(&validate_term(&term)),
            vec![TermSlot::Field, TermSlot::Lookup, TermSlot::Value]
        );
    }

    #[test]
    fn test_null_check_needs_no_value() {
        let term = Term::atomic("closed_at", LookupKind::IsNull, None);
        assert!(validate_term(&term).is_empty());
    }

    #[test]
    fn test_value_format_messages() {
        let term = Term::atomic("created_date", LookupKind::DateRange, Some("01/01/2024"));
        assert_eq!(
            validate_term(&term),
            vec![TermIssue::new(
                TermSlot::Value,
                "Should be \"DD/MM/YYYY, DD/MM/YYYY\""
            )]
        );

        let term = Term::atomic("due_date", LookupKind::Lte, Some("2024-01-01"));
        assert_eq!(validate_term(&term)[0].message, "Should be \"DD/MM/YYYY\"");

        let term = Term::atomic("created_date", LookupKind::Month, Some("May"));
        assert_eq!(validate_term(&term)[0].message, "Should be a number");

        let term = Term::atomic("name", LookupKind::Gt, Some("many"));
        assert!(validate_term(&term).is_empty());

        let term = Term::atomic("created_date", LookupKind::Year, Some("2024"));
        assert!(validate_term(&term).is_empty());
    }

    #[test]
    fn test_missing_value() {
        let term = Term::atomic("name", LookupKind::Contains, Some(""));
        assert_eq!(validate_term(&term), vec![TermIssue::new(TermSlot::Value, MISSING)]);
    }

    #[test]
    fn test_validate_filter_skips_deleted_terms() {
        let filter = FilterExpr::new("f", "shop.Order").with_terms(vec![
            Term::atomic("created_date", LookupKind::Year, Some("x")).mark_deleted(),
            Term::atomic("status", LookupKind::Equals, Some("paid")),
            Term::atomic("created_date", LookupKind::Year, Some("y")),
        ]);

        let issues = validate_filter(&filter);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].position, 1);
        assert_eq!(issues[0].to_string(), "term #2: value: Should be a number");
    }
}
