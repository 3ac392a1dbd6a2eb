use crate::error::CliError;
use model::validation::FilterIssue;
use planner::{FieldChoice, RenderedQuery};
use serde::Serialize;
use std::fmt::Write;

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, CliError> {
    serde_json::to_string_pretty(value).map_err(CliError::JsonSerialize)
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), CliError> {
    println!("{}", to_json(value)?);
    Ok(())
}

pub async fn write_json<T: Serialize + ?Sized>(value: &T, path: &str) -> Result<(), CliError> {
    tokio::fs::write(path, to_json(value)?).await?;
    Ok(())
}

pub fn format_query(condition: &str, rendered: &RenderedQuery) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{:<10} {}", "Condition", condition);
    let _ = writeln!(out, "{:<10} {}", "Dialect", rendered.dialect);
    let _ = writeln!(out, "{:<10} {}", "SQL", rendered.sql);
    for (i, param) in rendered.params.iter().enumerate() {
        let _ = writeln!(out, "{:<10} {}", format!("#{}", i + 1), param);
    }
    out
}

#[derive(Serialize)]
struct IssueRow<'a> {
    term: usize,
    slot: String,
    message: &'a str,
}

pub fn format_issues(issues: &[FilterIssue], structure: Option<&str>) -> String {
    if issues.is_empty() && structure.is_none() {
        return "OK\n".to_string();
    }

    let mut out = String::new();
    for issue in issues {
        let _ = writeln!(out, "{issue}");
    }
    if let Some(message) = structure {
        let _ = writeln!(out, "{message}");
    }
    out
}

pub fn issues_json(issues: &[FilterIssue], structure: Option<&str>) -> Result<String, CliError> {
    #[derive(Serialize)]
    struct Report<'a> {
        issues: Vec<IssueRow<'a>>,
        structure: Option<&'a str>,
    }

    let report = Report {
        issues: issues
            .iter()
            .map(|i| IssueRow {
                term: i.position + 1,
                slot: i.issue.slot.to_string(),
                message: &i.issue.message,
            })
            .collect(),
        structure,
    };
    to_json(&report)
}

pub fn format_choices(choices: &[FieldChoice]) -> String {
    let mut out = String::new();
    for choice in choices {
        if choice.is_separator() {
            let _ = writeln!(out, "{}", choice.label);
        } else {
            let _ = writeln!(out, "{:<32} {}", choice.value, choice.label);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use model::{
        FilterExpr, LookupKind, Term, Value,
        validation::validate_filter,
    };
    use planner::ModelSchema;

    #[test]
    fn test_clean_filter_reports_ok() {
        assert_eq!(format_issues(&[], None), "OK\n");
    }

    #[test]
    fn test_issue_report() {
        let filter = FilterExpr::new("f", "shop.Order").with_terms(vec![
            Term::atomic("created_date", LookupKind::Year, Some("a lot")),
        ]);
        let issues = validate_filter(&filter);
        assert_eq!(
            format_issues(&issues, Some("missing closing parenthesis (1 left open)")),
            "term #1: value: Should be a number\nmissing closing parenthesis (1 left open)\n"
        );

        let json: serde_json::Value =
            serde_json::from_str(&issues_json(&issues, None).unwrap()).unwrap();
        assert_eq!(json["issues"][0]["term"], 1);
        assert_eq!(json["issues"][0]["slot"], "value");
        assert!(json["structure"].is_null());
    }

    #[test]
    fn test_query_report_numbers_params_by_position() {
        let rendered = RenderedQuery {
            dialect: "MySQL".into(),
            sql: "SELECT `t`.* FROM `t` WHERE `a` = ? AND `b` = ?".into(),
            params: vec![Value::String("x".into()), Value::Int(2)],
        };
        let report = format_query("a == 'x' AND b == 2", &rendered);
        assert!(report.contains("\n#1         'x'\n#2         2\n"));
        assert!(!report.contains('$'));
    }

    #[test]
    fn test_choices_table() {
        let schema = ModelSchema::new("shop", "order", "shop_order").with_fields(&["status", "-"]);
        let table = format_choices(&schema.choices());
        assert_eq!(table.lines().nth(1), Some("---------"));
        assert!(table.starts_with("status"));
    }
}
