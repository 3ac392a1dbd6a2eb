use crate::{
    condition::Condition,
    query::renderer::{Render, Renderer},
};
use model::{LookupKind, Operand, Value};

impl Render for Condition {
    fn render(&self, r: &mut Renderer) {
        match self {
            Condition::True => r.sql.push_str("1 = 1"),
            Condition::Not(inner) => {
                r.sql.push_str("NOT (");
                inner.render(r);
                r.sql.push(')');
            }
            Condition::And(a, b) => render_binary(r, a, " AND ", b),
            Condition::Or(a, b) => render_binary(r, a, " OR ", b),
            Condition::Compare {
                field,
                lookup,
                operand,
            } => render_compare(r, field, *lookup, operand),
        }
    }
}

fn render_binary(r: &mut Renderer, left: &Condition, op: &str, right: &Condition) {
    r.sql.push('(');
    left.render(r);
    r.sql.push_str(op);
    right.render(r);
    r.sql.push(')');
}

fn render_compare(r: &mut Renderer, field: &str, lookup: LookupKind, operand: &Operand) {
    let column = r.column(field);

    match (lookup, operand) {
        (LookupKind::IsNull | LookupKind::IsNotNull, Operand::Scalar(v)) => {
            r.sql.push_str(&column);
            if v.as_bool().unwrap_or(true) {
                r.sql.push_str(" IS NULL");
            } else {
                r.sql.push_str(" IS NOT NULL");
            }
        }
        (LookupKind::Contains | LookupKind::StartsWith | LookupKind::EndsWith, Operand::Scalar(v)) => {
            let escaped = escape_like(&v.as_string());
            let pattern = match lookup {
                LookupKind::StartsWith => format!("{escaped}%"),
                LookupKind::EndsWith => format!("%{escaped}"),
                _ => format!("%{escaped}%"),
            };
            r.sql.push_str(&column);
            r.sql.push(' ');
            r.sql.push_str(r.dialect.like_operator());
            r.sql.push(' ');
            r.add_param(Value::String(pattern));
        }
        (_, Operand::List(items)) => {
            r.sql.push_str(&column);
            r.sql.push_str(" IN (");
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    r.sql.push_str(", ");
                }
                r.add_param(item.clone());
            }
            r.sql.push(')');
        }
        (_, Operand::Range(start, end)) => {
            r.sql.push_str(&column);
            r.sql.push_str(" BETWEEN ");
            r.add_param(start.clone());
            r.sql.push_str(" AND ");
            r.add_param(end.clone());
        }
        (LookupKind::Year | LookupKind::Month | LookupKind::Day, Operand::Scalar(v)) => {
            let part = lookup.code().to_uppercase();
            let expr = r.dialect.date_part(&part, &column);
            r.sql.push_str(&expr);
            r.sql.push_str(" = ");
            r.add_param(v.clone());
        }
        (LookupKind::DateEquals, Operand::Scalar(v)) => {
            let expr = r.dialect.to_date(&column);
            r.sql.push_str(&expr);
            r.sql.push_str(" = ");
            r.add_param(v.clone());
        }
        (_, Operand::Scalar(v)) => {
            r.sql.push_str(&column);
            r.sql.push_str(comparison_operator(lookup));
            r.add_param(v.clone());
        }
    }
}

fn comparison_operator(lookup: LookupKind) -> &'static str {
    match lookup {
        LookupKind::Lt => " < ",
        LookupKind::Gt => " > ",
        LookupKind::Lte => " <= ",
        LookupKind::Gte => " >= ",
        _ => " = ",
    }
}

/// Escapes LIKE wildcards so user input matches literally.
fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::{
        dialect::{MySql, Postgres},
        renderer::to_sql,
    };
    use chrono::NaiveDate;

    fn text(s: &str) -> Operand {
        Operand::Scalar(Value::String(s.into()))
    }

    #[test]
    fn test_pattern_lookups_escape_wildcards() {
        let cond = Condition::compare("title", LookupKind::Contains, text("50%_off"));
        let (sql, params) = to_sql(&cond, &Postgres);
        assert_eq!(sql, r#""title" ILIKE $1"#);
        assert_eq!(params, vec![Value::String(r"%50\%\_off%".into())]);

        let cond = Condition::compare("title", LookupKind::StartsWith, text("Re"));
        let (sql, params) = to_sql(&cond, &MySql);
        assert_eq!(sql, "`title` LIKE ?");
        assert_eq!(params, vec![Value::String("Re%".into())]);
    }

    #[test]
    fn test_null_checks() {
        let cond = Condition::compare(
            "closed_at",
            LookupKind::IsNotNull,
            Operand::Scalar(Value::Boolean(false)),
        );
        let (sql, params) = to_sql(&cond, &Postgres);
        assert_eq!(sql, r#""closed_at" IS NOT NULL"#);
        assert!(params.is_empty());
    }

    #[test]
    fn test_membership_and_range() {
        let cond = Condition::and(
            Condition::compare(
                "status",
                LookupKind::In,
                Operand::List(vec![Value::String("a".into()), Value::String("b".into())]),
            ),
            Condition::compare(
                "created_date",
                LookupKind::DateRange,
                Operand::Range(
                    Value::Date(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()),
                    Value::Date(NaiveDate::from_ymd_opt(2024, 1, 31).unwrap()),
                ),
            ),
        );
        let (sql, params) = to_sql(&cond, &Postgres);
        assert_eq!(
            sql,
            r#"("status" IN ($1, $2) AND "created_date" BETWEEN $3 AND $4)"#
        );
        assert_eq!(params.len(), 4);
    }

    #[test]
    fn test_date_parts_and_related_paths() {
        let cond = Condition::negate(Condition::compare(
            "customer__signup_date",
            LookupKind::Year,
            Operand::Scalar(Value::Int(2023)),
        ));
        let (sql, _) = to_sql(&cond, &Postgres);
        assert_eq!(
            sql,
            r#"NOT (EXTRACT(YEAR FROM "customer"."signup_date") = $1)"#
        );

        let (sql, _) = to_sql(&cond, &MySql);
        assert_eq!(sql, "NOT (YEAR(`customer`.`signup_date`) = ?)");
    }

    #[test]
    fn test_identity_renders_tautology() {
        let (sql, params) = to_sql(&Condition::True, &MySql);
        assert_eq!(sql, "1 = 1");
        assert!(params.is_empty());
    }
}
