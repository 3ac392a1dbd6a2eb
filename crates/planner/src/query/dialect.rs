//! Defines the `Dialect` trait for database-specific SQL syntax.

pub trait Dialect: Send + Sync {
    /// Wraps an identifier (like a table or column name) in the correct
    /// quotation marks for the dialect.
    ///
    /// - PostgreSQL uses double quotes: `"my_column"`
    /// - MySQL uses backticks: `` `my_column` ``
    fn quote_identifier(&self, ident: &str) -> String;

    /// Returns the placeholder for a parameterized query.
    ///
    /// - PostgreSQL uses `$1`, `$2`, etc.
    /// - MySQL uses `?`
    fn get_placeholder(&self, index: usize) -> String;

    /// Returns the name of the dialect (e.g., "PostgreSQL", "MySQL").
    fn name(&self) -> String;

    /// Case-insensitive pattern match operator.
    fn like_operator(&self) -> &'static str;

    /// Extracts `part` (`YEAR`, `MONTH` or `DAY`) from a date expression.
    fn date_part(&self, part: &str, expr: &str) -> String;

    /// Truncates a date or timestamp expression to its date.
    fn to_date(&self, expr: &str) -> String;
}

#[derive(Debug, Clone)]
pub struct Postgres;

impl Dialect for Postgres {
    fn quote_identifier(&self, ident: &str) -> String {
        format!(r#""{}""#, ident.replace('"', "\"\""))
    }

    fn get_placeholder(&self, index: usize) -> String {
        format!("${}", index + 1)
    }

    fn name(&self) -> String {
        "PostgreSQL".into()
    }

    fn like_operator(&self) -> &'static str {
        "ILIKE"
    }

    fn date_part(&self, part: &str, expr: &str) -> String {
        format!("EXTRACT({part} FROM {expr})")
    }

    fn to_date(&self, expr: &str) -> String {
        format!("CAST({expr} AS DATE)")
    }
}

#[derive(Debug, Clone)]
pub struct MySql;

impl Dialect for MySql {
    fn quote_identifier(&self, ident: &str) -> String {
        format!("`{}`", ident.replace('`', "``"))
    }

    fn get_placeholder(&self, _index: usize) -> String {
        "?".into()
    }

    fn name(&self) -> String {
        "MySQL".into()
    }

    // Default collations compare case-insensitively.
    fn like_operator(&self) -> &'static str {
        "LIKE"
    }

    fn date_part(&self, part: &str, expr: &str) -> String {
        format!("{part}({expr})")
    }

    fn to_date(&self, expr: &str) -> String {
        format!("DATE({expr})")
    }
}
