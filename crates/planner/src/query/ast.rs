//! Defines the SELECT statement a saved filter renders to.

use crate::condition::Condition;
use model::core::utils::PATH_SEPARATOR;

#[derive(Debug, Clone, PartialEq)]
pub struct SelectQuery {
    pub table: String,

    /// Field paths to return; empty selects every column of `table`.
    pub columns: Vec<String>,

    pub joins: Vec<Join>,

    /// Omitted from the SQL when it is [`Condition::True`].
    pub condition: Condition,

    pub order_by: Vec<OrderBy>,
}

/// `LEFT JOIN <table> AS <alias> ON <base>.<local_key> = <alias>.<remote_key>`
#[derive(Debug, Clone, PartialEq)]
pub struct Join {
    pub table: String,
    pub alias: String,
    pub local_key: String,
    pub remote_key: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderBy {
    pub field: String,
    pub descending: bool,
}

/// Column reference for a `__` path: `author__name` is column `name` of the
/// `author` join, `status` a column of the base table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnRef<'a> {
    pub qualifier: Option<&'a str>,
    pub name: &'a str,
}

impl<'a> ColumnRef<'a> {
    pub fn from_path(path: &'a str) -> Self {
        match path.rsplit_once(PATH_SEPARATOR) {
            Some((qualifier, name)) => Self {
                qualifier: Some(qualifier),
                name,
            },
            None => Self {
                qualifier: None,
                name: path,
            },
        }
    }
}

impl SelectQuery {
    pub fn new(table: &str) -> Self {
        Self {
            table: table.to_string(),
            columns: Vec::new(),
            joins: Vec::new(),
            condition: Condition::True,
            order_by: Vec::new(),
        }
    }

    pub fn columns(mut self, columns: Vec<String>) -> Self {
        self.columns = columns;
        self
    }

    pub fn join(mut self, join: Join) -> Self {
        self.joins.push(join);
        self
    }

    pub fn where_clause(mut self, condition: Condition) -> Self {
        self.condition = condition;
        self
    }

    pub fn order_by(mut self, field: &str, descending: bool) -> Self {
        self.order_by.push(OrderBy {
            field: field.to_string(),
            descending,
        });
        self
    }
}
