//! Defines the core rendering trait and context for converting queries to SQL.

use crate::query::{ast::ColumnRef, dialect::Dialect};
use model::Value;

pub mod condition;
pub mod select;

/// A trait for any query node that can be rendered into a SQL string.
pub trait Render {
    fn render(&self, renderer: &mut Renderer);
}

/// A context that holds the state during the rendering process.
///
/// It accumulates the SQL string and the parameters, and provides
/// access to the dialect for syntax-specific details.
pub struct Renderer<'a> {
    pub sql: String,
    pub params: Vec<Value>,
    pub dialect: &'a dyn Dialect,

    /// Table that bare column paths are qualified with, set while rendering a
    /// query with joins.
    pub base: Option<String>,
}

impl<'a> Renderer<'a> {
    pub fn new(dialect: &'a dyn Dialect) -> Self {
        Self {
            sql: String::new(),
            params: Vec::new(),
            dialect,
            base: None,
        }
    }

    /// Consumes the renderer and returns the final SQL string and parameters.
    pub fn finish(self) -> (String, Vec<Value>) {
        (self.sql, self.params)
    }

    pub fn add_param(&mut self, value: Value) {
        self.params.push(value);
        let placeholder = self.dialect.get_placeholder(self.params.len() - 1);
        self.sql.push_str(&placeholder);
    }

    /// Quoted, optionally qualified column for a `__` field path.
    pub fn column(&self, path: &str) -> String {
        let column = ColumnRef::from_path(path);
        match column.qualifier {
            Some(qualifier) => format!(
                "{}.{}",
                self.dialect.quote_identifier(qualifier),
                self.dialect.quote_identifier(column.name)
            ),
            None => match &self.base {
                Some(table) => format!(
                    "{}.{}",
                    self.dialect.quote_identifier(table),
                    self.dialect.quote_identifier(column.name)
                ),
                None => self.dialect.quote_identifier(column.name),
            },
        }
    }
}

/// Renders `node` with `dialect`, returning SQL text and bound parameters.
pub fn to_sql(node: &dyn Render, dialect: &dyn Dialect) -> (String, Vec<Value>) {
    let mut renderer = Renderer::new(dialect);
    node.render(&mut renderer);
    renderer.finish()
}
