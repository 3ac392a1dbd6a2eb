use crate::{
    builder::ConditionBuilder,
    condition::Condition,
    error::{PlannerError, Result},
    query::{Dialect, Join, SelectQuery, to_sql},
    registry::ModelRegistry,
};
use expression_engine::FilterCompiler;
use model::{FilterExpr, Value, core::utils::PATH_SEPARATOR};
use serde::Serialize;
use tracing::{debug, info};

/// A saved filter resolved against its model: the compiled condition and the
/// query listing the matching rows.
#[derive(Debug, Clone)]
pub struct FilterPlan {
    pub name: String,
    pub model: String,
    pub condition: Condition,
    pub query: SelectQuery,
}

/// Rendered form of a plan for one dialect.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedQuery {
    pub dialect: String,
    pub sql: String,
    pub params: Vec<Value>,
}

impl FilterPlan {
    /// Compiles `filter` against the schema it names in `registry`.
    pub fn build(registry: &ModelRegistry, filter: &FilterExpr) -> Result<Self> {
        let schema = registry.resolve(&filter.model)?;
        let builder = ConditionBuilder::for_schema(schema);
        let condition = FilterCompiler::new(&builder).compile_filter(filter)?;

        let columns: Vec<String> = filter
            .ordered_columns()
            .into_iter()
            .map(|c| c.field.clone())
            .collect();
        let sorts = filter.ordered_sort_orders();

        let referenced: Vec<&str> = condition
            .fields()
            .into_iter()
            .chain(columns.iter().map(String::as_str))
            .chain(sorts.iter().map(|s| s.column()))
            .collect();

        // A qualified path without a declared relation would render an alias
        // that no JOIN introduces.
        if let Some(path) = referenced
            .iter()
            .find(|p| p.contains(PATH_SEPARATOR) && schema.relation_for(p).is_none())
        {
            return Err(PlannerError::MissingRelation {
                model: schema.qualified_name(),
                path: path.to_string(),
            });
        }

        let joins: Vec<Join> = schema
            .relations_used(referenced)
            .into_iter()
            .map(|relation| Join {
                table: relation.table.clone(),
                alias: relation.name.clone(),
                local_key: relation.local_key.clone(),
                remote_key: relation.remote_key.clone(),
            })
            .collect();

        debug!(
            "Planned '{}' on {} with {} join(s)",
            filter.name,
            schema.qualified_name(),
            joins.len()
        );

        let mut query = SelectQuery::new(&schema.table)
            .columns(columns)
            .where_clause(condition.clone());
        for join in joins {
            query = query.join(join);
        }
        for sort in sorts {
            query = query.order_by(sort.column(), sort.is_descending());
        }

        Ok(Self {
            name: filter.name.clone(),
            model: schema.qualified_name(),
            condition,
            query,
        })
    }

    pub fn render(&self, dialect: &dyn Dialect) -> RenderedQuery {
        let (sql, params) = to_sql(&self.query, dialect);
        info!("Rendered '{}' for {}", self.name, dialect.name());
        RenderedQuery {
            dialect: dialect.name(),
            sql,
            params,
        }
    }
}
