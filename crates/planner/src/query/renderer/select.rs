use crate::{
    condition::Condition,
    query::{
        ast::{Join, OrderBy, SelectQuery},
        renderer::{Render, Renderer},
    },
};

impl Render for SelectQuery {
    fn render(&self, r: &mut Renderer) {
        // Joined tables may share column names with the base table.
        if !self.joins.is_empty() {
            r.base = Some(self.table.clone());
        }

        // 1. SELECT clause
        r.sql.push_str("SELECT ");
        if self.columns.is_empty() {
            let table = r.dialect.quote_identifier(&self.table);
            r.sql.push_str(&table);
            r.sql.push_str(".*");
        }
        for (i, col) in self.columns.iter().enumerate() {
            if i > 0 {
                r.sql.push_str(", ");
            }
            let column = r.column(col);
            r.sql.push_str(&column);
        }

        // 2. FROM
        r.sql.push_str(" FROM ");
        let table = r.dialect.quote_identifier(&self.table);
        r.sql.push_str(&table);

        // 3. JOIN
        for join in &self.joins {
            r.sql.push(' ');
            render_join(r, &self.table, join);
        }

        // 4. WHERE
        if self.condition != Condition::True {
            r.sql.push_str(" WHERE ");
            self.condition.render(r);
        }

        // 5. ORDER BY
        if !self.order_by.is_empty() {
            r.sql.push_str(" ORDER BY ");
            for (i, order) in self.order_by.iter().enumerate() {
                if i > 0 {
                    r.sql.push_str(", ");
                }
                order.render(r);
            }
        }
    }
}

fn render_join(r: &mut Renderer, base: &str, join: &Join) {
    let q = |ident: &str| r.dialect.quote_identifier(ident);
    let clause = format!(
        "LEFT JOIN {} AS {} ON {}.{} = {}.{}",
        q(&join.table),
        q(&join.alias),
        q(base),
        q(&join.local_key),
        q(&join.alias),
        q(&join.remote_key)
    );
    r.sql.push_str(&clause);
}

impl Render for OrderBy {
    fn render(&self, r: &mut Renderer) {
        let column = r.column(&self.field);
        r.sql.push_str(&column);
        r.sql.push_str(if self.descending { " DESC" } else { " ASC" });
    }
}
