use crate::core::term::Term;
use serde::{Deserialize, Serialize};

fn default_name() -> String {
    "Report".to_string()
}

/// A saved filter: ordered terms plus display preferences for one model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterExpr {
    #[serde(default = "default_name")]
    pub name: String,

    /// Qualified model name, e.g. `shop.Order`.
    pub model: String,

    #[serde(default)]
    pub owner: String,

    /// Accessible to every user rather than only the owner.
    #[serde(default)]
    pub is_global: bool,

    #[serde(default)]
    pub terms: Vec<Term>,

    #[serde(default)]
    pub columns: Vec<ColumnPref>,

    #[serde(default)]
    pub sort_orders: Vec<SortPref>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnPref {
    pub field: String,
    #[serde(default)]
    pub order: u32,
}

/// Sort column; a leading `-` on `field` sorts descending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortPref {
    pub field: String,
    #[serde(default)]
    pub order: u32,
}

impl SortPref {
    pub fn is_descending(&self) -> bool {
        self.field.starts_with('-')
    }

    pub fn column(&self) -> &str {
        self.field.trim_start_matches('-')
    }
}

impl FilterExpr {
    pub fn new(name: &str, model: &str) -> Self {
        Self {
            name: name.to_string(),
            model: model.to_string(),
            owner: String::new(),
            is_global: false,
            terms: Vec::new(),
            columns: Vec::new(),
            sort_orders: Vec::new(),
        }
    }

    pub fn from_json(source: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(source)
    }

    pub fn with_terms(mut self, terms: Vec<Term>) -> Self {
        self.terms = terms;
        self
    }

    /// Terms in evaluation order. The sort is stable, so equal `order` keys keep
    /// insertion order.
    pub fn ordered_terms(&self) -> Vec<&Term> {
        let mut terms: Vec<&Term> = self.terms.iter().collect();
        terms.sort_by_key(|t| t.order);
        terms
    }

    pub fn ordered_columns(&self) -> Vec<&ColumnPref> {
        let mut columns: Vec<&ColumnPref> = self.columns.iter().collect();
        columns.sort_by_key(|c| c.order);
        columns
    }

    pub fn ordered_sort_orders(&self) -> Vec<&SortPref> {
        let mut sorts: Vec<&SortPref> = self.sort_orders.iter().collect();
        sorts.sort_by_key(|s| s.order);
        sorts
    }
}
