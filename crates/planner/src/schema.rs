use model::core::utils::{FIELD_SEPARATOR, PATH_SEPARATOR, split_fields};
use serde::{Deserialize, Serialize};

/// Separator entry in a model's field list; renders as a divider.
pub const SEPARATOR: &str = "-";
const SEPARATOR_LABEL: &str = "---------";

/// A model that exposes dynamic filtering, and the field paths users may pick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelSchema {
    /// Application label, the first half of the qualified name.
    pub app: String,
    pub name: String,
    pub table: String,

    /// Field choices in display order. Each entry is either a `|`-separated
    /// path list or `{"path": ..., "label": ...}`; `-` inserts a separator.
    #[serde(default)]
    pub fields: Vec<FieldEntry>,

    /// Relations that may be joined when a filter path traverses them.
    #[serde(default)]
    pub relations: Vec<Relation>,

    /// Proxy models share their concrete model's table and are not offered as
    /// filter targets.
    #[serde(default)]
    pub proxy: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldEntry {
    Path(String),
    Labeled { path: String, label: String },
}

impl FieldEntry {
    pub fn path(&self) -> &str {
        match self {
            FieldEntry::Path(path) | FieldEntry::Labeled { path, .. } => path,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relation {
    /// Path segment naming the relation, e.g. `author` in `author__name`.
    pub name: String,
    pub table: String,
    pub local_key: String,
    #[serde(default = "default_remote_key")]
    pub remote_key: String,
}

fn default_remote_key() -> String {
    "id".to_string()
}

/// One selectable field entry: stored value and display label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldChoice {
    pub value: String,
    pub label: String,
}

impl FieldChoice {
    pub fn is_separator(&self) -> bool {
        self.value == SEPARATOR
    }
}

impl ModelSchema {
    pub fn new(app: &str, name: &str, table: &str) -> Self {
        Self {
            app: app.to_string(),
            name: name.to_string(),
            table: table.to_string(),
            fields: Vec::new(),
            relations: Vec::new(),
            proxy: false,
        }
    }

    pub fn with_fields(mut self, fields: &[&str]) -> Self {
        self.fields
            .extend(fields.iter().map(|f| FieldEntry::Path(f.to_string())));
        self
    }

    pub fn with_relation(mut self, name: &str, table: &str, local_key: &str) -> Self {
        self.relations.push(Relation {
            name: name.to_string(),
            table: table.to_string(),
            local_key: local_key.to_string(),
            remote_key: default_remote_key(),
        });
        self
    }

    /// `app.Model`, with the model name capitalized.
    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.app, capitalize(&self.name))
    }

    /// Field choices with humanized labels, separators included.
    pub fn choices(&self) -> Vec<FieldChoice> {
        self.fields
            .iter()
            .map(|entry| match entry {
                FieldEntry::Path(path) if path == SEPARATOR => FieldChoice {
                    value: SEPARATOR.to_string(),
                    label: SEPARATOR_LABEL.to_string(),
                },
                FieldEntry::Path(path) => FieldChoice {
                    value: path.clone(),
                    label: humanize(path),
                },
                FieldEntry::Labeled { path, label } => FieldChoice {
                    value: path.clone(),
                    label: label.clone(),
                },
            })
            .collect()
    }

    /// Every single field path a term may reference.
    pub fn field_paths(&self) -> Vec<String> {
        let mut paths: Vec<String> = Vec::new();
        for entry in self.fields.iter().filter(|e| e.path() != SEPARATOR) {
            for path in split_fields(entry.path()) {
                if !paths.contains(&path) {
                    paths.push(path);
                }
            }
        }
        paths
    }

    pub fn allows(&self, field: &str) -> bool {
        self.fields
            .iter()
            .filter(|e| e.path() != SEPARATOR)
            .any(|e| e.path().split(FIELD_SEPARATOR).any(|p| p.trim() == field))
    }

    /// Relation traversed by `path`, if any. `author__name` resolves to the
    /// `author` relation.
    pub fn relation_for(&self, path: &str) -> Option<&Relation> {
        let (qualifier, _) = path.rsplit_once(PATH_SEPARATOR)?;
        self.relations.iter().find(|r| r.name == qualifier)
    }

    /// Relations referenced by any of `paths`, in declaration order.
    pub fn relations_used<'a>(&self, paths: impl IntoIterator<Item = &'a str>) -> Vec<&Relation> {
        let qualifiers: Vec<&str> = paths
            .into_iter()
            .filter_map(|p| p.rsplit_once(PATH_SEPARATOR).map(|(q, _)| q))
            .collect();
        self.relations
            .iter()
            .filter(|r| qualifiers.contains(&r.name.as_str()))
            .collect()
    }
}

/// `author__first_name|title` becomes `Author first name OR Title`.
pub fn humanize(path: &str) -> String {
    path.split(FIELD_SEPARATOR)
        .map(|segment| capitalize(&segment.trim().replace(PATH_SEPARATOR, " ").replace('_', " ")))
        .collect::<Vec<_>>()
        .join(" OR ")
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn orders() -> ModelSchema {
        ModelSchema::new("shop", "order", "shop_order")
            .with_fields(&["status", "-", "customer__name|customer__email", "created_date"])
            .with_relation("customer", "shop_customer", "customer_id")
    }

    #[test]
    fn test_humanize() {
        assert_eq!(humanize("status"), "Status");
        assert_eq!(humanize("author__first_name|title"), "Author first name OR Title");
        assert_eq!(humanize("SKU"), "Sku");
    }

    #[test]
    fn test_choices_keep_separators() {
        let labels: Vec<_> = orders().choices().into_iter().map(|c| c.label).collect();
        assert_eq!(
            labels,
            vec![
                "Status",
                "---------",
                "Customer name OR Customer email",
                "Created date"
            ]
        );
    }

    #[test]
    fn test_labeled_entry_keeps_label() {
        let schema: ModelSchema = serde_json::from_str(
            r#"{"app": "shop", "name": "order", "table": "shop_order",
                "fields": [{"path": "total", "label": "Grand total"}, "status"]}"#,
        )
        .unwrap();
        assert_eq!(schema.choices()[0].label, "Grand total");
        assert_eq!(schema.qualified_name(), "shop.Order");
    }

    #[test]
    fn test_allows_each_alternative() {
        let schema = orders();
        assert!(schema.allows("customer__email"));
        assert!(schema.allows("status"));
        assert!(!schema.allows("-"));
        assert!(!schema.allows("customer"));
        assert_eq!(
            schema.field_paths(),
            vec!["status", "customer__name", "customer__email", "created_date"]
        );
    }

    #[test]
    fn test_relations_used() {
        let schema = orders();
        assert_eq!(schema.relations_used(["status"]).len(), 0);
        let used = schema.relations_used(["customer__name", "status"]);
        assert_eq!(used[0].table, "shop_customer");
        assert_eq!(used[0].remote_key, "id");
        assert!(schema.relation_for("customer__email").is_some());
    }
}
