use crate::{
    error::{PlannerError, Result},
    schema::ModelSchema,
};
use serde::Deserialize;
use std::collections::HashMap;
use tracing::debug;

/// Models registered for dynamic filtering, keyed by qualified name.
///
/// Names are matched case-insensitively, so `shop.order` and `shop.Order`
/// resolve to the same schema.
#[derive(Debug, Clone, Default)]
pub struct ModelRegistry {
    models: HashMap<String, ModelSchema>,
}

#[derive(Debug, Deserialize)]
struct RegistryFile {
    #[serde(default)]
    models: Vec<ModelSchema>,
}

impl ModelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads `{"models": [...]}` as written in a registry config file.
    pub fn from_json(source: &str) -> Result<Self> {
        let file: RegistryFile = serde_json::from_str(source)?;
        let mut registry = Self::new();
        for schema in file.models {
            registry.register(schema)?;
        }
        debug!("Loaded {} filterable models", registry.models.len());
        Ok(registry)
    }

    pub fn register(&mut self, schema: ModelSchema) -> Result<()> {
        let key = schema.qualified_name().to_lowercase();
        if self.models.contains_key(&key) {
            return Err(PlannerError::DuplicateModel(schema.qualified_name()));
        }
        self.models.insert(key, schema);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&ModelSchema> {
        self.models.get(&name.to_lowercase())
    }

    pub fn resolve(&self, name: &str) -> Result<&ModelSchema> {
        self.get(name)
            .ok_or_else(|| PlannerError::UnknownModel(name.to_string()))
    }

    pub fn has_model(&self, name: &str) -> bool {
        self.models.contains_key(&name.to_lowercase())
    }

    /// `(qualified name, model name)` pairs a filter may target, sorted by
    /// qualified name. Proxy models are left out.
    pub fn model_choices(&self) -> Vec<(String, String)> {
        let mut choices: Vec<(String, String)> = self
            .models
            .values()
            .filter(|schema| !schema.proxy)
            .map(|schema| {
                let qualified = schema.qualified_name();
                let label = qualified
                    .split_once('.')
                    .map(|(_, name)| name.to_string())
                    .unwrap_or_default();
                (qualified, label)
            })
            .collect();
        choices.sort();
        choices
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}
