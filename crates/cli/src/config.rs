use crate::error::CliError;
use model::FilterExpr;
use planner::ModelRegistry;
use serde_json::Value as JsonValue;
use tracing::info;

pub async fn load_registry(path: Option<&str>) -> Result<ModelRegistry, CliError> {
    let path = path.ok_or(CliError::MissingRegistry)?;
    let source = tokio::fs::read_to_string(path).await?;
    let registry = ModelRegistry::from_json(&source)?;
    info!("Loaded model registry {} ({} models)", path, registry.len());
    Ok(registry)
}

pub async fn load_filter(path: &str) -> Result<FilterExpr, CliError> {
    let source = tokio::fs::read_to_string(path).await?;
    Ok(FilterExpr::from_json(&source)?)
}

pub async fn load_records(path: &str) -> Result<Vec<JsonValue>, CliError> {
    let source = tokio::fs::read_to_string(path).await?;
    parse_records(&source)
}

fn parse_records(source: &str) -> Result<Vec<JsonValue>, CliError> {
    match serde_json::from_str::<JsonValue>(source)? {
        JsonValue::Array(records) => Ok(records),
        other => Err(CliError::InvalidRecords(json_kind(&other).to_string())),
    }
}

fn json_kind(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "a boolean",
        JsonValue::Number(_) => "a number",
        JsonValue::String(_) => "a string",
        JsonValue::Array(_) => "an array",
        JsonValue::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_must_be_an_array() {
        assert_eq!(parse_records(r#"[{"id": 1}, {"id": 2}]"#).unwrap().len(), 2);

        let err = parse_records(r#"{"id": 1}"#).unwrap_err();
        assert!(matches!(err, CliError::InvalidRecords(kind) if kind == "an object"));
    }

    #[tokio::test]
    async fn test_missing_registry_path() {
        let err = load_registry(None).await.unwrap_err();
        assert!(matches!(err, CliError::MissingRegistry));
    }
}
