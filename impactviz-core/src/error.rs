use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImpactError {
    #[error("Unsupported scenario schema version '{0}'")]
    UnsupportedSchema(String),

    #[error("I/O error for file '{0}': {1}")]
    FileIO(String, #[source] std::io::Error),

    #[error("Failed to parse YAML from '{0}': {1}")]
    YamlParsing(String, #[source] serde_yaml::Error),

    #[error("Failed to serialize scenario as YAML: {0}")]
    YamlSerialization(#[source] serde_yaml::Error),

    #[error("Failed to serialize JSON: {0}")]
    JsonSerialization(#[from] serde_json::Error),

    #[error("Failed to write CSV to '{0}': {1}")]
    CsvError(String, #[source] csv::Error),
}
