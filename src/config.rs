use serde::{Deserialize, Serialize};
use std::env;
use thiserror::Error;
use validator::Validate;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Parse error for {field}: {value} - {source}")]
    Parse {
        field: String,
        value: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),
}

/// Schema graph configuration with validation
#[derive(Clone, Debug, PartialEq, Validate, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    /// Schema whose base tables form the graph; also qualifies generated SQL
    #[validate(length(min = 1, message = "Schema name cannot be empty"))]
    pub schema_name: String,

    /// Follow foreign keys only from referencing to referenced table
    pub directed: bool,

    /// Maximum number of candidate join paths tried per belongs-to check
    #[validate(range(
        min = 1,
        max = 1000,
        message = "Path limit must be between 1 and 1000"
    ))]
    pub path_limit: usize,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            schema_name: "public".to_string(),
            directed: true,
            path_limit: 1,
        }
    }
}

impl GraphConfig {
    /// Create configuration from environment variables (and `.env`) with validation
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = Self {
            schema_name: env::var("SCHEMAGRAPH_SCHEMA").unwrap_or_else(|_| "public".to_string()),
            directed: parse_env_var("SCHEMAGRAPH_DIRECTED", "true")?,
            path_limit: parse_env_var("SCHEMAGRAPH_PATH_LIMIT", "1")?,
        };

        config.validate()?;
        Ok(config)
    }

    /// Create configuration from YAML file
    pub fn from_yaml_file<P: AsRef<std::path::Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Parse {
            field: "yaml_file".to_string(),
            value: "file read failed".to_string(),
            source: Box::new(e),
        })?;

        let config: Self = serde_yaml::from_str(&content).map_err(|e| ConfigError::Parse {
            field: "yaml_content".to_string(),
            value: content,
            source: Box::new(e),
        })?;

        config.validate()?;
        Ok(config)
    }
}

/// Parse an environment variable with a default value
fn parse_env_var<T: std::str::FromStr>(key: &str, default: &str) -> Result<T, ConfigError>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let value = env::var(key).unwrap_or_else(|_| default.to_string());
    value.parse().map_err(|e| ConfigError::Parse {
        field: key.to_string(),
        value,
        source: Box::new(e),
    })
}
