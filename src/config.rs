use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server configuration
    pub server: ServerConfig,

    /// Model artifact store configuration
    pub models: ModelStoreConfig,

    /// Corridor reference data configuration
    pub corridor: CorridorConfig,

    /// Observability configuration
    pub observability: ObservabilityConfig,
}

impl Config {
    /// Load configuration from file and environment
    pub fn load() -> Result<Self, config::ConfigError> {
        let config_path =
            std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config/default.toml".to_string());

        config::Config::builder()
            // Start with default values
            .add_source(config::File::from_str(
                include_str!("../config/default.toml"),
                config::FileFormat::Toml,
            ))
            // Override with config file if it exists
            .add_source(config::File::with_name(&config_path).required(false))
            // Override with environment variables (prefix: CIP_)
            .add_source(
                config::Environment::with_prefix("CIP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// HTTP server host
    #[serde(default = "default_host")]
    pub host: String,

    /// HTTP server port
    #[serde(default = "default_http_port")]
    pub http_port: u16,

    /// Request timeout (seconds)
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

/// Where the trained model artifacts live on disk
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelStoreConfig {
    /// Directory containing the model artifact files
    #[serde(default = "default_model_dir")]
    pub dir: PathBuf,

    /// High-impact classifier artifact filename
    #[serde(default = "default_classifier_file")]
    pub classifier_file: String,

    /// Delay regressor artifact filename
    #[serde(default = "default_regressor_file")]
    pub regressor_file: String,

    /// Feature schema filename (ordered feature-name list)
    #[serde(default = "default_feature_list_file")]
    pub feature_list_file: String,

    /// Optional training metadata filename
    #[serde(default = "default_metadata_file")]
    pub metadata_file: String,
}

impl ModelStoreConfig {
    pub fn classifier_path(&self) -> PathBuf {
        self.dir.join(&self.classifier_file)
    }

    pub fn regressor_path(&self) -> PathBuf {
        self.dir.join(&self.regressor_file)
    }

    pub fn feature_list_path(&self) -> PathBuf {
        self.dir.join(&self.feature_list_file)
    }

    pub fn metadata_path(&self) -> PathBuf {
        self.dir.join(&self.metadata_file)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorridorConfig {
    /// Milepost reference GeoJSON path
    #[serde(default = "default_milepost_path")]
    pub milepost_path: PathBuf,

    /// Corridor centerline GeoJSON path
    #[serde(default = "default_corridor_path")]
    pub corridor_path: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Enable JSON logging
    #[serde(default)]
    pub json_logs: bool,

    /// Service name
    #[serde(default = "default_service_name")]
    pub service_name: String,
}

// Default value functions
fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_http_port() -> u16 {
    8080
}

fn default_request_timeout() -> u64 {
    30
}

fn default_model_dir() -> PathBuf {
    "./data/models".into()
}

fn default_classifier_file() -> String {
    "classifier.json".to_string()
}

fn default_regressor_file() -> String {
    "regressor.json".to_string()
}

fn default_feature_list_file() -> String {
    "feature_list.json".to_string()
}

fn default_metadata_file() -> String {
    "model_metadata.json".to_string()
}

fn default_milepost_path() -> PathBuf {
    "./data/geodata/i5_mileposts.geojson".into()
}

fn default_corridor_path() -> PathBuf {
    "./data/geodata/i5_corridor.geojson".into()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_service_name() -> String {
    "corridor-impact".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_values() {
        assert_eq!(default_http_port(), 8080);
        assert_eq!(default_log_level(), "info");
        assert_eq!(default_classifier_file(), "classifier.json");
        assert_eq!(default_service_name(), "corridor-impact");
    }

    #[test]
    fn test_model_store_paths() {
        let store = ModelStoreConfig {
            dir: "/opt/models".into(),
            classifier_file: default_classifier_file(),
            regressor_file: default_regressor_file(),
            feature_list_file: default_feature_list_file(),
            metadata_file: default_metadata_file(),
        };

        assert_eq!(store.classifier_path(), PathBuf::from("/opt/models/classifier.json"));
        assert_eq!(store.feature_list_path(), PathBuf::from("/opt/models/feature_list.json"));
    }

    #[test]
    fn test_embedded_default_config_parses() {
        let config: Config = config::Config::builder()
            .add_source(config::File::from_str(
                include_str!("../config/default.toml"),
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.server.http_port, 8080);
        assert_eq!(config.models.classifier_file, "classifier.json");
    }
}
