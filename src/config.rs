//! Logger configuration.
//!
//! This module defines the configuration structure for the dispatcher. All
//! types derive Serde traits so a config file or an embedding application can
//! supply them; `LoggerConfig::from_env` covers the common env-driven path.

use std::collections::HashMap;
use std::env;

use serde::{Deserialize, Serialize};

/// Deployment stage, read from `DEPLOY_STAGE`.
///
/// Anything other than an absent variable or `dev` selects Cloud mode.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DeployStage {
    Dev,
    Stage,
    Prod,
    It,
    /// An unrecognized stage name. Still a cloud deployment.
    #[serde(untagged)]
    Other(String),
}

impl DeployStage {
    /// Read the stage from the environment. Absent means `dev`.
    pub fn from_env() -> Self {
        match env::var("DEPLOY_STAGE") {
            Ok(value) => Self::from_name(&value),
            Err(_) => DeployStage::Dev,
        }
    }

    /// Parse a stage name. Never fails; unknown names are `Other`.
    pub fn from_name(name: &str) -> Self {
        match name {
            "dev" => DeployStage::Dev,
            "stage" => DeployStage::Stage,
            "prod" => DeployStage::Prod,
            "it" => DeployStage::It,
            other => DeployStage::Other(other.to_string()),
        }
    }

    /// Whether this stage routes logs to the cloud sink.
    pub fn is_cloud(&self) -> bool {
        !matches!(self, DeployStage::Dev)
    }
}

impl Default for DeployStage {
    fn default() -> Self {
        DeployStage::Dev
    }
}

/// Cloud sink settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CloudConfig {
    /// Ingestion endpoint entries are POSTed to.
    pub endpoint: String,
}

impl Default for CloudConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://127.0.0.1:9411/v1/entries".to_string(),
        }
    }
}

/// Root configuration for a dispatcher instance.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggerConfig {
    /// Logger instance name.
    pub name: String,

    /// Deployment stage; selects the Local or Cloud sink.
    pub stage: DeployStage,

    /// Resource-type tag attached to every cloud entry.
    pub resource_type: String,

    /// Request paths the middleware never logs (exact match).
    pub ignored_paths: Vec<String>,

    /// Initial process-wide labels attached to structured entries.
    pub labels: HashMap<String, String>,

    /// Cloud sink settings, used when `stage` selects Cloud mode.
    pub cloud: CloudConfig,
}

impl LoggerConfig {
    /// Build a config for `name` from the environment: `DEPLOY_STAGE` picks
    /// the mode and `LOG_ENDPOINT` (if set) overrides the cloud endpoint.
    pub fn from_env(name: impl Into<String>) -> Self {
        let mut config = Self {
            name: name.into(),
            stage: DeployStage::from_env(),
            ..Self::default()
        };
        if let Ok(endpoint) = env::var("LOG_ENDPOINT") {
            config.cloud.endpoint = endpoint;
        }
        config
    }
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            name: "logmux".to_string(),
            stage: DeployStage::Dev,
            resource_type: "global".to_string(),
            ignored_paths: default_ignored_paths(),
            labels: HashMap::new(),
            cloud: CloudConfig::default(),
        }
    }
}

/// Paths the request middleware suppresses by default.
pub fn default_ignored_paths() -> Vec<String> {
    vec![
        "/".to_string(),
        "/health".to_string(),
        "/version".to_string(),
        "/kpis".to_string(),
    ]
}
