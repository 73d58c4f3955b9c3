//! Configuration management for the provider manager
//!
//! This module handles loading and validation of the manager configuration.

pub mod models;
pub mod validation;

pub use models::*;
pub use validation::Validate;

use crate::utils::error::{FailoverError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, info};

/// Main configuration struct for the provider manager
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ManagerConfig {
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingSettings,
    /// Background health probing
    #[serde(default)]
    pub health: HealthSettings,
    /// Model classification rules
    #[serde(default)]
    pub resolver: ResolverSettings,
    /// Service key to routing configuration
    #[serde(default)]
    pub services: BTreeMap<String, ServiceConfig>,
}

impl ManagerConfig {
    /// Load configuration from a YAML file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {:?}", path);

        let content = tokio::fs::read_to_string(path).await?;

        let config = Self::from_yaml_str(&content)?;

        debug!("Configuration loaded successfully");
        Ok(config)
    }

    /// Parse and validate configuration from YAML text
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let config: ManagerConfig = serde_yaml::from_str(content)
            .map_err(|e| FailoverError::Config(format!("Failed to parse config: {}", e)))?;

        Validate::validate(&config).map_err(FailoverError::Validation)?;
        Ok(config)
    }

    /// Add a service (builder pattern)
    pub fn with_service(mut self, key: impl Into<String>, service: ServiceConfig) -> Self {
        self.services.insert(key.into(), service);
        self
    }

    /// Disable the background probe loop (builder pattern)
    pub fn without_health_checks(mut self) -> Self {
        self.health.enabled = false;
        self
    }

    pub fn service(&self, key: &str) -> Option<&ServiceConfig> {
        self.services.get(key)
    }
}
