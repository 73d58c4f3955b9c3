//! Manager configuration validators

use super::trait_def::Validate;
use crate::config::ManagerConfig;
use crate::config::models::*;
use crate::core::params::GenerationParams;
use tracing::debug;

impl Validate for ManagerConfig {
    fn validate(&self) -> Result<(), String> {
        debug!("Validating manager configuration");

        self.health.validate()?;
        self.resolver.validate()?;

        if self.services.is_empty() {
            return Err("At least one service must be configured".to_string());
        }

        for (key, service) in &self.services {
            if key.trim().is_empty() {
                return Err("Service key cannot be empty".to_string());
            }
            service
                .validate()
                .map_err(|e| format!("Service '{}': {}", key, e))?;
        }

        Ok(())
    }
}

impl Validate for HealthSettings {
    fn validate(&self) -> Result<(), String> {
        if self.enabled && self.interval_secs == 0 {
            return Err("Health check interval must be greater than 0".to_string());
        }

        if self.timeout_ms == 0 {
            return Err("Health check timeout must be greater than 0".to_string());
        }

        Ok(())
    }
}

impl Validate for ResolverSettings {
    fn validate(&self) -> Result<(), String> {
        for (name, custom) in &self.custom_providers {
            if name.trim().is_empty() {
                return Err("Custom provider name cannot be empty".to_string());
            }
            if custom.capabilities.is_empty() {
                return Err(format!(
                    "Custom provider '{}' must declare at least one capability",
                    name
                ));
            }
        }
        Ok(())
    }
}

impl Validate for ServiceConfig {
    fn validate(&self) -> Result<(), String> {
        if self.primary_model.trim().is_empty() {
            return Err("Primary model cannot be empty".to_string());
        }

        if self.max_retries == 0 {
            return Err("Max retries must be at least 1".to_string());
        }

        if self.fallback_models.iter().any(|f| f.model.trim().is_empty()) {
            return Err("Fallback model cannot be empty".to_string());
        }

        if self.request_timeout_ms == Some(0) {
            return Err("Request timeout must be greater than 0".to_string());
        }

        self.defaults.validate()
    }
}

impl Validate for GenerationParams {
    fn validate(&self) -> Result<(), String> {
        if let Some(temperature) = self.temperature {
            if !(0.0..=2.0).contains(&temperature) {
                return Err(format!("Temperature {} out of range 0.0..=2.0", temperature));
            }
        }

        if let Some(top_p) = self.top_p {
            if !(0.0..=1.0).contains(&top_p) {
                return Err(format!("Top-p {} out of range 0.0..=1.0", top_p));
            }
        }

        if self.max_output_tokens == Some(0) {
            return Err("Max output tokens must be greater than 0".to_string());
        }

        Ok(())
    }
}
