use crate::core::{Method, SettingsProvider};
use crate::utils::error::{Result, SolverError};
use crate::utils::validation::Validate;
use std::env;

/// Settings for the Lambda handler, read from the environment.
#[derive(Debug, Clone, PartialEq)]
pub struct LambdaConfig {
    pub trace: bool,
    pub trim_dummy: bool,
    pub default_method: Option<String>,
}

impl LambdaConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F: Fn(&str) -> Option<String>>(lookup: F) -> Result<Self> {
        Ok(Self {
            trace: parse_flag("SOLVER_TRACE", lookup("SOLVER_TRACE"))?,
            trim_dummy: parse_flag("SOLVER_TRIM_DUMMY", lookup("SOLVER_TRIM_DUMMY"))?,
            default_method: lookup("SOLVER_DEFAULT_METHOD").filter(|m| !m.trim().is_empty()),
        })
    }
}

fn parse_flag(name: &str, value: Option<String>) -> Result<bool> {
    let Some(value) = value else {
        return Ok(false);
    };
    match value.trim().to_ascii_lowercase().as_str() {
        "" | "0" | "false" | "no" | "off" => Ok(false),
        "1" | "true" | "yes" | "on" => Ok(true),
        _ => Err(SolverError::InvalidConfigValueError {
            field: name.to_string(),
            value,
            reason: "Expected a boolean (true/false, 1/0, yes/no, on/off)".to_string(),
        }),
    }
}

impl SettingsProvider for LambdaConfig {
    fn trace(&self) -> bool {
        self.trace
    }

    fn trim_dummy(&self) -> bool {
        self.trim_dummy
    }

    fn default_method(&self) -> Option<&str> {
        self.default_method.as_deref()
    }
}

impl Validate for LambdaConfig {
    fn validate(&self) -> Result<()> {
        if let Some(method) = &self.default_method {
            method.parse::<Method>()?;
        }
        tracing::info!("Lambda configuration validation passed");
        Ok(())
    }
}
