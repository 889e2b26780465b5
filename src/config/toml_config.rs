use crate::adapters::SolveRequest;
use crate::core::{Method, SettingsProvider};
use crate::utils::error::{Result, SolverError};
use crate::utils::validation::{validate_non_empty_string, validate_one_of, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub batch: BatchInfo,
    pub solver: Option<SolverConfig>,
    pub problems: Vec<ProblemDefinition>,
    pub output: Option<OutputConfig>,
    pub error_handling: Option<ErrorHandlingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchInfo {
    pub name: String,
    pub description: Option<String>,
    pub version: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolverConfig {
    pub method: Option<String>,
    pub trace: Option<bool>,
    pub trim_dummy: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProblemDefinition {
    pub name: String,
    pub description: Option<String>,
    pub enabled: Option<bool>,
    pub supply: String,
    pub demand: String,
    pub costs: String,
    pub method: Option<String>, // overrides [solver].method
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub pretty: Option<bool>,
    pub summary_path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorHandlingConfig {
    pub on_failure: Option<String>, // "stop" or "continue"
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePolicy {
    Stop,
    Continue,
}

const ON_FAILURE_VALUES: [&str; 2] = ["stop", "continue"];

impl ProblemDefinition {
    pub fn is_enabled(&self) -> bool {
        self.enabled.unwrap_or(true)
    }

    pub fn to_request(&self, default_method: &str) -> SolveRequest {
        SolveRequest {
            supply: self.supply.clone(),
            demand: self.demand.clone(),
            costs: self.costs.clone(),
            method: self
                .method
                .clone()
                .unwrap_or_else(|| default_method.to_string()),
        }
    }
}

impl TomlConfig {
    /// Loads a problem set from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(SolverError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// Parses a problem set, substituting `${VAR}` from the environment first.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| SolverError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Unset variables are left as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| SolverError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validate_non_empty_string("batch.name", &self.batch.name)?;

        if self.problems.is_empty() {
            return Err(SolverError::ConfigValidationError {
                field: "problems".to_string(),
                message: "at least one [[problems]] entry is required".to_string(),
            });
        }

        self.method().parse::<Method>()?;

        let mut names = HashSet::new();
        for problem in &self.problems {
            validate_non_empty_string("problems.name", &problem.name)?;
            if !names.insert(problem.name.as_str()) {
                return Err(SolverError::InvalidConfigValueError {
                    field: "problems.name".to_string(),
                    value: problem.name.clone(),
                    reason: "Problem names must be unique".to_string(),
                });
            }
            if let Some(method) = &problem.method {
                method.parse::<Method>()?;
            }
        }

        if let Some(on_failure) = self
            .error_handling
            .as_ref()
            .and_then(|e| e.on_failure.as_deref())
        {
            validate_one_of("error_handling.on_failure", on_failure, &ON_FAILURE_VALUES)?;
        }

        Ok(())
    }

    pub fn method(&self) -> &str {
        self.solver
            .as_ref()
            .and_then(|s| s.method.as_deref())
            .unwrap_or(Method::LeastCost.as_str())
    }

    pub fn enabled_problems(&self) -> impl Iterator<Item = &ProblemDefinition> {
        self.problems.iter().filter(|p| p.is_enabled())
    }

    pub fn failure_policy(&self) -> FailurePolicy {
        match self
            .error_handling
            .as_ref()
            .and_then(|e| e.on_failure.as_deref())
        {
            Some("continue") => FailurePolicy::Continue,
            _ => FailurePolicy::Stop,
        }
    }

    pub fn pretty_output(&self) -> bool {
        self.output
            .as_ref()
            .and_then(|o| o.pretty)
            .unwrap_or(false)
    }

    pub fn summary_path(&self) -> Option<&str> {
        self.output.as_ref().and_then(|o| o.summary_path.as_deref())
    }
}

impl SettingsProvider for TomlConfig {
    fn trace(&self) -> bool {
        self.solver.as_ref().and_then(|s| s.trace).unwrap_or(false)
    }

    fn trim_dummy(&self) -> bool {
        self.solver
            .as_ref()
            .and_then(|s| s.trim_dummy)
            .unwrap_or(false)
    }

    fn default_method(&self) -> Option<&str> {
        Some(self.method())
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const BASIC: &str = r#"
[batch]
name = "textbook"

[solver]
method = "vam"
trim_dummy = true

[[problems]]
name = "balanced"
supply = "20,30,25"
demand = "10,25,40"
costs = """
8,6,10
9,12,13
14,9,16
"""
method = "least_cost"

[[problems]]
name = "surplus"
supply = "10"
demand = "4,4"
costs = "2,3"

[[problems]]
name = "skipped"
enabled = false
supply = "1"
demand = "1"
costs = "1"

[error_handling]
on_failure = "continue"
"#;

    #[test]
    fn test_parse_basic_toml_config() {
        let config = TomlConfig::from_toml_str(BASIC).unwrap();

        assert_eq!(config.batch.name, "textbook");
        assert_eq!(config.method(), "vam");
        assert!(config.trim_dummy());
        assert!(!config.trace());
        assert_eq!(config.failure_policy(), FailurePolicy::Continue);
        assert_eq!(config.enabled_problems().count(), 2);
        assert!(config.validate().is_ok());

        let first = config.problems[0].to_request(config.method());
        assert_eq!(first.method, "least_cost");
        assert_eq!(first.costs.trim(), "8,6,10\n9,12,13\n14,9,16");
        let second = config.problems[1].to_request(config.method());
        assert_eq!(second.method, "vam");
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("TRANSPORT_TEST_SUPPLY", "7,9,18");

        let toml_content = r#"
[batch]
name = "env"

[[problems]]
name = "from-env"
supply = "${TRANSPORT_TEST_SUPPLY}"
demand = "5,8,7,14"
costs = "19,30,50,10\n70,30,40,60\n40,8,70,20"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.problems[0].supply, "7,9,18");
        assert_eq!(config.method(), "least_cost");
        assert_eq!(config.failure_policy(), FailurePolicy::Stop);

        std::env::remove_var("TRANSPORT_TEST_SUPPLY");
    }

    #[test]
    fn test_config_validation_rejects_unknown_method() {
        let toml_content = r#"
[batch]
name = "bad"

[[problems]]
name = "p"
supply = "1"
demand = "1"
costs = "1"
method = "simplex"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(matches!(
            config.validate(),
            Err(SolverError::UnknownMethod { .. })
        ));
    }

    #[test]
    fn test_config_validation_rejects_duplicates_and_bad_policy() {
        let duplicated = r#"
[batch]
name = "dup"

[[problems]]
name = "p"
supply = "1"
demand = "1"
costs = "1"

[[problems]]
name = "p"
supply = "1"
demand = "1"
costs = "1"
"#;
        let config = TomlConfig::from_toml_str(duplicated).unwrap();
        assert!(config.validate().is_err());

        let bad_policy = r#"
[batch]
name = "policy"

[[problems]]
name = "p"
supply = "1"
demand = "1"
costs = "1"

[error_handling]
on_failure = "retry"
"#;
        let config = TomlConfig::from_toml_str(bad_policy).unwrap();
        assert!(matches!(
            config.validate(),
            Err(SolverError::InvalidConfigValueError { .. })
        ));
    }

    #[test]
    fn test_missing_problems_table_is_a_parse_error() {
        let err = TomlConfig::from_toml_str("[batch]\nname = \"x\"\n").unwrap_err();
        assert!(matches!(err, SolverError::ConfigValidationError { .. }));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(BASIC.as_bytes()).unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.problems.len(), 3);
    }
}
