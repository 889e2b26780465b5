pub mod cli;
pub mod lambda;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::adapters::SolveRequest;
#[cfg(feature = "cli")]
use crate::core::SettingsProvider;
#[cfg(feature = "cli")]
use crate::utils::error::{Result, SolverError};
#[cfg(feature = "cli")]
use crate::utils::validation::{validate_non_empty_string, Validate};
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "transport-solver")]
#[command(about = "Initial feasible solutions for the transportation problem")]
pub struct CliConfig {
    /// Comma-separated supply capacities, e.g. 20,30,25
    #[arg(long)]
    pub supply: String,

    /// Comma-separated demand requirements, e.g. 10,25,40
    #[arg(long)]
    pub demand: String,

    /// Cost rows separated by newlines or ';'; use inf or x for forbidden routes
    #[arg(long, conflicts_with = "costs_file", required_unless_present = "costs_file")]
    pub costs: Option<String>,

    /// Read the cost matrix from a file, one row per line
    #[arg(long)]
    pub costs_file: Option<String>,

    #[arg(long, default_value = "least_cost", help = "least_cost or vam")]
    pub method: String,

    #[arg(long, help = "Drop the dummy row/column from the printed allocation")]
    pub trim_dummy: bool,

    #[arg(long, help = "Pretty-print the JSON result")]
    pub pretty: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    pub fn to_request(&self) -> Result<SolveRequest> {
        let costs = match (&self.costs, &self.costs_file) {
            (Some(inline), _) => cli::normalize_rows(inline),
            (None, Some(path)) => cli::read_text_file(path)?,
            (None, None) => {
                return Err(SolverError::EmptyInput {
                    field: "costs".to_string(),
                })
            }
        };

        Ok(SolveRequest {
            supply: self.supply.clone(),
            demand: self.demand.clone(),
            costs,
            method: self.method.clone(),
        })
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("method", &self.method)?;
        if let Some(path) = &self.costs_file {
            validate_non_empty_string("costs_file", path)?;
        }
        Ok(())
    }
}

#[cfg(feature = "cli")]
impl SettingsProvider for CliConfig {
    fn trace(&self) -> bool {
        self.verbose
    }

    fn trim_dummy(&self) -> bool {
        self.trim_dummy
    }

    fn default_method(&self) -> Option<&str> {
        Some(&self.method)
    }
}
