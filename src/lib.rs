pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{handle_request, parse_problem, Payload, SolveRequest, SolveResponse};
pub use config::lambda::LambdaConfig;
pub use config::toml_config::TomlConfig;
pub use core::engine::{SolverOptions, TransportEngine};
pub use core::{Method, Problem, Solution};
pub use utils::error::{Result, SolverError};
