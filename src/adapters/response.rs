use crate::adapters::input::parse_problem;
use crate::core::engine::TransportEngine;
use crate::domain::model::{Dummy, Method, Solution};
use crate::domain::ports::SettingsProvider;
use crate::utils::error::{Result, SolverError};
use serde::{Deserialize, Serialize};

/// Body of a solve request: every field is raw text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolveRequest {
    pub supply: String,
    pub demand: String,
    pub costs: String,
    #[serde(default)]
    pub method: String,
}

impl SolveRequest {
    /// Fills a blank method from the configured default.
    pub fn with_default_method<S: SettingsProvider>(mut self, settings: &S) -> Self {
        if self.method.trim().is_empty() {
            if let Some(method) = settings.default_method() {
                self.method = method.to_string();
            }
        }
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolveResponse {
    pub method: Method,
    pub allocation: Vec<Vec<i64>>,
    pub total_cost: f64,
    pub dummy: Option<Dummy>,
    pub unmet: f64,
}

impl SolveResponse {
    pub fn from_solution(solution: &Solution, trim_dummy: bool) -> Self {
        Self {
            method: solution.method,
            allocation: solution.rounded_allocation(trim_dummy),
            total_cost: solution.total_cost,
            dummy: solution.dummy,
            unmet: solution.unmet(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub kind: String,
    pub status_code: u16,
}

impl From<&SolverError> for ErrorResponse {
    fn from(err: &SolverError) -> Self {
        Self {
            error: err.to_string(),
            kind: err.kind().to_string(),
            status_code: err.status_code(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Payload {
    Solved(SolveResponse),
    Failed(ErrorResponse),
}

impl Payload {
    pub fn status_code(&self) -> u16 {
        match self {
            Payload::Solved(_) => 200,
            Payload::Failed(err) => err.status_code,
        }
    }

    pub fn to_json(&self, pretty: bool) -> Result<String> {
        let json = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(json)
    }
}

/// Method selection, parsing and solving. The method is resolved first so an
/// unknown method never triggers any computation.
pub fn solve_request(engine: &TransportEngine, request: &SolveRequest) -> Result<Solution> {
    let method: Method = request.method.parse()?;
    let problem = parse_problem(&request.supply, &request.demand, &request.costs)?;
    engine.solve(&problem, method)
}

/// Runs a request end to end and always produces a payload.
pub fn handle_request(engine: &TransportEngine, request: &SolveRequest, trim_dummy: bool) -> Payload {
    match solve_request(engine, request) {
        Ok(solution) => Payload::Solved(SolveResponse::from_solution(&solution, trim_dummy)),
        Err(err) => {
            if err.is_client_error() {
                tracing::warn!(kind = err.kind(), "Request rejected: {}", err);
            } else {
                tracing::error!(kind = err.kind(), "Request failed: {}", err);
            }
            Payload::Failed(ErrorResponse::from(&err))
        }
    }
}
