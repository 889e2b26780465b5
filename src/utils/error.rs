use thiserror::Error;

#[derive(Error, Debug)]
pub enum SolverError {
    #[error("Invalid number in {field} at row {row}, column {column}: '{token}'")]
    InvalidNumber {
        field: String,
        row: usize,
        column: usize,
        token: String,
    },

    #[error("Cost matrix row {row} has {found} entries, expected {expected}")]
    RaggedMatrix {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("Dimension mismatch: {message}")]
    DimensionMismatch { message: String },

    #[error("Negative value in {field} at index {index}: {value}")]
    NegativeValue {
        field: String,
        index: usize,
        value: f64,
    },

    #[error("Input field '{field}' is empty")]
    EmptyInput { field: String },

    #[error("Unknown method: '{method}' (expected least_cost or vam)")]
    UnknownMethod { method: String },

    #[error(
        "No feasible route left: {remaining_supply} supply and {remaining_demand} demand unallocated"
    )]
    Infeasible {
        remaining_supply: f64,
        remaining_demand: f64,
    },

    #[error("Iteration limit of {limit} exceeded")]
    IterationLimit { limit: usize },

    #[error("Internal invariant violated: {message}")]
    InvariantViolation { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}': '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },
}

pub type Result<T> = std::result::Result<T, SolverError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Method,
    Computation,
    Internal,
    Config,
    Io,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl SolverError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            SolverError::InvalidNumber { .. }
            | SolverError::RaggedMatrix { .. }
            | SolverError::DimensionMismatch { .. }
            | SolverError::NegativeValue { .. }
            | SolverError::EmptyInput { .. }
            | SolverError::CsvError(_) => ErrorCategory::Input,
            SolverError::UnknownMethod { .. } => ErrorCategory::Method,
            SolverError::Infeasible { .. } => ErrorCategory::Computation,
            SolverError::IterationLimit { .. } | SolverError::InvariantViolation { .. } => {
                ErrorCategory::Internal
            }
            SolverError::ConfigError { .. }
            | SolverError::InvalidConfigValueError { .. }
            | SolverError::ConfigValidationError { .. } => ErrorCategory::Config,
            SolverError::IoError(_) | SolverError::SerializationError(_) => ErrorCategory::Io,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input | ErrorCategory::Method | ErrorCategory::Config => {
                ErrorSeverity::High
            }
            ErrorCategory::Computation => ErrorSeverity::Medium,
            ErrorCategory::Internal | ErrorCategory::Io => ErrorSeverity::Critical,
        }
    }

    /// Stable machine-readable name used in error payloads.
    pub fn kind(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Input => "malformed_input",
            ErrorCategory::Method => "unknown_method",
            ErrorCategory::Computation => "infeasible",
            ErrorCategory::Config => "config",
            ErrorCategory::Internal | ErrorCategory::Io => "internal",
        }
    }

    pub fn status_code(&self) -> u16 {
        match self.category() {
            ErrorCategory::Input | ErrorCategory::Method => 400,
            ErrorCategory::Computation => 422,
            ErrorCategory::Internal | ErrorCategory::Config | ErrorCategory::Io => 500,
        }
    }

    pub fn is_client_error(&self) -> bool {
        self.status_code() < 500
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            SolverError::InvalidNumber { .. } => {
                "Use comma-separated numbers; mark forbidden routes with 'inf' or 'x'"
            }
            SolverError::RaggedMatrix { .. } => {
                "Give every cost row one entry per demand node"
            }
            SolverError::DimensionMismatch { .. } => {
                "Use one cost row per supply node and one column per demand node"
            }
            SolverError::NegativeValue { .. } => "Supply, demand and costs must be non-negative",
            SolverError::EmptyInput { .. } => "Provide at least one value for every field",
            SolverError::UnknownMethod { .. } => "Choose 'least_cost' or 'vam'",
            SolverError::Infeasible { .. } => {
                "Open more routes: some supply or demand can only be served by forbidden cells"
            }
            SolverError::IterationLimit { .. } | SolverError::InvariantViolation { .. } => {
                "Report this problem instance, it triggered an internal solver error"
            }
            SolverError::IoError(_) => "Check that the file exists and is readable",
            SolverError::CsvError(_) => "Check the separators in the input text",
            SolverError::SerializationError(_) => "Check the JSON payload",
            SolverError::ConfigError { .. }
            | SolverError::InvalidConfigValueError { .. }
            | SolverError::ConfigValidationError { .. } => {
                "Fix the configuration file and run again"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Input => format!("The problem input is malformed: {}", self),
            ErrorCategory::Method => format!("The solving method is not supported: {}", self),
            ErrorCategory::Computation => format!("The problem could not be solved: {}", self),
            ErrorCategory::Internal => format!("Internal solver error: {}", self),
            ErrorCategory::Config => format!("Configuration problem: {}", self),
            ErrorCategory::Io => format!("I/O failure: {}", self),
        }
    }
}
