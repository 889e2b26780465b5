// Adapters layer: text input parsing and response payloads around the core.

pub mod input;
pub mod response;

pub use input::parse_problem;
pub use response::{handle_request, solve_request, ErrorResponse, Payload, SolveRequest, SolveResponse};
