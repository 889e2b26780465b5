pub mod balance;
pub mod engine;
pub mod least_cost;
pub mod matrix;
pub mod vogel;

pub use crate::domain::model::{
    Allocation, BalancedProblem, Dummy, DummyAxis, Method, Problem, Solution, Step,
};
pub use crate::domain::ports::{SettingsProvider, Solver};
pub use crate::utils::error::Result;
