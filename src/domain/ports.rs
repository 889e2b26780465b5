use crate::domain::model::{Allocation, BalancedProblem, Method};
use crate::utils::error::Result;

/// An allocation heuristic over a balanced problem.
pub trait Solver {
    fn method(&self) -> Method;
    fn solve(&self, problem: &BalancedProblem) -> Result<Allocation>;
}

/// Settings shared by every entry point (CLI flags, TOML files, Lambda env).
pub trait SettingsProvider {
    fn trace(&self) -> bool;
    fn trim_dummy(&self) -> bool;
    fn default_method(&self) -> Option<&str>;
}
