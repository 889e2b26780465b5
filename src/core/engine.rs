use crate::core::balance::balance;
use crate::core::least_cost::LeastCostSolver;
use crate::core::matrix::Matrix;
use crate::core::vogel::VogelSolver;
use crate::domain::model::{Allocation, BalancedProblem, Method, Problem, Solution};
use crate::domain::ports::Solver;
use crate::utils::error::{Result, SolverError};
use crate::utils::validation::Validate;
use std::time::Instant;

#[derive(Debug, Clone, Copy, Default)]
pub struct SolverOptions {
    /// Log every solver iteration at debug level.
    pub trace: bool,
}

pub struct TransportEngine {
    options: SolverOptions,
}

impl TransportEngine {
    pub fn new(options: SolverOptions) -> Self {
        Self { options }
    }

    pub fn solver_for(&self, method: Method) -> Box<dyn Solver> {
        match method {
            Method::LeastCost => Box::new(LeastCostSolver::new(self.options.trace)),
            Method::Vogel => Box::new(VogelSolver::new(self.options.trace)),
        }
    }

    pub fn solve(&self, problem: &Problem, method: Method) -> Result<Solution> {
        problem.validate()?;
        let started = Instant::now();

        tracing::info!(
            method = %method,
            rows = problem.supply.len(),
            cols = problem.demand.len(),
            "Solving transportation problem"
        );

        let balanced = balance(problem);
        let solver = self.solver_for(method);
        let allocation = solver.solve(&balanced)?;
        check_feasible(&balanced, &allocation)?;

        let total_cost = total_cost(&allocation.quantities, &problem.costs);

        tracing::info!(
            total_cost,
            steps = allocation.steps.len(),
            elapsed_us = started.elapsed().as_micros() as u64,
            "Solved"
        );

        Ok(Solution {
            method,
            allocation: allocation.quantities,
            steps: allocation.steps,
            total_cost,
            dummy: balanced.dummy,
        })
    }
}

impl Default for TransportEngine {
    fn default() -> Self {
        Self::new(SolverOptions::default())
    }
}

/// Dot product of allocation and the original cost matrix.
///
/// Only the original rows and columns are visited, so a trailing dummy node
/// contributes nothing. Empty cells are skipped so forbidden routes never
/// yield `inf * 0`.
pub fn total_cost(allocation: &Matrix<f64>, original_costs: &Matrix<f64>) -> f64 {
    original_costs
        .cells()
        .filter_map(|((i, j), &cost)| {
            let quantity = *allocation.get(i, j)?;
            (quantity != 0.0).then(|| quantity * cost)
        })
        .sum()
}

// Real-valued inputs may leave rounding noise in the row/column sums.
fn close_enough(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-9 * a.abs().max(b.abs()).max(1.0)
}

fn check_feasible(problem: &BalancedProblem, allocation: &Allocation) -> Result<()> {
    let quantities = &allocation.quantities;
    for (i, &supply) in problem.supply.iter().enumerate() {
        let shipped = quantities.row_sum(i);
        if !close_enough(shipped, supply) {
            return Err(SolverError::InvariantViolation {
                message: format!("row {} ships {} of supply {}", i, shipped, supply),
            });
        }
    }
    for (j, &demand) in problem.demand.iter().enumerate() {
        let received = quantities.col_sum(j);
        if !close_enough(received, demand) {
            return Err(SolverError::InvariantViolation {
                message: format!("column {} receives {} of demand {}", j, received, demand),
            });
        }
    }
    Ok(())
}
