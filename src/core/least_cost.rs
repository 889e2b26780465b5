use crate::core::matrix::Matrix;
use crate::domain::model::{Allocation, BalancedProblem, Method};
use crate::domain::ports::Solver;
use crate::utils::error::{Result, SolverError};

/// Greedy least-cost method: repeatedly saturate the cheapest open cell.
///
/// Each cell is used at most once. Closed cells are tracked in a separate
/// mask, so the cost matrix itself is never written to. Forbidden routes
/// (infinite cost) start closed.
#[derive(Debug, Clone, Default)]
pub struct LeastCostSolver {
    trace: bool,
}

impl LeastCostSolver {
    pub fn new(trace: bool) -> Self {
        Self { trace }
    }
}

impl Solver for LeastCostSolver {
    fn method(&self) -> Method {
        Method::LeastCost
    }

    fn solve(&self, problem: &BalancedProblem) -> Result<Allocation> {
        let costs = &problem.costs;
        let mut supply = problem.supply.clone();
        let mut demand = problem.demand.clone();
        let mut open: Matrix<bool> = costs.map(|c| c.is_finite());
        let mut allocation = Allocation::empty(problem.rows(), problem.cols());

        let limit = problem.iteration_limit();
        let mut iteration = 0;

        while supply.iter().any(|&s| s > 0.0) && demand.iter().any(|&d| d > 0.0) {
            if iteration >= limit {
                return Err(SolverError::IterationLimit { limit });
            }
            iteration += 1;

            let Some((i, j)) = cheapest_open_cell(costs, &open, &supply, &demand) else {
                let remaining_supply: f64 = supply.iter().sum();
                let remaining_demand: f64 = demand.iter().sum();
                tracing::warn!(
                    remaining_supply,
                    remaining_demand,
                    "Least-cost: every remaining route is forbidden"
                );
                return Err(SolverError::Infeasible {
                    remaining_supply,
                    remaining_demand,
                });
            };

            let quantity = supply[i].min(demand[j]);
            allocation.record(i, j, quantity, costs[(i, j)]);
            supply[i] -= quantity;
            demand[j] -= quantity;
            open[(i, j)] = false;

            if self.trace {
                tracing::debug!(
                    iteration,
                    row = i,
                    col = j,
                    quantity,
                    cost = costs[(i, j)],
                    "Least-cost allocation"
                );
                tracing::debug!(?supply, ?demand, "Residual capacity");
            }
        }

        Ok(allocation)
    }
}

/// Cheapest open cell whose row and column both have residual capacity.
/// Ties resolve to the first cell in row-major order.
fn cheapest_open_cell(
    costs: &Matrix<f64>,
    open: &Matrix<bool>,
    supply: &[f64],
    demand: &[f64],
) -> Option<(usize, usize)> {
    let mut best: Option<((usize, usize), f64)> = None;
    for ((i, j), &cost) in costs.cells() {
        if !open[(i, j)] || supply[i] <= 0.0 || demand[j] <= 0.0 {
            continue;
        }
        match best {
            Some((_, best_cost)) if cost >= best_cost => {}
            _ => best = Some(((i, j), cost)),
        }
    }
    best.map(|(cell, _)| cell)
}
