use crate::core::matrix::Matrix;
use crate::domain::model::{Allocation, BalancedProblem, Method};
use crate::domain::ports::Solver;
use crate::utils::error::{Result, SolverError};
use std::cmp::Ordering;

/// Vogel's approximation method.
///
/// Every iteration computes a penalty for each row and column that still has
/// residual capacity, picks the line with the largest penalty and allocates
/// along its cheapest remaining route.
#[derive(Debug, Clone, Default)]
pub struct VogelSolver {
    trace: bool,
}

impl VogelSolver {
    pub fn new(trace: bool) -> Self {
        Self { trace }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Axis {
    Row,
    Column,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Penalty {
    pub value: f64,
    pub axis: Axis,
    pub index: usize,
}

impl Penalty {
    /// Selection order: larger penalty first, then rows before columns, then
    /// lower index first.
    pub fn priority(&self, other: &Penalty) -> Ordering {
        other
            .value
            .total_cmp(&self.value)
            .then(self.axis.cmp(&other.axis))
            .then(self.index.cmp(&other.index))
    }
}

/// The line that wins the current iteration, if any line is still open.
pub fn select_line(penalties: &[Penalty]) -> Option<Penalty> {
    penalties.iter().copied().min_by(|a, b| a.priority(b))
}

/// Gap between the two cheapest finite costs, or the single cost when only one
/// route remains. `None` when the line has no finite route at all.
fn line_penalty(costs: impl Iterator<Item = f64>) -> Option<f64> {
    let mut lowest = f64::INFINITY;
    let mut second = f64::INFINITY;
    let mut count = 0usize;
    for cost in costs.filter(|c| c.is_finite()) {
        count += 1;
        if cost < lowest {
            second = lowest;
            lowest = cost;
        } else if cost < second {
            second = cost;
        }
    }
    match count {
        0 => None,
        1 => Some(lowest),
        _ => Some(second - lowest),
    }
}

/// Cheapest finite entry among `candidates`, lowest index on ties.
fn cheapest(candidates: impl Iterator<Item = (usize, f64)>) -> Option<(usize, f64)> {
    candidates
        .filter(|(_, c)| c.is_finite())
        .fold(None, |best, (k, c)| match best {
            Some((_, best_cost)) if c >= best_cost => best,
            _ => Some((k, c)),
        })
}

fn infeasible(supply: &[f64], demand: &[f64]) -> SolverError {
    let remaining_supply: f64 = supply.iter().sum();
    let remaining_demand: f64 = demand.iter().sum();
    tracing::warn!(
        remaining_supply,
        remaining_demand,
        "VAM: an open line has only forbidden routes left"
    );
    SolverError::Infeasible {
        remaining_supply,
        remaining_demand,
    }
}

fn penalties(costs: &Matrix<f64>, supply: &[f64], demand: &[f64]) -> Result<Vec<Penalty>> {
    let mut penalties = Vec::new();

    for (i, _) in supply.iter().enumerate().filter(|(_, &s)| s > 0.0) {
        let row = demand
            .iter()
            .enumerate()
            .filter(|(_, &d)| d > 0.0)
            .map(|(j, _)| costs[(i, j)]);
        let value = line_penalty(row).ok_or_else(|| infeasible(supply, demand))?;
        penalties.push(Penalty {
            value,
            axis: Axis::Row,
            index: i,
        });
    }

    for (j, _) in demand.iter().enumerate().filter(|(_, &d)| d > 0.0) {
        let column = supply
            .iter()
            .enumerate()
            .filter(|(_, &s)| s > 0.0)
            .map(|(i, _)| costs[(i, j)]);
        let value = line_penalty(column).ok_or_else(|| infeasible(supply, demand))?;
        penalties.push(Penalty {
            value,
            axis: Axis::Column,
            index: j,
        });
    }

    Ok(penalties)
}

impl Solver for VogelSolver {
    fn method(&self) -> Method {
        Method::Vogel
    }

    fn solve(&self, problem: &BalancedProblem) -> Result<Allocation> {
        let costs = &problem.costs;
        let mut supply = problem.supply.clone();
        let mut demand = problem.demand.clone();
        let mut allocation = Allocation::empty(problem.rows(), problem.cols());

        let limit = problem.iteration_limit();
        let mut iteration = 0;

        while supply.iter().any(|&s| s > 0.0) && demand.iter().any(|&d| d > 0.0) {
            if iteration >= limit {
                return Err(SolverError::IterationLimit { limit });
            }
            iteration += 1;

            let penalties = penalties(costs, &supply, &demand)?;
            let Some(line) = select_line(&penalties) else {
                break;
            };

            let target = match line.axis {
                Axis::Row => cheapest(
                    demand
                        .iter()
                        .enumerate()
                        .filter(|(_, &d)| d > 0.0)
                        .map(|(j, _)| (j, costs[(line.index, j)])),
                )
                .map(|(j, _)| (line.index, j)),
                Axis::Column => cheapest(
                    supply
                        .iter()
                        .enumerate()
                        .filter(|(_, &s)| s > 0.0)
                        .map(|(i, _)| (i, costs[(i, line.index)])),
                )
                .map(|(i, _)| (i, line.index)),
            };
            let Some((i, j)) = target else {
                return Err(infeasible(&supply, &demand));
            };

            let quantity = supply[i].min(demand[j]);
            allocation.record(i, j, quantity, costs[(i, j)]);
            supply[i] -= quantity;
            demand[j] -= quantity;

            if self.trace {
                tracing::debug!(
                    iteration,
                    axis = ?line.axis,
                    index = line.index,
                    penalty = line.value,
                    "VAM selected line"
                );
                tracing::debug!(row = i, col = j, quantity, "VAM allocation");
                tracing::debug!(?supply, ?demand, "Residual capacity");
            }
        }

        Ok(allocation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::balance::balance;
    use crate::domain::model::Problem;

    fn solve(supply: Vec<f64>, demand: Vec<f64>, costs: Vec<Vec<f64>>) -> Result<Allocation> {
        let problem = Problem::from_rows(supply, demand, costs)?;
        VogelSolver::default().solve(&balance(&problem))
    }

    fn penalty(value: f64, axis: Axis, index: usize) -> Penalty {
        Penalty { value, axis, index }
    }

    #[test]
    fn test_line_penalty() {
        assert_eq!(line_penalty([10.0, 19.0, 30.0].into_iter()), Some(9.0));
        assert_eq!(line_penalty([7.0].into_iter()), Some(7.0));
        assert_eq!(line_penalty([4.0, 4.0].into_iter()), Some(0.0));
        assert_eq!(line_penalty([f64::INFINITY, 3.0].into_iter()), Some(3.0));
        assert_eq!(line_penalty([f64::INFINITY].into_iter()), None);
    }

    #[test]
    fn test_select_line_prefers_highest_penalty() {
        let picked = select_line(&[
            penalty(3.0, Axis::Row, 0),
            penalty(9.0, Axis::Column, 2),
            penalty(5.0, Axis::Row, 1),
        ]);
        assert_eq!(picked, Some(penalty(9.0, Axis::Column, 2)));
    }

    #[test]
    fn test_select_line_tie_prefers_rows_then_lowest_index() {
        let picked = select_line(&[
            penalty(4.0, Axis::Column, 0),
            penalty(4.0, Axis::Row, 2),
            penalty(4.0, Axis::Row, 1),
        ]);
        assert_eq!(picked, Some(penalty(4.0, Axis::Row, 1)));

        let columns_only = select_line(&[
            penalty(2.0, Axis::Column, 3),
            penalty(2.0, Axis::Column, 1),
        ]);
        assert_eq!(columns_only, Some(penalty(2.0, Axis::Column, 1)));
    }

    #[test]
    fn test_select_line_empty() {
        assert_eq!(select_line(&[]), None);
    }

    #[test]
    fn test_classic_instance() {
        let allocation = solve(
            vec![7.0, 9.0, 18.0],
            vec![5.0, 8.0, 7.0, 14.0],
            vec![
                vec![19.0, 30.0, 50.0, 10.0],
                vec![70.0, 30.0, 40.0, 60.0],
                vec![40.0, 8.0, 70.0, 20.0],
            ],
        )
        .unwrap();

        assert_eq!(
            allocation.quantities.to_rows(),
            vec![
                vec![5.0, 0.0, 0.0, 2.0],
                vec![0.0, 0.0, 7.0, 2.0],
                vec![0.0, 8.0, 0.0, 10.0],
            ]
        );
        // column 1 carries the largest opening penalty (30 - 8)
        assert_eq!((allocation.steps[0].row, allocation.steps[0].col), (2, 1));
        assert_eq!(allocation.steps.len(), 6);
    }

    #[test]
    fn test_tied_lines_follow_comparator() {
        // Every line starts with penalty 1; row 0 wins and takes its cheapest column.
        let allocation = solve(
            vec![5.0, 5.0],
            vec![5.0, 5.0],
            vec![vec![1.0, 2.0], vec![2.0, 1.0]],
        )
        .unwrap();

        assert_eq!((allocation.steps[0].row, allocation.steps[0].col), (0, 0));
        assert_eq!(
            allocation.quantities.to_rows(),
            vec![vec![5.0, 0.0], vec![0.0, 5.0]]
        );
    }

    #[test]
    fn test_line_with_only_forbidden_routes_is_infeasible() {
        let err = solve(
            vec![5.0, 5.0],
            vec![5.0, 5.0],
            vec![vec![1.0, f64::INFINITY], vec![f64::INFINITY, f64::INFINITY]],
        )
        .unwrap_err();
        assert!(matches!(err, SolverError::Infeasible { .. }));
    }

    #[test]
    fn test_forbidden_route_is_avoided() {
        let allocation = solve(
            vec![5.0, 5.0],
            vec![5.0, 5.0],
            vec![vec![f64::INFINITY, 4.0], vec![2.0, 9.0]],
        )
        .unwrap();

        assert_eq!(
            allocation.quantities.to_rows(),
            vec![vec![0.0, 5.0], vec![5.0, 0.0]]
        );
    }
}
