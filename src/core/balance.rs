use crate::domain::model::{BalancedProblem, Dummy, DummyAxis, Problem};

/// Equalizes total supply and demand by appending a zero-cost dummy node.
///
/// Surplus supply becomes an extra demand column; surplus demand becomes an
/// extra supply row. Balanced input passes through unchanged. The caller's
/// problem is never modified.
pub fn balance(problem: &Problem) -> BalancedProblem {
    let total_supply = problem.total_supply();
    let total_demand = problem.total_demand();

    let mut supply = problem.supply.clone();
    let mut demand = problem.demand.clone();

    if total_supply > total_demand {
        let surplus = total_supply - total_demand;
        demand.push(surplus);
        tracing::debug!(surplus, "Appending dummy demand column");
        BalancedProblem {
            supply,
            costs: problem.costs.with_column(0.0),
            dummy: Some(Dummy {
                axis: DummyAxis::Column,
                index: demand.len() - 1,
                quantity: surplus,
            }),
            demand,
        }
    } else if total_supply < total_demand {
        let deficit = total_demand - total_supply;
        supply.push(deficit);
        tracing::debug!(deficit, "Appending dummy supply row");
        BalancedProblem {
            demand,
            costs: problem.costs.with_row(0.0),
            dummy: Some(Dummy {
                axis: DummyAxis::Row,
                index: supply.len() - 1,
                quantity: deficit,
            }),
            supply,
        }
    } else {
        BalancedProblem {
            supply,
            demand,
            costs: problem.costs.clone(),
            dummy: None,
        }
    }
}
