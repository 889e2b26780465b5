use crate::core::matrix::Matrix;
use crate::utils::error::{Result, SolverError};
use crate::utils::validation::{
    validate_dimension, validate_finite, validate_non_negative, validate_not_empty, Validate,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An unbalanced transportation problem as supplied by the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct Problem {
    pub supply: Vec<f64>,
    pub demand: Vec<f64>,
    pub costs: Matrix<f64>,
}

impl Problem {
    /// Builds and validates a problem. Forbidden routes are `f64::INFINITY`.
    pub fn new(supply: Vec<f64>, demand: Vec<f64>, costs: Matrix<f64>) -> Result<Self> {
        let problem = Self {
            supply,
            demand,
            costs,
        };
        problem.validate()?;
        Ok(problem)
    }

    pub fn from_rows(supply: Vec<f64>, demand: Vec<f64>, costs: Vec<Vec<f64>>) -> Result<Self> {
        let expected = costs.first().map(Vec::len).unwrap_or(0);
        if let Some((row, found)) = costs
            .iter()
            .enumerate()
            .map(|(i, r)| (i, r.len()))
            .find(|&(_, len)| len != expected)
        {
            return Err(SolverError::RaggedMatrix {
                row,
                expected,
                found,
            });
        }
        let costs = Matrix::from_rows(costs).ok_or_else(|| SolverError::InvariantViolation {
            message: "cost rows passed the length check but are ragged".to_string(),
        })?;
        Self::new(supply, demand, costs)
    }

    pub fn total_supply(&self) -> f64 {
        self.supply.iter().sum()
    }

    pub fn total_demand(&self) -> f64 {
        self.demand.iter().sum()
    }
}

impl Validate for Problem {
    fn validate(&self) -> Result<()> {
        validate_not_empty("supply", &self.supply)?;
        validate_not_empty("demand", &self.demand)?;
        validate_finite("supply", &self.supply)?;
        validate_finite("demand", &self.demand)?;
        validate_non_negative("supply", &self.supply)?;
        validate_non_negative("demand", &self.demand)?;
        validate_dimension("cost rows", self.supply.len(), self.costs.rows())?;
        validate_dimension("cost columns", self.demand.len(), self.costs.cols())?;
        for i in 0..self.costs.rows() {
            validate_non_negative("costs", self.costs.row(i))?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Method {
    #[serde(rename = "least_cost")]
    LeastCost,
    #[serde(rename = "vam")]
    Vogel,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::LeastCost => "least_cost",
            Method::Vogel => "vam",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Method {
    type Err = SolverError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "least_cost" | "least-cost" | "minimo_costo" => Ok(Method::LeastCost),
            "vam" | "vogel" => Ok(Method::Vogel),
            _ => Err(SolverError::UnknownMethod {
                method: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DummyAxis {
    Row,
    Column,
}

/// The synthetic node appended by the balancer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dummy {
    pub axis: DummyAxis,
    pub index: usize,
    pub quantity: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BalancedProblem {
    pub supply: Vec<f64>,
    pub demand: Vec<f64>,
    pub costs: Matrix<f64>,
    pub dummy: Option<Dummy>,
}

impl BalancedProblem {
    pub fn rows(&self) -> usize {
        self.supply.len()
    }

    pub fn cols(&self) -> usize {
        self.demand.len()
    }

    /// Upper bound on solver iterations: each one closes at least one cell.
    pub fn iteration_limit(&self) -> usize {
        self.rows() * self.cols()
    }
}

/// One allocation decision taken by a solver.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Step {
    pub row: usize,
    pub col: usize,
    pub quantity: f64,
    pub cost: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Allocation {
    pub quantities: Matrix<f64>,
    pub steps: Vec<Step>,
}

impl Allocation {
    pub fn empty(rows: usize, cols: usize) -> Self {
        Self {
            quantities: Matrix::filled(rows, cols, 0.0),
            steps: Vec::new(),
        }
    }

    pub fn record(&mut self, row: usize, col: usize, quantity: f64, cost: f64) {
        self.quantities[(row, col)] += quantity;
        self.steps.push(Step {
            row,
            col,
            quantity,
            cost,
        });
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    pub method: Method,
    pub allocation: Matrix<f64>,
    pub steps: Vec<Step>,
    pub total_cost: f64,
    pub dummy: Option<Dummy>,
}

impl Solution {
    /// Mass absorbed by the dummy node, i.e. unused supply or unmet demand.
    pub fn unmet(&self) -> f64 {
        self.dummy.map(|d| d.quantity).unwrap_or(0.0)
    }

    /// Mass shipped over real routes.
    pub fn shipped(&self) -> f64 {
        self.allocation.total() - self.unmet()
    }

    /// Allocation with every cell rounded to a whole number.
    pub fn rounded_allocation(&self, trim_dummy: bool) -> Vec<Vec<i64>> {
        let (skip_row, skip_col) = match (trim_dummy, self.dummy) {
            (true, Some(Dummy { axis: DummyAxis::Row, index, .. })) => (Some(index), None),
            (true, Some(Dummy { axis: DummyAxis::Column, index, .. })) => (None, Some(index)),
            _ => (None, None),
        };

        (0..self.allocation.rows())
            .filter(|&i| Some(i) != skip_row)
            .map(|i| {
                self.allocation
                    .row(i)
                    .iter()
                    .enumerate()
                    .filter(|&(j, _)| Some(j) != skip_col)
                    .map(|(_, q)| q.round() as i64)
                    .collect()
            })
            .collect()
    }
}
