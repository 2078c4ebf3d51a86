//! Module for constructing and solving optimization models

pub mod constraint;
pub mod model;
pub mod objective;
pub mod solvers;
pub mod variable;

use std::fmt::{Display, Formatter};
use std::time::Duration;

use indexmap::IndexMap;

/// Struct representing the raw solution of an optimization model, as reported by a
/// [`Solver`](solvers::Solver)
#[derive(Debug, Clone, PartialEq)]
pub struct ProblemSolution {
    /// The status of the optimization problem, representing if the optimization was
    /// completed successfully
    pub status: OptimizationStatus,
    /// Optimized value of the objective
    ///
    /// Some(f64) if the optimization was completed successfully, None otherwise
    pub objective_value: Option<f64>,
    /// Values of the variables at the optimum,
    ///
    /// Some(IndexMap), keyed by variable id in variable index order, with values
    /// corresponding to variable values at optimum if the problem could be solved,
    /// None otherwise
    pub variable_values: Option<IndexMap<String, f64>>,
    /// Wall clock time the backend spent solving
    pub solve_time: Duration,
}

impl ProblemSolution {
    /// Create an optimal solution
    pub fn optimal(
        objective_value: f64,
        variable_values: IndexMap<String, f64>,
        solve_time: Duration,
    ) -> Self {
        Self {
            status: OptimizationStatus::Optimal,
            objective_value: Some(objective_value),
            variable_values: Some(variable_values),
            solve_time,
        }
    }

    /// Create a solution for a model which could not be solved to optimality
    pub fn without_values(status: OptimizationStatus, solve_time: Duration) -> Self {
        Self {
            status,
            objective_value: None,
            variable_values: None,
            solve_time,
        }
    }

    /// Values of the variables in index order, if the model was solved
    pub fn values(&self) -> Option<Vec<f64>> {
        self.variable_values
            .as_ref()
            .map(|values| values.values().copied().collect())
    }
}

/// Status of an optimization problem
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum OptimizationStatus {
    /// Problem has been optimized
    Optimal,
    /// Problem can't be optimized because objective value is not bounded
    Unbounded,
    /// Problem can't be solved because it is infeasible (conflicting constraints)
    Infeasible,
    /// A numerical error occurred during solving
    NumericalError,
    /// The solver hit the maximum allowed iterations, or max time, or made insufficient progress
    SolverHalted,
}

impl OptimizationStatus {
    pub fn is_optimal(&self) -> bool {
        matches!(self, OptimizationStatus::Optimal)
    }
}

impl Display for OptimizationStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            OptimizationStatus::Optimal => write!(f, "OPTIMAL"),
            OptimizationStatus::Unbounded => write!(f, "UNBOUNDED"),
            OptimizationStatus::Infeasible => write!(f, "INFEASIBLE"),
            OptimizationStatus::NumericalError => write!(f, "NUMERICAL_ERROR"),
            OptimizationStatus::SolverHalted => write!(f, "SOLVER_HALTED"),
        }
    }
}
