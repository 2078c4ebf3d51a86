//! Interfaces to the linear and mixed integer programming backends
use thiserror::Error;

use crate::optimize::model::{LinearModel, ProblemType};
use crate::optimize::ProblemSolution;

#[cfg(feature = "highs")]
pub mod highs_solver;
#[cfg(feature = "microlp")]
pub mod microlp_solver;

cfg_if::cfg_if! {
    if #[cfg(feature = "microlp")] {
        /// Backend used when the caller does not provide one
        pub type DefaultSolver = microlp_solver::MicrolpSolver;
    } else if #[cfg(feature = "highs")] {
        /// Backend used when the caller does not provide one
        pub type DefaultSolver = highs_solver::HighsSolver;
    } else {
        compile_error!("allocopt_core requires the `microlp` or `highs` feature");
    }
}

/// An optimization backend
///
/// Implementations solve a [`LinearModel`] synchronously. Statuses other than optimal
/// are reported through [`ProblemSolution::status`]; `Err` is reserved for faults of the
/// backend itself.
pub trait Solver {
    /// Short name of the backend, used in log messages and errors
    fn name(&self) -> &'static str;

    /// Whether the backend can handle binary variables
    fn integer_variable_capable(&self) -> bool;

    /// Solve the model to optimality
    fn solve(&self, model: &LinearModel) -> Result<ProblemSolution, SolverError>;

    /// Check that the backend can handle the model
    fn check_capable(&self, model: &LinearModel) -> Result<(), SolverError> {
        if model.problem_type() == ProblemType::LinearMixedInteger
            && !self.integer_variable_capable()
        {
            return Err(SolverError::UnsupportedProblemType {
                solver: self.name(),
                problem_type: model.problem_type(),
            });
        }
        Ok(())
    }
}

/// Create the default backend
pub fn default_solver() -> DefaultSolver {
    DefaultSolver::default()
}

/// Faults of an optimization backend
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolverError {
    /// The backend can't handle this kind of model
    #[error("Solver {solver} does not support {problem_type:?} models")]
    UnsupportedProblemType {
        solver: &'static str,
        problem_type: ProblemType,
    },
    /// The backend failed for a reason unrelated to feasibility
    #[error("Solver {solver} failed: {message}")]
    Backend {
        solver: &'static str,
        message: String,
    },
}
