//! Implements a solver interface for HiGHS
use std::time::Instant;

use highs::{HighsModelStatus, RowProblem, Sense};
use indexmap::IndexMap;

use crate::optimize::model::LinearModel;
use crate::optimize::objective::ObjectiveSense;
use crate::optimize::solvers::{Solver, SolverError};
use crate::optimize::variable::VariableType;
use crate::optimize::{OptimizationStatus, ProblemSolution};

/// Backend using the HiGHS linear and mixed integer solver, requires the highs feature
#[derive(Clone, Copy, Debug, Default)]
pub struct HighsSolver;

impl Solver for HighsSolver {
    fn name(&self) -> &'static str {
        "highs"
    }

    fn integer_variable_capable(&self) -> bool {
        true
    }

    fn solve(&self, model: &LinearModel) -> Result<ProblemSolution, SolverError> {
        self.check_capable(model)?;
        let mut problem = RowProblem::default();
        let coefficients = model.objective().coefficients(model.num_variables());
        let columns = model
            .variables()
            .zip(&coefficients)
            .map(|(var, coef)| match var.variable_type {
                VariableType::Binary => problem.add_integer_column(*coef, 0.0..=1.0),
                VariableType::Continuous => {
                    problem.add_column(*coef, var.lower_bound..=var.upper_bound)
                }
            })
            .collect::<Vec<_>>();
        for constraint in model.constraints() {
            problem.add_row(
                ..=constraint.upper_bound,
                constraint
                    .terms
                    .iter()
                    .map(|t| (columns[t.variable], t.coefficient)),
            );
        }
        let sense = match model.objective().sense() {
            ObjectiveSense::Maximize => Sense::Maximise,
            ObjectiveSense::Minimize => Sense::Minimise,
        };
        let mut highs_model = problem.optimise(sense);
        highs_model.make_quiet();

        let start = Instant::now();
        let solved = highs_model.try_solve().map_err(|status| SolverError::Backend {
            solver: self.name(),
            message: format!("{:?}", status),
        })?;
        let solve_time = start.elapsed();

        let status = optimization_status(solved.status());
        if !status.is_optimal() {
            return Ok(ProblemSolution::without_values(status, solve_time));
        }
        let solution = solved.get_solution();
        let values = solution.columns();
        let variable_values = model
            .variables()
            .zip(values)
            .map(|(var, value)| (var.id.clone(), *value))
            .collect::<IndexMap<_, _>>();
        Ok(ProblemSolution::optimal(
            model.evaluate_objective(values),
            variable_values,
            solve_time,
        ))
    }
}

/// Map a HiGHS model status onto an [`OptimizationStatus`]
fn optimization_status(status: HighsModelStatus) -> OptimizationStatus {
    match status {
        HighsModelStatus::Optimal => OptimizationStatus::Optimal,
        HighsModelStatus::Infeasible => OptimizationStatus::Infeasible,
        HighsModelStatus::Unbounded | HighsModelStatus::UnboundedOrInfeasible => {
            OptimizationStatus::Unbounded
        }
        HighsModelStatus::ReachedTimeLimit | HighsModelStatus::ReachedIterationLimit => {
            OptimizationStatus::SolverHalted
        }
        _ => OptimizationStatus::NumericalError,
    }
}
