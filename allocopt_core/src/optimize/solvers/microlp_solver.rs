//! Implements a solver interface for microlp
use std::time::{Duration, Instant};

use indexmap::IndexMap;
use log::{debug, trace};
use microlp::{ComparisonOp, OptimizationDirection};

use crate::optimize::model::LinearModel;
use crate::optimize::objective::ObjectiveSense;
use crate::optimize::solvers::{Solver, SolverError};
use crate::optimize::variable::VariableType;
use crate::optimize::{OptimizationStatus, ProblemSolution};

/// Pure Rust simplex and branch and bound backend
#[derive(Clone, Copy, Debug, Default)]
pub struct MicrolpSolver;

impl Solver for MicrolpSolver {
    fn name(&self) -> &'static str {
        "microlp"
    }

    fn integer_variable_capable(&self) -> bool {
        true
    }

    fn solve(&self, model: &LinearModel) -> Result<ProblemSolution, SolverError> {
        self.check_capable(model)?;
        let direction = match model.objective().sense() {
            ObjectiveSense::Maximize => OptimizationDirection::Maximize,
            ObjectiveSense::Minimize => OptimizationDirection::Minimize,
        };
        let mut problem = microlp::Problem::new(direction);
        let coefficients = model.objective().coefficients(model.num_variables());
        let variables = model
            .variables()
            .zip(&coefficients)
            .map(|(var, coef)| match var.variable_type {
                VariableType::Binary => problem.add_binary_var(*coef),
                VariableType::Continuous => {
                    problem.add_var(*coef, (var.lower_bound, var.upper_bound))
                }
            })
            .collect::<Vec<_>>();

        for constraint in model.constraints() {
            let terms = constraint
                .terms
                .iter()
                .filter(|t| t.coefficient != 0.)
                .map(|t| (variables[t.variable], t.coefficient))
                .collect::<Vec<_>>();
            if terms.is_empty() {
                // 0 <= upper_bound holds or fails regardless of the variables
                if constraint.upper_bound < 0. {
                    debug!("Constraint '{}' can never be satisfied", constraint.id);
                    return Ok(ProblemSolution::without_values(
                        OptimizationStatus::Infeasible,
                        Duration::ZERO,
                    ));
                }
                continue;
            }
            trace!("Adding row {}", constraint);
            problem.add_constraint(terms, ComparisonOp::Le, constraint.upper_bound);
        }

        let start = Instant::now();
        let result = problem.solve();
        let solve_time = start.elapsed();
        match result {
            Ok(solution) => {
                let values = model
                    .variables()
                    .zip(&variables)
                    .map(|(var, backend_var)| (var.id.clone(), solution[*backend_var]))
                    .collect::<IndexMap<_, _>>();
                Ok(ProblemSolution::optimal(
                    solution.objective(),
                    values,
                    solve_time,
                ))
            }
            Err(microlp::Error::Infeasible) => Ok(ProblemSolution::without_values(
                OptimizationStatus::Infeasible,
                solve_time,
            )),
            Err(microlp::Error::Unbounded) => Ok(ProblemSolution::without_values(
                OptimizationStatus::Unbounded,
                solve_time,
            )),
            Err(err) => Err(SolverError::Backend {
                solver: self.name(),
                message: err.to_string(),
            }),
        }
    }
}
