//! Problem variants and the solve pipeline
//!
//! A solve runs the raw table through the [`Validator`], builds a [`LinearModel`] with one
//! variable per entry and one row per capacity constraint, hands it to a [`Solver`] and
//! turns the solved values into a variant specific solution.
use std::time::Duration;

use indexmap::IndexMap;
use log::{info, warn};
use thiserror::Error;

use crate::configuration::Configuration;
use crate::io::raw::{RawAllocationInput, RawSelectionInput};
use crate::io::validate::{InputError, Validator};
use crate::optimize::model::{LinearModel, ModelError};
use crate::optimize::solvers::{default_solver, Solver, SolverError};
use crate::optimize::variable::VariableType;
use crate::problem::item::Item;
use crate::problem::product::Product;
use crate::problem::{Entry, Problem};
use crate::solution::{AllocationSolution, SelectionSolution, SolveOutcome};

/// A kind of allocation problem
///
/// The variants share validation of constraints and model building, and differ in the
/// domain of their variables and in how solved values are reported.
pub trait ProblemVariant {
    /// Unvalidated table the variant is solved from
    type Raw;
    /// Validated row type
    type Entry: Entry;
    /// Reported result of a successful solve
    type Solution;

    /// Name of the variant, also used as the model name
    fn name(&self) -> &'static str;

    /// Domain of the decision variables
    fn variable_type(&self) -> VariableType;

    /// Check the raw table and turn it into a [`Problem`]
    fn validate(
        &self,
        raw: &Self::Raw,
        validator: &Validator,
    ) -> Result<Problem<Self::Entry>, InputError>;

    /// Build the maximization model of a validated problem
    ///
    /// Entry `i` becomes the variable `x_i`, labelled with the entry label, with the entry's
    /// objective coefficient. Each capacity constraint becomes one `<=` row, in declared
    /// order.
    fn build_model(&self, problem: &Problem<Self::Entry>) -> Result<LinearModel, ModelError> {
        let mut model = LinearModel::new_maximization(self.name());
        for (i, entry) in problem.entries().iter().enumerate() {
            let index = model.add_new_variable(
                &format!("x_{}", i),
                Some(entry.label().as_str()),
                self.variable_type(),
                0.,
                f64::INFINITY,
            )?;
            model.add_new_linear_objective_term(index, entry.objective_coefficient())?;
        }
        for constraint in problem.constraints() {
            model.add_new_upper_bound_constraint(
                &constraint.name,
                &constraint.values,
                constraint.max,
            )?;
        }
        model.log_summary();
        Ok(model)
    }

    /// Turn solved variable values, in entry order, into the reported solution
    fn extract(
        &self,
        problem: &Problem<Self::Entry>,
        values: &[f64],
        objective_value: f64,
        solve_time: Duration,
        config: &Configuration,
    ) -> Self::Solution;
}

// region Variants
/// 0/1 selection of items (knapsack)
#[derive(Debug, Clone, Copy, Default)]
pub struct SelectionVariant;

impl ProblemVariant for SelectionVariant {
    type Raw = RawSelectionInput;
    type Entry = Item;
    type Solution = SelectionSolution;

    fn name(&self) -> &'static str {
        "knapsack"
    }

    fn variable_type(&self) -> VariableType {
        VariableType::Binary
    }

    fn validate(
        &self,
        raw: &RawSelectionInput,
        validator: &Validator,
    ) -> Result<Problem<Item>, InputError> {
        validator.validate_selection(raw)
    }

    fn extract(
        &self,
        problem: &Problem<Item>,
        values: &[f64],
        objective_value: f64,
        solve_time: Duration,
        config: &Configuration,
    ) -> SelectionSolution {
        let selected = problem
            .entries()
            .iter()
            .zip(values)
            .filter(|(_, value)| **value > config.selection_threshold)
            .map(|(item, _)| item.index)
            .collect();
        SelectionSolution {
            selected,
            objective_value,
            solve_time_seconds: solve_time.as_secs_f64(),
        }
    }
}

/// Continuous production levels of products (production planning)
#[derive(Debug, Clone, Copy, Default)]
pub struct AllocationVariant;

impl ProblemVariant for AllocationVariant {
    type Raw = RawAllocationInput;
    type Entry = Product;
    type Solution = AllocationSolution;

    fn name(&self) -> &'static str {
        "production_planning"
    }

    fn variable_type(&self) -> VariableType {
        VariableType::Continuous
    }

    fn validate(
        &self,
        raw: &RawAllocationInput,
        validator: &Validator,
    ) -> Result<Problem<Product>, InputError> {
        validator.validate_allocation(raw)
    }

    fn extract(
        &self,
        problem: &Problem<Product>,
        values: &[f64],
        objective_value: f64,
        solve_time: Duration,
        _config: &Configuration,
    ) -> AllocationSolution {
        // Later products overwrite earlier ones sharing a name
        let levels = problem
            .entries()
            .iter()
            .zip(values)
            .map(|(product, level)| (product.name.clone(), *level))
            .collect::<IndexMap<_, _>>();
        AllocationSolution {
            levels,
            objective_value,
            solve_time_seconds: solve_time.as_secs_f64(),
        }
    }
}
// endregion Variants

// region Solving
/// Validate a raw table and solve it
pub fn solve<V, S>(
    variant: &V,
    raw: &V::Raw,
    solver: &S,
    config: &Configuration,
) -> Result<SolveOutcome<V::Solution>, SolveError>
where
    V: ProblemVariant,
    S: Solver + ?Sized,
{
    let problem = variant.validate(raw, &Validator::new(config))?;
    solve_problem(variant, &problem, solver, config)
}

/// Solve an already validated problem
///
/// A problem without entries is not handed to the backend: its solution is empty with an
/// objective value of 0.
pub fn solve_problem<V, S>(
    variant: &V,
    problem: &Problem<V::Entry>,
    solver: &S,
    config: &Configuration,
) -> Result<SolveOutcome<V::Solution>, SolveError>
where
    V: ProblemVariant,
    S: Solver + ?Sized,
{
    if problem.is_empty() {
        info!("{} problem has no entries, skipping solve", variant.name());
        return Ok(SolveOutcome::Solved(variant.extract(
            problem,
            &[],
            0.,
            Duration::ZERO,
            config,
        )));
    }

    let model = variant.build_model(problem)?;
    info!(
        "Solving {} problem ({} entries, {} constraints) with {}",
        variant.name(),
        problem.len(),
        problem.num_constraints(),
        solver.name()
    );
    let solution = solver.solve(&model)?;
    if !solution.status.is_optimal() {
        warn!(
            "{} problem not solved to optimality: {}",
            variant.name(),
            solution.status
        );
        return Ok(SolveOutcome::NoSolution);
    }

    let (objective_value, values) = match (solution.objective_value, solution.values()) {
        (Some(objective_value), Some(values)) if values.len() == problem.len() => {
            (objective_value, values)
        }
        _ => {
            return Err(SolveError::Solver(SolverError::Backend {
                solver: solver.name(),
                message: "optimal status reported without a complete set of values".to_string(),
            }))
        }
    };
    if !objective_value.is_finite() || values.iter().any(|v| !v.is_finite()) {
        warn!(
            "{} reported an optimal {} solution with non-finite values, objective {}",
            solver.name(),
            variant.name(),
            objective_value
        );
        return Ok(SolveOutcome::NoSolution);
    }
    if !model.is_feasible(&values, config.feasibility_tolerance) {
        warn!(
            "Values reported by {} violate the {} model by more than {}",
            solver.name(),
            variant.name(),
            config.feasibility_tolerance
        );
    }
    info!(
        "Solved {} problem in {:?}, objective value {}",
        variant.name(),
        solution.solve_time,
        objective_value
    );
    Ok(SolveOutcome::Solved(variant.extract(
        problem,
        &values,
        objective_value,
        solution.solve_time,
        config,
    )))
}

/// Solve a selection table with the process wide configuration and the default backend
///
/// # Examples
/// ```rust
/// use allocopt_core::io::RawSelectionInput;
/// use allocopt_core::variant::solve_selection;
/// let raw = RawSelectionInput::from_values(&["10", "40", "30", "50"])
///     .with_constraint("weight", "10", &["5", "4", "6", "3"]);
/// let solution = solve_selection(&raw).unwrap().into_solution().unwrap();
/// assert_eq!(solution.selected, vec![1, 3]);
/// ```
pub fn solve_selection(
    raw: &RawSelectionInput,
) -> Result<SolveOutcome<SelectionSolution>, SolveError> {
    solve(
        &SelectionVariant,
        raw,
        &default_solver(),
        &Configuration::current(),
    )
}

/// Solve an allocation table with the process wide configuration and the default backend
pub fn solve_allocation(
    raw: &RawAllocationInput,
) -> Result<SolveOutcome<AllocationSolution>, SolveError> {
    solve(
        &AllocationVariant,
        raw,
        &default_solver(),
        &Configuration::current(),
    )
}
// endregion Solving

/// Errors preventing a solve
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolveError {
    /// The table was rejected, nothing was solved
    #[error("Input Error: {0}")]
    Input(#[from] InputError),
    #[error("Unable to build model: {0}")]
    Model(#[from] ModelError),
    #[error("Backend failure: {0}")]
    Solver(#[from] SolverError),
}

impl SolveError {
    /// Whether the user can fix the error by editing the table
    pub fn is_recoverable(&self) -> bool {
        matches!(self, SolveError::Input(_))
    }
}
