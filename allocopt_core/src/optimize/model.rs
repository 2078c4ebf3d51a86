//! Provides struct representing a linear optimization model
use std::fmt::{Display, Formatter};

use indexmap::IndexMap;
use log::debug;
use nalgebra::{DMatrix, DVector};
use thiserror::Error;

use crate::optimize::constraint::Constraint;
use crate::optimize::objective::{Objective, ObjectiveSense, ObjectiveTerm};
use crate::optimize::variable::{Variable, VariableBuilder, VariableType};

/// A linear optimization model: variables, a linear objective and upper bound rows
#[derive(Debug, Clone, PartialEq)]
pub struct LinearModel {
    /// Name of the model, used in log messages
    name: String,
    /// Objective to optimize
    objective: Objective,
    /// Variables of the model, keyed by id, in index order
    variables: IndexMap<String, Variable>,
    /// Constraints of the model, keyed by id
    constraints: IndexMap<String, Constraint>,
    /// Type of problem
    problem_type: ProblemType,
}

impl LinearModel {
    // region Creation Functions
    /// Create a new empty model
    pub fn new(name: &str, objective_sense: ObjectiveSense) -> Self {
        Self {
            name: name.to_string(),
            objective: Objective::new(objective_sense),
            variables: IndexMap::new(),
            constraints: IndexMap::new(),
            problem_type: ProblemType::LinearContinuous,
        }
    }

    /// Create a new maximization model
    pub fn new_maximization(name: &str) -> Self {
        Self::new(name, ObjectiveSense::Maximize)
    }

    /// Create a new minimization model
    pub fn new_minimization(name: &str) -> Self {
        Self::new(name, ObjectiveSense::Minimize)
    }
    // endregion Creation Functions

    // region Adding Variables
    /// Add a variable to the model, returning its index
    ///
    /// The index of the variable is overwritten to reflect the current variable count,
    /// and binary variables have their bounds set to [0, 1].
    pub fn add_variable(&mut self, mut variable: Variable) -> Result<usize, ModelError> {
        if variable.variable_type == VariableType::Binary {
            variable.lower_bound = 0.;
            variable.upper_bound = 1.;
        }
        self.validate_variable(&variable)?;
        let index = self.variables.len();
        variable.index = index;
        if variable.variable_type == VariableType::Binary {
            self.problem_type = ProblemType::LinearMixedInteger;
        }
        self.variables.insert(variable.id.clone(), variable);
        Ok(index)
    }

    /// Create a new variable and add it to the model, returning its index
    pub fn add_new_variable(
        &mut self,
        id: &str,
        name: Option<&str>,
        variable_type: VariableType,
        lower_bound: f64,
        upper_bound: f64,
    ) -> Result<usize, ModelError> {
        let variable = VariableBuilder::default()
            .id(id)
            .name(name.map(str::to_string))
            .variable_type(variable_type)
            .lower_bound(lower_bound)
            .upper_bound(upper_bound)
            .build()
            .map_err(|e| ModelError::UnableToBuildVariable(e.to_string()))?;
        self.add_variable(variable)
    }
    // endregion Adding Variables

    // region Adding Constraints
    /// Add a constraint to the model
    pub fn add_constraint(&mut self, constraint: Constraint) -> Result<(), ModelError> {
        self.validate_constraint(&constraint)?;
        self.constraints.insert(constraint.id.clone(), constraint);
        Ok(())
    }

    /// Create a new constraint with one coefficient per model variable, in index order,
    /// and add it to the model
    pub fn add_new_upper_bound_constraint(
        &mut self,
        id: &str,
        coefficients: &[f64],
        upper_bound: f64,
    ) -> Result<(), ModelError> {
        if coefficients.len() != self.variables.len() {
            return Err(ModelError::CoefficientCountMismatch {
                id: id.to_string(),
                expected: self.variables.len(),
                found: coefficients.len(),
            });
        }
        let variables = (0..coefficients.len()).collect::<Vec<_>>();
        self.add_constraint(Constraint::new_upper_bound(
            id,
            &variables,
            coefficients,
            upper_bound,
        ))
    }

    /// Create a new constraint using variable ids rather than variable indices, and add it
    /// to the model
    pub fn add_new_upper_bound_constraint_by_id(
        &mut self,
        id: &str,
        variables: &[&str],
        coefficients: &[f64],
        upper_bound: f64,
    ) -> Result<(), ModelError> {
        if variables.len() != coefficients.len() {
            return Err(ModelError::CoefficientCountMismatch {
                id: id.to_string(),
                expected: variables.len(),
                found: coefficients.len(),
            });
        }
        let indices = variables
            .iter()
            .map(|v_id| {
                self.variables
                    .get_index_of(*v_id)
                    .ok_or_else(|| ModelError::NonExistentVariablesInConstraint(id.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        self.add_constraint(Constraint::new_upper_bound(
            id,
            &indices,
            coefficients,
            upper_bound,
        ))
    }
    // endregion Adding Constraints

    // region Adding Objective Terms
    /// Add a new linear term to the objective
    pub fn add_new_linear_objective_term(
        &mut self,
        variable: usize,
        coefficient: f64,
    ) -> Result<(), ModelError> {
        if variable >= self.variables.len() {
            return Err(ModelError::NonExistentVariablesInObjective);
        }
        if !coefficient.is_finite() {
            return Err(ModelError::NonFiniteCoefficient("objective".to_string()));
        }
        self.objective.add_term(ObjectiveTerm::new(variable, coefficient));
        Ok(())
    }

    /// Add a new linear term to the objective using the variable id
    pub fn add_new_linear_objective_term_by_id(
        &mut self,
        variable_id: &str,
        coefficient: f64,
    ) -> Result<(), ModelError> {
        match self.variables.get_index_of(variable_id) {
            Some(index) => self.add_new_linear_objective_term(index, coefficient),
            None => Err(ModelError::NonExistentVariablesInObjective),
        }
    }
    // endregion Adding Objective Terms

    // region Validation Functions
    /// Check that a variable to be added is valid to add to this model
    fn validate_variable(&self, variable: &Variable) -> Result<(), ModelError> {
        if self.variables.contains_key(&variable.id) {
            return Err(ModelError::VariableIdAlreadyExists(variable.id.clone()));
        }
        if variable.lower_bound.is_nan()
            || variable.upper_bound.is_nan()
            || variable.lower_bound > variable.upper_bound
        {
            return Err(ModelError::InvalidVariableBounds(variable.id.clone()));
        }
        Ok(())
    }

    /// Check that a constraint to be added is valid to add to this model
    fn validate_constraint(&self, constraint: &Constraint) -> Result<(), ModelError> {
        if self.constraints.contains_key(&constraint.id) {
            return Err(ModelError::ConstraintAlreadyExists(constraint.id.clone()));
        }
        if !constraint.upper_bound.is_finite() {
            return Err(ModelError::InvalidConstraintBound(constraint.id.clone()));
        }
        if constraint.terms.iter().any(|t| !t.coefficient.is_finite()) {
            return Err(ModelError::NonFiniteCoefficient(constraint.id.clone()));
        }
        let mut seen = vec![false; self.variables.len()];
        for term in &constraint.terms {
            match seen.get(term.variable) {
                Some(false) => seen[term.variable] = true,
                _ => {
                    return Err(ModelError::NonExistentVariablesInConstraint(
                        constraint.id.clone(),
                    ))
                }
            }
        }
        Ok(())
    }
    // endregion Validation Functions

    // region Inspect Model
    /// Name of the model
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Objective of the model
    pub fn objective(&self) -> &Objective {
        &self.objective
    }

    /// Variables in index order
    pub fn variables(&self) -> impl Iterator<Item = &Variable> {
        self.variables.values()
    }

    /// Variable with the given id
    pub fn variable(&self, id: &str) -> Option<&Variable> {
        self.variables.get(id)
    }

    /// Constraints in insertion order
    pub fn constraints(&self) -> impl Iterator<Item = &Constraint> {
        self.constraints.values()
    }

    pub fn num_variables(&self) -> usize {
        self.variables.len()
    }

    pub fn num_constraints(&self) -> usize {
        self.constraints.len()
    }

    pub fn problem_type(&self) -> ProblemType {
        self.problem_type
    }

    pub fn has_integer_variables(&self) -> bool {
        self.variables
            .values()
            .any(|v| v.variable_type == VariableType::Binary)
    }

    /// Dense constraint matrix, one row per constraint and one column per variable
    pub fn constraint_matrix(&self) -> DMatrix<f64> {
        let mut matrix = DMatrix::zeros(self.constraints.len(), self.variables.len());
        for (row, constraint) in self.constraints.values().enumerate() {
            for term in &constraint.terms {
                matrix[(row, term.variable)] += term.coefficient;
            }
        }
        matrix
    }

    /// Right hand sides of the constraints, in constraint order
    pub fn constraint_bounds(&self) -> DVector<f64> {
        DVector::from_iterator(
            self.constraints.len(),
            self.constraints.values().map(|c| c.upper_bound),
        )
    }

    /// Objective coefficient of every variable, in index order
    pub fn objective_coefficients(&self) -> DVector<f64> {
        DVector::from_vec(self.objective.coefficients(self.variables.len()))
    }

    /// Evaluate the objective for a vector of variable values in index order
    pub fn evaluate_objective(&self, values: &[f64]) -> f64 {
        self.objective.evaluate(values)
    }

    /// Check a vector of variable values, in index order, against variable bounds and
    /// every constraint, allowing `tolerance` of slack
    pub fn is_feasible(&self, values: &[f64], tolerance: f64) -> bool {
        if values.len() != self.variables.len() {
            return false;
        }
        let within_bounds = self.variables.values().zip(values).all(|(var, value)| {
            *value >= var.lower_bound - tolerance && *value <= var.upper_bound + tolerance
        });
        if !within_bounds {
            return false;
        }
        let x = DVector::from_column_slice(values);
        let activity = self.constraint_matrix() * x;
        activity
            .iter()
            .zip(self.constraint_bounds().iter())
            .all(|(lhs, rhs)| *lhs <= *rhs + tolerance)
    }
    // endregion Inspect Model

    pub(crate) fn log_summary(&self) {
        debug!(
            "Model '{}': {} variables, {} constraints, {:?}",
            self.name,
            self.variables.len(),
            self.constraints.len(),
            self.problem_type
        );
    }
}

impl Display for LinearModel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let sense = match self.objective.sense() {
            ObjectiveSense::Maximize => "maximize",
            ObjectiveSense::Minimize => "minimize",
        };
        let objective = self
            .objective
            .terms()
            .iter()
            .map(|t| format!("{}*x_{}", t.coef, t.var))
            .collect::<Vec<_>>()
            .join(" + ");
        writeln!(f, "{} {}", sense, if objective.is_empty() { "0" } else { objective.as_str() })?;
        writeln!(f, "subject to")?;
        for constraint in self.constraints.values() {
            writeln!(f, "  {}", constraint)?;
        }
        for variable in self.variables.values() {
            writeln!(
                f,
                "  x_{} ({}) in [{}, {}]",
                variable.index, variable, variable.lower_bound, variable.upper_bound
            )?;
        }
        Ok(())
    }
}

/// Types of optimization problems
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProblemType {
    /// Problem with linear objectives and constraints, and continuous variables
    LinearContinuous,
    /// Problem with linear objective and constraints, with binary and continuous variables
    LinearMixedInteger,
}

/// Errors associated with building a [`LinearModel`]
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    /// Error when trying to add a variable with the same id as an existing variable
    #[error("Tried to add variable '{0}' with the same id as an existing variable")]
    VariableIdAlreadyExists(String),
    /// Error when trying to add variable with invalid bounds
    #[error("Tried to add variable '{0}' with lower_bound > upper_bound")]
    InvalidVariableBounds(String),
    /// Error when the variable builder rejects its inputs
    #[error("Unable to build variable: {0}")]
    UnableToBuildVariable(String),
    /// Error when trying to add a constraint with the same id as an existing constraint
    #[error("Tried to add constraint '{0}' with the same id as an existing constraint")]
    ConstraintAlreadyExists(String),
    /// Error when trying to add a constraint with a bound that is not a finite number
    #[error("Tried to add constraint '{0}' with an invalid bound")]
    InvalidConstraintBound(String),
    /// Error when a constraint, or the objective, has a coefficient that is not finite
    #[error("Tried to add '{0}' with a coefficient that is not finite")]
    NonFiniteCoefficient(String),
    /// Error when the number of coefficients does not match the number of variables
    #[error("Constraint '{id}' has {found} coefficients, expected {expected}")]
    CoefficientCountMismatch {
        id: String,
        expected: usize,
        found: usize,
    },
    /// Error when trying to add a constraint that contains variables not in the model,
    /// or that repeats a variable
    #[error("Tried to add constraint '{0}' with variables not in the model")]
    NonExistentVariablesInConstraint(String),
    /// Error when trying to add an objective term which includes variables not in the model
    #[error("Tried adding an objective term with variables not in the model")]
    NonExistentVariablesInObjective,
}
