//! Provides struct for representing a constraint in an optimization problem
use std::fmt::{Display, Formatter};

/// Represents a linear upper bound constraint, where the sum of `terms` <= `upper_bound`
#[derive(Debug, Clone, PartialEq)]
pub struct Constraint {
    /// Used to identify the constraint, unique within a model
    pub id: String,
    /// Linear terms which are added together, see [`ConstraintTerm`] for more
    pub terms: Vec<ConstraintTerm>,
    /// The highest value the sum of the terms can take
    pub upper_bound: f64,
}

impl Constraint {
    /// Create a new upper bound constraint
    ///
    /// # Parameters
    /// - `id`: Identifier of the constraint
    /// - `variables`: Indices of the variables in the model
    /// - `coefficients`: Coefficients for the variables, aligned with `variables`
    /// - `upper_bound`: The right hand side of the inequality
    ///
    /// # Examples
    /// ```rust
    /// use allocopt_core::optimize::constraint::Constraint;
    /// // Represents 3*x_0 + 2*x_1 <= 6
    /// let constraint = Constraint::new_upper_bound("capacity", &[0, 1], &[3.0, 2.0], 6.);
    /// assert_eq!(constraint.terms.len(), 2);
    /// ```
    pub fn new_upper_bound(
        id: &str,
        variables: &[usize],
        coefficients: &[f64],
        upper_bound: f64,
    ) -> Self {
        Constraint {
            id: id.to_string(),
            terms: Constraint::zip_into_terms(variables, coefficients),
            upper_bound,
        }
    }

    /// Take a slice of variable indices, and a slice of coefficients and zip
    /// them together into a vec of ConstraintTerms
    fn zip_into_terms(variables: &[usize], coefficients: &[f64]) -> Vec<ConstraintTerm> {
        variables
            .iter()
            .zip(coefficients)
            .map(|(variable, coefficient)| ConstraintTerm {
                variable: *variable,
                coefficient: *coefficient,
            })
            .collect()
    }

    /// Value of the left hand side for a vector of variable values, indexed by variable
    pub fn activity(&self, values: &[f64]) -> f64 {
        self.terms
            .iter()
            .map(|t| t.coefficient * values.get(t.variable).copied().unwrap_or(0.))
            .sum()
    }

    /// Whether the constraint holds for the given values, allowing `tolerance` of slack
    pub fn is_satisfied_by(&self, values: &[f64], tolerance: f64) -> bool {
        self.activity(values) <= self.upper_bound + tolerance
    }
}

impl Display for Constraint {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.terms.is_empty() {
            return write!(f, "{}: 0 <= {}", self.id, self.upper_bound);
        }
        let lhs = self
            .terms
            .iter()
            .map(|t| t.to_string())
            .collect::<Vec<_>>()
            .join(" + ");
        write!(f, "{}: {} <= {}", self.id, lhs, self.upper_bound)
    }
}

/// Represents a single term in a constraint, specifically
/// represents the multiplication of the `variable` by the `coefficient`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstraintTerm {
    /// Index of the variable in the model
    pub variable: usize,
    /// The coefficient for the variable
    pub coefficient: f64,
}

impl Display for ConstraintTerm {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}*x_{}", self.coefficient, self.variable)
    }
}
