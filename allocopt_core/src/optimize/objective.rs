//! Provides struct for representing an optimization problem's objective

/// Represents the Objective of an optimization problem
#[derive(Debug, Clone, PartialEq)]
pub struct Objective {
    /// Terms included in the objective (See [`ObjectiveTerm`])
    pub(crate) terms: Vec<ObjectiveTerm>,
    /// Sense of the objective (maximize, or minimize), see [`ObjectiveSense`]
    pub(crate) sense: ObjectiveSense,
}

impl Objective {
    /// Create a new empty objective, with a given sense
    pub fn new(sense: ObjectiveSense) -> Self {
        Self {
            terms: Vec::new(),
            sense,
        }
    }

    /// Create a new empty maximization objective
    pub fn new_maximize() -> Self {
        Self::new(ObjectiveSense::Maximize)
    }

    /// Create a new empty minimization objective
    pub fn new_minimize() -> Self {
        Self::new(ObjectiveSense::Minimize)
    }

    /// Change the sense of the objective
    pub fn set_sense(&mut self, sense: ObjectiveSense) {
        self.sense = sense;
    }

    /// Sense of the objective
    pub fn sense(&self) -> ObjectiveSense {
        self.sense
    }

    /// Terms of the objective
    pub fn terms(&self) -> &[ObjectiveTerm] {
        &self.terms
    }

    /// Add a new term to the objective
    pub fn add_term(&mut self, term: ObjectiveTerm) {
        self.terms.push(term);
    }

    /// Add a series of linear terms to the objective function
    pub fn add_terms(&mut self, variables: &[usize], coefficients: &[f64]) {
        self.terms.extend(
            variables
                .iter()
                .zip(coefficients)
                .map(|(var, coef)| ObjectiveTerm::new(*var, *coef)),
        );
    }

    /// Remove all terms from the objective
    pub fn remove_all_terms(&mut self) {
        self.terms.clear();
    }

    /// Summed coefficient of every variable, indexed by variable, for a model with
    /// `num_variables` variables
    pub fn coefficients(&self, num_variables: usize) -> Vec<f64> {
        let mut coefficients = vec![0.; num_variables];
        for term in &self.terms {
            if let Some(c) = coefficients.get_mut(term.var) {
                *c += term.coef;
            }
        }
        coefficients
    }

    /// Evaluate the objective for a vector of variable values, indexed by variable
    pub fn evaluate(&self, values: &[f64]) -> f64 {
        self.terms
            .iter()
            .map(|t| t.coef * values.get(t.var).copied().unwrap_or(0.))
            .sum()
    }
}

/// Represents the sense of the objective, whether it should be maximized or minimized
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectiveSense {
    /// The objective should be minimized
    Minimize,
    /// The objective should be maximized
    Maximize,
}

/// A linear term in the objective
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObjectiveTerm {
    /// Index of the variable in the model
    pub var: usize,
    /// Coefficient for the term
    pub coef: f64,
}

impl ObjectiveTerm {
    /// Create a new linear objective term
    pub fn new(var: usize, coef: f64) -> Self {
        ObjectiveTerm { var, coef }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coefficients_accumulate() {
        let mut objective = Objective::new_maximize();
        objective.add_terms(&[0, 1], &[10., 15.]);
        objective.add_term(ObjectiveTerm::new(1, 5.));
        assert_eq!(objective.coefficients(3), vec![10., 20., 0.]);
        assert!((objective.evaluate(&[1., 2.]) - 50.).abs() < 1e-12);
        objective.remove_all_terms();
        assert!(objective.terms().is_empty());
    }

    #[test]
    fn sense() {
        let mut objective = Objective::new_minimize();
        assert_eq!(objective.sense(), ObjectiveSense::Minimize);
        objective.set_sense(ObjectiveSense::Maximize);
        assert_eq!(objective.sense(), ObjectiveSense::Maximize);
    }
}
