//! Module providing the validated problem data handed to the model builder

pub mod capacity;
pub mod item;
pub mod product;

use indexmap::IndexMap;
use serde::Serialize;

use crate::problem::capacity::CapacityConstraint;

/// A row of the problem table: an item or a product
pub trait Entry {
    /// Coefficient of the entry's variable in the objective
    fn objective_coefficient(&self) -> f64;

    /// Human-readable label of the entry
    fn label(&self) -> String;
}

/// A validated problem: entries plus capacity constraints
///
/// Every constraint has exactly one coefficient per entry, aligned by position. Values
/// are only produced by the validator in [`crate::io::validate`] or by
/// [`Problem::new`], which checks the alignment. Problems can be serialized for
/// inspection but are only read back through the raw tables in [`crate::io`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Problem<E> {
    entries: Vec<E>,
    constraints: IndexMap<String, CapacityConstraint>,
}

impl<E: Entry> Problem<E> {
    /// Assemble a problem, checking that constraint names are unique and that each
    /// constraint has one coefficient per entry
    ///
    /// # Examples
    /// ```rust
    /// use allocopt_core::problem::Problem;
    /// use allocopt_core::problem::item::Item;
    /// use allocopt_core::problem::capacity::CapacityConstraint;
    /// let problem = Problem::new(
    ///     vec![Item::new(0, 10.), Item::new(1, 40.)],
    ///     vec![CapacityConstraint::new("weight", vec![5., 4.], 10.)],
    /// ).unwrap();
    /// assert_eq!(problem.len(), 2);
    /// ```
    pub fn new(
        entries: Vec<E>,
        constraints: Vec<CapacityConstraint>,
    ) -> Result<Self, ProblemShapeError> {
        let mut by_name = IndexMap::with_capacity(constraints.len());
        for constraint in constraints {
            if constraint.values.len() != entries.len() {
                return Err(ProblemShapeError::MisalignedConstraint {
                    name: constraint.name,
                    expected: entries.len(),
                    found: constraint.values.len(),
                });
            }
            if by_name.contains_key(&constraint.name) {
                return Err(ProblemShapeError::DuplicateConstraint(constraint.name));
            }
            by_name.insert(constraint.name.clone(), constraint);
        }
        Ok(Problem {
            entries,
            constraints: by_name,
        })
    }

    pub fn entries(&self) -> &[E] {
        &self.entries
    }

    pub fn constraints(&self) -> impl Iterator<Item = &CapacityConstraint> {
        self.constraints.values()
    }

    pub fn constraint(&self, name: &str) -> Option<&CapacityConstraint> {
        self.constraints.get(name)
    }

    pub fn num_constraints(&self) -> usize {
        self.constraints.len()
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Problems whose constraints do not line up with their entries
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ProblemShapeError {
    #[error("Constraint '{name}' has {found} values, expected one per entry ({expected})")]
    MisalignedConstraint {
        name: String,
        expected: usize,
        found: usize,
    },
    #[error("Constraint '{0}' is declared more than once")]
    DuplicateConstraint(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problem::product::Product;

    #[test]
    fn misaligned_constraint() {
        let res = Problem::new(
            vec![Product::new("A", 10.), Product::new("B", 15.)],
            vec![CapacityConstraint::new("material", vec![2.], 8.)],
        );
        match res {
            Err(ProblemShapeError::MisalignedConstraint { expected, found, .. }) => {
                assert_eq!(expected, 2);
                assert_eq!(found, 1);
            }
            _ => panic!("Misaligned constraint not caught"),
        }
    }

    #[test]
    fn duplicate_constraint() {
        let res = Problem::new(
            vec![Product::new("A", 10.)],
            vec![
                CapacityConstraint::new("material", vec![2.], 8.),
                CapacityConstraint::new("material", vec![1.], 3.),
            ],
        );
        assert_eq!(
            res,
            Err(ProblemShapeError::DuplicateConstraint("material".to_string()))
        );
    }

    #[test]
    fn serialized_problem() {
        let problem = Problem::new(
            vec![Product::new("A", 10.)],
            vec![CapacityConstraint::new("material", vec![2.], 8.)],
        )
        .unwrap();
        let json = serde_json::to_value(&problem).unwrap();
        assert_eq!(json["entries"][0]["name"], "A");
        assert_eq!(json["constraints"]["material"]["max"], 8.);
    }

    #[test]
    fn constraints_keep_declared_order() {
        let problem = Problem::new(
            vec![Product::new("A", 10.)],
            vec![
                CapacityConstraint::new("time", vec![3.], 10.),
                CapacityConstraint::new("material", vec![2.], 8.),
            ],
        )
        .unwrap();
        let names = problem.constraints().map(|c| c.name.as_str()).collect::<Vec<_>>();
        assert_eq!(names, vec!["time", "material"]);
        assert!(problem.constraint("material").is_some());
        assert_eq!(problem.num_constraints(), 2);
    }
}
