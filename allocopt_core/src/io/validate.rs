//! Validation of raw problem tables
//!
//! Rules are applied in a fixed order, each one across every row, and the first
//! violated rule aborts validation:
//!
//! 1. every objective cell is filled
//! 2. every objective cell is a number in the configured [`NumberFormat`]
//! 3. every objective value is strictly positive
//! 4. (allocation only) every product has a name, and names are unique unless
//!    configured otherwise
//! 5. for each constraint, in declared order: its name is non-empty and unique, and its
//!    bound is filled, a number and strictly positive
//! 6. for each constraint: it has one cell per row, and every cell is filled, a number
//!    and non-negative
use std::collections::HashSet;
use std::fmt::{Display, Formatter};

use log::debug;
use thiserror::Error;

use crate::configuration::{Configuration, NumberFormat};
use crate::io::raw::{RawAllocationInput, RawConstraint, RawSelectionInput};
use crate::problem::capacity::CapacityConstraint;
use crate::problem::item::Item;
use crate::problem::product::Product;
use crate::problem::Problem;

/// Checks raw tables and produces validated [`Problem`]s
#[derive(Debug, Clone)]
pub struct Validator {
    number_format: NumberFormat,
    reject_duplicate_product_names: bool,
}

impl Default for Validator {
    fn default() -> Self {
        Validator::new(&Configuration::default())
    }
}

impl Validator {
    pub fn new(config: &Configuration) -> Self {
        Validator {
            number_format: config.number_format,
            reject_duplicate_product_names: config.reject_duplicate_product_names,
        }
    }

    /// Validate the table of a selection problem
    ///
    /// # Examples
    /// ```rust
    /// use allocopt_core::io::{RawSelectionInput, Validator};
    /// let raw = RawSelectionInput::from_values(&["10", "40"])
    ///     .with_constraint("weight", "10", &["5", "4"]);
    /// let problem = Validator::default().validate_selection(&raw).unwrap();
    /// assert_eq!(problem.len(), 2);
    /// ```
    pub fn validate_selection(&self, raw: &RawSelectionInput) -> Result<Problem<Item>, InputError> {
        let values = self.objective_column(&raw.values, EntryKind::Item)?;
        let constraints = self.constraint_columns(&raw.constraints, values.len(), EntryKind::Item)?;
        let items = values
            .into_iter()
            .enumerate()
            .map(|(index, value)| Item::new(index, value))
            .collect::<Vec<_>>();
        debug!(
            "Validated selection table with {} items and {} constraints",
            items.len(),
            constraints.len()
        );
        Ok(Problem::new(items, constraints)?)
    }

    /// Validate the table of an allocation problem
    pub fn validate_allocation(
        &self,
        raw: &RawAllocationInput,
    ) -> Result<Problem<Product>, InputError> {
        let profit_cells = raw
            .products
            .iter()
            .map(|p| p.profit.clone())
            .collect::<Vec<_>>();
        let profits = self.objective_column(&profit_cells, EntryKind::Product)?;

        let mut names = Vec::with_capacity(raw.products.len());
        for (row, product) in raw.products.iter().enumerate() {
            match product.name.as_deref() {
                Some(name) if !name.is_empty() => names.push(name),
                _ => return Err(InputError::MissingProductName { row: row + 1 }),
            }
        }
        if self.reject_duplicate_product_names {
            let mut seen = HashSet::new();
            for name in &names {
                if !seen.insert(*name) {
                    return Err(InputError::DuplicateProductName {
                        name: name.to_string(),
                    });
                }
            }
        }

        let constraints =
            self.constraint_columns(&raw.constraints, profits.len(), EntryKind::Product)?;
        let products = names
            .into_iter()
            .zip(profits)
            .map(|(name, profit)| Product::new(name, profit))
            .collect::<Vec<_>>();
        debug!(
            "Validated allocation table with {} products and {} constraints",
            products.len(),
            constraints.len()
        );
        Ok(Problem::new(products, constraints)?)
    }

    /// Rules 1 to 3: presence, number format and strict positivity of the objective column
    fn objective_column(
        &self,
        cells: &[Option<String>],
        kind: EntryKind,
    ) -> Result<Vec<f64>, InputError> {
        if let Some(row) = first_missing(cells) {
            return Err(InputError::MissingObjectiveValue { kind, row });
        }
        let values = self
            .parse_column(cells)
            .map_err(|(row, text)| InputError::ObjectiveNotANumber { kind, row, text })?;
        if let Some((row, value)) = values.iter().enumerate().find(|(_, v)| **v <= 0.) {
            return Err(InputError::ObjectiveNotPositive {
                kind,
                row: row + 1,
                value: *value,
            });
        }
        Ok(values)
    }

    /// Rules 5 and 6, constraint by constraint in declared order
    fn constraint_columns(
        &self,
        columns: &[RawConstraint],
        rows: usize,
        kind: EntryKind,
    ) -> Result<Vec<CapacityConstraint>, InputError> {
        let mut names = HashSet::new();
        let mut constraints = Vec::with_capacity(columns.len());
        for (position, column) in columns.iter().enumerate() {
            let name = column.name.as_str();
            if name.is_empty() {
                return Err(InputError::UnnamedConstraint {
                    position: position + 1,
                });
            }
            if !names.insert(name) {
                return Err(InputError::DuplicateConstraintName {
                    constraint: name.to_string(),
                });
            }

            let max = match column.max.as_deref() {
                None | Some("") => {
                    return Err(InputError::MissingConstraintMax {
                        constraint: name.to_string(),
                    })
                }
                Some(text) => self.number_format.parse(text).ok_or_else(|| {
                    InputError::ConstraintMaxNotANumber {
                        constraint: name.to_string(),
                        text: text.to_string(),
                    }
                })?,
            };
            if max <= 0. {
                return Err(InputError::ConstraintMaxNotPositive {
                    constraint: name.to_string(),
                    value: max,
                });
            }

            if column.values.len() != rows {
                return Err(InputError::CoefficientCountMismatch {
                    constraint: name.to_string(),
                    expected: rows,
                    found: column.values.len(),
                });
            }
            if let Some(row) = first_missing(&column.values) {
                return Err(InputError::MissingCoefficient {
                    constraint: name.to_string(),
                    kind,
                    row,
                });
            }
            let values = self.parse_column(&column.values).map_err(|(row, text)| {
                InputError::CoefficientNotANumber {
                    constraint: name.to_string(),
                    kind,
                    row,
                    text,
                }
            })?;
            if let Some((row, value)) = values.iter().enumerate().find(|(_, v)| **v < 0.) {
                return Err(InputError::NegativeCoefficient {
                    constraint: name.to_string(),
                    kind,
                    row: row + 1,
                    value: *value,
                });
            }
            constraints.push(CapacityConstraint::new(name, values, max));
        }
        Ok(constraints)
    }

    /// Parse every cell of a column known to be filled, returning the 1-based row and
    /// text of the first cell that is not a number
    fn parse_column(&self, cells: &[Option<String>]) -> Result<Vec<f64>, (usize, String)> {
        cells
            .iter()
            .enumerate()
            .map(|(row, cell)| {
                let text = cell.as_deref().unwrap_or_default();
                self.number_format
                    .parse(text)
                    .ok_or_else(|| (row + 1, text.to_string()))
            })
            .collect()
    }
}

/// 1-based row of the first missing or empty cell
fn first_missing(cells: &[Option<String>]) -> Option<usize> {
    cells
        .iter()
        .position(|c| c.as_deref().map_or(true, str::is_empty))
        .map(|row| row + 1)
}

/// What a table row stands for, used in error messages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Item,
    Product,
}

impl Display for EntryKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            EntryKind::Item => write!(f, "item"),
            EntryKind::Product => write!(f, "product"),
        }
    }
}

/// Errors in user supplied tables
///
/// Rows and positions are 1-based, as shown to the user.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InputError {
    #[error("All {kind} values must be filled: value of {kind} {row} is missing")]
    MissingObjectiveValue { kind: EntryKind, row: usize },
    #[error("Value of {kind} {row} must be a number, got '{text}'")]
    ObjectiveNotANumber {
        kind: EntryKind,
        row: usize,
        text: String,
    },
    #[error("Value of {kind} {row} must be strictly positive, got {value}")]
    ObjectiveNotPositive {
        kind: EntryKind,
        row: usize,
        value: f64,
    },
    #[error("Product {row} must have a non empty name")]
    MissingProductName { row: usize },
    #[error("Product name '{name}' is used more than once")]
    DuplicateProductName { name: String },
    #[error("Constraint {position} must have a non empty name")]
    UnnamedConstraint { position: usize },
    #[error("Constraint '{constraint}' is declared more than once")]
    DuplicateConstraintName { constraint: String },
    #[error("Max value for constraint '{constraint}' must be filled")]
    MissingConstraintMax { constraint: String },
    #[error("Max value for constraint '{constraint}' must be a number, got '{text}'")]
    ConstraintMaxNotANumber { constraint: String, text: String },
    #[error("Max value for constraint '{constraint}' must be strictly positive, got {value}")]
    ConstraintMaxNotPositive { constraint: String, value: f64 },
    #[error("Constraint '{constraint}' has {found} values, expected one per row ({expected})")]
    CoefficientCountMismatch {
        constraint: String,
        expected: usize,
        found: usize,
    },
    #[error("All '{constraint}' values must be filled: {kind} {row} is missing")]
    MissingCoefficient {
        constraint: String,
        kind: EntryKind,
        row: usize,
    },
    #[error("'{constraint}' of {kind} {row} must be a number, got '{text}'")]
    CoefficientNotANumber {
        constraint: String,
        kind: EntryKind,
        row: usize,
        text: String,
    },
    #[error("'{constraint}' of {kind} {row} must not be negative, got {value}")]
    NegativeCoefficient {
        constraint: String,
        kind: EntryKind,
        row: usize,
        value: f64,
    },
    #[error("Problem table is inconsistent: {0}")]
    Shape(#[from] crate::problem::ProblemShapeError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::configuration::ConfigurationBuilder;
    use crate::io::raw::RawProductRow;

    fn decimal_validator() -> Validator {
        Validator::new(
            &ConfigurationBuilder::default()
                .number_format(NumberFormat::Decimal)
                .build()
                .unwrap(),
        )
    }

    #[test]
    fn valid_selection() {
        let raw = RawSelectionInput::from_values(&["10", "40", "30", "50"])
            .with_constraint("weight", "10", &["5", "4", "6", "3"])
            .with_constraint("volume", "5", &["2", "3", "1", "0"]);
        let problem = Validator::default().validate_selection(&raw).unwrap();
        assert_eq!(problem.len(), 4);
        assert_eq!(problem.entries()[3], Item::new(3, 50.));
        let volume = problem.constraint("volume").unwrap();
        assert_eq!(volume.values, vec![2., 3., 1., 0.]);
        assert!((volume.max - 5.).abs() < 1e-25);
    }

    #[test]
    fn empty_selection_is_valid() {
        let raw = RawSelectionInput::default().with_constraint("weight", "10", &[]);
        let problem = Validator::default().validate_selection(&raw).unwrap();
        assert!(problem.is_empty());
        assert_eq!(problem.num_constraints(), 1);
    }

    #[test]
    fn missing_objective_value() {
        let mut raw = RawSelectionInput::from_values(&["10", "40"]);
        raw.values.push(None);
        assert_eq!(
            Validator::default().validate_selection(&raw),
            Err(InputError::MissingObjectiveValue {
                kind: EntryKind::Item,
                row: 3
            })
        );
        let raw = RawSelectionInput::from_values(&["10", "", "x"]);
        let err = Validator::default().validate_selection(&raw).unwrap_err();
        assert_eq!(
            err.to_string(),
            "All item values must be filled: value of item 2 is missing"
        );
    }

    #[test]
    fn presence_is_checked_before_format() {
        // Row 1 is not a number, but row 2 is missing, and presence is checked first
        let raw = RawSelectionInput {
            values: vec![Some("abc".to_string()), None],
            constraints: Vec::new(),
        };
        match Validator::default().validate_selection(&raw) {
            Err(InputError::MissingObjectiveValue { row: 2, .. }) => {}
            other => panic!("Unexpected result {:?}", other),
        }
    }

    #[test]
    fn objective_must_be_digits() {
        let raw = RawSelectionInput::from_values(&["10", "2.5"]);
        assert_eq!(
            Validator::default().validate_selection(&raw),
            Err(InputError::ObjectiveNotANumber {
                kind: EntryKind::Item,
                row: 2,
                text: "2.5".to_string()
            })
        );
        // Decimals are accepted when configured
        let problem = decimal_validator().validate_selection(&raw).unwrap();
        assert!((problem.entries()[1].value - 2.5).abs() < 1e-25);
    }

    #[test]
    fn objective_must_be_positive() {
        let raw = RawSelectionInput::from_values(&["10", "0"])
            .with_constraint("weight", "abc", &["1", "1"]);
        assert_eq!(
            Validator::default().validate_selection(&raw),
            Err(InputError::ObjectiveNotPositive {
                kind: EntryKind::Item,
                row: 2,
                value: 0.
            })
        );
        let raw = RawSelectionInput::from_values(&["-4", "3"]);
        match decimal_validator().validate_selection(&raw) {
            Err(InputError::ObjectiveNotPositive { row: 1, .. }) => {}
            other => panic!("Negative value not caught: {:?}", other),
        }
    }

    #[test]
    fn constraint_max_rules() {
        let base = RawSelectionInput::from_values(&["10", "40"]);

        let mut raw = base.clone();
        raw.constraints.push(RawConstraint {
            name: "weight".to_string(),
            max: None,
            values: vec![Some("1".to_string()), Some("2".to_string())],
        });
        assert_eq!(
            Validator::default().validate_selection(&raw),
            Err(InputError::MissingConstraintMax {
                constraint: "weight".to_string()
            })
        );

        let raw = base.clone().with_constraint("weight", "ten", &["1", "2"]);
        match Validator::default().validate_selection(&raw) {
            Err(InputError::ConstraintMaxNotANumber { constraint, text }) => {
                assert_eq!(constraint, "weight");
                assert_eq!(text, "ten");
            }
            other => panic!("Unexpected result {:?}", other),
        }

        let raw = base.clone().with_constraint("weight", "0", &["1", "2"]);
        let err = Validator::default().validate_selection(&raw).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Max value for constraint 'weight' must be strictly positive, got 0"
        );

        let raw = base.with_constraint("weight", "-1", &["1", "2"]);
        match decimal_validator().validate_selection(&raw) {
            Err(InputError::ConstraintMaxNotPositive { .. }) => {}
            other => panic!("Negative max not caught: {:?}", other),
        }
    }

    #[test]
    fn constraint_cell_rules() {
        let base = RawSelectionInput::from_values(&["10", "40"]);

        let raw = base.clone().with_constraint("weight", "10", &["1"]);
        assert_eq!(
            Validator::default().validate_selection(&raw),
            Err(InputError::CoefficientCountMismatch {
                constraint: "weight".to_string(),
                expected: 2,
                found: 1
            })
        );

        let raw = base.clone().with_constraint("weight", "10", &["1", ""]);
        match Validator::default().validate_selection(&raw) {
            Err(InputError::MissingCoefficient { row: 2, .. }) => {}
            other => panic!("Unexpected result {:?}", other),
        }

        let raw = base.clone().with_constraint("weight", "10", &["1.5", "2"]);
        match Validator::default().validate_selection(&raw) {
            Err(InputError::CoefficientNotANumber { row: 1, text, .. }) => {
                assert_eq!(text, "1.5")
            }
            other => panic!("Unexpected result {:?}", other),
        }

        let raw = base.clone().with_constraint("weight", "10", &["0", "0"]);
        assert!(Validator::default().validate_selection(&raw).is_ok());

        let raw = base.with_constraint("weight", "10", &["1", "-2"]);
        match decimal_validator().validate_selection(&raw) {
            Err(InputError::NegativeCoefficient { row: 2, value, .. }) => {
                assert!((value + 2.).abs() < 1e-25)
            }
            other => panic!("Negative coefficient not caught: {:?}", other),
        }
    }

    #[test]
    fn overflowing_cells_are_rejected() {
        let huge = "9".repeat(400);

        let raw = RawSelectionInput::from_values(&["10", &huge]);
        match Validator::default().validate_selection(&raw) {
            Err(InputError::ObjectiveNotANumber { row: 2, text, .. }) => assert_eq!(text, huge),
            other => panic!("Overflowing value accepted: {:?}", other),
        }

        let raw = RawSelectionInput::from_values(&["10", "40"])
            .with_constraint("weight", &huge, &["1", "2"]);
        match Validator::default().validate_selection(&raw) {
            Err(InputError::ConstraintMaxNotANumber { constraint, .. }) => {
                assert_eq!(constraint, "weight")
            }
            other => panic!("Overflowing bound accepted: {:?}", other),
        }

        let raw = RawAllocationInput::from_products(&[("A", "10")])
            .with_constraint("material", "8", &[&huge]);
        match decimal_validator().validate_allocation(&raw) {
            Err(InputError::CoefficientNotANumber { row: 1, .. }) => {}
            other => panic!("Overflowing coefficient accepted: {:?}", other),
        }
    }

    #[test]
    fn constraint_names() {
        let base = RawSelectionInput::from_values(&["10"]);
        let raw = base.clone().with_constraint("", "10", &["1"]);
        assert_eq!(
            Validator::default().validate_selection(&raw),
            Err(InputError::UnnamedConstraint { position: 1 })
        );
        let raw = base
            .with_constraint("weight", "10", &["1"])
            .with_constraint("weight", "5", &["1"]);
        assert_eq!(
            Validator::default().validate_selection(&raw),
            Err(InputError::DuplicateConstraintName {
                constraint: "weight".to_string()
            })
        );
    }

    #[test]
    fn constraints_checked_in_declared_order() {
        let raw = RawSelectionInput::from_values(&["10", "40"])
            .with_constraint("first", "10", &["1", "x"])
            .with_constraint("second", "0", &["1", "2"]);
        match Validator::default().validate_selection(&raw) {
            Err(InputError::CoefficientNotANumber { constraint, .. }) => {
                assert_eq!(constraint, "first")
            }
            other => panic!("Unexpected result {:?}", other),
        }
    }

    #[test]
    fn valid_allocation() {
        let raw = RawAllocationInput::from_products(&[("A", "10"), ("B", "15")])
            .with_constraint("material", "8", &["2", "1"])
            .with_constraint("time", "10", &["3", "2"]);
        let problem = Validator::default().validate_allocation(&raw).unwrap();
        assert_eq!(problem.entries()[1], Product::new("B", 15.));
        assert_eq!(problem.num_constraints(), 2);
    }

    #[test]
    fn product_names() {
        let mut raw = RawAllocationInput::from_products(&[("A", "10")]);
        raw.products.push(RawProductRow {
            name: None,
            profit: Some("4".to_string()),
        });
        assert_eq!(
            Validator::default().validate_allocation(&raw),
            Err(InputError::MissingProductName { row: 2 })
        );

        let raw = RawAllocationInput::from_products(&[("A", "10"), ("A", "12")]);
        assert_eq!(
            Validator::default().validate_allocation(&raw),
            Err(InputError::DuplicateProductName {
                name: "A".to_string()
            })
        );
        let lenient = Validator::new(
            &ConfigurationBuilder::default()
                .reject_duplicate_product_names(false)
                .build()
                .unwrap(),
        );
        assert_eq!(lenient.validate_allocation(&raw).unwrap().len(), 2);
    }

    #[test]
    fn profit_checked_before_names() {
        let raw = RawAllocationInput::from_products(&[("", "10"), ("B", "0")]);
        match Validator::default().validate_allocation(&raw) {
            Err(InputError::ObjectiveNotPositive {
                kind: EntryKind::Product,
                row: 2,
                ..
            }) => {}
            other => panic!("Unexpected result {:?}", other),
        }
    }
}
