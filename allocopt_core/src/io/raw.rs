//! Raw, unvalidated problem tables as entered by the user
//!
//! Every cell is kept as text; `None` stands for a cell that was never filled.
use serde::{Deserialize, Serialize};

/// A declared constraint column: its name, the text of its bound and one cell per row
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawConstraint {
    pub name: String,
    #[serde(default)]
    pub max: Option<String>,
    #[serde(default)]
    pub values: Vec<Option<String>>,
}

impl RawConstraint {
    /// Create a constraint column where every cell is filled
    pub fn new(name: &str, max: &str, values: &[&str]) -> Self {
        RawConstraint {
            name: name.to_string(),
            max: Some(max.to_string()),
            values: values.iter().map(|v| Some(v.to_string())).collect(),
        }
    }
}

/// Raw table of a selection (knapsack) problem: one value cell per item
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawSelectionInput {
    pub values: Vec<Option<String>>,
    #[serde(default)]
    pub constraints: Vec<RawConstraint>,
}

impl RawSelectionInput {
    /// Create a table where every value cell is filled
    pub fn from_values(values: &[&str]) -> Self {
        RawSelectionInput {
            values: values.iter().map(|v| Some(v.to_string())).collect(),
            constraints: Vec::new(),
        }
    }

    /// Add a fully filled constraint column
    pub fn with_constraint(mut self, name: &str, max: &str, values: &[&str]) -> Self {
        self.constraints.push(RawConstraint::new(name, max, values));
        self
    }
}

/// A raw row of an allocation problem: the product name and its profit cell
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawProductRow {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub profit: Option<String>,
}

impl RawProductRow {
    pub fn new(name: &str, profit: &str) -> Self {
        RawProductRow {
            name: Some(name.to_string()),
            profit: Some(profit.to_string()),
        }
    }
}

/// Raw table of an allocation (production planning) problem
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawAllocationInput {
    pub products: Vec<RawProductRow>,
    #[serde(default)]
    pub constraints: Vec<RawConstraint>,
}

impl RawAllocationInput {
    /// Create a table where every name and profit cell is filled
    pub fn from_products(products: &[(&str, &str)]) -> Self {
        RawAllocationInput {
            products: products
                .iter()
                .map(|(name, profit)| RawProductRow::new(name, profit))
                .collect(),
            constraints: Vec::new(),
        }
    }

    /// Add a fully filled constraint column
    pub fn with_constraint(mut self, name: &str, max: &str, values: &[&str]) -> Self {
        self.constraints.push(RawConstraint::new(name, max, values));
        self
    }
}
