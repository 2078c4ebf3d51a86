//! This module provides a struct for representing products of an allocation problem
use serde::{Deserialize, Serialize};

use crate::problem::Entry;

/// A product produced in continuous, non-negative quantities
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Name of the product, used to report its production level
    pub name: String,
    /// Profit per unit produced, strictly positive
    pub profit: f64,
}

impl Product {
    pub fn new(name: &str, profit: f64) -> Self {
        Product {
            name: name.to_string(),
            profit,
        }
    }
}

impl Entry for Product {
    fn objective_coefficient(&self) -> f64 {
        self.profit
    }

    fn label(&self) -> String {
        self.name.clone()
    }
}
