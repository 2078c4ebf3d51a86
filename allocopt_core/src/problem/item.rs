//! This module provides a struct for representing items of a selection problem
use serde::{Deserialize, Serialize};

use crate::problem::Entry;

/// An item which is either taken whole or left out
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Position of the item in the table
    pub index: usize,
    /// Value gained by taking the item, strictly positive
    pub value: f64,
}

impl Item {
    pub fn new(index: usize, value: f64) -> Self {
        Item { index, value }
    }
}

impl Entry for Item {
    fn objective_coefficient(&self) -> f64 {
        self.value
    }

    fn label(&self) -> String {
        format!("Item {}", self.index + 1)
    }
}
