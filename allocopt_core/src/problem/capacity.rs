//! This module provides a struct for representing named capacity constraints
use serde::{Deserialize, Serialize};

/// A named resource limit: the weighted use of the resource by all entries must not
/// exceed `max`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapacityConstraint {
    /// Name of the resource, unique within a problem
    pub name: String,
    /// Use of the resource per unit of each entry, aligned with the entries by position
    pub values: Vec<f64>,
    /// Amount of the resource available
    pub max: f64,
}

impl CapacityConstraint {
    pub fn new(name: &str, values: Vec<f64>, max: f64) -> Self {
        CapacityConstraint {
            name: name.to_string(),
            values,
            max,
        }
    }

    /// Resource used by a vector of entry levels, aligned with the entries by position
    pub fn usage(&self, levels: &[f64]) -> f64 {
        self.values.iter().zip(levels).map(|(v, l)| v * l).sum()
    }
}
