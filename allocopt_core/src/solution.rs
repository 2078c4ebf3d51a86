//! Results of solved selection and allocation problems, and their text rendering
use std::fmt::{Display, Formatter};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Outcome of a solve which did not fail
///
/// A problem without an optimal solution is an expected outcome, so it is reported here
/// rather than as an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SolveOutcome<S> {
    /// The backend proved optimality
    Solved(S),
    /// The backend reported any non-optimal status
    NoSolution,
}

impl<S> SolveOutcome<S> {
    pub fn is_solved(&self) -> bool {
        matches!(self, SolveOutcome::Solved(_))
    }

    /// The solution, if one was found
    pub fn solution(&self) -> Option<&S> {
        match self {
            SolveOutcome::Solved(s) => Some(s),
            SolveOutcome::NoSolution => None,
        }
    }

    pub fn into_solution(self) -> Option<S> {
        match self {
            SolveOutcome::Solved(s) => Some(s),
            SolveOutcome::NoSolution => None,
        }
    }
}

impl<S: Display> Display for SolveOutcome<S> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            SolveOutcome::Solved(s) => write!(f, "{}", s),
            SolveOutcome::NoSolution => write!(f, "No solution found."),
        }
    }
}

/// Solution of a selection problem
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionSolution {
    /// 0-based indices of the selected items, in ascending order
    pub selected: Vec<usize>,
    /// Total value of the selected items
    pub objective_value: f64,
    /// Time the backend spent solving, in seconds
    pub solve_time_seconds: f64,
}

impl Display for SelectionSolution {
    /// Renders as
    /// ```text
    /// Selected items: Item 2, Item 4
    /// Total value: 90
    /// Time taken: 0.0012 seconds.
    /// ```
    /// where item numbers are 1-based
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let items = self
            .selected
            .iter()
            .map(|i| format!("Item {}", i + 1))
            .collect::<Vec<_>>()
            .join(", ");
        writeln!(f, "Selected items: {}", items)?;
        writeln!(f, "Total value: {}", self.objective_value)?;
        write!(f, "Time taken: {} seconds.", self.solve_time_seconds)
    }
}

/// Solution of an allocation problem
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationSolution {
    /// Production level of every product, keyed by product name in table order
    pub levels: IndexMap<String, f64>,
    /// Total profit at the optimum
    pub objective_value: f64,
    /// Time the backend spent solving, in seconds
    pub solve_time_seconds: f64,
}

impl AllocationSolution {
    /// Level of a product by name
    pub fn level(&self, name: &str) -> Option<f64> {
        self.levels.get(name).copied()
    }
}

impl Display for AllocationSolution {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Production Levels:")?;
        for (name, level) in &self.levels {
            writeln!(f, "{}: {}", name, level)?;
        }
        write!(f, "Total Profit: {}", self.objective_value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selection_rendering() {
        let solution = SelectionSolution {
            selected: vec![1, 3],
            objective_value: 90.,
            solve_time_seconds: 0.5,
        };
        assert_eq!(
            SolveOutcome::Solved(solution).to_string(),
            "Selected items: Item 2, Item 4\nTotal value: 90\nTime taken: 0.5 seconds."
        );
    }

    #[test]
    fn allocation_rendering() {
        let mut levels = IndexMap::new();
        levels.insert("Product A".to_string(), 0.);
        levels.insert("Product B".to_string(), 5.);
        let solution = AllocationSolution {
            levels,
            objective_value: 75.,
            solve_time_seconds: 0.,
        };
        assert_eq!(solution.level("Product B"), Some(5.));
        assert_eq!(
            solution.to_string(),
            "Production Levels:\nProduct A: 0\nProduct B: 5\nTotal Profit: 75"
        );
    }

    #[test]
    fn no_solution() {
        let outcome: SolveOutcome<AllocationSolution> = SolveOutcome::NoSolution;
        assert_eq!(outcome.to_string(), "No solution found.");
        assert!(!outcome.is_solved());
        assert!(outcome.solution().is_none());
    }

    #[test]
    fn serialized_outcome() {
        let outcome = SolveOutcome::Solved(SelectionSolution {
            selected: vec![0],
            objective_value: 10.,
            solve_time_seconds: 0.,
        });
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["outcome"], "solved");
        assert_eq!(json["selected"][0], 0);
        let none = serde_json::to_value(SolveOutcome::<SelectionSolution>::NoSolution).unwrap();
        assert_eq!(none["outcome"], "no_solution");
    }
}
