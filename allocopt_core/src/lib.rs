//! Core rust implementation of allocopt, a crate for formulating and solving small
//! resource allocation problems: 0/1 item selection (knapsack) and continuous production
//! planning.
//!
//! # Examples
//! ```rust
//! use allocopt_core::io::RawAllocationInput;
//! use allocopt_core::variant::solve_allocation;
//!
//! let raw = RawAllocationInput::from_products(&[("Product A", "10"), ("Product B", "15")])
//!     .with_constraint("material", "8", &["2", "1"])
//!     .with_constraint("time", "10", &["3", "2"]);
//! let solution = solve_allocation(&raw).unwrap().into_solution().unwrap();
//! assert!((solution.objective_value - 75.).abs() < 1e-6);
//! ```

pub mod configuration;
pub mod dispatch;
pub mod io;
pub mod optimize;
pub mod problem;
pub mod solution;
pub mod variant;

pub use solution::{AllocationSolution, SelectionSolution, SolveOutcome};
pub use variant::{
    solve, solve_allocation, solve_problem, solve_selection, AllocationVariant, ProblemVariant,
    SelectionVariant, SolveError,
};
