//! Module for reading raw problem tables and turning them into validated problems
pub mod json;
pub mod raw;
pub mod validate;

pub use raw::{RawAllocationInput, RawConstraint, RawProductRow, RawSelectionInput};
pub use validate::{EntryKind, InputError, Validator};
