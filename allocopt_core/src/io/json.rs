//! Module providing JSON input for raw problem tables
//!
//! Cells may be written as JSON strings or numbers; `null` marks an empty cell. Numbers
//! are turned back into their textual form, so they go through the same validation as
//! cells typed by hand.
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::io::raw::{RawAllocationInput, RawConstraint, RawProductRow, RawSelectionInput};

// region JSON Tables
/// A single table cell
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(untagged)]
enum JsonCell {
    Text(String),
    Number(serde_json::Number),
}

impl JsonCell {
    fn into_text(self) -> String {
        match self {
            JsonCell::Text(text) => text,
            JsonCell::Number(number) => number.to_string(),
        }
    }
}

fn cell_text(cell: Option<JsonCell>) -> Option<String> {
    cell.map(JsonCell::into_text)
}

#[derive(Serialize, Deserialize, Debug)]
struct JsonConstraint {
    name: String,
    #[serde(default)]
    max: Option<JsonCell>,
    #[serde(default)]
    values: Vec<Option<JsonCell>>,
}

#[derive(Serialize, Deserialize, Debug)]
struct JsonSelection {
    values: Vec<Option<JsonCell>>,
    #[serde(default)]
    constraints: Vec<JsonConstraint>,
}

#[derive(Serialize, Deserialize, Debug)]
struct JsonProduct {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    profit: Option<JsonCell>,
}

#[derive(Serialize, Deserialize, Debug)]
struct JsonAllocation {
    products: Vec<JsonProduct>,
    #[serde(default)]
    constraints: Vec<JsonConstraint>,
}
// endregion JSON Tables

// region Conversions
impl From<JsonConstraint> for RawConstraint {
    fn from(c: JsonConstraint) -> Self {
        Self {
            name: c.name,
            max: cell_text(c.max),
            values: c.values.into_iter().map(cell_text).collect(),
        }
    }
}

impl From<JsonSelection> for RawSelectionInput {
    fn from(s: JsonSelection) -> Self {
        Self {
            values: s.values.into_iter().map(cell_text).collect(),
            constraints: s.constraints.into_iter().map(RawConstraint::from).collect(),
        }
    }
}

impl From<JsonProduct> for RawProductRow {
    fn from(p: JsonProduct) -> Self {
        Self {
            name: p.name,
            profit: cell_text(p.profit),
        }
    }
}

impl From<JsonAllocation> for RawAllocationInput {
    fn from(a: JsonAllocation) -> Self {
        Self {
            products: a.products.into_iter().map(RawProductRow::from).collect(),
            constraints: a.constraints.into_iter().map(RawConstraint::from).collect(),
        }
    }
}
// endregion Conversions

// region Reading
/// Read a selection table from a JSON file
///
/// The file holds an object with a `values` array (one cell per item) and an optional
/// `constraints` array of `{"name", "max", "values"}` objects.
pub fn read_selection_json<P: AsRef<Path>>(path: P) -> Result<RawSelectionInput, JsonError> {
    selection_from_str(&read_file(path)?)
}

/// Read an allocation table from a JSON file
///
/// The file holds an object with a `products` array of `{"name", "profit"}` objects and
/// an optional `constraints` array of `{"name", "max", "values"}` objects.
pub fn read_allocation_json<P: AsRef<Path>>(path: P) -> Result<RawAllocationInput, JsonError> {
    allocation_from_str(&read_file(path)?)
}

/// Parse a selection table from a JSON string
///
/// # Examples
/// ```rust
/// use allocopt_core::io::json::selection_from_str;
/// let raw = selection_from_str(r#"{"values": [10, "40", null]}"#).unwrap();
/// assert_eq!(raw.values[0].as_deref(), Some("10"));
/// assert_eq!(raw.values[2], None);
/// ```
pub fn selection_from_str(data: &str) -> Result<RawSelectionInput, JsonError> {
    let json_table = match serde_json::from_str::<JsonSelection>(data) {
        Ok(table) => table,
        Err(err) => return Err(JsonError::UnableToParse(format!("{}", err))),
    };
    Ok(json_table.into())
}

/// Parse an allocation table from a JSON string
pub fn allocation_from_str(data: &str) -> Result<RawAllocationInput, JsonError> {
    let json_table = match serde_json::from_str::<JsonAllocation>(data) {
        Ok(table) => table,
        Err(err) => return Err(JsonError::UnableToParse(format!("{}", err))),
    };
    Ok(json_table.into())
}

fn read_file<P: AsRef<Path>>(path: P) -> Result<String, JsonError> {
    match fs::read_to_string(path.as_ref()) {
        Ok(data) => Ok(data),
        Err(err) => Err(JsonError::UnableToRead(format!(
            "{}: {}",
            path.as_ref().display(),
            err
        ))),
    }
}
// endregion Reading

#[derive(Error, Debug)]
pub enum JsonError {
    #[error("Unable to read file due to {0}")]
    UnableToRead(String),
    #[error("Unable to parse json due to {0}")]
    UnableToParse(String),
}
