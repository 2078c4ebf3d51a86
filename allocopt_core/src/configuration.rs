//! Process wide defaults used when a solve is not handed an explicit [`Configuration`]
use std::sync::{LazyLock, RwLock};

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

pub static CONFIGURATION: LazyLock<RwLock<Configuration>> =
    LazyLock::new(|| RwLock::new(Configuration::default()));

/// Settings controlling validation and result extraction
#[derive(Builder, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Configuration {
    /// Which textual number representations the validator accepts
    #[builder(default = "NumberFormat::DigitsOnly")]
    pub number_format: NumberFormat,
    /// A binary variable whose solved value exceeds this is reported as selected
    #[builder(default = "0.5")]
    pub selection_threshold: f64,
    /// Slack allowed when checking solved values against the model rows
    #[builder(default = "1e-6")]
    pub feasibility_tolerance: f64,
    /// Reject allocation problems where two products share a name
    ///
    /// ### Note
    /// Levels are reported keyed by product name, so when this is disabled the level of
    /// a later product overwrites the level of an earlier product with the same name.
    #[builder(default = "true")]
    pub reject_duplicate_product_names: bool,
}

impl Default for Configuration {
    fn default() -> Self {
        Configuration {
            number_format: NumberFormat::DigitsOnly,
            selection_threshold: 0.5,
            feasibility_tolerance: 1e-6,
            reject_duplicate_product_names: true,
        }
    }
}

impl Configuration {
    /// Copy of the current process wide configuration
    pub fn current() -> Self {
        match CONFIGURATION.read() {
            Ok(config) => config.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

/// Textual number formats accepted in table cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumberFormat {
    /// Only ASCII digit strings, such as `"12"`; `"1.5"` and `"-3"` are rejected
    DigitsOnly,
    /// Any finite decimal number, such as `"1.5"` or `"-3"`
    Decimal,
}

impl NumberFormat {
    /// Parse a cell according to this format, returning `None` if the text is not accepted
    ///
    /// Text too large to be represented as a finite `f64` is never accepted.
    pub fn parse(&self, text: &str) -> Option<f64> {
        match self {
            NumberFormat::DigitsOnly => {
                if text.is_empty() || !text.chars().all(|c| c.is_ascii_digit()) {
                    return None;
                }
                text.parse::<f64>().ok().filter(|v| v.is_finite())
            }
            NumberFormat::Decimal => text.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
        }
    }
}
