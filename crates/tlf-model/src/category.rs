//! Category values for one level of a counting hierarchy.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Label rendered for null category values.
pub const MISSING_CATEGORY_LABEL: &str = "Missing";

/// A category cell in the long-format output.
///
/// Variant order drives sorting: rows that aggregate over a level come
/// first, observed values follow in lexicographic order, and missing values
/// close the level. A path of these values therefore sorts hierarchically
/// with the derived `Ord` of `Vec<CategoryValue>`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum CategoryValue {
    /// Level not yet reached: the row aggregates over every value here.
    All,
    /// A value present in the observation data.
    Observed(String),
    /// The observation had no value for this level.
    Missing,
}

impl CategoryValue {
    pub fn observed(value: impl Into<String>) -> Self {
        CategoryValue::Observed(value.into())
    }

    /// Maps an optional cell to a category, turning `None` into `Missing`.
    pub fn from_option(value: Option<String>) -> Self {
        match value {
            Some(value) => CategoryValue::Observed(value),
            None => CategoryValue::Missing,
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, CategoryValue::All)
    }

    /// Display text, or `None` for [`CategoryValue::All`].
    pub fn label(&self) -> Option<&str> {
        match self {
            CategoryValue::All => None,
            CategoryValue::Observed(value) => Some(value),
            CategoryValue::Missing => Some(MISSING_CATEGORY_LABEL),
        }
    }
}

impl fmt::Display for CategoryValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryValue::All => f.write_str("(all)"),
            CategoryValue::Observed(value) => f.write_str(value),
            CategoryValue::Missing => f.write_str(MISSING_CATEGORY_LABEL),
        }
    }
}
