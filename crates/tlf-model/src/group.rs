//! Treatment group values.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Label rendered for the synthetic all-groups column.
pub const TOTAL_LABEL: &str = "Total";

/// Label rendered for subjects whose group was filled under
/// [`MissingGroupPolicy::Fill`](crate::MissingGroupPolicy::Fill).
pub const MISSING_GROUP_LABEL: &str = "Missing";

/// One level of the group domain.
///
/// The derived ordering is the column order of every report: treatment arms
/// sorted by name, then the filled missing group, then the total column.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum GroupValue {
    /// A treatment arm as it appears in the population.
    Arm(String),
    /// Subjects whose group value was null.
    Missing,
    /// Synthetic group spanning every subject in the population.
    Total,
}

impl GroupValue {
    pub fn arm(name: impl Into<String>) -> Self {
        GroupValue::Arm(name.into())
    }

    pub fn is_total(&self) -> bool {
        matches!(self, GroupValue::Total)
    }

    /// Text used for column headers and ARD group cells.
    pub fn label(&self) -> &str {
        match self {
            GroupValue::Arm(name) => name,
            GroupValue::Missing => MISSING_GROUP_LABEL,
            GroupValue::Total => TOTAL_LABEL,
        }
    }
}

impl fmt::Display for GroupValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
