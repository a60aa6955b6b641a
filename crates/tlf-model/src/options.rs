//! Configuration options for counting.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::TlfError;

/// What to do with population rows whose group value is null.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingGroupPolicy {
    /// Reject the population.
    #[default]
    Error,
    /// Drop the subjects, along with any of their observations.
    Ignore,
    /// Keep the subjects in a dedicated "Missing" group.
    Fill,
}

impl MissingGroupPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            MissingGroupPolicy::Error => "error",
            MissingGroupPolicy::Ignore => "ignore",
            MissingGroupPolicy::Fill => "fill",
        }
    }
}

impl fmt::Display for MissingGroupPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MissingGroupPolicy {
    type Err = TlfError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "error" => Ok(MissingGroupPolicy::Error),
            "ignore" => Ok(MissingGroupPolicy::Ignore),
            "fill" => Ok(MissingGroupPolicy::Fill),
            _ => Err(TlfError::InvalidPolicy {
                value: s.to_string(),
            }),
        }
    }
}

/// Options shared by every counting call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CountOptions {
    /// Add a synthetic "Total" group spanning all subjects.
    pub include_total: bool,

    /// Handling of null group values in the population.
    pub missing_group: MissingGroupPolicy,

    /// Decimal places kept in percentages.
    pub pct_digits: u32,

    /// Fixed width for subject counts. Inferred from the data when `None`.
    pub max_n_width: Option<usize>,
}

impl Default for CountOptions {
    fn default() -> Self {
        Self {
            include_total: true,
            missing_group: MissingGroupPolicy::default(),
            pct_digits: 1,
            max_n_width: None,
        }
    }
}

impl CountOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_total(mut self, include_total: bool) -> Self {
        self.include_total = include_total;
        self
    }

    #[must_use]
    pub fn with_missing_group(mut self, policy: MissingGroupPolicy) -> Self {
        self.missing_group = policy;
        self
    }

    #[must_use]
    pub fn with_pct_digits(mut self, digits: u32) -> Self {
        self.pct_digits = digits;
        self
    }

    #[must_use]
    pub fn with_max_n_width(mut self, width: Option<usize>) -> Self {
        self.max_n_width = width;
        self
    }
}
