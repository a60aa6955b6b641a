use thiserror::Error;

use crate::MissingGroupPolicy;

/// Data-quality failures raised by the counting engine.
///
/// Every variant describes a defect in the caller's input; none of them is
/// transient, so callers should halt the affected report and surface the
/// message unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TlfError {
    #[error("the '{column}' column in the population is not unique: {}", .ids.join(", "))]
    DuplicateId { column: String, ids: Vec<String> },

    #[error(
        "missing values found in the '{column}' column of the population, \
         and the missing group policy is set to '{policy}'"
    )]
    MissingGroup {
        column: String,
        policy: MissingGroupPolicy,
    },

    #[error(
        "some '{column}' values in the observation are not present in the population: [{}]",
        .ids.join(", ")
    )]
    OrphanObservation { column: String, ids: Vec<String> },

    #[error("invalid missing group policy '{value}' (expected error, ignore, or fill)")]
    InvalidPolicy { value: String },

    #[error("missing subject identifier in the '{column}' column of the {table}")]
    MissingSubjectId { column: String, table: String },

    #[error("at least one category column is required")]
    EmptyCategories,

    #[error("observation has {found} category values but {expected} category columns")]
    CategoryArity { expected: usize, found: usize },
}

pub type Result<T> = std::result::Result<T, TlfError>;
