use polars::prelude::PolarsError;
use thiserror::Error;
use tlf_model::TlfError;

/// Table name used in messages about the subject-level input.
pub const POPULATION_TABLE: &str = "population";
/// Table name used in messages about the event-level input.
pub const OBSERVATION_TABLE: &str = "observation";

#[derive(Debug, Error)]
pub enum CountError {
    #[error(transparent)]
    Model(#[from] TlfError),

    #[error("column '{column}' not found in the {table}")]
    ColumnNotFound { column: String, table: String },

    #[error("polars error: {0}")]
    Polars(#[from] PolarsError),
}

impl CountError {
    pub(crate) fn column_not_found(column: &str, table: &str) -> Self {
        Self::ColumnNotFound {
            column: column.to_string(),
            table: table.to_string(),
        }
    }

    /// Returns the data-quality error when this failure came from the inputs.
    pub fn as_model(&self) -> Option<&TlfError> {
        match self {
            CountError::Model(error) => Some(error),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, CountError>;
