//! Counting and aggregation engine for clinical summary tables.
//!
//! The pipeline runs leaf-first:
//!
//! - **population**: validate subjects, resolve missing groups, add the total group
//! - **subjects**: per-group denominators
//! - **observation**: attach events to their subjects and tag category paths
//! - **aggregate**: zero-filled subject/event counts at every hierarchy level
//! - **format**: rounded, padded `n (pct)` strings
//! - **order**: deterministic row order, indented labels and row indices
//!
//! [`Counter`] wires the stages together; [`count_subjects`] and
//! [`aggregate_with_observations`] are the DataFrame entry points.

pub mod aggregate;
pub mod counter;
pub mod error;
pub mod format;
pub mod frame;
pub mod observation;
pub mod order;
pub mod population;
pub mod subjects;

pub use aggregate::{CountRow, aggregate};
pub use counter::{
    Counter, aggregate_with_observations, aggregate_with_observations_frame, count_subjects,
    count_subjects_frame,
};
pub use error::{CountError, Result};
pub use format::{
    FormattedRow, format_pct, format_percentages, pct_width, percentage, round_half_away_from_zero,
};
pub use frame::{display_rows_to_frame, subject_counts_to_frame};
pub use observation::{JoinedObservation, JoinedObservations, Observations, join_observations};
pub use order::{DisplayRow, display_label, order_and_label};
pub use population::{NormalizedPopulation, Population, normalize};
pub use subjects::{SubjectCounts, count_normalized};
