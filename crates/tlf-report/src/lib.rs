//! Report building on top of the counting engine.
//!
//! - **ard**: long `(row, index, group, value)` analysis results data
//! - **summary**: multi-section summaries sharing one set of denominators
//! - **pivot**: ARD to a wide display table, one column per group
//! - **export**: ARD as CSV or JSON

pub mod ard;
pub mod error;
pub mod export;
pub mod pivot;
pub mod summary;

pub use ard::{Ard, ArdRecord};
pub use error::{ReportError, Result};
pub use export::{write_ard_csv, write_ard_json};
pub use pivot::pivot;
pub use summary::SummaryBuilder;
