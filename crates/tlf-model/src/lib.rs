//! Shared types for the TLF counting workspace.
//!
//! Nothing in this crate depends on a table library: the counting engine
//! converts DataFrame columns into these types at its boundary.

pub mod category;
pub mod error;
pub mod group;
pub mod ids;
pub mod options;

pub use category::CategoryValue;
pub use error::{Result, TlfError};
pub use group::GroupValue;
pub use ids::SubjectId;
pub use options::{CountOptions, MissingGroupPolicy};
