use std::path::PathBuf;

use polars::prelude::DataFrame;
use tlf_count::SubjectCounts;
use tlf_report::Ard;

#[derive(Debug)]
pub struct SubjectsResult {
    pub group_col: String,
    pub counts: SubjectCounts,
}

#[derive(Debug)]
pub struct CountResult {
    /// Summary table, one column per group.
    pub table: DataFrame,
    pub ard: Ard,
    pub ard_path: Option<PathBuf>,
}
