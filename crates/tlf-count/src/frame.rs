//! Conversion of counting results into long-format DataFrames.

use polars::prelude::{Column, DataFrame, NamedFrom, PolarsResult, Series};
use tlf_model::CategoryValue;

use crate::order::DisplayRow;
use crate::subjects::SubjectCounts;

pub const N_SUBJ_POP: &str = "n_subj_pop";
pub const N_OBS: &str = "n_obs";
pub const N_SUBJ: &str = "n_subj";
pub const PCT_SUBJ: &str = "pct_subj";
pub const PCT_SUBJ_FMT: &str = "pct_subj_fmt";
pub const N_SUBJ_FMT: &str = "n_subj_fmt";
pub const N_PCT_SUBJ_FMT: &str = "n_pct_subj_fmt";
pub const DISPLAY_LABEL: &str = "display_label";
pub const DISPLAY_INDEX: &str = "display_index";

/// Denominator table with columns `[group_col, n_subj_pop]`.
pub fn subject_counts_to_frame(counts: &SubjectCounts, group_col: &str) -> PolarsResult<DataFrame> {
    let groups: Vec<String> = counts.groups().map(ToString::to_string).collect();
    let totals: Vec<u64> = counts.iter().map(|(_, n)| n as u64).collect();
    DataFrame::new(vec![
        Series::new(group_col.into(), groups).into(),
        Series::new(N_SUBJ_POP.into(), totals).into(),
    ])
}

/// Long table of display rows.
///
/// Columns: `group_col`, one column per category (null for the "all" level,
/// `"Missing"` for missing values), then `n_obs`, `n_subj`, `n_subj_pop`,
/// `pct_subj`, `pct_subj_fmt`, `n_subj_fmt`, `n_pct_subj_fmt`,
/// `display_label` and `display_index`.
pub fn display_rows_to_frame<S: AsRef<str>>(
    rows: &[DisplayRow],
    group_col: &str,
    category_cols: &[S],
) -> PolarsResult<DataFrame> {
    let mut columns: Vec<Column> = Vec::with_capacity(category_cols.len() + 10);

    let groups: Vec<String> = rows.iter().map(|r| r.row().group.to_string()).collect();
    columns.push(Series::new(group_col.into(), groups).into());

    for (level, name) in category_cols.iter().enumerate() {
        let values: Vec<Option<&str>> = rows
            .iter()
            .map(|r| r.row().path.get(level).and_then(CategoryValue::label))
            .collect();
        columns.push(Series::new(name.as_ref().into(), values).into());
    }

    let counts = |f: fn(&DisplayRow) -> usize| -> Vec<u64> {
        rows.iter().map(|r| f(r) as u64).collect()
    };
    columns.push(Series::new(N_OBS.into(), counts(|r| r.row().n_obs)).into());
    columns.push(Series::new(N_SUBJ.into(), counts(|r| r.row().n_subj)).into());
    columns.push(Series::new(N_SUBJ_POP.into(), counts(|r| r.row().n_subj_pop)).into());

    let pct: Vec<f64> = rows.iter().map(|r| r.formatted.pct_subj).collect();
    columns.push(Series::new(PCT_SUBJ.into(), pct).into());

    let pct_fmt: Vec<&str> = rows.iter().map(|r| r.formatted.pct_subj_fmt.as_str()).collect();
    columns.push(Series::new(PCT_SUBJ_FMT.into(), pct_fmt).into());
    let n_fmt: Vec<&str> = rows.iter().map(|r| r.formatted.n_subj_fmt.as_str()).collect();
    columns.push(Series::new(N_SUBJ_FMT.into(), n_fmt).into());
    let n_pct_fmt: Vec<&str> = rows
        .iter()
        .map(|r| r.formatted.n_pct_subj_fmt.as_str())
        .collect();
    columns.push(Series::new(N_PCT_SUBJ_FMT.into(), n_pct_fmt).into());
    let labels: Vec<&str> = rows.iter().map(|r| r.label.as_str()).collect();
    columns.push(Series::new(DISPLAY_LABEL.into(), labels).into());
    columns.push(Series::new(DISPLAY_INDEX.into(), counts(|r| r.display_index)).into());

    DataFrame::new(columns)
}
