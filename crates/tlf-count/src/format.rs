//! Percentage formatting.
//!
//! Percentages are rounded half away from zero, the convention of clinical
//! reporting, and padded so that digits line up in a monospaced column:
//!
//! ```text
//!  1 ( 50.0)
//! 12 (100.0)
//!  0 (  0.0)
//! ```

use crate::aggregate::CountRow;

/// A count row with its percentage and display strings.
#[derive(Debug, Clone, PartialEq)]
pub struct FormattedRow {
    pub row: CountRow,
    /// Unrounded `n_subj / n_subj_pop * 100`, `0.0` for an empty denominator.
    pub pct_subj: f64,
    /// Rounded percentage, left-padded.
    pub pct_subj_fmt: String,
    /// Subject count, left-padded.
    pub n_subj_fmt: String,
    /// `"{n_subj_fmt} ({pct_subj_fmt})"`.
    pub n_pct_subj_fmt: String,
}

/// Percentage of `numerator` in `denominator`, or `0.0` when undefined.
pub fn percentage(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        return 0.0;
    }
    let pct = numerator as f64 / denominator as f64 * 100.0;
    if pct.is_nan() { 0.0 } else { pct }
}

/// Rounds to `digits` decimals with ties going away from zero.
///
/// ```
/// use tlf_count::round_half_away_from_zero;
///
/// assert_eq!(round_half_away_from_zero(50.05, 1), 50.1);
/// assert_eq!(round_half_away_from_zero(2.5, 0), 3.0);
/// assert_eq!(round_half_away_from_zero(-2.5, 0), -3.0);
/// ```
pub fn round_half_away_from_zero(value: f64, digits: u32) -> f64 {
    let factor = 10f64.powi(digits as i32);
    // f64::round already breaks ties away from zero.
    (value * factor).round() / factor
}

/// Rounded percentage text with exactly `digits` decimals, unpadded.
pub fn format_pct(pct: f64, digits: u32) -> String {
    let pct = if pct.is_nan() { 0.0 } else { pct };
    let rounded = round_half_away_from_zero(pct, digits);
    // Avoid rendering "-0.0".
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    format!("{rounded:.prec$}", prec = digits as usize)
}

/// Width of a padded percentage: `100` or `100.` plus the decimals.
pub fn pct_width(digits: u32) -> usize {
    if digits == 0 { 3 } else { 4 + digits as usize }
}

/// Adds percentages and aligned display strings to every row.
///
/// When `max_n_width` is `None` the count width is the longest rendered
/// `n_subj` in `rows`.
pub fn format_percentages(
    rows: Vec<CountRow>,
    pct_digits: u32,
    max_n_width: Option<usize>,
) -> Vec<FormattedRow> {
    let n_width = max_n_width.unwrap_or_else(|| {
        rows.iter()
            .map(|row| row.n_subj.to_string().len())
            .max()
            .unwrap_or(1)
    });
    let p_width = pct_width(pct_digits);

    rows.into_iter()
        .map(|row| {
            let pct_subj = percentage(row.n_subj, row.n_subj_pop);
            let pct_subj_fmt = format!("{:>p_width$}", format_pct(pct_subj, pct_digits));
            let n_subj_fmt = format!("{:>n_width$}", row.n_subj);
            let n_pct_subj_fmt = format!("{n_subj_fmt} ({pct_subj_fmt})");
            FormattedRow {
                row,
                pct_subj,
                pct_subj_fmt,
                n_subj_fmt,
                n_pct_subj_fmt,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tlf_model::{CategoryValue, GroupValue};

    fn row(n_subj: usize, n_subj_pop: usize) -> CountRow {
        CountRow {
            group: GroupValue::arm("A"),
            path: vec![CategoryValue::observed("Flu")],
            n_obs: n_subj,
            n_subj,
            n_subj_pop,
        }
    }

    #[test]
    fn rounds_half_away_from_zero_not_to_even() {
        assert_eq!(format_pct(50.05, 1), "50.1");
        assert_eq!(format_pct(12.5, 0), "13");
        assert_eq!(format_pct(0.25, 1), "0.3");
    }

    #[test]
    fn renders_fixed_decimals() {
        assert_eq!(format_pct(50.0, 1), "50.0");
        assert_eq!(format_pct(100.0, 2), "100.00");
        assert_eq!(format_pct(100.0 / 3.0, 1), "33.3");
        assert_eq!(format_pct(200.0 / 3.0, 0), "67");
    }

    #[test]
    fn zero_denominator_is_zero_percent() {
        assert_eq!(percentage(0, 0), 0.0);
        let rows = format_percentages(vec![row(0, 0)], 1, None);
        assert_eq!(rows[0].n_pct_subj_fmt, "0 (  0.0)");
    }

    #[test]
    fn pads_to_common_width() {
        let rows = format_percentages(vec![row(1, 2), row(12, 12), row(0, 5)], 1, None);
        let rendered: Vec<&str> = rows.iter().map(|row| row.n_pct_subj_fmt.as_str()).collect();
        assert_eq!(rendered, vec![" 1 ( 50.0)", "12 (100.0)", " 0 (  0.0)"]);
    }

    #[test]
    fn explicit_width_overrides_inference() {
        let rows = format_percentages(vec![row(1, 2)], 0, Some(3));
        assert_eq!(rows[0].n_subj_fmt, "  1");
        assert_eq!(rows[0].pct_subj_fmt, " 50");
        assert_eq!(rows[0].n_pct_subj_fmt, "  1 ( 50)");
    }

    #[test]
    fn percentage_width_tracks_digits() {
        assert_eq!(pct_width(0), 3);
        assert_eq!(pct_width(1), 5);
        assert_eq!(pct_width(2), 6);
    }
}
