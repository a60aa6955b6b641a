//! Counting entry points.

use polars::prelude::DataFrame;
use tlf_model::CountOptions;
use tracing::{debug, info_span};

use crate::aggregate::aggregate;
use crate::error::Result;
use crate::format::format_percentages;
use crate::frame::{display_rows_to_frame, subject_counts_to_frame};
use crate::observation::{Observations, join_observations};
use crate::order::{DisplayRow, order_and_label};
use crate::population::{NormalizedPopulation, Population, normalize};
use crate::subjects::{SubjectCounts, count_normalized};

/// A normalized population with its denominators, reusable across several
/// observation tables.
///
/// Every block of a report counted through the same `Counter` shares the same
/// group domain and the same `n_subj_pop` values.
#[derive(Debug, Clone)]
pub struct Counter {
    population: NormalizedPopulation,
    denominators: SubjectCounts,
    options: CountOptions,
}

impl Counter {
    pub fn new(population: &Population, options: CountOptions) -> Result<Self> {
        let population = normalize(population, options.include_total, options.missing_group)?;
        let denominators = count_normalized(&population);
        Ok(Self {
            population,
            denominators,
            options,
        })
    }

    pub fn from_frame(
        df: &DataFrame,
        id_col: &str,
        group_col: &str,
        options: CountOptions,
    ) -> Result<Self> {
        let population = Population::from_frame(df, id_col, group_col)?;
        Self::new(&population, options)
    }

    pub fn population(&self) -> &NormalizedPopulation {
        &self.population
    }

    pub fn denominators(&self) -> &SubjectCounts {
        &self.denominators
    }

    pub fn options(&self) -> &CountOptions {
        &self.options
    }

    /// Pads every count this counter formats to `width` characters.
    #[must_use]
    pub fn with_max_n_width(mut self, width: usize) -> Self {
        self.options.max_n_width = Some(width);
        self
    }

    /// Runs join, aggregation, formatting and ordering for one observation table.
    pub fn count(&self, observations: &Observations) -> Result<Vec<DisplayRow>> {
        let span = info_span!(
            "count",
            categories = observations.category_cols().len(),
            events = observations.len()
        );
        let _guard = span.enter();

        let joined = join_observations(&self.population, observations)?;
        let rows = aggregate(&joined, &self.denominators);
        let formatted = format_percentages(rows, self.options.pct_digits, self.options.max_n_width);
        let ordered = order_and_label(formatted);
        debug!(rows = ordered.len(), "counted observations");
        Ok(ordered)
    }

    /// Reads `category_cols` from an event-level DataFrame and counts them.
    pub fn count_frame<S: AsRef<str>>(
        &self,
        df: &DataFrame,
        category_cols: &[S],
    ) -> Result<Vec<DisplayRow>> {
        let observations = Observations::from_frame(df, self.population.id_col(), category_cols)?;
        self.count(&observations)
    }
}

/// Per-group subject denominators of a population DataFrame.
///
/// The returned table is in group-domain order, with `Total` last when
/// `options.include_total` is set.
pub fn count_subjects(
    df: &DataFrame,
    id_col: &str,
    group_col: &str,
    options: &CountOptions,
) -> Result<SubjectCounts> {
    let counter = Counter::from_frame(df, id_col, group_col, options.clone())?;
    Ok(counter.denominators)
}

/// Same as [`count_subjects`], as a two-column DataFrame `[group_col, n_subj_pop]`.
pub fn count_subjects_frame(
    df: &DataFrame,
    id_col: &str,
    group_col: &str,
    options: &CountOptions,
) -> Result<DataFrame> {
    let counts = count_subjects(df, id_col, group_col, options)?;
    Ok(subject_counts_to_frame(&counts, group_col)?)
}

/// Counts events and subjects of `observation` by group and category path.
///
/// Rows come back in display order: by group, then hierarchically by category,
/// with the "all" row of each level first and missing values last.
pub fn aggregate_with_observations<S: AsRef<str>>(
    population: &DataFrame,
    observation: &DataFrame,
    id_col: &str,
    group_col: &str,
    category_cols: &[S],
    options: &CountOptions,
) -> Result<Vec<DisplayRow>> {
    let counter = Counter::from_frame(population, id_col, group_col, options.clone())?;
    counter.count_frame(observation, category_cols)
}

/// Same as [`aggregate_with_observations`], as a long-format DataFrame.
///
/// See [`display_rows_to_frame`] for the column layout.
pub fn aggregate_with_observations_frame<S: AsRef<str>>(
    population: &DataFrame,
    observation: &DataFrame,
    id_col: &str,
    group_col: &str,
    category_cols: &[S],
    options: &CountOptions,
) -> Result<DataFrame> {
    let rows = aggregate_with_observations(
        population,
        observation,
        id_col,
        group_col,
        category_cols,
        options,
    )?;
    Ok(display_rows_to_frame(&rows, group_col, category_cols)?)
}
