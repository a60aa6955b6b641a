//! Multi-section summary tables.

use polars::prelude::DataFrame;
use tlf_count::{Counter, Observations, format_pct, pct_width};
use tlf_model::CountOptions;
use tracing::{debug, info};

use crate::ard::{Ard, ArdRecord};
use crate::error::Result;

/// Indentation of detail rows under a section header.
pub const DETAIL_INDENT: usize = 4;

/// Builds an [`Ard`] section by section over one population.
///
/// Every section is counted against the same normalized population, so all
/// sections share the same group columns and denominators. Unless the options
/// fix `max_n_width`, counts are padded to the width of the largest
/// denominator, which no section can exceed, so every column lines up.
///
/// ```no_run
/// # fn run(adsl: &polars::prelude::DataFrame, adae: &polars::prelude::DataFrame) -> tlf_report::Result<()> {
/// use tlf_model::CountOptions;
/// use tlf_report::SummaryBuilder;
///
/// let ard = SummaryBuilder::new(adsl, "USUBJID", "TRT01A", CountOptions::default())?
///     .population_row("Participants in Population")
///     .any_row("With one or more adverse events", adae)?
///     .hierarchy(adae, &["AEBODSYS", "AEDECOD"])?
///     .build();
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct SummaryBuilder {
    counter: Counter,
    ard: Ard,
}

impl SummaryBuilder {
    pub fn new(
        population: &DataFrame,
        id_col: &str,
        group_col: &str,
        options: CountOptions,
    ) -> Result<Self> {
        let counter = Counter::from_frame(population, id_col, group_col, options)?;
        Ok(Self::from_counter(counter))
    }

    pub fn from_counter(counter: Counter) -> Self {
        let counter = match counter.options().max_n_width {
            Some(_) => counter,
            None => {
                let width = counter
                    .denominators()
                    .iter()
                    .map(|(_, n)| n.to_string().len())
                    .max()
                    .unwrap_or(1);
                counter.with_max_n_width(width)
            }
        };
        Self {
            counter,
            ard: Ard::new(),
        }
    }

    pub fn counter(&self) -> &Counter {
        &self.counter
    }

    /// Adds the denominator row.
    #[must_use]
    pub fn population_row(mut self, label: &str) -> Self {
        let section = Ard::population(self.counter.denominators(), label);
        self.ard.append(section);
        self
    }

    /// Adds a "subjects with one or more" row counting every subject that
    /// has at least one row in `observation`.
    ///
    /// Percentages use the population denominator of each group.
    pub fn any_row(mut self, label: &str, observation: &DataFrame) -> Result<Self> {
        let observations =
            Observations::flagged(observation, self.counter.population().id_col(), label)?;
        let rows = self.counter.count(&observations)?;
        if rows.is_empty() {
            // No events at all still shows a zero row for every group.
            self.ard.append(self.zero_row(label));
        } else {
            self.ard.append(Ard::from_display(&rows, Some(label)));
        }
        Ok(self)
    }

    /// Adds a hierarchical block: one row per observed category path.
    pub fn hierarchy<S: AsRef<str>>(
        mut self,
        observation: &DataFrame,
        category_cols: &[S],
    ) -> Result<Self> {
        let rows = self.counter.count_frame(observation, category_cols)?;
        debug!(rows = rows.len(), "added hierarchy section");
        self.ard.append(Ard::from_display(&rows, None));
        Ok(self)
    }

    /// Adds a header row followed by the values of `detail_col`, indented.
    ///
    /// The header counts subjects with any row in `observation`. The block is
    /// skipped when `observation` is empty.
    pub fn header_with_details(
        mut self,
        header: &str,
        observation: &DataFrame,
        detail_col: &str,
    ) -> Result<Self> {
        if observation.height() == 0 {
            info!(section = header, "skipped section without observations");
            return Ok(self);
        }
        let id_col = self.counter.population().id_col();
        let flagged = Observations::flagged(observation, id_col, header)?;
        let header_rows = self.counter.count(&flagged)?;
        let details = self.counter.count_frame(observation, &[detail_col])?;

        self.ard.append(Ard::from_display(&header_rows, Some(header)));
        self.ard.append(Ard::from_display(&details, None).indent(DETAIL_INDENT));
        Ok(self)
    }

    pub fn build(self) -> Ard {
        self.ard
    }

    fn zero_row(&self, label: &str) -> Ard {
        let options = self.counter.options();
        let n_width = options.max_n_width.unwrap_or(1);
        let pct = format!(
            "{:>width$}",
            format_pct(0.0, options.pct_digits),
            width = pct_width(options.pct_digits)
        );
        self.counter
            .denominators()
            .groups()
            .map(|group| {
                let value = format!("{:>n_width$} ({pct})", 0);
                ArdRecord::new(0, label, group.to_string(), value)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::{Column, IntoColumn, NamedFrom, Series};

    fn test_df(columns: Vec<(&str, Vec<&str>)>) -> DataFrame {
        let cols: Vec<Column> = columns
            .into_iter()
            .map(|(name, values)| Series::new(name.into(), values).into_column())
            .collect();
        DataFrame::new(cols).unwrap()
    }

    fn builder() -> SummaryBuilder {
        let adsl = test_df(vec![
            ("USUBJID", vec!["01", "02", "03"]),
            ("TRT01A", vec!["A", "A", "B"]),
        ]);
        SummaryBuilder::new(&adsl, "USUBJID", "TRT01A", CountOptions::default()).unwrap()
    }

    #[test]
    fn population_row_lists_every_group() {
        let ard = builder().population_row("Participants").build();
        let values: Vec<(&str, &str)> = ard
            .iter()
            .map(|r| (r.group.as_str(), r.value.as_str()))
            .collect();
        assert_eq!(values, vec![("A", "2"), ("B", "1"), ("Total", "3")]);
    }

    #[test]
    fn any_row_uses_population_denominator() {
        let adae = test_df(vec![
            ("USUBJID", vec!["01", "01"]),
            ("AEDECOD", vec!["Flu", "Cold"]),
        ]);
        let ard = builder().any_row("Any AE", &adae).unwrap().build();
        let values: Vec<&str> = ard.iter().map(|r| r.value.as_str()).collect();
        assert_eq!(values, vec!["1 ( 50.0)", "0 (  0.0)", "1 ( 33.3)"]);
        assert!(ard.iter().all(|r| r.index == "Any AE"));
    }

    #[test]
    fn any_row_without_events_is_zero() {
        let adae = test_df(vec![("USUBJID", vec![])]);
        let ard = builder().any_row("Any AE", &adae).unwrap().build();
        let values: Vec<&str> = ard.iter().map(|r| r.value.as_str()).collect();
        assert_eq!(values, vec!["0 (  0.0)"; 3]);
    }

    #[test]
    fn sections_share_one_count_width() {
        let ids: Vec<String> = (1..=10).map(|i| format!("{i:02}")).collect();
        let ids: Vec<&str> = ids.iter().map(String::as_str).collect();
        let adsl = test_df(vec![("USUBJID", ids.clone()), ("TRT01A", vec!["A"; 10])]);
        let mut terms = vec!["Cold"; 10];
        terms[0] = "Flu";
        let adae = test_df(vec![("USUBJID", ids), ("AEDECOD", terms)]);

        let ard = SummaryBuilder::new(&adsl, "USUBJID", "TRT01A", CountOptions::default())
            .unwrap()
            .any_row("Any AE", &adae)
            .unwrap()
            .hierarchy(&adae, &["AEDECOD"])
            .unwrap()
            .build();
        let values: Vec<&str> = ard
            .iter()
            .filter(|r| r.group == "A")
            .map(|r| r.value.as_str())
            .collect();
        assert_eq!(values, vec!["10 (100.0)", " 9 ( 90.0)", " 1 ( 10.0)"]);
    }

    #[test]
    fn repeated_labels_get_their_own_rows() {
        let adae = test_df(vec![
            ("USUBJID", vec!["01", "02", "03"]),
            ("AEBODSYS", vec!["Cardiac", "Nervous", "Nervous"]),
            ("AEDECOD", vec!["", "", "Headache"]),
        ]);
        let ard = builder()
            .hierarchy(&adae, &["AEBODSYS", "AEDECOD"])
            .unwrap()
            .build();
        let labels: Vec<(usize, &str)> = ard
            .iter()
            .filter(|r| r.group == "A")
            .map(|r| (r.row, r.index.as_str()))
            .collect();
        assert_eq!(
            labels,
            vec![
                (0, "Cardiac"),
                (1, "    Missing"),
                (2, "Nervous"),
                (3, "    Headache"),
                (4, "    Missing"),
            ]
        );
        assert_eq!(ard.row_count(), 5);
    }

    #[test]
    fn empty_detail_block_is_skipped() {
        let failures = test_df(vec![("USUBJID", vec![]), ("IETEST", vec![])]);
        let ard = builder()
            .header_with_details("Inclusion Criteria Not Met", &failures, "IETEST")
            .unwrap()
            .build();
        assert!(ard.is_empty());
    }

    #[test]
    fn details_are_indented_under_header() {
        let failures = test_df(vec![
            ("USUBJID", vec!["02"]),
            ("IETEST", vec!["Age >= 18"]),
        ]);
        let ard = builder()
            .header_with_details("Inclusion Criteria Not Met", &failures, "IETEST")
            .unwrap()
            .build();
        let indexes: Vec<&str> = ard
            .iter()
            .filter(|r| r.group == "A")
            .map(|r| r.index.as_str())
            .collect();
        assert_eq!(indexes, vec!["Inclusion Criteria Not Met", "    Age >= 18"]);
    }
}
