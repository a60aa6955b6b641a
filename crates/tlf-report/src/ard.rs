//! Analysis results data.
//!
//! An ARD is the long form of a summary table: one record per displayed cell,
//! keyed by the display row (`row`) and the column (`group`). The row label
//! (`index`) is only text: two rows may share a label, such as a missing term
//! under two body systems. Sections of a report are built independently and
//! appended in display order.

use std::collections::HashMap;

use polars::prelude::{DataFrame, IntoColumn, NamedFrom, PolarsResult, Series};
use serde::{Deserialize, Serialize};
use tlf_count::{DisplayRow, SubjectCounts};
use tlf_model::CategoryValue;

pub const ROW_COLUMN: &str = "row";
pub const INDEX_COLUMN: &str = "index";
pub const GROUP_COLUMN: &str = "group";
pub const VALUE_COLUMN: &str = "value";

/// One cell of a summary table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArdRecord {
    /// Zero-based display row, unique within an [`Ard`].
    pub row: usize,
    /// Row label, possibly indented.
    pub index: String,
    /// Column label, the rendered group.
    pub group: String,
    /// Cell text.
    pub value: String,
}

impl ArdRecord {
    pub fn new(
        row: usize,
        index: impl Into<String>,
        group: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            row,
            index: index.into(),
            group: group.into(),
            value: value.into(),
        }
    }
}

/// Ordered list of [`ArdRecord`]s.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ard {
    records: Vec<ArdRecord>,
}

impl Ard {
    pub fn new() -> Self {
        Self::default()
    }

    /// One record per group carrying the plain subject count.
    pub fn population(counts: &SubjectCounts, label: &str) -> Self {
        let records = counts
            .iter()
            .map(|(group, n)| ArdRecord::new(0, label, group.to_string(), n.to_string()))
            .collect();
        Self { records }
    }

    /// One record per display row carrying its `n (pct)` text.
    ///
    /// The row label is used as the index unless `label` overrides it. Each
    /// distinct category path becomes one display row, numbered in order of
    /// first appearance.
    pub fn from_display(rows: &[DisplayRow], label: Option<&str>) -> Self {
        let mut positions: HashMap<&[CategoryValue], usize> = HashMap::new();
        let records = rows
            .iter()
            .map(|row| {
                let next = positions.len();
                let position = *positions.entry(row.row().path.as_slice()).or_insert(next);
                ArdRecord::new(
                    position,
                    label.unwrap_or(&row.label),
                    row.row().group.to_string(),
                    row.formatted.n_pct_subj_fmt.as_str(),
                )
            })
            .collect();
        Self { records }
    }

    /// Prefixes every index with `spaces` spaces.
    #[must_use]
    pub fn indent(mut self, spaces: usize) -> Self {
        let prefix = " ".repeat(spaces);
        for record in &mut self.records {
            record.index.insert_str(0, &prefix);
        }
        self
    }

    pub fn push(&mut self, record: ArdRecord) {
        self.records.push(record);
    }

    /// Appends `other` below the existing rows.
    pub fn append(&mut self, other: Ard) {
        let offset = self.row_count();
        self.records.extend(other.records.into_iter().map(|mut record| {
            record.row += offset;
            record
        }));
    }

    /// Number of display rows, one past the highest `row`.
    pub fn row_count(&self) -> usize {
        self.records
            .iter()
            .map(|record| record.row + 1)
            .max()
            .unwrap_or(0)
    }

    pub fn records(&self) -> &[ArdRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ArdRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Long DataFrame with a `row` column, then string columns `index`,
    /// `group` and `value`.
    pub fn to_frame(&self) -> PolarsResult<DataFrame> {
        let row: Vec<u64> = self.records.iter().map(|r| r.row as u64).collect();
        let index: Vec<&str> = self.records.iter().map(|r| r.index.as_str()).collect();
        let group: Vec<&str> = self.records.iter().map(|r| r.group.as_str()).collect();
        let value: Vec<&str> = self.records.iter().map(|r| r.value.as_str()).collect();
        DataFrame::new(vec![
            Series::new(ROW_COLUMN.into(), row).into_column(),
            Series::new(INDEX_COLUMN.into(), index).into_column(),
            Series::new(GROUP_COLUMN.into(), group).into_column(),
            Series::new(VALUE_COLUMN.into(), value).into_column(),
        ])
    }
}

impl FromIterator<ArdRecord> for Ard {
    fn from_iter<I: IntoIterator<Item = ArdRecord>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Ard {
    type Item = &'a ArdRecord;
    type IntoIter = std::slice::Iter<'a, ArdRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Ard {
        [
            ArdRecord::new(0, "Flu", "A", "1 (50.0)"),
            ArdRecord::new(0, "Flu", "B", "0 ( 0.0)"),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn indent_prefixes_every_index() {
        let ard = sample().indent(4);
        assert!(ard.iter().all(|record| record.index == "    Flu"));
    }

    #[test]
    fn append_keeps_order() {
        let mut ard = Ard::new();
        ard.push(ArdRecord::new(0, "Participants", "A", "2"));
        ard.append(sample());
        let indexes: Vec<&str> = ard.iter().map(|r| r.index.as_str()).collect();
        assert_eq!(indexes, vec!["Participants", "Flu", "Flu"]);
        let rows: Vec<usize> = ard.iter().map(|r| r.row).collect();
        assert_eq!(rows, vec![0, 1, 1]);
        assert_eq!(ard.row_count(), 2);
    }

    #[test]
    fn frame_has_three_string_columns() {
        let df = sample().to_frame().unwrap();
        assert_eq!(df.shape(), (2, 4));
        let values: Vec<Option<&str>> = df
            .column(VALUE_COLUMN)
            .unwrap()
            .str()
            .unwrap()
            .into_iter()
            .collect();
        assert_eq!(values, vec![Some("1 (50.0)"), Some("0 ( 0.0)")]);
    }
}
