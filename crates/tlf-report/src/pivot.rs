//! Wide display tables.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use polars::prelude::{
    Column, DataFrame, IntoColumn, NamedFrom, PolarsError, PolarsResult, Series,
};

use crate::ard::Ard;

/// Pivots an ARD into one row per display row and one column per group.
///
/// Rows are keyed on [`ArdRecord::row`](crate::ArdRecord::row), so rows that
/// share a label stay separate. Rows and group columns keep their order of
/// first appearance in the ARD; the label of a row is taken from its first
/// record. Cells with no record are null. A second record for the same row and
/// group is an error.
pub fn pivot(ard: &Ard, index_header: &str) -> PolarsResult<DataFrame> {
    let mut rows: Vec<usize> = Vec::new();
    let mut labels: HashMap<usize, &str> = HashMap::new();
    let mut groups: Vec<&str> = Vec::new();
    let mut cells: HashMap<(usize, &str), &str> = HashMap::new();

    for record in ard {
        let group = record.group.as_str();
        if let Entry::Vacant(slot) = labels.entry(record.row) {
            slot.insert(record.index.as_str());
            rows.push(record.row);
        }
        if !groups.contains(&group) {
            groups.push(group);
        }
        match cells.entry((record.row, group)) {
            Entry::Vacant(slot) => {
                slot.insert(record.value.as_str());
            }
            Entry::Occupied(_) => {
                return Err(PolarsError::Duplicate(
                    format!(
                        "row {} ('{}') has more than one value for group '{}'",
                        record.row, record.index, group
                    )
                    .into(),
                ));
            }
        }
    }

    let index: Vec<&str> = rows
        .iter()
        .map(|row| labels.get(row).copied().unwrap_or_default())
        .collect();
    let mut columns: Vec<Column> = Vec::with_capacity(groups.len() + 1);
    columns.push(Series::new(index_header.into(), index).into_column());
    for group in &groups {
        let values: Vec<Option<&str>> = rows
            .iter()
            .map(|row| cells.get(&(*row, *group)).copied())
            .collect();
        columns.push(Series::new((*group).into(), values).into_column());
    }
    DataFrame::new(columns)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ard::ArdRecord;

    fn column(df: &DataFrame, name: &str) -> Vec<Option<String>> {
        df.column(name)
            .unwrap()
            .str()
            .unwrap()
            .into_iter()
            .map(|value| value.map(str::to_string))
            .collect()
    }

    #[test]
    fn keeps_first_appearance_order() {
        let ard: Ard = [
            ArdRecord::new(0, "Participants", "B", "3"),
            ArdRecord::new(0, "Participants", "A", "2"),
            ArdRecord::new(1, "Flu", "B", "1"),
            ArdRecord::new(1, "Flu", "A", "2"),
        ]
        .into_iter()
        .collect();
        let df = pivot(&ard, "Term").unwrap();
        let names: Vec<&str> = df.get_column_names().iter().map(|n| n.as_str()).collect();
        assert_eq!(names, vec!["Term", "B", "A"]);
        assert_eq!(
            column(&df, "Term"),
            vec![Some("Participants".to_string()), Some("Flu".to_string())]
        );
    }

    #[test]
    fn absent_cells_are_null() {
        let ard: Ard = [
            ArdRecord::new(0, "Flu", "A", "1"),
            ArdRecord::new(1, "Cold", "B", "2"),
        ]
        .into_iter()
        .collect();
        let df = pivot(&ard, "Term").unwrap();
        assert_eq!(column(&df, "A"), vec![Some("1".to_string()), None]);
        assert_eq!(column(&df, "B"), vec![None, Some("2".to_string())]);
    }

    #[test]
    fn rows_sharing_a_label_stay_separate() {
        let ard: Ard = [
            ArdRecord::new(0, "Cardiac", "A", "1"),
            ArdRecord::new(1, "    Missing", "A", "1"),
            ArdRecord::new(2, "Nervous", "A", "2"),
            ArdRecord::new(3, "    Missing", "A", "2"),
        ]
        .into_iter()
        .collect();
        let df = pivot(&ard, "Term").unwrap();
        assert_eq!(df.height(), 4);
        assert_eq!(
            column(&df, "A"),
            vec![
                Some("1".to_string()),
                Some("1".to_string()),
                Some("2".to_string()),
                Some("2".to_string()),
            ]
        );
    }

    #[test]
    fn repeated_cell_is_an_error() {
        let ard: Ard = [
            ArdRecord::new(0, "Flu", "A", "1"),
            ArdRecord::new(0, "Flu", "A", "9"),
        ]
        .into_iter()
        .collect();
        let err = pivot(&ard, "Term").unwrap_err();
        assert!(matches!(err, PolarsError::Duplicate(_)));
    }
}
