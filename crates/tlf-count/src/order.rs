//! Display ordering and labels.

use tlf_model::CategoryValue;

use crate::format::FormattedRow;

/// Spaces of indentation per hierarchy level.
pub const INDENT_WIDTH: usize = 4;

/// A formatted row placed in report order.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayRow {
    /// 1-based position in the sorted table.
    pub display_index: usize,
    /// Indented label of the deepest populated category level.
    pub label: String,
    /// Zero-based depth of `label`.
    pub level: usize,
    pub formatted: FormattedRow,
}

impl DisplayRow {
    pub fn row(&self) -> &crate::CountRow {
        &self.formatted.row
    }
}

/// Label for a category path.
///
/// The deepest value that is not [`CategoryValue::All`] wins, indented by
/// [`INDENT_WIDTH`] spaces per level below the first.
///
/// ```
/// use tlf_count::display_label;
/// use tlf_model::CategoryValue;
///
/// let soc = [CategoryValue::observed("Infections"), CategoryValue::All];
/// let pt = [CategoryValue::observed("Infections"), CategoryValue::Missing];
/// assert_eq!(display_label(&soc), "Infections");
/// assert_eq!(display_label(&pt), "    Missing");
/// ```
pub fn display_label(path: &[CategoryValue]) -> String {
    let Some((level, value)) = path
        .iter()
        .enumerate()
        .rev()
        .find_map(|(level, value)| value.label().map(|label| (level, label)))
    else {
        return String::new();
    };
    format!("{:indent$}{value}", "", indent = INDENT_WIDTH * level)
}

/// Sorts rows by group, then hierarchically by category path, and labels them.
///
/// Within each level the order is the "all" row, observed values in
/// lexicographic order, then missing values.
pub fn order_and_label(rows: Vec<FormattedRow>) -> Vec<DisplayRow> {
    let mut rows = rows;
    rows.sort_by(|a, b| {
        a.row
            .group
            .cmp(&b.row.group)
            .then_with(|| a.row.path.cmp(&b.row.path))
    });
    rows.into_iter()
        .enumerate()
        .map(|(idx, formatted)| DisplayRow {
            display_index: idx + 1,
            label: display_label(&formatted.row.path),
            level: formatted.row.level(),
            formatted,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::CountRow;
    use crate::format::format_percentages;
    use tlf_model::GroupValue;

    fn row(group: GroupValue, path: Vec<CategoryValue>) -> CountRow {
        CountRow {
            group,
            path,
            n_obs: 0,
            n_subj: 0,
            n_subj_pop: 1,
        }
    }

    #[test]
    fn all_first_then_values_then_missing() {
        let rows = vec![
            row(GroupValue::arm("A"), vec![CategoryValue::Missing]),
            row(GroupValue::arm("A"), vec![CategoryValue::observed("Flu")]),
            row(GroupValue::arm("A"), vec![CategoryValue::All]),
        ];
        let ordered = order_and_label(format_percentages(rows, 1, None));
        let paths: Vec<&CategoryValue> = ordered.iter().map(|r| &r.row().path[0]).collect();
        assert_eq!(
            paths,
            vec![
                &CategoryValue::All,
                &CategoryValue::observed("Flu"),
                &CategoryValue::Missing,
            ]
        );
    }

    #[test]
    fn group_order_dominates() {
        let rows = vec![
            row(GroupValue::Total, vec![CategoryValue::observed("A")]),
            row(GroupValue::arm("B"), vec![CategoryValue::observed("Z")]),
            row(GroupValue::arm("A"), vec![CategoryValue::observed("Z")]),
        ];
        let ordered = order_and_label(format_percentages(rows, 1, None));
        let groups: Vec<&GroupValue> = ordered.iter().map(|r| &r.row().group).collect();
        assert_eq!(
            groups,
            vec![&GroupValue::arm("A"), &GroupValue::arm("B"), &GroupValue::Total]
        );
        let indices: Vec<usize> = ordered.iter().map(|r| r.display_index).collect();
        assert_eq!(indices, vec![1, 2, 3]);
    }

    #[test]
    fn children_follow_their_parent() {
        let soc = |name: &str| CategoryValue::observed(name);
        let rows = vec![
            row(GroupValue::arm("A"), vec![soc("Nervous"), CategoryValue::All]),
            row(GroupValue::arm("A"), vec![soc("Infections"), soc("Flu")]),
            row(GroupValue::arm("A"), vec![soc("Infections"), CategoryValue::All]),
            row(GroupValue::arm("A"), vec![soc("Infections"), soc("Cold")]),
        ];
        let ordered = order_and_label(format_percentages(rows, 1, None));
        let labels: Vec<&str> = ordered.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, vec!["Infections", "    Cold", "    Flu", "Nervous"]);
        let levels: Vec<usize> = ordered.iter().map(|r| r.level).collect();
        assert_eq!(levels, vec![0, 1, 1, 0]);
    }

    #[test]
    fn missing_renders_as_word() {
        assert_eq!(display_label(&[CategoryValue::Missing]), "Missing");
        assert_eq!(
            display_label(&[
                CategoryValue::observed("X"),
                CategoryValue::observed("Y"),
                CategoryValue::Missing,
            ]),
            "        Missing"
        );
    }
}
