//! Hierarchical, zero-filled counting.
//!
//! For a hierarchy of `d` category columns, level `k` groups the joined events
//! by group and the first `k` category values. Each level is crossed with the
//! full group domain so that a combination seen in any group appears in every
//! group, with zero counts where nothing was observed. Columns deeper than `k`
//! are filled with [`CategoryValue::All`], which gives every level the same
//! shape and lets all levels be stacked into one long table.

use std::collections::{BTreeSet, HashMap, HashSet};

use tlf_model::{CategoryValue, GroupValue, SubjectId};
use tracing::{debug, debug_span};

use crate::observation::JoinedObservations;
use crate::subjects::SubjectCounts;

/// One cell of the long-format count table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountRow {
    pub group: GroupValue,
    /// One value per category column; trailing levels not yet reached are `All`.
    pub path: Vec<CategoryValue>,
    /// Number of events.
    pub n_obs: usize,
    /// Number of distinct subjects with at least one event.
    pub n_subj: usize,
    /// Subjects in the group's population.
    pub n_subj_pop: usize,
}

impl CountRow {
    /// Zero-based index of the deepest category level this row describes.
    pub fn level(&self) -> usize {
        self.path
            .iter()
            .rposition(|value| !value.is_all())
            .unwrap_or(0)
    }
}

#[derive(Default)]
struct Tally<'a> {
    n_obs: usize,
    subjects: HashSet<&'a SubjectId>,
}

/// Counts events and subjects at every level of the category hierarchy.
///
/// Rows are emitted level by level; within a level, groups follow the
/// denominator table and combinations follow their natural order. Use
/// [`order_and_label`](crate::order_and_label) for display order.
pub fn aggregate(joined: &JoinedObservations, denominators: &SubjectCounts) -> Vec<CountRow> {
    let depth = joined.depth();
    let span = debug_span!("aggregate", depth, groups = denominators.len());
    let _guard = span.enter();

    let mut rows = Vec::new();
    for k in 1..=depth {
        let mut tallies: HashMap<(&GroupValue, &[CategoryValue]), Tally<'_>> = HashMap::new();
        let mut combinations: BTreeSet<&[CategoryValue]> = BTreeSet::new();
        for event in joined.rows() {
            let key = &event.path[..k];
            combinations.insert(key);
            let tally = tallies.entry((&event.group, key)).or_default();
            tally.n_obs += 1;
            tally.subjects.insert(&event.subject);
        }

        let before = rows.len();
        for (group, n_subj_pop) in denominators.iter() {
            for combination in &combinations {
                let (n_obs, n_subj) = tallies
                    .get(&(group, *combination))
                    .map_or((0, 0), |tally| (tally.n_obs, tally.subjects.len()));
                let mut path = Vec::with_capacity(depth);
                path.extend_from_slice(combination);
                path.resize(depth, CategoryValue::All);
                rows.push(CountRow {
                    group: group.clone(),
                    path,
                    n_obs,
                    n_subj,
                    n_subj_pop,
                });
            }
        }
        debug!(
            level = k,
            combinations = combinations.len(),
            rows = rows.len() - before,
            "aggregated hierarchy level"
        );
    }
    rows
}
