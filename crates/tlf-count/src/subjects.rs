//! Per-group subject denominators.

use std::collections::BTreeMap;

use tlf_model::GroupValue;

use crate::population::NormalizedPopulation;

/// Number of subjects in each group, in group-domain order.
///
/// This is the denominator table for every percentage in a report.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubjectCounts {
    counts: Vec<(GroupValue, usize)>,
}

impl SubjectCounts {
    /// Denominator for a group, `None` when the group is not in the domain.
    pub fn get(&self, group: &GroupValue) -> Option<usize> {
        self.counts
            .iter()
            .find(|(candidate, _)| candidate == group)
            .map(|(_, count)| *count)
    }

    pub fn groups(&self) -> impl Iterator<Item = &GroupValue> + '_ {
        self.counts.iter().map(|(group, _)| group)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&GroupValue, usize)> + '_ {
        self.counts.iter().map(|(group, count)| (group, *count))
    }

    /// The `Total` row, when the population was normalized with a total group.
    pub fn total(&self) -> Option<usize> {
        self.get(&GroupValue::Total)
    }

    /// Sum over every group except `Total`.
    pub fn arm_sum(&self) -> usize {
        self.counts
            .iter()
            .filter(|(group, _)| !group.is_total())
            .map(|(_, count)| count)
            .sum()
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

/// Counts subjects per group over the normalized memberships.
///
/// The total group is counted as its own group of memberships, never as a
/// sum of the arm counts.
pub fn count_normalized(population: &NormalizedPopulation) -> SubjectCounts {
    let mut tally: BTreeMap<&GroupValue, usize> = BTreeMap::new();
    for (_, group) in population.memberships() {
        *tally.entry(group).or_default() += 1;
    }
    let counts = population
        .groups()
        .iter()
        .map(|group| (group.clone(), tally.get(group).copied().unwrap_or(0)))
        .collect();
    SubjectCounts { counts }
}
