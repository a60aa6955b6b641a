//! Population normalization.
//!
//! A population is one row per subject. Normalization checks the subject key,
//! resolves null groups according to [`MissingGroupPolicy`], and, when a total
//! column is requested, gives every subject a second membership in
//! [`GroupValue::Total`]. Grouping over the memberships then yields arm-level
//! and total counts in a single pass without summing groups together.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use polars::prelude::DataFrame;
use tlf_common::{column_texts, find_column};
use tlf_model::{GroupValue, MissingGroupPolicy, SubjectId, TlfError};
use tracing::{debug, warn};

use crate::error::{CountError, POPULATION_TABLE, Result};

static TOTAL: GroupValue = GroupValue::Total;

/// One subject as supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopulationRecord {
    /// `None` when the id cell was null or blank.
    pub subject: Option<SubjectId>,
    /// `None` when the group cell was null or blank.
    pub group: Option<String>,
}

/// Subject-level input table.
#[derive(Debug, Clone)]
pub struct Population {
    id_col: String,
    group_col: String,
    records: Vec<PopulationRecord>,
}

impl Population {
    pub fn new(id_col: impl Into<String>, group_col: impl Into<String>) -> Self {
        Self {
            id_col: id_col.into(),
            group_col: group_col.into(),
            records: Vec::new(),
        }
    }

    /// Builds a population from `(id, group)` pairs.
    pub fn from_pairs<I, S, G>(id_col: &str, group_col: &str, rows: I) -> Self
    where
        I: IntoIterator<Item = (S, Option<G>)>,
        S: Into<String>,
        G: Into<String>,
    {
        let mut population = Self::new(id_col, group_col);
        for (id, group) in rows {
            population.push(Some(id.into()), group.map(Into::into));
        }
        population
    }

    /// Reads the id and group columns of a subject-level DataFrame.
    ///
    /// Column names are matched exactly first, then case-insensitively.
    pub fn from_frame(df: &DataFrame, id_col: &str, group_col: &str) -> Result<Self> {
        let ids = find_column(df, id_col)
            .ok_or_else(|| CountError::column_not_found(id_col, POPULATION_TABLE))?;
        let groups = find_column(df, group_col)
            .ok_or_else(|| CountError::column_not_found(group_col, POPULATION_TABLE))?;
        let ids = column_texts(ids)?;
        let groups = column_texts(groups)?;

        let mut population = Self::new(id_col, group_col);
        population.records.reserve(ids.len());
        for (id, group) in ids.into_iter().zip(groups) {
            population.push(id, group);
        }
        Ok(population)
    }

    pub fn push(&mut self, id: Option<String>, group: Option<String>) {
        let group = group.and_then(|value| {
            let trimmed = value.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        });
        self.records.push(PopulationRecord {
            subject: id.and_then(SubjectId::new),
            group,
        });
    }

    pub fn id_col(&self) -> &str {
        &self.id_col
    }

    pub fn group_col(&self) -> &str {
        &self.group_col
    }

    pub fn records(&self) -> &[PopulationRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// A validated population with its group domain.
#[derive(Debug, Clone)]
pub struct NormalizedPopulation {
    id_col: String,
    group_col: String,
    include_total: bool,
    /// Each retained subject's own group.
    subjects: HashMap<SubjectId, GroupValue>,
    /// Subjects removed under [`MissingGroupPolicy::Ignore`].
    excluded: HashSet<SubjectId>,
    /// Distinct groups in report order, `Total` last when requested.
    groups: Vec<GroupValue>,
}

impl NormalizedPopulation {
    pub fn id_col(&self) -> &str {
        &self.id_col
    }

    pub fn group_col(&self) -> &str {
        &self.group_col
    }

    pub fn include_total(&self) -> bool {
        self.include_total
    }

    /// The group domain in report order.
    pub fn groups(&self) -> &[GroupValue] {
        &self.groups
    }

    /// Number of distinct retained subjects.
    pub fn subject_count(&self) -> usize {
        self.subjects.len()
    }

    pub fn contains(&self, subject: &SubjectId) -> bool {
        self.subjects.contains_key(subject)
    }

    pub fn is_excluded(&self, subject: &SubjectId) -> bool {
        self.excluded.contains(subject)
    }

    /// Every group a subject counts towards: its own group, then `Total`.
    pub fn memberships_of(&self, subject: &SubjectId) -> Vec<&GroupValue> {
        let Some(group) = self.subjects.get(subject) else {
            return Vec::new();
        };
        let mut memberships = vec![group];
        if self.include_total {
            memberships.push(&TOTAL);
        }
        memberships
    }

    /// Iterates `(subject, group)` memberships, one per row of the doubled
    /// table when the total group is enabled.
    pub fn memberships(&self) -> impl Iterator<Item = (&SubjectId, &GroupValue)> + '_ {
        self.subjects.iter().flat_map(move |(subject, group)| {
            let total = self.include_total.then_some((subject, &TOTAL));
            std::iter::once((subject, group)).chain(total)
        })
    }
}

/// Validates a population and assigns its group domain.
///
/// Fails with [`TlfError::DuplicateId`] when a subject appears twice and with
/// [`TlfError::MissingGroup`] when a group is null under
/// [`MissingGroupPolicy::Error`].
pub fn normalize(
    population: &Population,
    include_total: bool,
    policy: MissingGroupPolicy,
) -> std::result::Result<NormalizedPopulation, TlfError> {
    let mut occurrences: BTreeMap<&SubjectId, usize> = BTreeMap::new();
    for record in population.records() {
        let Some(subject) = record.subject.as_ref() else {
            return Err(TlfError::MissingSubjectId {
                column: population.id_col().to_string(),
                table: POPULATION_TABLE.to_string(),
            });
        };
        *occurrences.entry(subject).or_default() += 1;
    }
    let duplicates: Vec<String> = occurrences
        .into_iter()
        .filter(|(_, count)| *count > 1)
        .map(|(subject, _)| subject.to_string())
        .collect();
    if !duplicates.is_empty() {
        return Err(TlfError::DuplicateId {
            column: population.id_col().to_string(),
            ids: duplicates,
        });
    }

    let mut subjects = HashMap::with_capacity(population.len());
    let mut excluded = HashSet::new();
    for record in population.records() {
        let Some(subject) = record.subject.clone() else {
            continue;
        };
        let group = match (&record.group, policy) {
            (Some(name), _) => GroupValue::Arm(name.clone()),
            (None, MissingGroupPolicy::Error) => {
                return Err(TlfError::MissingGroup {
                    column: population.group_col().to_string(),
                    policy,
                });
            }
            (None, MissingGroupPolicy::Ignore) => {
                excluded.insert(subject);
                continue;
            }
            (None, MissingGroupPolicy::Fill) => GroupValue::Missing,
        };
        subjects.insert(subject, group);
    }

    if !excluded.is_empty() {
        warn!(
            column = population.group_col(),
            dropped = excluded.len(),
            "ignoring subjects with a missing group"
        );
    }

    let mut domain: BTreeSet<GroupValue> = subjects.values().cloned().collect();
    if include_total && !subjects.is_empty() {
        domain.insert(GroupValue::Total);
    }
    let groups: Vec<GroupValue> = domain.into_iter().collect();
    debug!(
        subjects = subjects.len(),
        groups = groups.len(),
        include_total,
        "normalized population"
    );

    Ok(NormalizedPopulation {
        id_col: population.id_col().to_string(),
        group_col: population.group_col().to_string(),
        include_total,
        subjects,
        excluded,
        groups,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn population(rows: &[(&str, Option<&str>)]) -> Population {
        Population::from_pairs("USUBJID", "TRT01A", rows.iter().copied())
    }

    #[test]
    fn total_is_ordered_last() {
        let pop = population(&[("01", Some("B")), ("02", Some("A"))]);
        let normalized = normalize(&pop, true, MissingGroupPolicy::Error).unwrap();
        assert_eq!(
            normalized.groups(),
            &[GroupValue::arm("A"), GroupValue::arm("B"), GroupValue::Total]
        );
    }

    #[test]
    fn memberships_double_with_total() {
        let pop = population(&[("01", Some("A")), ("02", Some("B"))]);
        let normalized = normalize(&pop, true, MissingGroupPolicy::Error).unwrap();
        assert_eq!(normalized.memberships().count(), 4);
        let without = normalize(&pop, false, MissingGroupPolicy::Error).unwrap();
        assert_eq!(without.memberships().count(), 2);
    }

    #[test]
    fn duplicate_ids_are_listed() {
        let pop = population(&[("01", Some("A")), ("01", Some("B")), ("02", Some("A"))]);
        let err = normalize(&pop, true, MissingGroupPolicy::Error).unwrap_err();
        assert_eq!(
            err,
            TlfError::DuplicateId {
                column: "USUBJID".to_string(),
                ids: vec!["01".to_string()],
            }
        );
    }

    #[test]
    fn missing_group_errors_by_default() {
        let pop = population(&[("01", Some("A")), ("02", None)]);
        let err = normalize(&pop, true, MissingGroupPolicy::Error).unwrap_err();
        assert!(matches!(err, TlfError::MissingGroup { .. }));
    }

    #[test]
    fn missing_group_ignored() {
        let pop = population(&[("01", Some("A")), ("02", None)]);
        let normalized = normalize(&pop, true, MissingGroupPolicy::Ignore).unwrap();
        assert_eq!(normalized.subject_count(), 1);
        let dropped = SubjectId::new("02").unwrap();
        assert!(normalized.is_excluded(&dropped));
        assert!(!normalized.contains(&dropped));
    }

    #[test]
    fn missing_group_filled_before_total() {
        let pop = population(&[("01", Some("A")), ("02", None)]);
        let normalized = normalize(&pop, true, MissingGroupPolicy::Fill).unwrap();
        assert_eq!(
            normalized.groups(),
            &[GroupValue::arm("A"), GroupValue::Missing, GroupValue::Total]
        );
    }

    #[test]
    fn blank_group_counts_as_missing() {
        let pop = population(&[("01", Some("  "))]);
        let err = normalize(&pop, false, MissingGroupPolicy::Error).unwrap_err();
        assert!(matches!(err, TlfError::MissingGroup { .. }));
    }

    #[test]
    fn null_subject_id_is_rejected() {
        let mut pop = Population::new("USUBJID", "TRT01A");
        pop.push(None, Some("A".to_string()));
        let err = normalize(&pop, false, MissingGroupPolicy::Error).unwrap_err();
        assert!(matches!(err, TlfError::MissingSubjectId { .. }));
    }

    #[test]
    fn empty_population_has_no_groups() {
        let pop = Population::new("USUBJID", "TRT01A");
        let normalized = normalize(&pop, true, MissingGroupPolicy::Error).unwrap();
        assert!(normalized.groups().is_empty());
    }
}
