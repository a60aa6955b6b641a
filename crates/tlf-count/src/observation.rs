//! Observation joining.
//!
//! Attaches each event to the group memberships of its subject and converts
//! the category cells into a [`CategoryValue`] path. Null category cells stay
//! in the data as [`CategoryValue::Missing`] so that they are counted, not
//! silently dropped.

use std::collections::BTreeSet;

use polars::prelude::DataFrame;
use tlf_common::{column_texts, find_column};
use tlf_model::{CategoryValue, GroupValue, SubjectId, TlfError};
use tracing::{debug, warn};

use crate::error::{CountError, OBSERVATION_TABLE, Result};
use crate::population::NormalizedPopulation;

/// One event as supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObservationRecord {
    pub subject: Option<SubjectId>,
    /// One cell per category column, `None` for null or blank.
    pub categories: Vec<Option<String>>,
}

/// Event-level input table restricted to the id and category columns.
#[derive(Debug, Clone)]
pub struct Observations {
    id_col: String,
    category_cols: Vec<String>,
    records: Vec<ObservationRecord>,
}

impl Observations {
    pub fn new<S: AsRef<str>>(id_col: impl Into<String>, category_cols: &[S]) -> Self {
        Self {
            id_col: id_col.into(),
            category_cols: category_cols
                .iter()
                .map(|col| col.as_ref().to_string())
                .collect(),
            records: Vec::new(),
        }
    }

    /// Reads the id column and each category column of an event-level DataFrame.
    pub fn from_frame<S: AsRef<str>>(
        df: &DataFrame,
        id_col: &str,
        category_cols: &[S],
    ) -> Result<Self> {
        let ids = find_column(df, id_col)
            .ok_or_else(|| CountError::column_not_found(id_col, OBSERVATION_TABLE))?;
        let ids = column_texts(ids)?;

        let mut columns = Vec::with_capacity(category_cols.len());
        for name in category_cols {
            let name = name.as_ref();
            let column = find_column(df, name)
                .ok_or_else(|| CountError::column_not_found(name, OBSERVATION_TABLE))?;
            columns.push(column_texts(column)?);
        }

        let mut observations = Self::new(id_col, category_cols);
        observations.records.reserve(ids.len());
        for (idx, id) in ids.into_iter().enumerate() {
            let categories = columns
                .iter_mut()
                .map(|values| values[idx].take())
                .collect();
            observations.push(id, categories);
        }
        Ok(observations)
    }

    /// Builds single-level observations whose only category is `label`.
    ///
    /// Counting these gives the "subjects with one or more events" row: every
    /// event of every subject falls into the one category.
    pub fn flagged(df: &DataFrame, id_col: &str, label: &str) -> Result<Self> {
        let ids = find_column(df, id_col)
            .ok_or_else(|| CountError::column_not_found(id_col, OBSERVATION_TABLE))?;
        let ids = column_texts(ids)?;
        let mut observations = Self::new(id_col, &[label]);
        for id in ids {
            observations.push(id, vec![Some(label.to_string())]);
        }
        Ok(observations)
    }

    pub fn push(&mut self, id: Option<String>, categories: Vec<Option<String>>) {
        self.records.push(ObservationRecord {
            subject: id.and_then(SubjectId::new),
            categories,
        });
    }

    pub fn id_col(&self) -> &str {
        &self.id_col
    }

    pub fn category_cols(&self) -> &[String] {
        &self.category_cols
    }

    pub fn records(&self) -> &[ObservationRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// An event tagged with one of its subject's groups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinedObservation {
    pub subject: SubjectId,
    pub group: GroupValue,
    /// One value per category column, never [`CategoryValue::All`].
    pub path: Vec<CategoryValue>,
}

/// Events joined to the population, one row per (event, membership).
#[derive(Debug, Clone)]
pub struct JoinedObservations {
    category_cols: Vec<String>,
    rows: Vec<JoinedObservation>,
}

impl JoinedObservations {
    pub fn category_cols(&self) -> &[String] {
        &self.category_cols
    }

    /// Hierarchy depth, the number of category columns.
    pub fn depth(&self) -> usize {
        self.category_cols.len()
    }

    pub fn rows(&self) -> &[JoinedObservation] {
        &self.rows
    }
}

/// Joins events to the normalized population by subject id.
///
/// Fails with [`TlfError::OrphanObservation`], naming every offending id, when
/// an event refers to a subject outside the population, and with
/// [`TlfError::CategoryArity`] when an event does not carry one value per
/// category column. Events of subjects
/// dropped under the `ignore` missing-group policy are discarded instead.
pub fn join_observations(
    population: &NormalizedPopulation,
    observations: &Observations,
) -> std::result::Result<JoinedObservations, TlfError> {
    if observations.category_cols().is_empty() {
        return Err(TlfError::EmptyCategories);
    }

    let expected = observations.category_cols().len();
    if let Some(record) = observations
        .records()
        .iter()
        .find(|record| record.categories.len() != expected)
    {
        return Err(TlfError::CategoryArity {
            expected,
            found: record.categories.len(),
        });
    }

    let mut rows = Vec::with_capacity(observations.len() * 2);
    let mut orphans: BTreeSet<&SubjectId> = BTreeSet::new();
    let mut dropped = 0usize;
    for record in observations.records() {
        let Some(subject) = record.subject.as_ref() else {
            return Err(TlfError::MissingSubjectId {
                column: observations.id_col().to_string(),
                table: OBSERVATION_TABLE.to_string(),
            });
        };
        if population.is_excluded(subject) {
            dropped += 1;
            continue;
        }
        if !population.contains(subject) {
            orphans.insert(subject);
            continue;
        }
        let path: Vec<CategoryValue> = record
            .categories
            .iter()
            .cloned()
            .map(CategoryValue::from_option)
            .collect();
        for group in population.memberships_of(subject) {
            rows.push(JoinedObservation {
                subject: subject.clone(),
                group: group.clone(),
                path: path.clone(),
            });
        }
    }

    if !orphans.is_empty() {
        return Err(TlfError::OrphanObservation {
            column: observations.id_col().to_string(),
            ids: orphans.into_iter().map(ToString::to_string).collect(),
        });
    }
    if dropped > 0 {
        warn!(
            dropped,
            "dropped observations of subjects without a treatment group"
        );
    }
    debug!(
        events = observations.len(),
        joined = rows.len(),
        "joined observations to population"
    );

    Ok(JoinedObservations {
        category_cols: observations.category_cols().to_vec(),
        rows,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::population::{Population, normalize};
    use tlf_model::MissingGroupPolicy;

    fn normalized(include_total: bool, policy: MissingGroupPolicy) -> NormalizedPopulation {
        let pop = Population::from_pairs(
            "USUBJID",
            "TRT01A",
            [("01", Some("A")), ("02", Some("B")), ("03", None)],
        );
        normalize(&pop, include_total, policy).unwrap()
    }

    fn observations(rows: &[(&str, Option<&str>)]) -> Observations {
        let mut obs = Observations::new("USUBJID", &["AEDECOD"]);
        for (id, term) in rows {
            obs.push(Some(id.to_string()), vec![term.map(str::to_string)]);
        }
        obs
    }

    #[test]
    fn each_event_joins_its_group_and_total() {
        let pop = normalized(true, MissingGroupPolicy::Fill);
        let joined = join_observations(&pop, &observations(&[("01", Some("Flu"))])).unwrap();
        let groups: Vec<&GroupValue> = joined.rows().iter().map(|row| &row.group).collect();
        assert_eq!(groups, vec![&GroupValue::arm("A"), &GroupValue::Total]);
    }

    #[test]
    fn null_category_becomes_missing() {
        let pop = normalized(false, MissingGroupPolicy::Fill);
        let joined = join_observations(&pop, &observations(&[("02", None)])).unwrap();
        assert_eq!(joined.rows()[0].path, vec![CategoryValue::Missing]);
    }

    #[test]
    fn orphans_are_all_named() {
        let pop = normalized(false, MissingGroupPolicy::Fill);
        let obs = observations(&[("99", Some("Flu")), ("01", Some("Flu")), ("98", None)]);
        let err = join_observations(&pop, &obs).unwrap_err();
        assert_eq!(
            err,
            TlfError::OrphanObservation {
                column: "USUBJID".to_string(),
                ids: vec!["98".to_string(), "99".to_string()],
            }
        );
    }

    #[test]
    fn ignored_subjects_are_not_orphans() {
        let pop = normalized(true, MissingGroupPolicy::Ignore);
        let obs = observations(&[("03", Some("Flu")), ("01", Some("Flu"))]);
        let joined = join_observations(&pop, &obs).unwrap();
        assert_eq!(joined.rows().len(), 2);
        assert!(joined.rows().iter().all(|row| row.subject.as_str() == "01"));
    }

    #[test]
    fn category_columns_are_required() {
        let pop = normalized(false, MissingGroupPolicy::Fill);
        let obs = Observations::new("USUBJID", &[] as &[&str]);
        let err = join_observations(&pop, &obs).unwrap_err();
        assert_eq!(err, TlfError::EmptyCategories);
    }

    #[test]
    fn each_event_needs_one_value_per_column() {
        let pop = normalized(false, MissingGroupPolicy::Fill);
        let mut obs = Observations::new("USUBJID", &["AEBODSYS", "AEDECOD"]);
        obs.push(
            Some("01".to_string()),
            vec![Some("Infections".to_string()), Some("Flu".to_string())],
        );
        obs.push(Some("02".to_string()), vec![Some("Infections".to_string())]);
        let err = join_observations(&pop, &obs).unwrap_err();
        assert_eq!(
            err,
            TlfError::CategoryArity {
                expected: 2,
                found: 1
            }
        );
    }
}
