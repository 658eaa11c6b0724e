//! Risk ranking and classification
//!
//! People are ordered from highest to lowest risk by sorting a permutation
//! ascending by risk and reading it backwards.

use crate::domain::classify::{Category, Thresholds};
use crate::domain::growth::{AllocError, try_with_capacity};
use crate::domain::index_sort::{SortKey, identity_permutation, sort_indices};
use crate::domain::node_store::NodeStore;

/// One classified person
#[derive(Clone, Debug, PartialEq)]
pub struct ReportRecord {
    pub name: String,
    pub id: i64,
    pub risk: f64,
    pub category: Category,
}

/// Classified population, highest risk first
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Report {
    pub records: Vec<ReportRecord>,
}

impl Report {
    /// Report with no records
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of records in `category`
    pub fn count(&self, category: Category) -> usize {
        self.records
            .iter()
            .filter(|r| r.category == category)
            .count()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ReportRecord> + '_ {
        self.records.iter()
    }
}

/// Rank every person in `store` by risk and classify them
pub fn build_report(store: &NodeStore, thresholds: &Thresholds) -> Result<Report, AllocError> {
    let mut perm = identity_permutation(store.len())?;
    sort_indices(store, &mut perm, SortKey::Risk)?;

    let mut records = try_with_capacity(store.len(), "report records")?;
    for &slot in perm.iter().rev() {
        let person = &store[slot];
        records.push(ReportRecord {
            name: person.name.clone(),
            id: person.id,
            risk: person.risk,
            category: thresholds.classify(person.risk),
        });
    }

    let report = Report { records };
    tracing::info!(
        people = report.len(),
        medical_supervision = report.count(Category::MedicalSupervision),
        quarantine = report.count(Category::Quarantine),
        clean = report.count(Category::Clean),
        "report built"
    );
    Ok(report)
}
