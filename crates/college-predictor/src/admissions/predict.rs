use std::cmp::Ordering;
use std::collections::HashMap;

use serde::Serialize;

use super::domain::{AdmissionRecord, OfferingKey};
use super::query::PredictionQuery;

/// One ranked row of a prediction: every eligible observation of a
/// (college, branch, category) offering folded together.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictedOffering {
    pub college_code: String,
    pub college_name: String,
    pub district: String,
    pub branch: String,
    pub category: String,
    pub min_cutoff: f64,
    pub max_cutoff: f64,
    pub selected_count: u64,
    pub average_cutoff: f64,
}

/// All five prediction predicates for a single record.
pub fn is_eligible(record: &AdmissionRecord, query: &PredictionQuery) -> bool {
    record.max_cutoff >= query.min_score()
        && record.min_cutoff <= query.max_score()
        && record.category == query.category()
        && query.branch().map_or(true, |branch| record.branch == branch)
        && query.district().map_or(true, |district| record.district == district)
}

struct OfferingGroup<'a> {
    first: &'a AdmissionRecord,
    min_cutoff: f64,
    max_cutoff: f64,
    selected_count: u64,
    midpoint_sum: f64,
    observations: u32,
}

impl<'a> OfferingGroup<'a> {
    fn new(record: &'a AdmissionRecord) -> Self {
        Self {
            first: record,
            min_cutoff: record.min_cutoff,
            max_cutoff: record.max_cutoff,
            selected_count: u64::from(record.selected_count),
            midpoint_sum: record.midpoint(),
            observations: 1,
        }
    }

    fn absorb(&mut self, record: &AdmissionRecord) {
        self.min_cutoff = self.min_cutoff.min(record.min_cutoff);
        self.max_cutoff = self.max_cutoff.max(record.max_cutoff);
        self.selected_count += u64::from(record.selected_count);
        self.midpoint_sum += record.midpoint();
        self.observations += 1;
    }

    fn into_offering(self) -> PredictedOffering {
        PredictedOffering {
            college_code: self.first.college_code.clone(),
            college_name: self.first.college_name.clone(),
            district: self.first.district.clone(),
            branch: self.first.branch.clone(),
            category: self.first.category.clone(),
            min_cutoff: self.min_cutoff,
            max_cutoff: self.max_cutoff,
            selected_count: self.selected_count,
            average_cutoff: self.midpoint_sum / f64::from(self.observations),
        }
    }
}

/// Filters, aggregates and ranks `records` in a single pass plus one sort.
pub fn predict(records: &[AdmissionRecord], query: &PredictionQuery) -> Vec<PredictedOffering> {
    let mut groups: HashMap<OfferingKey<'_>, OfferingGroup<'_>> = HashMap::new();

    for record in records.iter().filter(|record| is_eligible(record, query)) {
        groups
            .entry(record.offering_key())
            .and_modify(|group| group.absorb(record))
            .or_insert_with(|| OfferingGroup::new(record));
    }

    let mut offerings: Vec<PredictedOffering> = groups
        .into_values()
        .map(OfferingGroup::into_offering)
        .collect();
    offerings.sort_by(rank);
    offerings
}

/// Lowest cutoff first, then the most historically selected, then by name.
/// The offering key closes any remaining tie so output never depends on hashing.
fn rank(a: &PredictedOffering, b: &PredictedOffering) -> Ordering {
    a.min_cutoff
        .total_cmp(&b.min_cutoff)
        .then_with(|| b.selected_count.cmp(&a.selected_count))
        .then_with(|| a.college_name.cmp(&b.college_name))
        .then_with(|| a.college_code.cmp(&b.college_code))
        .then_with(|| a.branch.cmp(&b.branch))
        .then_with(|| a.category.cmp(&b.category))
}
