use std::collections::{BTreeSet, HashSet};

use serde::{Deserialize, Serialize};

/// One historical observation of a (college, branch, category) cutoff range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdmissionRecord {
    pub college_code: String,
    pub college_name: String,
    pub district: String,
    pub branch: String,
    pub category: String,
    pub min_cutoff: f64,
    pub max_cutoff: f64,
    pub selected_count: u32,
}

impl AdmissionRecord {
    /// Aggregation identity used by prediction mode.
    pub fn offering_key(&self) -> OfferingKey<'_> {
        OfferingKey {
            college_code: &self.college_code,
            branch: &self.branch,
            category: &self.category,
        }
    }

    pub(crate) fn midpoint(&self) -> f64 {
        (self.min_cutoff + self.max_cutoff) / 2.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OfferingKey<'a> {
    pub college_code: &'a str,
    pub branch: &'a str,
    pub category: &'a str,
}

/// Distinct college entry for the directory listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CollegeSummary {
    pub college_code: String,
    pub college_name: String,
    pub district: String,
}

/// Values offered to callers for populating filter pickers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterOptions {
    pub categories: Vec<String>,
    pub branches: Vec<String>,
    pub districts: Vec<String>,
    pub college_codes: Vec<String>,
}

impl FilterOptions {
    pub fn from_records(records: &[AdmissionRecord]) -> Self {
        let mut categories = BTreeSet::new();
        let mut branches = BTreeSet::new();
        let mut districts = BTreeSet::new();
        let mut college_codes = BTreeSet::new();

        for record in records {
            categories.insert(record.category.as_str());
            branches.insert(record.branch.as_str());
            districts.insert(record.district.as_str());
            college_codes.insert(record.college_code.as_str());
        }

        let owned = |set: BTreeSet<&str>| set.into_iter().map(str::to_string).collect();
        Self {
            categories: owned(categories),
            branches: owned(branches),
            districts: owned(districts),
            college_codes: owned(college_codes),
        }
    }
}

/// Collapses records into one entry per college code, keeping first-seen order.
pub fn college_directory(records: &[AdmissionRecord]) -> Vec<CollegeSummary> {
    let mut seen = HashSet::new();
    records
        .iter()
        .filter(|record| seen.insert(record.college_code.as_str()))
        .map(|record| CollegeSummary {
            college_code: record.college_code.clone(),
            college_name: record.college_name.clone(),
            district: record.district.clone(),
        })
        .collect()
}
