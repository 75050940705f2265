use super::domain::{AdmissionRecord, CollegeSummary};
use super::query::{non_blank, BrowseQuery};

/// Fields browse mode searches over.
pub trait Browsable {
    fn college_name(&self) -> &str;
    fn district(&self) -> &str;
    fn college_code(&self) -> &str;
}

impl Browsable for AdmissionRecord {
    fn college_name(&self) -> &str {
        &self.college_name
    }

    fn district(&self) -> &str {
        &self.district
    }

    fn college_code(&self) -> &str {
        &self.college_code
    }
}

impl Browsable for CollegeSummary {
    fn college_name(&self) -> &str {
        &self.college_name
    }

    fn district(&self) -> &str {
        &self.district
    }

    fn college_code(&self) -> &str {
        &self.college_code
    }
}

/// Lower-cased needles, computed once per query rather than once per item.
struct Needles {
    text: Option<String>,
    district: Option<String>,
    college_code: Option<String>,
}

impl Needles {
    fn from_query(query: &BrowseQuery) -> Self {
        let lower = |value: &Option<String>| non_blank(value.as_deref()).map(str::to_lowercase);
        Self {
            text: lower(&query.text),
            district: lower(&query.district),
            college_code: lower(&query.college_code),
        }
    }

    fn accept<T: Browsable>(&self, item: &T) -> bool {
        let text_ok = self.text.as_deref().map_or(true, |needle| {
            contains_ignore_case(item.college_name(), needle)
                || contains_ignore_case(item.district(), needle)
                || contains_ignore_case(item.college_code(), needle)
        });

        text_ok
            && self
                .district
                .as_deref()
                .map_or(true, |needle| contains_ignore_case(item.district(), needle))
            && self
                .college_code
                .as_deref()
                .map_or(true, |needle| contains_ignore_case(item.college_code(), needle))
    }
}

fn contains_ignore_case(haystack: &str, lowered_needle: &str) -> bool {
    haystack.to_lowercase().contains(lowered_needle)
}

/// Narrows `items` to those matching every populated filter, preserving order.
pub fn filter<'a, T: Browsable>(items: &'a [T], query: &BrowseQuery) -> Vec<&'a T> {
    if query.is_empty() {
        return items.iter().collect();
    }
    let needles = Needles::from_query(query);
    items.iter().filter(|item| needles.accept(*item)).collect()
}

pub fn matches<T: Browsable>(item: &T, query: &BrowseQuery) -> bool {
    Needles::from_query(query).accept(item)
}
