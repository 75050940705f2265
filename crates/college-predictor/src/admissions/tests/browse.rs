use super::common::*;

use crate::admissions::browse::{filter, matches};
use crate::admissions::domain::college_directory;
use crate::admissions::query::BrowseQuery;

fn text(value: &str) -> BrowseQuery {
    BrowseQuery {
        text: Some(value.to_string()),
        ..BrowseQuery::default()
    }
}

#[test]
fn text_match_ignores_case() {
    let college = record("4", "Government College", "Salem", "Civil", "General", 140.0, 160.0, 15);
    assert!(matches(&college, &text("govern")));
    assert!(matches(&college, &text("GOVERN")));
    assert!(!matches(&college, &text("private")));
}

#[test]
fn text_searches_name_district_and_code() {
    let records = sample_records();

    let by_district = filter(&records, &text("erode"));
    assert_eq!(by_district.len(), 1);
    assert_eq!(by_district[0].college_code, "9");

    let by_code = filter(&records, &text("200"));
    assert_eq!(by_code.len(), 1);
    assert_eq!(by_code[0].college_name, "PSG College of Technology");
}

#[test]
fn district_and_code_filters_are_substrings() {
    let records = sample_records();
    let query = BrowseQuery {
        district: Some("CHEN".to_string()),
        college_code: Some("1".to_string()),
        ..BrowseQuery::default()
    };

    let matched = filter(&records, &query);
    assert_eq!(matched.len(), 3);
    assert!(matched.iter().all(|record| record.college_code == "1"));
}

#[test]
fn filters_combine_conjunctively() {
    let records = sample_records();
    let query = BrowseQuery {
        text: Some("technology".to_string()),
        district: Some("chennai".to_string()),
        college_code: None,
    };

    let matched = filter(&records, &query);
    assert_eq!(matched.len(), 1);
    assert_eq!(matched[0].college_code, "7");
}

#[test]
fn empty_query_keeps_original_order() {
    let records = sample_records();
    let matched = filter(&records, &BrowseQuery::default());
    assert_eq!(matched.len(), records.len());
    assert!(matched
        .iter()
        .zip(records.iter())
        .all(|(matched, original)| std::ptr::eq(*matched, original)));
}

#[test]
fn narrowing_preserves_relative_order() {
    let records = sample_records();
    let matched = filter(&records, &text("college"));
    let codes: Vec<_> = matched.iter().map(|record| record.college_code.as_str()).collect();
    assert_eq!(codes, vec!["2006", "4", "9"]);
}

#[test]
fn no_match_is_empty_not_error() {
    let records = sample_records();
    assert!(filter(&records, &text("nowhere university")).is_empty());
}

#[test]
fn repeated_filters_are_idempotent() {
    let records = sample_records();
    let query = text("anna");
    let first: Vec<_> = filter(&records, &query).into_iter().cloned().collect();
    let second: Vec<_> = filter(&records, &query).into_iter().cloned().collect();
    assert_eq!(first, second);
}

#[test]
fn college_directory_is_browsable() {
    let directory = college_directory(&sample_records());
    let matched = filter(&directory, &text("chennai"));
    let codes: Vec<_> = matched.iter().map(|college| college.college_code.as_str()).collect();
    assert_eq!(codes, vec!["1", "7"]);
}
