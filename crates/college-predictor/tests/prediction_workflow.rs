use college_predictor::admissions::{
    AdmissionCatalog, AdmissionError, BrowseQuery, CsvDatasetProvider, PredictionRequest,
    ScoreInput, SubjectMarks,
};

fn fixture_catalog() -> AdmissionCatalog<CsvDatasetProvider> {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/cutoffs.csv");
    let catalog = AdmissionCatalog::new(CsvDatasetProvider::new(path), "General");
    catalog.load().expect("fixture dataset loads");
    catalog
}

fn marks(maths: &str, physics: &str, chemistry: &str) -> SubjectMarks {
    SubjectMarks {
        maths: Some(ScoreInput::from(maths)),
        physics: Some(ScoreInput::from(physics)),
        chemistry: Some(ScoreInput::from(chemistry)),
    }
}

#[test]
fn marks_to_ranked_prediction() {
    let catalog = fixture_catalog();
    let request = PredictionRequest {
        min_score: Some(ScoreInput::from("175")),
        marks: Some(marks("95", "90", "88")),
        ..PredictionRequest::default()
    };

    let outcome = catalog.predict(&request).expect("prediction runs");
    assert_eq!(outcome.student_score, 184.0);
    assert_eq!(outcome.category, "General");

    let rows: Vec<_> = outcome
        .results
        .iter()
        .map(|row| (row.college_code.as_str(), row.branch.as_str()))
        .collect();
    assert_eq!(
        rows,
        vec![
            ("2601", "Mechanical Engineering"),
            ("2601", "Civil Engineering"),
            ("5008", "Civil Engineering"),
            ("2007", "Civil Engineering"),
            ("2709", "Computer Science and Engineering"),
        ]
    );
}

#[test]
fn repeated_rounds_collapse_into_one_row() {
    let catalog = fixture_catalog();
    let request = PredictionRequest {
        min_score: Some(ScoreInput::Number(190.0)),
        max_score: Some(ScoreInput::Number(200.0)),
        branch: Some("Computer Science and Engineering".to_string()),
        district: Some("Chennai".to_string()),
        ..PredictionRequest::default()
    };

    let outcome = catalog.predict(&request).expect("prediction runs");
    assert_eq!(outcome.results.len(), 1);
    let row = &outcome.results[0];
    assert_eq!(row.college_code, "1");
    assert_eq!(row.min_cutoff, 195.75);
    assert_eq!(row.max_cutoff, 199.5);
    assert_eq!(row.selected_count, 100);
}

#[test]
fn reserved_category_is_matched_exactly() {
    let catalog = fixture_catalog();
    let request = PredictionRequest {
        min_score: Some(ScoreInput::Number(150.0)),
        max_score: Some(ScoreInput::Number(200.0)),
        category: Some("SC".to_string()),
        ..PredictionRequest::default()
    };

    let outcome = catalog.predict(&request).expect("prediction runs");
    assert_eq!(outcome.results.len(), 1);
    assert_eq!(outcome.results[0].college_code, "5008");
}

#[test]
fn non_numeric_minimum_is_rejected_not_defaulted() {
    let catalog = fixture_catalog();
    let request = PredictionRequest {
        min_score: Some(ScoreInput::from("one-seventy")),
        marks: Some(marks("95", "90", "88")),
        ..PredictionRequest::default()
    };

    let error = catalog.predict(&request).expect_err("rejected");
    assert!(matches!(error, AdmissionError::InvalidQuery(_)));
}

#[test]
fn browse_narrows_without_reordering() {
    let catalog = fixture_catalog();
    let query = BrowseQuery {
        text: Some("COIMBATORE".to_string()),
        ..BrowseQuery::default()
    };

    let records = catalog.browse_records(&query).expect("browse runs");
    let codes: Vec<_> = records.iter().map(|r| r.college_code.as_str()).collect();
    assert_eq!(codes, vec!["2006", "2006", "2007"]);

    let colleges = catalog.browse_colleges(&query).expect("browse runs");
    assert_eq!(colleges.len(), 2);
}

#[test]
fn options_cover_loaded_values() {
    let catalog = fixture_catalog();
    let options = catalog.options().expect("options available");
    assert_eq!(options.categories, vec!["BC", "General", "MBC", "SC"]);
    assert!(options.branches.contains(&"Civil Engineering".to_string()));
    assert_eq!(options.districts.len(), 5);
}

#[test]
fn missing_dataset_file_surfaces_as_unavailable() {
    let catalog = AdmissionCatalog::new(CsvDatasetProvider::new("./no-such-cutoffs.csv"), "General");
    assert!(catalog.load().is_err());

    let error = catalog
        .browse_records(&BrowseQuery::default())
        .expect_err("no data");
    assert!(matches!(error, AdmissionError::DataUnavailable { .. }));
}
