use clap::Args;
use college_predictor::admissions::{
    AdmissionCatalog, BrowseQuery, CsvDatasetProvider, PredictionOutcome, PredictionRequest,
    ScoreInput, SubjectMarks,
};
use college_predictor::config::AppConfig;
use college_predictor::error::AppError;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Args, Debug, Default)]
pub(crate) struct ScoreArgs {
    /// Maths mark. Missing or non-numeric counts as 0.
    #[arg(long)]
    pub(crate) maths: Option<String>,
    /// Physics mark. Missing or non-numeric counts as 0.
    #[arg(long)]
    pub(crate) physics: Option<String>,
    /// Chemistry mark. Missing or non-numeric counts as 0.
    #[arg(long)]
    pub(crate) chemistry: Option<String>,
}

#[derive(Args, Debug)]
pub(crate) struct PredictArgs {
    /// Lowest cutoff worth considering
    #[arg(long)]
    pub(crate) min_score: String,
    /// Student score. Derived from the marks when omitted.
    #[arg(long)]
    pub(crate) max_score: Option<String>,
    #[arg(long)]
    pub(crate) maths: Option<String>,
    #[arg(long)]
    pub(crate) physics: Option<String>,
    #[arg(long)]
    pub(crate) chemistry: Option<String>,
    /// Reservation category (defaults to the configured category)
    #[arg(long)]
    pub(crate) category: Option<String>,
    #[arg(long)]
    pub(crate) branch: Option<String>,
    #[arg(long)]
    pub(crate) district: Option<String>,
    /// Override the configured admissions CSV
    #[arg(long)]
    pub(crate) dataset: Option<PathBuf>,
    /// Print the outcome as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct BrowseArgs {
    /// Case-insensitive match against college name, district or code
    #[arg(long)]
    pub(crate) text: Option<String>,
    #[arg(long)]
    pub(crate) district: Option<String>,
    #[arg(long)]
    pub(crate) college_code: Option<String>,
    /// Override the configured admissions CSV
    #[arg(long)]
    pub(crate) dataset: Option<PathBuf>,
    /// Print the matching records as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct OptionsArgs {
    /// Override the configured admissions CSV
    #[arg(long)]
    pub(crate) dataset: Option<PathBuf>,
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let marks = subject_marks(args.maths, args.physics, args.chemistry).unwrap_or_default();
    println!("Cutoff score: {}", marks.score());
    Ok(())
}

pub(crate) fn run_predict(args: PredictArgs) -> Result<(), AppError> {
    let json = args.json;
    let catalog = open_catalog(args.dataset.clone())?;
    let request = prediction_request(args);
    let outcome = catalog.predict(&request)?;

    if json {
        print_json(&outcome)
    } else {
        render_prediction(&outcome);
        Ok(())
    }
}

pub(crate) fn run_browse(args: BrowseArgs) -> Result<(), AppError> {
    let BrowseArgs {
        text,
        district,
        college_code,
        dataset,
        json,
    } = args;

    let catalog = open_catalog(dataset)?;
    let query = BrowseQuery {
        text,
        district,
        college_code,
    };
    let records = catalog.browse_records(&query)?;

    if json {
        return print_json(&records);
    }

    println!("{} matching records", records.len());
    for record in &records {
        println!(
            "- [{}] {} ({}) | {} | {} | {:.2} - {:.2} | {} selected",
            record.college_code,
            record.college_name,
            record.district,
            record.branch,
            record.category,
            record.min_cutoff,
            record.max_cutoff,
            record.selected_count
        );
    }
    Ok(())
}

pub(crate) fn run_options(args: OptionsArgs) -> Result<(), AppError> {
    let catalog = open_catalog(args.dataset)?;
    let options = catalog.options()?;

    println!(
        "Categories: {} (default {})",
        options.categories.join(", "),
        catalog.default_category()
    );
    println!("Branches:");
    for branch in &options.branches {
        println!("  - {}", branch);
    }
    println!("Districts: {}", options.districts.join(", "));
    println!("Colleges: {}", options.college_codes.len());
    Ok(())
}

fn open_catalog(dataset: Option<PathBuf>) -> Result<AdmissionCatalog<CsvDatasetProvider>, AppError> {
    let config = AppConfig::load()?;
    let path = dataset.unwrap_or(config.dataset.path);
    let catalog = AdmissionCatalog::new(
        CsvDatasetProvider::new(path),
        config.dataset.default_category,
    );
    catalog.load()?;
    Ok(catalog)
}

fn subject_marks(
    maths: Option<String>,
    physics: Option<String>,
    chemistry: Option<String>,
) -> Option<SubjectMarks> {
    if maths.is_none() && physics.is_none() && chemistry.is_none() {
        return None;
    }
    Some(SubjectMarks {
        maths: maths.map(ScoreInput::from),
        physics: physics.map(ScoreInput::from),
        chemistry: chemistry.map(ScoreInput::from),
    })
}

fn prediction_request(args: PredictArgs) -> PredictionRequest {
    PredictionRequest {
        min_score: Some(ScoreInput::from(args.min_score)),
        max_score: args.max_score.map(ScoreInput::from),
        marks: subject_marks(args.maths, args.physics, args.chemistry),
        category: args.category,
        branch: args.branch,
        district: args.district,
    }
}

fn render_prediction(outcome: &PredictionOutcome) {
    println!(
        "Student score {} | minimum {:.2} | category {}",
        outcome.student_score_display, outcome.min_score, outcome.category
    );
    if outcome.results.is_empty() {
        println!("No eligible offerings in this range");
        return;
    }

    println!("{} eligible offerings:", outcome.results.len());
    for (rank, row) in outcome.results.iter().enumerate() {
        println!(
            "{:>3}. [{}] {} ({}) | {} | cutoff {:.2} - {:.2} (avg {:.2}) | {} selected",
            rank + 1,
            row.college_code,
            row.college_name,
            row.district,
            row.branch,
            row.min_cutoff,
            row.max_cutoff,
            row.average_cutoff,
            row.selected_count
        );
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<(), AppError> {
    let json = serde_json::to_string_pretty(value).map_err(std::io::Error::from)?;
    println!("{}", json);
    Ok(())
}
