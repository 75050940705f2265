use crate::commands::{
    run_browse, run_options, run_predict, run_score, BrowseArgs, OptionsArgs, PredictArgs,
    ScoreArgs,
};
use crate::server;
use clap::{Args, Parser, Subcommand};
use college_predictor::error::AppError;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "College Predictor",
    about = "Compute cutoff scores and match them against historical admission cutoffs",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Compute a cutoff score from subject marks
    Score(ScoreArgs),
    /// Rank the college offerings a score is eligible for
    Predict(PredictArgs),
    /// Narrow the raw admission records by text, district or college code
    Browse(BrowseArgs),
    /// List the categories, branches and districts in the dataset
    Options(OptionsArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Override the configured admissions CSV
    #[arg(long)]
    pub(crate) dataset: Option<PathBuf>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Score(args) => run_score(args),
        Command::Predict(args) => run_predict(args),
        Command::Browse(args) => run_browse(args),
        Command::Options(args) => run_options(args),
    }
}
