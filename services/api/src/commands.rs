use crate::infra::load_engine;
use clap::{Args, ValueEnum};
use job_ranker::config::{AppConfig, ConfigError};
use job_ranker::error::AppError;
use job_ranker::telemetry;
use job_ranker::workflows::ranking::{
    DatasetFormat, DatasetPostingSource, EmptyAcquisition, JobRankingWorkflow, PipelineOptions,
    RankingRun,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum InputFormat {
    Json,
    Csv,
}

impl From<InputFormat> for DatasetFormat {
    fn from(value: InputFormat) -> Self {
        match value {
            InputFormat::Json => DatasetFormat::Json,
            InputFormat::Csv => DatasetFormat::Csv,
        }
    }
}

#[derive(Args, Debug, Default)]
pub(crate) struct RankArgs {
    /// Posting dataset exported from the scraper (defaults to JOB_POSTINGS_PATH)
    #[arg(long)]
    pub(crate) input: Option<PathBuf>,
    /// Dataset encoding; guessed from the file extension when omitted
    #[arg(long, value_enum)]
    pub(crate) format: Option<InputFormat>,
    /// Override the role title in the search descriptor
    #[arg(long)]
    pub(crate) title: Option<String>,
    /// Override the maximum number of postings to rank
    #[arg(long)]
    pub(crate) rows: Option<u32>,
    /// Scoring rubric JSON file (defaults to JOB_SCORING_RULES or the standard rubric)
    #[arg(long)]
    pub(crate) rules: Option<PathBuf>,
    /// Treat an empty dataset as an empty ranking instead of an error
    #[arg(long)]
    pub(crate) allow_empty: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct RulesArgs {
    /// Scoring rubric JSON file (defaults to JOB_SCORING_RULES or the standard rubric)
    #[arg(long)]
    pub(crate) rules: Option<PathBuf>,
}

pub(crate) fn run_rank(args: RankArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let run = rank_dataset(args, &config)?;
    if !run.skipped.is_empty() {
        eprintln!(
            "skipped {} posting(s) missing required fields",
            run.skipped.len()
        );
    }
    println!("{}", serde_json::to_string_pretty(&run.results)?);

    Ok(())
}

pub(crate) fn run_rules(args: RulesArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let rules_path = args.rules.or(config.search.rules_path);
    let engine = load_engine(rules_path.as_deref())?;
    println!("{}", serde_json::to_string_pretty(engine.rules())?);
    Ok(())
}

pub(crate) fn rank_dataset(args: RankArgs, config: &AppConfig) -> Result<RankingRun, AppError> {
    let RankArgs {
        input,
        format,
        title,
        rows,
        rules,
        allow_empty,
    } = args;

    let mut request = config.search.request.clone();
    if let Some(title) = title {
        request.title = title;
    }
    if let Some(rows) = rows {
        request.rows = rows;
    }

    let path = input
        .or_else(|| config.search.postings_path.clone())
        .ok_or(ConfigError::MissingDataset)?;
    let source = match format {
        Some(format) => DatasetPostingSource::with_format(path, format.into()),
        None => DatasetPostingSource::new(path),
    };

    let rules_path = rules.or_else(|| config.search.rules_path.clone());
    let engine = load_engine(rules_path.as_deref())?;

    let options = PipelineOptions {
        empty_acquisition: if allow_empty {
            EmptyAcquisition::Allow
        } else {
            EmptyAcquisition::Fail
        },
    };

    info!(
        path = %source.path().display(),
        title = %request.title,
        rows = request.rows,
        "ranking posting dataset"
    );
    let workflow = JobRankingWorkflow::with_options(Arc::new(source), engine, options);
    Ok(workflow.run(&request)?)
}
