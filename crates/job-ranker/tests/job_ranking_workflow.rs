use std::path::PathBuf;
use std::sync::Arc;

use job_ranker::workflows::ranking::{
    AcquisitionError, DatasetFormat, DatasetPostingSource, JobRankingWorkflow, PipelineError,
    ScoringEngine, ScoringRules, SearchRequest, SourceError,
};

fn dataset(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("data")
        .join(name)
}

fn workflow(source: DatasetPostingSource) -> JobRankingWorkflow<DatasetPostingSource> {
    JobRankingWorkflow::new(Arc::new(source), ScoringEngine::new(ScoringRules::standard()))
}

#[test]
fn ranks_exported_json_dataset() {
    let workflow = workflow(DatasetPostingSource::new(dataset("linkedin_postings.json")));

    let run = workflow
        .run(&SearchRequest::default())
        .expect("dataset ranks");

    let ranked: Vec<(&str, u32)> = run
        .results
        .iter()
        .map(|output| (output.title.as_str(), output.ranking))
        .collect();
    assert_eq!(
        ranked,
        vec![
            ("Senior Software Engineer, Platform", 30),
            ("Machine Learning AI Engineer", 25),
            ("AI Engineer", 15),
            ("Founding Engineer", 10),
            ("Backend Developer", 3),
            ("QA Analyst", 0),
        ]
    );
    assert!(run
        .results
        .windows(2)
        .all(|pair| pair[0].ranking >= pair[1].ranking));

    assert_eq!(run.skipped.len(), 1);
    assert_eq!(run.skipped[0].index, 4);
    assert_eq!(run.skipped[0].title, "Software Engineer II");
    assert_eq!(run.results.len() + run.skipped.len(), 7);
}

#[test]
fn ranked_output_keeps_job_urls_and_reasons() {
    let workflow = workflow(DatasetPostingSource::new(dataset("linkedin_postings.json")));

    let run = workflow
        .run(&SearchRequest::default())
        .expect("dataset ranks");

    let top = &run.results[0];
    assert_eq!(top.job_url, "https://www.linkedin.com/jobs/view/4011000001");
    assert_eq!(
        top.reasons,
        vec![
            "Remote position (+10)",
            "Founding/Software Engineering role (+10)",
            "US/Europe based company (+10)",
        ]
    );

    let office = run
        .results
        .iter()
        .find(|output| output.title == "Backend Developer")
        .expect("office posting ranked");
    assert_eq!(office.reasons, vec!["WFO in Bangalore (+3)"]);
}

#[test]
fn row_limit_truncates_the_dataset() {
    let workflow = workflow(DatasetPostingSource::new(dataset("linkedin_postings.json")));
    let request = SearchRequest {
        rows: 3,
        ..SearchRequest::default()
    };

    let run = workflow.run(&request).expect("dataset ranks");

    let rankings: Vec<u32> = run.results.iter().map(|output| output.ranking).collect();
    assert_eq!(rankings, vec![30, 15, 3]);
}

#[test]
fn ranks_exported_csv_dataset() {
    let source = DatasetPostingSource::new(dataset("linkedin_postings.csv"));
    assert_eq!(source.format(), DatasetFormat::Csv);
    let workflow = workflow(source);

    let run = workflow
        .run(&SearchRequest::default())
        .expect("csv dataset ranks");

    assert_eq!(run.results.len(), 2);
    assert_eq!(run.results[0].title, "Founding Engineer");
    assert_eq!(run.results[0].ranking, 30);
    assert_eq!(run.results[1].ranking, 15);
    assert_eq!(run.skipped.len(), 1);
    assert_eq!(run.skipped[0].index, 2);
}

#[test]
fn missing_dataset_is_an_acquisition_failure() {
    let workflow = workflow(DatasetPostingSource::with_format(
        dataset("does_not_exist.json"),
        DatasetFormat::Json,
    ));

    let err = workflow
        .run(&SearchRequest::default())
        .expect_err("missing file fails");

    assert_eq!(err.kind(), "AcquisitionFailure");
    assert!(matches!(
        err,
        PipelineError::Acquisition(AcquisitionError::Source(SourceError::Io(_)))
    ));
}
