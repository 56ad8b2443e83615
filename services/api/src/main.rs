use job_ranker_api::run;

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("job-ranker error: {err}");
        std::process::exit(1);
    }
}
