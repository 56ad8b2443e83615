use crate::commands::{run_rank, run_rules, RankArgs, RulesArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use job_ranker::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "job-ranker",
    about = "Score and rank job postings against a fixed preference rubric",
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
    /// Rank an exported posting dataset and print the result as JSON
    Rank(RankArgs),
    /// Print the active scoring rubric as JSON
    Rules(RulesArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Rank(args) => run_rank(args),
        Command::Rules(args) => run_rules(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use std::path::PathBuf;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn rank_accepts_overrides() {
        let cli = Cli::try_parse_from([
            "job-ranker",
            "rank",
            "--input",
            "postings.csv",
            "--title",
            "ai engineer",
            "--rows",
            "5",
            "--allow-empty",
        ])
        .expect("arguments parse");

        match cli.command {
            Some(Command::Rank(args)) => {
                assert_eq!(args.input, Some(PathBuf::from("postings.csv")));
                assert_eq!(args.title.as_deref(), Some("ai engineer"));
                assert_eq!(args.rows, Some(5));
                assert!(args.allow_empty);
            }
            other => panic!("expected rank command, got {other:?}"),
        }
    }

    #[test]
    fn serve_is_the_default_command() {
        let cli = Cli::try_parse_from(["job-ranker"]).expect("no arguments parse");
        assert!(cli.command.is_none());
    }
}
