use crate::demo::{
    run_advisor, run_ask, run_demo, run_eligibility, run_evaluate, run_refresh, AdvisorArgs,
    AskArgs, DemoArgs, EligibilityArgs, EvaluateArgs,
};
use crate::server;
use clap::{Args, Parser, Subcommand};
use grant_assist::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "DCNR Grant Assistant",
    about = "Research, score, and plan Pennsylvania DCNR conservation grant applications",
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
    /// Score an application against the DCNR rubric
    Evaluate(EvaluateArgs),
    /// Check which grant categories an organization type qualifies for
    Eligibility(EligibilityArgs),
    /// Look up the regional advisor serving a county
    Advisor(AdvisorArgs),
    /// Ask a question about DCNR grants
    Ask(AskArgs),
    /// Re-scrape the DCNR program page and save a fresh snapshot
    Refresh,
    /// Run an offline walkthrough of every workflow
    Demo(DemoArgs),
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
        Command::Evaluate(args) => run_evaluate(args),
        Command::Eligibility(args) => run_eligibility(args),
        Command::Advisor(args) => run_advisor(args),
        Command::Ask(args) => run_ask(args).await,
        Command::Refresh => run_refresh().await,
        Command::Demo(args) => run_demo(args).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_subcommand_defaults_to_serve() {
        let cli = Cli::try_parse_from(["grant-assist-api"]).expect("parses");
        assert!(cli.command.is_none());
    }

    #[test]
    fn evaluate_flags_parse() {
        let cli = Cli::try_parse_from([
            "grant-assist-api",
            "evaluate",
            "--entity-type",
            "County",
            "--footfall",
            "1200",
            "--matching-funds",
            "--match-percentage",
            "75%",
            "--county",
            "Lawrence",
        ])
        .expect("parses");

        match cli.command {
            Some(Command::Evaluate(args)) => {
                let facts = args.facts();
                assert_eq!(facts.entity_type, "County");
                assert_eq!(facts.footfall, 1200);
                assert!(facts.has_matching_funds);
                assert_eq!(facts.match_percentage, 75);
                assert_eq!(facts.county.as_deref(), Some("Lawrence"));
                assert!(!facts.has_site_control);
            }
            other => panic!("expected evaluate command, got {other:?}"),
        }
    }

    #[test]
    fn ask_collects_documents() {
        let cli = Cli::try_parse_from([
            "grant-assist-api",
            "ask",
            "When is the deadline?",
            "--document",
            "guide.pdf",
            "--document",
            "notes.txt",
        ])
        .expect("parses");

        match cli.command {
            Some(Command::Ask(args)) => {
                assert_eq!(args.question, "When is the deadline?");
                assert_eq!(args.documents.len(), 2);
            }
            other => panic!("expected ask command, got {other:?}"),
        }
    }
}
