//! Command-line client: counts a letter in a word through the MCP server.
//!
//! The server is located with `SERVER_PATH` (spawned over stdio) or
//! `SERVER_ADDR` (attached over TCP), read from the environment or `.env`.

use std::process::ExitCode;

use clap::Parser;

use letter_counter::client::{ClientConfig, ClientError, CountOutcome, CountRequest, run_session};
use letter_counter::logging;

/// Count how many times a letter appears in a word, via the letter_counter MCP tool.
#[derive(Debug, Parser)]
#[command(name = "letter-counter-client", version, about)]
struct Cli {
    /// Word or phrase to analyze.
    word: Option<String>,

    /// Letter to count.
    letter: Option<String>,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    logging::init(match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    });

    match run(cli).await {
        Ok(outcome) => {
            print_outcome(&outcome);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("❌ {}", e);
            ExitCode::from(exit_status(&e))
        }
    }
}

/// Validate the input, then load the server location and run one session.
/// Bad input is reported before the environment is even read.
async fn run(cli: Cli) -> Result<CountOutcome, ClientError> {
    let request = CountRequest::from_parts(cli.word, cli.letter)?;
    let config = ClientConfig::from_env()?;
    run_session(&config, &request.word, &request.letter).await
}

/// 2 for configuration or input errors, 1 for everything else.
fn exit_status(error: &ClientError) -> u8 {
    match error {
        ClientError::Config(_) => 2,
        _ => 1,
    }
}

fn print_outcome(outcome: &CountOutcome) {
    println!("Tools:");
    for tool in &outcome.tools {
        match &tool.description {
            Some(description) => println!("  - {}: {}", tool.name, description),
            None => println!("  - {}", tool.name),
        }
    }
    println!(
        "Result: '{}' contains '{}' {} time(s)",
        outcome.word, outcome.letter, outcome.count
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_cli_accepts_up_to_two_positionals() {
        let cli = Cli::try_parse_from(["letter-counter-client", "Strawberry", "r", "-vv"]).unwrap();
        assert_eq!(cli.word.as_deref(), Some("Strawberry"));
        assert_eq!(cli.letter.as_deref(), Some("r"));
        assert_eq!(cli.verbose, 2);

        assert!(Cli::try_parse_from(["letter-counter-client", "a", "b", "c"]).is_err());
    }

    #[tokio::test]
    async fn test_missing_letter_fails_before_connecting() {
        let cli = Cli::try_parse_from(["letter-counter-client", "Strawberry"]).unwrap();
        let err = run(cli).await.unwrap_err();
        assert!(matches!(err, ClientError::Config(ref msg) if msg.contains("word and a letter")));
        assert_eq!(exit_status(&err), 2);
    }

    #[tokio::test]
    async fn test_no_arguments_fails_before_connecting() {
        let cli = Cli::try_parse_from(["letter-counter-client"]).unwrap();
        let err = run(cli).await.unwrap_err();
        assert!(matches!(err, ClientError::Config(_)));
        assert_eq!(exit_status(&err), 2);
    }

    #[test]
    fn test_runtime_failures_exit_with_one() {
        assert_eq!(exit_status(&ClientError::connection("refused")), 1);
        assert_eq!(exit_status(&ClientError::invocation("bad arguments")), 1);
        assert_eq!(exit_status(&ClientError::Timeout(Duration::from_secs(1))), 1);
    }
}
