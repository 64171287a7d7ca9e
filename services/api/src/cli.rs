use crate::demo::{run_questions, run_score, QuestionsArgs, ScoreArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use talapker::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Talapker Admissions Portal",
    about = "Serve the admissions portal API or try the career quiz from the command line",
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
    /// Inspect quiz content and score answers offline
    Quiz {
        #[command(subcommand)]
        command: QuizCommand,
    },
}

#[derive(Subcommand, Debug)]
enum QuizCommand {
    /// Print the questions for a locale
    Questions(QuestionsArgs),
    /// Score a set of answers and print the recommendation
    Score(ScoreArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Load quiz content from this directory instead of the embedded copy
    #[arg(long)]
    pub(crate) content_dir: Option<PathBuf>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Quiz {
            command: QuizCommand::Questions(args),
        } => run_questions(args),
        Command::Quiz {
            command: QuizCommand::Score(args),
        } => run_score(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_serve_without_subcommand() {
        let cli = Cli::try_parse_from(["talapker-api"]).expect("parses");
        assert!(cli.command.is_none());
    }

    #[test]
    fn parses_quiz_score_arguments() {
        let cli = Cli::try_parse_from([
            "talapker-api",
            "quiz",
            "score",
            "--answers",
            "1=5,2=1",
            "--locale",
            "kk",
        ])
        .expect("parses");

        match cli.command {
            Some(Command::Quiz {
                command: QuizCommand::Score(args),
            }) => {
                assert_eq!(args.answers, "1=5,2=1");
                assert_eq!(args.locale.as_deref(), Some("kk"));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}
