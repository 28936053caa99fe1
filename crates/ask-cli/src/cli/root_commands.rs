use clap::Subcommand;

use crate::cli::subcommands::QuestionCommands;

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Board questions.
    Question {
        #[command(subcommand)]
        action: QuestionCommands,
    },
}
