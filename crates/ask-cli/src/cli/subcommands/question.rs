use clap::Subcommand;

/// Question commands.
#[derive(Clone, Debug, Subcommand)]
pub enum QuestionCommands {
    /// Search questions by tag and resolution status, newest first.
    Search {
        /// Comma-separated tag names; a question matches if it has any of them.
        #[arg(long)]
        tag: Option<String>,
        /// `resolved` or `unresolved`; anything else means no status filter.
        #[arg(long)]
        status: Option<String>,
    },
    /// Mark a question resolved.
    Resolve { id: String },
    /// Get a question by ID.
    Get { id: String },
    /// Post a question.
    Create {
        #[arg(long)]
        title: String,
        /// Markdown body, stored verbatim.
        #[arg(long, default_value = "")]
        content: String,
        /// Comma-separated tag names.
        #[arg(long)]
        tag: Option<String>,
    },
}
