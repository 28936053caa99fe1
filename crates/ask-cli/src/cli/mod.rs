use ask_config::AskConfig;
use clap::Parser;

pub mod global;
pub mod root_commands;
pub mod subcommands;

pub use global::{GlobalFlags, OutputFormat};
pub use root_commands::Commands;

/// Top-level CLI parser for the `askb` binary.
#[derive(Debug, Parser)]
#[command(name = "askb", version, about = "askboard - tagged question board")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, table, raw (defaults to `general.default_format`)
    #[arg(short, long, global = true)]
    pub format: Option<OutputFormat>,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Database path, overriding `database.path` (`:memory:` allowed)
    #[arg(long, global = true)]
    pub db: Option<String>,
}

impl Cli {
    /// Resolve global flags, falling back to configuration where a flag is absent.
    pub fn global_flags(&self, config: &AskConfig) -> anyhow::Result<GlobalFlags> {
        let format = match self.format {
            Some(format) => format,
            None => OutputFormat::from_config(&config.general.default_format)?,
        };
        Ok(GlobalFlags {
            format,
            quiet: self.quiet,
        })
    }
}
