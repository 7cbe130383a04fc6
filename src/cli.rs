use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
#[command(subcommand_value_name = "SUBCOMMAND")]
#[command(subcommand_help_heading = "Subcommands")]
pub struct Cli {
    #[command(subcommand)]
    pub subcommand: Sub,
}

#[derive(Subcommand)]
pub enum Sub {
    /// Replay a recorded JSON-lines event trace and print the resulting intents.
    Replay {
        /// Path to the trace.
        trace: PathBuf,
        /// Path to the config file (default: `$XDG_CONFIG_HOME/dock-interact/config.kdl`).
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Fail instead of falling back to defaults when the config is invalid.
        #[arg(long)]
        strict: bool,
    },
    /// Validate the config file.
    CheckConfig {
        /// Path to the config file (default: `$XDG_CONFIG_HOME/dock-interact/config.kdl`).
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}
