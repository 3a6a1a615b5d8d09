// ABOUTME: CLI argument parsing and command routing for freightbook
//
// Provides command-line interface for:
// - Launching the booking wizard TUI (tui, default)
// - Printing slot availability for a date (slots)

pub mod slots;

use clap::{Parser, Subcommand, ValueEnum};

/// Lead intake and consultation booking for international freight
#[derive(Parser)]
#[command(name = "freightbook")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output format
    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

/// Output format for commands
#[derive(Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Launch the booking wizard TUI (default if no command given)
    Tui,

    /// Show consultation availability for a date
    Slots(SlotsArgs),
}

/// Which wizard flow's slot catalog to consult
#[derive(Clone, Copy, Default, ValueEnum)]
pub enum FlowArg {
    #[default]
    Freight,
    Car,
}

/// Arguments for the slots command
#[derive(clap::Args)]
pub struct SlotsArgs {
    /// Calendar date to check, YYYY-MM-DD
    #[arg(long)]
    pub date: String,

    /// Slot catalog to use
    #[arg(long, default_value = "freight")]
    pub flow: FlowArg,
}
