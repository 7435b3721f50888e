//! CLI argument definitions using clap derive

use clap::{Parser, Subcommand, ValueEnum};

use crate::cli::commands::{
    completions::CompletionsArgs, part::PartCommands, product::ProductCommands,
    shell::ShellArgs,
};
use crate::core::{Catalog, Config};

#[derive(Parser)]
#[command(name = "inv")]
#[command(author, version, about = "Inventory management for parts and products")]
#[command(long_about = "Manage an in-memory inventory of parts and products: validate forms, search, and run add/modify/delete workflows in an interactive shell.")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOpts,
}

#[derive(clap::Args, Clone, Debug)]
pub struct GlobalOpts {
    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "auto")]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Enable verbose output (debug logging on stderr)
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Start from an empty catalog instead of the seed data
    #[arg(long, global = true)]
    pub empty: bool,
}

impl GlobalOpts {
    /// Fill in anything left at its default from the loaded configuration
    pub fn with_config(mut self, config: &Config) -> Self {
        if self.format == OutputFormat::Auto {
            if let Some(format) = config
                .default_format
                .as_deref()
                .and_then(|f| OutputFormat::from_str(f, true).ok())
            {
                self.format = format;
            }
        }
        self.empty = self.empty || config.start_empty();
        self
    }

    /// The catalog every command starts from
    pub fn starting_catalog(&self) -> Catalog {
        if self.empty {
            Catalog::new()
        } else {
            Catalog::seeded()
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Part management (in-house and outsourced)
    #[command(subcommand)]
    Part(PartCommands),

    /// Product management (products and their associated parts)
    #[command(subcommand)]
    Product(ProductCommands),

    /// Interactive inventory session
    Shell(ShellArgs),

    /// Generate shell completion scripts
    Completions(CompletionsArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Automatically detect based on context (yaml for show, tsv for list)
    #[default]
    Auto,
    /// YAML format (full fidelity)
    Yaml,
    /// Tab-separated values (for piping)
    Tsv,
    /// JSON format (for programming)
    Json,
    /// CSV format (for spreadsheets)
    Csv,
    /// Markdown tables
    Md,
    /// Just IDs, one per line
    Id,
}
