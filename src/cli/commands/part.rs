//! `inv part` command - part listing, display and form checks

use clap::Subcommand;
use console::style;
use miette::{IntoDiagnostic, Result};

use crate::cli::commands::forms::PartFieldArgs;
use crate::cli::table::{
    entity_row, CellValue, ColumnDef, TableConfig, TableFormatter, TableRow,
};
use crate::cli::wizard::FormWizard;
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::{Entity, PartForm, PartId, Session};
use crate::entities::{Part, PartSource};

#[derive(Subcommand, Debug)]
pub enum PartCommands {
    /// List parts, optionally filtered by name fragment or id
    List(ListArgs),

    /// Show a part's details
    Show(ShowArgs),

    /// Validate a part form without touching the catalog
    Check(CheckArgs),
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Case-insensitive name fragment; falls back to an exact id
    #[arg(long, short = 's')]
    pub search: Option<String>,

    /// Limit number of results
    #[arg(long, short = 'n')]
    pub limit: Option<usize>,

    /// Show count only
    #[arg(long)]
    pub count: bool,
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Part id
    pub id: PartId,
}

#[derive(clap::Args, Debug)]
pub struct CheckArgs {
    #[command(flatten)]
    pub fields: PartFieldArgs,

    /// Start from an existing part: unset fields keep its values and it keeps its id
    #[arg(long, value_name = "ID")]
    pub from: Option<PartId>,

    /// Prompt for every field instead of reading flags
    #[arg(long, short = 'i', conflicts_with_all = ["name", "stock", "price", "max", "min", "machine_id", "company_name"])]
    pub interactive: bool,
}

/// Column definitions for part tables
pub const PART_COLUMNS: &[ColumnDef] = &[
    ColumnDef::new("id", "ID", 6),
    ColumnDef::new("name", "NAME", 28),
    ColumnDef::new("stock", "INV", 7),
    ColumnDef::new("price", "PRICE", 10),
    ColumnDef::new("min", "MIN", 7),
    ColumnDef::new("max", "MAX", 7),
    ColumnDef::new("source", "SOURCE", 11),
    ColumnDef::new("detail", "MACHINE/COMPANY", 24),
];

pub fn run(cmd: PartCommands, global: &GlobalOpts) -> Result<()> {
    let session = Session::new(global.starting_catalog());

    match cmd {
        PartCommands::List(args) => {
            let mut parts: Vec<&Part> = match args.search.as_deref() {
                Some(query) => session.search_parts(query)?,
                None => session.catalog().all_parts().collect(),
            };
            if args.count {
                println!("{}", parts.len());
                return Ok(());
            }
            if let Some(limit) = args.limit {
                parts.truncate(limit);
            }
            print_parts(&parts, global)
        }
        PartCommands::Show(args) => {
            let part = session
                .catalog()
                .lookup_part(args.id)
                .ok_or_else(|| miette::miette!("No part found with id {}", args.id))?;
            show_part(part, global.format)
        }
        PartCommands::Check(args) => {
            let base = match args.from {
                Some(id) => Some(
                    session
                        .catalog()
                        .lookup_part(id)
                        .map(PartForm::from_part)
                        .ok_or_else(|| miette::miette!("No part found with id {}", id))?,
                ),
                None => None,
            };
            let form = match (args.interactive, base) {
                (true, base) => FormWizard::new().part(base.as_ref())?,
                (false, Some(base)) => args.fields.overlay(base),
                (false, None) => args.fields.to_form(),
            };
            let draft = form.parse()?;
            let id = args.from.unwrap_or_else(|| session.catalog().next_part_id());
            let part = draft.into_part(id);

            if !global.quiet {
                println!(
                    "{} Part {} passes validation",
                    style("✓").green(),
                    style(&part.name).yellow()
                );
            }
            show_part(&part, global.format)
        }
    }
}

/// Build a table row for one part
pub fn part_row(part: &Part) -> TableRow {
    entity_row(part)
        .cell("source", CellValue::Source(part.source.kind().to_string()))
        .cell("detail", CellValue::Text(part.source.detail()))
}

/// Print a list of parts in the requested format
pub fn print_parts(parts: &[&Part], global: &GlobalOpts) -> Result<()> {
    match global.format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(parts).into_diagnostic()?;
            println!("{}", json);
        }
        OutputFormat::Yaml => {
            let yaml = serde_yml::to_string(&parts).into_diagnostic()?;
            print!("{}", yaml);
        }
        format => {
            let config = if global.quiet {
                TableConfig::for_pipe()
            } else {
                TableConfig::default()
            };
            TableFormatter::new(PART_COLUMNS, "part")
                .with_config(config)
                .output(parts.iter().map(|p| part_row(p)), format);
        }
    }
    Ok(())
}

/// Print a single part in the requested format
pub fn show_part(part: &Part, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Yaml => {
            let yaml = serde_yml::to_string(part).into_diagnostic()?;
            print!("{}", yaml);
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(part).into_diagnostic()?;
            println!("{}", json);
        }
        OutputFormat::Id => {
            println!("{}", part.id);
        }
        _ => {
            println!("{}", style("─".repeat(60)).dim());
            println!(
                "{}: {}",
                style("ID").bold(),
                style(part.id.to_string()).cyan()
            );
            println!("{}: {}", style("Name").bold(), style(part.name()).yellow());
            println!("{}: {}", style("Inventory").bold(), part.stock());
            println!("{}: {:.2}", style("Price/Cost").bold(), part.price());
            println!("{}: {}", style("Min").bold(), part.min());
            println!("{}: {}", style("Max").bold(), part.max());
            match &part.source {
                PartSource::InHouse { machine_id } => {
                    println!("{}: in-house", style("Source").bold());
                    println!("{}: {}", style("Machine ID").bold(), machine_id);
                }
                PartSource::Outsourced { company_name } => {
                    println!("{}: outsourced", style("Source").bold());
                    println!("{}: {}", style("Company Name").bold(), company_name);
                }
            }
            println!("{}", style("─".repeat(60)).dim());
        }
    }
    Ok(())
}
