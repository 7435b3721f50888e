//! `inv product` command - product listing, display and form checks

use clap::Subcommand;
use console::style;
use miette::{IntoDiagnostic, Result};

use crate::cli::commands::forms::ProductFieldArgs;
use crate::cli::commands::part::{part_row, PART_COLUMNS};
use crate::cli::table::{
    entity_row, CellValue, ColumnDef, TableConfig, TableFormatter, TableRow,
};
use crate::cli::wizard::FormWizard;
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::{Entity, ProductForm, ProductId, Session};
use crate::entities::Product;

#[derive(Subcommand, Debug)]
pub enum ProductCommands {
    /// List products, optionally filtered by name fragment or id
    List(ListArgs),

    /// Show a product and its associated parts
    Show(ShowArgs),

    /// Validate a product form without touching the catalog
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
    /// Product id
    pub id: ProductId,
}

#[derive(clap::Args, Debug)]
pub struct CheckArgs {
    #[command(flatten)]
    pub fields: ProductFieldArgs,

    /// Start from an existing product: unset fields keep its values and it
    /// keeps its id and associated parts
    #[arg(long, value_name = "ID")]
    pub from: Option<ProductId>,

    /// Prompt for every field instead of reading flags
    #[arg(long, short = 'i', conflicts_with_all = ["name", "stock", "price", "max", "min"])]
    pub interactive: bool,
}

/// Column definitions for product tables
pub const PRODUCT_COLUMNS: &[ColumnDef] = &[
    ColumnDef::new("id", "ID", 6),
    ColumnDef::new("name", "NAME", 28),
    ColumnDef::new("stock", "INV", 7),
    ColumnDef::new("price", "PRICE", 10),
    ColumnDef::new("min", "MIN", 7),
    ColumnDef::new("max", "MAX", 7),
    ColumnDef::new("parts", "PARTS", 7),
];

pub fn run(cmd: ProductCommands, global: &GlobalOpts) -> Result<()> {
    let session = Session::new(global.starting_catalog());

    match cmd {
        ProductCommands::List(args) => {
            let mut products: Vec<&Product> = match args.search.as_deref() {
                Some(query) => session.search_products(query)?,
                None => session.catalog().all_products().collect(),
            };
            if args.count {
                println!("{}", products.len());
                return Ok(());
            }
            if let Some(limit) = args.limit {
                products.truncate(limit);
            }
            print_products(&products, global)
        }
        ProductCommands::Show(args) => {
            let product = session
                .catalog()
                .lookup_product(args.id)
                .ok_or_else(|| miette::miette!("No product found with id {}", args.id))?;
            show_product(product, global.format)
        }
        ProductCommands::Check(args) => {
            let existing = match args.from {
                Some(id) => Some(
                    session
                        .catalog()
                        .lookup_product(id)
                        .ok_or_else(|| miette::miette!("No product found with id {}", id))?,
                ),
                None => None,
            };
            let base = existing.map(ProductForm::from_product);
            let form = match (args.interactive, base) {
                (true, base) => FormWizard::new().product(base.as_ref())?,
                (false, Some(base)) => args.fields.overlay(base),
                (false, None) => args.fields.to_form(),
            };
            let draft = form.parse()?;
            let product = match existing {
                Some(existing) => draft.into_product(existing.id, existing.associated_parts.clone()),
                None => draft.into_product(session.catalog().next_product_id(), Vec::new()),
            };

            if !global.quiet {
                println!(
                    "{} Product {} passes validation",
                    style("✓").green(),
                    style(&product.name).yellow()
                );
            }
            show_product(&product, global.format)
        }
    }
}

/// Build a table row for one product
pub fn product_row(product: &Product) -> TableRow {
    entity_row(product).cell(
        "parts",
        CellValue::Number(product.associated_parts.len() as i64),
    )
}

/// Print a list of products in the requested format
pub fn print_products(products: &[&Product], global: &GlobalOpts) -> Result<()> {
    match global.format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(products).into_diagnostic()?;
            println!("{}", json);
        }
        OutputFormat::Yaml => {
            let yaml = serde_yml::to_string(&products).into_diagnostic()?;
            print!("{}", yaml);
        }
        format => {
            let config = if global.quiet {
                TableConfig::for_pipe()
            } else {
                TableConfig::default()
            };
            TableFormatter::new(PRODUCT_COLUMNS, "product")
                .with_config(config)
                .output(products.iter().map(|p| product_row(p)), format);
        }
    }
    Ok(())
}

/// Print a single product in the requested format
pub fn show_product(product: &Product, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Yaml => {
            let yaml = serde_yml::to_string(product).into_diagnostic()?;
            print!("{}", yaml);
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(product).into_diagnostic()?;
            println!("{}", json);
        }
        OutputFormat::Id => {
            println!("{}", product.id);
        }
        _ => {
            println!("{}", style("─".repeat(60)).dim());
            println!(
                "{}: {}",
                style("ID").bold(),
                style(product.id.to_string()).cyan()
            );
            println!(
                "{}: {}",
                style("Name").bold(),
                style(product.name()).yellow()
            );
            println!("{}: {}", style("Inventory").bold(), product.stock());
            println!("{}: {:.2}", style("Price").bold(), product.price());
            println!("{}: {}", style("Min").bold(), product.min());
            println!("{}: {}", style("Max").bold(), product.max());
            println!("{}", style("─".repeat(60)).dim());

            if product.has_associated_parts() {
                println!();
                println!("{}", style("Associated Parts").bold());
                TableFormatter::new(PART_COLUMNS, "associated part")
                    .output(product.associated_parts.iter().map(part_row), OutputFormat::Tsv);
            } else {
                println!("{}", style("No associated parts").dim());
            }
        }
    }
    Ok(())
}
