//! `inv shell` command - interactive inventory session
//!
//! Reads one command per line from stdin and applies it to a catalog that
//! lives as long as the session. Failed commands are reported and the
//! session carries on; nothing is written anywhere when it ends.

use clap::{Parser, Subcommand};
use console::style;
use miette::{IntoDiagnostic, Report, Result};
use std::io::{self, BufRead, IsTerminal, Write};
use tracing::debug;

use crate::cli::commands::forms::{PartFieldArgs, ProductFieldArgs};
use crate::cli::commands::part::{print_parts, show_part};
use crate::cli::commands::product::{print_products, show_product};
use crate::cli::helpers::{confirm, report_violations, split_words};
use crate::cli::GlobalOpts;
use crate::core::{
    Config, EntityKind, PartForm, PartId, ProductEditor, ProductForm, ProductId, Session,
    SessionError,
};
use crate::entities::{Part, Product};

#[derive(clap::Args, Debug)]
pub struct ShellArgs {
    /// Answer yes to every confirmation prompt
    #[arg(long, short = 'y')]
    pub yes: bool,
}

/// One line of shell input
#[derive(Parser, Debug)]
#[command(name = "inv>", no_binary_name = true, disable_version_flag = true)]
struct ShellLine {
    #[command(subcommand)]
    command: ShellCommand,
}

#[derive(Subcommand, Debug)]
enum ShellCommand {
    /// List parts matching a name fragment or id (all parts when omitted)
    Parts { query: Vec<String> },

    /// List products matching a name fragment or id (all products when omitted)
    Products { query: Vec<String> },

    /// Select a part for modify-part and delete-part
    SelectPart { id: PartId },

    /// Select a product for modify-product and delete-product
    SelectProduct { id: ProductId },

    /// Show the selected part and product
    Show,

    /// Add a part from form fields
    AddPart(PartFieldArgs),

    /// Change fields of the selected part (unset fields keep their value)
    ModifyPart(PartFieldArgs),

    /// Delete the selected part
    DeletePart,

    /// Add a product from form fields and associated parts
    AddProduct(ProductInput),

    /// Change fields and associated parts of the selected product
    ModifyProduct(ProductInput),

    /// Delete the selected product (it must have no associated parts)
    DeleteProduct,

    /// Leave the shell
    #[command(visible_alias = "quit")]
    Exit,
}

#[derive(clap::Args, Debug)]
struct ProductInput {
    #[command(flatten)]
    fields: ProductFieldArgs,

    /// Associate a catalog part by id (repeatable)
    #[arg(long = "add-part", value_name = "PART_ID")]
    add_parts: Vec<PartId>,

    /// Drop one association with this part id (repeatable)
    #[arg(long = "remove-part", value_name = "PART_ID")]
    remove_parts: Vec<PartId>,
}

enum Flow {
    Continue,
    Exit,
}

pub fn run(args: ShellArgs, global: &GlobalOpts, config: &Config) -> Result<()> {
    let stdin = io::stdin();
    let interactive = stdin.is_terminal();
    let mut input = stdin.lock();

    let mut shell = Shell {
        session: Session::new(global.starting_catalog()),
        global,
        assume_yes: args.yes || config.assume_yes(),
    };

    if interactive && !global.quiet {
        println!(
            "{} Inventory shell. Type {} for commands, {} to leave.",
            style("◆").cyan(),
            style("help").bold(),
            style("exit").bold()
        );
    }

    let mut line = String::new();
    loop {
        if interactive {
            print!("{} ", style("inv>").cyan());
            io::stdout().flush().into_diagnostic()?;
        }

        line.clear();
        if input.read_line(&mut line).into_diagnostic()? == 0 {
            break;
        }

        let words = split_words(&line);
        if words.is_empty() {
            continue;
        }

        let command = match ShellLine::try_parse_from(&words) {
            Ok(parsed) => parsed.command,
            Err(e) => {
                e.print().into_diagnostic()?;
                continue;
            }
        };

        debug!(?command, "shell command");
        match shell.execute(command, &mut input) {
            Ok(Flow::Continue) => {}
            Ok(Flow::Exit) => break,
            Err(report) => print_failure(&report),
        }
    }

    Ok(())
}

fn print_failure(report: &Report) {
    match report.downcast_ref::<SessionError>() {
        Some(SessionError::Invalid(err)) => report_violations(err),
        _ => eprintln!("{} {}", style("✗").red(), report),
    }
}

struct Shell<'a> {
    session: Session,
    global: &'a GlobalOpts,
    assume_yes: bool,
}

impl Shell<'_> {
    fn execute(&mut self, command: ShellCommand, input: &mut impl BufRead) -> Result<Flow> {
        match command {
            ShellCommand::Parts { query } => {
                let query = query.join(" ");
                let parts: Vec<&Part> = if query.is_empty() {
                    self.session.catalog().all_parts().collect()
                } else {
                    self.session.search_parts(&query)?
                };
                print_parts(&parts, self.global)?;
            }
            ShellCommand::Products { query } => {
                let query = query.join(" ");
                let products: Vec<&Product> = if query.is_empty() {
                    self.session.catalog().all_products().collect()
                } else {
                    self.session.search_products(&query)?
                };
                print_products(&products, self.global)?;
            }
            ShellCommand::SelectPart { id } => {
                let part = self.session.select_part(id)?;
                println!(
                    "{} Selected part {} {}",
                    style("→").cyan(),
                    style(id).cyan(),
                    style(&part.name).yellow()
                );
            }
            ShellCommand::SelectProduct { id } => {
                let product = self.session.select_product(id)?;
                println!(
                    "{} Selected product {} {}",
                    style("→").cyan(),
                    style(id).cyan(),
                    style(&product.name).yellow()
                );
            }
            ShellCommand::Show => self.show()?,
            ShellCommand::AddPart(fields) => {
                let id = self.session.add_part(&fields.to_form())?;
                println!("{} Added part {}", style("✓").green(), style(id).cyan());
            }
            ShellCommand::ModifyPart(fields) => {
                let base = self
                    .session
                    .selected_part()
                    .map(PartForm::from_part)
                    .ok_or(SessionError::MissingSelection {
                        kind: EntityKind::Part,
                    })?;
                let part = self.session.modify_selected_part(&fields.overlay(base))?;
                println!(
                    "{} Updated part {} {}",
                    style("✓").green(),
                    style(part.id).cyan(),
                    style(&part.name).yellow()
                );
            }
            ShellCommand::DeletePart => {
                let name = self
                    .session
                    .selected_part()
                    .map(|p| p.name.clone())
                    .ok_or(SessionError::MissingSelection {
                        kind: EntityKind::Part,
                    })?;
                if !self.confirm(&format!("Delete part {}?", name), input)? {
                    println!("Aborted.");
                    return Ok(Flow::Continue);
                }
                let part = self.session.delete_selected_part()?;
                println!("{} Deleted part {}", style("✓").green(), style(part.id).cyan());
            }
            ShellCommand::AddProduct(product) => {
                let name = product.fields.name.as_deref().unwrap_or("the new product");
                if !self.confirm_removals(&product, name, input)? {
                    println!("Aborted.");
                    return Ok(Flow::Continue);
                }
                let mut editor = self.session.begin_product();
                self.apply_associations(&mut editor, &product)?;
                let id = self
                    .session
                    .save_product(editor, &product.fields.to_form())?;
                println!("{} Added product {}", style("✓").green(), style(id).cyan());
            }
            ShellCommand::ModifyProduct(product) => {
                let mut editor = self.session.edit_selected_product()?;
                let (base, name) = match self.session.selected_product() {
                    Some(p) => (ProductForm::from_product(p), p.name.clone()),
                    None => {
                        return Err(SessionError::MissingSelection {
                            kind: EntityKind::Product,
                        }
                        .into())
                    }
                };

                if !self.confirm_removals(&product, &name, input)? {
                    println!("Aborted.");
                    return Ok(Flow::Continue);
                }

                self.apply_associations(&mut editor, &product)?;
                let id = self
                    .session
                    .save_product(editor, &product.fields.overlay(base))?;
                println!("{} Updated product {}", style("✓").green(), style(id).cyan());
            }
            ShellCommand::DeleteProduct => {
                let name = self
                    .session
                    .selected_product()
                    .map(|p| p.name.clone())
                    .ok_or(SessionError::MissingSelection {
                        kind: EntityKind::Product,
                    })?;
                if !self.confirm(&format!("Delete product {}?", name), input)? {
                    println!("Aborted.");
                    return Ok(Flow::Continue);
                }
                let product = self.session.delete_selected_product()?;
                println!(
                    "{} Deleted product {}",
                    style("✓").green(),
                    style(product.id).cyan()
                );
            }
            ShellCommand::Exit => {
                if self.confirm("Exit the inventory shell?", input)? {
                    return Ok(Flow::Exit);
                }
            }
        }
        Ok(Flow::Continue)
    }

    fn show(&self) -> Result<()> {
        let part = self.session.selected_part();
        let product = self.session.selected_product();
        if part.is_none() && product.is_none() {
            println!("{}", style("Nothing selected").dim());
        }
        if let Some(part) = part {
            show_part(part, self.global.format)?;
        }
        if let Some(product) = product {
            show_product(product, self.global.format)?;
        }
        Ok(())
    }

    /// Apply --add-part then --remove-part to an editor's working copy
    fn apply_associations(&self, editor: &mut ProductEditor, input: &ProductInput) -> Result<()> {
        for id in &input.add_parts {
            let part = self
                .session
                .catalog()
                .lookup_part(*id)
                .cloned()
                .ok_or_else(|| SessionError::PartNotFound(id.to_string()))?;
            editor.add_part(part);
        }
        for id in &input.remove_parts {
            editor.remove_part(*id)?;
        }
        Ok(())
    }

    /// Ask before dropping associations; true when there is nothing to drop
    fn confirm_removals(
        &self,
        product: &ProductInput,
        name: &str,
        input: &mut impl BufRead,
    ) -> Result<bool> {
        if product.remove_parts.is_empty() {
            return Ok(true);
        }
        let question = format!(
            "Remove {} associated part(s) from {}?",
            product.remove_parts.len(),
            name
        );
        self.confirm(&question, input)
    }

    fn confirm(&self, question: &str, input: &mut impl BufRead) -> Result<bool> {
        if self.assume_yes {
            return Ok(true);
        }
        confirm(question, input, &mut io::stdout())
    }
}
