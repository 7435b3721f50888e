//! Interactive form wizard for parts and products
//!
//! Prompts for every form field as raw text. Nothing is validated while
//! prompting; the collected form goes through the same validation as a
//! form built from flags, so an empty answer surfaces as a violation.

use console::style;
use dialoguer::{theme::ColorfulTheme, Input, Select};
use miette::{IntoDiagnostic, Result};

use crate::core::{EntityKind, PartForm, ProductForm, SourceForm};
use crate::entities::SourceKind;

/// A terminal wizard that fills in part and product forms
pub struct FormWizard {
    theme: ColorfulTheme,
}

impl Default for FormWizard {
    fn default() -> Self {
        Self::new()
    }
}

impl FormWizard {
    pub fn new() -> Self {
        Self {
            theme: ColorfulTheme::default(),
        }
    }

    /// Prompt for a part form, offering the given values as defaults
    pub fn part(&self, defaults: Option<&PartForm>) -> Result<PartForm> {
        self.header(EntityKind::Part, defaults.is_some());

        let name = self.text("Name", defaults.map(|d| d.name.as_str()))?;
        let stock = self.text("Inventory", defaults.map(|d| d.stock.as_str()))?;
        let price = self.text("Price/Cost", defaults.map(|d| d.price.as_str()))?;
        let max = self.text("Max", defaults.map(|d| d.max.as_str()))?;
        let min = self.text("Min", defaults.map(|d| d.min.as_str()))?;

        let kinds = [SourceKind::InHouse, SourceKind::Outsourced];
        let current = match defaults.map(|d| &d.source) {
            Some(SourceForm::Outsourced { .. }) => 1,
            _ => 0,
        };
        let labels: Vec<String> = kinds.iter().map(|k| k.to_string()).collect();
        let selection = Select::with_theme(&self.theme)
            .with_prompt("Source")
            .items(&labels)
            .default(current)
            .interact()
            .into_diagnostic()?;

        let source = match kinds[selection] {
            SourceKind::InHouse => {
                let default = match defaults.map(|d| &d.source) {
                    Some(SourceForm::InHouse { machine_id }) => Some(machine_id.as_str()),
                    _ => None,
                };
                SourceForm::InHouse {
                    machine_id: self.text("Machine ID", default)?,
                }
            }
            SourceKind::Outsourced => {
                let default = match defaults.map(|d| &d.source) {
                    Some(SourceForm::Outsourced { company_name }) => Some(company_name.as_str()),
                    _ => None,
                };
                SourceForm::Outsourced {
                    company_name: self.text("Company Name", default)?,
                }
            }
        };

        Ok(PartForm {
            name,
            stock,
            price,
            max,
            min,
            source,
        })
    }

    /// Prompt for a product form, offering the given values as defaults
    pub fn product(&self, defaults: Option<&ProductForm>) -> Result<ProductForm> {
        self.header(EntityKind::Product, defaults.is_some());

        Ok(ProductForm {
            name: self.text("Name", defaults.map(|d| d.name.as_str()))?,
            stock: self.text("Inventory", defaults.map(|d| d.stock.as_str()))?,
            price: self.text("Price", defaults.map(|d| d.price.as_str()))?,
            max: self.text("Max", defaults.map(|d| d.max.as_str()))?,
            min: self.text("Min", defaults.map(|d| d.min.as_str()))?,
        })
    }

    fn header(&self, kind: EntityKind, modifying: bool) {
        let verb = if modifying { "Modifying" } else { "Adding" };
        println!();
        println!("{} {} {}", style("◆").cyan(), verb, style(kind).bold());
        println!("{}", style("─".repeat(50)).dim());
    }

    fn text(&self, prompt: &str, default: Option<&str>) -> Result<String> {
        let input = Input::<String>::with_theme(&self.theme)
            .with_prompt(prompt)
            .allow_empty(true);
        let input = match default {
            Some(value) => input.default(value.to_string()),
            None => input,
        };
        input.interact_text().into_diagnostic()
    }
}
