//! Form field flags shared by part and product commands
//!
//! Every field is taken as raw text so that bad numbers reach the
//! validator and come back as violations instead of clap parse errors.

use crate::core::{PartForm, ProductForm, SourceForm};

#[derive(clap::Args, Debug, Clone, Default)]
pub struct PartFieldArgs {
    /// Part name
    #[arg(long, short = 'n', allow_hyphen_values = true)]
    pub name: Option<String>,

    /// Inventory level
    #[arg(long, visible_alias = "inv", allow_hyphen_values = true)]
    pub stock: Option<String>,

    /// Price/cost per unit
    #[arg(long, short = 'p', allow_hyphen_values = true)]
    pub price: Option<String>,

    /// Maximum inventory level
    #[arg(long, allow_hyphen_values = true)]
    pub max: Option<String>,

    /// Minimum inventory level
    #[arg(long, allow_hyphen_values = true)]
    pub min: Option<String>,

    /// Machine ID (makes the part in-house)
    #[arg(long, conflicts_with = "company_name", allow_hyphen_values = true)]
    pub machine_id: Option<String>,

    /// Company name (makes the part outsourced)
    #[arg(long, allow_hyphen_values = true)]
    pub company_name: Option<String>,
}

impl PartFieldArgs {
    /// A fresh form: absent fields are left blank, and the part is in-house
    /// unless a company is given
    pub fn to_form(&self) -> PartForm {
        self.overlay(PartForm {
            name: String::new(),
            stock: String::new(),
            price: String::new(),
            max: String::new(),
            min: String::new(),
            source: SourceForm::InHouse {
                machine_id: String::new(),
            },
        })
    }

    /// Replace the given fields of an existing form, switching the part
    /// source when the other variant's field is supplied
    pub fn overlay(&self, mut form: PartForm) -> PartForm {
        replace(&mut form.name, &self.name);
        replace(&mut form.stock, &self.stock);
        replace(&mut form.price, &self.price);
        replace(&mut form.max, &self.max);
        replace(&mut form.min, &self.min);

        if let Some(machine_id) = &self.machine_id {
            form.source = SourceForm::InHouse {
                machine_id: machine_id.clone(),
            };
        } else if let Some(company_name) = &self.company_name {
            form.source = SourceForm::Outsourced {
                company_name: company_name.clone(),
            };
        }
        form
    }
}

#[derive(clap::Args, Debug, Clone, Default)]
pub struct ProductFieldArgs {
    /// Product name
    #[arg(long, short = 'n', allow_hyphen_values = true)]
    pub name: Option<String>,

    /// Inventory level
    #[arg(long, visible_alias = "inv", allow_hyphen_values = true)]
    pub stock: Option<String>,

    /// Price per unit
    #[arg(long, short = 'p', allow_hyphen_values = true)]
    pub price: Option<String>,

    /// Maximum inventory level
    #[arg(long, allow_hyphen_values = true)]
    pub max: Option<String>,

    /// Minimum inventory level
    #[arg(long, allow_hyphen_values = true)]
    pub min: Option<String>,
}

impl ProductFieldArgs {
    /// A fresh form with absent fields left blank
    pub fn to_form(&self) -> ProductForm {
        self.overlay(ProductForm::default())
    }

    /// Replace the given fields of an existing form
    pub fn overlay(&self, mut form: ProductForm) -> ProductForm {
        replace(&mut form.name, &self.name);
        replace(&mut form.stock, &self.stock);
        replace(&mut form.price, &self.price);
        replace(&mut form.max, &self.max);
        replace(&mut form.min, &self.min);
        form
    }
}

fn replace(field: &mut String, value: &Option<String>) {
    if let Some(value) = value {
        field.clone_from(value);
    }
}
