//! Form validation for parts and products
//!
//! Validation works on the raw text a user typed, collects every problem in
//! a fixed order, and only then decides whether an entity may be built.
//! Checks on independent fields never short-circuit each other; the two
//! cross-field checks run only once every field parsed cleanly, and the
//! stock range check only once `max >= min` holds.
//!
//! | Step | Field        | Violation                               |
//! |------|--------------|-----------------------------------------|
//! | 1    | name         | `EmptyName` or `NameStartsWithDigit`    |
//! | 2    | stock        | `NotAnInteger`                          |
//! | 3    | price        | `NotADouble`                            |
//! | 4    | max          | `NotAnInteger`                          |
//! | 5    | min          | `NotAnInteger`                          |
//! | 6    | machine id / company name (parts) | `NotAnInteger` / `EmptyName` |
//! | 7    | max vs min   | `MaxLessThanMin`                        |
//! | 8    | stock range  | `StockOutOfRange`                       |

use miette::Diagnostic;
use std::fmt;
use thiserror::Error;

use crate::core::identity::{PartId, ProductId};
use crate::entities::{Part, PartSource, Product};

/// Form fields, labelled the way they are shown to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Inventory,
    Price,
    Max,
    Min,
    MachineId,
    CompanyName,
}

impl Field {
    pub fn label(&self) -> &'static str {
        match self {
            Field::Name => "Name",
            Field::Inventory => "Inventory",
            Field::Price => "Price/Cost",
            Field::Max => "Max",
            Field::Min => "Min",
            Field::MachineId => "Machine ID",
            Field::CompanyName => "Company Name",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A single rule a form broke
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum Violation {
    #[error("Must enter a {noun} into the {field} field.")]
    #[diagnostic(code(inventory::validation::empty_name))]
    EmptyName { field: Field, noun: &'static str },

    #[error("Name must not begin with a number.")]
    #[diagnostic(
        code(inventory::validation::name_starts_with_digit),
        help("start the name with a letter, e.g. \"Volt regulator 5V\"")
    )]
    NameStartsWithDigit,

    #[error("Must enter an integer into the {field} field.")]
    #[diagnostic(code(inventory::validation::not_an_integer))]
    NotAnInteger { field: Field },

    #[error("Must enter a double into the {field} field.")]
    #[diagnostic(code(inventory::validation::not_a_double))]
    NotADouble { field: Field },

    #[error("Max must be greater than the Min.")]
    #[diagnostic(code(inventory::validation::max_less_than_min))]
    MaxLessThanMin,

    #[error("Inventory must be between the Min and Max values.")]
    #[diagnostic(code(inventory::validation::stock_out_of_range))]
    StockOutOfRange,
}

impl Violation {
    /// The form field the violation points at, if it concerns just one
    pub fn field(&self) -> Option<Field> {
        match self {
            Violation::EmptyName { field, .. }
            | Violation::NotAnInteger { field }
            | Violation::NotADouble { field } => Some(*field),
            Violation::NameStartsWithDigit => Some(Field::Name),
            Violation::MaxLessThanMin | Violation::StockOutOfRange => None,
        }
    }
}

/// A rejected form. Displays as every message, one per line, in check order.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
#[error("{}", join_messages(.violations))]
#[diagnostic(
    code(inventory::validation::invalid_form),
    help("correct the fields above and submit the form again")
)]
pub struct ValidationError {
    violations: Vec<Violation>,
}

impl ValidationError {
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    pub fn messages(&self) -> Vec<String> {
        self.violations.iter().map(|v| v.to_string()).collect()
    }

    /// Get the number of violations
    pub fn violation_count(&self) -> usize {
        self.violations.len()
    }
}

fn join_messages(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

// =========================================================================
// Parsing rules
// =========================================================================

/// Whole-number field: optional sign, digits, no surrounding whitespace
pub fn parse_integer(text: &str) -> Option<i32> {
    text.parse().ok()
}

/// Real-number field: surrounding whitespace ignored, must be finite
pub fn parse_real(text: &str) -> Option<f64> {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

/// Only `0`-`9` count; fractions and superscripts such as `½` or `²` do not
fn starts_with_digit(name: &str) -> bool {
    name.chars().next().is_some_and(|c| c.is_ascii_digit())
}

// =========================================================================
// Forms
// =========================================================================

/// Raw text of the variant-specific part field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceForm {
    InHouse { machine_id: String },
    Outsourced { company_name: String },
}

/// Raw text of a part form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartForm {
    pub name: String,
    pub stock: String,
    pub price: String,
    pub max: String,
    pub min: String,
    pub source: SourceForm,
}

/// Raw text of a product form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductForm {
    pub name: String,
    pub stock: String,
    pub price: String,
    pub max: String,
    pub min: String,
}

/// Validated part values, ready to receive an id
#[derive(Debug, Clone, PartialEq)]
pub struct PartDraft {
    pub name: String,
    pub price: f64,
    pub stock: i32,
    pub min: i32,
    pub max: i32,
    pub source: PartSource,
}

/// Validated product values, ready to receive an id and its parts
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDraft {
    pub name: String,
    pub price: f64,
    pub stock: i32,
    pub min: i32,
    pub max: i32,
}

impl PartForm {
    /// Pre-fill a form with an existing part's values
    pub fn from_part(part: &Part) -> Self {
        let source = match &part.source {
            PartSource::InHouse { machine_id } => SourceForm::InHouse {
                machine_id: machine_id.to_string(),
            },
            PartSource::Outsourced { company_name } => SourceForm::Outsourced {
                company_name: company_name.clone(),
            },
        };
        Self {
            name: part.name.clone(),
            stock: part.stock.to_string(),
            price: part.price.to_string(),
            max: part.max.to_string(),
            min: part.min.to_string(),
            source,
        }
    }

    /// Validate and, only if nothing is wrong, produce a draft
    pub fn parse(&self) -> Result<PartDraft, ValidationError> {
        evaluate_part(self).map_err(|violations| ValidationError { violations })
    }
}

impl ProductForm {
    /// Pre-fill a form with an existing product's values
    pub fn from_product(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            stock: product.stock.to_string(),
            price: product.price.to_string(),
            max: product.max.to_string(),
            min: product.min.to_string(),
        }
    }

    /// Validate and, only if nothing is wrong, produce a draft
    pub fn parse(&self) -> Result<ProductDraft, ValidationError> {
        evaluate_product(self).map_err(|violations| ValidationError { violations })
    }
}

impl PartDraft {
    pub fn into_part(self, id: PartId) -> Part {
        Part {
            id,
            name: self.name,
            price: self.price,
            stock: self.stock,
            min: self.min,
            max: self.max,
            source: self.source,
        }
    }
}

impl ProductDraft {
    pub fn into_product(self, id: ProductId, associated_parts: Vec<Part>) -> Product {
        Product {
            id,
            name: self.name,
            price: self.price,
            stock: self.stock,
            min: self.min,
            max: self.max,
            associated_parts,
        }
    }
}

// =========================================================================
// Entry points
// =========================================================================

/// Every violation in a part form, in check order. Empty means valid.
pub fn validate_part(form: &PartForm) -> Vec<Violation> {
    evaluate_part(form).err().unwrap_or_default()
}

/// Every violation in a product form, in check order. Empty means valid.
pub fn validate_product(form: &ProductForm) -> Vec<Violation> {
    evaluate_product(form).err().unwrap_or_default()
}

struct Quantities {
    stock: i32,
    price: f64,
    max: i32,
    min: i32,
}

/// Steps 1-5, shared by both forms
fn check_common(
    noun: &'static str,
    name: &str,
    stock: &str,
    price: &str,
    max: &str,
    min: &str,
    violations: &mut Vec<Violation>,
) -> Option<Quantities> {
    if name.is_empty() {
        violations.push(Violation::EmptyName {
            field: Field::Name,
            noun,
        });
    } else if starts_with_digit(name) {
        violations.push(Violation::NameStartsWithDigit);
    }

    let stock = parse_integer(stock);
    if stock.is_none() {
        violations.push(Violation::NotAnInteger {
            field: Field::Inventory,
        });
    }
    let price = parse_real(price);
    if price.is_none() {
        violations.push(Violation::NotADouble { field: Field::Price });
    }
    let max = parse_integer(max);
    if max.is_none() {
        violations.push(Violation::NotAnInteger { field: Field::Max });
    }
    let min = parse_integer(min);
    if min.is_none() {
        violations.push(Violation::NotAnInteger { field: Field::Min });
    }

    Some(Quantities {
        stock: stock?,
        price: price?,
        max: max?,
        min: min?,
    })
}

/// Steps 7-8, only reached when every earlier step passed
fn check_ranges(q: &Quantities, violations: &mut Vec<Violation>) {
    if q.max < q.min {
        violations.push(Violation::MaxLessThanMin);
    } else if q.stock < q.min || q.stock > q.max {
        violations.push(Violation::StockOutOfRange);
    }
}

fn evaluate_part(form: &PartForm) -> Result<PartDraft, Vec<Violation>> {
    let mut violations = Vec::new();
    let quantities = check_common(
        "part name",
        &form.name,
        &form.stock,
        &form.price,
        &form.max,
        &form.min,
        &mut violations,
    );

    let source = match &form.source {
        SourceForm::InHouse { machine_id } => match parse_integer(machine_id) {
            Some(machine_id) => Some(PartSource::InHouse { machine_id }),
            None => {
                violations.push(Violation::NotAnInteger {
                    field: Field::MachineId,
                });
                None
            }
        },
        SourceForm::Outsourced { company_name } if company_name.is_empty() => {
            violations.push(Violation::EmptyName {
                field: Field::CompanyName,
                noun: "name",
            });
            None
        }
        SourceForm::Outsourced { company_name } => Some(PartSource::Outsourced {
            company_name: company_name.clone(),
        }),
    };

    if let (true, Some(q)) = (violations.is_empty(), &quantities) {
        check_ranges(q, &mut violations);
    }

    match (quantities, source) {
        (Some(q), Some(source)) if violations.is_empty() => Ok(PartDraft {
            name: form.name.clone(),
            price: q.price,
            stock: q.stock,
            min: q.min,
            max: q.max,
            source,
        }),
        _ => Err(violations),
    }
}

fn evaluate_product(form: &ProductForm) -> Result<ProductDraft, Vec<Violation>> {
    let mut violations = Vec::new();
    let quantities = check_common(
        "product name",
        &form.name,
        &form.stock,
        &form.price,
        &form.max,
        &form.min,
        &mut violations,
    );

    if let (true, Some(q)) = (violations.is_empty(), &quantities) {
        check_ranges(q, &mut violations);
    }

    match quantities {
        Some(q) if violations.is_empty() => Ok(ProductDraft {
            name: form.name.clone(),
            price: q.price,
            stock: q.stock,
            min: q.min,
            max: q.max,
        }),
        _ => Err(violations),
    }
}
