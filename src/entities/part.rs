//! Part entity type - inventory items made in-house or bought from a vendor

use serde::{Deserialize, Serialize};

use crate::core::entity::Entity;
use crate::core::identity::{EntityKind, PartId};

/// Where a part comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SourceKind {
    InHouse,
    Outsourced,
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceKind::InHouse => write!(f, "in-house"),
            SourceKind::Outsourced => write!(f, "outsourced"),
        }
    }
}

impl std::str::FromStr for SourceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "in-house" | "inhouse" => Ok(SourceKind::InHouse),
            "outsourced" => Ok(SourceKind::Outsourced),
            _ => Err(format!(
                "Invalid part source: {}. Use 'in-house' or 'outsourced'",
                s
            )),
        }
    }
}

/// Variant-specific data of a part
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "kebab-case")]
pub enum PartSource {
    /// Manufactured on one of our machines
    InHouse { machine_id: i32 },
    /// Purchased from an outside company
    Outsourced { company_name: String },
}

impl PartSource {
    pub fn kind(&self) -> SourceKind {
        match self {
            PartSource::InHouse { .. } => SourceKind::InHouse,
            PartSource::Outsourced { .. } => SourceKind::Outsourced,
        }
    }

    /// The machine id or company name, as shown in listings
    pub fn detail(&self) -> String {
        match self {
            PartSource::InHouse { machine_id } => machine_id.to_string(),
            PartSource::Outsourced { company_name } => company_name.clone(),
        }
    }
}

/// A Part entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Part {
    /// Unique identifier
    pub id: PartId,

    /// Display name
    pub name: String,

    /// Unit cost
    pub price: f64,

    /// Units on hand
    pub stock: i32,

    /// Minimum units to keep on hand
    pub min: i32,

    /// Maximum units to keep on hand
    pub max: i32,

    /// In-house or outsourced details
    #[serde(flatten)]
    pub source: PartSource,
}

impl Entity for Part {
    type Id = PartId;

    const KIND: EntityKind = EntityKind::Part;

    fn id(&self) -> PartId {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn price(&self) -> f64 {
        self.price
    }

    fn stock(&self) -> i32 {
        self.stock
    }

    fn min(&self) -> i32 {
        self.min
    }

    fn max(&self) -> i32 {
        self.max
    }
}

impl Part {
    /// Create a part manufactured in-house
    pub fn in_house(
        id: PartId,
        name: impl Into<String>,
        price: f64,
        stock: i32,
        min: i32,
        max: i32,
        machine_id: i32,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            price,
            stock,
            min,
            max,
            source: PartSource::InHouse { machine_id },
        }
    }

    /// Create a part bought from an outside company
    pub fn outsourced(
        id: PartId,
        name: impl Into<String>,
        price: f64,
        stock: i32,
        min: i32,
        max: i32,
        company_name: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            price,
            stock,
            min,
            max,
            source: PartSource::Outsourced {
                company_name: company_name.into(),
            },
        }
    }

    pub fn machine_id(&self) -> Option<i32> {
        match self.source {
            PartSource::InHouse { machine_id } => Some(machine_id),
            PartSource::Outsourced { .. } => None,
        }
    }

    pub fn company_name(&self) -> Option<&str> {
        match &self.source {
            PartSource::Outsourced { company_name } => Some(company_name),
            PartSource::InHouse { .. } => None,
        }
    }
}
