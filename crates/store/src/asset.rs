//! Asset record types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single asset record.
///
/// The id and `created_at` are assigned by the store at creation and
/// never reassigned. `created_at` is internal bookkeeping and is not
/// part of the serialized representation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Asset {
    /// Opaque unique identifier (ULID).
    pub id: String,
    /// Asset name, e.g. "Ounce of Gold".
    pub name: String,
    /// Category like "Electronics" or "Furniture".
    pub category: String,
    /// Monetary value; always positive.
    pub value: f64,
    /// Quantity of that asset; non-negative.
    pub quantity: f64,
    /// Current status, e.g. "Active" or "Retired".
    pub status: String,
    /// Date of purchase, when known.
    pub purchase_date: Option<DateTime<Utc>>,
    /// Creation timestamp, set once by the store.
    #[serde(skip_serializing, default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

/// Fields for creating a new asset.
#[derive(Debug, Clone, Deserialize)]
pub struct NewAsset {
    /// Asset name.
    pub name: String,
    /// Category.
    pub category: String,
    /// Monetary value; must be positive.
    pub value: f64,
    /// Quantity; defaults to 1.
    #[serde(default = "default_quantity")]
    pub quantity: f64,
    /// Current status.
    pub status: String,
    /// Date of purchase, when known.
    #[serde(default)]
    pub purchase_date: Option<DateTime<Utc>>,
}

fn default_quantity() -> f64 {
    1.0
}

/// A partial field set for updating an asset.
///
/// Omitted fields are left unchanged; an update never nulls out a field
/// the caller did not mention.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AssetPatch {
    /// New name.
    pub name: Option<String>,
    /// New category.
    pub category: Option<String>,
    /// New monetary value; must be positive.
    pub value: Option<f64>,
    /// New quantity; non-negative.
    pub quantity: Option<f64>,
    /// New status.
    pub status: Option<String>,
    /// New purchase date.
    pub purchase_date: Option<DateTime<Utc>>,
}

impl AssetPatch {
    /// Apply the patch to an asset, leaving omitted fields unchanged.
    pub fn apply(self, asset: &mut Asset) {
        if let Some(name) = self.name {
            asset.name = name;
        }
        if let Some(category) = self.category {
            asset.category = category;
        }
        if let Some(value) = self.value {
            asset.value = value;
        }
        if let Some(quantity) = self.quantity {
            asset.quantity = quantity;
        }
        if let Some(status) = self.status {
            asset.status = status;
        }
        if let Some(purchase_date) = self.purchase_date {
            asset.purchase_date = Some(purchase_date);
        }
    }
}
