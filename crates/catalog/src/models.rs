//! Catalog domain types.
//!
//! These types represent validated domain objects separate from database row
//! types. [`Food`] is always well-formed: the store only constructs it from
//! validated input.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use tavola_core::FoodId;

/// Image used when a food is created without one.
pub const PLACEHOLDER_IMAGE: &str = "https://via.placeholder.com/300x200?text=No+Image";

/// A persisted catalog item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Food {
    /// Unique ID, assigned by the store on creation.
    pub id: FoodId,
    /// Display name, never empty.
    pub name: String,
    /// Unit price, never negative.
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    /// Menu category, never empty.
    pub category: String,
    /// Image URL; the placeholder when none was supplied.
    pub image: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Display-only stock flag; absent means "in stock".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub in_stock: Option<bool>,
    /// Set at creation time, never mutated.
    pub created_at: DateTime<Utc>,
}

impl Food {
    /// Stock flag for display purposes. An absent flag reads as in stock.
    #[must_use]
    pub fn is_in_stock(&self) -> bool {
        self.in_stock.unwrap_or(true)
    }
}

/// Unvalidated input for creating a food.
///
/// All fields are optional at the wire level so that validation can report
/// the full set of missing fields instead of failing at deserialization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewFood {
    pub name: Option<String>,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub price: Option<Decimal>,
    pub category: Option<String>,
    pub image: Option<String>,
    pub description: Option<String>,
    pub in_stock: Option<bool>,
}

impl NewFood {
    /// Convenience constructor for the three required fields.
    #[must_use]
    pub fn new(name: &str, price: Decimal, category: &str) -> Self {
        Self {
            name: Some(name.to_owned()),
            price: Some(price),
            category: Some(category.to_owned()),
            ..Self::default()
        }
    }
}
