//! Required-field validation for catalog input.
//!
//! `name`, `price` and `category` are required; `price` must be
//! non-negative. String fields are trimmed before they are stored, and a
//! blank image falls back to the placeholder.

use core::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use tavola_core::FoodId;

use crate::models::{Food, NewFood, PLACEHOLDER_IMAGE};

/// The set of fields that failed validation, with the offending batch index
/// when the input came from a bulk operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidFields {
    /// Position of the offending item in a bulk request, if any.
    pub index: Option<usize>,
    /// Names of the missing or malformed fields.
    pub fields: Vec<&'static str>,
}

impl InvalidFields {
    const fn new(fields: Vec<&'static str>) -> Self {
        Self {
            index: None,
            fields,
        }
    }

    const fn at_index(index: usize, fields: Vec<&'static str>) -> Self {
        Self {
            index: Some(index),
            fields,
        }
    }
}

impl fmt::Display for InvalidFields {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(index) = self.index {
            write!(f, "item {index}: ")?;
        }
        write!(
            f,
            "missing or malformed fields: {}",
            self.fields.join(", ")
        )
    }
}

/// A [`NewFood`] that has passed validation, with trimmed fields and the
/// image defaulted.
#[derive(Debug, Clone)]
pub struct ValidFood {
    pub name: String,
    pub price: Decimal,
    pub category: String,
    pub image: String,
    pub description: Option<String>,
    pub in_stock: Option<bool>,
}

impl ValidFood {
    /// Promote to a persisted [`Food`] with a store-assigned identity.
    pub(crate) fn into_food(self, id: FoodId, created_at: DateTime<Utc>) -> Food {
        Food {
            id,
            name: self.name,
            price: self.price,
            category: self.category,
            image: self.image,
            description: self.description,
            in_stock: self.in_stock,
            created_at,
        }
    }
}

/// Treat `None` and whitespace-only strings alike.
fn trimmed(value: Option<&String>) -> Option<&str> {
    value.map(|s| s.trim()).filter(|s| !s.is_empty())
}

/// Validate a single food input.
///
/// # Errors
///
/// Returns [`InvalidFields`] naming every missing or malformed field.
pub fn validate(input: &NewFood) -> Result<ValidFood, InvalidFields> {
    let mut fields = Vec::new();

    let name = trimmed(input.name.as_ref());
    if name.is_none() {
        fields.push("name");
    }

    let price = input.price;
    match price {
        None => fields.push("price"),
        Some(p) if p < Decimal::ZERO => fields.push("price"),
        Some(_) => {}
    }

    let category = trimmed(input.category.as_ref());
    if category.is_none() {
        fields.push("category");
    }

    if !fields.is_empty() {
        return Err(InvalidFields::new(fields));
    }

    let image = trimmed(input.image.as_ref())
        .unwrap_or(PLACEHOLDER_IMAGE)
        .to_owned();

    Ok(ValidFood {
        name: name.unwrap_or_default().to_owned(),
        price: price.unwrap_or_default(),
        category: category.unwrap_or_default().to_owned(),
        image,
        description: trimmed(input.description.as_ref()).map(str::to_owned),
        in_stock: input.in_stock,
    })
}

/// Validate every item of a bulk request.
///
/// # Errors
///
/// Returns [`InvalidFields`] for the first offending item, carrying its
/// position in the batch. Nothing is considered valid unless every item is.
pub fn validate_batch(inputs: &[NewFood]) -> Result<Vec<ValidFood>, InvalidFields> {
    inputs
        .iter()
        .enumerate()
        .map(|(index, input)| {
            validate(input).map_err(|invalid| InvalidFields::at_index(index, invalid.fields))
        })
        .collect()
}
