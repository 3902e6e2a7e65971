//! Order composition engine.
//!
//! An [`OrderDraft`] tracks a shopper's selection while they adjust the
//! quantity and fill in contact details. Nothing here performs I/O or
//! persists anything: the draft lives for the duration of the order view
//! and [`OrderDraft::to_submission`] produces the payload an external
//! order-acceptance endpoint would receive.

use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use tavola_catalog::Food;
use tavola_core::FoodId;

/// Errors produced while composing an order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderError {
    /// Required customer fields are missing or blank.
    #[error("missing or malformed fields: {}", fields.join(", "))]
    Validation { fields: Vec<&'static str> },

    /// The draft has no customer info attached yet.
    #[error("customer info has not been attached")]
    IncompleteDraft,
}

/// Contact and delivery details collected from the order form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CustomerInfo {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub zip_code: String,
    pub payment_method: String,
    pub special_instructions: String,
}

impl CustomerInfo {
    /// Required fields a shopper must fill in before submission.
    const REQUIRED: [(&'static str, fn(&Self) -> &str); 4] = [
        ("fullName", |i| &i.full_name),
        ("email", |i| &i.email),
        ("phone", |i| &i.phone),
        ("address", |i| &i.address),
    ];

    fn missing_fields(&self) -> Vec<&'static str> {
        Self::REQUIRED
            .iter()
            .filter(|(_, get)| get(self).trim().is_empty())
            .map(|(name, _)| *name)
            .collect()
    }
}

/// An in-progress, unpersisted order for a single food.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderDraft {
    food_id: FoodId,
    food_name: String,
    unit_price: Decimal,
    quantity: u32,
    total_amount: Decimal,
    customer_info: Option<CustomerInfo>,
}

impl OrderDraft {
    /// Begin a draft for the selected food: one unit, total equal to the
    /// unit price.
    #[must_use]
    pub fn start(food: &Food) -> Self {
        let unit_price = food.price;
        Self {
            food_id: food.id,
            food_name: food.name.clone(),
            unit_price,
            quantity: 1,
            total_amount: rounded_total(unit_price, 1),
            customer_info: None,
        }
    }

    #[must_use]
    pub const fn quantity(&self) -> u32 {
        self.quantity
    }

    #[must_use]
    pub const fn total_amount(&self) -> Decimal {
        self.total_amount
    }

    /// Adjust the quantity by `delta`, clamping at a minimum of one unit.
    ///
    /// Decrementing below one is a no-op; the total is recomputed either
    /// way.
    pub fn adjust_quantity(&mut self, delta: i32) {
        let adjusted = i64::from(self.quantity).saturating_add(i64::from(delta));
        self.quantity = u32::try_from(adjusted.max(1)).unwrap_or(u32::MAX);
        self.total_amount = rounded_total(self.unit_price, self.quantity);
    }

    /// Attach the shopper's contact details.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::Validation`] naming every required field that
    /// is missing or blank; the draft is left unchanged in that case.
    pub fn attach_customer_info(&mut self, info: CustomerInfo) -> Result<(), OrderError> {
        let fields = info.missing_fields();
        if !fields.is_empty() {
            return Err(OrderError::Validation { fields });
        }

        self.customer_info = Some(info);
        Ok(())
    }

    /// Serialize the draft into a submittable payload.
    ///
    /// Pure and deterministic: the submission timestamp is supplied by the
    /// caller and no I/O happens here. Handing the payload to an
    /// order-acceptance endpoint is outside this crate.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::IncompleteDraft`] if no customer info has been
    /// attached.
    pub fn to_submission(&self, submitted_at: DateTime<Utc>) -> Result<OrderPayload, OrderError> {
        let customer_info = self
            .customer_info
            .clone()
            .ok_or(OrderError::IncompleteDraft)?;

        Ok(OrderPayload {
            food_id: self.food_id,
            food_name: self.food_name.clone(),
            unit_price: self.unit_price,
            quantity: self.quantity,
            total_amount: self.total_amount,
            customer_info,
            submitted_at,
        })
    }
}

/// The assembled order, ready for an external acceptance endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderPayload {
    pub food_id: FoodId,
    pub food_name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub unit_price: Decimal,
    pub quantity: u32,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_amount: Decimal,
    pub customer_info: CustomerInfo,
    pub submitted_at: DateTime<Utc>,
}

/// Unit price times quantity, rounded half-up to two decimal places.
fn rounded_total(unit_price: Decimal, quantity: u32) -> Decimal {
    (unit_price * Decimal::from(quantity))
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}
