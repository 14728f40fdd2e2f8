use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use storefront_core::{CrudUsecase, DomainError, DomainResult, RecordId};

pub type PurchaseUsecase = dyn CrudUsecase<Input = PurchaseInput, Entity = Purchase>;

/// Request payload for recording or amending a purchase.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PurchaseInput {
    pub user_id: RecordId,
    pub product_id: RecordId,
    pub quantity: u32,
}

impl PurchaseInput {
    pub fn validate(&self) -> DomainResult<()> {
        if self.quantity == 0 {
            return Err(DomainError::validation("purchase quantity must be at least 1"));
        }
        Ok(())
    }
}

/// A recorded purchase. `total_price` is fixed at the time it is recorded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Purchase {
    pub id: RecordId,
    pub user_id: RecordId,
    pub product_id: RecordId,
    pub quantity: u32,
    pub total_price: f64,
    pub purchased_at: DateTime<Utc>,
}

impl Purchase {
    pub fn new(id: RecordId, input: PurchaseInput, unit_price: f64, purchased_at: DateTime<Utc>) -> Self {
        Self {
            id,
            user_id: input.user_id,
            product_id: input.product_id,
            quantity: input.quantity,
            total_price: total_price(unit_price, input.quantity),
            purchased_at,
        }
    }

    /// Re-point the purchase and re-price it; the original timestamp stays.
    pub fn apply(&mut self, input: PurchaseInput, unit_price: f64) {
        self.user_id = input.user_id;
        self.product_id = input.product_id;
        self.quantity = input.quantity;
        self.total_price = total_price(unit_price, input.quantity);
    }
}

fn total_price(unit_price: f64, quantity: u32) -> f64 {
    unit_price * f64::from(quantity)
}
