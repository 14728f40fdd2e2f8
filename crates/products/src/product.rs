use serde::{Deserialize, Serialize};

use storefront_core::{CrudUsecase, DomainError, DomainResult, RecordId};

/// Usecase handle the HTTP layer is constructed with.
pub type ProductUsecase = dyn CrudUsecase<Input = ProductInput, Entity = Product>;

/// Request payload for creating or replacing a product.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ProductInput {
    pub name: String,
    pub price: f64,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub stock: Option<u32>,
}

impl ProductInput {
    /// Business rules checked by the usecase (not by the handler).
    pub fn validate(&self) -> DomainResult<()> {
        if self.name.trim().is_empty() {
            return Err(DomainError::validation("product name must not be empty"));
        }
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(DomainError::validation(format!(
                "product price must be a non-negative number, got {}",
                self.price
            )));
        }
        Ok(())
    }
}

/// A catalog product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: RecordId,
    pub name: String,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock: Option<u32>,
}

impl Product {
    pub fn from_input(id: RecordId, input: ProductInput) -> Self {
        Self {
            id,
            name: input.name,
            price: input.price,
            description: input.description,
            stock: input.stock,
        }
    }

    /// Replace every client-owned field, keeping the id.
    pub fn apply(&mut self, input: ProductInput) {
        self.name = input.name;
        self.price = input.price;
        self.description = input.description;
        self.stock = input.stock;
    }
}
