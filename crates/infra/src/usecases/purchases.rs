use async_trait::async_trait;
use chrono::Utc;

use storefront_auth::UserAccount;
use storefront_core::{CrudUsecase, DomainError, DomainResult, RecordId};
use storefront_products::Product;
use storefront_purchasing::{Purchase, PurchaseInput};

use crate::store::RecordStore;

/// Purchases reference a product (for its price) and a user, so this service
/// reads those stores as well as its own.
pub struct PurchaseService<S, P, U> {
    purchases: S,
    products: P,
    users: U,
}

impl<S, P, U> PurchaseService<S, P, U>
where
    S: RecordStore<Purchase>,
    P: RecordStore<Product>,
    U: RecordStore<UserAccount>,
{
    pub fn new(purchases: S, products: P, users: U) -> Self {
        Self {
            purchases,
            products,
            users,
        }
    }

    /// Check the references in `input` and return the product's unit price.
    fn resolve(&self, input: &PurchaseInput) -> DomainResult<f64> {
        input.validate()?;
        let product = self
            .products
            .get(input.product_id)?
            .ok_or(DomainError::NotFound)?;
        self.users.get(input.user_id)?.ok_or(DomainError::NotFound)?;
        Ok(product.price)
    }
}

#[async_trait]
impl<S, P, U> CrudUsecase for PurchaseService<S, P, U>
where
    S: RecordStore<Purchase>,
    P: RecordStore<Product>,
    U: RecordStore<UserAccount>,
{
    type Input = PurchaseInput;
    type Entity = Purchase;

    async fn create(&self, input: PurchaseInput) -> DomainResult<Purchase> {
        let unit_price = self.resolve(&input)?;
        let id = self.purchases.next_id()?;
        let purchase = Purchase::new(id, input, unit_price, Utc::now());
        self.purchases.insert(id, purchase.clone())?;
        tracing::debug!(purchase_id = %id, total = purchase.total_price, "purchase recorded");
        Ok(purchase)
    }

    async fn list(&self) -> DomainResult<Vec<Purchase>> {
        Ok(self.purchases.list()?)
    }

    async fn get_by_id(&self, id: RecordId) -> DomainResult<Purchase> {
        self.purchases.get(id)?.ok_or(DomainError::NotFound)
    }

    async fn update(&self, id: RecordId, input: PurchaseInput) -> DomainResult<Purchase> {
        let mut purchase = self.get_by_id(id).await?;
        let unit_price = self.resolve(&input)?;
        purchase.apply(input, unit_price);
        self.purchases
            .replace(id, purchase.clone())?
            .ok_or(DomainError::NotFound)?;
        Ok(purchase)
    }

    async fn delete(&self, id: RecordId) -> DomainResult<()> {
        self.purchases.remove(id)?.ok_or(DomainError::NotFound)?;
        Ok(())
    }
}
