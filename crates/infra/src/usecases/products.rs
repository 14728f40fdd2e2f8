use async_trait::async_trait;

use storefront_core::{CrudUsecase, DomainError, DomainResult, RecordId};
use storefront_products::{Product, ProductInput};

use crate::store::RecordStore;

pub struct ProductService<S> {
    store: S,
}

impl<S> ProductService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }
}

#[async_trait]
impl<S> CrudUsecase for ProductService<S>
where
    S: RecordStore<Product>,
{
    type Input = ProductInput;
    type Entity = Product;

    async fn create(&self, input: ProductInput) -> DomainResult<Product> {
        input.validate()?;
        let id = self.store.next_id()?;
        let product = Product::from_input(id, input);
        self.store.insert(id, product.clone())?;
        tracing::debug!(product_id = %id, "product created");
        Ok(product)
    }

    async fn list(&self) -> DomainResult<Vec<Product>> {
        Ok(self.store.list()?)
    }

    async fn get_by_id(&self, id: RecordId) -> DomainResult<Product> {
        self.store.get(id)?.ok_or(DomainError::NotFound)
    }

    async fn update(&self, id: RecordId, input: ProductInput) -> DomainResult<Product> {
        input.validate()?;
        let mut product = self.get_by_id(id).await?;
        product.apply(input);
        self.store
            .replace(id, product.clone())?
            .ok_or(DomainError::NotFound)?;
        Ok(product)
    }

    async fn delete(&self, id: RecordId) -> DomainResult<()> {
        self.store.remove(id)?.ok_or(DomainError::NotFound)?;
        tracing::debug!(product_id = %id, "product deleted");
        Ok(())
    }
}
