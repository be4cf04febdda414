//! Owner-scoped product catalog.

use chrono::{DateTime, Utc};

use winnerlens_core::{ProductId, UserId};
use winnerlens_products::{
    aggregate_by_category, CategoryStats, CreateProduct, Product, SubScores, UpdateProduct,
};

use crate::error::{ServiceError, ServiceResult};
use crate::query::{Page, ProductQuery};
use crate::store::OwnerStore;

/// Product use-cases for one seller at a time.
///
/// Every operation is scoped to `owner`; another seller's products are
/// reported as not found.
pub struct ProductCatalog<S> {
    store: S,
}

impl<S> ProductCatalog<S>
where
    S: OwnerStore<ProductId, Product>,
{
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn create(&self, owner: UserId, cmd: CreateProduct, now: DateTime<Utc>) -> ServiceResult<Product> {
        let product = Product::create(ProductId::new(), owner, cmd, now)?;
        self.store.upsert(owner, product.id(), product.clone())?;

        tracing::info!(owner = %owner, product_id = %product.id(), "product created");
        Ok(product)
    }

    pub fn list(&self, owner: UserId, query: &ProductQuery) -> ServiceResult<Page<Product>> {
        Ok(query.apply(self.store.list(owner)?))
    }

    pub fn get(&self, owner: UserId, id: ProductId) -> ServiceResult<Product> {
        self.store.get(owner, &id)?.ok_or(ServiceError::ProductNotFound)
    }

    pub fn update(
        &self,
        owner: UserId,
        id: ProductId,
        cmd: UpdateProduct,
        now: DateTime<Utc>,
    ) -> ServiceResult<Product> {
        let updated = self
            .store
            .try_modify(owner, &id, |product| {
                product.apply_update(cmd, now)?;
                Ok::<_, ServiceError>(product.clone())
            })?
            .ok_or(ServiceError::ProductNotFound)??;

        tracing::info!(owner = %owner, product_id = %id, "product updated");
        Ok(updated)
    }

    pub fn delete(&self, owner: UserId, id: ProductId) -> ServiceResult<()> {
        self.store
            .remove(owner, &id)?
            .ok_or(ServiceError::ProductNotFound)?;

        tracing::info!(owner = %owner, product_id = %id, "product deleted");
        Ok(())
    }

    pub fn update_scores(
        &self,
        owner: UserId,
        id: ProductId,
        scores: SubScores,
        now: DateTime<Utc>,
    ) -> ServiceResult<Product> {
        let updated = self
            .store
            .try_modify(owner, &id, |product| {
                product.apply_scores(scores, now);
                Ok::<_, ServiceError>(product.clone())
            })?
            .ok_or(ServiceError::ProductNotFound)??;

        tracing::info!(
            owner = %owner,
            product_id = %id,
            total_score = ?updated.total_score(),
            "product scores updated"
        );
        Ok(updated)
    }

    /// Per-category counts and average score, categories in order of first creation.
    pub fn category_stats(&self, owner: UserId) -> ServiceResult<Vec<CategoryStats>> {
        let mut products = self.store.list(owner)?;
        products.sort_by(|a, b| {
            a.created_at()
                .cmp(&b.created_at())
                .then_with(|| a.id().cmp(&b.id()))
        });
        Ok(aggregate_by_category(&products))
    }
}
