//! Store and product lookups.
//!
//! Raw order items carry only store/product identifiers; the display names
//! and locations that end up in stops come from these read-only lookups.
//! In production they front the stores module; the in-memory implementations
//! serve tests and demo wiring.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::error::DepotError;
use crate::shopping_list::{Product, ProductId, Store, StoreId};

/// Read-only directory of stores.
#[async_trait]
pub trait StoreDirectory: Send + Sync {
    /// Finds a store by id. Unknown stores are a permanent error.
    async fn find(&self, id: &StoreId) -> Result<Store, DepotError>;
}

/// Read-only catalog of products.
#[async_trait]
pub trait ProductCatalog: Send + Sync {
    /// Finds a product by id. Unknown products are a permanent error.
    async fn find(&self, id: &ProductId) -> Result<Product, DepotError>;
}

/// In-memory store directory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStoreDirectory {
    stores: HashMap<StoreId, Store>,
}

impl InMemoryStoreDirectory {
    /// Creates an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a store, builder style.
    pub fn with_store(mut self, store: Store) -> Self {
        self.stores.insert(store.id.clone(), store);
        self
    }
}

#[async_trait]
impl StoreDirectory for InMemoryStoreDirectory {
    async fn find(&self, id: &StoreId) -> Result<Store, DepotError> {
        self.stores
            .get(id)
            .cloned()
            .ok_or_else(|| DepotError::StoreNotFound(id.clone()))
    }
}

/// In-memory product catalog.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProductCatalog {
    products: HashMap<ProductId, Product>,
}

impl InMemoryProductCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a product, builder style.
    pub fn with_product(mut self, product: Product) -> Self {
        self.products.insert(product.id.clone(), product);
        self
    }
}

#[async_trait]
impl ProductCatalog for InMemoryProductCatalog {
    async fn find(&self, id: &ProductId) -> Result<Product, DepotError> {
        self.products
            .get(id)
            .cloned()
            .ok_or_else(|| DepotError::ProductNotFound(id.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn directory_finds_known_store() {
        let directory =
            InMemoryStoreDirectory::new().with_store(Store::new("S1", "Grocer", "Main St"));

        let store = directory.find(&StoreId::new("S1")).await.unwrap();
        assert_eq!(store.name, "Grocer");
    }

    #[tokio::test]
    async fn directory_rejects_unknown_store() {
        let directory = InMemoryStoreDirectory::new();
        let result = directory.find(&StoreId::new("S9")).await;
        assert!(matches!(result, Err(DepotError::StoreNotFound(_))));
    }

    #[tokio::test]
    async fn catalog_finds_known_product() {
        let catalog = InMemoryProductCatalog::new().with_product(Product::new("P1", "Milk"));
        let product = catalog.find(&ProductId::new("P1")).await.unwrap();
        assert_eq!(product.name, "Milk");
    }

    #[tokio::test]
    async fn catalog_rejects_unknown_product() {
        let catalog = InMemoryProductCatalog::new();
        let result = catalog.find(&ProductId::new("P9")).await;
        assert!(matches!(result, Err(DepotError::ProductNotFound(_))));
    }
}
