use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::{Persistable, Repository, Result, StoreError, Version};

/// In-memory repository implementation.
///
/// Stores a clone of each aggregate keyed by id, guarded by a single
/// read-write lock. The version check and the write happen under the same
/// write lock, so concurrent savers observe proper conflict semantics.
pub struct InMemoryRepository<T: Persistable> {
    items: Arc<RwLock<HashMap<T::Id, T>>>,
}

impl<T: Persistable> InMemoryRepository<T> {
    /// Creates a new empty in-memory repository.
    pub fn new() -> Self {
        Self {
            items: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Returns the number of stored aggregates.
    pub async fn count(&self) -> usize {
        self.items.read().await.len()
    }

    /// Removes all stored aggregates.
    pub async fn clear(&self) {
        self.items.write().await.clear();
    }
}

impl<T: Persistable> Default for InMemoryRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Persistable> Clone for InMemoryRepository<T> {
    fn clone(&self) -> Self {
        Self {
            items: self.items.clone(),
        }
    }
}

#[async_trait]
impl<T: Persistable + 'static> Repository<T> for InMemoryRepository<T> {
    async fn load(&self, id: &T::Id) -> Result<T> {
        let items = self.items.read().await;
        items
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    async fn save(&self, value: &T) -> Result<Version> {
        let mut items = self.items.write().await;

        let current = items
            .get(&value.id())
            .map(|stored| stored.version())
            .unwrap_or_else(Version::initial);

        if current != value.version() {
            return Err(StoreError::ConcurrencyConflict {
                id: value.id().to_string(),
                expected: value.version(),
                actual: current,
            });
        }

        let new_version = current.next();
        let mut stored = value.clone();
        stored.set_version(new_version);
        items.insert(stored.id(), stored);

        Ok(new_version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Counter {
        id: String,
        value: i32,
        version: Version,
    }

    impl Counter {
        fn new(id: &str) -> Self {
            Self {
                id: id.to_string(),
                value: 0,
                version: Version::initial(),
            }
        }
    }

    impl Persistable for Counter {
        type Id = String;

        fn id(&self) -> String {
            self.id.clone()
        }

        fn version(&self) -> Version {
            self.version
        }

        fn set_version(&mut self, version: Version) {
            self.version = version;
        }
    }

    #[tokio::test]
    async fn save_then_load_roundtrip() {
        let repo = InMemoryRepository::new();
        let counter = Counter::new("c1");

        let version = repo.save(&counter).await.unwrap();
        assert_eq!(version, Version::new(1));

        let loaded = repo.load(&"c1".to_string()).await.unwrap();
        assert_eq!(loaded.value, 0);
        assert_eq!(loaded.version, Version::new(1));
    }

    #[tokio::test]
    async fn load_missing_returns_not_found() {
        let repo: InMemoryRepository<Counter> = InMemoryRepository::new();
        let result = repo.load(&"nope".to_string()).await;
        assert!(matches!(result, Err(StoreError::NotFound(_))));
    }

    #[tokio::test]
    async fn save_new_with_existing_id_conflicts() {
        let repo = InMemoryRepository::new();
        repo.save(&Counter::new("c1")).await.unwrap();

        // A second never-persisted value with the same id is a conflict.
        let result = repo.save(&Counter::new("c1")).await;
        assert!(matches!(
            result,
            Err(StoreError::ConcurrencyConflict { .. })
        ));
    }

    #[tokio::test]
    async fn save_with_stale_version_conflicts() {
        let repo = InMemoryRepository::new();
        let counter = Counter::new("c1");
        repo.save(&counter).await.unwrap();

        let mut first = repo.load(&"c1".to_string()).await.unwrap();
        let mut second = first.clone();

        first.value = 1;
        repo.save(&first).await.unwrap();

        // Still at the old version.
        second.value = 2;
        let result = repo.save(&second).await;
        assert!(matches!(
            result,
            Err(StoreError::ConcurrencyConflict { expected, actual, .. })
                if expected == Version::new(1) && actual == Version::new(2)
        ));

        // The first write won.
        let stored = repo.load(&"c1".to_string()).await.unwrap();
        assert_eq!(stored.value, 1);
    }

    #[tokio::test]
    async fn save_advances_version_each_time() {
        let repo = InMemoryRepository::new();
        let mut counter = Counter::new("c1");

        for expected in 1..=3 {
            let version = repo.save(&counter).await.unwrap();
            assert_eq!(version.as_i64(), expected);
            counter = repo.load(&"c1".to_string()).await.unwrap();
        }
    }

    #[tokio::test]
    async fn clone_shares_storage() {
        let repo = InMemoryRepository::new();
        let other = repo.clone();

        repo.save(&Counter::new("c1")).await.unwrap();
        assert_eq!(other.count().await, 1);
    }
}
