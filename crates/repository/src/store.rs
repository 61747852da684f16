use std::fmt::Display;
use std::hash::Hash;

use async_trait::async_trait;

use crate::{Result, Version};

/// Trait for values that can be persisted through a [`Repository`].
///
/// A persistable value carries its own identity and the version it was
/// loaded at. The version is maintained by the repository, not by domain
/// code: `save` compares it against the persisted version and stamps the
/// next one on success.
pub trait Persistable: Clone + Send + Sync {
    /// The identifier type for this value.
    type Id: Clone + Eq + Hash + Display + Send + Sync;

    /// Returns the value's unique identifier.
    fn id(&self) -> Self::Id;

    /// Returns the version this value was loaded at
    /// (`Version::initial()` for a never-persisted value).
    fn version(&self) -> Version;

    /// Stamps a new version onto the value. Called by the repository.
    fn set_version(&mut self, version: Version);
}

/// Load/save contract for aggregates, with optimistic concurrency control.
///
/// `save` must reject a write when the persisted version differs from the
/// version the caller loaded, surfacing [`StoreError::ConcurrencyConflict`]
/// — the baseline safety net against out-of-order or duplicate command
/// delivery, regardless of any serialization the transport may provide.
///
/// [`StoreError::ConcurrencyConflict`]: crate::StoreError::ConcurrencyConflict
#[async_trait]
pub trait Repository<T: Persistable>: Send + Sync {
    /// Loads an aggregate by id.
    ///
    /// Fails with [`StoreError::NotFound`] if the aggregate does not exist.
    ///
    /// [`StoreError::NotFound`]: crate::StoreError::NotFound
    async fn load(&self, id: &T::Id) -> Result<T>;

    /// Persists the aggregate, returning the new version.
    ///
    /// A value at `Version::initial()` is treated as an insert and fails
    /// with a conflict if the id already exists.
    async fn save(&self, value: &T) -> Result<Version>;
}
