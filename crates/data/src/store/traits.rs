//! Store contract consumed by the repository layer.

use std::path::Path;

use async_trait::async_trait;
use people_core::Person;

use super::Result;
use crate::events::SortedSnapshots;

/// Concurrency-safe store for `Person` records.
///
/// Mutations are serialized; lookups and subscriptions read the latest
/// published snapshot without waiting on writers.
#[async_trait]
pub trait DataStore: Send + Sync {
    /// Location of the backing file.
    fn file_path(&self) -> &Path;

    /// Live stream of snapshots sorted by last name.
    fn subscribe_sorted(&self) -> SortedSnapshots;

    /// Look up one person in the current snapshot.
    async fn find_by_id(&self, id: &str) -> Option<Person>;

    /// Add a person. A person whose id is already present is left untouched
    /// and the call succeeds.
    async fn insert(&self, person: Person) -> Result<()>;

    /// Replace the person sharing `person.id`, keeping its position.
    ///
    /// Fails with `StoreError::NotFound` when no such person exists.
    async fn update(&self, person: Person) -> Result<()>;

    /// Remove the person sharing `person.id`.
    ///
    /// Fails with `StoreError::NotFound` when no such person exists.
    async fn delete(&self, person: &Person) -> Result<()>;

    /// Load the dataset from disk, writing the seed first when the file is
    /// missing or empty. Safe to call more than once.
    async fn initialize(&self) -> Result<()>;
}
