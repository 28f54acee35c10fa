//! Person repository.

use std::sync::Arc;

use async_trait::async_trait;
use people_core::Person;

use crate::events::SortedSnapshots;
use crate::store::{DataStore, Result};

/// CRUD API used by view models.
///
/// Every call reports failure through its `Result`; nothing is swallowed or
/// retried. Dropping a pending call abandons it without producing an error.
#[async_trait]
pub trait PeopleRepository: Send + Sync {
    /// Live listing sorted by last name.
    fn get_all_sorted(&self) -> SortedSnapshots;

    async fn find_by_id(&self, id: &str) -> Result<Option<Person>>;

    async fn create(&self, person: Person) -> Result<()>;

    async fn update(&self, person: Person) -> Result<()>;

    async fn remove(&self, person: &Person) -> Result<()>;
}

/// Repository delegating to an injected store.
#[derive(Clone)]
pub struct PersonRepository {
    store: Arc<dyn DataStore>,
}

impl PersonRepository {
    pub fn new(store: Arc<dyn DataStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl PeopleRepository for PersonRepository {
    fn get_all_sorted(&self) -> SortedSnapshots {
        self.store.subscribe_sorted()
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Person>> {
        Ok(self.store.find_by_id(id).await)
    }

    async fn create(&self, person: Person) -> Result<()> {
        let id = person.id.clone();
        self.store.insert(person).await.inspect_err(|e| {
            tracing::warn!("create({}) failed: {}", id, e);
        })
    }

    async fn update(&self, person: Person) -> Result<()> {
        let id = person.id.clone();
        self.store.update(person).await.inspect_err(|e| {
            tracing::warn!("update({}) failed: {}", id, e);
        })
    }

    async fn remove(&self, person: &Person) -> Result<()> {
        self.store.delete(person).await.inspect_err(|e| {
            tracing::warn!("remove({}) failed: {}", person.id, e);
        })
    }
}
