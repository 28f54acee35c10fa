//! JSON file backed `DataStore` implementation.

use std::collections::HashSet;
use std::fs;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use people_core::{Person, Seed};
use tokio::sync::Mutex;

use super::persist;
use super::{DataStore, Result, StoreError};
use crate::config::StoreConfig;
use crate::events::{Snapshot, SnapshotChannel, SortedSnapshots};

/// Store keeping the whole dataset in memory and mirroring it to one JSON file.
///
/// # Write path
///
/// Every mutation runs under a single FIFO lock:
/// 1. Compute the new snapshot from the current one (copy-on-write)
/// 2. Encode it on the worker pool
/// 3. Write `<file>.tmp` and rename it over the file on the blocking pool
/// 4. Publish the snapshot to subscribers
///
/// A failure in steps 2-3 leaves the published snapshot untouched.
///
/// Mutations fail with [`StoreError::NotInitialized`] until
/// [`initialize`](DataStore::initialize) has succeeded once, so an empty
/// in-memory snapshot can never overwrite a persisted dataset.
///
/// Once the lock is acquired the critical section runs on its own task, so a
/// caller that is dropped mid-write cannot leave the file and the in-memory
/// snapshot out of step.
#[derive(Clone)]
pub struct FileDataStore {
    inner: Arc<Inner>,
}

struct Inner {
    file_path: PathBuf,
    seed: Option<Seed>,
    write_lock: Arc<Mutex<()>>,
    snapshots: SnapshotChannel,
    /// Set under the write lock once the file has been loaded.
    initialized: AtomicBool,
}

impl FileDataStore {
    /// Create a store for `file_path`. No I/O happens until
    /// [`initialize`](DataStore::initialize).
    pub fn new(file_path: impl Into<PathBuf>, seed: Option<Seed>) -> Self {
        Self {
            inner: Arc::new(Inner {
                file_path: file_path.into(),
                seed,
                write_lock: Arc::new(Mutex::new(())),
                snapshots: SnapshotChannel::new(),
                initialized: AtomicBool::new(false),
            }),
        }
    }

    pub fn from_config(config: &StoreConfig, seed: Option<Seed>) -> Self {
        Self::new(config.file_path(), seed)
    }

    /// Latest published snapshot, in storage order.
    pub fn current(&self) -> Snapshot {
        self.inner.snapshots.current()
    }

    /// Run `op` while holding the write lock.
    ///
    /// Waiting for the lock is cancellable; the critical section is not.
    async fn exclusive<F, Fut, T>(&self, op: F) -> Result<T>
    where
        F: FnOnce(Arc<Inner>) -> Fut + Send + 'static,
        Fut: Future<Output = Result<T>> + Send + 'static,
        T: Send + 'static,
    {
        let guard = Arc::clone(&self.inner.write_lock).lock_owned().await;
        let inner = Arc::clone(&self.inner);

        let task = tokio::spawn(async move {
            let _guard = guard;
            op(inner).await
        });

        match task.await {
            Ok(result) => result,
            Err(err) if err.is_panic() => std::panic::resume_unwind(err.into_panic()),
            Err(err) => Err(StoreError::Worker(err)),
        }
    }

    /// Apply `change` to the current snapshot and persist the result.
    ///
    /// `change` returns `None` when there is nothing to write.
    async fn mutate<F>(&self, change: F) -> Result<()>
    where
        F: FnOnce(&[Person]) -> Result<Option<Vec<Person>>> + Send + 'static,
    {
        self.exclusive(move |inner| async move {
            if !inner.initialized.load(Ordering::Acquire) {
                return Err(StoreError::NotInitialized {
                    path: inner.file_path.clone(),
                });
            }

            let current = inner.snapshots.current();
            let Some(updated) = change(&current)? else {
                return Ok(());
            };

            inner.write(&updated).await?;
            inner.snapshots.publish(updated);
            Ok(())
        })
        .await
    }
}

impl Inner {
    async fn write(&self, people: &[Person]) -> Result<()> {
        let json = persist::encode(people)?;
        tracing::debug!("write(): encode JSON {} people", people.len());

        let path = self.file_path.clone();
        let json = run_blocking(move || {
            persist::write_atomic(&path, &json)?;
            Ok(json)
        })
        .await?;

        tracing::trace!("{}", json);
        Ok(())
    }

    async fn read(&self) -> Result<Vec<Person>> {
        let path = self.file_path.clone();
        let text = run_blocking(move || Ok(persist::read_text(&path)?)).await?;

        let people = dedup_by_id(persist::decode(&self.file_path, &text)?);
        tracing::debug!("read(): decode JSON {} people", people.len());
        Ok(people)
    }
}

#[async_trait]
impl DataStore for FileDataStore {
    fn file_path(&self) -> &Path {
        &self.inner.file_path
    }

    fn subscribe_sorted(&self) -> SortedSnapshots {
        self.inner.snapshots.subscribe_sorted()
    }

    async fn find_by_id(&self, id: &str) -> Option<Person> {
        self.inner
            .snapshots
            .current()
            .iter()
            .find(|person| person.id == id)
            .cloned()
    }

    async fn insert(&self, person: Person) -> Result<()> {
        self.mutate(move |current| {
            if current.iter().any(|existing| existing.id == person.id) {
                tracing::debug!("insert(): {} already present, skipping", person.id);
                return Ok(None);
            }
            tracing::trace!("insert(): {:?}", person);

            let mut updated = current.to_vec();
            updated.push(person);
            Ok(Some(updated))
        })
        .await
    }

    async fn update(&self, person: Person) -> Result<()> {
        self.mutate(move |current| {
            let index = position_of(current, &person.id)?;
            tracing::trace!("update(): {:?}", person);

            let mut updated = current.to_vec();
            updated[index] = person;
            Ok(Some(updated))
        })
        .await
    }

    async fn delete(&self, person: &Person) -> Result<()> {
        let id = person.id.clone();
        self.mutate(move |current| {
            let index = position_of(current, &id)?;
            tracing::trace!("delete(): {}", id);

            let mut updated = current.to_vec();
            updated.remove(index);
            Ok(Some(updated))
        })
        .await
    }

    async fn initialize(&self) -> Result<()> {
        tracing::debug!("initialize(): {}", self.inner.file_path.display());

        self.exclusive(|inner| async move {
            let file_path = inner.file_path.clone();
            let len = run_blocking(move || {
                let dir = file_path.parent().unwrap_or(Path::new("")).to_path_buf();
                fs::create_dir_all(&dir).map_err(|source| StoreError::Initialization {
                    path: dir,
                    source,
                })?;
                persist::file_len(&file_path).map_err(|source| StoreError::Initialization {
                    path: file_path.clone(),
                    source,
                })
            })
            .await?;

            if len.unwrap_or(0) == 0 {
                let seed = inner.seed.as_ref().map(Seed::people).unwrap_or_default();
                tracing::debug!("initialize(): seeding {} people", seed.len());
                inner.write(seed).await?;
            }

            let people = inner.read().await?;
            tracing::info!(
                "Loaded {} people from {}",
                people.len(),
                inner.file_path.display()
            );
            inner.snapshots.publish(people);
            inner.initialized.store(true, Ordering::Release);
            Ok(())
        })
        .await
    }
}

/// Run blocking file work off the async worker threads.
async fn run_blocking<T, F>(work: F) -> Result<T>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    match tokio::task::spawn_blocking(work).await {
        Ok(result) => result,
        Err(err) if err.is_panic() => std::panic::resume_unwind(err.into_panic()),
        Err(err) => Err(StoreError::Worker(err)),
    }
}

fn position_of(people: &[Person], id: &str) -> Result<usize> {
    people
        .iter()
        .position(|person| person.id == id)
        .ok_or_else(|| StoreError::NotFound { id: id.to_string() })
}

/// Keep the first record for every id.
fn dedup_by_id(people: Vec<Person>) -> Vec<Person> {
    let total = people.len();
    let mut seen = HashSet::with_capacity(total);
    let unique: Vec<Person> = people
        .into_iter()
        .filter(|person| seen.insert(person.id.clone()))
        .collect();

    if unique.len() != total {
        tracing::warn!(
            "Dropped {} people with duplicate ids while loading",
            total - unique.len()
        );
    }
    unique
}
