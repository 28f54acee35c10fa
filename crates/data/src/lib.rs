//! Data layer for the people application.
//!
//! This crate owns the file-backed person store and the repository that sits
//! on top of it. Consumers hold an `Arc<dyn DataStore>` (usually a
//! [`FileDataStore`]) and talk to it through [`PersonRepository`], which is
//! what the UI layer depends on.
//!
//! Modules are organized by responsibility:
//! - [`store`] hosts the store contract, the JSON file implementation, and
//!   its error type
//! - [`events`] provides the snapshot channel that feeds sorted listings
//! - [`repository`] exposes the use-case facing CRUD API
//! - [`config`] resolves where the backing file lives
pub mod config;
pub mod events;
pub mod repository;
pub mod store;

pub use config::StoreConfig;
pub use events::{Snapshot, SnapshotChannel, SortedSnapshots};
pub use repository::{PeopleRepository, PersonRepository};
pub use store::{DataStore, FileDataStore, Result, StoreError};
