//! Person store: contract, JSON file implementation, and errors.
//!
//! The store is the single owner of the dataset. Writers are serialized
//! through one lock per store; readers only ever see whole snapshots.

mod error;
mod file;
mod persist;
mod traits;

pub use error::{Result, StoreError};
pub use file::FileDataStore;
pub use traits::DataStore;
