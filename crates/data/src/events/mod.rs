//! Reactive snapshot channel for store consumers.
//!
//! The store publishes every new dataset here; listing consumers subscribe and
//! receive the latest snapshot followed by each subsequent change.

mod snapshot;

pub use snapshot::{Snapshot, SnapshotChannel, SortedSnapshots};
