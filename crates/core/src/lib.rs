//! Domain types shared by the data layer and the client.
//!
//! `people-core` defines the canonical [`Person`] record, the identity helpers
//! used to mint record ids, and the fixed [`Seed`] dataset a fresh store is
//! bootstrapped from. Nothing here performs I/O.
pub mod id;
pub mod person;
pub mod seed;

pub use id::{create_uuid, empty_uuid, new_uuid};
pub use person::Person;
pub use seed::Seed;
