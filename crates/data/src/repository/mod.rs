//! Use-case facing repository over a `DataStore`.
//!
//! The UI layer depends on [`PeopleRepository`] only and never sees the
//! store directly.

mod person;

pub use person::{PeopleRepository, PersonRepository};
