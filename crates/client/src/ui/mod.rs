//! Presentation layer: view model, UI state, and headless screens.
mod error;
mod screens;
mod state;
mod view_model;

pub use error::{ErrorEvent, show_snackbar};
pub use screens::{PeopleScreen, PersonScreen};
pub use state::{PeopleUiState, PersonUiState};
pub use view_model::PersonViewModel;
