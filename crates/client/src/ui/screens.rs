//! Headless screens rendering view model state to the log.

use std::sync::Arc;

use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;

use super::error::{ErrorEvent, show_snackbar};
use super::state::{PeopleUiState, PersonUiState};
use super::view_model::PersonViewModel;

/// List screen observing [`PeopleUiState`].
pub struct PeopleScreen {
    view_model: Arc<PersonViewModel>,
    observers: Vec<JoinHandle<()>>,
}

impl PeopleScreen {
    pub fn new(view_model: Arc<PersonViewModel>) -> Self {
        Self {
            view_model,
            observers: Vec::new(),
        }
    }

    /// Render every state change and show error events until stopped.
    pub fn start_observer(&mut self) {
        self.stop_observer();
        self.observers = vec![
            observe_state(self.view_model.people_state(), render_people),
            observe_errors(self.view_model.error_events()),
        ];
    }

    pub fn stop_observer(&mut self) {
        stop_all(&mut self.observers);
    }

    pub fn is_observing(&self) -> bool {
        self.observers.iter().any(|handle| !handle.is_finished())
    }
}

impl Drop for PeopleScreen {
    fn drop(&mut self) {
        self.stop_observer();
    }
}

/// Detail screen observing [`PersonUiState`].
pub struct PersonScreen {
    view_model: Arc<PersonViewModel>,
    observers: Vec<JoinHandle<()>>,
}

impl PersonScreen {
    pub fn new(view_model: Arc<PersonViewModel>) -> Self {
        Self {
            view_model,
            observers: Vec::new(),
        }
    }

    pub fn start_observer(&mut self) {
        self.stop_observer();
        self.observers = vec![
            observe_state(self.view_model.person_state(), render_person),
            observe_errors(self.view_model.error_events()),
        ];
    }

    pub fn stop_observer(&mut self) {
        stop_all(&mut self.observers);
    }

    pub fn is_observing(&self) -> bool {
        self.observers.iter().any(|handle| !handle.is_finished())
    }
}

impl Drop for PersonScreen {
    fn drop(&mut self) {
        self.stop_observer();
    }
}

fn render_people(state: &PeopleUiState) {
    tracing::info!(
        "PeopleScreen: loading={} people={}",
        state.is_loading,
        state.people.len()
    );
    for person in &state.people {
        tracing::info!("  {} <{}>", person, person.id);
    }
}

fn render_person(state: &PersonUiState) {
    let person = &state.person;
    tracing::info!(
        "PersonScreen: {} email={} phone={}",
        person,
        person.email.as_deref().unwrap_or_default(),
        person.phone.as_deref().unwrap_or_default()
    );
}

/// Render the current value, then every change, until the sender is gone.
fn observe_state<T>(mut rx: watch::Receiver<T>, render: fn(&T)) -> JoinHandle<()>
where
    T: Send + Sync + 'static,
{
    tokio::spawn(async move {
        loop {
            render(&rx.borrow_and_update());
            if rx.changed().await.is_err() {
                break;
            }
        }
    })
}

fn observe_errors(mut rx: broadcast::Receiver<ErrorEvent>) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            match rx.recv().await {
                Ok(event) => show_snackbar(&event),
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::warn!("Skipped {} error events", skipped);
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    })
}

fn stop_all(observers: &mut Vec<JoinHandle<()>>) {
    for handle in observers.drain(..) {
        handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use people_data::{DataStore, FileDataStore, PersonRepository};
    use tempfile::TempDir;

    use super::*;

    async fn view_model(temp_dir: &TempDir) -> Arc<PersonViewModel> {
        let store = Arc::new(FileDataStore::new(temp_dir.path().join("people.json"), None));
        store.initialize().await.unwrap();
        Arc::new(PersonViewModel::new(Arc::new(PersonRepository::new(store))))
    }

    #[tokio::test]
    async fn test_observers_start_and_stop() {
        let temp_dir = TempDir::new().unwrap();
        let vm = view_model(&temp_dir).await;
        let mut people = PeopleScreen::new(Arc::clone(&vm));
        let mut person = PersonScreen::new(Arc::clone(&vm));

        people.start_observer();
        person.start_observer();
        assert!(people.is_observing());
        assert!(person.is_observing());

        people.stop_observer();
        person.stop_observer();
        assert!(!people.is_observing());
        assert!(!person.is_observing());
    }

    #[tokio::test]
    async fn test_restart_replaces_previous_observers() {
        let temp_dir = TempDir::new().unwrap();
        let vm = view_model(&temp_dir).await;
        let mut screen = PeopleScreen::new(vm);

        screen.start_observer();
        screen.start_observer();

        assert_eq!(screen.observers.len(), 2);
    }
}
