//! View model shared by the people and person screens.

use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};

use people_core::Person;
use people_data::PeopleRepository;
use tokio::sync::{broadcast, watch};
use tokio::task::JoinSet;

use super::error::ErrorEvent;
use super::state::{PeopleUiState, PersonUiState};

const ERROR_EVENT_CAPACITY: usize = 16;

/// Holds screen state and launches repository work on background tasks.
///
/// State is exposed as `watch` channels, so a screen that starts observing
/// late still sees the latest value. Errors are one-off `broadcast` events:
/// an error raised while no screen observes is lost.
///
/// Every task spawned here is cancelled by [`on_cleared`](Self::on_cleared)
/// or when the view model is dropped.
pub struct PersonViewModel {
    shared: Arc<Shared>,
    tasks: Mutex<JoinSet<()>>,
}

struct Shared {
    repository: Arc<dyn PeopleRepository>,
    people_state: watch::Sender<PeopleUiState>,
    person_state: watch::Sender<PersonUiState>,
    errors: broadcast::Sender<ErrorEvent>,
}

impl PersonViewModel {
    /// Create the view model and start observing the sorted listing.
    ///
    /// # Panics
    ///
    /// Panics when called outside a Tokio runtime.
    pub fn new(repository: Arc<dyn PeopleRepository>) -> Self {
        let (people_state, _) = watch::channel(PeopleUiState::default());
        let (person_state, _) = watch::channel(PersonUiState::default());
        let (errors, _) = broadcast::channel(ERROR_EVENT_CAPACITY);

        let view_model = Self {
            shared: Arc::new(Shared {
                repository,
                people_state,
                person_state,
                errors,
            }),
            tasks: Mutex::new(JoinSet::new()),
        };
        view_model.fetch_sorted();
        view_model
    }

    pub fn people_state(&self) -> watch::Receiver<PeopleUiState> {
        self.shared.people_state.subscribe()
    }

    pub fn person_state(&self) -> watch::Receiver<PersonUiState> {
        self.shared.person_state.subscribe()
    }

    pub fn error_events(&self) -> broadcast::Receiver<ErrorEvent> {
        self.shared.errors.subscribe()
    }

    /// Replace the person being edited without touching the store.
    pub fn change(&self, person: Person) {
        self.shared
            .person_state
            .send_modify(|state| state.person = person);
    }

    /// Mirror the sorted listing into the people state until cleared.
    pub fn fetch_sorted(&self) {
        let shared = Arc::clone(&self.shared);
        self.launch(async move {
            shared.people_state.send_modify(|state| state.is_loading = true);

            let mut listing = shared.repository.get_all_sorted();
            while let Some(people) = listing.recv().await {
                tracing::debug!("fetch_sorted(): {} people", people.len());
                shared.people_state.send_modify(|state| {
                    state.is_loading = false;
                    state.people = people.to_vec();
                });
            }
        });
    }

    /// Load one person into the person state. An unknown id leaves the
    /// state unchanged.
    pub fn fetch_by_id(&self, id: impl Into<String>) {
        let id = id.into();
        let shared = Arc::clone(&self.shared);
        self.launch(async move {
            match shared.repository.find_by_id(&id).await {
                Ok(Some(person)) => {
                    shared
                        .person_state
                        .send_modify(|state| state.person = person);
                }
                Ok(None) => tracing::debug!("fetch_by_id(): {} not found", id),
                Err(err) => shared.handle_error(&err),
            }
        });
    }

    /// Store the current person as a new record.
    pub fn insert(&self) {
        let shared = Arc::clone(&self.shared);
        let person = self.current_person();
        self.launch(async move {
            if let Err(err) = shared.repository.create(person).await {
                shared.handle_error(&err);
            }
        });
    }

    /// Overwrite the stored record with the current person.
    pub fn update(&self) {
        let shared = Arc::clone(&self.shared);
        let person = self.current_person();
        self.launch(async move {
            if let Err(err) = shared.repository.update(person).await {
                shared.handle_error(&err);
            }
        });
    }

    /// Delete the current person from the store.
    pub fn remove(&self) {
        let shared = Arc::clone(&self.shared);
        let person = self.current_person();
        self.launch(async move {
            if let Err(err) = shared.repository.remove(&person).await {
                shared.handle_error(&err);
            }
        });
    }

    /// Cancel all work launched by this view model.
    pub fn on_cleared(&self) {
        let mut tasks = self.tasks.lock().unwrap_or_else(PoisonError::into_inner);
        tracing::debug!("on_cleared(): cancelling {} tasks", tasks.len());
        tasks.abort_all();
    }

    fn current_person(&self) -> Person {
        self.shared.person_state.borrow().person.clone()
    }

    fn launch<F>(&self, work: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let mut tasks = self.tasks.lock().unwrap_or_else(PoisonError::into_inner);
        // Reap finished tasks so the set only tracks live work.
        while tasks.try_join_next().is_some() {}
        tasks.spawn(work);
    }
}

impl Shared {
    fn handle_error(&self, err: &(dyn std::error::Error + 'static)) {
        tracing::error!("{}", err);
        // No receiver means no screen is observing; the event is dropped.
        let _ = self.errors.send(ErrorEvent::from_error(err));
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use people_core::Seed;
    use people_data::{DataStore, FileDataStore, PersonRepository};
    use tempfile::TempDir;
    use tokio::time::timeout;

    use super::*;

    const ARNE: &str = "01000000-0000-0000-0000-000000000000";
    const WAIT: Duration = Duration::from_secs(2);

    async fn view_model(temp_dir: &TempDir) -> (PersonViewModel, Arc<FileDataStore>) {
        let store = Arc::new(FileDataStore::new(
            temp_dir.path().join("people.json"),
            Some(Seed::new()),
        ));
        store.initialize().await.unwrap();
        let repository = Arc::new(PersonRepository::new(store.clone()));
        (PersonViewModel::new(repository), store)
    }

    #[tokio::test]
    async fn test_people_state_follows_sorted_listing() {
        let temp_dir = TempDir::new().unwrap();
        let (vm, _store) = view_model(&temp_dir).await;
        let mut people = vm.people_state();

        timeout(WAIT, people.wait_for(|s| !s.is_loading && s.people.len() == Seed::new().len()))
            .await
            .unwrap()
            .unwrap();

        let state = people.borrow().clone();
        let keys: Vec<String> = state.people.iter().map(Person::sort_key).collect();
        let mut sorted = keys.clone();
        sorted.sort();
        assert_eq!(keys, sorted);
    }

    #[tokio::test]
    async fn test_fetch_by_id_loads_person() {
        let temp_dir = TempDir::new().unwrap();
        let (vm, _store) = view_model(&temp_dir).await;
        let mut person = vm.person_state();

        vm.fetch_by_id(ARNE);

        timeout(WAIT, person.wait_for(|s| s.person.id == ARNE))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(person.borrow().person.first_name, "Arne");
    }

    #[tokio::test]
    async fn test_insert_of_changed_person_reaches_listing() {
        let temp_dir = TempDir::new().unwrap();
        let (vm, store) = view_model(&temp_dir).await;
        let mut people = vm.people_state();
        let grace = Person::new("Grace", "Hopper");

        vm.change(grace.clone());
        assert_eq!(vm.person_state().borrow().person, grace);
        vm.insert();

        timeout(WAIT, people.wait_for(|s| s.people.contains(&grace)))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(store.find_by_id(&grace.id).await, Some(grace));
    }

    #[tokio::test]
    async fn test_update_of_unknown_person_emits_error_event() {
        let temp_dir = TempDir::new().unwrap();
        let (vm, _store) = view_model(&temp_dir).await;
        let mut errors = vm.error_events();

        vm.change(Person::with_id("missing", "No", "Body"));
        vm.update();

        let event = timeout(WAIT, errors.recv()).await.unwrap().unwrap();
        assert_eq!(event.message, "person with id missing does not exist");
    }

    #[tokio::test]
    async fn test_remove_deletes_current_person() {
        let temp_dir = TempDir::new().unwrap();
        let (vm, store) = view_model(&temp_dir).await;
        let mut person = vm.person_state();
        let mut people = vm.people_state();

        vm.fetch_by_id(ARNE);
        timeout(WAIT, person.wait_for(|s| s.person.id == ARNE))
            .await
            .unwrap()
            .unwrap();
        vm.remove();

        timeout(
            WAIT,
            people.wait_for(|s| s.people.len() == Seed::new().len() - 1),
        )
        .await
        .unwrap()
        .unwrap();
        assert!(store.find_by_id(ARNE).await.is_none());
    }

    #[tokio::test]
    async fn test_on_cleared_stops_listing_updates() {
        let temp_dir = TempDir::new().unwrap();
        let (vm, store) = view_model(&temp_dir).await;
        let mut people = vm.people_state();
        timeout(WAIT, people.wait_for(|s| !s.is_loading))
            .await
            .unwrap()
            .unwrap();

        vm.on_cleared();
        // Give the aborted task a chance to wind down.
        tokio::task::yield_now().await;
        people.borrow_and_update();

        store.insert(Person::new("Late", "Arrival")).await.unwrap();

        let changed = timeout(Duration::from_millis(100), people.changed()).await;
        assert!(changed.is_err(), "cleared view model must not publish");
    }
}
