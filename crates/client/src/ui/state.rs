use people_core::Person;

/// State of the people list screen.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PeopleUiState {
    pub is_loading: bool,
    /// Sorted by last name.
    pub people: Vec<Person>,
}

/// State of the person detail screen.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PersonUiState {
    pub person: Person,
}

impl Default for PersonUiState {
    fn default() -> Self {
        Self {
            person: Person::with_id(people_core::empty_uuid(), "", ""),
        }
    }
}
