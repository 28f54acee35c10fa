//! Fixed dataset used to bootstrap an empty store.
use crate::person::Person;

/// (first name, last name) pairs of the default dataset, in seed order.
const SEED_NAMES: &[(&str, &str)] = &[
    ("Arne", "Arndt"),
    ("Berta", "Bauer"),
    ("Cord", "Conrad"),
    ("Dagmar", "Diehl"),
    ("Ernst", "Engel"),
    ("Frieda", "Fischer"),
    ("Gerd", "Graf"),
    ("Hanna", "Hoffmann"),
    ("Ingo", "Imhof"),
    ("Jana", "Jung"),
    ("Karl", "Koch"),
    ("Liane", "Lang"),
    ("Mark", "Meyer"),
    ("Nina", "Neumann"),
    ("Olaf", "Otto"),
    ("Paula", "Peters"),
    ("Quirin", "Quandt"),
    ("Rolf", "Richter"),
    ("Sarah", "Schmidt"),
    ("Tom", "Treu"),
    ("Ulla", "Ulrich"),
    ("Volker", "von Vogel"),
];

/// Ordered, immutable seed dataset.
///
/// A store writes these records to disk when it starts without a persisted
/// file. The list is never mutated at runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Seed {
    people: Vec<Person>,
}

impl Seed {
    /// The built-in dataset.
    ///
    /// Ids follow `NN000000-0000-0000-0000-000000000000` where `NN` is the
    /// two-digit ordinal starting at `01`.
    pub fn new() -> Self {
        let people = SEED_NAMES
            .iter()
            .enumerate()
            .map(|(index, (first, last))| {
                let ordinal = index + 1;
                let email = format!(
                    "{}.{}@example.com",
                    first.to_lowercase(),
                    last.to_lowercase().replace(' ', "")
                );
                Person::with_id(seed_id(ordinal), *first, *last)
                    .email(email)
                    .phone(format!("05826 {:04} {:02}", 1000 + ordinal * 37, ordinal))
            })
            .collect();

        Self { people }
    }

    /// A seed made of caller-provided records.
    pub fn from_people(people: Vec<Person>) -> Self {
        Self { people }
    }

    pub fn people(&self) -> &[Person] {
        &self.people
    }

    pub fn len(&self) -> usize {
        self.people.len()
    }

    pub fn is_empty(&self) -> bool {
        self.people.is_empty()
    }
}

impl Default for Seed {
    fn default() -> Self {
        Self::new()
    }
}

fn seed_id(ordinal: usize) -> String {
    format!("{ordinal:02}000000-0000-0000-0000-000000000000")
}
