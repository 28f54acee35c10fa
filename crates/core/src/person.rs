//! The `Person` record.
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::id::new_uuid;

/// A single person entry.
///
/// The record is a plain value: equality is structural over every field and
/// `id` never changes once assigned. Missing keys in persisted JSON fall back
/// to [`Person::default`], and unknown keys are ignored, so older and newer
/// files both decode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Person {
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    /// Path or URI of a profile image, if any.
    pub image_path: Option<String>,
    pub id: String,
}

impl Person {
    /// Create a person with a freshly generated id.
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self::with_id(new_uuid(), first_name, last_name)
    }

    /// Create a person with a caller-provided id.
    pub fn with_id(
        id: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            id: id.into(),
            ..Self::default()
        }
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    pub fn image_path(mut self, image_path: impl Into<String>) -> Self {
        self.image_path = Some(image_path.into());
        self
    }

    /// Key used by sorted listings: the last name, case-folded.
    pub fn sort_key(&self) -> String {
        self.last_name.to_lowercase()
    }
}

impl Default for Person {
    fn default() -> Self {
        Self {
            first_name: String::new(),
            last_name: String::new(),
            email: Some(String::new()),
            phone: Some(String::new()),
            image_path: None,
            id: new_uuid(),
        }
    }
}

impl fmt::Display for Person {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.first_name, self.last_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_with_camel_case_keys() {
        let person = Person::with_id("1", "Ada", "Lovelace").image_path("ada.png");
        let json = serde_json::to_value(&person).unwrap();

        assert_eq!(json["firstName"], "Ada");
        assert_eq!(json["lastName"], "Lovelace");
        assert_eq!(json["imagePath"], "ada.png");
        assert_eq!(json["id"], "1");
    }

    #[test]
    fn test_decode_ignores_unknown_keys_and_fills_defaults() {
        let json = r#"{ "id": "7", "lastName": "Hopper", "nickname": "Amazing Grace" }"#;
        let person: Person = serde_json::from_str(json).unwrap();

        assert_eq!(person.id, "7");
        assert_eq!(person.last_name, "Hopper");
        assert_eq!(person.first_name, "");
        assert_eq!(person.email.as_deref(), Some(""));
        assert_eq!(person.image_path, None);
    }

    #[test]
    fn test_explicit_null_stays_none() {
        let json = r#"{ "id": "8", "email": null }"#;
        let person: Person = serde_json::from_str(json).unwrap();
        assert_eq!(person.email, None);
    }

    #[test]
    fn test_sort_key_is_case_insensitive() {
        let a = Person::new("Ludwig", "van Beethoven");
        let b = Person::new("Carl", "Bach");
        assert!(b.sort_key() < a.sort_key());
        assert_eq!(a.sort_key(), "van beethoven");
    }

    #[test]
    fn test_new_people_get_distinct_ids() {
        assert_ne!(Person::new("A", "B").id, Person::new("A", "B").id);
    }
}
