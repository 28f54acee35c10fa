//! UUID-shaped identity helpers.
//!
//! Record ids are plain strings on the wire, so these helpers hand out the
//! textual form directly.
use uuid::Uuid;

/// Generate a fresh random (v4) identity.
pub fn new_uuid() -> String {
    Uuid::new_v4().to_string()
}

/// The all-zero identity, used as a placeholder for "no record".
pub fn empty_uuid() -> String {
    Uuid::nil().to_string()
}

/// Build a deterministic, human-readable identity for fixtures.
///
/// `create_uuid(1, 2)` yields `00000001-0002-0000-0000-000000000000`.
/// Values wider than their slot are truncated to keep the UUID shape.
pub fn create_uuid(number: u32, value: u16) -> String {
    format!(
        "{:08}-{:04}-0000-0000-000000000000",
        number % 100_000_000,
        value % 10_000
    )
}
