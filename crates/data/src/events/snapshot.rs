//! Single-slot snapshot channel with sorted, deduplicated subscriptions.

use std::sync::Arc;

use people_core::Person;
use tokio::sync::watch;

/// Immutable view of the whole dataset at one instant.
pub type Snapshot = Arc<Vec<Person>>;

/// Holder of the latest published snapshot.
///
/// Publishing replaces the value and wakes every live subscriber. A late
/// subscriber only ever sees the latest value, never the history.
pub struct SnapshotChannel {
    tx: watch::Sender<Snapshot>,
}

impl SnapshotChannel {
    /// Creates a channel holding an empty snapshot.
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(Arc::new(Vec::new()));
        Self { tx }
    }

    /// Latest published snapshot.
    pub fn current(&self) -> Snapshot {
        Arc::clone(&*self.tx.borrow())
    }

    /// Replace the current snapshot.
    ///
    /// Subscribers are only woken when the new dataset differs from the
    /// current one. Returns whether a change was published.
    pub fn publish(&self, people: Vec<Person>) -> bool {
        self.tx.send_if_modified(|current| {
            if current.as_slice() == people.as_slice() {
                return false;
            }
            *current = Arc::new(people);
            true
        })
    }

    /// Subscribe to snapshots sorted by last name.
    pub fn subscribe_sorted(&self) -> SortedSnapshots {
        SortedSnapshots::new(self.tx.subscribe())
    }

    /// Number of live subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for SnapshotChannel {
    fn default() -> Self {
        Self::new()
    }
}

/// Independent subscription yielding sorted snapshots.
///
/// The first [`recv`](Self::recv) returns the snapshot current at subscribe
/// time; later calls wait for the next publish. Consecutive equal snapshots
/// are skipped. Dropping the subscription unregisters it.
pub struct SortedSnapshots {
    rx: watch::Receiver<Snapshot>,
    last: Option<Snapshot>,
    started: bool,
}

impl SortedSnapshots {
    fn new(rx: watch::Receiver<Snapshot>) -> Self {
        Self {
            rx,
            last: None,
            started: false,
        }
    }

    /// Wait for the next distinct sorted snapshot.
    ///
    /// Returns `None` once the publishing side is gone.
    pub async fn recv(&mut self) -> Option<Snapshot> {
        loop {
            if self.started {
                self.rx.changed().await.ok()?;
            }
            self.started = true;

            let latest = Arc::clone(&*self.rx.borrow_and_update());
            let sorted = sort_by_last_name(&latest);

            if self.last.as_deref() == Some(&sorted) {
                continue;
            }

            let sorted = Arc::new(sorted);
            self.last = Some(Arc::clone(&sorted));
            return Some(sorted);
        }
    }
}

/// Stable, case-insensitive sort by last name.
fn sort_by_last_name(people: &[Person]) -> Vec<Person> {
    let mut sorted = people.to_vec();
    sorted.sort_by_cached_key(Person::sort_key);
    sorted
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    fn person(id: &str, last: &str) -> Person {
        Person::with_id(id, "First", last)
    }

    fn last_names(snapshot: &Snapshot) -> Vec<&str> {
        snapshot.iter().map(|p| p.last_name.as_str()).collect()
    }

    #[tokio::test]
    async fn test_first_recv_replays_latest_value_sorted() {
        let channel = SnapshotChannel::new();
        channel.publish(vec![person("1", "zimmer"), person("2", "Adler")]);

        let mut sub = channel.subscribe_sorted();
        let snapshot = sub.recv().await.unwrap();

        assert_eq!(last_names(&snapshot), ["Adler", "zimmer"]);
    }

    #[tokio::test]
    async fn test_sort_is_case_insensitive() {
        let channel = SnapshotChannel::new();
        channel.publish(vec![
            person("1", "bauer"),
            person("2", "Christ"),
            person("3", "Albers"),
        ]);

        let snapshot = channel.subscribe_sorted().recv().await.unwrap();
        assert_eq!(last_names(&snapshot), ["Albers", "bauer", "Christ"]);
    }

    #[tokio::test]
    async fn test_reordering_the_same_records_is_not_a_new_emission() {
        let channel = SnapshotChannel::new();
        channel.publish(vec![person("1", "A"), person("2", "B")]);

        let mut sub = channel.subscribe_sorted();
        sub.recv().await.unwrap();

        // Same records in a different order sort to an equal snapshot.
        assert!(channel.publish(vec![person("2", "B"), person("1", "A")]));
        let suppressed = tokio::time::timeout(Duration::from_millis(50), sub.recv()).await;
        assert!(suppressed.is_err());

        channel.publish(vec![person("2", "B"), person("1", "A"), person("3", "C")]);

        let next = sub.recv().await.unwrap();
        assert_eq!(next.len(), 3);
    }

    #[tokio::test]
    async fn test_publishing_an_equal_snapshot_does_not_notify() {
        let channel = SnapshotChannel::new();
        assert!(channel.publish(vec![person("1", "A")]));
        assert!(!channel.publish(vec![person("1", "A")]));
    }

    #[tokio::test]
    async fn test_recv_waits_for_next_publish() {
        let channel = SnapshotChannel::new();
        let mut sub = channel.subscribe_sorted();
        assert!(sub.recv().await.unwrap().is_empty());

        let pending = tokio::time::timeout(Duration::from_millis(50), sub.recv()).await;
        assert!(pending.is_err(), "no publish means no emission");

        channel.publish(vec![person("1", "A")]);
        assert_eq!(sub.recv().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_dropping_a_subscription_leaves_others_untouched() {
        let channel = SnapshotChannel::new();
        let first = channel.subscribe_sorted();
        let mut second = channel.subscribe_sorted();
        assert_eq!(channel.subscriber_count(), 2);

        drop(first);
        assert_eq!(channel.subscriber_count(), 1);

        channel.publish(vec![person("1", "A")]);
        assert_eq!(second.recv().await.unwrap().len(), 1);
        assert_eq!(channel.current().len(), 1);
    }

    #[tokio::test]
    async fn test_recv_ends_when_channel_is_dropped() {
        let channel = SnapshotChannel::new();
        let mut sub = channel.subscribe_sorted();
        sub.recv().await.unwrap();

        drop(channel);
        assert!(sub.recv().await.is_none());
    }
}
