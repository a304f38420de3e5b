//! Key-value state capability handed to the contracts by their host.
//!
//! The contracts never reach for ambient storage: every operation receives a
//! `&mut dyn StateStore`, so the same engine runs over the in-memory store
//! used by the CLI and tests, or over any host-provided backend.

use std::collections::BTreeMap;

use super::config::CommitPolicy;
use super::error::StoreError;

/// Single-key get/put access to a contract's world state.
pub trait StateStore {
    /// Returns the stored bytes, or `None` when the key was never written.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError>;

    fn put(&mut self, key: &str, value: Vec<u8>) -> Result<(), StoreError>;
}

/// In-memory store, ordered by key so dumps and tests are deterministic.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct InMemoryState {
    entries: BTreeMap<String, Vec<u8>>,
}

impl InMemoryState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over `(key, value)` pairs in key order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &[u8])> {
        self.entries
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_slice()))
    }
}

impl StateStore for InMemoryState {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn put(&mut self, key: &str, value: Vec<u8>) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }
}

/// Write overlay for the duration of one invocation.
///
/// Reads see the invocation's own pending writes first. Under
/// `CommitPolicy::Atomic` nothing reaches the underlying store until
/// [`WriteSet::commit`]; dropping the set discards the staged writes. Under
/// `CommitPolicy::Immediate` every `put` writes through.
pub struct WriteSet<'a> {
    store: &'a mut dyn StateStore,
    policy: CommitPolicy,
    pending: BTreeMap<String, Vec<u8>>,
}

impl<'a> WriteSet<'a> {
    pub fn new(store: &'a mut dyn StateStore, policy: CommitPolicy) -> Self {
        Self {
            store,
            policy,
            pending: BTreeMap::new(),
        }
    }

    /// Number of writes staged and not yet flushed.
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Flushes staged writes in key order.
    pub fn commit(self) -> Result<(), StoreError> {
        let count = self.pending.len();
        for (key, value) in self.pending {
            self.store.put(&key, value)?;
        }
        if count > 0 {
            log::trace!("write set committed {count} key(s)");
        }
        Ok(())
    }
}

impl StateStore for WriteSet<'_> {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        match self.pending.get(key) {
            Some(value) => Ok(Some(value.clone())),
            None => self.store.get(key),
        }
    }

    fn put(&mut self, key: &str, value: Vec<u8>) -> Result<(), StoreError> {
        match self.policy {
            CommitPolicy::Atomic => {
                self.pending.insert(key.to_string(), value);
                Ok(())
            }
            CommitPolicy::Immediate => self.store.put(key, value),
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::collections::BTreeSet;

    /// Store double that fails reads and/or writes for selected keys.
    #[derive(Debug, Default)]
    pub(crate) struct FaultyState {
        pub(crate) inner: InMemoryState,
        pub(crate) failing_reads: BTreeSet<String>,
        pub(crate) failing_writes: BTreeSet<String>,
    }

    impl FaultyState {
        pub(crate) fn fail_read(mut self, key: &str) -> Self {
            self.failing_reads.insert(key.to_string());
            self
        }

        pub(crate) fn fail_write(mut self, key: &str) -> Self {
            self.failing_writes.insert(key.to_string());
            self
        }
    }

    impl StateStore for FaultyState {
        fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
            if self.failing_reads.contains(key) {
                return Err(StoreError::Read {
                    key: key.to_string(),
                    reason: "injected read fault".to_string(),
                });
            }
            self.inner.get(key)
        }

        fn put(&mut self, key: &str, value: Vec<u8>) -> Result<(), StoreError> {
            if self.failing_writes.contains(key) {
                return Err(StoreError::Write {
                    key: key.to_string(),
                    reason: "injected write fault".to_string(),
                });
            }
            self.inner.put(key, value)
        }
    }

    #[test]
    fn test_in_memory_get_and_put() {
        let mut state = InMemoryState::new();
        assert!(state.get("a").unwrap().is_none());

        state.put("a", b"1".to_vec()).unwrap();
        state.put("a", b"2".to_vec()).unwrap();

        assert_eq!(state.get("a").unwrap(), Some(b"2".to_vec()));
        assert_eq!(state.len(), 1);
    }

    #[test]
    fn test_entries_are_key_ordered() {
        let mut state = InMemoryState::new();
        state.put("b", vec![2]).unwrap();
        state.put("a", vec![1]).unwrap();

        let keys: Vec<&str> = state.entries().map(|(key, _)| key).collect();
        assert_eq!(keys, vec!["a", "b"]);
    }

    #[test]
    fn test_atomic_write_set_stages_until_commit() {
        let mut state = InMemoryState::new();
        {
            let mut writes = WriteSet::new(&mut state, CommitPolicy::Atomic);
            writes.put("a", vec![1]).unwrap();
            assert_eq!(writes.get("a").unwrap(), Some(vec![1]));
            assert_eq!(writes.pending(), 1);
            writes.commit().unwrap();
        }
        assert_eq!(state.get("a").unwrap(), Some(vec![1]));
    }

    #[test]
    fn test_atomic_write_set_discards_on_drop() {
        let mut state = InMemoryState::new();
        {
            let mut writes = WriteSet::new(&mut state, CommitPolicy::Atomic);
            writes.put("a", vec![1]).unwrap();
        }
        assert!(state.is_empty());
    }

    #[test]
    fn test_immediate_write_set_writes_through() {
        let mut state = InMemoryState::new();
        {
            let mut writes = WriteSet::new(&mut state, CommitPolicy::Immediate);
            writes.put("a", vec![1]).unwrap();
            assert_eq!(writes.pending(), 0);
        }
        assert_eq!(state.get("a").unwrap(), Some(vec![1]));
    }

    #[test]
    fn test_commit_surfaces_store_failure() {
        let mut state = FaultyState::default().fail_write("b");
        let mut writes = WriteSet::new(&mut state, CommitPolicy::Atomic);
        writes.put("a", vec![1]).unwrap();
        writes.put("b", vec![2]).unwrap();

        assert!(matches!(
            writes.commit(),
            Err(StoreError::Write { key, .. }) if key == "b"
        ));
    }
}
