use crate::store::{CoordinationStore, StoreReadError};
use bytes::Bytes;
use std::collections::HashMap;
use std::io;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

// Good enough to embed or test against. Everything lives in RAM and there is no consensus, so
// every read is trivially consistent.
pub struct InMemoryStore {
    entries: Mutex<HashMap<String, Bytes>>,
    unreachable: AtomicBool,
    reads: AtomicUsize,
}

impl InMemoryStore {
    pub fn new() -> Self {
        InMemoryStore {
            entries: Mutex::new(HashMap::new()),
            unreachable: AtomicBool::new(false),
            reads: AtomicUsize::new(0),
        }
    }

    pub fn put(&self, key: impl Into<String>, value: impl Into<Bytes>) {
        self.lock_entries().insert(key.into(), value.into());
    }

    pub fn remove(&self, key: &str) -> Option<Bytes> {
        self.lock_entries().remove(key)
    }

    /// While set, every read fails as if the store could not be reached.
    pub fn set_unreachable(&self, unreachable: bool) {
        self.unreachable.store(unreachable, Ordering::SeqCst);
    }

    /// Number of reads served so far, including failed ones.
    pub fn read_count(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    fn lock_entries(&self) -> std::sync::MutexGuard<'_, HashMap<String, Bytes>> {
        // A panic while holding the lock can't leave a HashMap half-written, so just take it back.
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl CoordinationStore for InMemoryStore {
    async fn read_key(&self, key: &str) -> Result<Option<Bytes>, StoreReadError> {
        self.reads.fetch_add(1, Ordering::SeqCst);

        if self.unreachable.load(Ordering::SeqCst) {
            return Err(StoreReadError::Unreachable {
                endpoint: "in-memory".to_string(),
                source: Box::new(io::Error::new(
                    io::ErrorKind::ConnectionRefused,
                    "in-memory store marked unreachable",
                )),
            });
        }

        Ok(self.lock_entries().get(key).cloned())
    }
}
