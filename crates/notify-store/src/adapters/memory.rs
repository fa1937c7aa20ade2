//! In-memory store adapter.
//!
//! Reference implementation of the [`NotificationStore`] port, used by the
//! test suites. Fault flags allow simulating an unreachable database and
//! write failures without a real storage engine.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use notify_types::{Direction, Notification};
use parking_lot::RwLock;

use crate::errors::StoreError;
use crate::ports::{NotificationStore, SystemTimeSource, TimeSource};

/// HashMap-backed notification store.
pub struct InMemoryStore {
    records: RwLock<HashMap<String, Notification>>,
    clock: Arc<dyn TimeSource>,
    offline: AtomicBool,
    fail_writes: AtomicBool,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemTimeSource))
    }

    pub fn with_clock(clock: Arc<dyn TimeSource>) -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
            clock,
            offline: AtomicBool::new(false),
            fail_writes: AtomicBool::new(false),
        }
    }

    /// Simulate a dead connection: every operation fails until cleared.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Simulate write failures while reads keep working.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }

    fn check_online(&self) -> Result<(), StoreError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("connection refused".to_string()));
        }
        Ok(())
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl NotificationStore for InMemoryStore {
    fn ping(&self) -> Result<(), StoreError> {
        self.check_online()
    }

    fn persist(&self, notification: &mut Notification) -> Result<(), StoreError> {
        self.check_online()?;
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Engine("write rejected".to_string()));
        }

        notification.set_timestamp(self.clock.now());
        self.records
            .write()
            .insert(notification.id().to_string(), notification.clone());
        Ok(())
    }

    fn get_by_id(&self, id: &str) -> Result<Option<Notification>, StoreError> {
        self.check_online()?;
        Ok(self.records.read().get(id).cloned())
    }

    fn remove_by_id(&self, id: &str) -> Result<bool, StoreError> {
        self.check_online()?;
        Ok(self.records.write().remove(id).is_some())
    }

    fn list_by_direction(
        &self,
        direction: Direction,
        limit: usize,
    ) -> Result<Vec<Notification>, StoreError> {
        self.check_online()?;

        let mut matching: Vec<Notification> = self
            .records
            .read()
            .values()
            .filter(|n| n.direction() == direction)
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.timestamp().cmp(&a.timestamp()));
        matching.truncate(limit);
        Ok(matching)
    }
}
