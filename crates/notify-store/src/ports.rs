//! Port traits of the persistence subsystem.

use chrono::{DateTime, Utc};
use notify_types::{Direction, Notification};

use crate::errors::StoreError;

/// Default cap for listing queries.
pub const DEFAULT_LIST_LIMIT: usize = 1000;

/// Abstract interface for notification persistence.
///
/// Production: [`crate::adapters::rocks::RocksDbStore`]
/// Testing: [`crate::adapters::memory::InMemoryStore`]
///
/// One store connection is shared for the lifetime of a manager and used
/// sequentially; implementations synchronise internally so the handle can
/// live behind an `Arc` in an async runtime.
pub trait NotificationStore: Send + Sync {
    /// Liveness check. Verified once at manager construction and again
    /// before each outbound pattern delivery.
    fn ping(&self) -> Result<(), StoreError>;

    /// Upsert a notification by id, stamping its modification timestamp.
    fn persist(&self, notification: &mut Notification) -> Result<(), StoreError>;

    /// Fetch a notification by id.
    fn get_by_id(&self, id: &str) -> Result<Option<Notification>, StoreError>;

    /// Delete a notification by id. Returns whether a record existed.
    fn remove_by_id(&self, id: &str) -> Result<bool, StoreError>;

    /// List notifications of one direction, newest first, capped at `limit`.
    fn list_by_direction(
        &self,
        direction: Direction,
        limit: usize,
    ) -> Result<Vec<Notification>, StoreError>;
}

/// Abstract interface for time operations (for testability).
pub trait TimeSource: Send + Sync {
    /// Current wall-clock time.
    fn now(&self) -> DateTime<Utc>;
}

/// System clock implementation.
#[derive(Default)]
pub struct SystemTimeSource;

impl TimeSource for SystemTimeSource {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
