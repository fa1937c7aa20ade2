//! RocksDB store adapter.
//!
//! Production implementation of the [`NotificationStore`] port. Records are
//! JSON-encoded envelopes keyed by notification id in a dedicated column
//! family. Listing scans the column family and sorts in memory, which is
//! adequate at inbox scale (the listing cap is 1000 records).

use std::path::Path;
use std::sync::Arc;

use notify_types::{Direction, Notification};
use parking_lot::RwLock;
use rocksdb::{ColumnFamily, ColumnFamilyDescriptor, IteratorMode, Options, WriteOptions, DB};
use tracing::debug;

use crate::errors::StoreError;
use crate::ports::{NotificationStore, SystemTimeSource, TimeSource};

/// Column family holding notification records.
pub const CF_NOTIFICATIONS: &str = "notifications";

/// RocksDB configuration.
#[derive(Debug, Clone)]
pub struct RocksDbConfig {
    /// Path to the database directory.
    pub path: String,
    /// Write buffer size in bytes (default: 8MB).
    pub write_buffer_size: usize,
    /// Enable fsync after each write (default: true for durability).
    pub sync_writes: bool,
}

impl Default for RocksDbConfig {
    fn default() -> Self {
        Self {
            path: "./data/notifications".to_string(),
            write_buffer_size: 8 * 1024 * 1024,
            sync_writes: true,
        }
    }
}

impl RocksDbConfig {
    /// Create config for testing (small buffers, no sync).
    pub fn for_testing(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            write_buffer_size: 1024 * 1024,
            sync_writes: false,
        }
    }
}

/// RocksDB-backed notification store.
pub struct RocksDbStore {
    db: Arc<RwLock<DB>>,
    clock: Arc<dyn TimeSource>,
    config: RocksDbConfig,
}

impl RocksDbStore {
    /// Open or create the database.
    pub fn open(config: RocksDbConfig) -> Result<Self, StoreError> {
        Self::open_with_clock(config, Arc::new(SystemTimeSource))
    }

    pub fn open_with_clock(
        config: RocksDbConfig,
        clock: Arc<dyn TimeSource>,
    ) -> Result<Self, StoreError> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);
        opts.set_write_buffer_size(config.write_buffer_size);
        opts.set_compression_type(rocksdb::DBCompressionType::Snappy);

        let mut cf_opts = Options::default();
        cf_opts.set_compression_type(rocksdb::DBCompressionType::Snappy);
        let descriptors = vec![ColumnFamilyDescriptor::new(CF_NOTIFICATIONS, cf_opts)];

        let db = DB::open_cf_descriptors(&opts, &config.path, descriptors)
            .map_err(|e| StoreError::Unavailable(format!("failed to open RocksDB: {e}")))?;

        debug!(path = %config.path, "notification store opened");

        Ok(Self {
            db: Arc::new(RwLock::new(db)),
            clock,
            config,
        })
    }

    /// Open at a path with default options.
    pub fn open_at(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        Self::open(RocksDbConfig {
            path: path.as_ref().to_string_lossy().to_string(),
            ..Default::default()
        })
    }

    fn cf<'a>(db: &'a DB) -> Result<&'a ColumnFamily, StoreError> {
        db.cf_handle(CF_NOTIFICATIONS).ok_or_else(|| {
            StoreError::Unavailable(format!("missing column family '{CF_NOTIFICATIONS}'"))
        })
    }

    fn write_opts(&self) -> WriteOptions {
        let mut write_opts = WriteOptions::default();
        write_opts.set_sync(self.config.sync_writes);
        write_opts
    }
}

impl NotificationStore for RocksDbStore {
    fn ping(&self) -> Result<(), StoreError> {
        let db = self.db.read();
        let cf = Self::cf(&db)?;
        db.get_cf(cf, b"__ping__")
            .map(|_| ())
            .map_err(|e| StoreError::Unavailable(e.to_string()))
    }

    fn persist(&self, notification: &mut Notification) -> Result<(), StoreError> {
        notification.set_timestamp(self.clock.now());

        let record = serde_json::to_vec(notification)
            .map_err(|e| StoreError::Encode(e.to_string()))?;

        let db = self.db.write();
        let cf = Self::cf(&db)?;
        db.put_cf_opt(cf, notification.id().as_bytes(), record, &self.write_opts())
            .map_err(|e| StoreError::Engine(format!("RocksDB put failed: {e}")))
    }

    fn get_by_id(&self, id: &str) -> Result<Option<Notification>, StoreError> {
        let db = self.db.read();
        let cf = Self::cf(&db)?;
        let record = db
            .get_cf(cf, id.as_bytes())
            .map_err(|e| StoreError::Engine(format!("RocksDB get failed: {e}")))?;

        record
            .map(|bytes| serde_json::from_slice(&bytes).map_err(|e| StoreError::Corrupt(e.to_string())))
            .transpose()
    }

    fn remove_by_id(&self, id: &str) -> Result<bool, StoreError> {
        let db = self.db.write();
        let cf = Self::cf(&db)?;
        let existed = db
            .get_cf(cf, id.as_bytes())
            .map_err(|e| StoreError::Engine(format!("RocksDB get failed: {e}")))?
            .is_some();

        if existed {
            db.delete_cf_opt(cf, id.as_bytes(), &self.write_opts())
                .map_err(|e| StoreError::Engine(format!("RocksDB delete failed: {e}")))?;
        }
        Ok(existed)
    }

    fn list_by_direction(
        &self,
        direction: Direction,
        limit: usize,
    ) -> Result<Vec<Notification>, StoreError> {
        let db = self.db.read();
        let cf = Self::cf(&db)?;

        let mut matching = Vec::new();
        for entry in db.iterator_cf(cf, IteratorMode::Start) {
            let (_, value) =
                entry.map_err(|e| StoreError::Engine(format!("RocksDB scan failed: {e}")))?;
            let notification: Notification = serde_json::from_slice(&value)
                .map_err(|e| StoreError::Corrupt(e.to_string()))?;
            if notification.direction() == direction {
                matching.push(notification);
            }
        }

        matching.sort_by(|a, b| b.timestamp().cmp(&a.timestamp()));
        matching.truncate(limit);
        Ok(matching)
    }
}
