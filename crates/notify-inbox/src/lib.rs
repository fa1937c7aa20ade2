//! # Notify Inbox
//!
//! The message-exchange service for COAR Notify (Linked Data
//! Notifications).
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                        NOTIFY INBOX                          │
//! ├──────────────────────────────────────────────────────────────┤
//! │   POST /inbox ──→ decode ──→ validate ──→ envelope ──→ store │
//! │                     400        422          422        422   │
//! │                                                        201   │
//! │                                                              │
//! │   pattern method ──→ type tags ──→ HTTP POST ──→ status ──┐  │
//! │   (Offer/Announce/...)            (peer inbox)            │  │
//! │                                                    store ←┘  │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Inbound requests run the validation state machine
//! (Received → Decoded → Validated → Persisted) and reject with 400/415/422
//! at the failing gate. Outbound notifications are assembled from value
//! objects, typed by one of the ten pattern methods, delivered best-effort
//! and persisted with the delivery status captured on the envelope.
//!
//! # Usage
//!
//! ```ignore
//! use notify_inbox::{HttpDeliverySink, ManagerConfig, NotificationManager};
//!
//! let config = ManagerConfig::new("https://repo.example.org", "https://repo.example.org/inbox");
//! let delivery = Arc::new(HttpDeliverySink::new(&config)?);
//! let manager = Arc::new(NotificationManager::new(config, store, delivery)?);
//! let router = notify_inbox::build_router(manager);
//! ```

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod router;
pub mod service;

pub use adapters::http_delivery::{transport_code, HttpDeliverySink};
pub use domain::config::{ConfigError, ManagerConfig, LD_JSON_CONTENT_TYPE};
pub use domain::error::NotifyError;
pub use ports::DeliverySink;
pub use router::build_router;
pub use service::NotificationManager;
