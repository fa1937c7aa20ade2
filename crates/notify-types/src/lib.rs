//! # Notify Types Crate
//!
//! This crate contains the value objects, the notification envelope
//! aggregate and the outbound wire document for the notify exchange.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All cross-subsystem domain types are
//!   defined here.
//! - **Composition over inheritance**: inbound and outbound notifications
//!   are one [`Notification`] type carrying a [`Direction`] tag and an
//!   optional outbound extension, not a subclass hierarchy.
//! - **Explicit errors**: construction-time invariant violations surface as
//!   [`EnvelopeError`] values; advisory checks only log warnings.

pub mod envelope;
pub mod errors;
pub mod value_objects;
pub mod vocabulary;
pub mod wire;

pub use envelope::{Direction, Notification, OutboundDetails};
pub use errors::EnvelopeError;
pub use value_objects::{
    NotificationActor, NotificationContext, NotificationObject, NotificationTarget,
    NotificationUrl,
};
pub use vocabulary::{includes_activity_type, ACTIVITIES};
pub use wire::{ServiceRef, WireDocument, ACTIVITY_STREAMS_NAMESPACE, COAR_NOTIFY_NAMESPACE};
