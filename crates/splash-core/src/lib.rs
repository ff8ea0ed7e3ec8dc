//! Core types and traits for the Splash redirect service.
//!
//! This crate provides the shared vocabulary used by the store and the
//! HTTP gateway: validated identifiers, the link entry record, and the
//! repository traits the gateway programs against.

pub mod entry;
pub mod error;
pub mod link_id;
pub mod repository;
pub mod username;

pub use entry::LinkEntry;
pub use error::{CoreError, StoreError};
pub use link_id::LinkId;
pub use repository::{CredentialRepository, LinkRepository};
pub use username::{Username, LEGACY_NAMESPACE};
