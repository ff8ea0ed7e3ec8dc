//! JSON-document-backed stores for the Splash redirect service.
//!
//! Two small documents on disk carry all state: `links.json`
//! (identifier -> redirect entry, partitioned per user) and
//! `users.json` (username -> password digest). Every operation is a
//! fresh load-mutate-write cycle; a per-document mutex serializes
//! writers within the process. Uploaded loading images live in a
//! directory next to the documents and are addressed by generated
//! filenames.

pub mod assets;
pub mod credentials;
pub mod document;
pub mod links;

pub use assets::AssetStore;
pub use credentials::JsonCredentialStore;
pub use links::JsonLinkStore;
