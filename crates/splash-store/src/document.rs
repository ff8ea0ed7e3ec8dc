//! In-memory form of the link document and its layout detection.
//!
//! Three on-disk shapes are accepted:
//!
//! 1. the current tagged form, `{"version": 2, "users": {user: {id: entry}}}`;
//! 2. the legacy flat form, `{id: entry}`, recognized by any top-level
//!    value carrying an `id` field;
//! 3. the legacy untagged nested form, `{user: {id: entry}}`.
//!
//! Saving always emits the tagged form, except that a still-flat
//! document is written back flat: migration happens only on the first
//! create or registration, never as a side effect of a read or delete.

use serde_json::Value;
use splash_core::{LinkEntry, LEGACY_NAMESPACE};
use std::collections::BTreeMap;

pub type EntryMap = BTreeMap<String, LinkEntry>;
pub type NamespaceMap = BTreeMap<String, EntryMap>;

const VERSION: u64 = 2;
const USERS_KEY: &str = "users";
const VERSION_KEY: &str = "version";

/// The whole backing store for redirect links, in one of its two
/// mutually exclusive layouts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkDocument {
    /// Legacy layout with no user scoping: id -> entry.
    Flat(EntryMap),
    /// Current layout: username -> id -> entry.
    Nested(NamespaceMap),
}

impl LinkDocument {
    /// An empty document in the current layout.
    pub fn empty() -> Self {
        Self::Nested(NamespaceMap::new())
    }

    /// Classifies and deserializes a parsed JSON value.
    ///
    /// Anything that is not a recognizable document (non-object JSON,
    /// or a body that fails to deserialize) becomes an empty document;
    /// a damaged store must never fail the caller.
    pub fn from_json(value: Value) -> Self {
        let Value::Object(root) = value else {
            return Self::empty();
        };

        if root.get(VERSION_KEY).and_then(Value::as_u64) == Some(VERSION) {
            let users = root
                .get(USERS_KEY)
                .cloned()
                .unwrap_or_else(|| Value::Object(Default::default()));
            return match serde_json::from_value::<NamespaceMap>(users) {
                Ok(namespaces) => Self::Nested(namespaces),
                Err(_) => Self::empty(),
            };
        }

        // Untagged legacy file: flat iff some top-level value looks
        // like an entry (carries an `id` field).
        let looks_flat = root
            .values()
            .any(|v| v.as_object().is_some_and(|o| o.contains_key("id")));

        if looks_flat {
            match serde_json::from_value::<EntryMap>(Value::Object(root)) {
                Ok(entries) => Self::Flat(entries),
                Err(_) => Self::empty(),
            }
        } else {
            match serde_json::from_value::<NamespaceMap>(Value::Object(root)) {
                Ok(namespaces) => Self::Nested(namespaces),
                Err(_) => Self::empty(),
            }
        }
    }

    /// Serializes the document for persistence.
    pub fn to_json(&self) -> serde_json::Result<Value> {
        match self {
            Self::Flat(entries) => serde_json::to_value(entries),
            Self::Nested(namespaces) => {
                let mut root = serde_json::Map::new();
                root.insert(VERSION_KEY.to_owned(), Value::from(VERSION));
                root.insert(USERS_KEY.to_owned(), serde_json::to_value(namespaces)?);
                Ok(Value::Object(root))
            }
        }
    }

    pub fn is_flat(&self) -> bool {
        matches!(self, Self::Flat(_))
    }

    /// Whether `id` exists anywhere in the document, regardless of
    /// namespace. Ids are globally unique public path segments.
    pub fn contains(&self, id: &str) -> bool {
        match self {
            Self::Flat(entries) => entries.contains_key(id),
            Self::Nested(namespaces) => namespaces.values().any(|ns| ns.contains_key(id)),
        }
    }

    /// Finds `id` in any namespace.
    pub fn lookup(&self, id: &str) -> Option<&LinkEntry> {
        match self {
            Self::Flat(entries) => entries.get(id),
            Self::Nested(namespaces) => namespaces.values().find_map(|ns| ns.get(id)),
        }
    }

    /// Consumes the document, migrating a flat layout first: a flat
    /// document's entries move verbatim under the reserved legacy
    /// namespace.
    pub fn into_nested(self) -> NamespaceMap {
        match self {
            Self::Flat(entries) => {
                let mut namespaces = NamespaceMap::new();
                namespaces.insert(LEGACY_NAMESPACE.to_owned(), entries);
                namespaces
            }
            Self::Nested(namespaces) => namespaces,
        }
    }

    /// In-place form of [`Self::into_nested`]. A no-op when the
    /// document is already nested.
    pub fn migrate_to_nested(&mut self) {
        if self.is_flat() {
            let doc = std::mem::replace(self, Self::empty());
            *self = Self::Nested(doc.into_nested());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn entry(id: &str) -> Value {
        json!({
            "id": id,
            "image": format!("/uploads/{id}.gif"),
            "urlMobile": "https://m.example.com",
            "urlDesktop": ""
        })
    }

    #[test]
    fn classifies_tagged_document() {
        let doc = LinkDocument::from_json(json!({
            "version": 2,
            "users": { "alice": { "promo": entry("promo") } }
        }));
        assert!(!doc.is_flat());
        assert!(doc.contains("promo"));
    }

    #[test]
    fn classifies_untagged_flat_document() {
        let doc = LinkDocument::from_json(json!({
            "promo": entry("promo"),
            "sale": entry("sale")
        }));
        assert!(doc.is_flat());
        assert!(doc.contains("promo"));
        assert!(doc.contains("sale"));
    }

    #[test]
    fn classifies_untagged_nested_document() {
        let doc = LinkDocument::from_json(json!({
            "alice": { "promo": entry("promo") },
            "bob": {}
        }));
        assert!(!doc.is_flat());
        assert!(doc.contains("promo"));
        assert!(!doc.contains("sale"));
    }

    #[test]
    fn garbage_becomes_empty_document() {
        for value in [json!([1, 2]), json!("nope"), json!({"a": 1}), json!(null)] {
            let doc = LinkDocument::from_json(value);
            assert_eq!(doc, LinkDocument::empty());
        }
    }

    #[test]
    fn empty_object_is_empty_nested() {
        let doc = LinkDocument::from_json(json!({}));
        assert_eq!(doc, LinkDocument::empty());
    }

    #[test]
    fn migration_moves_entries_under_legacy_namespace() {
        let mut doc = LinkDocument::from_json(json!({
            "a": entry("a"),
            "b": entry("b")
        }));
        doc.migrate_to_nested();

        let LinkDocument::Nested(namespaces) = &doc else {
            panic!("expected nested layout after migration");
        };
        let bucket = namespaces.get(LEGACY_NAMESPACE).expect("legacy bucket");
        assert_eq!(bucket.len(), 2);
        assert!(doc.contains("a"));
        assert!(doc.contains("b"));
    }

    #[test]
    fn migration_is_a_noop_on_nested() {
        let mut doc = LinkDocument::from_json(json!({
            "alice": { "promo": entry("promo") }
        }));
        let before = doc.clone();
        doc.migrate_to_nested();
        assert_eq!(doc, before);
    }

    #[test]
    fn tagged_roundtrip_preserves_entries() {
        let original = LinkDocument::from_json(json!({
            "alice": { "promo": entry("promo") }
        }));
        let value = original.to_json().unwrap();
        assert_eq!(value["version"], 2);

        let reloaded = LinkDocument::from_json(value);
        assert_eq!(reloaded, original);
    }

    #[test]
    fn flat_document_saves_flat() {
        let doc = LinkDocument::from_json(json!({ "promo": entry("promo") }));
        let value = doc.to_json().unwrap();
        // No version tag: a flat file stays flat until a write path
        // migrates it.
        assert!(value.get("version").is_none());
        assert!(value.get("promo").is_some());
    }
}
