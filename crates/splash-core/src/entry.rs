use crate::link_id::LinkId;
use serde::{Deserialize, Serialize};

/// A stored redirect entry.
///
/// Field names on the wire match the JSON documents written by earlier
/// deployments (`urlMobile` / `urlDesktop`), so old files deserialize
/// unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkEntry {
    /// The short identifier, repeated inside the record.
    pub id: String,
    /// Reference to the stored loading image, e.g. `/uploads/promo-17....gif`.
    pub image: String,
    /// Destination URL for mobile visitors.
    #[serde(rename = "urlMobile")]
    pub url_mobile: String,
    /// Destination URL for desktop visitors. May be empty, in which case
    /// the presentation layer falls back to the mobile URL.
    #[serde(rename = "urlDesktop", default)]
    pub url_desktop: String,
}

impl LinkEntry {
    pub fn new(
        id: &LinkId,
        image: impl Into<String>,
        url_mobile: impl Into<String>,
        url_desktop: impl Into<String>,
    ) -> Self {
        Self {
            id: id.as_str().to_owned(),
            image: image.into(),
            url_mobile: url_mobile.into(),
            url_desktop: url_desktop.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_legacy_field_names() {
        let id = LinkId::new("promo").unwrap();
        let entry = LinkEntry::new(&id, "/uploads/promo.gif", "https://m.example.com", "");
        let json = serde_json::to_value(&entry).unwrap();

        assert_eq!(json["id"], "promo");
        assert_eq!(json["urlMobile"], "https://m.example.com");
        assert_eq!(json["urlDesktop"], "");
    }

    #[test]
    fn desktop_url_defaults_to_empty() {
        let entry: LinkEntry = serde_json::from_str(
            r#"{"id":"promo","image":"/uploads/p.gif","urlMobile":"https://m.example.com"}"#,
        )
        .unwrap();
        assert_eq!(entry.url_desktop, "");
    }
}
