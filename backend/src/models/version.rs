//! Candidate version model.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A distributable artifact for one candidate version on one platform.
///
/// Deserialized straight from the `versions` collection; fields the broker
/// does not use (such as `_id`) are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionRecord {
    pub candidate: String,
    pub version: String,
    /// Platform storage identifier, e.g. `LINUX_64` or `UNIVERSAL`.
    pub platform: String,
    pub url: String,
    #[serde(default)]
    pub vendor: Option<String>,
    #[serde(default = "default_visible")]
    pub visible: bool,
    /// Algorithm name to hex digest.
    #[serde(default)]
    pub checksums: BTreeMap<String, String>,
}

fn default_visible() -> bool {
    true
}

impl VersionRecord {
    pub fn new(
        candidate: impl Into<String>,
        version: impl Into<String>,
        platform: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            candidate: candidate.into(),
            version: version.into(),
            platform: platform.into(),
            url: url.into(),
            vendor: None,
            visible: true,
            checksums: BTreeMap::new(),
        }
    }

    pub fn with_vendor(mut self, vendor: impl Into<String>) -> Self {
        self.vendor = Some(vendor.into());
        self
    }

    pub fn with_checksum(mut self, algorithm: impl Into<String>, digest: impl Into<String>) -> Self {
        self.checksums.insert(algorithm.into(), digest.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_applies_defaults() {
        let record: VersionRecord = serde_json::from_value(serde_json::json!({
            "_id": "abc",
            "candidate": "java",
            "version": "17.0.2-tem",
            "platform": "LINUX_64",
            "url": "https://example.com/java.tar.gz"
        }))
        .unwrap();

        assert!(record.visible);
        assert!(record.vendor.is_none());
        assert!(record.checksums.is_empty());
    }

    #[test]
    fn test_deserialize_full_document() {
        let record: VersionRecord = serde_json::from_value(serde_json::json!({
            "candidate": "java",
            "version": "17.0.2-tem",
            "platform": "MAC_ARM64",
            "url": "https://example.com/java.tar.gz",
            "vendor": "tem",
            "visible": false,
            "checksums": { "SHA-256": "abc123", "MD5": "def456" }
        }))
        .unwrap();

        assert_eq!(record.vendor.as_deref(), Some("tem"));
        assert!(!record.visible);
        assert_eq!(record.checksums.len(), 2);
        assert_eq!(record.checksums["SHA-256"], "abc123");
    }
}
