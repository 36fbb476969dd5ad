//! Download descriptor returned by every successful resolution.

use serde::Serialize;

/// Archive format of a distributable artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ArchiveType {
    #[serde(rename = "zip")]
    Zip,
    #[serde(rename = "tar.gz")]
    TarGz,
    #[serde(rename = "tar.bz2")]
    TarBz2,
    #[serde(rename = "tar.xz")]
    TarXz,
}

impl ArchiveType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ArchiveType::Zip => "zip",
            ArchiveType::TarGz => "tar.gz",
            ArchiveType::TarBz2 => "tar.bz2",
            ArchiveType::TarXz => "tar.xz",
        }
    }
}

/// Where to redirect the client, plus integrity metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DownloadDescriptor {
    pub url: String,
    pub archive_type: ArchiveType,
    /// Uppercased algorithm name and digest, highest priority first.
    pub checksums: Vec<(String, String)>,
}

/// Whether `url` can be sent unchanged as a `Location` header value:
/// non-empty, visible ASCII only, no whitespace or control characters.
pub fn is_redirect_safe(url: &str) -> bool {
    !url.is_empty() && url.bytes().all(|b| b.is_ascii_graphic())
}

impl DownloadDescriptor {
    /// `(header name, value)` pairs for the checksums and archive type,
    /// using the `X-{prefix}-Checksum-{ALGO}` convention.
    pub fn metadata_headers(&self, prefix: &str) -> Vec<(String, String)> {
        let mut headers: Vec<(String, String)> = self
            .checksums
            .iter()
            .map(|(algo, digest)| (format!("X-{}-Checksum-{}", prefix, algo), digest.clone()))
            .collect();
        headers.push((
            format!("X-{}-ArchiveType", prefix),
            self.archive_type.as_str().to_string(),
        ));
        headers
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metadata_headers_keep_checksum_order() {
        let descriptor = DownloadDescriptor {
            url: "https://example.com/a.zip".into(),
            archive_type: ArchiveType::TarGz,
            checksums: vec![
                ("SHA256".into(), "aaa".into()),
                ("MD5".into(), "bbb".into()),
            ],
        };

        let headers = descriptor.metadata_headers("Broker");
        assert_eq!(
            headers,
            vec![
                ("X-Broker-Checksum-SHA256".to_string(), "aaa".to_string()),
                ("X-Broker-Checksum-MD5".to_string(), "bbb".to_string()),
                ("X-Broker-ArchiveType".to_string(), "tar.gz".to_string()),
            ]
        );
    }

    #[test]
    fn test_redirect_safe_urls() {
        assert!(is_redirect_safe("https://cdn.test/java/17/jdk.tar.gz"));
        assert!(is_redirect_safe("https://cdn.test/dl?id=42&fmt=raw"));
        for url in [
            "",
            "https://cdn.test/bad\nurl.zip",
            "https://cdn.test/with space.zip",
            "https://cdn.test/tab\t.zip",
            "https://cdn.test/caf\u{e9}.zip",
        ] {
            assert!(!is_redirect_safe(url), "{url:?}");
        }
    }

    #[test]
    fn test_metadata_headers_without_checksums() {
        let descriptor = DownloadDescriptor {
            url: "https://example.com/a.zip".into(),
            archive_type: ArchiveType::Zip,
            checksums: vec![],
        };
        assert_eq!(
            descriptor.metadata_headers("Broker"),
            vec![("X-Broker-ArchiveType".to_string(), "zip".to_string())]
        );
    }
}
