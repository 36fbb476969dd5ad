//! Archive type inference from artifact URLs.

use crate::models::download::ArchiveType;

/// Suffixes in match order. Anything unmatched is served as zip.
const SUFFIXES: &[(&str, ArchiveType)] = &[
    (".zip", ArchiveType::Zip),
    (".tar.gz", ArchiveType::TarGz),
    (".tgz", ArchiveType::TarGz),
    (".tar.bz2", ArchiveType::TarBz2),
    (".tbz2", ArchiveType::TarBz2),
    (".tar.xz", ArchiveType::TarXz),
    (".txz", ArchiveType::TarXz),
];

/// Classify an artifact URL by its suffix. Never fails.
///
/// The query string and fragment are ignored, as is ASCII case.
pub fn classify(url: &str) -> ArchiveType {
    let path = url
        .split(['?', '#'])
        .next()
        .unwrap_or(url)
        .to_ascii_lowercase();

    SUFFIXES
        .iter()
        .find(|(suffix, _)| path.ends_with(suffix))
        .map(|(_, archive_type)| *archive_type)
        .unwrap_or(ArchiveType::Zip)
}
