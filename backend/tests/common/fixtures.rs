//! Version records used across router tests

#![allow(dead_code)]

use download_broker_backend::models::version::VersionRecord;

pub const JAVA_LINUX_URL: &str = "https://cdn.test/java/17.0.2-tem/linux-x64.tar.gz";
pub const JAVA_MAC_URL: &str = "https://cdn.test/java/17.0.2-tem/mac-arm64.tar.gz";
pub const GRADLE_URL: &str = "https://cdn.test/gradle/8.5/gradle-8.5-bin.zip";

/// Temurin 17 built for Linux x64 with three checksums.
pub fn java_linux() -> VersionRecord {
    VersionRecord::new("java", "17.0.2-tem", "LINUX_64", JAVA_LINUX_URL)
        .with_vendor("tem")
        .with_checksum("md5", "d41d8cd98f00b204e9800998ecf8427e")
        .with_checksum("sha-1", "da39a3ee5e6b4b0d3255bfef95601890afd80709")
        .with_checksum(
            "sha-256",
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855",
        )
}

/// Temurin 17 built only for Apple silicon.
pub fn java_mac_only() -> VersionRecord {
    VersionRecord::new("java", "17.0.2-tem", "MAC_ARM64", JAVA_MAC_URL).with_vendor("tem")
}

/// Gradle ships one universal archive.
pub fn gradle_universal() -> VersionRecord {
    VersionRecord::new("gradle", "8.5", "UNIVERSAL", GRADLE_URL)
        .with_checksum("sha-256", "9d926787066a081739e8200858338b4a69e837c3a821a33aca9db09dd4a41026")
}
