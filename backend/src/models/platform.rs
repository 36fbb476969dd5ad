//! Client platform registry.
//!
//! Every platform has three facets: the code clients send in the URL, the
//! identifier used as a key in the versions store, and the identifier written
//! to the audit trail.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

/// Rejected platform code.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid platform: {0}")]
pub struct InvalidPlatform(pub String);

/// Known client platforms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Platform {
    LinuxX32,
    LinuxX64,
    LinuxArm32Hf,
    LinuxArm32Sf,
    LinuxArm64,
    DarwinX64,
    DarwinArm64,
    WindowsX64,
    /// Unrecognised client architecture. Valid for the CLI bundle only.
    Exotic,
    /// Storage key for platform-agnostic artifacts; not a real client.
    Universal,
}

impl Platform {
    pub const ALL: [Platform; 10] = [
        Platform::LinuxX32,
        Platform::LinuxX64,
        Platform::LinuxArm32Hf,
        Platform::LinuxArm32Sf,
        Platform::LinuxArm64,
        Platform::DarwinX64,
        Platform::DarwinArm64,
        Platform::WindowsX64,
        Platform::Exotic,
        Platform::Universal,
    ];

    /// Case-insensitive lookup of a client-supplied platform code.
    ///
    /// `universal` is a storage key only and is rejected like any unknown code.
    pub fn normalize(code: &str) -> Result<Self, InvalidPlatform> {
        Self::ALL
            .iter()
            .copied()
            .filter(|p| *p != Platform::Universal)
            .find(|p| p.code().eq_ignore_ascii_case(code))
            .ok_or_else(|| InvalidPlatform(code.to_string()))
    }

    /// Reverse lookup from a versions-store platform identifier.
    pub fn from_storage_id(id: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|p| p.storage_id() == id)
    }

    pub fn code(&self) -> &'static str {
        match self {
            Platform::LinuxX32 => "linuxx32",
            Platform::LinuxX64 => "linuxx64",
            Platform::LinuxArm32Hf => "linuxarm32hf",
            Platform::LinuxArm32Sf => "linuxarm32sf",
            Platform::LinuxArm64 => "linuxarm64",
            Platform::DarwinX64 => "darwinx64",
            Platform::DarwinArm64 => "darwinarm64",
            Platform::WindowsX64 => "windowsx64",
            Platform::Exotic => "exotic",
            Platform::Universal => "universal",
        }
    }

    pub fn storage_id(&self) -> &'static str {
        match self {
            Platform::LinuxX32 => "LINUX_32",
            Platform::LinuxX64 => "LINUX_64",
            Platform::LinuxArm32Hf => "LINUX_ARM32HF",
            Platform::LinuxArm32Sf => "LINUX_ARM32SF",
            Platform::LinuxArm64 => "LINUX_ARM64",
            Platform::DarwinX64 => "MAC_OSX",
            Platform::DarwinArm64 => "MAC_ARM64",
            Platform::WindowsX64 => "WINDOWS_64",
            Platform::Exotic => "EXOTIC",
            Platform::Universal => "UNIVERSAL",
        }
    }

    pub fn audit_id(&self) -> &'static str {
        match self {
            Platform::LinuxX32 => "LINUX_X32",
            Platform::LinuxX64 => "LINUX_X64",
            Platform::LinuxArm32Hf => "LINUX_ARM32HF",
            Platform::LinuxArm32Sf => "LINUX_ARM32SF",
            Platform::LinuxArm64 => "LINUX_ARM64",
            Platform::DarwinX64 => "DARWIN_X64",
            Platform::DarwinArm64 => "DARWIN_ARM64",
            Platform::WindowsX64 => "WINDOWS_X64",
            Platform::Exotic => "EXOTIC",
            Platform::Universal => "UNIVERSAL",
        }
    }

    /// Rust target triple of the native helper binary, if one is built for
    /// this platform.
    pub fn native_target(&self) -> Option<&'static str> {
        match self {
            Platform::LinuxX64 => Some("x86_64-unknown-linux-gnu"),
            Platform::LinuxArm64 => Some("aarch64-unknown-linux-gnu"),
            Platform::DarwinX64 => Some("x86_64-apple-darwin"),
            Platform::DarwinArm64 => Some("aarch64-apple-darwin"),
            Platform::WindowsX64 => Some("x86_64-pc-windows-msvc"),
            _ => None,
        }
    }
}

impl FromStr for Platform {
    type Err = InvalidPlatform;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::normalize(s)
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
