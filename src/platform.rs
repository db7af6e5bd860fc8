//! Target platforms and per-platform native library names
//!
//! A [`NameContainer`] maps each target platform to the physical shared
//! library file name the generated bindings will load. Names are never
//! guessed from a `lib<name>.so`-style convention: native library names are
//! irregular (version suffixes, ABI tags), and a fabricated default would
//! surface as a load failure at run time, far from the config that caused it.

use serde::{Deserialize, Serialize};

use crate::error::{ForgeError, Result};

/// The platform keys the conversion engine may query for a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Platform {
    Android,
    #[serde(rename = "IOS")]
    Ios,
    Linux,
    #[serde(rename = "MacOS")]
    MacOs,
    Windows64,
    Windows86,
}

impl Platform {
    /// Every supported platform, in wire order.
    pub const ALL: [Platform; 6] = [
        Platform::Android,
        Platform::Ios,
        Platform::Linux,
        Platform::MacOs,
        Platform::Windows64,
        Platform::Windows86,
    ];
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Platform::Android => write!(f, "Android"),
            Platform::Ios => write!(f, "IOS"),
            Platform::Linux => write!(f, "Linux"),
            Platform::MacOs => write!(f, "MacOS"),
            Platform::Windows64 => write!(f, "Windows64"),
            Platform::Windows86 => write!(f, "Windows86"),
        }
    }
}

/// Per-platform table of physical native library file names for one logical
/// library, plus the name of the generated container type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct NameContainer {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub class_name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub android: Option<String>,

    #[serde(rename = "IOS", skip_serializing_if = "Option::is_none")]
    pub ios: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub linux: Option<String>,

    #[serde(rename = "MacOS", skip_serializing_if = "Option::is_none")]
    pub mac_os: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub windows64: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub windows86: Option<String>,
}

impl NameContainer {
    /// Resolve the physical library file name for one platform.
    ///
    /// Returns exactly the stored string, or `MissingPlatformNameError` if
    /// the platform has no entry. Never fabricates a default.
    pub fn resolve(&self, platform: Platform) -> Result<&str> {
        let entry = match platform {
            Platform::Android => &self.android,
            Platform::Ios => &self.ios,
            Platform::Linux => &self.linux,
            Platform::MacOs => &self.mac_os,
            Platform::Windows64 => &self.windows64,
            Platform::Windows86 => &self.windows86,
        };

        entry
            .as_deref()
            .ok_or_else(|| ForgeError::MissingPlatformName {
                class_name: self.class_name.clone(),
                platform,
            })
    }

    /// Check that every targeted platform has an entry. Called before
    /// dispatch so a missing name fails the run instead of the generated
    /// bindings failing to load later.
    pub fn validate(&self, platforms: &[Platform]) -> Result<()> {
        for &platform in platforms {
            self.resolve(platform)?;
        }
        Ok(())
    }
}
