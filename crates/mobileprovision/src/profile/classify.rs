//! Platform normalization and distribution-type classification.

use crate::{Error, Result};
use std::fmt;

/// Platform a profile targets, normalized from the profile's `Platform` list.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Platform {
    Ios,
    MacOs,
    /// Any other value, lower-cased.
    Other(String),
}

impl Platform {
    /// Normalize a raw `Platform` entry.
    ///
    /// `OSX` maps to macOS; every other value is compared lower-cased.
    pub fn parse(raw: &str) -> Self {
        let normalized = if raw == "OSX" {
            "macos".to_string()
        } else {
            raw.to_lowercase()
        };

        match normalized.as_str() {
            "ios" => Platform::Ios,
            "macos" => Platform::MacOs,
            _ => Platform::Other(normalized),
        }
    }

    /// Lower-case platform name, `macos` for OSX.
    pub fn as_str(&self) -> &str {
        match self {
            Platform::Ios => "ios",
            Platform::MacOs => "macos",
            Platform::Other(s) => s,
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Distribution type of a provisioning profile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ProfileType {
    Development,
    AdHoc,
    AppStore,
    Enterprise,
}

impl ProfileType {
    /// Human-readable type name.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProfileType::Development => "Development",
            ProfileType::AdHoc => "Ad Hoc",
            ProfileType::AppStore => "AppStore",
            ProfileType::Enterprise => "Enterprise",
        }
    }

    /// Whether the distribution channel implies In-App Purchase and GameKit.
    pub fn is_distribution(&self) -> bool {
        matches!(self, ProfileType::AdHoc | ProfileType::AppStore)
    }
}

impl fmt::Display for ProfileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Profile facts the classifier reads.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Signals {
    /// `get-task-allow` is exactly `true`.
    pub get_task_allow: bool,
    /// Entitlements contain `beta-reports-active`, whatever its value.
    pub beta_reports_active: bool,
    /// `ProvisionedDevices` is present, even if empty.
    pub has_devices: bool,
}

/// Classify a profile.
///
/// Rules are evaluated in order and the first match wins. On iOS a profile
/// carrying both `beta-reports-active` and a device list is App Store.
/// macOS profiles are development when they list devices and App Store
/// otherwise; they are never ad hoc.
///
/// # Errors
///
/// Returns [`Error::UnsupportedPlatform`] for any platform but iOS and macOS.
pub fn classify(platform: &Platform, signals: Signals) -> Result<ProfileType> {
    let kind = match platform {
        Platform::Ios if signals.get_task_allow => ProfileType::Development,
        Platform::Ios if signals.beta_reports_active => ProfileType::AppStore,
        Platform::Ios if signals.has_devices => ProfileType::AdHoc,
        Platform::Ios => ProfileType::Enterprise,
        Platform::MacOs if signals.has_devices => ProfileType::Development,
        Platform::MacOs => ProfileType::AppStore,
        Platform::Other(p) => return Err(Error::UnsupportedPlatform(p.clone())),
    };

    Ok(kind)
}
