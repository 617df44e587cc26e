//! The provisioning profile model.
//!
//! [`ProvisioningProfile`] reads a `.mobileprovision` (or macOS
//! `.provisionprofile`) file once, decodes its plist and exposes typed
//! accessors plus the derived classification, capabilities and identifiers.
//!
//! # Empty profiles
//!
//! A profile whose file is missing or unreadable, or whose container or plist
//! cannot be decoded, is *empty*. Every accessor on an empty profile returns
//! an absent value (`None`, an empty `Vec`, or `Ok(None)`) rather than an
//! error, so callers can probe a path and check [`ProvisioningProfile::is_empty`].
//!
//! # Examples
//!
//! ```no_run
//! use mobileprovision::ProvisioningProfile;
//!
//! let profile = ProvisioningProfile::open("embedded.mobileprovision");
//! if profile.is_empty() {
//!     eprintln!("not a provisioning profile");
//! } else {
//!     println!("{:?} {:?}", profile.name(), profile.profile_type()?);
//!     for cert in profile.developer_certificates()? {
//!         println!("{} SHA-1: {}", cert.common_name()?, cert.fingerprint());
//!     }
//! }
//! # Ok::<(), mobileprovision::Error>(())
//! ```

pub mod capabilities;
pub mod classify;

pub use capabilities::{capabilities_for, capability_name};
pub use classify::{classify, Platform, ProfileType, Signals};

use crate::container::unwrap_plist;
use crate::crypto::{ContainerDecoder, DeveloperCertificate};
use crate::property_list::{self, data_array, date, dictionary, first_string, string, string_array};
use crate::{Error, Result};
use chrono::{DateTime, Utc};
use log::{debug, warn};
use plist::{Dictionary, Value};
use std::fs;
use std::path::{Path, PathBuf};

/// A decoded provisioning profile, or the empty profile if loading failed.
#[derive(Clone, Debug)]
pub struct ProvisioningProfile {
    path: PathBuf,
    plist: Option<Dictionary>,
}

impl ProvisioningProfile {
    /// Load a profile from `path` without verifying its signature.
    ///
    /// Signed containers are unwrapped structurally. Any read or decode
    /// failure yields an empty profile.
    pub fn open(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();

        let plist = match fs::read(&path).map_err(Error::from).and_then(|d| Self::decode(&d)) {
            Ok(dict) => Some(dict),
            Err(e) => {
                debug!("{}: loading as empty profile: {}", path.display(), e);
                None
            }
        };

        Self { path, plist }
    }

    /// Load a profile from `path`, passing the file through `decoder` first.
    ///
    /// A missing file or an undecodable plist still yields an empty profile.
    ///
    /// # Errors
    ///
    /// Returns the decoder's error, normally [`Error::SignatureVerification`],
    /// if it rejects the container.
    pub fn open_verified<D>(path: impl AsRef<Path>, decoder: &D) -> Result<Self>
    where
        D: ContainerDecoder + ?Sized,
    {
        let path = path.as_ref().to_path_buf();

        let data = match fs::read(&path) {
            Ok(data) => data,
            Err(e) => {
                debug!("{}: loading as empty profile: {}", path.display(), e);
                return Ok(Self { path, plist: None });
            }
        };

        let inner = decoder.decode(&data)?;

        let plist = match Self::decode(&inner) {
            Ok(dict) => Some(dict),
            Err(e) if e.is_absorbed_on_load() => {
                debug!("{}: loading as empty profile: {}", path.display(), e);
                None
            }
            Err(e) => return Err(e),
        };

        Ok(Self { path, plist })
    }

    /// Decode profile bytes held in memory.
    ///
    /// Unlike [`Self::open`] this does not absorb failures.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedContainer`] or [`Error::PlistFormat`].
    pub fn parse(data: &[u8]) -> Result<Self> {
        Ok(Self {
            path: PathBuf::new(),
            plist: Some(Self::decode(data)?),
        })
    }

    fn decode(data: &[u8]) -> Result<Dictionary> {
        property_list::decode(unwrap_plist(data)?)
    }

    /// Verify and unwrap the source file and write the inner plist to `output`.
    ///
    /// # Errors
    ///
    /// Fails if the source cannot be read, the decoder rejects it, or
    /// `output` cannot be written.
    pub fn decode_to<D>(&self, decoder: &D, output: impl AsRef<Path>) -> Result<()>
    where
        D: ContainerDecoder + ?Sized,
    {
        let data = fs::read(&self.path)?;
        let inner = decoder.decode(&data)?;
        fs::write(output.as_ref(), inner)?;
        Ok(())
    }

    /// Path the profile was loaded from. Empty for [`Self::parse`].
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// True if loading failed.
    pub fn is_empty(&self) -> bool {
        self.plist.is_none()
    }

    /// The whole decoded dictionary.
    pub fn raw(&self) -> Option<&Dictionary> {
        self.plist.as_ref()
    }

    /// Profile name as shown in the developer portal.
    pub fn name(&self) -> Option<&str> {
        string(self.plist.as_ref()?, "Name")
    }

    /// Name of the App ID the profile was issued for.
    pub fn app_id_name(&self) -> Option<&str> {
        string(self.plist.as_ref()?, "AppIDName")
    }

    /// Profile UUID.
    pub fn uuid(&self) -> Option<&str> {
        string(self.plist.as_ref()?, "UUID")
    }

    /// Name of the issuing team.
    pub fn team_name(&self) -> Option<&str> {
        string(self.plist.as_ref()?, "TeamName")
    }

    /// Every `TeamIdentifier` entry.
    pub fn team_identifier(&self) -> Option<Vec<String>> {
        string_array(self.plist.as_ref()?, "TeamIdentifier")
    }

    /// When the profile was issued.
    pub fn creation_date(&self) -> Option<DateTime<Utc>> {
        date(self.plist.as_ref()?, "CreationDate")
    }

    /// When the profile stops being valid.
    pub fn expiration_date(&self) -> Option<DateTime<Utc>> {
        date(self.plist.as_ref()?, "ExpirationDate")
    }

    /// Every entry of the `Platform` list, normalized.
    pub fn platforms(&self) -> Option<Vec<Platform>> {
        let raw = string_array(self.plist.as_ref()?, "Platform")?;
        Some(raw.iter().map(|p| Platform::parse(p)).collect())
    }

    /// The first platform; the one classification uses.
    pub fn platform(&self) -> Option<Platform> {
        first_string(self.plist.as_ref()?, "Platform").map(Platform::parse)
    }

    /// Provisioned device UDIDs, if the profile carries a device list.
    pub fn devices(&self) -> Option<Vec<String>> {
        string_array(self.plist.as_ref()?, "ProvisionedDevices")
    }

    /// The `Entitlements` dictionary.
    pub fn entitlements(&self) -> Option<&Dictionary> {
        dictionary(self.plist.as_ref()?, "Entitlements")
    }

    /// Decode every embedded developer certificate, in profile order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CertificateDecode`] for the first blob that is not a
    /// valid certificate.
    pub fn developer_certificates(&self) -> Result<Vec<DeveloperCertificate>> {
        let Some(blobs) = self
            .plist
            .as_ref()
            .and_then(|d| data_array(d, "DeveloperCertificates"))
        else {
            return Ok(Vec::new());
        };

        blobs.into_iter().map(DeveloperCertificate::from_der).collect()
    }

    fn signals(plist: &Dictionary) -> Signals {
        let entitlements = dictionary(plist, "Entitlements");

        Signals {
            get_task_allow: entitlements.is_some_and(|e| {
                matches!(e.get("get-task-allow"), Some(Value::Boolean(true)))
            }),
            beta_reports_active: entitlements.is_some_and(|e| e.contains_key("beta-reports-active")),
            has_devices: plist.contains_key("ProvisionedDevices"),
        }
    }

    /// Distribution type of the profile, `None` for an empty profile.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedPlatform`] for platforms other than iOS and
    /// macOS, and [`Error::MissingField`] if the profile lists no platform.
    pub fn profile_type(&self) -> Result<Option<ProfileType>> {
        let Some(plist) = &self.plist else {
            return Ok(None);
        };

        let platform = self
            .platform()
            .ok_or_else(|| Error::MissingField("Platform".into()))?;

        classify(&platform, Self::signals(plist)).map(Some)
    }

    /// Whether this is a development profile.
    pub fn is_development(&self) -> Result<bool> {
        Ok(self.profile_type()? == Some(ProfileType::Development))
    }

    /// Whether this is an App Store profile.
    pub fn is_appstore(&self) -> Result<bool> {
        Ok(self.profile_type()? == Some(ProfileType::AppStore))
    }

    /// Whether this is an ad hoc profile.
    pub fn is_adhoc(&self) -> Result<bool> {
        Ok(self.profile_type()? == Some(ProfileType::AdHoc))
    }

    /// Whether this is an enterprise (in-house) profile.
    pub fn is_enterprise(&self) -> Result<bool> {
        Ok(self.profile_type()? == Some(ProfileType::Enterprise))
    }

    /// Alias of [`Self::is_enterprise`].
    pub fn is_inhouse(&self) -> Result<bool> {
        self.is_enterprise()
    }

    /// Capability names enabled by this profile.
    ///
    /// # Errors
    ///
    /// Fails like [`Self::profile_type`].
    pub fn enabled_capabilities(&self) -> Result<Vec<&'static str>> {
        if self.is_empty() {
            return Ok(Vec::new());
        }

        let kind = self.profile_type()?;
        let empty = Dictionary::new();
        let entitlements = self.entitlements().unwrap_or(&empty);

        Ok(capabilities_for(entitlements, kind))
    }

    /// Bundle identifier: `application-identifier` without its team prefix.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingField`] if a loaded profile has no
    /// `application-identifier` entitlement.
    pub fn bundle_id(&self) -> Result<Option<String>> {
        let Some(plist) = &self.plist else {
            return Ok(None);
        };

        let app_id = self
            .entitlements()
            .and_then(|e| string(e, "application-identifier"))
            .ok_or_else(|| Error::MissingField("Entitlements.application-identifier".into()))?;

        let team_stripped = first_string(plist, "TeamIdentifier")
            .and_then(|team| app_id.strip_prefix(team))
            .and_then(|rest| rest.strip_prefix('.'));

        if let Some(bundle_id) = team_stripped {
            return Ok(Some(bundle_id.to_string()));
        }

        // Legacy app ID prefixes differ from the team ID.
        match app_id.split_once('.') {
            Some((prefix, bundle_id)) => {
                debug!("application-identifier prefix {} is not the team ID", prefix);
                Ok(Some(bundle_id.to_string()))
            }
            None => {
                warn!("application-identifier {} has no prefix", app_id);
                Ok(None)
            }
        }
    }

    /// App ID prefix: the segment of `application-identifier` before the first dot.
    ///
    /// Falls back to the first `ApplicationIdentifierPrefix` entitlement entry,
    /// logging a warning.
    pub fn app_identifier_prefix(&self) -> Option<String> {
        if self.is_empty() {
            return None;
        }

        let entitlements = self.entitlements();

        if let Some(id) = entitlements.and_then(|e| string(e, "application-identifier")) {
            return id.split('.').next().map(String::from);
        }

        match entitlements.and_then(|e| first_string(e, "ApplicationIdentifierPrefix")) {
            Some(prefix) => {
                warn!("application-identifier entitlement not found, using ApplicationIdentifierPrefix");
                Some(prefix.to_string())
            }
            None => {
                warn!("Can't extract app identifier prefix");
                None
            }
        }
    }

    /// Team ID from the `com.apple.developer.team-identifier` entitlement.
    ///
    /// Falls back to the first `TeamIdentifier` entry, logging a warning.
    pub fn team_identifier_prefix(&self) -> Option<String> {
        let plist = self.plist.as_ref()?;

        if let Some(id) = self
            .entitlements()
            .and_then(|e| string(e, "com.apple.developer.team-identifier"))
        {
            return Some(id.to_string());
        }

        match first_string(plist, "TeamIdentifier") {
            Some(team) => {
                warn!("team-identifier entitlement not found, using TeamIdentifier");
                Some(team.to_string())
            }
            None => {
                warn!("Can't extract team identifier prefix");
                None
            }
        }
    }
}

impl From<Dictionary> for ProvisioningProfile {
    fn from(plist: Dictionary) -> Self {
        Self {
            path: PathBuf::new(),
            plist: Some(plist),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(platform: &str, entitlements: &[(&str, Value)], devices: Option<Vec<&str>>) -> ProvisioningProfile {
        let mut ents = Dictionary::new();
        for (key, value) in entitlements {
            ents.insert(key.to_string(), value.clone());
        }

        let mut dict = Dictionary::new();
        dict.insert(
            "Platform".to_string(),
            Value::Array(vec![Value::String(platform.to_string())]),
        );
        dict.insert("Entitlements".to_string(), Value::Dictionary(ents));
        dict.insert(
            "TeamIdentifier".to_string(),
            Value::Array(vec![Value::String("ABCDE12345".to_string())]),
        );
        if let Some(devices) = devices {
            dict.insert(
                "ProvisionedDevices".to_string(),
                Value::Array(devices.into_iter().map(|d| Value::String(d.into())).collect()),
            );
        }

        ProvisioningProfile::from(dict)
    }

    #[test]
    fn test_ios_development() {
        let p = profile("iOS", &[("get-task-allow", Value::Boolean(true))], Some(vec!["udid"]));
        assert_eq!(p.profile_type().unwrap(), Some(ProfileType::Development));
        assert!(p.is_development().unwrap());
        assert!(!p.is_adhoc().unwrap());
    }

    #[test]
    fn test_ios_appstore_beats_adhoc() {
        let p = profile(
            "iOS",
            &[
                ("get-task-allow", Value::Boolean(false)),
                ("beta-reports-active", Value::Boolean(true)),
            ],
            Some(vec!["udid"]),
        );
        assert_eq!(p.profile_type().unwrap(), Some(ProfileType::AppStore));
        assert!(p.is_appstore().unwrap());
        assert!(!p.is_adhoc().unwrap());
        assert!(!p.is_enterprise().unwrap());
    }

    #[test]
    fn test_get_task_allow_must_be_boolean_true() {
        let p = profile(
            "iOS",
            &[("get-task-allow", Value::String("true".into()))],
            None,
        );
        assert_eq!(p.profile_type().unwrap(), Some(ProfileType::Enterprise));
        assert!(p.is_inhouse().unwrap());
    }

    #[test]
    fn test_empty_device_list_is_present() {
        let p = profile("iOS", &[], Some(vec![]));
        assert_eq!(p.profile_type().unwrap(), Some(ProfileType::AdHoc));
        assert_eq!(p.devices(), Some(vec![]));
    }

    #[test]
    fn test_macos() {
        let dev = profile("OSX", &[], Some(vec!["udid"]));
        assert_eq!(dev.platform(), Some(Platform::MacOs));
        assert_eq!(dev.profile_type().unwrap(), Some(ProfileType::Development));

        let store = profile("macOS", &[("beta-reports-active", Value::Boolean(true))], None);
        assert_eq!(store.profile_type().unwrap(), Some(ProfileType::AppStore));
        assert!(!store.is_adhoc().unwrap());
        assert!(!store.is_enterprise().unwrap());
    }

    #[test]
    fn test_unsupported_platform_surfaces() {
        let p = profile("tvOS", &[], None);
        assert!(matches!(p.profile_type(), Err(Error::UnsupportedPlatform(_))));
        assert!(p.is_development().is_err());
        assert!(p.enabled_capabilities().is_err());
    }

    #[test]
    fn test_missing_platform() {
        let p = ProvisioningProfile::from(Dictionary::new());
        assert!(matches!(p.profile_type(), Err(Error::MissingField(_))));
    }

    #[test]
    fn test_bundle_id() {
        let p = profile(
            "iOS",
            &[(
                "application-identifier",
                Value::String("ABCDE12345.com.example.app".into()),
            )],
            None,
        );
        assert_eq!(p.bundle_id().unwrap().as_deref(), Some("com.example.app"));
        assert_eq!(p.app_identifier_prefix().as_deref(), Some("ABCDE12345"));
    }

    #[test]
    fn test_bundle_id_with_legacy_prefix() {
        let p = profile(
            "iOS",
            &[(
                "application-identifier",
                Value::String("ZZZZZ99999.com.example.legacy".into()),
            )],
            None,
        );
        assert_eq!(p.bundle_id().unwrap().as_deref(), Some("com.example.legacy"));
        assert_eq!(p.app_identifier_prefix().as_deref(), Some("ZZZZZ99999"));
    }

    #[test]
    fn test_bundle_id_missing() {
        let p = profile("iOS", &[], None);
        assert!(matches!(p.bundle_id(), Err(Error::MissingField(_))));
    }

    #[test]
    fn test_identifier_prefix_fallbacks() {
        let p = profile(
            "iOS",
            &[(
                "ApplicationIdentifierPrefix",
                Value::Array(vec![Value::String("PREFIX1234".into())]),
            )],
            None,
        );
        assert_eq!(p.app_identifier_prefix().as_deref(), Some("PREFIX1234"));
        assert_eq!(p.team_identifier_prefix().as_deref(), Some("ABCDE12345"));

        let p = ProvisioningProfile::from(Dictionary::new());
        assert_eq!(p.app_identifier_prefix(), None);
        assert_eq!(p.team_identifier_prefix(), None);
    }

    #[test]
    fn test_team_identifier_prefix_prefers_entitlement() {
        let p = profile(
            "iOS",
            &[(
                "com.apple.developer.team-identifier",
                Value::String("TEAMENT123".into()),
            )],
            None,
        );
        assert_eq!(p.team_identifier_prefix().as_deref(), Some("TEAMENT123"));
    }

    #[test]
    fn test_capabilities_follow_classification() {
        let p = profile(
            "iOS",
            &[
                ("aps-environment", Value::String("production".into())),
                ("beta-reports-active", Value::Boolean(true)),
            ],
            None,
        );
        assert_eq!(
            p.enabled_capabilities().unwrap(),
            vec!["In-App Purchase", "GameKit", "Push Notifications"]
        );
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(
            ProvisioningProfile::parse(b"garbage"),
            Err(Error::MalformedContainer(_))
        ));
    }
}
