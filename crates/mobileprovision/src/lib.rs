//! Parsing and classification of Apple provisioning profiles.
//!
//! A provisioning profile is a property list, either bare (binary encoding) or
//! wrapped in a CMS signed container (XML encoding). This crate extracts the
//! plist, decodes it, and derives what signing tools need from it: the
//! distribution type, enabled capabilities, bundle and team identifiers, and
//! the embedded developer certificates.
//!
//! # Modules
//!
//! - [`container`] - locate the plist inside raw profile bytes
//! - [`property_list`] - decode binary or XML plists
//! - [`crypto`] - developer certificates and signed container verification
//! - [`profile`] - the profile model, classification and capability table
//!
//! # Examples
//!
//! ```no_run
//! use mobileprovision::{CmsVerifier, ProvisioningProfile};
//!
//! let profile = ProvisioningProfile::open_verified("profile.mobileprovision", &CmsVerifier)?;
//! println!("{:?}: {:?}", profile.bundle_id()?, profile.enabled_capabilities()?);
//! # Ok::<(), mobileprovision::Error>(())
//! ```

pub mod container;
pub mod crypto;
pub mod error;
pub mod profile;
pub mod property_list;

pub use crypto::{CmsVerifier, ContainerDecoder, DeveloperCertificate};
pub use error::Error;
pub use profile::{Platform, ProfileType, ProvisioningProfile};

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;
