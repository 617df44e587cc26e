//! Error types for provisioning profile parsing.
//!
//! This module defines the [`enum@Error`] enum covering every failure a
//! profile load or inspection can raise, from reading the file to
//! classifying the decoded profile.
//!
//! Not every variant reaches callers of [`crate::ProvisioningProfile`]:
//! read failures and container or plist decode failures collapse the profile
//! into its empty state instead. Certificate decode failures, unsupported
//! platforms and signature verification failures always surface.
//!
//! # See Also
//!
//! - [`crate::Result`] - Convenience type alias using this error

use thiserror::Error;

/// Error type for provisioning profile operations.
///
/// # Examples
///
/// ```no_run
/// use mobileprovision::{Error, ProvisioningProfile};
///
/// let profile = ProvisioningProfile::open("profile.mobileprovision");
/// match profile.profile_type() {
///     Ok(Some(kind)) => println!("Type: {kind}"),
///     Ok(None) => eprintln!("Profile could not be loaded"),
///     Err(Error::UnsupportedPlatform(p)) => eprintln!("Unknown platform: {p}"),
///     Err(e) => eprintln!("Other error: {e}"),
/// }
/// ```
#[derive(Debug, Error)]
pub enum Error {
    /// The profile file does not exist or could not be read.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The property list bytes are structurally invalid.
    ///
    /// Covers truncated binary plists, unclosed XML elements, unknown binary
    /// object markers and a top-level object that is not a dictionary.
    #[error("Plist error: {0}")]
    PlistFormat(String),

    /// The signed container does not wrap a recognizable XML plist.
    #[error("Malformed container: {0}")]
    MalformedContainer(String),

    /// A developer certificate blob is not a well-formed DER X.509 certificate.
    #[error("Invalid certificate: {0}")]
    CertificateDecode(String),

    /// A required field is absent.
    #[error("Missing field: {0}")]
    MissingField(String),

    /// The profile targets a platform the classifier does not know.
    #[error("Unsupported platform: {0}")]
    UnsupportedPlatform(String),

    /// The signed container was rejected by the signature verifier.
    #[error("Signature verification failed: {0}")]
    SignatureVerification(String),
}

impl From<plist::Error> for Error {
    fn from(e: plist::Error) -> Self {
        Error::PlistFormat(e.to_string())
    }
}

impl Error {
    /// Whether a failure while loading a profile collapses it to the empty state.
    pub(crate) fn is_absorbed_on_load(&self) -> bool {
        matches!(
            self,
            Error::Io(_) | Error::PlistFormat(_) | Error::MalformedContainer(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_failures_are_absorbed() {
        let io = Error::Io(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        assert!(io.is_absorbed_on_load());
        assert!(Error::PlistFormat("bad".into()).is_absorbed_on_load());
        assert!(Error::MalformedContainer("bad".into()).is_absorbed_on_load());
    }

    #[test]
    fn test_caller_decisions_are_not_absorbed() {
        assert!(!Error::CertificateDecode("bad".into()).is_absorbed_on_load());
        assert!(!Error::UnsupportedPlatform("tvos".into()).is_absorbed_on_load());
        assert!(!Error::SignatureVerification("bad".into()).is_absorbed_on_load());
        assert!(!Error::MissingField("Name".into()).is_absorbed_on_load());
    }

    #[test]
    fn test_plist_error_converts_to_format_error() {
        let err = plist::Value::from_reader(std::io::Cursor::new(b"bplist00".to_vec()))
            .unwrap_err();
        assert!(matches!(Error::from(err), Error::PlistFormat(_)));
    }
}
