//! Developer certificates embedded in provisioning profiles.
//!
//! Every entry of a profile's `DeveloperCertificates` array is a DER encoded
//! X.509 certificate. [`DeveloperCertificate`] decodes one blob and exposes
//! the fields signing tools match on: the subject common name, the validity
//! window and a SHA-1 fingerprint of the encoding.
//!
//! # Examples
//!
//! ```no_run
//! use mobileprovision::crypto::DeveloperCertificate;
//!
//! let der = std::fs::read("developer.cer")?;
//! let cert = DeveloperCertificate::from_der(der)?;
//! println!("{} ({})", cert.common_name()?, cert.fingerprint());
//! # Ok::<(), mobileprovision::Error>(())
//! ```

use crate::{Error, Result};
use chrono::{DateTime, Utc};
use sha1::{Digest, Sha1};
use std::fmt;
use x509_certificate::CapturedX509Certificate;

/// A decoded developer certificate.
///
/// Owns its encoded bytes; decoding the same bytes twice yields equal values.
#[derive(Clone)]
pub struct DeveloperCertificate {
    certificate: CapturedX509Certificate,
}

impl DeveloperCertificate {
    /// Decode a DER encoded X.509 certificate.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CertificateDecode`] if the bytes are not a well-formed
    /// certificate.
    pub fn from_der(data: impl Into<Vec<u8>>) -> Result<Self> {
        let certificate = CapturedX509Certificate::from_der(data)
            .map_err(|e| Error::CertificateDecode(format!("Failed to parse certificate DER: {}", e)))?;

        Ok(Self { certificate })
    }

    /// Subject common name.
    ///
    /// The subject's relative distinguished names are searched in order and
    /// the first `CN` attribute is returned as UTF-8 text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingField`] if the subject has no `CN` attribute.
    pub fn common_name(&self) -> Result<String> {
        let atav = self
            .certificate
            .subject_name()
            .iter_common_name()
            .next()
            .ok_or_else(|| Error::MissingField("certificate subject CN".into()))?;

        atav.to_string().map_err(|e| {
            Error::CertificateDecode(format!("Subject CN is not a text string: {}", e))
        })
    }

    /// Start of the validity window.
    pub fn not_before(&self) -> DateTime<Utc> {
        self.certificate.validity_not_before()
    }

    /// End of the validity window.
    pub fn not_after(&self) -> DateTime<Utc> {
        self.certificate.validity_not_after()
    }

    /// Alias of [`Self::not_before`].
    pub fn created_date(&self) -> DateTime<Utc> {
        self.not_before()
    }

    /// Alias of [`Self::not_after`].
    pub fn expired_date(&self) -> DateTime<Utc> {
        self.not_after()
    }

    /// Lowercase hex SHA-1 over the DER encoding.
    ///
    /// This is the identity `codesign` and keychain tools use to select a
    /// signing certificate. It is an identifier, not an integrity check.
    pub fn fingerprint(&self) -> String {
        hex::encode(Sha1::digest(self.der()))
    }

    /// The encoded certificate.
    pub fn der(&self) -> &[u8] {
        self.certificate.constructed_data()
    }
}

impl fmt::Debug for DeveloperCertificate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeveloperCertificate")
            .field("common_name", &self.common_name().ok())
            .field("not_before", &self.not_before())
            .field("not_after", &self.not_after())
            .field("fingerprint", &self.fingerprint())
            .finish()
    }
}

impl PartialEq for DeveloperCertificate {
    fn eq(&self, other: &Self) -> bool {
        self.der() == other.der()
    }
}

impl Eq for DeveloperCertificate {}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const DEV_CERT: &[u8] = include_bytes!("../../tests/fixtures/dev_cert.der");
    const DIST_CERT: &[u8] = include_bytes!("../../tests/fixtures/dist_cert.der");
    const UTF8_CERT: &[u8] = include_bytes!("../../tests/fixtures/utf8_cert.der");
    const NO_CN_CERT: &[u8] = include_bytes!("../../tests/fixtures/no_cn_cert.der");

    #[test]
    fn test_common_name() {
        let cert = DeveloperCertificate::from_der(DEV_CERT).unwrap();
        assert_eq!(
            cert.common_name().unwrap(),
            "iPhone Developer: Jane Appleseed (ABCDE12345)"
        );
    }

    #[test]
    fn test_common_name_not_first_rdn_and_non_ascii() {
        let cert = DeveloperCertificate::from_der(UTF8_CERT).unwrap();
        assert_eq!(
            cert.common_name().unwrap(),
            "Apple Development: Zoë Ångström (XYZ9876543)"
        );
    }

    #[test]
    fn test_missing_common_name() {
        let cert = DeveloperCertificate::from_der(NO_CN_CERT).unwrap();
        assert!(matches!(cert.common_name(), Err(Error::MissingField(_))));
    }

    #[test]
    fn test_validity_window() {
        let cert = DeveloperCertificate::from_der(DEV_CERT).unwrap();
        assert_eq!(
            cert.not_before(),
            Utc.with_ymd_and_hms(2024, 1, 10, 0, 0, 0).unwrap()
        );
        assert_eq!(
            cert.not_after(),
            Utc.with_ymd_and_hms(2025, 1, 9, 23, 59, 59).unwrap()
        );
        assert_eq!(cert.created_date(), cert.not_before());
        assert_eq!(cert.expired_date(), cert.not_after());
    }

    #[test]
    fn test_fingerprint() {
        let cert = DeveloperCertificate::from_der(DEV_CERT).unwrap();
        assert_eq!(
            cert.fingerprint(),
            "f51f209aa14ac26486f3dd15f12913e80e595b6b"
        );

        let again = DeveloperCertificate::from_der(DEV_CERT).unwrap();
        assert_eq!(cert.fingerprint(), again.fingerprint());
        assert_eq!(cert, again);

        let other = DeveloperCertificate::from_der(DIST_CERT).unwrap();
        assert_eq!(
            other.fingerprint(),
            "730fe5eaef65311097d98b7165a238289bcca596"
        );
        assert_ne!(cert.fingerprint(), other.fingerprint());
    }

    #[test]
    fn test_der_is_preserved() {
        let cert = DeveloperCertificate::from_der(DEV_CERT).unwrap();
        assert_eq!(cert.der(), DEV_CERT);
    }

    #[test]
    fn test_invalid_der() {
        assert!(matches!(
            DeveloperCertificate::from_der(b"not a cert".to_vec()),
            Err(Error::CertificateDecode(_))
        ));
        assert!(matches!(
            DeveloperCertificate::from_der(&DEV_CERT[..DEV_CERT.len() - 10]),
            Err(Error::CertificateDecode(_))
        ));
    }
}
