//! Signature-verifying decode of signed profile containers.
//!
//! Provisioning profiles are CMS `SignedData` structures whose encapsulated
//! content is the profile plist. [`ContainerDecoder`] is the seam for the
//! step that checks the signature and hands back the inner bytes; it can be
//! backed by a platform verifier or by [`CmsVerifier`], which does the work
//! in pure Rust with the cryptographic-message-syntax crate.
//!
//! Verification covers the message digest and the signer's signature
//! against the certificates carried in the container. Trust in the signing
//! chain is not evaluated.

use crate::container::is_binary_plist;
use crate::{Error, Result};
use cryptographic_message_syntax::SignedData;
use log::debug;

const XML_PREFIX: &[u8] = b"<?xml";

/// Turns signed container bytes into the plist bytes they wrap.
pub trait ContainerDecoder {
    /// Verify `data` and return the inner plist bytes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SignatureVerification`] if the container is rejected.
    fn decode(&self, data: &[u8]) -> Result<Vec<u8>>;
}

/// Pure Rust CMS verifier.
///
/// Input that is already a bare binary or XML plist is passed through
/// unchanged, so unsigned and signed profiles can be fed to it alike.
#[derive(Clone, Copy, Debug, Default)]
pub struct CmsVerifier;

impl CmsVerifier {
    /// Create a verifier.
    pub fn new() -> Self {
        Self
    }
}

impl ContainerDecoder for CmsVerifier {
    fn decode(&self, data: &[u8]) -> Result<Vec<u8>> {
        if is_binary_plist(data) || data.starts_with(XML_PREFIX) {
            debug!("profile is not wrapped in a signed container");
            return Ok(data.to_vec());
        }

        let signed_data = SignedData::parse_ber(data).map_err(|e| {
            Error::SignatureVerification(format!("Not a CMS signed container: {}", e))
        })?;

        let mut signer_count = 0;
        for signer in signed_data.signers() {
            if signer.signed_attributes().is_some() {
                signer
                    .verify_message_digest_with_signed_data(&signed_data)
                    .map_err(|e| {
                        Error::SignatureVerification(format!("Message digest mismatch: {}", e))
                    })?;
            }

            signer
                .verify_signature_with_signed_data(&signed_data)
                .map_err(|e| Error::SignatureVerification(format!("Invalid signature: {}", e)))?;

            signer_count += 1;
        }

        if signer_count == 0 {
            return Err(Error::SignatureVerification(
                "Container has no signers".into(),
            ));
        }

        let content = signed_data.signed_content().ok_or_else(|| {
            Error::SignatureVerification("Container has no encapsulated content".into())
        })?;

        debug!(
            "verified {} signer(s), {} bytes of content",
            signer_count,
            content.len()
        );

        Ok(content.to_vec())
    }
}
