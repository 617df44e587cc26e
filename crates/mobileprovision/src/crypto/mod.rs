pub mod cert;
pub mod cms;

pub use cert::DeveloperCertificate;
pub use cms::{CmsVerifier, ContainerDecoder};
