use crate::core::errors::Result;
use crate::core::models::requests::{
    CreateCertificateRequest, DescribeKeystore, ExportCertificate, GenerateKeyPair,
    ImportCertificate, SignCertificateRequest,
};

/// Port for the certificate toolkit that does the actual cryptography.
///
/// Implementations live in `adapters::toolkit` (e.g. KeytoolBackend).
/// Every call blocks until the toolkit finishes; a failed call is never
/// retried.
pub trait CertToolkit: Send + Sync {
    /// Fail with `ToolkitUnavailable` if the toolkit cannot be run at all.
    fn probe(&self) -> Result<()>;

    /// Create or overwrite a key pair and its self-signed certificate.
    fn generate_key_pair(&self, req: &GenerateKeyPair<'_>) -> Result<()>;

    /// Export a certificate as PEM text.
    fn export_certificate(&self, req: &ExportCertificate<'_>) -> Result<String>;

    /// Produce a PKCS#10 request for a key pair.
    fn create_certificate_request(&self, req: &CreateCertificateRequest<'_>) -> Result<String>;

    /// Sign a request, returning the issued certificate as PEM text.
    fn sign_certificate_request(&self, req: &SignCertificateRequest<'_>) -> Result<String>;

    /// Add or overwrite a certificate entry.
    fn import_certificate(&self, req: &ImportCertificate<'_>) -> Result<()>;

    /// Human-readable dump of a keystore.
    fn describe(&self, req: &DescribeKeystore<'_>) -> Result<String>;
}
