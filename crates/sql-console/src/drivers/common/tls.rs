//! TLS configuration for PostgreSQL connections.
//!
//! The `sslmode` parameter of the DSN decides whether a TLS connector is built.
//! As with libpq, `prefer` and `require` encrypt the connection without
//! verifying the server certificate.

use std::sync::Arc;

use rustls::ClientConfig;
use tokio_postgres::config::SslMode as PgSslMode;
use tokio_postgres_rustls::MakeRustlsConnect;
use tracing::warn;

/// SSL modes understood by the PostgreSQL driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SslMode {
    /// Plain TCP.
    Disable,
    /// Try TLS, fall back to plain TCP.
    #[default]
    Prefer,
    /// TLS required.
    Require,
}

impl SslMode {
    /// Read the mode from a parsed DSN.
    pub fn from_pg(mode: PgSslMode) -> Self {
        match mode {
            PgSslMode::Disable => SslMode::Disable,
            PgSslMode::Require => SslMode::Require,
            _ => SslMode::Prefer,
        }
    }

    /// Check if this mode needs a TLS connector.
    pub fn requires_tls(&self) -> bool {
        !matches!(self, SslMode::Disable)
    }
}

/// Builder for PostgreSQL TLS connectors.
pub struct TlsBuilder {
    ssl_mode: SslMode,
}

impl TlsBuilder {
    pub fn new(ssl_mode: SslMode) -> Self {
        Self { ssl_mode }
    }

    /// Build a connector, or `None` when TLS is disabled.
    pub fn build(&self) -> Option<MakeRustlsConnect> {
        if !self.ssl_mode.requires_tls() {
            return None;
        }

        if self.ssl_mode == SslMode::Require {
            warn!(
                "sslmode=require enables TLS but does NOT verify the server certificate. \
                 Use a trusted network or a verifying proxy for sensitive data."
            );
        }

        let config = ClientConfig::builder()
            .dangerous()
            .with_custom_certificate_verifier(Arc::new(NoVerifier))
            .with_no_client_auth();

        Some(MakeRustlsConnect::new(config))
    }
}

/// Certificate verifier that accepts any certificate.
///
/// Matches libpq's behaviour for `sslmode=prefer` and `sslmode=require`.
#[derive(Debug)]
struct NoVerifier;

impl rustls::client::danger::ServerCertVerifier for NoVerifier {
    fn verify_server_cert(
        &self,
        _end_entity: &rustls::pki_types::CertificateDer<'_>,
        _intermediates: &[rustls::pki_types::CertificateDer<'_>],
        _server_name: &rustls::pki_types::ServerName<'_>,
        _ocsp_response: &[u8],
        _now: rustls::pki_types::UnixTime,
    ) -> std::result::Result<rustls::client::danger::ServerCertVerified, rustls::Error> {
        Ok(rustls::client::danger::ServerCertVerified::assertion())
    }

    fn verify_tls12_signature(
        &self,
        _message: &[u8],
        _cert: &rustls::pki_types::CertificateDer<'_>,
        _dss: &rustls::DigitallySignedStruct,
    ) -> std::result::Result<rustls::client::danger::HandshakeSignatureValid, rustls::Error> {
        Ok(rustls::client::danger::HandshakeSignatureValid::assertion())
    }

    fn verify_tls13_signature(
        &self,
        _message: &[u8],
        _cert: &rustls::pki_types::CertificateDer<'_>,
        _dss: &rustls::DigitallySignedStruct,
    ) -> std::result::Result<rustls::client::danger::HandshakeSignatureValid, rustls::Error> {
        Ok(rustls::client::danger::HandshakeSignatureValid::assertion())
    }

    fn supported_verify_schemes(&self) -> Vec<rustls::SignatureScheme> {
        vec![
            rustls::SignatureScheme::RSA_PKCS1_SHA256,
            rustls::SignatureScheme::RSA_PKCS1_SHA384,
            rustls::SignatureScheme::RSA_PKCS1_SHA512,
            rustls::SignatureScheme::ECDSA_NISTP256_SHA256,
            rustls::SignatureScheme::ECDSA_NISTP384_SHA384,
            rustls::SignatureScheme::ECDSA_NISTP521_SHA512,
            rustls::SignatureScheme::RSA_PSS_SHA256,
            rustls::SignatureScheme::RSA_PSS_SHA384,
            rustls::SignatureScheme::RSA_PSS_SHA512,
            rustls::SignatureScheme::ED25519,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ssl_mode_from_dsn() {
        let parse = |dsn: &str| {
            let config: tokio_postgres::Config = dsn.parse().unwrap();
            SslMode::from_pg(config.get_ssl_mode())
        };

        assert_eq!(parse("postgresql://u@localhost/db"), SslMode::Prefer);
        assert_eq!(
            parse("postgresql://u@localhost/db?sslmode=disable"),
            SslMode::Disable
        );
        assert_eq!(
            parse("postgresql://u@localhost/db?sslmode=require"),
            SslMode::Require
        );
    }

    #[test]
    fn test_ssl_mode_requires_tls() {
        assert!(!SslMode::Disable.requires_tls());
        assert!(SslMode::Prefer.requires_tls());
        assert!(SslMode::Require.requires_tls());
    }

    #[test]
    fn test_tls_builder_disable_returns_none() {
        assert!(TlsBuilder::new(SslMode::Disable).build().is_none());
    }

    #[test]
    fn test_tls_builder_require_returns_some() {
        assert!(TlsBuilder::new(SslMode::Require).build().is_some());
    }
}
