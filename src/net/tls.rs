//! TLS configuration and certificate loading.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use axum_server::tls_rustls::RustlsConfig;

use crate::config::TlsConfig;

#[derive(Debug, thiserror::Error)]
pub enum TlsError {
    #[error("{kind} file not found: {path:?}")]
    NotFound { kind: &'static str, path: PathBuf },

    #[error("reading {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("no certificates in {0:?}")]
    NoCertificates(PathBuf),

    #[error("no private key in {0:?}")]
    NoPrivateKey(PathBuf),

    #[error("building TLS configuration: {0}")]
    Config(std::io::Error),
}

/// Load TLS configuration from certificate and key files.
///
/// The PEM material is checked up front so a bad file names itself instead of
/// surfacing as a generic rustls error.
pub async fn load_tls_config(tls: &TlsConfig) -> Result<RustlsConfig, TlsError> {
    check_certificates(&tls.cert_path)?;
    check_private_key(&tls.key_path)?;

    RustlsConfig::from_pem_file(&tls.cert_path, &tls.key_path)
        .await
        .map_err(TlsError::Config)
}

fn open(kind: &'static str, path: &Path) -> Result<BufReader<File>, TlsError> {
    if !path.exists() {
        return Err(TlsError::NotFound {
            kind,
            path: path.to_path_buf(),
        });
    }
    File::open(path).map(BufReader::new).map_err(|source| TlsError::Read {
        path: path.to_path_buf(),
        source,
    })
}

fn check_certificates(path: &Path) -> Result<(), TlsError> {
    let mut reader = open("Certificate", path)?;
    let certs = rustls_pemfile::certs(&mut reader)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|source| TlsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
    if certs.is_empty() {
        return Err(TlsError::NoCertificates(path.to_path_buf()));
    }
    Ok(())
}

fn check_private_key(path: &Path) -> Result<(), TlsError> {
    let mut reader = open("Private key", path)?;
    match rustls_pemfile::private_key(&mut reader) {
        Ok(Some(_)) => Ok(()),
        Ok(None) => Err(TlsError::NoPrivateKey(path.to_path_buf())),
        Err(source) => Err(TlsError::Read {
            path: path.to_path_buf(),
            source,
        }),
    }
}
