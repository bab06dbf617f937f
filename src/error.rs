//! # Error Types
//!
//! This module defines the crate-level error type. Module-local errors
//! ([`EncodingError`], [`LoadError`]) convert into it where they are fatal.

use thiserror::Error;

use crate::loader::LoadError;
use crate::qr::EncodingError;

/// Main error type for flyer operations
#[derive(Debug, Error)]
pub enum FlyerError {
    /// Request rejected before any drawing (empty name, bad dimensions)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// QR payload could not be encoded
    #[error("QR encoding error: {0}")]
    Encoding(#[from] EncodingError),

    /// QR bitmap could not be placed on the surface
    #[error("Composition error: {0}")]
    Composition(String),

    /// PNG encoding of the finished surface failed
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Image could not be loaded (only surfaced outside the compositor)
    #[error("Load error: {0}")]
    Load(#[from] LoadError),

    /// Server bind or serve failure
    #[error("Server error: {0}")]
    Server(String),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl FlyerError {
    /// True for failures caused by the caller's input rather than the engine.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            FlyerError::InvalidRequest(_) | FlyerError::Encoding(_) | FlyerError::Load(_)
        )
    }
}
