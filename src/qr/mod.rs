//! # QR Symbol Encoder
//!
//! Turns a payload string into an immutable grid of dark/light modules.
//!
//! ## Capacity
//!
//! Symbol size is chosen by the `qrcode` crate from payload length and
//! error-correction level. Payloads that do not fit version 40 are rejected
//! with [`EncodingError::CapacityExceeded`]; nothing is ever truncated.
//!
//! | Level | Recovery | Max bytes (v40) |
//! |-------|----------|-----------------|
//! | L | ~7% | 2953 |
//! | M | ~15% | 2331 |
//! | Q | ~25% | 1663 |
//! | H | ~30% | 1273 |
//!
//! ## Example
//!
//! ```
//! use menuflyer::qr::{self, EcLevel};
//!
//! let symbol = qr::encode("https://onourmenu.app/menu/abc123", EcLevel::H).unwrap();
//! assert_eq!(symbol.width(), 17 + 4 * symbol.version() as usize);
//! ```

mod raster;

pub use raster::{QrImageOptions, render_png};

use qrcode::QrCode;
use qrcode::types::QrError;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// QR error-correction level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum EcLevel {
    L,
    M,
    Q,
    H,
}

impl EcLevel {
    fn to_qrcode(self) -> qrcode::EcLevel {
        match self {
            EcLevel::L => qrcode::EcLevel::L,
            EcLevel::M => qrcode::EcLevel::M,
            EcLevel::Q => qrcode::EcLevel::Q,
            EcLevel::H => qrcode::EcLevel::H,
        }
    }
}

impl fmt::Display for EcLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            EcLevel::L => "L",
            EcLevel::M => "M",
            EcLevel::Q => "Q",
            EcLevel::H => "H",
        };
        f.write_str(s)
    }
}

/// Errors from [`encode`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodingError {
    #[error("QR payload is empty")]
    EmptyPayload,

    #[error("QR payload of {len} bytes exceeds capacity at level {level} (max {max} bytes)")]
    CapacityExceeded { len: usize, level: EcLevel, max: usize },

    #[error("QR encoder rejected payload: {0}")]
    Rejected(String),
}

/// Byte-mode capacity of the largest symbol (version 40) at `level`.
pub fn max_capacity(level: EcLevel) -> usize {
    match level {
        EcLevel::L => 2953,
        EcLevel::M => 2331,
        EcLevel::Q => 1663,
        EcLevel::H => 1273,
    }
}

/// A square grid of QR modules. `true` = dark.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrSymbol {
    width: usize,
    version: i16,
    level: EcLevel,
    modules: Vec<bool>,
}

impl QrSymbol {
    /// Modules per side.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Symbol version (1-40).
    pub fn version(&self) -> i16 {
        self.version
    }

    pub fn level(&self) -> EcLevel {
        self.level
    }

    /// Whether the module at column `x`, row `y` is dark.
    /// Out-of-range coordinates read as light.
    pub fn is_dark(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.width && self.modules[y * self.width + x]
    }

    /// Row-major module slice.
    pub fn modules(&self) -> &[bool] {
        &self.modules
    }
}

/// Encode `payload` into a QR symbol at `level`.
///
/// Deterministic: identical inputs always produce identical grids.
pub fn encode(payload: &str, level: EcLevel) -> Result<QrSymbol, EncodingError> {
    if payload.is_empty() {
        return Err(EncodingError::EmptyPayload);
    }

    let max = max_capacity(level);
    let code = QrCode::with_error_correction_level(payload.as_bytes(), level.to_qrcode())
        .map_err(|e| match e {
            QrError::DataTooLong => EncodingError::CapacityExceeded {
                len: payload.len(),
                level,
                max,
            },
            other => EncodingError::Rejected(other.to_string()),
        })?;

    let version = match code.version() {
        qrcode::Version::Normal(v) => v,
        qrcode::Version::Micro(v) => v,
    };

    let modules = code
        .to_colors()
        .into_iter()
        .map(|c| c == qrcode::Color::Dark)
        .collect();

    Ok(QrSymbol {
        width: code.width(),
        version,
        level,
        modules,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const MENU_URL: &str = "https://onourmenu.app/menu/abc123";

    #[test]
    fn test_encode_is_deterministic() {
        let a = encode(MENU_URL, EcLevel::H).unwrap();
        let b = encode(MENU_URL, EcLevel::H).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_width_matches_version() {
        let symbol = encode(MENU_URL, EcLevel::H).unwrap();
        assert_eq!(symbol.width(), 17 + 4 * symbol.version() as usize);
        assert_eq!(symbol.modules().len(), symbol.width() * symbol.width());
        assert_eq!(symbol.level(), EcLevel::H);
    }

    #[test]
    fn test_higher_level_is_not_smaller() {
        let low = encode(MENU_URL, EcLevel::L).unwrap();
        let high = encode(MENU_URL, EcLevel::H).unwrap();
        assert!(high.width() >= low.width());
    }

    #[test]
    fn test_finder_pattern_corner_is_dark() {
        let symbol = encode("hello", EcLevel::H).unwrap();
        assert!(symbol.is_dark(0, 0));
        assert!(symbol.is_dark(6, 6));
        // Separator row around the finder pattern is light
        assert!(!symbol.is_dark(7, 0));
        assert!(!symbol.is_dark(symbol.width(), 0));
    }

    #[test]
    fn test_empty_payload_rejected() {
        assert_eq!(encode("", EcLevel::H), Err(EncodingError::EmptyPayload));
    }

    #[test]
    fn test_oversized_payload_rejected() {
        let payload = "a".repeat(5000);
        match encode(&payload, EcLevel::H) {
            Err(EncodingError::CapacityExceeded { len, level, max }) => {
                assert_eq!(len, 5000);
                assert_eq!(level, EcLevel::H);
                assert_eq!(max, 1273);
            }
            other => panic!("expected capacity error, got {:?}", other),
        }
    }

    #[test]
    fn test_large_payload_within_capacity() {
        let payload = "a".repeat(1200);
        let symbol = encode(&payload, EcLevel::H).unwrap();
        assert!(symbol.version() >= 38);
    }

    #[test]
    fn test_capacity_depends_on_level() {
        // Fits at L, not at H
        let payload = "a".repeat(2000);
        assert!(encode(&payload, EcLevel::L).is_ok());
        assert!(matches!(
            encode(&payload, EcLevel::H),
            Err(EncodingError::CapacityExceeded { .. })
        ));
    }
}
