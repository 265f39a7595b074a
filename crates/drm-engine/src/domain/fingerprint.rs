//! Payload fingerprinting.
//!
//! A fingerprint is a cheap equality proxy for payload content, not a
//! security property: CRC-16 collisions are an accepted approximation.

use std::fmt;

use serde::{Deserialize, Serialize};

/// 16-bit non-cryptographic digest of a message payload.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct Fingerprint(u16);

impl Fingerprint {
    /// Wrap a raw digest value.
    pub fn from_raw(value: u16) -> Self {
        Self(value)
    }

    /// The raw digest value.
    pub fn as_u16(&self) -> u16 {
        self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#06x}", self.0)
    }
}

/// Compute the CRC-16/XMODEM digest of a payload.
///
/// Pure, total (defined for the empty payload) and allocation-free.
pub fn fingerprint(payload: &[u8]) -> Fingerprint {
    let mut crc: u16 = 0x0000;
    for &byte in payload {
        crc ^= (byte as u16) << 8;
        for _ in 0..8 {
            crc = if crc & 0x8000 != 0 {
                (crc << 1) ^ 0x1021
            } else {
                crc << 1
            };
        }
    }
    Fingerprint(crc)
}
