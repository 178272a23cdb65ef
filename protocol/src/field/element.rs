//! The Goldilocks field element.
//!
//! The signing core never does field arithmetic: it only builds canonical
//! elements and hands them to the hash primitive. So the type is a checked
//! newtype over `u64` with constructors that refuse anything `>= p`.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::config::FIELD_MODULUS;

/// Encoding failures. Reaching one of these means a value skipped validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CodecError {
    /// The value is at or above the field modulus.
    #[error("value {value:#x} is outside the canonical field range")]
    NonCanonical { value: u64 },

    /// A signed value was negative where only non-negative values encode.
    #[error("negative value {value} has no single-element encoding")]
    Negative { value: i64 },

    /// A byte buffer is not a whole number of 8-byte limbs.
    #[error("byte buffer of length {len} is not a multiple of 8")]
    UnalignedBytes { len: usize },
}

/// A canonical element of the Goldilocks field (`0 <= value < p`).
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct FieldElement(u64);

impl FieldElement {
    pub const ZERO: Self = Self(0);
    pub const ONE: Self = Self(1);

    /// Every `u32` is canonical, so this cannot fail.
    pub const fn from_u32(value: u32) -> Self {
        Self(value as u64)
    }

    pub const fn from_bool(value: bool) -> Self {
        Self(value as u64)
    }

    /// Builds an element from a value that must already be below the modulus.
    pub fn from_canonical_u64(value: u64) -> Result<Self, CodecError> {
        if value >= FIELD_MODULUS {
            return Err(CodecError::NonCanonical { value });
        }
        Ok(Self(value))
    }

    /// Builds an element from a non-negative signed value.
    pub fn from_i64(value: i64) -> Result<Self, CodecError> {
        if value < 0 {
            return Err(CodecError::Negative { value });
        }
        Self::from_canonical_u64(value as u64)
    }

    /// Decodes one little-endian limb, rejecting non-canonical encodings.
    pub fn from_le_bytes(bytes: [u8; 8]) -> Result<Self, CodecError> {
        Self::from_canonical_u64(u64::from_le_bytes(bytes))
    }

    pub const fn as_u64(self) -> u64 {
        self.0
    }

    pub const fn to_le_bytes(self) -> [u8; 8] {
        self.0.to_le_bytes()
    }
}

impl TryFrom<u64> for FieldElement {
    type Error = CodecError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        Self::from_canonical_u64(value)
    }
}

impl From<FieldElement> for u64 {
    fn from(element: FieldElement) -> Self {
        element.0
    }
}

impl fmt::Debug for FieldElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fe({})", self.0)
    }
}

impl fmt::Display for FieldElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
