//! # Hash Engine
//!
//! The message that gets signed is the hash of a transaction's canonical
//! preimage. The production verifier hashes with a ZK-friendly sponge over
//! the Goldilocks field; that primitive sits behind [`MessageHasher`] and is
//! not defined here.
//!
//! ## Blake3FieldHasher
//!
//! A deterministic stand-in for development, tests and benchmarks. It feeds
//! each element's 8-byte little-endian encoding into a BLAKE3 `derive_key`
//! hasher and reads 40 bytes of XOF output, so it has the same digest shape
//! as the production hash. Digests from it will not verify on the exchange.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use thiserror::Error;

use crate::config::DIGEST_LENGTH;
use crate::field::FieldElement;

/// Failure reported by an injected hash primitive.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HashError {
    #[error("hash primitive failed: {0}")]
    Primitive(String),
}

/// A 40-byte signing digest. Opaque to everything but the signer.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Digest([u8; DIGEST_LENGTH]);

impl Digest {
    pub const fn from_bytes(bytes: [u8; DIGEST_LENGTH]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; DIGEST_LENGTH] {
        &self.0
    }

    /// Lowercase hex without a prefix. This string is the signed hash.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    pub fn from_hex(s: &str) -> Result<Self, hex::FromHexError> {
        let mut out = [0u8; DIGEST_LENGTH];
        hex::decode_to_slice(s.trim_start_matches("0x"), &mut out)?;
        Ok(Self(out))
    }
}

impl fmt::Debug for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Digest({})", self.to_hex())
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for Digest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Digest {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

/// `hash(sequence of field elements) -> digest`.
///
/// Implementations must be pure: identical input, identical digest.
pub trait MessageHasher {
    fn hash_elements(&self, elements: &[FieldElement]) -> Result<Digest, HashError>;
}

impl<H: MessageHasher + ?Sized> MessageHasher for &H {
    fn hash_elements(&self, elements: &[FieldElement]) -> Result<Digest, HashError> {
        (**self).hash_elements(elements)
    }
}

/// BLAKE3 context string. Changing it changes every digest.
const BLAKE3_CONTEXT: &str = "l2sign 2026-01 canonical preimage v1";

/// Development hasher; see the module docs.
#[derive(Debug, Clone, Copy, Default)]
pub struct Blake3FieldHasher;

impl MessageHasher for Blake3FieldHasher {
    fn hash_elements(&self, elements: &[FieldElement]) -> Result<Digest, HashError> {
        let mut hasher = blake3::Hasher::new_derive_key(BLAKE3_CONTEXT);
        for element in elements {
            hasher.update(&element.to_le_bytes());
        }
        let mut out = [0u8; DIGEST_LENGTH];
        hasher.finalize_xof().fill(&mut out);
        Ok(Digest(out))
    }
}
