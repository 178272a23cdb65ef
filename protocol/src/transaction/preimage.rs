//! # Canonical Preimage Builder
//!
//! Every preimage starts with the same four-element header:
//!
//! ```text
//! [chain id, tx type tag, nonce, expired at, <type fields ...>]
//! ```
//!
//! and each kind then pushes its own fields in the order it documents. The
//! order is written out call by call in each kind's `write_preimage`; it is
//! never derived from struct layout, so reordering a struct cannot silently
//! change the hash domain.

use serde::Serialize;

use crate::crypto::{Digest, MessageHasher};
use crate::field::{pack_le_bytes, CodecError, FieldElement, FieldValue};

use super::error::TxError;
use super::types::TxType;

/// Elements in the common header.
pub const HEADER_LEN: usize = 4;

/// The fixed-order element sequence hashed to produce a signing digest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Preimage {
    elements: Vec<FieldElement>,
}

impl Preimage {
    pub fn elements(&self) -> &[FieldElement] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Elements after the common header.
    pub fn body(&self) -> &[FieldElement] {
        &self.elements[HEADER_LEN.min(self.elements.len())..]
    }

    /// `hash(chainDomainTag, elements) -> digest`. The chain tag is already
    /// the first element. Reached from outside only via `Validated::hash`.
    pub(crate) fn hash<H: MessageHasher>(&self, hasher: &H) -> Result<Digest, TxError> {
        Ok(hasher.hash_elements(&self.elements)?)
    }
}

/// Accumulates a preimage. Each `push` appends one value's elements.
#[derive(Debug, Clone)]
pub struct PreimageBuilder {
    elements: Vec<FieldElement>,
}

impl PreimageBuilder {
    /// Starts a preimage with the common header.
    pub fn new(
        chain_id: u32,
        tx_type: TxType,
        nonce: i64,
        expired_at: i64,
    ) -> Result<Self, CodecError> {
        let mut builder = Self {
            elements: Vec::with_capacity(16),
        };
        builder
            .push(FieldValue::U32(chain_id))?
            .push(FieldValue::U8(tx_type.tag()))?
            .push(FieldValue::I64(nonce))?
            .push(FieldValue::I64(expired_at))?;
        Ok(builder)
    }

    pub fn push(&mut self, value: FieldValue) -> Result<&mut Self, CodecError> {
        value.encode_into(&mut self.elements)?;
        Ok(self)
    }

    /// Appends a byte buffer as canonical little-endian 8-byte limbs.
    pub fn push_le_bytes(&mut self, bytes: &[u8]) -> Result<&mut Self, CodecError> {
        self.elements.extend(pack_le_bytes(bytes)?);
        Ok(self)
    }

    pub fn finish(self) -> Preimage {
        Preimage {
            elements: self.elements,
        }
    }
}
