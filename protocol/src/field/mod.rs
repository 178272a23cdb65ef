//! # Field Codec
//!
//! Everything the signer hashes is a sequence of Goldilocks field elements.
//! The field cannot hold a full 64-bit value, so this module decides how each
//! primitive lands in the field:
//!
//! - values that fit the canonical range become exactly one element,
//! - 64-bit amounts and fees become two 32-bit limbs, **low limb first**,
//! - fixed byte buffers (public keys) become little-endian 8-byte limbs.
//!
//! Nothing here truncates or reduces silently. A value outside its domain is
//! a validator or caller bug and comes back as a [`CodecError`].

pub mod codec;
pub mod element;

pub use codec::{join_limbs, pack_le_bytes, split_u64, to_field_elements, FieldValue};
pub use element::{CodecError, FieldElement};
