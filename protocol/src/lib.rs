// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # l2sign: Transaction Signing Core
//!
//! Client-side signing for a layer-2 exchange. A request is validated
//! against protocol bounds, encoded into a canonical sequence of Goldilocks
//! field elements, hashed under a chain domain tag and signed. Transfers and
//! key rotations additionally carry an L1 (Ethereum personal-message)
//! signature over a fixed human-readable body.
//!
//! ## Architecture
//!
//! - **config**: protocol constants, bounds and type tags.
//! - **field**: primitive-to-field-element codec.
//! - **crypto**: hasher, primary signer and L1 signer seams.
//! - **transaction**: the kinds, the validator, preimages and the signing
//!   pipeline.
//!
//! ## Ground rules
//!
//! 1. Nothing is hashed that has not been validated.
//! 2. No value is truncated or reduced on its way into the field.
//! 3. Preimage order is written out per kind, never derived.
//! 4. Key material is never logged.

pub mod config;
pub mod crypto;
pub mod field;
pub mod transaction;

pub use crypto::{
    Blake3FieldHasher, Digest, Ed25519Signer, EthL1Signer, L1Signer, MessageHasher, TxSigner,
};
pub use transaction::{FieldError, L2Tx, SignedTx, TxError, TxInfo};
