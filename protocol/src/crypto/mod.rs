//! # Cryptographic Seams
//!
//! The signing core owns no curve arithmetic and no sponge permutation. It
//! talks to three external primitives through traits and ships a concrete
//! implementation of each so the pipeline runs end to end:
//!
//! - [`MessageHasher`]: field elements in, 40-byte digest out.
//!   [`Blake3FieldHasher`] is the deterministic development hasher.
//! - [`TxSigner`]: signs a digest with the account's API key.
//!   [`Ed25519Signer`] wraps `ed25519-dalek`.
//! - [`L1Signer`] and [`recover_l1_address`]: secp256k1 personal-message
//!   signatures over the L1 body, on `k256` and `alloy-primitives`.
//!
//! Key bytes are never logged from this module.

pub mod hash;
pub mod keys;
pub mod l1;

pub use hash::{Blake3FieldHasher, Digest, HashError, MessageHasher};
pub use keys::{Ed25519Signer, SignerError, TxSigner};
pub use l1::{l1_message_hash, recover_l1_address, EthL1Signer, L1Error, L1Signer};
