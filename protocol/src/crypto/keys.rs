//! # Primary Signer
//!
//! The primary signature covers the digest of the canonical preimage. The
//! scheme the exchange verifies lives outside this crate; callers plug it in
//! through [`TxSigner`].
//!
//! [`Ed25519Signer`] is the in-tree implementation used by the CLI, the
//! tests and the benches. Ed25519 signatures are deterministic, which makes
//! golden tests over signed records possible.

use ed25519_dalek::{Signature, Signer, SigningKey, Verifier, VerifyingKey, SECRET_KEY_LENGTH};
use rand::rngs::OsRng;
use thiserror::Error;

use super::hash::Digest;

/// Errors from key handling or an injected signing primitive.
///
/// Deliberately vague about key material.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignerError {
    #[error("invalid secret key bytes")]
    InvalidSecretKey,

    #[error("signing primitive failed: {0}")]
    Primitive(String),
}

/// `sign(digest) -> signature` and `publicKey() -> bytes`.
pub trait TxSigner {
    fn sign_digest(&self, digest: &Digest) -> Result<Vec<u8>, SignerError>;

    fn public_key(&self) -> Vec<u8>;
}

impl<S: TxSigner + ?Sized> TxSigner for &S {
    fn sign_digest(&self, digest: &Digest) -> Result<Vec<u8>, SignerError> {
        (**self).sign_digest(digest)
    }

    fn public_key(&self) -> Vec<u8> {
        (**self).public_key()
    }
}

/// An API key backed by an Ed25519 signing key.
///
/// Does not implement `Debug` or `Serialize`: exporting the secret is an
/// explicit call to [`Ed25519Signer::secret_key_bytes`].
pub struct Ed25519Signer {
    signing_key: SigningKey,
}

impl Ed25519Signer {
    /// Generates a fresh key from the OS RNG.
    pub fn generate() -> Self {
        Self {
            signing_key: SigningKey::generate(&mut OsRng),
        }
    }

    pub fn from_seed(seed: &[u8; SECRET_KEY_LENGTH]) -> Self {
        Self {
            signing_key: SigningKey::from_bytes(seed),
        }
    }

    /// Loads a hex-encoded 32-byte secret, with or without `0x`.
    pub fn from_hex(hex_str: &str) -> Result<Self, SignerError> {
        let mut seed = [0u8; SECRET_KEY_LENGTH];
        hex::decode_to_slice(hex_str.trim().trim_start_matches("0x"), &mut seed)
            .map_err(|_| SignerError::InvalidSecretKey)?;
        Ok(Self::from_seed(&seed))
    }

    pub fn public_key_bytes(&self) -> [u8; 32] {
        self.signing_key.verifying_key().to_bytes()
    }

    pub fn public_key_hex(&self) -> String {
        hex::encode(self.public_key_bytes())
    }

    pub fn secret_key_bytes(&self) -> [u8; SECRET_KEY_LENGTH] {
        self.signing_key.to_bytes()
    }

    /// Checks `signature` over `digest` against a raw public key.
    pub fn verify(public_key: &[u8], digest: &Digest, signature: &[u8]) -> bool {
        let Ok(pk_bytes) = <[u8; 32]>::try_from(public_key) else {
            return false;
        };
        let Ok(vk) = VerifyingKey::from_bytes(&pk_bytes) else {
            return false;
        };
        let Ok(sig) = Signature::from_slice(signature) else {
            return false;
        };
        vk.verify(digest.as_bytes(), &sig).is_ok()
    }
}

impl TxSigner for Ed25519Signer {
    fn sign_digest(&self, digest: &Digest) -> Result<Vec<u8>, SignerError> {
        Ok(self.signing_key.sign(digest.as_bytes()).to_bytes().to_vec())
    }

    fn public_key(&self) -> Vec<u8> {
        self.public_key_bytes().to_vec()
    }
}
