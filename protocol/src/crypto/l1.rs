//! # L1 Authorization Signatures
//!
//! Some transactions also carry a signature from the account owner's L1
//! (Ethereum) key over a human-readable body. That signature is a standard
//! `personal_sign` secp256k1 signature:
//!
//! ```text
//! hash = keccak256("\x19Ethereum Signed Message:\n" || len(body) || body)
//! sig  = r (32) || s (32) || v (1), v in {0, 1, 27, 28}, hex encoded
//! ```
//!
//! This module only *recovers* the signer address. Whether that address is
//! allowed to authorize the transaction is the caller's decision.

use alloy_primitives::{eip191_hash_message, Address, Signature, B256};
use k256::ecdsa::SigningKey;
use rand::rngs::OsRng;
use thiserror::Error;

/// Length of an `r || s || v` signature.
const L1_SIGNATURE_LENGTH: usize = 65;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum L1Error {
    #[error("malformed L1 signature: {reason}")]
    MalformedSignature { reason: String },

    #[error("L1 public key recovery failed")]
    RecoveryFailed,

    #[error("invalid L1 secret key")]
    InvalidSecretKey,

    #[error("L1 signing failed: {0}")]
    Signing(String),
}

/// EIP-191 hash of an L1 signature body.
pub fn l1_message_hash(body: &str) -> B256 {
    eip191_hash_message(body)
}

/// Parses a hex `r || s || v` signature, `0x` optional.
fn parse_signature(signature_hex: &str) -> Result<Signature, L1Error> {
    let raw = signature_hex.trim();
    let raw = raw.strip_prefix("0x").unwrap_or(raw);
    let bytes = hex::decode(raw).map_err(|e| L1Error::MalformedSignature {
        reason: format!("hex decode failed: {e}"),
    })?;
    if bytes.len() != L1_SIGNATURE_LENGTH {
        return Err(L1Error::MalformedSignature {
            reason: format!(
                "expected {L1_SIGNATURE_LENGTH} bytes, got {}",
                bytes.len()
            ),
        });
    }
    // EIP-155 style v values are valid for transactions, not personal messages.
    if !matches!(bytes[64], 0 | 1 | 27 | 28) {
        return Err(L1Error::MalformedSignature {
            reason: format!("invalid recovery byte {}", bytes[64]),
        });
    }
    Signature::try_from(bytes.as_slice()).map_err(|e| L1Error::MalformedSignature {
        reason: e.to_string(),
    })
}

/// `recoverAddress(renderedBody, signature) -> address`.
pub fn recover_l1_address(body: &str, signature_hex: &str) -> Result<Address, L1Error> {
    parse_signature(signature_hex)?
        .recover_address_from_msg(body)
        .map_err(|_| L1Error::RecoveryFailed)
}

/// The external secondary signer for L1 bodies.
pub trait L1Signer {
    /// Signs `body` as a personal message; returns `0x`-prefixed hex.
    fn sign_message(&self, body: &str) -> Result<String, L1Error>;

    fn address(&self) -> Address;
}

/// A secp256k1 L1 key, used by the CLI and in tests.
pub struct EthL1Signer {
    key: SigningKey,
}

impl EthL1Signer {
    pub fn generate() -> Self {
        Self {
            key: SigningKey::random(&mut OsRng),
        }
    }

    pub fn from_hex(hex_str: &str) -> Result<Self, L1Error> {
        let raw = hex_str.trim();
        let raw = raw.strip_prefix("0x").unwrap_or(raw);
        let bytes = hex::decode(raw).map_err(|_| L1Error::InvalidSecretKey)?;
        let key = SigningKey::from_slice(&bytes).map_err(|_| L1Error::InvalidSecretKey)?;
        Ok(Self { key })
    }

    /// Raw 32-byte secret scalar. Only `keygen` should need this.
    pub fn secret_key_bytes(&self) -> [u8; 32] {
        let mut out = [0u8; 32];
        out.copy_from_slice(&self.key.to_bytes());
        out
    }
}

impl L1Signer for EthL1Signer {
    fn sign_message(&self, body: &str) -> Result<String, L1Error> {
        let hash = eip191_hash_message(body);
        let (signature, recovery_id) = self
            .key
            .sign_prehash_recoverable(hash.as_slice())
            .map_err(|e| L1Error::Signing(e.to_string()))?;
        let mut out = Vec::with_capacity(L1_SIGNATURE_LENGTH);
        out.extend_from_slice(&signature.to_bytes());
        out.push(recovery_id.to_byte() + 27);
        Ok(format!("0x{}", hex::encode(out)))
    }

    fn address(&self) -> Address {
        Address::from_public_key(self.key.verifying_key())
    }
}
