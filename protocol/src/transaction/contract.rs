//! # Transaction-Type Contract
//!
//! [`TxInfo`] is the capability set every transaction kind provides. Signing
//! and client code works against it without knowing any field layout; a new
//! kind plugs in by implementing it, declaring its preimage order in
//! `write_preimage`, and its bounds in `validate`.
//!
//! `write_preimage` lives on a sealed supertrait: outside this crate the
//! only way to a preimage or a digest is through [`Validated`].

use serde::Serialize;

use crate::crypto::{Digest, MessageHasher};

use super::error::{FieldError, TxError};
use super::preimage::Preimage;
use super::signing::Validated;
use super::types::TxType;

#[doc(hidden)]
pub mod sealed {
    use super::{Preimage, TxError};

    /// Only this crate can build one, so only this crate can call
    /// `write_preimage`, even through a generic `T: TxInfo`.
    #[derive(Debug, Clone, Copy)]
    pub struct Seal(());

    impl Seal {
        pub(crate) fn new() -> Self {
            Seal(())
        }
    }

    pub trait WritePreimage {
        /// Builds the canonical preimage. Does not validate.
        fn write_preimage(&self, chain_id: u32, seal: Seal) -> Result<Preimage, TxError>;
    }
}

pub trait TxInfo: Serialize + sealed::WritePreimage {
    /// `getTxType() -> type tag`.
    fn tx_type(&self) -> TxType;

    /// `validate() -> ok | FieldError`. Checks run in the kind's declared
    /// field order and stop at the first failure.
    fn validate(&self) -> Result<(), FieldError>;

    /// The rendered L1 body, for kinds that carry an L1 signature.
    fn l1_body(&self, _chain_id: u32) -> Option<String> {
        None
    }

    /// The account that signs, keyed with [`TxInfo::api_key_index`] for
    /// nonce lookup.
    fn account_index(&self) -> i64;

    fn api_key_index(&self) -> u8;

    fn nonce(&self) -> i64;

    fn expired_at(&self) -> i64;

    /// Overwrites nonce and expiry. Only reachable on the mutable request.
    fn set_operational(&mut self, nonce: i64, expired_at: i64);

    /// `hash(chainId) -> digest`. Validates, builds the preimage, hashes.
    fn hash<H: MessageHasher>(&self, chain_id: u32, hasher: &H) -> Result<Digest, TxError> {
        self.validate()?;
        self.write_preimage(chain_id, sealed::Seal::new())?.hash(hasher)
    }

    /// `serialize() -> representation`. PascalCase JSON, as the exchange
    /// API expects.
    fn to_json(&self) -> Result<String, TxError> {
        Ok(serde_json::to_string(self)?)
    }

    /// `getSignedHash()`. Always empty on a request; see
    /// [`super::signing::SignedTx::signed_hash`].
    fn signed_hash(&self) -> String {
        String::new()
    }

    /// Consumes the request and, if it validates, moves it into the
    /// immutable pipeline.
    fn validated(self) -> Result<Validated<Self>, TxError>
    where
        Self: Sized,
    {
        Validated::new(self)
    }
}
