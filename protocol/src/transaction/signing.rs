//! Transaction signing as a one-way pipeline.
//!
//! ```text
//! request (T, mutable) -> Validated<T> -> Hashed<T> -> SignedTx<T>
//! ```
//!
//! Each stage owns the request and hands out only `&T`, so a field cannot
//! change between validation, hashing and signing. Going back to a mutable
//! request means calling `into_request` and starting over.

use alloy_primitives::Address;
use serde::{Serialize, Serializer};

use crate::crypto::{
    recover_l1_address, Digest, L1Error, L1Signer, MessageHasher, TxSigner,
};

use super::contract::sealed::Seal;
use super::contract::TxInfo;
use super::error::TxError;
use super::preimage::Preimage;

// ---------------------------------------------------------------------------
// Validated
// ---------------------------------------------------------------------------

/// A request that passed validation.
#[derive(Debug, Clone)]
pub struct Validated<T> {
    tx: T,
}

impl<T: TxInfo> Validated<T> {
    pub(crate) fn new(tx: T) -> Result<Self, TxError> {
        if let Err(err) = tx.validate() {
            tracing::warn!(
                tx_type = %tx.tx_type(),
                error = %err,
                "transaction rejected by validator"
            );
            return Err(err.into());
        }
        tracing::debug!(tx_type = %tx.tx_type(), nonce = tx.nonce(), "transaction validated");
        Ok(Self { tx })
    }

    pub fn tx(&self) -> &T {
        &self.tx
    }

    pub fn into_request(self) -> T {
        self.tx
    }

    pub fn preimage(&self, chain_id: u32) -> Result<Preimage, TxError> {
        self.tx.write_preimage(chain_id, Seal::new())
    }

    /// Builds the canonical preimage and hashes it.
    pub fn hash<H: MessageHasher>(self, chain_id: u32, hasher: &H) -> Result<Hashed<T>, TxError> {
        let digest = self.preimage(chain_id)?.hash(hasher)?;
        tracing::debug!(
            tx_type = %self.tx.tx_type(),
            chain_id,
            digest = %digest,
            "transaction hashed"
        );
        Ok(Hashed {
            tx: self.tx,
            chain_id,
            digest,
        })
    }
}

// ---------------------------------------------------------------------------
// Hashed
// ---------------------------------------------------------------------------

/// A validated request and the digest the primary signer will sign.
#[derive(Debug, Clone)]
pub struct Hashed<T> {
    tx: T,
    chain_id: u32,
    digest: Digest,
}

impl<T: TxInfo> Hashed<T> {
    pub fn tx(&self) -> &T {
        &self.tx
    }

    pub fn chain_id(&self) -> u32 {
        self.chain_id
    }

    pub fn digest(&self) -> &Digest {
        &self.digest
    }

    pub fn into_request(self) -> T {
        self.tx
    }

    /// The L1 body for this chain, if the kind carries one.
    pub fn l1_body(&self) -> Option<String> {
        self.tx.l1_body(self.chain_id)
    }

    /// Signs the digest. No L1 signature is attached.
    pub fn sign<S: TxSigner>(self, signer: &S) -> Result<SignedTx<T>, TxError> {
        self.finish(signer, None)
    }

    /// Signs the digest and, for kinds with an L1 body, signs the body with
    /// `l1_signer`. Kinds without an L1 body ignore `l1_signer`.
    pub fn sign_with_l1<S: TxSigner, L: L1Signer>(
        self,
        signer: &S,
        l1_signer: &L,
    ) -> Result<SignedTx<T>, TxError> {
        let l1_sig = match self.l1_body() {
            Some(body) => Some(l1_signer.sign_message(&body)?),
            None => None,
        };
        self.finish(signer, l1_sig)
    }

    /// Attaches an L1 signature produced elsewhere (e.g. a browser wallet).
    /// Fails with [`TxError::L1NotApplicable`] for kinds without an L1 body.
    pub fn sign_with_l1_signature<S: TxSigner>(
        self,
        signer: &S,
        l1_sig: String,
    ) -> Result<SignedTx<T>, TxError> {
        if self.l1_body().is_none() {
            tracing::warn!(tx_type = %self.tx.tx_type(), "L1 signature supplied for a kind without an L1 body");
            return Err(TxError::L1NotApplicable(self.tx.tx_type()));
        }
        self.finish(signer, Some(l1_sig))
    }

    fn finish<S: TxSigner>(self, signer: &S, l1_sig: Option<String>) -> Result<SignedTx<T>, TxError> {
        let sig = signer.sign_digest(&self.digest)?;
        let signed_hash = self.digest.to_hex();
        tracing::debug!(
            tx_type = %self.tx.tx_type(),
            signed_hash = %signed_hash,
            l1 = l1_sig.is_some(),
            "transaction signed"
        );
        Ok(SignedTx {
            tx: self.tx,
            sig,
            l1_sig,
            signed_hash,
            chain_id: self.chain_id,
            digest: self.digest,
        })
    }
}

// ---------------------------------------------------------------------------
// SignedTx
// ---------------------------------------------------------------------------

fn serialize_hex<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&hex::encode(bytes))
}

/// The immutable signed artifact, ready for submission.
///
/// Serializes as the request's own fields plus `Sig`, `L1Sig` (when
/// present) and `SignedHash`.
#[derive(Debug, Clone, Serialize)]
pub struct SignedTx<T> {
    #[serde(flatten)]
    tx: T,
    #[serde(rename = "Sig", serialize_with = "serialize_hex")]
    sig: Vec<u8>,
    #[serde(rename = "L1Sig", skip_serializing_if = "Option::is_none")]
    l1_sig: Option<String>,
    #[serde(rename = "SignedHash")]
    signed_hash: String,
    #[serde(skip)]
    chain_id: u32,
    #[serde(skip)]
    digest: Digest,
}

impl<T: TxInfo> SignedTx<T> {
    pub fn tx(&self) -> &T {
        &self.tx
    }

    pub fn signature(&self) -> &[u8] {
        &self.sig
    }

    pub fn l1_signature(&self) -> Option<&str> {
        self.l1_sig.as_deref()
    }

    /// Hex digest that was signed.
    pub fn signed_hash(&self) -> &str {
        &self.signed_hash
    }

    pub fn digest(&self) -> &Digest {
        &self.digest
    }

    pub fn chain_id(&self) -> u32 {
        self.chain_id
    }

    /// The structured record for the exchange API.
    pub fn to_json(&self) -> Result<String, TxError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_value(&self) -> Result<serde_json::Value, TxError> {
        Ok(serde_json::to_value(self)?)
    }

    /// Address recovered from the attached L1 signature, or `None` when the
    /// kind has no L1 body or no L1 signature was attached.
    pub fn l1_address(&self) -> Result<Option<Address>, L1Error> {
        match (self.tx.l1_body(self.chain_id), self.l1_sig.as_deref()) {
            (Some(body), Some(sig)) => recover_l1_address(&body, sig).map(Some),
            _ => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CHAIN_ID_MAINNET, CHAIN_ID_TESTNET};
    use crate::crypto::{Blake3FieldHasher, Ed25519Signer, EthL1Signer};
    use crate::transaction::error::{FieldError, TxField};
    use crate::transaction::kinds::{TransferTx, WithdrawTx};
    use crate::transaction::types::{Memo, TxType};

    fn transfer() -> TransferTx {
        TransferTx {
            from_account_index: 21,
            api_key_index: 3,
            to_account_index: 22,
            asset_index: 1,
            from_route_type: 0,
            to_route_type: 0,
            amount: 1_000_000,
            usdc_fee: 0,
            memo: Memo::default(),
            expired_at: 1_700_000_599_000,
            nonce: 9,
        }
    }

    fn withdraw() -> WithdrawTx {
        WithdrawTx {
            from_account_index: 5,
            api_key_index: 0,
            asset_index: 3,
            route_type: 1,
            amount: 5_000,
            expired_at: 1_000,
            nonce: 1,
        }
    }

    fn api_key() -> Ed25519Signer {
        Ed25519Signer::from_seed(&[7u8; 32])
    }

    #[test]
    fn invalid_request_never_reaches_the_hasher() {
        let mut tx = transfer();
        tx.amount = 0;
        match tx.validated() {
            Err(TxError::Validation(e)) => assert_eq!(e, FieldError::too_low(TxField::Amount)),
            other => panic!("expected Validation, got {:?}", other),
        }
    }

    #[test]
    fn signature_covers_the_digest() {
        let signer = api_key();
        let signed = withdraw()
            .validated()
            .unwrap()
            .hash(CHAIN_ID_MAINNET, &Blake3FieldHasher)
            .unwrap()
            .sign(&signer)
            .unwrap();
        assert!(Ed25519Signer::verify(
            &signer.public_key(),
            signed.digest(),
            signed.signature()
        ));
        assert_eq!(signed.signed_hash(), signed.digest().to_hex());
        assert_eq!(
            *signed.digest(),
            withdraw().hash(CHAIN_ID_MAINNET, &Blake3FieldHasher).unwrap()
        );
    }

    #[test]
    fn chain_id_is_carried_through() {
        let hashed = withdraw()
            .validated()
            .unwrap()
            .hash(CHAIN_ID_TESTNET, &Blake3FieldHasher)
            .unwrap();
        assert_eq!(hashed.chain_id(), CHAIN_ID_TESTNET);
        let signed = hashed.sign(&api_key()).unwrap();
        assert_eq!(signed.chain_id(), CHAIN_ID_TESTNET);
    }

    #[test]
    fn l1_signature_recovers_owner() {
        let l1 = EthL1Signer::generate();
        let signed = transfer()
            .validated()
            .unwrap()
            .hash(CHAIN_ID_MAINNET, &Blake3FieldHasher)
            .unwrap()
            .sign_with_l1(&api_key(), &l1)
            .unwrap();
        assert!(signed.l1_signature().is_some());
        assert_eq!(signed.l1_address().unwrap(), Some(l1.address()));
    }

    #[test]
    fn l1_signer_is_ignored_without_a_body() {
        let signed = withdraw()
            .validated()
            .unwrap()
            .hash(CHAIN_ID_MAINNET, &Blake3FieldHasher)
            .unwrap()
            .sign_with_l1(&api_key(), &EthL1Signer::generate())
            .unwrap();
        assert!(signed.l1_signature().is_none());
        assert_eq!(signed.l1_address().unwrap(), None);
    }

    #[test]
    fn external_l1_signature_rejected_without_a_body() {
        let res = withdraw()
            .validated()
            .unwrap()
            .hash(CHAIN_ID_MAINNET, &Blake3FieldHasher)
            .unwrap()
            .sign_with_l1_signature(&api_key(), "0x00".to_string());
        match res {
            Err(TxError::L1NotApplicable(kind)) => assert_eq!(kind, TxType::Withdraw),
            other => panic!("expected L1NotApplicable, got {:?}", other.map(|s| s.to_json())),
        }
    }

    #[test]
    fn external_l1_signature_is_attached_to_transfers() {
        let l1 = EthL1Signer::generate();
        let hashed = transfer()
            .validated()
            .unwrap()
            .hash(CHAIN_ID_MAINNET, &Blake3FieldHasher)
            .unwrap();
        let sig = l1.sign_message(&hashed.l1_body().unwrap()).unwrap();
        let signed = hashed.sign_with_l1_signature(&api_key(), sig.clone()).unwrap();
        assert_eq!(signed.l1_signature(), Some(sig.as_str()));
        assert_eq!(signed.l1_address().unwrap(), Some(l1.address()));
    }

    #[test]
    fn invalid_request_cannot_be_hashed_through_the_contract() {
        let mut tx = transfer();
        tx.api_key_index = 255;
        tx.asset_index = 99;
        tx.usdc_fee = -7;
        assert!(matches!(
            tx.hash(CHAIN_ID_MAINNET, &Blake3FieldHasher),
            Err(TxError::Validation(_))
        ));
        assert!(tx.validated().is_err());
    }

    #[test]
    fn signed_record_json() {
        let signed = transfer()
            .validated()
            .unwrap()
            .hash(CHAIN_ID_MAINNET, &Blake3FieldHasher)
            .unwrap()
            .sign(&api_key())
            .unwrap();
        let value = signed.to_json_value().unwrap();
        assert_eq!(value["FromAccountIndex"], 21);
        assert_eq!(value["Sig"].as_str().unwrap().len(), 128);
        assert_eq!(value["SignedHash"], signed.signed_hash());
        assert!(value.get("L1Sig").is_none());
    }

    #[test]
    fn ed25519_signing_is_deterministic() {
        let sign = || {
            withdraw()
                .validated()
                .unwrap()
                .hash(CHAIN_ID_MAINNET, &Blake3FieldHasher)
                .unwrap()
                .sign(&api_key())
                .unwrap()
                .to_json()
                .unwrap()
        };
        assert_eq!(sign(), sign());
    }

    #[test]
    fn request_signed_hash_is_empty() {
        assert_eq!(transfer().signed_hash(), "");
    }
}
