//! API key registration and rotation.
//!
//! Preimage after the header: `account, api key, pubkey limb 0..4`. The new
//! key also needs the owner's L1 signature over the registration body.

use serde::{Deserialize, Serialize};

use crate::config::MIN_ACCOUNT_INDEX;
use crate::field::FieldValue;
use crate::transaction::contract::sealed::{Seal, WritePreimage};
use crate::transaction::contract::TxInfo;
use crate::transaction::error::{FieldError, TxError, TxField};
use crate::transaction::l1_body::{
    bytes_token, hex10, render_template, L1Authorized, TEMPLATE_CHANGE_PUB_KEY,
};
use crate::transaction::preimage::{Preimage, PreimageBuilder};
use crate::transaction::types::{PubKey, TxType};
use crate::transaction::validation::{
    check_account_index, check_api_key_index, check_operational, check_pub_key,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ChangePubKeyTx {
    pub account_index: i64,
    pub api_key_index: u8,
    pub pub_key: PubKey,
    pub expired_at: i64,
    pub nonce: i64,
}

impl TxInfo for ChangePubKeyTx {
    fn tx_type(&self) -> TxType {
        TxType::ChangePubKey
    }

    fn validate(&self) -> Result<(), FieldError> {
        check_account_index(TxField::AccountIndex, self.account_index, MIN_ACCOUNT_INDEX)?;
        check_api_key_index(self.api_key_index)?;
        check_pub_key(self.pub_key.as_bytes())?;
        check_operational(self.nonce, self.expired_at)
    }

    fn l1_body(&self, chain_id: u32) -> Option<String> {
        Some(self.l1_signature_body(chain_id))
    }

    fn account_index(&self) -> i64 {
        self.account_index
    }

    fn api_key_index(&self) -> u8 {
        self.api_key_index
    }

    fn nonce(&self) -> i64 {
        self.nonce
    }

    fn expired_at(&self) -> i64 {
        self.expired_at
    }

    fn set_operational(&mut self, nonce: i64, expired_at: i64) {
        self.nonce = nonce;
        self.expired_at = expired_at;
    }
}

impl WritePreimage for ChangePubKeyTx {
    fn write_preimage(&self, chain_id: u32, _: Seal) -> Result<Preimage, TxError> {
        let mut b = PreimageBuilder::new(chain_id, self.tx_type(), self.nonce, self.expired_at)?;
        b.push(FieldValue::I64(self.account_index))?
            .push(FieldValue::U8(self.api_key_index))?
            .push_le_bytes(self.pub_key.as_bytes())?;
        Ok(b.finish())
    }
}

impl L1Authorized for ChangePubKeyTx {
    /// The registration body does not mention the chain.
    fn l1_signature_body(&self, _chain_id: u32) -> String {
        render_template(
            TEMPLATE_CHANGE_PUB_KEY,
            &[
                bytes_token(self.pub_key.as_bytes()),
                hex10(self.nonce as u64),
                hex10(self.account_index as u64),
                hex10(u64::from(self.api_key_index)),
            ],
        )
    }
}
