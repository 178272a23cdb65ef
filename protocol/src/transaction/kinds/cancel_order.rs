//! Single order cancellation.
//!
//! Preimage after the header: `account, api key, market, order index`.

use serde::{Deserialize, Serialize};

use crate::config::{MAX_ORDER_INDEX, MIN_ACCOUNT_INDEX, MIN_ORDER_INDEX};
use crate::field::FieldValue;
use crate::transaction::contract::sealed::{Seal, WritePreimage};
use crate::transaction::contract::TxInfo;
use crate::transaction::error::{FieldError, TxError, TxField};
use crate::transaction::preimage::{Preimage, PreimageBuilder};
use crate::transaction::types::TxType;
use crate::transaction::validation::{
    check_account_index, check_api_key_index, check_market_index, check_operational,
    check_range,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CancelOrderTx {
    pub account_index: i64,
    pub api_key_index: u8,
    pub market_index: u8,
    /// Exchange order index, or the client order index the order was placed with.
    pub index: i64,
    pub expired_at: i64,
    pub nonce: i64,
}

impl TxInfo for CancelOrderTx {
    fn tx_type(&self) -> TxType {
        TxType::CancelOrder
    }

    fn validate(&self) -> Result<(), FieldError> {
        check_account_index(TxField::AccountIndex, self.account_index, MIN_ACCOUNT_INDEX)?;
        check_api_key_index(self.api_key_index)?;
        check_market_index(self.market_index)?;
        check_range(
            TxField::OrderIndex,
            self.index,
            MIN_ORDER_INDEX,
            MAX_ORDER_INDEX,
        )?;
        check_operational(self.nonce, self.expired_at)
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

impl WritePreimage for CancelOrderTx {
    fn write_preimage(&self, chain_id: u32, _: Seal) -> Result<Preimage, TxError> {
        let mut b = PreimageBuilder::new(chain_id, self.tx_type(), self.nonce, self.expired_at)?;
        b.push(FieldValue::I64(self.account_index))?
            .push(FieldValue::U8(self.api_key_index))?
            .push(FieldValue::U8(self.market_index))?
            .push(FieldValue::I64(self.index))?;
        Ok(b.finish())
    }
}
