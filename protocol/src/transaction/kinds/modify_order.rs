//! Amend price, size or trigger of a resting order.
//!
//! Preimage after the header:
//! `account, api key, market, order index, base amount, price, trigger price`.
//!
//! The order type is not part of the request, so the trigger price is only
//! range checked here. Whether it fits the resting order is the exchange's
//! call.

use serde::{Deserialize, Serialize};

use crate::config::{
    MAX_ORDER_BASE_AMOUNT, MAX_ORDER_INDEX, MAX_ORDER_PRICE, MAX_ORDER_TRIGGER_PRICE,
    MIN_ACCOUNT_INDEX, MIN_ORDER_BASE_AMOUNT, MIN_ORDER_INDEX, MIN_ORDER_PRICE,
    NIL_ORDER_TRIGGER_PRICE,
};
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
pub struct ModifyOrderTx {
    pub account_index: i64,
    pub api_key_index: u8,
    pub market_index: u8,
    pub index: i64,
    pub base_amount: i64,
    pub price: u32,
    pub trigger_price: u32,
    pub expired_at: i64,
    pub nonce: i64,
}

impl TxInfo for ModifyOrderTx {
    fn tx_type(&self) -> TxType {
        TxType::ModifyOrder
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
        check_range(
            TxField::BaseAmount,
            self.base_amount,
            MIN_ORDER_BASE_AMOUNT,
            MAX_ORDER_BASE_AMOUNT,
        )?;
        check_range(TxField::Price, self.price, MIN_ORDER_PRICE, MAX_ORDER_PRICE)?;
        check_range(
            TxField::TriggerPrice,
            self.trigger_price,
            NIL_ORDER_TRIGGER_PRICE,
            MAX_ORDER_TRIGGER_PRICE,
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

impl WritePreimage for ModifyOrderTx {
    fn write_preimage(&self, chain_id: u32, _: Seal) -> Result<Preimage, TxError> {
        let mut b = PreimageBuilder::new(chain_id, self.tx_type(), self.nonce, self.expired_at)?;
        b.push(FieldValue::I64(self.account_index))?
            .push(FieldValue::U8(self.api_key_index))?
            .push(FieldValue::U8(self.market_index))?
            .push(FieldValue::I64(self.index))?
            .push(FieldValue::I64(self.base_amount))?
            .push(FieldValue::U32(self.price))?
            .push(FieldValue::U32(self.trigger_price))?;
        Ok(b.finish())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CHAIN_ID_TESTNET;

    fn modify() -> ModifyOrderTx {
        ModifyOrderTx {
            account_index: 2,
            api_key_index: 6,
            market_index: 0,
            index: 555,
            base_amount: 10,
            price: 20,
            trigger_price: 0,
            expired_at: 100,
            nonce: 1,
        }
    }

    #[test]
    fn size_and_price_must_be_positive() {
        let mut tx = modify();
        tx.base_amount = 0;
        assert_eq!(tx.validate(), Err(FieldError::too_low(TxField::BaseAmount)));
        tx.base_amount = 1;
        tx.price = 0;
        assert_eq!(tx.validate(), Err(FieldError::too_low(TxField::Price)));
    }

    #[test]
    fn preimage_order() {
        let mut tx = modify();
        tx.trigger_price = 30;
        let values: Vec<u64> = tx
            .write_preimage(CHAIN_ID_TESTNET, Seal::new())
            .unwrap()
            .elements()
            .iter()
            .map(|e| e.as_u64())
            .collect();
        assert_eq!(values, vec![300, 17, 1, 100, 2, 6, 0, 555, 10, 20, 30]);
    }
}
