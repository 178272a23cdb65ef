//! Per-market leverage and margin mode.
//!
//! Preimage after the header:
//! `account, api key, market, initial margin fraction, margin mode`.

use serde::{Deserialize, Serialize};

use crate::config::{MAX_INITIAL_MARGIN_FRACTION, MIN_ACCOUNT_INDEX, MIN_INITIAL_MARGIN_FRACTION};
use crate::field::FieldValue;
use crate::transaction::contract::sealed::{Seal, WritePreimage};
use crate::transaction::contract::TxInfo;
use crate::transaction::error::{FieldError, TxError, TxField};
use crate::transaction::preimage::{Preimage, PreimageBuilder};
use crate::transaction::types::{MarginMode, TxType};
use crate::transaction::validation::{
    check_account_index, check_api_key_index, check_market_index, check_operational,
    check_range,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UpdateLeverageTx {
    pub account_index: i64,
    pub api_key_index: u8,
    pub market_index: u8,
    /// Basis points. 10x leverage is 1_000.
    pub initial_margin_fraction: u16,
    pub margin_mode: u8,
    pub expired_at: i64,
    pub nonce: i64,
}

impl TxInfo for UpdateLeverageTx {
    fn tx_type(&self) -> TxType {
        TxType::UpdateLeverage
    }

    fn validate(&self) -> Result<(), FieldError> {
        check_account_index(TxField::AccountIndex, self.account_index, MIN_ACCOUNT_INDEX)?;
        check_api_key_index(self.api_key_index)?;
        check_market_index(self.market_index)?;
        check_range(
            TxField::InitialMarginFraction,
            self.initial_margin_fraction,
            MIN_INITIAL_MARGIN_FRACTION,
            MAX_INITIAL_MARGIN_FRACTION,
        )?;
        if MarginMode::from_u8(self.margin_mode).is_none() {
            return Err(FieldError::invalid(TxField::MarginMode));
        }
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

impl WritePreimage for UpdateLeverageTx {
    fn write_preimage(&self, chain_id: u32, _: Seal) -> Result<Preimage, TxError> {
        let mut b = PreimageBuilder::new(chain_id, self.tx_type(), self.nonce, self.expired_at)?;
        b.push(FieldValue::I64(self.account_index))?
            .push(FieldValue::U8(self.api_key_index))?
            .push(FieldValue::U8(self.market_index))?
            .push(FieldValue::U16(self.initial_margin_fraction))?
            .push(FieldValue::U8(self.margin_mode))?;
        Ok(b.finish())
    }
}
