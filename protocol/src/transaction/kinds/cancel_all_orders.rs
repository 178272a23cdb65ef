//! Cancel every open order on the account, now or at a scheduled time.
//!
//! Preimage after the header: `account, api key, time in force, time`.
//!
//! The time-in-force slot carries a [`CancelAllMode`]. `Scheduled` needs a
//! time; `Immediate` and `Abort` (which cancels a pending schedule) must
//! leave it at zero.

use serde::{Deserialize, Serialize};

use crate::config::{
    MAX_CANCEL_ALL_TIME, MIN_ACCOUNT_INDEX, MIN_CANCEL_ALL_TIME, NIL_CANCEL_ALL_TIME,
};
use crate::field::FieldValue;
use crate::transaction::contract::sealed::{Seal, WritePreimage};
use crate::transaction::contract::TxInfo;
use crate::transaction::error::{FieldError, TxError, TxField};
use crate::transaction::preimage::{Preimage, PreimageBuilder};
use crate::transaction::types::{CancelAllMode, TxType};
use crate::transaction::validation::{
    check_account_index, check_api_key_index, check_operational, check_range,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CancelAllOrdersTx {
    pub account_index: i64,
    pub api_key_index: u8,
    pub time_in_force: u8,
    pub time: i64,
    pub expired_at: i64,
    pub nonce: i64,
}

impl TxInfo for CancelAllOrdersTx {
    fn tx_type(&self) -> TxType {
        TxType::CancelAllOrders
    }

    fn validate(&self) -> Result<(), FieldError> {
        check_account_index(TxField::AccountIndex, self.account_index, MIN_ACCOUNT_INDEX)?;
        check_api_key_index(self.api_key_index)?;

        let mode = CancelAllMode::from_u8(self.time_in_force)
            .ok_or(FieldError::invalid(TxField::TimeInForce))?;
        match mode {
            CancelAllMode::Scheduled => check_range(
                TxField::CancelAllTime,
                self.time,
                MIN_CANCEL_ALL_TIME,
                MAX_CANCEL_ALL_TIME,
            )?,
            CancelAllMode::Immediate | CancelAllMode::Abort => {
                if self.time != NIL_CANCEL_ALL_TIME {
                    return Err(FieldError::invalid(TxField::CancelAllTime));
                }
            }
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

impl WritePreimage for CancelAllOrdersTx {
    fn write_preimage(&self, chain_id: u32, _: Seal) -> Result<Preimage, TxError> {
        let mut b = PreimageBuilder::new(chain_id, self.tx_type(), self.nonce, self.expired_at)?;
        b.push(FieldValue::I64(self.account_index))?
            .push(FieldValue::U8(self.api_key_index))?
            .push(FieldValue::U8(self.time_in_force))?
            .push(FieldValue::I64(self.time))?;
        Ok(b.finish())
    }
}
