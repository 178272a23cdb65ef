//! Order placement.
//!
//! Preimage after the header:
//!
//! ```text
//! account, api key, market, client order index, base amount, price,
//! is ask, order type, time in force, reduce only, trigger price, order expiry
//! ```
//!
//! Besides per-field bounds, three rules tie fields together:
//! market orders are immediate-or-cancel, only immediate-or-cancel orders may
//! omit an expiry, and a trigger price is present exactly for stop-loss and
//! take-profit types.

use serde::{Deserialize, Serialize};

use crate::config::{
    MAX_CLIENT_ORDER_INDEX, MAX_ORDER_BASE_AMOUNT, MAX_ORDER_EXPIRY, MAX_ORDER_PRICE,
    MAX_ORDER_TRIGGER_PRICE, MIN_ACCOUNT_INDEX, MIN_CLIENT_ORDER_INDEX, MIN_ORDER_BASE_AMOUNT,
    MIN_ORDER_EXPIRY, MIN_ORDER_PRICE, NIL_ORDER_EXPIRY, NIL_ORDER_TRIGGER_PRICE,
};
use crate::field::FieldValue;
use crate::transaction::contract::sealed::{Seal, WritePreimage};
use crate::transaction::contract::TxInfo;
use crate::transaction::error::{FieldError, TxError, TxField};
use crate::transaction::preimage::{Preimage, PreimageBuilder};
use crate::transaction::types::{OrderType, TimeInForce, TxType};
use crate::transaction::validation::{
    check_account_index, check_api_key_index, check_flag, check_market_index,
    check_operational, check_range,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateOrderTx {
    pub account_index: i64,
    pub api_key_index: u8,
    pub market_index: u8,
    pub client_order_index: i64,
    pub base_amount: i64,
    pub price: u32,
    pub is_ask: u8,
    #[serde(rename = "Type")]
    pub order_type: u8,
    pub time_in_force: u8,
    pub reduce_only: u8,
    pub trigger_price: u32,
    pub order_expiry: i64,
    pub expired_at: i64,
    pub nonce: i64,
}

impl TxInfo for CreateOrderTx {
    fn tx_type(&self) -> TxType {
        TxType::CreateOrder
    }

    fn validate(&self) -> Result<(), FieldError> {
        check_account_index(TxField::AccountIndex, self.account_index, MIN_ACCOUNT_INDEX)?;
        check_api_key_index(self.api_key_index)?;
        check_market_index(self.market_index)?;
        check_range(
            TxField::ClientOrderIndex,
            self.client_order_index,
            MIN_CLIENT_ORDER_INDEX,
            MAX_CLIENT_ORDER_INDEX,
        )?;
        check_range(
            TxField::BaseAmount,
            self.base_amount,
            MIN_ORDER_BASE_AMOUNT,
            MAX_ORDER_BASE_AMOUNT,
        )?;
        check_range(TxField::Price, self.price, MIN_ORDER_PRICE, MAX_ORDER_PRICE)?;
        check_flag(TxField::IsAsk, self.is_ask)?;

        let order_type = OrderType::from_u8(self.order_type)
            .ok_or(FieldError::invalid(TxField::OrderType))?;
        let time_in_force = TimeInForce::from_u8(self.time_in_force)
            .ok_or(FieldError::invalid(TxField::TimeInForce))?;
        if order_type == OrderType::Market && time_in_force != TimeInForce::ImmediateOrCancel {
            return Err(FieldError::invalid(TxField::TimeInForce));
        }

        check_flag(TxField::ReduceOnly, self.reduce_only)?;

        if order_type.is_triggered() {
            if self.trigger_price == NIL_ORDER_TRIGGER_PRICE {
                return Err(FieldError::invalid(TxField::TriggerPrice));
            }
            check_range(
                TxField::TriggerPrice,
                self.trigger_price,
                NIL_ORDER_TRIGGER_PRICE + 1,
                MAX_ORDER_TRIGGER_PRICE,
            )?;
        } else if self.trigger_price != NIL_ORDER_TRIGGER_PRICE {
            return Err(FieldError::invalid(TxField::TriggerPrice));
        }

        if self.order_expiry == NIL_ORDER_EXPIRY {
            if time_in_force != TimeInForce::ImmediateOrCancel {
                return Err(FieldError::invalid(TxField::OrderExpiry));
            }
        } else {
            check_range(
                TxField::OrderExpiry,
                self.order_expiry,
                MIN_ORDER_EXPIRY,
                MAX_ORDER_EXPIRY,
            )?;
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

impl WritePreimage for CreateOrderTx {
    fn write_preimage(&self, chain_id: u32, _: Seal) -> Result<Preimage, TxError> {
        let mut b = PreimageBuilder::new(chain_id, self.tx_type(), self.nonce, self.expired_at)?;
        b.push(FieldValue::I64(self.account_index))?
            .push(FieldValue::U8(self.api_key_index))?
            .push(FieldValue::U8(self.market_index))?
            .push(FieldValue::I64(self.client_order_index))?
            .push(FieldValue::I64(self.base_amount))?
            .push(FieldValue::U32(self.price))?
            .push(FieldValue::U8(self.is_ask))?
            .push(FieldValue::U8(self.order_type))?
            .push(FieldValue::U8(self.time_in_force))?
            .push(FieldValue::U8(self.reduce_only))?
            .push(FieldValue::U32(self.trigger_price))?
            .push(FieldValue::I64(self.order_expiry))?;
        Ok(b.finish())
    }
}
