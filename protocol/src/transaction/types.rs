//! Core type definitions shared by every transaction kind.
//!
//! Enumerated wire values (route, order type, time in force, ...) stay `u8`
//! inside the request structs so that an out-of-range value reaches the
//! validator and fails with a field error instead of a parse error. The
//! enums here name the legal values.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use crate::config::{self, MEMO_LENGTH, PUB_KEY_LENGTH};

use super::error::{TxError, TxField};

// ---------------------------------------------------------------------------
// TxType
// ---------------------------------------------------------------------------

/// The transaction-type tag mixed into every preimage after the chain id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TxType {
    ChangePubKey,
    CreateSubAccount,
    Transfer,
    Withdraw,
    CreateOrder,
    CancelOrder,
    CancelAllOrders,
    ModifyOrder,
    UpdateLeverage,
}

impl TxType {
    pub const ALL: [TxType; 9] = [
        Self::ChangePubKey,
        Self::CreateSubAccount,
        Self::Transfer,
        Self::Withdraw,
        Self::CreateOrder,
        Self::CancelOrder,
        Self::CancelAllOrders,
        Self::ModifyOrder,
        Self::UpdateLeverage,
    ];

    /// Numeric tag as the verifier knows it.
    pub const fn tag(self) -> u8 {
        match self {
            Self::ChangePubKey => config::TX_TYPE_CHANGE_PUB_KEY,
            Self::CreateSubAccount => config::TX_TYPE_CREATE_SUB_ACCOUNT,
            Self::Transfer => config::TX_TYPE_TRANSFER,
            Self::Withdraw => config::TX_TYPE_WITHDRAW,
            Self::CreateOrder => config::TX_TYPE_CREATE_ORDER,
            Self::CancelOrder => config::TX_TYPE_CANCEL_ORDER,
            Self::CancelAllOrders => config::TX_TYPE_CANCEL_ALL_ORDERS,
            Self::ModifyOrder => config::TX_TYPE_MODIFY_ORDER,
            Self::UpdateLeverage => config::TX_TYPE_UPDATE_LEVERAGE,
        }
    }

    pub fn from_tag(tag: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.tag() == tag)
    }

    /// Whether the protocol requires an L1 authorization signature.
    pub const fn requires_l1_signature(self) -> bool {
        matches!(self, Self::ChangePubKey | Self::Transfer)
    }
}

impl fmt::Display for TxType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::ChangePubKey => "ChangePubKey",
            Self::CreateSubAccount => "CreateSubAccount",
            Self::Transfer => "Transfer",
            Self::Withdraw => "Withdraw",
            Self::CreateOrder => "CreateOrder",
            Self::CancelOrder => "CancelOrder",
            Self::CancelAllOrders => "CancelAllOrders",
            Self::ModifyOrder => "ModifyOrder",
            Self::UpdateLeverage => "UpdateLeverage",
        };
        f.write_str(name)
    }
}

// ---------------------------------------------------------------------------
// Enumerated wire values
// ---------------------------------------------------------------------------

/// Which balance domain an asset moves through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum RouteType {
    Perps = config::ROUTE_TYPE_PERPS,
    Spot = config::ROUTE_TYPE_SPOT,
}

impl RouteType {
    pub fn from_u8(v: u8) -> Option<Self> {
        match v {
            config::ROUTE_TYPE_PERPS => Some(Self::Perps),
            config::ROUTE_TYPE_SPOT => Some(Self::Spot),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum OrderType {
    Limit = 0,
    Market = 1,
    StopLoss = 2,
    StopLossLimit = 3,
    TakeProfit = 4,
    TakeProfitLimit = 5,
    Twap = 6,
}

impl OrderType {
    pub fn from_u8(v: u8) -> Option<Self> {
        match v {
            0 => Some(Self::Limit),
            1 => Some(Self::Market),
            2 => Some(Self::StopLoss),
            3 => Some(Self::StopLossLimit),
            4 => Some(Self::TakeProfit),
            5 => Some(Self::TakeProfitLimit),
            6 => Some(Self::Twap),
            _ => None,
        }
    }

    /// Stop-loss and take-profit variants fire on a trigger price.
    pub const fn is_triggered(self) -> bool {
        matches!(
            self,
            Self::StopLoss | Self::StopLossLimit | Self::TakeProfit | Self::TakeProfitLimit
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum TimeInForce {
    ImmediateOrCancel = 0,
    GoodTillTime = 1,
    PostOnly = 2,
}

impl TimeInForce {
    pub fn from_u8(v: u8) -> Option<Self> {
        match v {
            0 => Some(Self::ImmediateOrCancel),
            1 => Some(Self::GoodTillTime),
            2 => Some(Self::PostOnly),
            _ => None,
        }
    }
}

/// Mode of a cancel-all request, carried in its time-in-force slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum CancelAllMode {
    Immediate = 0,
    Scheduled = 1,
    Abort = 2,
}

impl CancelAllMode {
    pub fn from_u8(v: u8) -> Option<Self> {
        match v {
            0 => Some(Self::Immediate),
            1 => Some(Self::Scheduled),
            2 => Some(Self::Abort),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum MarginMode {
    Cross = 0,
    Isolated = 1,
}

impl MarginMode {
    pub fn from_u8(v: u8) -> Option<Self> {
        match v {
            0 => Some(Self::Cross),
            1 => Some(Self::Isolated),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Fixed-size byte buffers
// ---------------------------------------------------------------------------

fn decode_fixed<const N: usize>(field: TxField, s: &str) -> Result<[u8; N], TxError> {
    let raw = s.trim();
    let raw = raw.strip_prefix("0x").unwrap_or(raw);
    let bytes = hex::decode(raw).map_err(|_| TxError::Malformed {
        field,
        expected: N,
        actual: raw.len() / 2,
    })?;
    fixed_from_slice(field, &bytes)
}

fn fixed_from_slice<const N: usize>(field: TxField, bytes: &[u8]) -> Result<[u8; N], TxError> {
    <[u8; N]>::try_from(bytes).map_err(|_| TxError::Malformed {
        field,
        expected: N,
        actual: bytes.len(),
    })
}

/// A 32-byte memo attached to transfers. Content is never inspected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Memo(pub [u8; MEMO_LENGTH]);

impl Memo {
    pub fn from_slice(bytes: &[u8]) -> Result<Self, TxError> {
        fixed_from_slice(TxField::Memo, bytes).map(Self)
    }

    pub fn from_hex(s: &str) -> Result<Self, TxError> {
        decode_fixed(TxField::Memo, s).map(Self)
    }

    pub fn as_bytes(&self) -> &[u8; MEMO_LENGTH] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl Serialize for Memo {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Memo {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

/// A 40-byte primary-scheme public key, as registered by `ChangePubKey`.
///
/// Each 8-byte little-endian limb must be a canonical field element; that is
/// checked by the validator, not on construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PubKey(pub [u8; PUB_KEY_LENGTH]);

impl PubKey {
    pub fn from_slice(bytes: &[u8]) -> Result<Self, TxError> {
        fixed_from_slice(TxField::PubKey, bytes).map(Self)
    }

    pub fn from_hex(s: &str) -> Result<Self, TxError> {
        decode_fixed(TxField::PubKey, s).map(Self)
    }

    pub fn as_bytes(&self) -> &[u8; PUB_KEY_LENGTH] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl Default for PubKey {
    fn default() -> Self {
        Self([0u8; PUB_KEY_LENGTH])
    }
}

impl Serialize for PubKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for PubKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
