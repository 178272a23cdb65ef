//! Error types for the signing pipeline.
//!
//! Validation reports exactly one [`FieldError`]: the first constraint that
//! failed, naming the field and the kind of violation. The pair is stable
//! and meant to be matched on by callers.

use serde::Serialize;
use std::fmt;
use thiserror::Error;

use crate::crypto::{HashError, L1Error, SignerError};
use crate::field::CodecError;

use super::types::TxType;

/// Every field the validator can reject.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TxField {
    AccountIndex,
    FromAccountIndex,
    ToAccountIndex,
    ApiKeyIndex,
    AssetIndex,
    RouteType,
    FromRouteType,
    ToRouteType,
    Amount,
    Fee,
    Nonce,
    ExpiredAt,
    Memo,
    PubKey,
    MarketIndex,
    ClientOrderIndex,
    OrderIndex,
    BaseAmount,
    Price,
    IsAsk,
    OrderType,
    TimeInForce,
    TriggerPrice,
    ReduceOnly,
    OrderExpiry,
    CancelAllTime,
    InitialMarginFraction,
    MarginMode,
}

impl fmt::Display for TxField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::AccountIndex => "account index",
            Self::FromAccountIndex => "from account index",
            Self::ToAccountIndex => "to account index",
            Self::ApiKeyIndex => "api key index",
            Self::AssetIndex => "asset index",
            // Both transfer routes report the same way as a withdrawal route.
            Self::RouteType | Self::FromRouteType | Self::ToRouteType => "route type",
            Self::Amount => "amount",
            Self::Fee => "fee",
            Self::Nonce => "nonce",
            Self::ExpiredAt => "expired at",
            Self::Memo => "memo",
            Self::PubKey => "pub key",
            Self::MarketIndex => "market index",
            Self::ClientOrderIndex => "client order index",
            Self::OrderIndex => "order index",
            Self::BaseAmount => "base amount",
            Self::Price => "price",
            Self::IsAsk => "is ask",
            Self::OrderType => "order type",
            Self::TimeInForce => "time in force",
            Self::TriggerPrice => "trigger price",
            Self::ReduceOnly => "reduce only",
            Self::OrderExpiry => "order expiry",
            Self::CancelAllTime => "cancel all time",
            Self::InitialMarginFraction => "initial margin fraction",
            Self::MarginMode => "margin mode",
        };
        f.write_str(name)
    }
}

/// Which side of a field's domain was violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Violation {
    TooLow,
    TooHigh,
    Negative,
    /// Not one of the enumerated values, or inconsistent with another field.
    Invalid,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::TooLow => "too low",
            Self::TooHigh => "too high",
            Self::Negative => "negative",
            Self::Invalid => "invalid",
        })
    }
}

/// A bounds violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error, Serialize)]
#[error("{field} {violation}")]
pub struct FieldError {
    pub field: TxField,
    pub violation: Violation,
}

impl FieldError {
    pub const fn new(field: TxField, violation: Violation) -> Self {
        Self { field, violation }
    }

    pub const fn too_low(field: TxField) -> Self {
        Self::new(field, Violation::TooLow)
    }

    pub const fn too_high(field: TxField) -> Self {
        Self::new(field, Violation::TooHigh)
    }

    pub const fn negative(field: TxField) -> Self {
        Self::new(field, Violation::Negative)
    }

    pub const fn invalid(field: TxField) -> Self {
        Self::new(field, Violation::Invalid)
    }
}

/// Everything that can stop the construct → validate → hash → sign pipeline.
#[derive(Debug, Error)]
pub enum TxError {
    #[error("validation failed: {0}")]
    Validation(#[from] FieldError),

    /// A fixed-size byte buffer had the wrong length or was not hex.
    #[error("malformed {field}: expected {expected} bytes, got {actual}")]
    Malformed {
        field: TxField,
        expected: usize,
        actual: usize,
    },

    /// Unreachable for validated input; signals a codec or bounds defect.
    #[error("encoding failed: {0}")]
    Encoding(#[from] CodecError),

    #[error(transparent)]
    Hash(#[from] HashError),

    #[error(transparent)]
    Signer(#[from] SignerError),

    #[error(transparent)]
    L1(#[from] L1Error),

    /// An L1 signature was supplied for a kind that has no L1 body.
    #[error("{0} does not carry an L1 signature")]
    L1NotApplicable(TxType),

    /// The external nonce source could not supply a nonce.
    #[error("nonce unavailable for account {account_index} key {api_key_index}: {reason}")]
    NonceUnavailable {
        account_index: i64,
        api_key_index: u8,
        reason: String,
    },

    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl TxError {
    /// The field error, if this is a bounds violation.
    pub fn field_error(&self) -> Option<FieldError> {
        match self {
            Self::Validation(e) => Some(*e),
            _ => None,
        }
    }
}
