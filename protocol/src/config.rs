//! # Protocol Configuration & Constants
//!
//! Every bound, tag and magic number the signing core relies on lives here.
//! These values are shared with the exchange's verifier: changing any of them
//! changes which messages verify, so they move only with a protocol version
//! bump.

use std::time::Duration;

// ---------------------------------------------------------------------------
// Chain Identifiers
// ---------------------------------------------------------------------------

/// Mainnet chain identifier, mixed into every preimage as the domain tag.
pub const CHAIN_ID_MAINNET: u32 = 304;

/// Testnet chain identifier.
pub const CHAIN_ID_TESTNET: u32 = 300;

/// Returns a friendly name for a chain id, mainly for logging.
pub fn chain_name(chain_id: u32) -> String {
    match chain_id {
        CHAIN_ID_MAINNET => "mainnet".to_string(),
        CHAIN_ID_TESTNET => "testnet".to_string(),
        other => format!("unknown({})", other),
    }
}

// ---------------------------------------------------------------------------
// Transaction Type Tags
// ---------------------------------------------------------------------------

pub const TX_TYPE_CHANGE_PUB_KEY: u8 = 8;
pub const TX_TYPE_CREATE_SUB_ACCOUNT: u8 = 9;
pub const TX_TYPE_TRANSFER: u8 = 12;
pub const TX_TYPE_WITHDRAW: u8 = 13;
pub const TX_TYPE_CREATE_ORDER: u8 = 14;
pub const TX_TYPE_CANCEL_ORDER: u8 = 15;
pub const TX_TYPE_CANCEL_ALL_ORDERS: u8 = 16;
pub const TX_TYPE_MODIFY_ORDER: u8 = 17;
pub const TX_TYPE_UPDATE_LEVERAGE: u8 = 20;

// ---------------------------------------------------------------------------
// Field & Digest Parameters
// ---------------------------------------------------------------------------

/// The Goldilocks prime, `2^64 - 2^32 + 1`. Field elements hold values
/// strictly below this, which is why full 64-bit quantities are split.
pub const FIELD_MODULUS: u64 = 0xFFFF_FFFF_0000_0001;

/// Digest length: one quintic extension element, five 8-byte limbs.
pub const DIGEST_LENGTH: usize = 40;

/// Primary public key length, also five canonical 8-byte limbs.
pub const PUB_KEY_LENGTH: usize = 40;

/// Memo buffers are exactly this long and carry no content validation.
pub const MEMO_LENGTH: usize = 32;

// ---------------------------------------------------------------------------
// Identity Bounds
// ---------------------------------------------------------------------------

pub const MIN_ACCOUNT_INDEX: i64 = 0;
pub const MAX_ACCOUNT_INDEX: i64 = (1 << 48) - 2;

pub const MIN_API_KEY_INDEX: u8 = 0;
/// 255 is reserved as the "no key" sentinel.
pub const MAX_API_KEY_INDEX: u8 = 254;
pub const NIL_API_KEY_INDEX: u8 = 255;

pub const MIN_NONCE: i64 = 0;

/// Upper bound on any millisecond timestamp carried in a transaction.
pub const MAX_TIMESTAMP: i64 = (1 << 48) - 1;

// ---------------------------------------------------------------------------
// Asset & Route Bounds
// ---------------------------------------------------------------------------

pub const MIN_ASSET_INDEX: i16 = 1;
pub const MAX_ASSET_INDEX: i16 = 62;

pub const ROUTE_TYPE_PERPS: u8 = 0;
pub const ROUTE_TYPE_SPOT: u8 = 1;

pub const MAX_TRANSFER_AMOUNT: i64 = (1 << 60) - 1;
pub const MAX_WITHDRAWAL_AMOUNT: u64 = (1 << 60) - 1;

// ---------------------------------------------------------------------------
// Order Bounds
// ---------------------------------------------------------------------------

pub const MIN_MARKET_INDEX: u8 = 0;
pub const MAX_MARKET_INDEX: u8 = 254;

pub const MIN_CLIENT_ORDER_INDEX: i64 = 0;
pub const MAX_CLIENT_ORDER_INDEX: i64 = (1 << 48) - 1;

pub const MIN_ORDER_INDEX: i64 = 0;
pub const MAX_ORDER_INDEX: i64 = (1 << 56) - 1;

pub const MIN_ORDER_BASE_AMOUNT: i64 = 1;
pub const MAX_ORDER_BASE_AMOUNT: i64 = (1 << 48) - 1;

pub const MIN_ORDER_PRICE: u32 = 1;
pub const MAX_ORDER_PRICE: u32 = u32::MAX;

pub const NIL_ORDER_TRIGGER_PRICE: u32 = 0;
pub const MAX_ORDER_TRIGGER_PRICE: u32 = u32::MAX;

pub const NIL_ORDER_EXPIRY: i64 = 0;
pub const MIN_ORDER_EXPIRY: i64 = 1;
pub const MAX_ORDER_EXPIRY: i64 = MAX_TIMESTAMP;

pub const NIL_CANCEL_ALL_TIME: i64 = 0;
pub const MIN_CANCEL_ALL_TIME: i64 = 1;
pub const MAX_CANCEL_ALL_TIME: i64 = MAX_TIMESTAMP;

// ---------------------------------------------------------------------------
// Margin Bounds
// ---------------------------------------------------------------------------

pub const MIN_INITIAL_MARGIN_FRACTION: u16 = 1;
/// Margin fractions are expressed in basis points of 1.
pub const MAX_INITIAL_MARGIN_FRACTION: u16 = 10_000;

// ---------------------------------------------------------------------------
// Operational Defaults
// ---------------------------------------------------------------------------

/// Sentinel a caller passes when the nonce should be fetched for them.
pub const NIL_NONCE: i64 = -1;

/// Sentinel a caller passes when the expiry should be defaulted.
pub const NIL_EXPIRED_AT: i64 = -1;

/// Default expiry horizon. One second short of ten minutes so a request
/// built at the edge of the window is still accepted by the sequencer.
pub const DEFAULT_EXPIRY_HORIZON: Duration = Duration::from_millis(10 * 60 * 1_000 - 1_000);
