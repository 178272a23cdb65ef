//! # Validator building blocks
//!
//! Each transaction kind validates by calling these checks in its declared
//! field order and returning on the first failure, so callers always see
//! the same error for the same request.
//!
//! The checks are shared so that a bound is expressed once. Account index is
//! the exception that proves the rule: the minimum is a parameter because a
//! transfer sender must be above the system account while a recipient may
//! be the system account.

use crate::config::{
    MAX_ACCOUNT_INDEX, MAX_API_KEY_INDEX, MAX_ASSET_INDEX, MAX_MARKET_INDEX, MAX_TIMESTAMP,
    MIN_API_KEY_INDEX, MIN_ASSET_INDEX, MIN_MARKET_INDEX, MIN_NONCE, ROUTE_TYPE_PERPS,
    ROUTE_TYPE_SPOT,
};

use crate::field::pack_le_bytes;

use super::error::{FieldError, TxField};

/// `min <= value <= max`, reporting which side failed.
pub fn check_range<T: PartialOrd>(
    field: TxField,
    value: T,
    min: T,
    max: T,
) -> Result<(), FieldError> {
    if value < min {
        return Err(FieldError::too_low(field));
    }
    if value > max {
        return Err(FieldError::too_high(field));
    }
    Ok(())
}

/// Account index in `[min, MAX_ACCOUNT_INDEX]`.
pub fn check_account_index(field: TxField, value: i64, min: i64) -> Result<(), FieldError> {
    check_range(field, value, min, MAX_ACCOUNT_INDEX)
}

pub fn check_api_key_index(value: u8) -> Result<(), FieldError> {
    check_range(
        TxField::ApiKeyIndex,
        value,
        MIN_API_KEY_INDEX,
        MAX_API_KEY_INDEX,
    )
}

pub fn check_asset_index(value: i16) -> Result<(), FieldError> {
    check_range(TxField::AssetIndex, value, MIN_ASSET_INDEX, MAX_ASSET_INDEX)
}

pub fn check_market_index(value: u8) -> Result<(), FieldError> {
    check_range(
        TxField::MarketIndex,
        value,
        MIN_MARKET_INDEX,
        MAX_MARKET_INDEX,
    )
}

/// Route must be exactly perps or spot.
pub fn check_route_type(field: TxField, value: u8) -> Result<(), FieldError> {
    if value != ROUTE_TYPE_PERPS && value != ROUTE_TYPE_SPOT {
        return Err(FieldError::invalid(field));
    }
    Ok(())
}

/// Zero or one, for flags carried as `u8` on the wire.
pub fn check_flag(field: TxField, value: u8) -> Result<(), FieldError> {
    if value > 1 {
        return Err(FieldError::invalid(field));
    }
    Ok(())
}

/// Every 8-byte little-endian limb of the key must be a canonical element.
pub fn check_pub_key(bytes: &[u8]) -> Result<(), FieldError> {
    pack_le_bytes(bytes)
        .map(|_| ())
        .map_err(|_| FieldError::invalid(TxField::PubKey))
}

pub fn check_nonce(nonce: i64) -> Result<(), FieldError> {
    if nonce < MIN_NONCE {
        return Err(FieldError::too_low(TxField::Nonce));
    }
    Ok(())
}

/// Expiry is a single "invalid" error on either side, as the exchange reports it.
pub fn check_expired_at(expired_at: i64) -> Result<(), FieldError> {
    if !(0..=MAX_TIMESTAMP).contains(&expired_at) {
        return Err(FieldError::invalid(TxField::ExpiredAt));
    }
    Ok(())
}

/// The trailing checks every kind ends with.
pub fn check_operational(nonce: i64, expired_at: i64) -> Result<(), FieldError> {
    check_nonce(nonce)?;
    check_expired_at(expired_at)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MIN_ACCOUNT_INDEX;

    #[test]
    fn range_reports_the_failed_side() {
        assert_eq!(
            check_range(TxField::Price, 0u32, 1, 10),
            Err(FieldError::too_low(TxField::Price))
        );
        assert_eq!(
            check_range(TxField::Price, 11u32, 1, 10),
            Err(FieldError::too_high(TxField::Price))
        );
        assert!(check_range(TxField::Price, 1u32, 1, 10).is_ok());
        assert!(check_range(TxField::Price, 10u32, 1, 10).is_ok());
    }

    #[test]
    fn sender_and_recipient_minimums_differ_by_one() {
        let sender_min = MIN_ACCOUNT_INDEX + 1;
        assert!(check_account_index(TxField::ToAccountIndex, 0, MIN_ACCOUNT_INDEX).is_ok());
        assert_eq!(
            check_account_index(TxField::FromAccountIndex, 0, sender_min),
            Err(FieldError::too_low(TxField::FromAccountIndex))
        );
    }

    #[test]
    fn account_index_upper_bound() {
        assert!(check_account_index(TxField::AccountIndex, MAX_ACCOUNT_INDEX, 0).is_ok());
        assert_eq!(
            check_account_index(TxField::AccountIndex, MAX_ACCOUNT_INDEX + 1, 0),
            Err(FieldError::too_high(TxField::AccountIndex))
        );
    }

    #[test]
    fn api_key_255_is_reserved() {
        assert!(check_api_key_index(254).is_ok());
        assert_eq!(
            check_api_key_index(255),
            Err(FieldError::too_high(TxField::ApiKeyIndex))
        );
    }

    #[test]
    fn route_type_enumeration() {
        assert!(check_route_type(TxField::RouteType, ROUTE_TYPE_PERPS).is_ok());
        assert!(check_route_type(TxField::RouteType, ROUTE_TYPE_SPOT).is_ok());
        for bad in [2u8, 3, 255] {
            assert_eq!(
                check_route_type(TxField::RouteType, bad),
                Err(FieldError::invalid(TxField::RouteType))
            );
        }
    }

    #[test]
    fn flags_are_zero_or_one() {
        assert!(check_flag(TxField::IsAsk, 0).is_ok());
        assert!(check_flag(TxField::IsAsk, 1).is_ok());
        assert_eq!(
            check_flag(TxField::ReduceOnly, 2),
            Err(FieldError::invalid(TxField::ReduceOnly))
        );
    }

    #[test]
    fn pub_key_limbs_must_be_canonical() {
        assert!(check_pub_key(&[0u8; 40]).is_ok());
        let mut bad = [0u8; 40];
        bad[8..16].copy_from_slice(&u64::MAX.to_le_bytes());
        assert_eq!(
            check_pub_key(&bad),
            Err(FieldError::invalid(TxField::PubKey))
        );
    }

    #[test]
    fn expired_at_bounds() {
        assert!(check_expired_at(0).is_ok());
        assert!(check_expired_at(MAX_TIMESTAMP).is_ok());
        assert_eq!(
            check_expired_at(-1),
            Err(FieldError::invalid(TxField::ExpiredAt))
        );
        assert_eq!(
            check_expired_at(MAX_TIMESTAMP + 1),
            Err(FieldError::invalid(TxField::ExpiredAt))
        );
    }

    #[test]
    fn nonce_runs_before_expiry() {
        assert_eq!(
            check_operational(-1, -1),
            Err(FieldError::too_low(TxField::Nonce))
        );
    }
}
