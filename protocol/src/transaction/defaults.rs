//! Operational defaults: filling in nonce and expiry before validation.
//!
//! Callers may leave either value at its sentinel (`-1`). The nonce then
//! comes from a [`NonceSource`] keyed by `(account index, api key index)`,
//! and the expiry from the wall clock plus [`DEFAULT_EXPIRY_HORIZON`].
//! Anything else negative is left alone for the validator to reject.

use chrono::{DateTime, Utc};
use std::convert::Infallible;
use std::fmt;

use crate::config::{DEFAULT_EXPIRY_HORIZON, NIL_EXPIRED_AT, NIL_NONCE};

use super::contract::TxInfo;
use super::error::TxError;

/// Supplies the next nonce for an `(account, api key)` pair, typically by
/// asking the exchange.
pub trait NonceSource {
    type Error: fmt::Display;

    fn next_nonce(&self, account_index: i64, api_key_index: u8) -> Result<i64, Self::Error>;
}

/// Always returns the same nonce. Useful offline and in tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StaticNonce(pub i64);

impl NonceSource for StaticNonce {
    type Error = Infallible;

    fn next_nonce(&self, _account_index: i64, _api_key_index: u8) -> Result<i64, Infallible> {
        Ok(self.0)
    }
}

/// Caller overrides. `None` means "use the request's value, or default it".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TxOpts {
    pub nonce: Option<i64>,
    pub expired_at: Option<i64>,
}

impl TxOpts {
    /// Maps the `-1` sentinels to `None`.
    pub fn from_raw(nonce: i64, expired_at: i64) -> Self {
        Self {
            nonce: (nonce != NIL_NONCE).then_some(nonce),
            expired_at: (expired_at != NIL_EXPIRED_AT).then_some(expired_at),
        }
    }
}

/// `now` in milliseconds plus the default horizon.
pub fn default_expired_at(now: DateTime<Utc>) -> i64 {
    now.timestamp_millis() + DEFAULT_EXPIRY_HORIZON.as_millis() as i64
}

/// Resolves nonce and expiry and writes them into `tx`.
///
/// Precedence for each value: explicit `opts`, then a non-sentinel value
/// already on the request, then the default. The nonce source is only
/// consulted when needed.
pub fn fill_defaults<T: TxInfo, N: NonceSource>(
    tx: &mut T,
    opts: TxOpts,
    source: &N,
    now: DateTime<Utc>,
) -> Result<(), TxError> {
    let nonce = match opts.nonce {
        Some(n) => n,
        None if tx.nonce() != NIL_NONCE => tx.nonce(),
        None => {
            let account_index = tx.account_index();
            let api_key_index = tx.api_key_index();
            let n = source
                .next_nonce(account_index, api_key_index)
                .map_err(|e| TxError::NonceUnavailable {
                    account_index,
                    api_key_index,
                    reason: e.to_string(),
                })?;
            tracing::debug!(account_index, api_key_index, nonce = n, "fetched nonce");
            n
        }
    };

    let expired_at = match opts.expired_at {
        Some(e) => e,
        None if tx.expired_at() != NIL_EXPIRED_AT => tx.expired_at(),
        None => default_expired_at(now),
    };

    tx.set_operational(nonce, expired_at);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transaction::kinds::CancelOrderTx;
    use chrono::TimeZone;
    use std::cell::Cell;

    struct CountingSource {
        calls: Cell<u32>,
    }

    impl NonceSource for CountingSource {
        type Error = String;

        fn next_nonce(&self, account_index: i64, api_key_index: u8) -> Result<i64, String> {
            self.calls.set(self.calls.get() + 1);
            Ok(account_index * 1_000 + i64::from(api_key_index))
        }
    }

    struct FailingSource;

    impl NonceSource for FailingSource {
        type Error = &'static str;

        fn next_nonce(&self, _: i64, _: u8) -> Result<i64, &'static str> {
            Err("exchange unreachable")
        }
    }

    fn request() -> CancelOrderTx {
        CancelOrderTx {
            account_index: 7,
            api_key_index: 3,
            market_index: 0,
            index: 42,
            nonce: NIL_NONCE,
            expired_at: NIL_EXPIRED_AT,
        }
    }

    fn fixed_now() -> DateTime<Utc> {
        Utc.timestamp_millis_opt(1_700_000_000_000).unwrap()
    }

    #[test]
    fn sentinels_are_filled() {
        let mut tx = request();
        let source = CountingSource { calls: Cell::new(0) };
        fill_defaults(&mut tx, TxOpts::default(), &source, fixed_now()).unwrap();
        assert_eq!(tx.nonce, 7_003);
        assert_eq!(tx.expired_at, 1_700_000_000_000 + 599_000);
        assert_eq!(source.calls.get(), 1);
    }

    #[test]
    fn explicit_opts_skip_the_source() {
        let mut tx = request();
        let source = CountingSource { calls: Cell::new(0) };
        fill_defaults(&mut tx, TxOpts::from_raw(5, 9_000), &source, fixed_now()).unwrap();
        assert_eq!((tx.nonce, tx.expired_at), (5, 9_000));
        assert_eq!(source.calls.get(), 0);
    }

    #[test]
    fn request_values_are_kept() {
        let mut tx = request();
        tx.nonce = 11;
        tx.expired_at = 12;
        fill_defaults(&mut tx, TxOpts::default(), &FailingSource, fixed_now()).unwrap();
        assert_eq!((tx.nonce, tx.expired_at), (11, 12));
    }

    #[test]
    fn source_failure_is_reported() {
        let mut tx = request();
        match fill_defaults(&mut tx, TxOpts::default(), &FailingSource, fixed_now()) {
            Err(TxError::NonceUnavailable {
                account_index: 7,
                api_key_index: 3,
                reason,
            }) => assert_eq!(reason, "exchange unreachable"),
            other => panic!("expected NonceUnavailable, got {:?}", other),
        }
    }

    #[test]
    fn other_negative_values_reach_the_validator() {
        let mut tx = request();
        tx.nonce = -5;
        fill_defaults(&mut tx, TxOpts::default(), &StaticNonce(1), fixed_now()).unwrap();
        assert_eq!(tx.nonce, -5);
        assert!(tx.validate().is_err());
    }

    #[test]
    fn from_raw_maps_sentinels() {
        assert_eq!(TxOpts::from_raw(-1, -1), TxOpts::default());
        assert_eq!(
            TxOpts::from_raw(0, 1),
            TxOpts {
                nonce: Some(0),
                expired_at: Some(1)
            }
        );
    }
}
