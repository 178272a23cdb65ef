//! [`L2Tx`]: the closed set of transaction kinds as one value.
//!
//! Used where the kind is only known at runtime: JSON input to the CLI,
//! queues of mixed requests. On the wire it is the kind's own record with a
//! `TxType` discriminator added.

use serde::{Deserialize, Serialize};

use super::contract::sealed::{Seal, WritePreimage};
use super::contract::TxInfo;
use super::error::{FieldError, TxError};
use super::kinds::{
    CancelAllOrdersTx, CancelOrderTx, ChangePubKeyTx, CreateOrderTx, CreateSubAccountTx,
    ModifyOrderTx, TransferTx, UpdateLeverageTx, WithdrawTx,
};
use super::preimage::Preimage;
use super::types::TxType;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "TxType")]
pub enum L2Tx {
    ChangePubKey(ChangePubKeyTx),
    CreateSubAccount(CreateSubAccountTx),
    Transfer(TransferTx),
    Withdraw(WithdrawTx),
    CreateOrder(CreateOrderTx),
    CancelOrder(CancelOrderTx),
    CancelAllOrders(CancelAllOrdersTx),
    ModifyOrder(ModifyOrderTx),
    UpdateLeverage(UpdateLeverageTx),
}

macro_rules! dispatch {
    ($self:expr, $tx:ident => $body:expr) => {
        match $self {
            L2Tx::ChangePubKey($tx) => $body,
            L2Tx::CreateSubAccount($tx) => $body,
            L2Tx::Transfer($tx) => $body,
            L2Tx::Withdraw($tx) => $body,
            L2Tx::CreateOrder($tx) => $body,
            L2Tx::CancelOrder($tx) => $body,
            L2Tx::CancelAllOrders($tx) => $body,
            L2Tx::ModifyOrder($tx) => $body,
            L2Tx::UpdateLeverage($tx) => $body,
        }
    };
}

impl L2Tx {
    /// Parses the exchange's JSON record, discriminated by `TxType`.
    pub fn from_json(json: &str) -> Result<Self, TxError> {
        Ok(serde_json::from_str(json)?)
    }
}

impl TxInfo for L2Tx {
    fn tx_type(&self) -> TxType {
        dispatch!(self, tx => tx.tx_type())
    }

    fn validate(&self) -> Result<(), FieldError> {
        dispatch!(self, tx => tx.validate())
    }

    fn l1_body(&self, chain_id: u32) -> Option<String> {
        dispatch!(self, tx => tx.l1_body(chain_id))
    }

    fn account_index(&self) -> i64 {
        dispatch!(self, tx => tx.account_index())
    }

    fn api_key_index(&self) -> u8 {
        dispatch!(self, tx => tx.api_key_index())
    }

    fn nonce(&self) -> i64 {
        dispatch!(self, tx => tx.nonce())
    }

    fn expired_at(&self) -> i64 {
        dispatch!(self, tx => tx.expired_at())
    }

    fn set_operational(&mut self, nonce: i64, expired_at: i64) {
        dispatch!(self, tx => tx.set_operational(nonce, expired_at))
    }
}

impl WritePreimage for L2Tx {
    fn write_preimage(&self, chain_id: u32, seal: Seal) -> Result<Preimage, TxError> {
        dispatch!(self, tx => tx.write_preimage(chain_id, seal))
    }
}

macro_rules! impl_from_kind {
    ($($variant:ident($ty:ty)),* $(,)?) => {
        $(
            impl From<$ty> for L2Tx {
                fn from(tx: $ty) -> Self {
                    Self::$variant(tx)
                }
            }
        )*
    };
}

impl_from_kind!(
    ChangePubKey(ChangePubKeyTx),
    CreateSubAccount(CreateSubAccountTx),
    Transfer(TransferTx),
    Withdraw(WithdrawTx),
    CreateOrder(CreateOrderTx),
    CancelOrder(CancelOrderTx),
    CancelAllOrders(CancelAllOrdersTx),
    ModifyOrder(ModifyOrderTx),
    UpdateLeverage(UpdateLeverageTx),
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CHAIN_ID_MAINNET;
    use crate::crypto::Blake3FieldHasher;

    fn withdraw() -> WithdrawTx {
        WithdrawTx {
            from_account_index: 5,
            api_key_index: 0,
            asset_index: 3,
            route_type: 0,
            amount: 5_000,
            expired_at: 1_000,
            nonce: 1,
        }
    }

    #[test]
    fn json_roundtrip_carries_discriminator() {
        let tx = L2Tx::from(withdraw());
        let json = serde_json::to_string(&tx).unwrap();
        assert!(json.contains("\"TxType\":\"Withdraw\""));
        assert_eq!(L2Tx::from_json(&json).unwrap(), tx);
    }

    #[test]
    fn envelope_hash_matches_inner() {
        let inner = withdraw();
        let outer = L2Tx::from(inner.clone());
        assert_eq!(outer.tx_type(), TxType::Withdraw);
        assert_eq!(
            outer.hash(CHAIN_ID_MAINNET, &Blake3FieldHasher).unwrap(),
            inner.hash(CHAIN_ID_MAINNET, &Blake3FieldHasher).unwrap()
        );
    }

    #[test]
    fn unknown_kind_is_rejected() {
        assert!(L2Tx::from_json(r#"{"TxType":"Mint","AccountIndex":1}"#).is_err());
    }

    #[test]
    fn set_operational_reaches_the_inner_request() {
        let mut tx = L2Tx::from(withdraw());
        tx.set_operational(42, 4_242);
        assert_eq!((tx.nonce(), tx.expired_at()), (42, 4_242));
    }
}
