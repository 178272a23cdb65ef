//! Withdrawal to L1.
//!
//! Preimage after the header: `from, api key, asset, route, amount lo, amount hi`.

use serde::{Deserialize, Serialize};

use crate::config::{MAX_WITHDRAWAL_AMOUNT, MIN_ACCOUNT_INDEX};
use crate::field::FieldValue;
use crate::transaction::contract::sealed::{Seal, WritePreimage};
use crate::transaction::contract::TxInfo;
use crate::transaction::error::{FieldError, TxError, TxField};
use crate::transaction::preimage::{Preimage, PreimageBuilder};
use crate::transaction::types::TxType;
use crate::transaction::validation::{
    check_account_index, check_api_key_index, check_asset_index, check_operational,
    check_route_type,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct WithdrawTx {
    pub from_account_index: i64,
    pub api_key_index: u8,
    pub asset_index: i16,
    pub route_type: u8,
    pub amount: u64,
    pub expired_at: i64,
    pub nonce: i64,
}

impl TxInfo for WithdrawTx {
    fn tx_type(&self) -> TxType {
        TxType::Withdraw
    }

    fn validate(&self) -> Result<(), FieldError> {
        check_account_index(
            TxField::FromAccountIndex,
            self.from_account_index,
            MIN_ACCOUNT_INDEX,
        )?;
        check_api_key_index(self.api_key_index)?;
        check_asset_index(self.asset_index)?;
        check_route_type(TxField::RouteType, self.route_type)?;

        if self.amount == 0 {
            return Err(FieldError::too_low(TxField::Amount));
        }
        if self.amount > MAX_WITHDRAWAL_AMOUNT {
            return Err(FieldError::too_high(TxField::Amount));
        }

        check_operational(self.nonce, self.expired_at)
    }

    fn account_index(&self) -> i64 {
        self.from_account_index
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

impl WritePreimage for WithdrawTx {
    fn write_preimage(&self, chain_id: u32, _: Seal) -> Result<Preimage, TxError> {
        let mut b = PreimageBuilder::new(chain_id, self.tx_type(), self.nonce, self.expired_at)?;
        b.push(FieldValue::I64(self.from_account_index))?
            .push(FieldValue::U8(self.api_key_index))?
            .push(FieldValue::I16(self.asset_index))?
            .push(FieldValue::U8(self.route_type))?
            .push(FieldValue::U64Limbs(self.amount))?;
        Ok(b.finish())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CHAIN_ID_MAINNET, CHAIN_ID_TESTNET, ROUTE_TYPE_SPOT};
    use crate::crypto::Blake3FieldHasher;

    fn withdraw() -> WithdrawTx {
        WithdrawTx {
            from_account_index: 5,
            api_key_index: 0,
            asset_index: 3,
            route_type: ROUTE_TYPE_SPOT,
            amount: 5_000,
            expired_at: 1_000,
            nonce: 1,
        }
    }

    #[test]
    fn amount_bounds() {
        let mut tx = withdraw();
        tx.amount = 0;
        assert_eq!(tx.validate(), Err(FieldError::too_low(TxField::Amount)));
        tx.amount = MAX_WITHDRAWAL_AMOUNT;
        assert!(tx.validate().is_ok());
        tx.amount = MAX_WITHDRAWAL_AMOUNT + 1;
        assert_eq!(tx.validate(), Err(FieldError::too_high(TxField::Amount)));
    }

    #[test]
    fn system_account_may_withdraw() {
        let mut tx = withdraw();
        tx.from_account_index = 0;
        assert!(tx.validate().is_ok());
    }

    #[test]
    fn route_type_is_enumerated() {
        let mut tx = withdraw();
        tx.route_type = 2;
        assert_eq!(tx.validate(), Err(FieldError::invalid(TxField::RouteType)));
    }

    #[test]
    fn asset_and_nonce_bounds() {
        let mut tx = withdraw();
        tx.asset_index = 63;
        assert_eq!(tx.validate(), Err(FieldError::too_high(TxField::AssetIndex)));
        tx.asset_index = 3;
        tx.nonce = -1;
        assert_eq!(tx.validate(), Err(FieldError::too_low(TxField::Nonce)));
        tx.nonce = 1;
        tx.expired_at = -1;
        assert_eq!(tx.validate(), Err(FieldError::invalid(TxField::ExpiredAt)));
    }

    #[test]
    fn preimage_order() {
        let mut tx = withdraw();
        tx.amount = (7u64 << 32) | 6;
        let p = tx.write_preimage(CHAIN_ID_TESTNET, Seal::new()).unwrap();
        let values: Vec<u64> = p.elements().iter().map(|e| e.as_u64()).collect();
        assert_eq!(values, vec![300, 13, 1, 1_000, 5, 0, 3, 1, 6, 7]);
    }

    #[test]
    fn full_u64_amount_encodes_without_reduction() {
        let mut tx = withdraw();
        tx.amount = u64::MAX;
        let p = tx.write_preimage(CHAIN_ID_MAINNET, Seal::new()).unwrap();
        let body: Vec<u64> = p.body().iter().map(|e| e.as_u64()).collect();
        assert_eq!(&body[4..], &[0xFFFF_FFFF, 0xFFFF_FFFF]);
    }

    #[test]
    fn hash_is_deterministic_and_chain_bound() {
        let tx = withdraw();
        let h = Blake3FieldHasher;
        let a = tx.hash(CHAIN_ID_MAINNET, &h).unwrap();
        assert_eq!(a, tx.hash(CHAIN_ID_MAINNET, &h).unwrap());
        assert_ne!(a, tx.hash(CHAIN_ID_TESTNET, &h).unwrap());
    }

    #[test]
    fn hash_refuses_invalid_input() {
        let mut tx = withdraw();
        tx.amount = 0;
        match tx.hash(CHAIN_ID_MAINNET, &Blake3FieldHasher) {
            Err(TxError::Validation(e)) => assert_eq!(e, FieldError::too_low(TxField::Amount)),
            other => panic!("expected Validation, got {:?}", other),
        }
    }

    #[test]
    fn no_l1_body() {
        assert!(withdraw().l1_body(CHAIN_ID_MAINNET).is_none());
    }
}
