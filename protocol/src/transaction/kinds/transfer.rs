//! Asset transfer between two accounts.
//!
//! Preimage after the header:
//!
//! ```text
//! from, api key, to, asset, from route, to route,
//! amount lo, amount hi, fee lo, fee hi
//! ```
//!
//! Memo is not part of the preimage. It is covered by the L1 body only.

use serde::{Deserialize, Serialize};

use crate::config::{MAX_TRANSFER_AMOUNT, MIN_ACCOUNT_INDEX};
use crate::field::FieldValue;
use crate::transaction::contract::sealed::{Seal, WritePreimage};
use crate::transaction::contract::TxInfo;
use crate::transaction::error::{FieldError, TxError, TxField};
use crate::transaction::l1_body::{
    bytes_token, hex10, render_template, L1Authorized, TEMPLATE_TRANSFER,
};
use crate::transaction::preimage::{Preimage, PreimageBuilder};
use crate::transaction::types::{Memo, TxType};
use crate::transaction::validation::{
    check_account_index, check_api_key_index, check_asset_index, check_operational,
    check_route_type,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TransferTx {
    pub from_account_index: i64,
    pub api_key_index: u8,
    pub to_account_index: i64,
    pub asset_index: i16,
    pub from_route_type: u8,
    pub to_route_type: u8,
    pub amount: i64,
    #[serde(rename = "USDCFee")]
    pub usdc_fee: i64,
    pub memo: Memo,
    pub expired_at: i64,
    pub nonce: i64,
}

impl TxInfo for TransferTx {
    fn tx_type(&self) -> TxType {
        TxType::Transfer
    }

    fn validate(&self) -> Result<(), FieldError> {
        // The sender must be above the system account; the recipient may be it.
        check_account_index(
            TxField::FromAccountIndex,
            self.from_account_index,
            MIN_ACCOUNT_INDEX + 1,
        )?;
        check_api_key_index(self.api_key_index)?;
        check_account_index(
            TxField::ToAccountIndex,
            self.to_account_index,
            MIN_ACCOUNT_INDEX,
        )?;
        check_asset_index(self.asset_index)?;
        check_route_type(TxField::FromRouteType, self.from_route_type)?;
        check_route_type(TxField::ToRouteType, self.to_route_type)?;

        if self.amount <= 0 {
            return Err(FieldError::too_low(TxField::Amount));
        }
        if self.amount > MAX_TRANSFER_AMOUNT {
            return Err(FieldError::too_high(TxField::Amount));
        }
        if self.usdc_fee < 0 {
            return Err(FieldError::negative(TxField::Fee));
        }
        if self.usdc_fee > MAX_TRANSFER_AMOUNT {
            return Err(FieldError::too_high(TxField::Fee));
        }

        check_operational(self.nonce, self.expired_at)
    }

    fn l1_body(&self, chain_id: u32) -> Option<String> {
        Some(self.l1_signature_body(chain_id))
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

impl WritePreimage for TransferTx {
    fn write_preimage(&self, chain_id: u32, _: Seal) -> Result<Preimage, TxError> {
        let mut b = PreimageBuilder::new(chain_id, self.tx_type(), self.nonce, self.expired_at)?;
        b.push(FieldValue::I64(self.from_account_index))?
            .push(FieldValue::U8(self.api_key_index))?
            .push(FieldValue::I64(self.to_account_index))?
            .push(FieldValue::I16(self.asset_index))?
            .push(FieldValue::U8(self.from_route_type))?
            .push(FieldValue::U8(self.to_route_type))?
            .push(FieldValue::I64Limbs(self.amount))?
            .push(FieldValue::I64Limbs(self.usdc_fee))?;
        Ok(b.finish())
    }
}

impl L1Authorized for TransferTx {
    fn l1_signature_body(&self, chain_id: u32) -> String {
        render_template(
            TEMPLATE_TRANSFER,
            &[
                hex10(self.nonce as u64),
                hex10(self.from_account_index as u64),
                hex10(u64::from(self.from_route_type)),
                hex10(u64::from(self.api_key_index)),
                hex10(self.to_account_index as u64),
                hex10(u64::from(self.to_route_type)),
                hex10(self.asset_index as u64),
                hex10(self.amount as u64),
                hex10(self.usdc_fee as u64),
                hex10(u64::from(chain_id)),
                bytes_token(self.memo.as_bytes()),
            ],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CHAIN_ID_MAINNET, CHAIN_ID_TESTNET, ROUTE_TYPE_PERPS, ROUTE_TYPE_SPOT};
    use crate::crypto::Blake3FieldHasher;
    use crate::field::split_u64;

    fn transfer() -> TransferTx {
        TransferTx {
            from_account_index: 21,
            api_key_index: 3,
            to_account_index: 22,
            asset_index: 1,
            from_route_type: ROUTE_TYPE_PERPS,
            to_route_type: ROUTE_TYPE_SPOT,
            amount: 1_000_000,
            usdc_fee: 250,
            memo: Memo([0xAB; 32]),
            expired_at: 1_700_000_599_000,
            nonce: 9,
        }
    }

    fn expect_field_error(tx: &TransferTx, expected: FieldError) {
        match tx.validate() {
            Err(e) if e == expected => {}
            other => panic!("expected {:?}, got {:?}", expected, other),
        }
    }

    #[test]
    fn valid_transfer_passes() {
        assert!(transfer().validate().is_ok());
    }

    #[test]
    fn amount_bounds() {
        let mut tx = transfer();
        tx.amount = 0;
        expect_field_error(&tx, FieldError::too_low(TxField::Amount));
        tx.amount = -1;
        expect_field_error(&tx, FieldError::too_low(TxField::Amount));
        tx.amount = MAX_TRANSFER_AMOUNT;
        assert!(tx.validate().is_ok());
        tx.amount = MAX_TRANSFER_AMOUNT + 1;
        expect_field_error(&tx, FieldError::too_high(TxField::Amount));
    }

    #[test]
    fn fee_bounds() {
        let mut tx = transfer();
        tx.usdc_fee = 0;
        assert!(tx.validate().is_ok());
        tx.usdc_fee = -1;
        expect_field_error(&tx, FieldError::negative(TxField::Fee));
        tx.usdc_fee = MAX_TRANSFER_AMOUNT + 1;
        expect_field_error(&tx, FieldError::too_high(TxField::Fee));
    }

    #[test]
    fn sender_cannot_be_system_account() {
        let mut tx = transfer();
        tx.from_account_index = 0;
        expect_field_error(&tx, FieldError::too_low(TxField::FromAccountIndex));
        tx.from_account_index = 1;
        tx.to_account_index = 0;
        assert!(tx.validate().is_ok());
    }

    #[test]
    fn route_types_are_enumerated() {
        let mut tx = transfer();
        tx.from_route_type = 2;
        expect_field_error(&tx, FieldError::invalid(TxField::FromRouteType));
        tx.from_route_type = ROUTE_TYPE_SPOT;
        tx.to_route_type = 7;
        expect_field_error(&tx, FieldError::invalid(TxField::ToRouteType));
    }

    #[test]
    fn first_failure_wins() {
        let mut tx = transfer();
        tx.asset_index = 0;
        tx.amount = 0;
        tx.nonce = -3;
        expect_field_error(&tx, FieldError::too_low(TxField::AssetIndex));
    }

    #[test]
    fn preimage_order() {
        let mut tx = transfer();
        tx.amount = 0x0000_0002_0000_0001;
        tx.usdc_fee = 0x0000_0004_0000_0003;
        let p = tx.write_preimage(CHAIN_ID_MAINNET, Seal::new()).unwrap();
        let values: Vec<u64> = p.elements().iter().map(|e| e.as_u64()).collect();
        assert_eq!(
            values,
            vec![
                304,
                12,
                9,
                1_700_000_599_000,
                21,
                3,
                22,
                1,
                0,
                1,
                1,
                2,
                3,
                4
            ]
        );
    }

    #[test]
    fn amount_limbs_are_low_first() {
        let tx = transfer();
        let p = tx.write_preimage(CHAIN_ID_MAINNET, Seal::new()).unwrap();
        let (lo, hi) = split_u64(tx.amount as u64);
        assert_eq!(p.body()[6], lo);
        assert_eq!(p.body()[7], hi);
    }

    #[test]
    fn memo_is_outside_the_preimage() {
        let a = transfer();
        let mut b = transfer();
        b.memo = Memo([0u8; 32]);
        assert_eq!(
            a.hash(CHAIN_ID_MAINNET, &Blake3FieldHasher).unwrap(),
            b.hash(CHAIN_ID_MAINNET, &Blake3FieldHasher).unwrap()
        );
        assert_ne!(
            a.l1_signature_body(CHAIN_ID_MAINNET),
            b.l1_signature_body(CHAIN_ID_MAINNET)
        );
    }

    #[test]
    fn l1_body_golden() {
        let body = transfer().l1_signature_body(CHAIN_ID_MAINNET);
        let expected = format!(
            "Transfer\n\n\
             nonce: 0x0000000009\n\
             from: 0x0000000015 (route 0x0000000000)\n\
             api key: 0x0000000003\n\
             to: 0x0000000016 (route 0x0000000001)\n\
             asset: 0x0000000001\n\
             amount: 0x00000f4240\n\
             fee: 0x00000000fa\n\
             chainId: 0x0000000130\n\
             memo: {}\n\
             Only sign this message for a trusted client!",
            "ab".repeat(32)
        );
        assert_eq!(body, expected);
    }

    #[test]
    fn l1_body_golden_zero_memo() {
        let tx = TransferTx {
            from_account_index: 1,
            api_key_index: 0,
            to_account_index: 2,
            asset_index: 1,
            from_route_type: 0,
            to_route_type: 0,
            amount: 5,
            usdc_fee: 0,
            memo: Memo::default(),
            expired_at: 1_700_000_599_000,
            nonce: 0,
        };
        let expected = format!(
            "Transfer\n\n\
             nonce: 0x0000000000\n\
             from: 0x0000000001 (route 0x0000000000)\n\
             api key: 0x0000000000\n\
             to: 0x0000000002 (route 0x0000000000)\n\
             asset: 0x0000000001\n\
             amount: 0x0000000005\n\
             fee: 0x0000000000\n\
             chainId: 0x000000012c\n\
             memo: {}\n\
             Only sign this message for a trusted client!",
            "0".repeat(64)
        );
        assert_eq!(tx.l1_signature_body(CHAIN_ID_TESTNET), expected);
    }

    #[test]
    fn l1_body_changes_one_token_per_field() {
        let a = transfer().l1_signature_body(CHAIN_ID_MAINNET);
        let mut tx = transfer();
        tx.amount += 1;
        let b = tx.l1_signature_body(CHAIN_ID_MAINNET);
        let diff: Vec<_> = a.lines().zip(b.lines()).filter(|(x, y)| x != y).collect();
        assert_eq!(diff, vec![("amount: 0x00000f4240", "amount: 0x00000f4241")]);
    }

    #[test]
    fn serializes_with_exchange_field_names() {
        let value = serde_json::to_value(transfer()).unwrap();
        assert_eq!(value["FromAccountIndex"], 21);
        assert_eq!(value["USDCFee"], 250);
        assert_eq!(value["Memo"], "ab".repeat(32));
        let back: TransferTx = serde_json::from_value(value).unwrap();
        assert_eq!(back, transfer());
    }
}
