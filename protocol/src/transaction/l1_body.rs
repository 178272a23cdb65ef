//! # L1 Signature Body Formatter
//!
//! Transfers and key rotations also need the account owner's L1 key to
//! authorize them. The owner signs a human-readable body rendered from a
//! fixed template. The body is a hash domain of its own: its field order and
//! token widths are independent of the primary preimage and must not be
//! "tidied" to match it.
//!
//! Token rules:
//! - numbers are `0x` + 10 lowercase hex digits, zero padded (40 bits),
//! - byte buffers are bare lowercase hex, any `0x` prefix removed.

use alloy_primitives::Address;

use crate::crypto::{recover_l1_address, L1Error};

use super::contract::TxInfo;

pub const TEMPLATE_TRANSFER: &str = "Transfer\n\nnonce: %s\nfrom: %s (route %s)\napi key: %s\nto: %s (route %s)\nasset: %s\namount: %s\nfee: %s\nchainId: %s\nmemo: %s\nOnly sign this message for a trusted client!";

pub const TEMPLATE_CHANGE_PUB_KEY: &str = "Register Lighter Account\n\npubkey: 0x%s\nnonce: %s\naccount index: %s\napi key index: %s\nOnly sign this message for a trusted client!";

/// Fixed-width numeric token. Values wider than 40 bits are not truncated.
pub fn hex10(value: u64) -> String {
    format!("0x{:010x}", value)
}

/// Byte-buffer token: hex with the first literal `0x` removed.
pub fn bytes_token(bytes: &[u8]) -> String {
    hex::encode(bytes).replacen("0x", "", 1)
}

/// Substitutes `args` into the `%s` slots of `template`, left to right.
pub fn render_template(template: &str, args: &[String]) -> String {
    debug_assert_eq!(
        template.matches("%s").count(),
        args.len(),
        "template slot count mismatch"
    );
    let mut pieces = template.split("%s");
    let mut out = String::with_capacity(template.len() + args.len() * 12);
    if let Some(first) = pieces.next() {
        out.push_str(first);
    }
    for (arg, piece) in args.iter().zip(pieces) {
        out.push_str(arg);
        out.push_str(piece);
    }
    out
}

/// Kinds whose protocol requires an L1 authorization signature.
pub trait L1Authorized: TxInfo {
    /// `renderL1Body(transaction, chainId) -> string`.
    fn l1_signature_body(&self, chain_id: u32) -> String;

    /// Recovers the address that produced `l1_sig` over this body. The
    /// caller decides whether that address may authorize the request.
    fn l1_address(&self, chain_id: u32, l1_sig: &str) -> Result<Address, L1Error> {
        recover_l1_address(&self.l1_signature_body(chain_id), l1_sig)
    }
}
