//! Walkthrough of the signing pipeline.
//!
//! Builds a transfer with sentinel nonce and expiry, fills them in, shows the
//! canonical preimage, signs with an API key and the owner's L1 key, and
//! recovers the L1 address from the signed record.
//!
//! Run with:
//!   cargo run --example demo

use std::time::Instant;

use chrono::Utc;

use l2sign_protocol::config::{CHAIN_ID_MAINNET, NIL_EXPIRED_AT, NIL_NONCE};
use l2sign_protocol::crypto::{Blake3FieldHasher, Ed25519Signer, EthL1Signer, L1Signer};
use l2sign_protocol::transaction::{
    fill_defaults, Memo, StaticNonce, TransferTx, TxError, TxInfo, TxOpts,
};

// ---------------------------------------------------------------------------
// ANSI color constants
// ---------------------------------------------------------------------------

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const CYAN: &str = "\x1b[36m";
const WHITE: &str = "\x1b[37m";

// ---------------------------------------------------------------------------
// Display helpers
// ---------------------------------------------------------------------------

fn section(num: u32, title: &str) {
    println!();
    println!("{BOLD}{CYAN}===[{YELLOW} Step {num} {CYAN}]==================================={RESET}");
    println!("{BOLD}{WHITE}  {title}{RESET}");
}

fn success(text: &str) {
    println!("{GREEN}  [OK] {text}{RESET}");
}

fn info(label: &str, value: &str) {
    println!("{WHITE}  {BOLD}{label}:{RESET} {YELLOW}{value}{RESET}");
}

fn main() -> Result<(), TxError> {
    let api_key = Ed25519Signer::generate();
    let l1_key = EthL1Signer::generate();

    section(1, "Build a transfer request");
    let mut tx = TransferTx {
        from_account_index: 21,
        api_key_index: 3,
        to_account_index: 22,
        asset_index: 1,
        from_route_type: 0,
        to_route_type: 0,
        amount: 2_500_000,
        usdc_fee: 0,
        memo: Memo::default(),
        expired_at: NIL_EXPIRED_AT,
        nonce: NIL_NONCE,
    };
    fill_defaults(&mut tx, TxOpts::default(), &StaticNonce(42), Utc::now())?;
    info("nonce", &tx.nonce.to_string());
    info("expired at", &tx.expired_at.to_string());

    section(2, "Validate and build the canonical preimage");
    let validated = tx.validated()?;
    let preimage = validated.preimage(CHAIN_ID_MAINNET)?;
    for (i, e) in preimage.elements().iter().enumerate() {
        println!("{DIM}  [{i:>2}]{RESET} {}", e.as_u64());
    }

    section(3, "Hash and sign");
    let start = Instant::now();
    let signed = validated
        .hash(CHAIN_ID_MAINNET, &Blake3FieldHasher)?
        .sign_with_l1(&api_key, &l1_key)?;
    info("signed hash", signed.signed_hash());
    info("elapsed", &format!("{:.2} ms", start.elapsed().as_secs_f64() * 1000.0));

    section(4, "L1 authorization");
    let recovered = signed.l1_address()?;
    if recovered == Some(l1_key.address()) {
        success("L1 signature recovers the owner's address");
    }
    info("owner", &l1_key.address().to_checksum(None));

    section(5, "Signed record");
    println!("{}", signed.to_json()?);
    Ok(())
}
