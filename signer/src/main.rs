// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # l2sign
//!
//! Entry point for the `l2sign` binary. Parses CLI arguments, initializes
//! logging and runs one signing-core operation per invocation:
//!
//! - `hash`    : canonical preimage and digest
//! - `sign`    : full pipeline, prints the signed record
//! - `l1-body` : the L1 authorization body
//! - `recover` : L1 address behind a body signature
//! - `keygen`  : fresh keys
//! - `version` : build version information

mod cli;
mod logging;

use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Utc};
use clap::Parser;
use serde_json::json;
use std::io::Read;
use std::path::Path;

use l2sign_protocol::config::chain_name;
use l2sign_protocol::crypto::{
    recover_l1_address, Blake3FieldHasher, Ed25519Signer, EthL1Signer, L1Signer, TxSigner,
};
use l2sign_protocol::transaction::{fill_defaults, L2Tx, NonceSource, TxInfo, TxOpts};

use cli::{Commands, L2SignCli, TxInput};

fn main() -> Result<()> {
    let cli = L2SignCli::parse();
    logging::init_logging(cli.log_format)?;

    match cli.command {
        Commands::Hash(input) => hash_tx(&input),
        Commands::Sign(args) => sign_tx(args),
        Commands::L1Body(input) => print_l1_body(&input),
        Commands::Recover(args) => recover(args),
        Commands::Keygen(args) => keygen(args),
        Commands::Version => {
            print_version();
            Ok(())
        }
    }
}

// ---------------------------------------------------------------------------
// Request loading
// ---------------------------------------------------------------------------

/// The CLI has no network client, so a request with a `-1` nonce and no
/// `--nonce` flag cannot be completed.
struct NoNonceSource;

impl NonceSource for NoNonceSource {
    type Error = &'static str;

    fn next_nonce(&self, _account_index: i64, _api_key_index: u8) -> Result<i64, Self::Error> {
        Err("request nonce is -1 and no --nonce was given")
    }
}

fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(p) if p != Path::new("-") => std::fs::read_to_string(p)
            .with_context(|| format!("failed to read request from {}", p.display())),
        _ => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read request from stdin")?;
            Ok(buf)
        }
    }
}

/// Parses the request and resolves nonce and expiry. Flags override the
/// request's own values.
fn parse_request(raw: &str, input: &TxInput, now: DateTime<Utc>) -> Result<L2Tx> {
    let mut tx = L2Tx::from_json(raw).context("request is not a valid transaction record")?;
    let opts = TxOpts {
        nonce: input.nonce,
        expired_at: input.expired_at,
    };
    fill_defaults(&mut tx, opts, &NoNonceSource, now)?;
    Ok(tx)
}

fn load_request(input: &TxInput) -> Result<L2Tx> {
    let raw = read_input(input.input.as_deref())?;
    let tx = parse_request(&raw, input, Utc::now())?;
    tracing::info!(
        tx_type = %tx.tx_type(),
        account_index = tx.account_index(),
        api_key_index = tx.api_key_index(),
        nonce = tx.nonce(),
        expired_at = tx.expired_at(),
        chain = %chain_name(input.chain_id),
        "request loaded"
    );
    Ok(tx)
}

// ---------------------------------------------------------------------------
// Subcommands
// ---------------------------------------------------------------------------

fn hash_tx(input: &TxInput) -> Result<()> {
    let tx = load_request(input)?;
    let validated = tx.validated()?;
    let preimage = validated.preimage(input.chain_id)?;
    let hashed = validated.hash(input.chain_id, &Blake3FieldHasher)?;

    let out = json!({
        "TxType": hashed.tx().tx_type().to_string(),
        "ChainId": input.chain_id,
        "Preimage": preimage.elements().iter().map(|e| e.as_u64()).collect::<Vec<_>>(),
        "Digest": hashed.digest().to_hex(),
    });
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}

fn sign_tx(args: cli::SignArgs) -> Result<()> {
    let signer = Ed25519Signer::from_hex(&args.private_key).context("invalid --private-key")?;
    let tx = load_request(&args.tx)?;
    let kind = tx.tx_type();
    let hashed = tx.validated()?.hash(args.tx.chain_id, &Blake3FieldHasher)?;

    let signed = match (&args.l1_signature, &args.l1_private_key) {
        (Some(sig), _) => hashed.sign_with_l1_signature(&signer, sig.clone())?,
        (None, Some(key)) => {
            let l1 = EthL1Signer::from_hex(key).context("invalid --l1-private-key")?;
            hashed.sign_with_l1(&signer, &l1)?
        }
        (None, None) => {
            if kind.requires_l1_signature() {
                tracing::warn!(tx_type = %kind, "no L1 key given; the exchange will reject this request");
            }
            hashed.sign(&signer)?
        }
    };

    if let Some(address) = signed.l1_address()? {
        tracing::info!(l1_address = %address, "L1 signature attached");
    }
    tracing::info!(
        tx_type = %kind,
        signed_hash = %signed.signed_hash(),
        public_key = %hex::encode(signer.public_key()),
        "transaction signed"
    );
    println!("{}", signed.to_json()?);
    Ok(())
}

fn print_l1_body(input: &TxInput) -> Result<()> {
    let tx = load_request(input)?;
    let body = l1_body_of(&tx, input.chain_id)?;
    println!("{body}");
    Ok(())
}

fn recover(args: cli::RecoverArgs) -> Result<()> {
    let tx = load_request(&args.tx)?;
    let body = l1_body_of(&tx, args.tx.chain_id)?;
    let address = recover_l1_address(&body, &args.signature)?;
    println!("{}", address.to_checksum(None));
    Ok(())
}

fn l1_body_of(tx: &L2Tx, chain_id: u32) -> Result<String> {
    tx.validate()?;
    tx.l1_body(chain_id)
        .ok_or_else(|| anyhow!("{} has no L1 body", tx.tx_type()))
}

fn keygen(args: cli::KeygenArgs) -> Result<()> {
    let api = Ed25519Signer::generate();
    let mut out = json!({
        "PrivateKey": hex::encode(api.secret_key_bytes()),
        "PublicKey": api.public_key_hex(),
    });
    if args.l1 {
        let l1 = EthL1Signer::generate();
        out["L1PrivateKey"] = json!(format!("0x{}", hex::encode(l1.secret_key_bytes())));
        out["L1Address"] = json!(l1.address().to_checksum(None));
    }
    tracing::info!(public_key = %api.public_key_hex(), "generated API key");
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}

/// Prints version information to stdout.
fn print_version() {
    println!("l2sign    {}", env!("CARGO_PKG_VERSION"));
    println!("rustc     {}", rustc_version());
}

/// Returns the Rust compiler version used to build this binary.
fn rustc_version() -> &'static str {
    option_env!("RUSTC_VERSION").unwrap_or("unknown")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::path::PathBuf;

    const WITHDRAW: &str = r#"{
        "TxType": "Withdraw",
        "FromAccountIndex": 3,
        "ApiKeyIndex": 1,
        "AssetIndex": 1,
        "RouteType": 0,
        "Amount": 100,
        "ExpiredAt": -1,
        "Nonce": -1
    }"#;

    fn input(nonce: Option<i64>, expired_at: Option<i64>) -> TxInput {
        TxInput {
            input: Some(PathBuf::from("-")),
            chain_id: 304,
            nonce,
            expired_at,
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.timestamp_millis_opt(1_000_000).unwrap()
    }

    #[test]
    fn flags_fill_the_request() {
        let tx = parse_request(WITHDRAW, &input(Some(8), None), now()).unwrap();
        assert_eq!(tx.nonce(), 8);
        assert_eq!(tx.expired_at(), 1_000_000 + 599_000);

        let tx = parse_request(WITHDRAW, &input(Some(8), Some(5)), now()).unwrap();
        assert_eq!(tx.expired_at(), 5);
    }

    #[test]
    fn sentinel_nonce_without_flag_fails() {
        let err = parse_request(WITHDRAW, &input(None, None), now()).unwrap_err();
        assert!(err.to_string().contains("nonce unavailable"), "{err}");
    }

    #[test]
    fn withdraw_has_no_l1_body() {
        let tx = parse_request(WITHDRAW, &input(Some(1), None), now()).unwrap();
        let err = l1_body_of(&tx, 304).unwrap_err();
        assert_eq!(err.to_string(), "Withdraw has no L1 body");
    }

    #[test]
    fn garbage_is_rejected_with_context() {
        let err = parse_request("{}", &input(Some(1), None), now()).unwrap_err();
        assert_eq!(err.to_string(), "request is not a valid transaction record");
    }
}
