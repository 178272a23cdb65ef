//! # CLI Interface
//!
//! Defines the command-line argument structure for `l2sign` using `clap`
//! derive. Secrets can come from flags but are meant to come from the
//! environment.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use l2sign_protocol::config::CHAIN_ID_MAINNET;

use crate::logging::LogFormat;

/// Offline signer for layer-2 exchange transactions.
///
/// Reads a JSON transaction request (discriminated by `TxType`), fills in
/// nonce and expiry, validates, hashes and signs it, and prints the signed
/// record on stdout. Logs go to stderr.
#[derive(Parser, Debug)]
#[command(
    name = "l2sign",
    about = "Offline signer for L2 exchange transactions",
    version,
    propagate_version = true
)]
pub struct L2SignCli {
    /// Log output format on stderr.
    #[arg(
        long,
        global = true,
        env = "L2SIGN_LOG_FORMAT",
        value_enum,
        ignore_case = true,
        default_value = "pretty"
    )]
    pub log_format: LogFormat,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the canonical preimage and digest of a request.
    Hash(TxInput),
    /// Validate, hash and sign a request; print the signed record.
    Sign(SignArgs),
    /// Print the L1 body an owner must sign for this request.
    L1Body(TxInput),
    /// Recover the L1 address behind a signature over a request's L1 body.
    Recover(RecoverArgs),
    /// Generate a fresh API key (and optionally an L1 key).
    Keygen(KeygenArgs),
    /// Print version information and exit.
    Version,
}

/// Where the request comes from and how to complete it.
#[derive(Args, Debug, Clone)]
pub struct TxInput {
    /// Path to the JSON request. Reads stdin when omitted or `-`.
    pub input: Option<PathBuf>,

    /// Chain id mixed into the preimage and the transfer L1 body.
    #[arg(long, env = "L2SIGN_CHAIN_ID", default_value_t = CHAIN_ID_MAINNET)]
    pub chain_id: u32,

    /// Overrides the request's nonce. Required when the request carries `-1`.
    #[arg(long, allow_negative_numbers = true)]
    pub nonce: Option<i64>,

    /// Overrides the request's expiry (ms). A `-1` in the request without
    /// this flag becomes now plus just under ten minutes.
    #[arg(long, allow_negative_numbers = true)]
    pub expired_at: Option<i64>,
}

/// Arguments for the `sign` subcommand.
#[derive(Args, Debug)]
pub struct SignArgs {
    #[command(flatten)]
    pub tx: TxInput,

    /// Hex-encoded 32-byte API private key.
    #[arg(long, env = "L2SIGN_PRIVATE_KEY", hide_env_values = true)]
    pub private_key: String,

    /// Hex-encoded secp256k1 L1 private key. Used only for kinds that carry
    /// an L1 body.
    #[arg(long, env = "L2SIGN_L1_PRIVATE_KEY", hide_env_values = true)]
    pub l1_private_key: Option<String>,

    /// A ready-made L1 signature, e.g. from a hardware wallet. Takes
    /// precedence over `--l1-private-key`.
    #[arg(long, conflicts_with = "l1_private_key")]
    pub l1_signature: Option<String>,
}

/// Arguments for the `recover` subcommand.
#[derive(Args, Debug)]
pub struct RecoverArgs {
    #[command(flatten)]
    pub tx: TxInput,

    /// `0x`-prefixed 65-byte L1 signature.
    #[arg(long)]
    pub signature: String,
}

/// Arguments for the `keygen` subcommand.
#[derive(Args, Debug)]
pub struct KeygenArgs {
    /// Also generate a secp256k1 L1 key.
    #[arg(long)]
    pub l1: bool,
}
