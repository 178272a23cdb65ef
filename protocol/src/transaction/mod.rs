//! # Transaction Module
//!
//! Construction, validation, canonical hashing and signing of layer-2
//! exchange transactions.
//!
//! ## Architecture
//!
//! ```text
//! types.rs       : type tags, enumerated wire values, memo and pubkey buffers
//! error.rs       : FieldError (field + violation) and the pipeline TxError
//! validation.rs  : shared bound checks
//! preimage.rs    : header + ordered field elements
//! l1_body.rs     : human-readable L1 authorization bodies
//! contract.rs    : TxInfo, the capability set of every kind
//! kinds/         : one module per transaction kind
//! envelope.rs    : L2Tx, the closed sum of all kinds
//! defaults.rs    : nonce and expiry defaulting
//! signing.rs     : Validated -> Hashed -> SignedTx pipeline
//! ```
//!
//! ## Lifecycle
//!
//! 1. **Construct** a kind (or an [`L2Tx`]) and optionally [`fill_defaults`].
//! 2. **Validate** with [`TxInfo::validated`]. The first violated bound comes
//!    back as a [`FieldError`].
//! 3. **Hash** with [`Validated::hash`] under a chain id and a
//!    [`crate::crypto::MessageHasher`].
//! 4. **Sign** with [`Hashed::sign`] or [`Hashed::sign_with_l1`].
//! 5. **Submit** the JSON from [`SignedTx::to_json`].
//!
//! The preimage order of every kind is part of the protocol. Reordering
//! a `push` in any `write_preimage` produces signatures the exchange rejects.

pub mod contract;
pub mod defaults;
pub mod envelope;
pub mod error;
pub mod kinds;
pub mod l1_body;
pub mod preimage;
pub mod signing;
pub mod types;
pub mod validation;

pub use contract::TxInfo;
pub use defaults::{default_expired_at, fill_defaults, NonceSource, StaticNonce, TxOpts};
pub use envelope::L2Tx;
pub use error::{FieldError, TxError, TxField, Violation};
pub use kinds::{
    CancelAllOrdersTx, CancelOrderTx, ChangePubKeyTx, CreateOrderTx, CreateSubAccountTx,
    ModifyOrderTx, TransferTx, UpdateLeverageTx, WithdrawTx,
};
pub use l1_body::L1Authorized;
pub use preimage::{Preimage, PreimageBuilder};
pub use signing::{Hashed, SignedTx, Validated};
pub use types::{
    CancelAllMode, MarginMode, Memo, OrderType, PubKey, RouteType, TimeInForce, TxType,
};
