//! One module per transaction kind. Each declares its fields, its bounds
//! (in check order) and its preimage order.

pub mod cancel_all_orders;
pub mod cancel_order;
pub mod change_pub_key;
pub mod create_order;
pub mod create_sub_account;
pub mod modify_order;
pub mod transfer;
pub mod update_leverage;
pub mod withdraw;

pub use cancel_all_orders::CancelAllOrdersTx;
pub use cancel_order::CancelOrderTx;
pub use change_pub_key::ChangePubKeyTx;
pub use create_order::CreateOrderTx;
pub use create_sub_account::CreateSubAccountTx;
pub use modify_order::ModifyOrderTx;
pub use transfer::TransferTx;
pub use update_leverage::UpdateLeverageTx;
pub use withdraw::WithdrawTx;
