//! DID registry contract: anchors DID documents on the ledger, gates updates
//! and recovery behind registered keys, and records which organizations have
//! touched each record.

pub mod contract;
pub mod dispatch;
mod error;
pub mod identity;
pub mod msg;
pub mod proof;
pub mod registry;
pub mod state;

pub use crate::error::ContractError;
