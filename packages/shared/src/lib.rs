// Shared ledger-context types and utilities for the DID registry contracts

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Env, MessageInfo, Timestamp};

/// Maps an identity marker to the organization label it stands for
#[cw_serde]
pub struct Organization {
    /// Byte sequence looked for inside the caller identity
    pub marker: String,
    /// Short label recorded in `createdBy` / `endorsedBy`
    pub label: String,
}

/// Per-transaction view of the ledger: deterministic time and the raw caller
/// identity. Built fresh for every invocation, never cached.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TxContext {
    pub time: Timestamp,
    pub creator: Vec<u8>,
}

impl TxContext {
    pub fn new(env: &Env, info: &MessageInfo) -> Self {
        Self {
            time: env.block.time,
            creator: info.sender.as_bytes().to_vec(),
        }
    }
}

// Common helper functions

/// Append `item` unless already present. Returns true if it was added.
pub fn insert_unique(list: &mut Vec<String>, item: &str) -> bool {
    if list.iter().any(|existing| existing == item) {
        return false;
    }
    list.push(item.to_string());
    true
}

/// Byte-level substring search
pub fn contains_bytes(haystack: &[u8], needle: &[u8]) -> bool {
    if needle.is_empty() {
        return true;
    }
    haystack.windows(needle.len()).any(|window| window == needle)
}
