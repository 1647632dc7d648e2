use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Timestamp};
use cw_storage_plus::{Item, Map};
use shared::Organization;

pub const DEFAULT_UNKNOWN_LABEL: &str = "unknown";

#[cw_serde]
pub struct Config {
    /// May replace the organization table
    pub admin: Option<Addr>,
    /// Identity markers, checked in order
    pub organizations: Vec<Organization>,
    /// Label recorded when no marker matches
    pub unknown_label: String,
}

/// A DID document anchored on the ledger. Field names are the wire names.
#[cw_serde]
#[serde(rename_all = "camelCase")]
pub struct DidRecord {
    pub did: String,
    pub long_form_did: String,
    /// Opaque JSON payload
    pub document: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub version: u64,
    #[serde(default, skip_serializing_if = "is_false")]
    pub recovered: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recovered_at: Option<Timestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recovery_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
    /// Distinct organizations that created or mutated the record, in first-seen order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub endorsed_by: Vec<String>,
}

fn is_false(value: &bool) -> bool {
    !*value
}

pub const CONFIG: Item<Config> = Item::new("config");

/// DID records indexed by short-form DID
pub const DIDS: Map<&str, DidRecord> = Map::new("dids");
