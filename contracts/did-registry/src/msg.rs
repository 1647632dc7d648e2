use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::Addr;
use shared::Organization;

use crate::state::DidRecord;

#[cw_serde]
pub struct InstantiateMsg {
    /// Identity markers used to attribute callers to organizations
    pub organizations: Vec<Organization>,
    /// Label for callers matching no marker (defaults to "unknown")
    pub unknown_label: Option<String>,
    /// Account allowed to replace the organization table
    pub admin: Option<String>,
}

#[cw_serde]
pub enum ExecuteMsg {
    /// Confirm the registry is ready
    InitLedger {},
    /// Anchor a new DID record
    CreateDid {
        did: String,
        long_form_did: String,
        document: String,
        update_key: Option<String>,
        recovery_key: Option<String>,
    },
    /// Replace the document, authorized by the update key if one is registered
    UpdateDid {
        did: String,
        document: String,
        proof: String,
    },
    /// Replace the document, authorized by the recovery key if one is registered
    RecoverDid {
        did: String,
        document: String,
        proof: String,
    },
    /// Named-operation entry point: `function` plus positional string arguments
    Invoke { function: String, args: Vec<String> },
    /// Replace the organization table (admin only)
    UpdateOrganizations {
        organizations: Vec<Organization>,
        unknown_label: Option<String>,
    },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    /// Get a DID record
    #[returns(DidRecord)]
    GetDid { did: String },

    /// All DID records in ascending DID order
    #[returns(Vec<DidRecord>)]
    ListDids {},

    /// Contract name and version
    #[returns(VersionResponse)]
    Version {},

    /// Configured organizations
    #[returns(NetworkInfoResponse)]
    NetworkInfo {},
}

// Response types

#[cw_serde]
pub struct VersionResponse {
    pub contract: String,
    pub version: String,
    pub description: String,
}

#[cw_serde]
pub struct NetworkInfoResponse {
    pub admin: Option<Addr>,
    pub organizations: Vec<Organization>,
    pub unknown_label: String,
}
