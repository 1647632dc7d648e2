//! The DID record state machine.
//!
//! Every operation is a single read-modify-write against the ledger handle it
//! is given. Nothing is written until every check has passed, so a failing call
//! leaves the previously persisted record untouched.

use cosmwasm_std::{Order, Storage, Timestamp};
use shared::{insert_unique, TxContext};

use crate::error::ContractError;
use crate::identity::IdentityResolver;
use crate::proof::{recovery_message, update_message, ProofValidator};
use crate::state::{DidRecord, DIDS};

/// Arguments of a create call. Empty keys mean "no key registered".
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NewDid {
    pub did: String,
    pub long_form_did: String,
    pub document: String,
    pub update_key: Option<String>,
    pub recovery_key: Option<String>,
}

/// The two ways a stored record can be mutated
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mutation {
    Update,
    Recover,
}

impl Mutation {
    pub fn name(self) -> &'static str {
        match self {
            Mutation::Update => "update",
            Mutation::Recover => "recovery",
        }
    }

    fn key(self, record: &DidRecord) -> Option<&str> {
        match self {
            Mutation::Update => record.update_key.as_deref(),
            Mutation::Recover => record.recovery_key.as_deref(),
        }
    }

    fn message(self, did: &str, document: &str, next_version: u64) -> String {
        match self {
            Mutation::Update => update_message(did, document, next_version),
            Mutation::Recover => recovery_message(did, document, next_version),
        }
    }

    fn finish(self, record: &mut DidRecord, time: Timestamp) {
        if self == Mutation::Recover {
            record.recovered = true;
            record.recovered_at = Some(time);
        }
    }
}

/// Applies DID operations using a pluggable proof policy and identity resolver.
/// Holds no ledger state of its own; storage and transaction context are passed
/// to every call.
pub struct DidRegistry<'a> {
    validator: &'a dyn ProofValidator,
    resolver: &'a dyn IdentityResolver,
}

impl<'a> DidRegistry<'a> {
    pub fn new(validator: &'a dyn ProofValidator, resolver: &'a dyn IdentityResolver) -> Self {
        Self {
            validator,
            resolver,
        }
    }

    /// Caller organization for the current transaction
    pub fn organization(&self, tx: &TxContext) -> String {
        self.resolver.resolve(&tx.creator)
    }

    pub fn create(
        &self,
        storage: &mut dyn Storage,
        tx: &TxContext,
        new: NewDid,
    ) -> Result<DidRecord, ContractError> {
        require_did(&new.did)?;

        if DIDS.has(storage, &new.did) {
            return Err(ContractError::AlreadyExists { did: new.did });
        }

        let created_by = self.organization(tx);
        let record = DidRecord {
            did: new.did,
            long_form_did: new.long_form_did,
            document: new.document,
            created_at: tx.time,
            updated_at: tx.time,
            version: 1,
            recovered: false,
            recovered_at: None,
            update_key: new.update_key.filter(|key| !key.is_empty()),
            recovery_key: new.recovery_key.filter(|key| !key.is_empty()),
            endorsed_by: vec![created_by.clone()],
            created_by: Some(created_by),
        };

        DIDS.save(storage, &record.did, &record)?;
        Ok(record)
    }

    pub fn update(
        &self,
        storage: &mut dyn Storage,
        tx: &TxContext,
        did: &str,
        document: String,
        proof: &str,
    ) -> Result<DidRecord, ContractError> {
        self.mutate(storage, tx, Mutation::Update, did, document, proof)
    }

    pub fn recover(
        &self,
        storage: &mut dyn Storage,
        tx: &TxContext,
        did: &str,
        document: String,
        proof: &str,
    ) -> Result<DidRecord, ContractError> {
        self.mutate(storage, tx, Mutation::Recover, did, document, proof)
    }

    fn mutate(
        &self,
        storage: &mut dyn Storage,
        tx: &TxContext,
        mutation: Mutation,
        did: &str,
        document: String,
        proof: &str,
    ) -> Result<DidRecord, ContractError> {
        let mut record = load(storage, did)?;
        let next_version = record
            .version
            .checked_add(1)
            .ok_or_else(|| ContractError::Corruption {
                key: did.to_string(),
                reason: "version counter overflow".to_string(),
            })?;

        if let Some(key) = mutation.key(&record) {
            let message = mutation.message(did, &document, next_version);
            if !self.validator.validate(&message, proof, key) {
                return Err(ContractError::Unauthorized {
                    reason: format!("invalid {} proof for {}", mutation.name(), did),
                });
            }
        }

        let organization = self.organization(tx);
        record.document = document;
        record.updated_at = tx.time;
        record.version = next_version;
        mutation.finish(&mut record, tx.time);
        insert_unique(&mut record.endorsed_by, &organization);

        DIDS.save(storage, did, &record)?;
        Ok(record)
    }
}

pub fn get(storage: &dyn Storage, did: &str) -> Result<DidRecord, ContractError> {
    load(storage, did)
}

/// All records in ascending DID order. The first undecodable record aborts the
/// whole listing.
pub fn list(storage: &dyn Storage) -> Result<Vec<DidRecord>, ContractError> {
    let mut records = Vec::new();
    for item in DIDS.range(storage, None, None, Order::Ascending) {
        let (_, record) = item.map_err(|err| ContractError::from_load("dids", err))?;
        records.push(record);
    }
    Ok(records)
}

fn load(storage: &dyn Storage, did: &str) -> Result<DidRecord, ContractError> {
    require_did(did)?;
    DIDS.may_load(storage, did)
        .map_err(|err| ContractError::from_load(did, err))?
        .ok_or_else(|| ContractError::NotFound {
            did: did.to_string(),
        })
}

fn require_did(did: &str) -> Result<(), ContractError> {
    if did.is_empty() {
        return Err(ContractError::invalid_argument("did must not be empty"));
    }
    Ok(())
}
