//! Named-operation surface: `(function, args)` pairs as submitted by ledger
//! clients that speak positional string arguments.

use std::ops::RangeInclusive;
use std::vec::IntoIter;

use cosmwasm_std::{to_json_binary, DepsMut, Env, MessageInfo, Response};

use crate::contract::{
    execute_create_did, execute_init_ledger, execute_mutate_did, query_network_info,
    query_version,
};
use crate::error::ContractError;
use crate::registry::{self, Mutation, NewDid};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Operation {
    InitLedger,
    CreateDid(NewDid),
    UpdateDid {
        did: String,
        document: String,
        proof: String,
    },
    RecoverDid {
        did: String,
        document: String,
        proof: String,
    },
    GetDid {
        did: String,
    },
    ListDids,
    GetVersion,
    GetNetworkInfo,
}

impl Operation {
    /// Resolves a function name and checks the argument count
    pub fn parse(function: &str, args: Vec<String>) -> Result<Self, ContractError> {
        match function {
            "InitLedger" => {
                expect_args(args, 0..=0, "none")?;
                Ok(Operation::InitLedger)
            }
            "CreateDID" => {
                let mut args = expect_args(
                    args,
                    3..=5,
                    "3-5: did, longFormDid, documentJSON, [updateKey], [recoveryKey]",
                )?;
                Ok(Operation::CreateDid(NewDid {
                    did: args.next().unwrap_or_default(),
                    long_form_did: args.next().unwrap_or_default(),
                    document: args.next().unwrap_or_default(),
                    update_key: args.next(),
                    recovery_key: args.next(),
                }))
            }
            "UpdateDID" => {
                let mut args =
                    expect_args(args, 3..=3, "3: did, updatedDocumentJSON, operationSignature")?;
                Ok(Operation::UpdateDid {
                    did: args.next().unwrap_or_default(),
                    document: args.next().unwrap_or_default(),
                    proof: args.next().unwrap_or_default(),
                })
            }
            "RecoverDID" => {
                let mut args =
                    expect_args(args, 3..=3, "3: did, newDocumentJSON, recoverySignature")?;
                Ok(Operation::RecoverDid {
                    did: args.next().unwrap_or_default(),
                    document: args.next().unwrap_or_default(),
                    proof: args.next().unwrap_or_default(),
                })
            }
            "GetDID" => {
                let mut args = expect_args(args, 1..=1, "1: did")?;
                Ok(Operation::GetDid {
                    did: args.next().unwrap_or_default(),
                })
            }
            "ListDIDs" => {
                expect_args(args, 0..=0, "none")?;
                Ok(Operation::ListDids)
            }
            "GetVersion" => {
                expect_args(args, 0..=0, "none")?;
                Ok(Operation::GetVersion)
            }
            "GetNetworkInfo" => {
                expect_args(args, 0..=0, "none")?;
                Ok(Operation::GetNetworkInfo)
            }
            other => Err(ContractError::invalid_argument(format!(
                "Invalid function name {}",
                other
            ))),
        }
    }
}

fn expect_args(
    args: Vec<String>,
    arity: RangeInclusive<usize>,
    usage: &str,
) -> Result<IntoIter<String>, ContractError> {
    if !arity.contains(&args.len()) {
        return Err(ContractError::invalid_argument(format!(
            "Incorrect number of arguments. Expecting {}",
            usage
        )));
    }
    Ok(args.into_iter())
}

/// Runs a named operation. Every result is returned as the response data.
pub fn invoke(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    function: &str,
    args: Vec<String>,
) -> Result<Response, ContractError> {
    match Operation::parse(function, args)? {
        Operation::InitLedger => execute_init_ledger(deps.as_ref()),
        Operation::CreateDid(new) => execute_create_did(deps, env, info, new),
        Operation::UpdateDid {
            did,
            document,
            proof,
        } => execute_mutate_did(deps, env, info, Mutation::Update, did, document, proof),
        Operation::RecoverDid {
            did,
            document,
            proof,
        } => execute_mutate_did(deps, env, info, Mutation::Recover, did, document, proof),
        Operation::GetDid { did } => {
            let record = registry::get(deps.storage, &did)?;
            Ok(Response::new()
                .set_data(to_json_binary(&record)?)
                .add_attribute("method", "get_did")
                .add_attribute("did", did))
        }
        Operation::ListDids => {
            let records = registry::list(deps.storage)?;
            Ok(Response::new()
                .set_data(to_json_binary(&records)?)
                .add_attribute("method", "list_dids")
                .add_attribute("count", records.len().to_string()))
        }
        Operation::GetVersion => Ok(Response::new()
            .set_data(to_json_binary(&query_version(deps.as_ref())?)?)
            .add_attribute("method", "get_version")),
        Operation::GetNetworkInfo => Ok(Response::new()
            .set_data(to_json_binary(&query_network_info(deps.as_ref())?)?)
            .add_attribute("method", "get_network_info")),
    }
}
