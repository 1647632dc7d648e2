use cosmwasm_std::{
    entry_point, to_json_binary, Binary, Deps, DepsMut, Env, Event, MessageInfo, Response,
    Storage,
};
use cw2::{get_contract_version, set_contract_version};
use shared::{Organization, TxContext};

use crate::dispatch;
use crate::error::ContractError;
use crate::identity::{validate_organizations, MarkerResolver};
use crate::msg::{ExecuteMsg, InstantiateMsg, NetworkInfoResponse, QueryMsg, VersionResponse};
use crate::proof::DigestPrefixValidator;
use crate::registry::{self, DidRegistry, Mutation, NewDid};
use crate::state::{Config, DidRecord, CONFIG, DEFAULT_UNKNOWN_LABEL};

const CONTRACT_NAME: &str = "crates.io:did-registry";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");
const DESCRIPTION: &str =
    "DID registry with update/recovery keys and multi-organization endorsement tracking";

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    validate_organizations(&msg.organizations)?;
    let admin = msg
        .admin
        .map(|admin| deps.api.addr_validate(&admin))
        .transpose()?;
    let unknown_label = unknown_label_or(msg.unknown_label, DEFAULT_UNKNOWN_LABEL)?;

    let config = Config {
        admin,
        organizations: msg.organizations,
        unknown_label,
    };
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("method", "instantiate")
        .add_attribute("organizations", config.organizations.len().to_string())
        .add_attribute("unknown_label", config.unknown_label))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::InitLedger {} => execute_init_ledger(deps.as_ref()),
        ExecuteMsg::CreateDid {
            did,
            long_form_did,
            document,
            update_key,
            recovery_key,
        } => execute_create_did(
            deps,
            env,
            info,
            NewDid {
                did,
                long_form_did,
                document,
                update_key,
                recovery_key,
            },
        ),
        ExecuteMsg::UpdateDid {
            did,
            document,
            proof,
        } => execute_mutate_did(deps, env, info, Mutation::Update, did, document, proof),
        ExecuteMsg::RecoverDid {
            did,
            document,
            proof,
        } => execute_mutate_did(deps, env, info, Mutation::Recover, did, document, proof),
        ExecuteMsg::Invoke { function, args } => dispatch::invoke(deps, env, info, &function, args),
        ExecuteMsg::UpdateOrganizations {
            organizations,
            unknown_label,
        } => execute_update_organizations(deps, info, organizations, unknown_label),
    }
}

pub fn execute_init_ledger(deps: Deps) -> Result<Response, ContractError> {
    let config = load_config(deps.storage)?;
    let labels: Vec<&str> = config
        .organizations
        .iter()
        .map(|org| org.label.as_str())
        .collect();
    deps.api.debug(&format!(
        "did-registry {} ready for organizations [{}]",
        CONTRACT_VERSION,
        labels.join(", ")
    ));

    let confirmation = format!("DID registry {} initialized successfully", CONTRACT_VERSION);
    Ok(Response::new()
        .set_data(Binary::from(confirmation.as_bytes()))
        .add_attribute("method", "init_ledger")
        .add_attribute("organizations", labels.len().to_string()))
}

pub fn execute_create_did(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    new: NewDid,
) -> Result<Response, ContractError> {
    let config = load_config(deps.storage)?;
    let resolver = MarkerResolver::from_config(&config);
    let registry = DidRegistry::new(&DigestPrefixValidator, &resolver);

    let record = registry.create(deps.storage, &TxContext::new(&env, &info), new)?;
    let organization = record.created_by.clone().unwrap_or_default();

    record_response("create_did", "did_created", &record, &organization)
}

pub fn execute_mutate_did(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    mutation: Mutation,
    did: String,
    document: String,
    proof: String,
) -> Result<Response, ContractError> {
    let config = load_config(deps.storage)?;
    let resolver = MarkerResolver::from_config(&config);
    let registry = DidRegistry::new(&DigestPrefixValidator, &resolver);
    let tx = TxContext::new(&env, &info);

    let record = match mutation {
        Mutation::Update => registry.update(deps.storage, &tx, &did, document, &proof)?,
        Mutation::Recover => registry.recover(deps.storage, &tx, &did, document, &proof)?,
    };
    let organization = registry.organization(&tx);

    match mutation {
        Mutation::Update => record_response("update_did", "did_updated", &record, &organization),
        Mutation::Recover => {
            record_response("recover_did", "did_recovered", &record, &organization)
        }
    }
}

pub fn execute_update_organizations(
    deps: DepsMut,
    info: MessageInfo,
    organizations: Vec<Organization>,
    unknown_label: Option<String>,
) -> Result<Response, ContractError> {
    let mut config = load_config(deps.storage)?;

    if config.admin.as_ref() != Some(&info.sender) {
        return Err(ContractError::Unauthorized {
            reason: "only the admin may update organizations".to_string(),
        });
    }

    validate_organizations(&organizations)?;
    config.unknown_label = unknown_label_or(unknown_label, &config.unknown_label)?;
    config.organizations = organizations;
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("method", "update_organizations")
        .add_attribute("admin", info.sender)
        .add_attribute("organizations", config.organizations.len().to_string()))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> Result<Binary, ContractError> {
    match msg {
        QueryMsg::GetDid { did } => Ok(to_json_binary(&registry::get(deps.storage, &did)?)?),
        QueryMsg::ListDids {} => Ok(to_json_binary(&registry::list(deps.storage)?)?),
        QueryMsg::Version {} => Ok(to_json_binary(&query_version(deps)?)?),
        QueryMsg::NetworkInfo {} => Ok(to_json_binary(&query_network_info(deps)?)?),
    }
}

pub fn query_version(deps: Deps) -> Result<VersionResponse, ContractError> {
    let version = get_contract_version(deps.storage)?;
    Ok(VersionResponse {
        contract: version.contract,
        version: version.version,
        description: DESCRIPTION.to_string(),
    })
}

pub fn query_network_info(deps: Deps) -> Result<NetworkInfoResponse, ContractError> {
    let config = load_config(deps.storage)?;
    Ok(NetworkInfoResponse {
        admin: config.admin,
        organizations: config.organizations,
        unknown_label: config.unknown_label,
    })
}

fn load_config(storage: &dyn Storage) -> Result<Config, ContractError> {
    CONFIG
        .load(storage)
        .map_err(|err| ContractError::from_load("config", err))
}

fn unknown_label_or(label: Option<String>, fallback: &str) -> Result<String, ContractError> {
    match label {
        Some(label) if label.is_empty() => Err(ContractError::invalid_argument(
            "unknown_label must not be empty",
        )),
        Some(label) => Ok(label),
        None => Ok(fallback.to_string()),
    }
}

/// Response carrying the serialized record as data, plus attributes and an
/// event for indexers
fn record_response(
    method: &str,
    event: &str,
    record: &DidRecord,
    organization: &str,
) -> Result<Response, ContractError> {
    let event = Event::new(event)
        .add_attribute("did", record.did.as_str())
        .add_attribute("version", record.version.to_string())
        .add_attribute("organization", organization);

    Ok(Response::new()
        .set_data(to_json_binary(record)?)
        .add_event(event)
        .add_attribute("method", method)
        .add_attribute("did", record.did.as_str())
        .add_attribute("version", record.version.to_string())
        .add_attribute("organization", organization))
}
