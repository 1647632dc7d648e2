use shared::{contains_bytes, Organization};

use crate::error::ContractError;
use crate::state::Config;

/// Maps opaque caller identity bytes to an organization label
pub trait IdentityResolver {
    fn resolve(&self, identity: &[u8]) -> String;
}

/// Table-driven resolver: the first organization whose marker occurs in the
/// identity wins, otherwise the unknown label.
#[derive(Clone, Debug)]
pub struct MarkerResolver<'a> {
    organizations: &'a [Organization],
    unknown_label: &'a str,
}

impl<'a> MarkerResolver<'a> {
    pub fn new(organizations: &'a [Organization], unknown_label: &'a str) -> Self {
        Self {
            organizations,
            unknown_label,
        }
    }

    pub fn from_config(config: &'a Config) -> Self {
        Self::new(&config.organizations, &config.unknown_label)
    }
}

impl IdentityResolver for MarkerResolver<'_> {
    fn resolve(&self, identity: &[u8]) -> String {
        self.organizations
            .iter()
            .find(|org| contains_bytes(identity, org.marker.as_bytes()))
            .map(|org| org.label.clone())
            .unwrap_or_else(|| self.unknown_label.to_string())
    }
}

/// Rejects empty markers or labels and duplicate markers
pub fn validate_organizations(organizations: &[Organization]) -> Result<(), ContractError> {
    for (idx, org) in organizations.iter().enumerate() {
        if org.marker.is_empty() {
            return Err(ContractError::invalid_argument(format!(
                "organization {} has an empty marker",
                idx
            )));
        }
        if org.label.is_empty() {
            return Err(ContractError::invalid_argument(format!(
                "organization marker {} has an empty label",
                org.marker
            )));
        }
        if organizations[..idx].iter().any(|o| o.marker == org.marker) {
            return Err(ContractError::invalid_argument(format!(
                "duplicate organization marker {}",
                org.marker
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn orgs() -> Vec<Organization> {
        vec![
            Organization {
                marker: "m-FQEEX22AZNEGDDJL4WCQP6KYHU".to_string(),
                label: "CompanyA".to_string(),
            },
            Organization {
                marker: "m-JLGL2ZEX6BDIXIEFYD4RJVZSTI".to_string(),
                label: "CompanyB".to_string(),
            },
        ]
    }

    #[test]
    fn resolves_known_markers() {
        let orgs = orgs();
        let resolver = MarkerResolver::new(&orgs, "unknown");
        assert_eq!(
            resolver.resolve(b"-----BEGIN CERT----- m-JLGL2ZEX6BDIXIEFYD4RJVZSTI peer1"),
            "CompanyB"
        );
        assert_eq!(resolver.resolve(b"m-FQEEX22AZNEGDDJL4WCQP6KYHU"), "CompanyA");
    }

    #[test]
    fn first_configured_marker_wins() {
        let orgs = orgs();
        let resolver = MarkerResolver::new(&orgs, "unknown");
        let both = b"m-JLGL2ZEX6BDIXIEFYD4RJVZSTI/m-FQEEX22AZNEGDDJL4WCQP6KYHU";
        assert_eq!(resolver.resolve(both), "CompanyA");
    }

    #[test]
    fn unmatched_identity_is_unknown() {
        let orgs = orgs();
        let resolver = MarkerResolver::new(&orgs, "outsider");
        assert_eq!(resolver.resolve(b"some-other-msp"), "outsider");
        assert_eq!(resolver.resolve(&[0xff, 0x00, 0xfe]), "outsider");
        assert_eq!(MarkerResolver::new(&[], "unknown").resolve(b"x"), "unknown");
    }

    #[test]
    fn validation_rejects_bad_tables() {
        assert!(validate_organizations(&orgs()).is_ok());

        let mut dup = orgs();
        dup[1].marker = dup[0].marker.clone();
        assert!(matches!(
            validate_organizations(&dup),
            Err(ContractError::InvalidArgument { .. })
        ));

        let mut empty = orgs();
        empty[0].label = String::new();
        assert!(validate_organizations(&empty).is_err());

        let mut no_marker = orgs();
        no_marker[1].marker = String::new();
        assert!(validate_organizations(&no_marker).is_err());
    }
}
