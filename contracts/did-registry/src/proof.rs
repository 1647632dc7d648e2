use sha2::{Digest, Sha256};

/// Number of leading hex digest characters a proof must embed
pub const PROOF_PREFIX_LEN: usize = 16;

/// Decides whether `proof` authorizes `message` under a registered `key`.
///
/// Implementations must be pure and total: malformed input yields `false`,
/// never a panic.
pub trait ProofValidator {
    fn validate(&self, message: &str, proof: &str, key: &str) -> bool;
}

/// Placeholder policy: the proof must contain the first 16 hex characters of
/// `sha256(message ++ key)`. Not a signature scheme; kept for compatibility
/// with proofs issued by existing clients.
#[derive(Clone, Copy, Debug, Default)]
pub struct DigestPrefixValidator;

impl DigestPrefixValidator {
    pub fn expected_prefix(message: &str, key: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(message.as_bytes());
        hasher.update(key.as_bytes());
        let digest = hex::encode(hasher.finalize());
        digest[..PROOF_PREFIX_LEN].to_string()
    }
}

impl ProofValidator for DigestPrefixValidator {
    fn validate(&self, message: &str, proof: &str, key: &str) -> bool {
        if message.is_empty() || proof.is_empty() || key.is_empty() {
            return false;
        }
        proof.contains(&Self::expected_prefix(message, key))
    }
}

/// Message approved by the update key for the mutation producing `next_version`
pub fn update_message(did: &str, document: &str, next_version: u64) -> String {
    format!("{}:{}:{}", did, document, next_version)
}

/// Message approved by the recovery key for the mutation producing `next_version`
pub fn recovery_message(did: &str, document: &str, next_version: u64) -> String {
    format!("{}:recovery:{}:{}", did, document, next_version)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefix_matches_sha256_of_message_and_key() {
        // sha256("abc") = ba7816bf8f01cfea414140de5dae2223...
        assert_eq!(DigestPrefixValidator::expected_prefix("ab", "c"), "ba7816bf8f01cfea");
    }

    #[test]
    fn accepts_proof_embedding_prefix() {
        let message = update_message("did:example:1", r#"{"a":2}"#, 2);
        let prefix = DigestPrefixValidator::expected_prefix(&message, "K");
        let proof = format!("sig-{}-trailer", prefix);
        assert!(DigestPrefixValidator.validate(&message, &proof, "K"));
        assert!(DigestPrefixValidator.validate(&message, &prefix, "K"));
    }

    #[test]
    fn rejects_wrong_version_or_key() {
        let message = update_message("did:example:1", r#"{"a":2}"#, 2);
        let proof = DigestPrefixValidator::expected_prefix(&message, "K");

        let stale = update_message("did:example:1", r#"{"a":2}"#, 3);
        assert!(!DigestPrefixValidator.validate(&stale, &proof, "K"));
        assert!(!DigestPrefixValidator.validate(&message, &proof, "other"));
    }

    #[test]
    fn rejects_empty_inputs() {
        assert!(!DigestPrefixValidator.validate("m", "", "K"));
        assert!(!DigestPrefixValidator.validate("m", "proof", ""));
        assert!(!DigestPrefixValidator.validate("", "proof", "K"));
    }

    #[test]
    fn recovery_and_update_messages_differ() {
        assert_eq!(update_message("did:x", "{}", 2), "did:x:{}:2");
        assert_eq!(recovery_message("did:x", "{}", 2), "did:x:recovery:{}:2");
    }
}
