//! Password hashing and verification on top of bcrypt.

use crate::errors::{DomainError, DomainResult};

/// One-way password hashing with a tunable cost factor
///
/// Hashing is the only intentionally slow step in the auth flow; the cost
/// factor bounds it. Construction pre-computes a throwaway hash so lookup
/// misses can burn the same bcrypt work as a real mismatch, keeping "unknown
/// identifier" and "wrong password" indistinguishable from the outside.
#[derive(Debug, Clone)]
pub struct PasswordVerifier {
    cost: u32,
    dummy_hash: String,
}

impl PasswordVerifier {
    /// Create a verifier with the given bcrypt cost factor
    pub fn new(cost: u32) -> DomainResult<Self> {
        let dummy_hash =
            bcrypt::hash("timing-equalization", cost).map_err(|e| DomainError::Internal {
                message: format!("bcrypt initialization failed: {}", e),
            })?;
        Ok(Self { cost, dummy_hash })
    }

    /// Create a verifier with the bcrypt default cost
    pub fn with_default_cost() -> DomainResult<Self> {
        Self::new(bcrypt::DEFAULT_COST)
    }

    /// Hash a plaintext password
    ///
    /// The plaintext is neither logged nor retained.
    pub fn hash(&self, plaintext: &str) -> DomainResult<String> {
        bcrypt::hash(plaintext, self.cost).map_err(|e| DomainError::Internal {
            message: format!("password hashing failed: {}", e),
        })
    }

    /// Verify a plaintext password against a stored hash
    pub fn verify(&self, plaintext: &str, hash: &str) -> bool {
        bcrypt::verify(plaintext, hash).unwrap_or(false)
    }

    /// Burn one bcrypt verification against a fixed hash
    ///
    /// Called when the account lookup misses, so the failure path takes the
    /// same time as a password mismatch. Always reports failure.
    pub fn dummy_verify(&self, plaintext: &str) -> bool {
        let _ = bcrypt::verify(plaintext, &self.dummy_hash);
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fast_verifier() -> PasswordVerifier {
        // Minimum bcrypt cost keeps the test suite quick
        PasswordVerifier::new(4).unwrap()
    }

    #[test]
    fn test_hash_and_verify_roundtrip() {
        let verifier = fast_verifier();
        let hash = verifier.hash("Secret123").unwrap();

        assert_ne!(hash, "Secret123");
        assert!(verifier.verify("Secret123", &hash));
    }

    #[test]
    fn test_wrong_password_fails() {
        let verifier = fast_verifier();
        let hash = verifier.hash("Secret123").unwrap();

        assert!(!verifier.verify("secret123", &hash));
        assert!(!verifier.verify("", &hash));
    }

    #[test]
    fn test_same_password_hashes_differently() {
        // Salting: two hashes of one password must differ
        let verifier = fast_verifier();
        let first = verifier.hash("Secret123").unwrap();
        let second = verifier.hash("Secret123").unwrap();

        assert_ne!(first, second);
        assert!(verifier.verify("Secret123", &first));
        assert!(verifier.verify("Secret123", &second));
    }

    #[test]
    fn test_malformed_hash_fails_closed() {
        let verifier = fast_verifier();
        assert!(!verifier.verify("Secret123", "not-a-bcrypt-hash"));
    }

    #[test]
    fn test_dummy_verify_always_fails() {
        let verifier = fast_verifier();
        assert!(!verifier.dummy_verify("timing-equalization"));
        assert!(!verifier.dummy_verify("anything"));
    }
}
