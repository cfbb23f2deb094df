//! Credential verification contract.

use crate::domain::value_objects::PasswordHash;
use crate::shared::error::CryptoError;

/// Hashes and verifies passwords.
///
/// Implementations are shared by every connection task and must hold no
/// per-call mutable state.
pub trait PasswordHasher: Send + Sync {
    /// Derive a salted hash for storage.
    ///
    /// # Errors
    ///
    /// Random-number or key-derivation failure is returned to the caller.
    fn hash(&self, password: &str) -> Result<PasswordHash, CryptoError>;

    /// Check `password` against a stored hash.
    ///
    /// Fail-closed: a malformed stored value or any internal failure yields
    /// `false`, never an error.
    fn verify(&self, password: &str, stored: &PasswordHash) -> bool;
}
