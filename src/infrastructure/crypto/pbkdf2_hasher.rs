//! PBKDF2-HMAC-SHA256 password hashing.
//!
//! Stored format: `<hex salt>:<hex derived key>`.

use hmac::Hmac;
use rand::rngs::OsRng;
use rand::TryRngCore;
use sha2::Sha256;
use subtle::ConstantTimeEq;
use zeroize::Zeroizing;

use crate::domain::services::PasswordHasher;
use crate::domain::value_objects::PasswordHash;
use crate::shared::error::CryptoError;

pub const SALT_LEN: usize = 16;
pub const KEY_LEN: usize = 32;
pub const DEFAULT_ITERATIONS: u32 = 100_000;

/// Stateless PBKDF2 hasher. Salts are generated per call.
#[derive(Debug, Clone, Copy)]
pub struct Pbkdf2PasswordHasher {
    iterations: u32,
}

impl Pbkdf2PasswordHasher {
    pub fn new() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
        }
    }

    /// Use a custom round count. Hashes produced with one count only verify
    /// under the same count.
    pub fn with_iterations(iterations: u32) -> Self {
        Self { iterations }
    }

    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    fn derive(&self, password: &str, salt: &[u8]) -> Result<Zeroizing<[u8; KEY_LEN]>, CryptoError> {
        let mut key = Zeroizing::new([0u8; KEY_LEN]);
        pbkdf2::pbkdf2::<Hmac<Sha256>>(password.as_bytes(), salt, self.iterations, &mut key[..])
            .map_err(|e| CryptoError::KeyDerivation(e.to_string()))?;
        Ok(key)
    }
}

impl Default for Pbkdf2PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

impl PasswordHasher for Pbkdf2PasswordHasher {
    fn hash(&self, password: &str) -> Result<PasswordHash, CryptoError> {
        let mut salt = [0u8; SALT_LEN];
        OsRng
            .try_fill_bytes(&mut salt)
            .map_err(|e| CryptoError::Random(e.to_string()))?;

        let key = self.derive(password, &salt)?;
        let encoded = format!("{}:{}", hex::encode(salt), hex::encode(&key[..]));

        PasswordHash::new(encoded).map_err(|_| CryptoError::KeyDerivation("empty hash".into()))
    }

    fn verify(&self, password: &str, stored: &PasswordHash) -> bool {
        let Some((salt, expected)) = parse_stored(stored.as_str()) else {
            return false;
        };

        match self.derive(password, &salt) {
            Ok(actual) => actual[..].ct_eq(&expected[..]).into(),
            Err(e) => {
                tracing::warn!(error = %e, "Key derivation failed during verification");
                false
            }
        }
    }
}

/// Split and decode a stored hash. `None` on any format problem.
fn parse_stored(stored: &str) -> Option<([u8; SALT_LEN], [u8; KEY_LEN])> {
    let mut parts = stored.split(':');
    let (salt_hex, key_hex) = (parts.next()?, parts.next()?);
    if parts.next().is_some() {
        return None;
    }

    let mut salt = [0u8; SALT_LEN];
    let mut key = [0u8; KEY_LEN];
    hex::decode_to_slice(salt_hex, &mut salt).ok()?;
    hex::decode_to_slice(key_hex, &mut key).ok()?;
    Some((salt, key))
}
