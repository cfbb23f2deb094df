//! AES-256-GCM message encryption.
//!
//! The key is the SHA-256 digest of the configured secret. Payloads are
//! serialized as `<hex nonce>:<hex ciphertext>:<hex tag>`.

use std::fmt;

use aes_gcm::aead::{AeadInPlace, KeyInit};
use aes_gcm::{Aes256Gcm, Nonce, Tag};
use rand::rngs::OsRng;
use rand::TryRngCore;
use sha2::{Digest, Sha256};
use zeroize::Zeroizing;

use crate::domain::services::MessageEncryptor;
use crate::domain::value_objects::EncryptedMessage;
use crate::shared::error::CryptoError;

pub const NONCE_LEN: usize = 12;
pub const TAG_LEN: usize = 16;

pub struct AesGcmMessageEncryptor {
    key: Zeroizing<[u8; 32]>,
}

impl AesGcmMessageEncryptor {
    pub fn new(secret: &str) -> Self {
        let mut key = Zeroizing::new([0u8; 32]);
        key.copy_from_slice(&Sha256::digest(secret.as_bytes()));
        Self { key }
    }

    fn cipher(&self) -> Result<Aes256Gcm, CryptoError> {
        Aes256Gcm::new_from_slice(&self.key[..]).map_err(|_| CryptoError::Cipher)
    }
}

impl fmt::Debug for AesGcmMessageEncryptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AesGcmMessageEncryptor").finish_non_exhaustive()
    }
}

impl MessageEncryptor for AesGcmMessageEncryptor {
    fn encrypt(&self, plaintext: &str) -> Result<EncryptedMessage, CryptoError> {
        let mut nonce = [0u8; NONCE_LEN];
        OsRng
            .try_fill_bytes(&mut nonce)
            .map_err(|e| CryptoError::Random(e.to_string()))?;

        let mut buffer = plaintext.as_bytes().to_vec();
        let tag = self
            .cipher()?
            .encrypt_in_place_detached(Nonce::from_slice(&nonce), b"", &mut buffer)
            .map_err(|_| CryptoError::Cipher)?;

        Ok(EncryptedMessage::new(format!(
            "{}:{}:{}",
            hex::encode(nonce),
            hex::encode(&buffer),
            hex::encode(tag)
        )))
    }

    fn decrypt(&self, serialized: &str) -> Result<String, CryptoError> {
        let mut parts = serialized.split(':');
        let (Some(nonce_hex), Some(ct_hex), Some(tag_hex), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(CryptoError::Malformed("expected nonce:ciphertext:tag"));
        };

        let mut nonce = [0u8; NONCE_LEN];
        hex::decode_to_slice(nonce_hex, &mut nonce)
            .map_err(|_| CryptoError::Malformed("invalid nonce"))?;
        let mut tag = [0u8; TAG_LEN];
        hex::decode_to_slice(tag_hex, &mut tag).map_err(|_| CryptoError::Malformed("invalid tag"))?;
        let mut buffer =
            hex::decode(ct_hex).map_err(|_| CryptoError::Malformed("invalid ciphertext"))?;

        self.cipher()?
            .decrypt_in_place_detached(
                Nonce::from_slice(&nonce),
                b"",
                &mut buffer,
                Tag::from_slice(&tag),
            )
            .map_err(|_| CryptoError::AuthenticationFailed)?;

        String::from_utf8(buffer).map_err(|_| CryptoError::Malformed("plaintext is not UTF-8"))
    }
}
