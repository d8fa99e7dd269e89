//! Encrypted at-rest storage for the Gemini API key. The key never touches
//! disk in plaintext: it is sealed with AES-256-GCM under a master key
//! derived from machine-specific data, and the sealed blob lives in the
//! same key-value store as the rest of the app state.

use aes_gcm::{
    Aes256Gcm, Nonce,
    aead::{Aead, KeyInit, OsRng},
};
use argon2::password_hash::rand_core::RngCore;
use argon2::{Algorithm, Argon2, Params, Version};
use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use serde::{Deserialize, Serialize};
use std::env;
use std::sync::Arc;

use super::error::ApiError;
use crate::db::Database;

/// Key-value slot holding the sealed API key.
pub const API_KEY_STORE_KEY: &str = "scalpe_gemini_api_key";

const ENCRYPTION_VERSION: u8 = 1;

#[derive(Serialize, Deserialize)]
struct SealedKey {
    version: u8,
    /// Base64 salt for key derivation
    salt: String,
    /// Base64 nonce
    nonce: String,
    /// Base64 ciphertext
    ciphertext: String,
}

pub struct ApiKeyStore {
    db: Arc<Database>,
}

impl ApiKeyStore {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Encrypt and persist the API key, replacing any previous one. A fresh
    /// salt and nonce are generated on every write.
    pub fn set_key(&self, api_key: &str) -> Result<(), ApiError> {
        let mut salt = [0u8; 16];
        OsRng.fill_bytes(&mut salt);

        let master_key = derive_key(&machine_id(), &salt)?;
        let cipher = Aes256Gcm::new_from_slice(&master_key)
            .map_err(|e| ApiError::Encryption(format!("failed to create cipher: {}", e)))?;

        let mut nonce_bytes = [0u8; 12];
        OsRng.fill_bytes(&mut nonce_bytes);
        let nonce = Nonce::from_slice(&nonce_bytes);

        let ciphertext = cipher.encrypt(nonce, api_key.as_bytes())?;

        let sealed = SealedKey {
            version: ENCRYPTION_VERSION,
            salt: BASE64.encode(salt),
            nonce: BASE64.encode(nonce_bytes),
            ciphertext: BASE64.encode(&ciphertext),
        };

        self.db.save(API_KEY_STORE_KEY, &serde_json::to_string(&sealed)?)?;
        log::info!("API key sealed and stored");
        Ok(())
    }

    /// Decrypt the stored API key. `Ok(None)` when no key has been saved yet.
    pub fn get_key(&self) -> Result<Option<String>, ApiError> {
        let Some(raw) = self.db.load(API_KEY_STORE_KEY)? else {
            return Ok(None);
        };

        let sealed: SealedKey = serde_json::from_str(&raw)?;
        if sealed.version != ENCRYPTION_VERSION {
            return Err(ApiError::Encryption(format!(
                "unsupported key-store version {}",
                sealed.version
            )));
        }

        let salt = BASE64
            .decode(&sealed.salt)
            .map_err(|e| ApiError::Encryption(format!("invalid salt: {}", e)))?;
        let nonce_bytes = BASE64
            .decode(&sealed.nonce)
            .map_err(|e| ApiError::Encryption(format!("invalid nonce: {}", e)))?;
        let ciphertext = BASE64
            .decode(&sealed.ciphertext)
            .map_err(|e| ApiError::Encryption(format!("invalid ciphertext: {}", e)))?;

        let master_key = derive_key(&machine_id(), &salt)?;
        let cipher = Aes256Gcm::new_from_slice(&master_key)
            .map_err(|e| ApiError::Encryption(format!("failed to create cipher: {}", e)))?;

        let plaintext = cipher.decrypt(Nonce::from_slice(&nonce_bytes), ciphertext.as_ref())?;

        let api_key = String::from_utf8(plaintext)
            .map_err(|e| ApiError::Encryption(format!("invalid UTF-8: {}", e)))?;
        Ok(Some(api_key))
    }

    /// Forget the stored key. Absence is a no-op.
    pub fn clear_key(&self) -> Result<(), ApiError> {
        self.db.remove(API_KEY_STORE_KEY)?;
        Ok(())
    }
}

/// Machine-specific identifier the master key is derived from.
fn machine_id() -> String {
    let hostname = hostname::get()
        .ok()
        .and_then(|h| h.into_string().ok())
        .unwrap_or_else(|| "unknown-host".to_string());

    let username = env::var("USER")
        .or_else(|_| env::var("USERNAME"))
        .unwrap_or_else(|_| "unknown-user".to_string());

    format!("scalpe-journal-{}-{}", hostname, username)
}

fn derive_key(machine_id: &str, salt: &[u8]) -> Result<[u8; 32], ApiError> {
    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, Params::default());

    let mut output_key = [0u8; 32];
    argon2
        .hash_password_into(machine_id.as_bytes(), salt, &mut output_key)
        .map_err(|e| ApiError::Encryption(format!("key derivation failed: {}", e)))?;

    Ok(output_key)
}
