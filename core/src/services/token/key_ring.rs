//! HS512 key lookup with rollover support

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey};
use std::collections::HashMap;

use vg_shared::config::JwtConfig;

use crate::errors::DomainError;

/// Signing algorithm for every token this service mints
pub const SIGNING_ALGORITHM: Algorithm = Algorithm::HS512;

/// Pluggable key lookup injected into the token service
///
/// Tokens carry the id of the key that signed them in their `kid` header;
/// verification looks the key up by that id.
pub trait KeyProvider: Send + Sync {
    /// Id of the key used for new tokens
    fn current_key_id(&self) -> &str;

    /// Key used for new tokens
    fn signing_key(&self) -> &EncodingKey;

    /// Verification key for a `kid`, `None` if unknown
    fn verification_key(&self, key_id: &str) -> Option<&DecodingKey>;
}

/// Key ring holding one current signing key and any number of
/// verification-only previous keys
#[derive(Clone)]
pub struct KeyRing {
    current_key_id: String,
    signing_key: EncodingKey,
    verification_keys: HashMap<String, DecodingKey>,
}

impl std::fmt::Debug for KeyRing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut key_ids: Vec<&String> = self.verification_keys.keys().collect();
        key_ids.sort();
        f.debug_struct("KeyRing")
            .field("current_key_id", &self.current_key_id)
            .field("key_ids", &key_ids)
            .finish()
    }
}

impl KeyRing {
    /// Creates a ring with a single current key
    ///
    /// # Arguments
    ///
    /// * `key_id` - Value written to the `kid` header
    /// * `secret` - HMAC secret
    ///
    /// # Returns
    ///
    /// * `Ok(KeyRing)` - Ring ready for signing
    /// * `Err(DomainError)` - Empty key id or secret
    pub fn new(key_id: impl Into<String>, secret: &[u8]) -> Result<Self, DomainError> {
        let key_id = key_id.into();
        validate_key(&key_id, secret)?;

        let mut verification_keys = HashMap::new();
        verification_keys.insert(key_id.clone(), DecodingKey::from_secret(secret));

        Ok(Self {
            current_key_id: key_id,
            signing_key: EncodingKey::from_secret(secret),
            verification_keys,
        })
    }

    /// Adds a key that still verifies tokens but no longer signs them
    pub fn with_previous_key(mut self, key_id: impl Into<String>, secret: &[u8]) -> Result<Self, DomainError> {
        let key_id = key_id.into();
        validate_key(&key_id, secret)?;
        if key_id == self.current_key_id {
            return Err(DomainError::Validation {
                message: format!("Previous key id {} collides with the current key", key_id),
            });
        }
        self.verification_keys
            .insert(key_id, DecodingKey::from_secret(secret));
        Ok(self)
    }

    /// Builds the ring from configuration
    pub fn from_config(config: &JwtConfig) -> Result<Self, DomainError> {
        config
            .previous_keys
            .iter()
            .try_fold(Self::new(config.key_id.clone(), config.secret.as_bytes())?, |ring, key| {
                ring.with_previous_key(key.key_id.clone(), key.secret.as_bytes())
            })
    }

    pub fn contains(&self, key_id: &str) -> bool {
        self.verification_keys.contains_key(key_id)
    }
}

impl KeyProvider for KeyRing {
    fn current_key_id(&self) -> &str {
        &self.current_key_id
    }

    fn signing_key(&self) -> &EncodingKey {
        &self.signing_key
    }

    fn verification_key(&self, key_id: &str) -> Option<&DecodingKey> {
        self.verification_keys.get(key_id)
    }
}

fn validate_key(key_id: &str, secret: &[u8]) -> Result<(), DomainError> {
    if key_id.is_empty() || secret.is_empty() {
        return Err(DomainError::Validation {
            message: "Signing keys need a non-empty id and secret".to_string(),
        });
    }
    Ok(())
}
