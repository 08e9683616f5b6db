//! # Admin Authentication
//!
//! Gate in front of the sales report.
//!
//! ```text
//! [admin] password_hash ──► Argon2Verifier   ──┐
//!                                              ├──► verify(input) -> bool
//! [admin] password      ──► PlaintextVerifier ─┘
//! ```
//!
//! The report command only sees a `&dyn CredentialVerifier`, so the
//! credential source can change without touching reporting.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};

use crate::config::{AdminConfig, ConfigError};

/// Checks a candidate admin credential.
pub trait CredentialVerifier {
    /// True when `input` is the admin credential.
    fn verify(&self, input: &str) -> bool;
}

/// Compares against a password kept in the config file.
#[derive(Debug, Clone)]
pub struct PlaintextVerifier {
    expected: String,
}

impl PlaintextVerifier {
    pub fn new(expected: impl Into<String>) -> Self {
        PlaintextVerifier {
            expected: expected.into(),
        }
    }
}

impl CredentialVerifier for PlaintextVerifier {
    fn verify(&self, input: &str) -> bool {
        let expected = self.expected.as_bytes();
        let input = input.as_bytes();

        // Same work for every candidate of the right length
        expected.len() == input.len()
            && expected
                .iter()
                .zip(input)
                .fold(0u8, |diff, (a, b)| diff | (a ^ b))
                == 0
    }
}

/// Verifies against an Argon2 PHC hash string.
#[derive(Debug, Clone)]
pub struct Argon2Verifier {
    hash: String,
}

impl Argon2Verifier {
    /// Accepts only a well-formed PHC string.
    pub fn new(hash: impl Into<String>) -> Result<Self, ConfigError> {
        let hash = hash.into();
        PasswordHash::new(&hash).map_err(|e| ConfigError::InvalidValue {
            field: "admin.password_hash".to_string(),
            reason: e.to_string(),
        })?;
        Ok(Argon2Verifier { hash })
    }
}

impl CredentialVerifier for Argon2Verifier {
    fn verify(&self, input: &str) -> bool {
        let parsed_hash = match PasswordHash::new(&self.hash) {
            Ok(h) => h,
            Err(_) => return false,
        };

        Argon2::default()
            .verify_password(input.as_bytes(), &parsed_hash)
            .is_ok()
    }
}

/// Builds the verifier for the configured credential.
///
/// ## Errors
/// - `MissingAdminCredential` when neither a hash nor a non-empty password
///   is configured
/// - `InvalidValue` for a malformed hash
pub fn verifier_from_config(admin: &AdminConfig) -> Result<Box<dyn CredentialVerifier>, ConfigError> {
    if let Some(hash) = admin.password_hash.as_deref().filter(|h| !h.is_empty()) {
        return Ok(Box::new(Argon2Verifier::new(hash)?));
    }

    match admin.password.as_deref() {
        Some(password) if !password.is_empty() => Ok(Box::new(PlaintextVerifier::new(password))),
        _ => Err(ConfigError::MissingAdminCredential),
    }
}

/// Hashes a credential for the `[admin] password_hash` setting.
pub fn hash_credential(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}
