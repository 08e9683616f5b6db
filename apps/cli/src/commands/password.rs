//! # Hash-Password Command
//!
//! Prints an Argon2 PHC string for the `[admin] password_hash` setting, so
//! the config file never has to hold the password itself.

use std::io::Write;

use clap::Args;

use crate::auth::hash_credential;
use crate::error::{AppError, AppResult};

/// Arguments of `smartpos hash-password`.
#[derive(Debug, Clone, Args)]
pub struct HashPasswordArgs {
    /// Password to hash; read from stdin when omitted
    #[arg(long)]
    pub password: Option<String>,
}

/// Hashes `password` and writes the PHC string on its own line.
pub fn run(password: &str, out: &mut dyn Write) -> AppResult<()> {
    if password.is_empty() {
        return Err(AppError::validation("Password must not be empty"));
    }

    let hash = hash_credential(password)
        .map_err(|e| AppError::internal(format!("Failed to hash password: {}", e)))?;
    writeln!(out, "{}", hash)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{Argon2Verifier, CredentialVerifier};

    #[test]
    fn test_prints_verifiable_hash() {
        let mut buf = Vec::new();
        run("chai-2024", &mut buf).unwrap();

        let text = String::from_utf8(buf).unwrap();
        let verifier = Argon2Verifier::new(text.trim()).unwrap();
        assert!(verifier.verify("chai-2024"));
    }

    #[test]
    fn test_empty_password_rejected() {
        assert!(run("", &mut Vec::new()).is_err());
    }
}
