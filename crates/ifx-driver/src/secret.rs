//! Credential decryption.
//!
//! Deployments sometimes store the database password encrypted inside the
//! connection configuration. The connector does not know how to decrypt
//! anything itself; it delegates to an injected [`SecretDecryptor`].

use crate::error::{DriverError, Result};

/// Passwords longer than this are treated as encrypted material.
const ENCRYPTED_LENGTH_THRESHOLD: usize = 50;

/// Prefix marking a base64-wrapped ciphertext.
const BASE64_PREFIX: &str = "base64:";

/// Decrypts secrets stored in connection configuration.
pub trait SecretDecryptor: Send + Sync {
    /// Decrypts a ciphertext into the plaintext secret.
    fn decrypt(&self, ciphertext: &str) -> Result<String>;
}

/// Resolves the password to hand to the driver.
///
/// Short passwords pass through untouched. Anything over the length
/// threshold is considered encrypted: a `base64:` prefix is stripped and
/// the remainder decrypted. Without a decryptor a long password still
/// passes through, unless the prefix makes the encryption explicit, in
/// which case the missing decryptor is an error.
pub fn resolve_password(
    password: Option<&str>,
    decryptor: Option<&dyn SecretDecryptor>,
) -> Result<Option<String>> {
    let Some(password) = password else {
        return Ok(None);
    };
    if password.len() <= ENCRYPTED_LENGTH_THRESHOLD {
        return Ok(Some(password.to_string()));
    }
    match decryptor {
        Some(decryptor) => {
            let ciphertext = password.strip_prefix(BASE64_PREFIX).unwrap_or(password);
            decryptor.decrypt(ciphertext).map(Some)
        }
        None if password.starts_with(BASE64_PREFIX) => Err(DriverError::MissingDecryptor),
        None => Ok(Some(password.to_string())),
    }
}
