//! Salted password hashing and verification.
//!
//! A password is hashed as HMAC-SHA-512 of its UTF-8 bytes, keyed by a
//! random 128-byte salt drawn fresh for every derivation. Both the 64-byte
//! MAC and the salt are stored; verification recomputes the MAC under the
//! stored salt and compares it in constant time.

use hmac::{Hmac, Mac};
use rand::RngCore;
use sha2::Sha512;

/// Length in bytes of a stored password hash (SHA-512 output).
pub const PASSWORD_HASH_LEN: usize = 64;

/// Length in bytes of a stored password salt (SHA-512 block size).
pub const PASSWORD_SALT_LEN: usize = 128;

type HmacSha512 = Hmac<Sha512>;

/// Rejected inputs to [`verify_password_hash`].
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CredentialError {
    #[error("{0}")]
    InvalidArgument(String),
}

/// A derived password hash together with the salt it was keyed by.
///
/// `Debug` output reports lengths only.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordDigest {
    pub hash: Vec<u8>,
    pub salt: Vec<u8>,
}

impl std::fmt::Debug for PasswordDigest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PasswordDigest")
            .field("hash", &format_args!("[{} bytes]", self.hash.len()))
            .field("salt", &format_args!("[{} bytes]", self.salt.len()))
            .finish()
    }
}

/// Derive a fresh salt and the matching hash for `password`.
///
/// Blank passwords are not rejected here; callers that need a non-blank
/// policy enforce it before deriving.
pub fn derive_password_hash(password: &str) -> PasswordDigest {
    let mut salt = vec![0u8; PASSWORD_SALT_LEN];
    rand::rng().fill_bytes(&mut salt);

    let mut mac = HmacSha512::new_from_slice(&salt).expect("HMAC accepts any key length");
    mac.update(password.as_bytes());
    let hash = mac.finalize().into_bytes().to_vec();

    PasswordDigest { hash, salt }
}

/// Check `password` against a stored `hash` and `salt`.
///
/// Returns `Ok(true)` on a match and `Ok(false)` on a mismatch. Fails with
/// [`CredentialError::InvalidArgument`] when the password is blank or the
/// stored material has the wrong length.
pub fn verify_password_hash(
    password: &str,
    hash: &[u8],
    salt: &[u8],
) -> Result<bool, CredentialError> {
    if password.trim().is_empty() {
        return Err(CredentialError::InvalidArgument(
            "Password must not be empty.".into(),
        ));
    }
    if hash.len() != PASSWORD_HASH_LEN {
        return Err(CredentialError::InvalidArgument(format!(
            "Invalid password hash length (expected {PASSWORD_HASH_LEN} bytes, got {}).",
            hash.len()
        )));
    }
    if salt.len() != PASSWORD_SALT_LEN {
        return Err(CredentialError::InvalidArgument(format!(
            "Invalid password salt length (expected {PASSWORD_SALT_LEN} bytes, got {}).",
            salt.len()
        )));
    }

    let mut mac = HmacSha512::new_from_slice(salt)
        .map_err(|e| CredentialError::InvalidArgument(format!("Invalid password salt: {e}")))?;
    mac.update(password.as_bytes());
    Ok(mac.verify_slice(hash).is_ok())
}
