//! Salted password digests.
//!
//! Stored form: `sha256$<salt-hex>$<digest-hex>` where the digest is
//! SHA-256 over the salt followed by the UTF-8 password bytes.

use std::fmt;
use std::sync::OnceLock;

use constant_time_eq::constant_time_eq;
use rand::RngCore;
use sha2::{Digest, Sha256};

const SCHEME: &str = "sha256";
const SALT_LEN: usize = 16;
const DIGEST_LEN: usize = 32;

/// Errors raised when a stored digest cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PasswordHashError {
    #[error("unsupported password hash scheme")]
    UnsupportedScheme,
    #[error("password hash is malformed")]
    Malformed,
}

/// Salted SHA-256 digest of a password.
///
/// # Examples
/// ```
/// use service_finder::domain::PasswordHash;
///
/// let stored = PasswordHash::derive("Expert_Pro_Secure_99");
/// assert!(stored.verify("Expert_Pro_Secure_99"));
/// assert!(!stored.verify("expert_pro_secure_99"));
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash {
    salt: [u8; SALT_LEN],
    digest: [u8; DIGEST_LEN],
}

impl PasswordHash {
    /// Digest `password` under a fresh random salt.
    pub fn derive(password: &str) -> Self {
        let mut salt = [0_u8; SALT_LEN];
        rand::thread_rng().fill_bytes(&mut salt);
        Self::derive_with_salt(password, salt)
    }

    pub(crate) fn derive_with_salt(password: &str, salt: [u8; SALT_LEN]) -> Self {
        Self {
            salt,
            digest: digest(&salt, password),
        }
    }

    /// Parse the stored `sha256$salt$digest` form.
    pub fn parse(stored: &str) -> Result<Self, PasswordHashError> {
        let mut parts = stored.split('$');
        let (Some(scheme), Some(salt_hex), Some(digest_hex), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(PasswordHashError::Malformed);
        };
        if scheme != SCHEME {
            return Err(PasswordHashError::UnsupportedScheme);
        }

        let mut salt = [0_u8; SALT_LEN];
        hex::decode_to_slice(salt_hex, &mut salt).map_err(|_| PasswordHashError::Malformed)?;
        let mut digest = [0_u8; DIGEST_LEN];
        hex::decode_to_slice(digest_hex, &mut digest).map_err(|_| PasswordHashError::Malformed)?;
        Ok(Self { salt, digest })
    }

    /// Compare `candidate` against the stored digest in constant time.
    pub fn verify(&self, candidate: &str) -> bool {
        let computed = digest(&self.salt, candidate);
        constant_time_eq(&computed, &self.digest)
    }

    /// Burn the same work as a real comparison when no account matched.
    pub fn verify_dummy(candidate: &str) -> bool {
        static DUMMY: OnceLock<PasswordHash> = OnceLock::new();
        let dummy = DUMMY.get_or_init(|| Self::derive_with_salt("", [0_u8; SALT_LEN]));
        let _ = dummy.verify(candidate);
        false
    }

    /// Stored string form.
    pub fn encode(&self) -> String {
        format!(
            "{SCHEME}${}${}",
            hex::encode(self.salt),
            hex::encode(self.digest)
        )
    }
}

fn digest(salt: &[u8], password: &str) -> [u8; DIGEST_LEN] {
    let mut hasher = Sha256::new();
    hasher.update(salt);
    hasher.update(password.as_bytes());
    hasher.finalize().into()
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(..)")
    }
}
