//! Authentication service for the basic-auth protected routes.

use hmac::digest::generic_array::GenericArray;
use hmac::{Hmac, Mac};
use rand::Rng;
use sha2::Sha256;

use crate::error::AppError;

type HmacSha256 = Hmac<Sha256>;

/// SHA-256 block size; HMAC keys of this length are used as-is.
const KEY_LEN: usize = 64;

/// Checks basic-auth credentials against the single configured user.
///
/// The expected user and password are kept only as HMAC-SHA256 tags keyed with
/// a random per-process key. Incoming values are tagged the same way and
/// compared with [`Mac::verify_slice`], which runs in constant time.
pub struct AuthService {
    key: [u8; KEY_LEN],
    user_tag: Vec<u8>,
    password_tag: Vec<u8>,
}

impl AuthService {
    /// Creates a new authentication service for `user` / `password`.
    pub fn new(user: &str, password: &str) -> Self {
        let mut key = [0u8; KEY_LEN];
        rand::rng().fill(&mut key);

        let user_tag = tag(&key, user);
        let password_tag = tag(&key, password);

        Self {
            key,
            user_tag,
            password_tag,
        }
    }

    fn verify(&self, value: &str, expected: &[u8]) -> bool {
        let mut mac = HmacSha256::new(GenericArray::from_slice(&self.key));
        mac.update(value.as_bytes());
        mac.verify_slice(expected).is_ok()
    }

    /// Authenticates a user/password pair from a basic-auth header.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] if either value does not match.
    pub fn authenticate(&self, user: &str, password: Option<&str>) -> Result<(), AppError> {
        let user_ok = self.verify(user, &self.user_tag);
        let password_ok = self.verify(password.unwrap_or_default(), &self.password_tag);

        // Both tags are always checked.
        if user_ok & password_ok {
            Ok(())
        } else {
            Err(AppError::unauthorized("unauthorized"))
        }
    }
}

fn tag(key: &[u8; KEY_LEN], value: &str) -> Vec<u8> {
    let mut mac = HmacSha256::new(GenericArray::from_slice(key));
    mac.update(value.as_bytes());
    mac.finalize().into_bytes().to_vec()
}
