//! Argon2id password hashing adapter.
//!
//! Release builds use `Argon2::default()` (Argon2id, 19 MiB, two passes).
//! Test builds use minimal parameters so suites stay fast; those parameters
//! must never reach production.

use argon2::password_hash::{
    PasswordHash, PasswordHasher as _, PasswordVerifier as _, SaltString, rand_core::OsRng,
};
use argon2::{Argon2, Error as ArgonError};

use crate::domain::HashedPassword;
use crate::domain::ports::{PasswordHashError, PasswordHasher};

fn argon2_instance() -> Result<Argon2<'static>, ArgonError> {
    #[cfg(test)]
    {
        use argon2::{Algorithm, Params, Version};

        let params = Params::new(1024, 1, 1, None)?;
        Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
    }

    #[cfg(not(test))]
    {
        Ok(Argon2::default())
    }
}

/// [`PasswordHasher`] backed by the `argon2` crate.
#[derive(Debug, Default, Clone, Copy)]
pub struct Argon2PasswordHasher;

impl PasswordHasher for Argon2PasswordHasher {
    fn hash(&self, password: &str) -> Result<HashedPassword, PasswordHashError> {
        let argon2 =
            argon2_instance().map_err(|err| PasswordHashError::hashing(err.to_string()))?;
        let salt = SaltString::generate(&mut OsRng);
        let hash = argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|err| PasswordHashError::hashing(err.to_string()))?;
        Ok(HashedPassword::new(hash.to_string()))
    }

    fn verify(&self, candidate: &str, hash: &HashedPassword) -> Result<bool, PasswordHashError> {
        let parsed = PasswordHash::new(hash.as_str())
            .map_err(|err| PasswordHashError::malformed_hash(err.to_string()))?;
        let argon2 =
            argon2_instance().map_err(|err| PasswordHashError::hashing(err.to_string()))?;
        match argon2.verify_password(candidate.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(err) => Err(PasswordHashError::hashing(err.to_string())),
        }
    }
}
