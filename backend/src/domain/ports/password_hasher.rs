//! Driven port for password hashing.

use crate::domain::HashedPassword;

use super::define_port_error;

define_port_error! {
    /// Failures raised by password hashing adapters.
    pub enum PasswordHashError {
        /// The hasher could not produce a digest.
        Hashing { message: String } => "password hashing failed: {message}",
        /// A stored hash could not be parsed.
        MalformedHash { message: String } => "stored password hash is malformed: {message}",
    }
}

/// Hashes new passwords and verifies candidates against stored hashes.
#[cfg_attr(test, mockall::automock)]
pub trait PasswordHasher: Send + Sync {
    /// Produce a salted hash for `password`.
    fn hash(&self, password: &str) -> Result<HashedPassword, PasswordHashError>;

    /// Check `candidate` against `hash`; `Ok(false)` means a mismatch.
    fn verify(&self, candidate: &str, hash: &HashedPassword) -> Result<bool, PasswordHashError>;
}
