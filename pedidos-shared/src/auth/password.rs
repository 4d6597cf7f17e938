/// Password hashing using Argon2id
///
/// Credentials for `/login` are stored as Argon2id hashes in PHC string
/// format. Verification is constant-time.
///
/// # Example
///
/// ```
/// use pedidos_shared::auth::password::{hash_password, verify_password};
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let hash = hash_password("senha_secreta_123")?;
/// assert!(verify_password("senha_secreta_123", &hash)?);
/// assert!(!verify_password("senha_errada", &hash)?);
/// # Ok(())
/// # }
/// ```

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

/// Error type for password hashing operations
#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    /// Failed to hash password
    #[error("Failed to hash password: {0}")]
    HashError(String),

    /// Invalid password hash format
    #[error("Invalid password hash format: {0}")]
    InvalidHash(String),
}

/// Hashes a password using Argon2id with default parameters
///
/// Returns a PHC string format hash that embeds the algorithm, parameters,
/// and random salt.
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| PasswordError::HashError(e.to_string()))
}

/// Verifies a password against a PHC-format hash
///
/// # Errors
///
/// Returns `PasswordError::InvalidHash` if the stored hash cannot be parsed.
/// A wrong password is not an error; it returns `Ok(false)`.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, PasswordError> {
    let parsed = PasswordHash::new(hash).map_err(|e| PasswordError::InvalidHash(e.to_string()))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hash = hash_password("minha_senha").unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password("minha_senha", &hash).unwrap());
        assert!(!verify_password("outra_senha", &hash).unwrap());
    }

    #[test]
    fn test_invalid_hash_rejected() {
        let result = verify_password("senha", "not-a-phc-hash");
        assert!(matches!(result, Err(PasswordError::InvalidHash(_))));
    }

    #[test]
    fn test_hashes_are_salted() {
        let a = hash_password("mesma_senha").unwrap();
        let b = hash_password("mesma_senha").unwrap();
        assert_ne!(a, b);
    }
}
