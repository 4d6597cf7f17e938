/// Authentication utilities
///
/// Every API endpoint except `/login` and `/health` sits behind a bearer
/// token gate. This module provides the primitives the gate is built from:
///
/// - [`password`]: Argon2id password hashing and verification
/// - [`jwt`]: JWT bearer token generation and validation
///
/// # Example
///
/// ```no_run
/// use pedidos_shared::auth::password::{hash_password, verify_password};
/// use pedidos_shared::auth::jwt::{create_token, validate_token, Claims};
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let hash = hash_password("senha_secreta")?;
/// assert!(verify_password("senha_secreta", &hash)?);
///
/// let claims = Claims::new(1);
/// let token = create_token(&claims, "secret-key-at-least-32-bytes-long!")?;
/// # Ok(())
/// # }
/// ```

pub mod jwt;
pub mod middleware;
pub mod password;
