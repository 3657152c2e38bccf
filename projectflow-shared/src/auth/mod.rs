/// Authentication and authorization utilities
///
/// # Modules
///
/// - [`password`]: Argon2id password hashing and strength validation
/// - [`jwt`]: JWT access/refresh token generation and validation
/// - [`middleware`]: Axum middleware that turns a bearer token into an
///   [`middleware::AuthContext`]
/// - [`authorization`]: pure role checks consumed by the API handlers
///
/// # Example
///
/// ```
/// use projectflow_shared::auth::jwt::{create_token, Claims, TokenType};
/// use projectflow_shared::auth::password::{hash_password, verify_password};
/// use projectflow_shared::models::user::UserRole;
/// use uuid::Uuid;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let hash = hash_password("user_password")?;
/// assert!(verify_password("user_password", &hash)?);
///
/// let claims = Claims::new(Uuid::new_v4(), UserRole::Collaborator, TokenType::Access);
/// let token = create_token(&claims, "secret-key")?;
/// # Ok(())
/// # }
/// ```

pub mod authorization;
pub mod jwt;
pub mod middleware;
pub mod password;
