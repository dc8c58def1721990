//! Authentication module
//!
//! Stateless bearer tokens (HS256 JWT) and bcrypt/argon2 password hashing.

mod jwt;
mod middleware;
mod password;

pub use jwt::{Claims, JwtService};
pub use middleware::{authenticate, AuthUser};
pub use password::PasswordService;
