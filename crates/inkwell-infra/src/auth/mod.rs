//! Authentication implementations.

mod blocklist;
mod jwt;
mod password;

pub use blocklist::InMemoryTokenBlocklist;
pub use jwt::{JwtConfig, JwtTokenService};
pub use password::Argon2PasswordService;
