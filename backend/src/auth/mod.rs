//! Authentication module
//!
//! Argon2 password hashing, signed session tokens and the session extractor.

mod middleware;
mod password;
mod session;

pub use middleware::{load_session, SessionRejection, SessionUser};
pub use password::PasswordService;
pub use session::{SessionClaims, SessionIdentity, SessionService, SECRET_LEN};
