//! jot-auth: credentials and session tokens for Jot.
//!
//! Two concerns live here, both deliberately small:
//! - [`password`]: one-way bcrypt hashing and verification
//! - [`token`]: issuing and verifying the signed session token that carries
//!   the authenticated principal between requests

pub mod password;
pub mod token;

pub use token::{extract_bearer_token, Claims, TokenOptions, TokenService};
