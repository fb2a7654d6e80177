// Password hashing.

use anyhow::Result;

/// bcrypt work factor. Matches what the seeded credentials were hashed with.
const HASH_COST: u32 = 10;

/// Hash a plaintext password. One-way, salted.
pub fn hash(password: &str) -> Result<String> {
    bcrypt::hash(password, HASH_COST).map_err(|e| anyhow::anyhow!(e.to_string()))
}

/// Verify a plaintext password against a stored hash.
///
/// Any comparison failure (malformed hash included) counts as a
/// non-matching password rather than an error.
pub fn verify(password: &str, hashed: &str) -> bool {
    bcrypt::verify(password, hashed).unwrap_or(false)
}
