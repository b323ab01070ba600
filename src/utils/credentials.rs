use sha2::{Digest, Sha256};

/// Hex SHA-256 of `"<principal>:<password>"`.
pub fn password_digest(principal: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(principal.as_bytes());
    hasher.update(b":");
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}

pub fn verify_password(principal: &str, password: &str, digest: &str) -> bool {
    password_digest(principal, password) == digest
}
