use sha2::{Digest, Sha256};

/// Credential hashing, kept outside the CRUD engine. Passwords are stored
/// as SHA-256 hex digests; the stored form is never returned by any read.
pub fn hash_password(password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(password.as_bytes());
    format!("{:x}", hasher.finalize())
}

pub fn verify_password(password: &str, stored: &str) -> bool {
    hash_password(password) == stored
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hashes_are_stable_and_hex_encoded() {
        let hash = hash_password("senha123");
        assert_eq!(hash.len(), 64);
        assert_eq!(hash, hash_password("senha123"));
        assert_ne!(hash, "senha123");
    }

    #[test]
    fn verify_matches_only_the_original_password() {
        let stored = hash_password("senha123");
        assert!(verify_password("senha123", &stored));
        assert!(!verify_password("outra", &stored));
    }
}
