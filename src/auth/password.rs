//! Password hashing and verification using bcrypt

use crate::error::AppError;

/// bcrypt work factor
pub const BCRYPT_COST: u32 = 8;

/// Salted one-way password hasher
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    pub fn new() -> Self {
        Self { cost: BCRYPT_COST }
    }

    /// Hash a password with a fresh random salt
    pub fn hash(&self, password: &str) -> Result<String, AppError> {
        bcrypt::hash(password, self.cost).map_err(|e| {
            tracing::error!("Failed to hash password: {:?}", e);
            AppError::Internal(format!("Failed to hash password: {}", e))
        })
    }

    /// Verify a password against a stored hash.
    ///
    /// A malformed hash is a non-match, never an error.
    pub fn verify(&self, password: &str, hash: &str) -> bool {
        match bcrypt::verify(password, hash) {
            Ok(matched) => matched,
            Err(e) => {
                tracing::debug!("Failed to parse password hash: {:?}", e);
                false
            }
        }
    }

    /// [`hash`](Self::hash) on the blocking thread pool
    pub async fn hash_blocking(&self, password: String) -> Result<String, AppError> {
        let hasher = *self;
        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| AppError::Internal(format!("Password hashing task failed: {}", e)))?
    }

    /// [`verify`](Self::verify) on the blocking thread pool
    pub async fn verify_blocking(&self, password: String, hash: String) -> Result<bool, AppError> {
        let hasher = *self;
        tokio::task::spawn_blocking(move || hasher.verify(&password, &hash))
            .await
            .map_err(|e| AppError::Internal(format!("Password verification task failed: {}", e)))
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hasher = PasswordHasher::new();
        let hash = hasher.hash("pw123456").unwrap();
        assert!(hasher.verify("pw123456", &hash));
    }

    #[test]
    fn test_verify_fails_with_wrong_password() {
        let hasher = PasswordHasher::new();
        let hash = hasher.hash("pw123456").unwrap();
        assert!(!hasher.verify("pw1234567", &hash));
    }

    #[test]
    fn test_hash_uses_configured_cost() {
        let hash = PasswordHasher::new().hash("pw123456").unwrap();
        assert!(hash.starts_with("$2b$08$"), "unexpected hash prefix: {}", hash);
    }

    #[test]
    fn test_malformed_hash_is_not_a_match() {
        let hasher = PasswordHasher::new();
        assert!(!hasher.verify("pw123456", "not-a-bcrypt-hash"));
        assert!(!hasher.verify("pw123456", ""));
    }

    #[tokio::test]
    async fn test_blocking_variants() {
        let hasher = PasswordHasher::new();
        let hash = hasher.hash_blocking("pw123456".to_string()).await.unwrap();
        assert!(hasher
            .verify_blocking("pw123456".to_string(), hash.clone())
            .await
            .unwrap());
        assert!(!hasher
            .verify_blocking("other".to_string(), hash)
            .await
            .unwrap());
    }
}
