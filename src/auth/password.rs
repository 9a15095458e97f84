use crate::error::AppError;
use bcrypt::{hash, verify};

const BCRYPT_COST: u32 = 12;

/// Hashes a password with a fresh salt; equal inputs yield distinct hashes.
pub fn hash_password(password: &str) -> Result<String, AppError> {
    Ok(hash(password, BCRYPT_COST)?)
}

/// Checks a password against a stored hash. A mismatch is `Ok(false)`;
/// only a hash bcrypt cannot parse is an error (`CorruptCredential`).
pub fn verify_password(password: &str, hashed_password: &str) -> Result<bool, AppError> {
    Ok(verify(password, hashed_password)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_hashing_and_verification() {
        let password = "test_password123";
        let hashed = hash_password(password).unwrap();

        assert!(verify_password(password, &hashed).unwrap());
        assert!(!verify_password("wrong_password", &hashed).unwrap());
    }

    #[test]
    fn test_hashing_salts_freshly_per_call() {
        let password = "test_password123";
        let first = hash_password(password).unwrap();
        let second = hash_password(password).unwrap();

        assert_ne!(first, second);
        assert!(verify_password(password, &first).unwrap());
        assert!(verify_password(password, &second).unwrap());
    }

    #[test]
    fn test_verify_with_corrupt_hash() {
        match verify_password("test_password123", "not-a-bcrypt-hash") {
            Err(AppError::CorruptCredential) => {}
            Ok(true) => panic!("Verification must not succeed against a corrupt hash"),
            other => panic!("Unexpected result for corrupt hash: {:?}", other),
        }
    }
}
