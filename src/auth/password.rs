use crate::error::AppError;
use bcrypt::{hash, verify};

// bcrypt cost factor; deliberately slow to resist offline guessing.
const COST: u32 = 12;

pub fn hash_password(password: &str) -> Result<String, AppError> {
    hash(password, COST)
        .map_err(|e| AppError::InternalServerError(format!("Failed to hash password: {}", e)))
}

pub fn verify_password(password: &str, hashed_password: &str) -> Result<bool, AppError> {
    verify(password, hashed_password)
        .map_err(|e| AppError::InternalServerError(format!("Failed to verify password: {}", e)))
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
    fn test_hashes_are_salted() {
        let password = "test_password123";
        assert_ne!(hash_password(password).unwrap(), hash_password(password).unwrap());
    }

    #[test]
    fn test_verify_with_invalid_hash() {
        match verify_password("test_password123", "invalidhashformat") {
            Err(AppError::InternalServerError(msg)) => {
                assert!(msg.contains("Failed to verify password"));
            }
            Ok(false) => {
                // bcrypt may report a malformed hash as a plain mismatch.
            }
            Ok(true) => panic!("Password verification should fail for invalid hash format"),
            Err(e) => panic!("Unexpected error: {:?}", e),
        }
    }
}
