//! Key derivation and password hashing with Argon2id.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};

#[derive(Debug, thiserror::Error)]
pub enum KdfError {
    #[error("invalid key derivation parameters: {0}")]
    InvalidParams(String),

    #[error("key derivation failed: {0}")]
    Derivation(String),
}

#[derive(Debug, Clone)]
pub struct Kdf {
    params: Params,
}

impl Kdf {
    /// `memory_kib`, `iterations` and `parallelism` are the Argon2 m/t/p costs.
    pub fn new(memory_kib: u32, iterations: u32, parallelism: u32) -> Result<Self, KdfError> {
        let params: Params = Params::new(memory_kib, iterations, parallelism, None)
            .map_err(|e| KdfError::InvalidParams(e.to_string()))?;

        Ok(Self { params })
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }

    /// Hashes a password into a PHC string with a random salt
    pub fn hash_password(&self, password: &str) -> Result<String, KdfError> {
        let salt: SaltString = SaltString::generate(&mut OsRng);

        self.argon2()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| KdfError::Derivation(e.to_string()))
    }

    /// False for a wrong password and for a malformed hash
    pub fn verify_password(&self, password: &str, hash: &str) -> bool {
        match PasswordHash::new(hash) {
            Ok(parsed) => self.argon2().verify_password(password.as_bytes(), &parsed).is_ok(),
            Err(e) => {
                tracing::warn!("Stored password hash is malformed: {}", e);
                false
            }
        }
    }

    /// Derives `len` bytes of key material. The salt must be at least 8 bytes.
    pub fn derive_key(&self, secret: &[u8], salt: &[u8], len: usize) -> Result<Vec<u8>, KdfError> {
        let mut output: Vec<u8> = vec![0u8; len];

        self.argon2()
            .hash_password_into(secret, salt, &mut output)
            .map_err(|e| KdfError::Derivation(e.to_string()))?;

        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cheap_kdf() -> Kdf {
        Kdf::new(1024, 1, 1).unwrap()
    }

    #[test]
    fn verifies_only_the_original_password() {
        let kdf: Kdf = cheap_kdf();
        let hash: String = kdf.hash_password("correct horse").unwrap();

        assert!(hash.starts_with("$argon2id$"));
        assert!(kdf.verify_password("correct horse", &hash));
        assert!(!kdf.verify_password("battery staple", &hash));
        assert!(!kdf.verify_password("correct horse", "not-a-hash"));
    }

    #[test]
    fn derived_keys_are_deterministic_per_salt() {
        let kdf: Kdf = cheap_kdf();

        let a: Vec<u8> = kdf.derive_key(b"secret", b"salt-0001", 32).unwrap();
        let b: Vec<u8> = kdf.derive_key(b"secret", b"salt-0001", 32).unwrap();
        let c: Vec<u8> = kdf.derive_key(b"secret", b"salt-0002", 32).unwrap();

        assert_eq!(a.len(), 32);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn short_salts_are_rejected() {
        assert!(cheap_kdf().derive_key(b"secret", b"salt", 32).is_err());
    }

    #[test]
    fn zero_memory_is_invalid() {
        assert!(matches!(Kdf::new(0, 1, 1), Err(KdfError::InvalidParams(_))));
    }
}
