use crate::errors::CoreError;
use crate::models::ledger::Ledger;

use super::encryption::{self, KdfParams};
use super::format;

/// Saves and loads the ledger as encrypted bytes or files.
pub struct StorageManager;

impl StorageManager {
    /// Encrypt a ledger with the default key-derivation cost.
    pub fn save_to_bytes(ledger: &Ledger, password: &str) -> Result<Vec<u8>, CoreError> {
        Self::save_to_bytes_with(ledger, password, &KdfParams::default())
    }

    /// Ledger → bincode → AES-256-GCM(Argon2id(password)) → OPTV bytes.
    pub fn save_to_bytes_with(
        ledger: &Ledger,
        password: &str,
        kdf_params: &KdfParams,
    ) -> Result<Vec<u8>, CoreError> {
        let plaintext = bincode::serialize(ledger)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize ledger: {e}")))?;

        let salt = encryption::random_bytes::<16>()?;
        let nonce = encryption::random_bytes::<12>()?;
        let key = encryption::derive_key(password, &salt, kdf_params)?;
        let ciphertext = encryption::encrypt(&plaintext, &key, &nonce)?;

        Ok(format::write_file(
            format::CURRENT_VERSION,
            kdf_params,
            &salt,
            &nonce,
            &ciphertext,
        ))
    }

    /// OPTV bytes → header → Argon2id(password, salt) → decrypt → bincode → Ledger.
    pub fn load_from_bytes(data: &[u8], password: &str) -> Result<Ledger, CoreError> {
        let (header, ciphertext) = format::read_file(data)?;
        let key = encryption::derive_key(password, &header.salt, &header.kdf_params)?;
        let plaintext = encryption::decrypt(ciphertext, &key, &header.nonce)?;

        bincode::deserialize(&plaintext)
            .map_err(|e| CoreError::Deserialization(format!("Failed to deserialize ledger: {e}")))
    }

    /// Write the encrypted ledger to disk (native only).
    ///
    /// Writes a sibling `.optv.tmp` file, then renames it over `path`.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn save_to_file(
        ledger: &Ledger,
        path: &std::path::Path,
        password: &str,
        kdf_params: &KdfParams,
    ) -> Result<(), CoreError> {
        let bytes = Self::save_to_bytes_with(ledger, password, kdf_params)?;
        let tmp = path.with_extension(format!("{}.tmp", format::FILE_EXTENSION));
        std::fs::write(&tmp, bytes)?;
        std::fs::rename(&tmp, path)?;
        Ok(())
    }

    /// Read and decrypt a ledger file (native only).
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from_file(path: &std::path::Path, password: &str) -> Result<Ledger, CoreError> {
        let bytes = std::fs::read(path)?;
        Self::load_from_bytes(&bytes, password)
    }
}
