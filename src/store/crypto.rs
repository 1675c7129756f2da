//! At-rest encryption for persisted rate records.

use anyhow::{Context, Result, anyhow, bail};
use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use chacha20poly1305::{
    ChaCha20Poly1305, Key, Nonce,
    aead::{Aead, KeyInit, Payload},
};
use rand::{RngCore, rngs::OsRng};
use std::fs;
use std::path::Path;
use tracing::debug;

const KEY_SIZE: usize = 32;
const NONCE_SIZE: usize = 12;

/// Seals values with ChaCha20-Poly1305. Output layout is `nonce || ciphertext`.
pub struct CacheCipher {
    key: [u8; KEY_SIZE],
}

impl CacheCipher {
    pub fn new(key: [u8; KEY_SIZE]) -> Self {
        Self { key }
    }

    pub fn generate() -> Self {
        let mut key = [0u8; KEY_SIZE];
        OsRng.fill_bytes(&mut key);
        Self { key }
    }

    pub fn from_base64(raw: &str) -> Result<Self> {
        let decoded = BASE64
            .decode(raw.trim())
            .map_err(|e| anyhow!("Cache key is not valid base64: {e}"))?;
        if decoded.len() != KEY_SIZE {
            bail!("Cache key must decode to exactly {KEY_SIZE} bytes");
        }
        let mut key = [0u8; KEY_SIZE];
        key.copy_from_slice(&decoded);
        Ok(Self { key })
    }

    /// Reads the key stored at `path`, creating a fresh one if the file is missing.
    pub fn load_or_create(path: &Path) -> Result<Self> {
        if path.exists() {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("Failed to read cache key: {}", path.display()))?;
            return Self::from_base64(&raw);
        }

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        let cipher = Self::generate();
        fs::write(path, cipher.to_base64())
            .with_context(|| format!("Failed to write cache key: {}", path.display()))?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(path, fs::Permissions::from_mode(0o600))?;
        }
        debug!("Generated new cache key at {}", path.display());
        Ok(cipher)
    }

    pub fn to_base64(&self) -> String {
        BASE64.encode(self.key)
    }

    /// Encrypts `plaintext`, binding it to `aad` so a blob can't be replayed under another key.
    pub fn seal(&self, aad: &[u8], plaintext: &[u8]) -> Result<Vec<u8>> {
        let mut nonce_bytes = [0u8; NONCE_SIZE];
        OsRng.fill_bytes(&mut nonce_bytes);
        let cipher = ChaCha20Poly1305::new(Key::from_slice(&self.key));
        let ciphertext = cipher
            .encrypt(
                Nonce::from_slice(&nonce_bytes),
                Payload {
                    msg: plaintext,
                    aad,
                },
            )
            .map_err(|_| anyhow!("Failed to encrypt cache record"))?;

        let mut sealed = Vec::with_capacity(NONCE_SIZE + ciphertext.len());
        sealed.extend_from_slice(&nonce_bytes);
        sealed.extend_from_slice(&ciphertext);
        Ok(sealed)
    }

    pub fn open(&self, aad: &[u8], sealed: &[u8]) -> Result<Vec<u8>> {
        if sealed.len() < NONCE_SIZE {
            bail!("Cache record is truncated");
        }
        let (nonce_bytes, ciphertext) = sealed.split_at(NONCE_SIZE);
        let cipher = ChaCha20Poly1305::new(Key::from_slice(&self.key));
        cipher
            .decrypt(
                Nonce::from_slice(nonce_bytes),
                Payload {
                    msg: ciphertext,
                    aad,
                },
            )
            .map_err(|_| anyhow!("Failed to decrypt cache record"))
    }
}
