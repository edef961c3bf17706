//! AES-128-CBC encryption for sensitive media-URL query parameters.

use aes::Aes128;
use anyhow::{anyhow, Result};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use cbc::cipher::{block_padding::Pkcs7, BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use rand_core::{OsRng, RngCore};

/// AES block size in bytes; also the key and IV length for AES-128-CBC.
const AES_BLOCK_SIZE: usize = 16;

type Aes128CbcEnc = cbc::Encryptor<Aes128>;
type Aes128CbcDec = cbc::Decryptor<Aes128>;

/// Encrypts the private subset of a media URL's query parameters.
///
/// The URL localizer serializes the private parameters to JSON and hands
/// the plaintext here; the returned ciphertext must be safe to embed in a
/// query string without further escaping.
pub trait QueryEncryptor: Send + Sync {
    fn encrypt(&self, plaintext: &str) -> Result<String>;
    fn decrypt(&self, ciphertext: &str) -> Result<String>;
}

pub struct AesQueryEncryptor {
    key: [u8; AES_BLOCK_SIZE],
}

impl AesQueryEncryptor {
    /// Derives a fixed-size key from the configured secret. Secrets longer
    /// than one AES block are truncated, shorter ones are zero-padded.
    pub fn new(secret: &str) -> Self {
        let mut key = [0u8; AES_BLOCK_SIZE];
        for (slot, byte) in key.iter_mut().zip(secret.bytes()) {
            *slot = byte;
        }
        Self { key }
    }
}

impl QueryEncryptor for AesQueryEncryptor {
    fn encrypt(&self, plaintext: &str) -> Result<String> {
        let mut iv = [0u8; AES_BLOCK_SIZE];
        OsRng.fill_bytes(&mut iv);

        let cipher = Aes128CbcEnc::new_from_slices(&self.key, &iv)
            .map_err(|err| anyhow!("invalid key or IV length: {err}"))?;
        let encrypted = cipher.encrypt_padded_vec_mut::<Pkcs7>(plaintext.as_bytes());

        // IV is prepended so decryption needs no extra state.
        let mut payload = Vec::with_capacity(AES_BLOCK_SIZE + encrypted.len());
        payload.extend_from_slice(&iv);
        payload.extend_from_slice(&encrypted);
        Ok(URL_SAFE_NO_PAD.encode(payload))
    }

    fn decrypt(&self, ciphertext: &str) -> Result<String> {
        let payload = URL_SAFE_NO_PAD
            .decode(ciphertext)
            .map_err(|err| anyhow!("decoding ciphertext: {err}"))?;
        if payload.len() < AES_BLOCK_SIZE {
            return Err(anyhow!("ciphertext shorter than one AES block"));
        }

        let (iv, data) = payload.split_at(AES_BLOCK_SIZE);
        let cipher = Aes128CbcDec::new_from_slices(&self.key, iv)
            .map_err(|err| anyhow!("invalid key or IV length: {err}"))?;
        let decrypted = cipher
            .decrypt_padded_vec_mut::<Pkcs7>(data)
            .map_err(|_| anyhow!("invalid padding in ciphertext"))?;
        String::from_utf8(decrypted).map_err(|err| anyhow!("decrypted payload not UTF-8: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encrypt_decrypt_round_trip() {
        let encryptor = AesQueryEncryptor::new("0123456789abcdef");
        let plaintext = r#"[["pot","abc"],["ip","1.2.3.4"]]"#;
        let ciphertext = encryptor.encrypt(plaintext).unwrap();
        assert_ne!(ciphertext, plaintext);
        assert_eq!(encryptor.decrypt(&ciphertext).unwrap(), plaintext);
    }

    #[test]
    fn ciphertext_is_query_safe() {
        let encryptor = AesQueryEncryptor::new("secret");
        let ciphertext = encryptor.encrypt("payload with spaces & symbols").unwrap();
        assert!(ciphertext
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
    }

    #[test]
    fn distinct_ivs_produce_distinct_ciphertexts() {
        let encryptor = AesQueryEncryptor::new("secret");
        let a = encryptor.encrypt("same input").unwrap();
        let b = encryptor.encrypt("same input").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn decrypt_rejects_garbage() {
        let encryptor = AesQueryEncryptor::new("secret");
        assert!(encryptor.decrypt("not base64 !!!").is_err());
        assert!(encryptor.decrypt("c2hvcnQ").is_err());
    }
}
