use aes::cipher::{generic_array::GenericArray, BlockDecrypt, BlockEncrypt, KeyInit};
use aes::Aes128;

use crate::error::GreeError;

/// AES block size in bytes; also the required key length.
pub const BLOCK_SIZE: usize = 16;

/// Vendor-generic key every unbound device accepts during discovery/binding.
/// The bind handshake that yields a per-device key is outside this crate.
pub const GENERIC_KEY: [u8; BLOCK_SIZE] = *b"a3K8Bx%2r8Y7#xDh";

/// AES-128-ECB cipher with PKCS7 padding, keyed per device.
///
/// The wire protocol uses ECB without an IV; that is a protocol constant,
/// not a tunable.
#[derive(Debug)]
pub struct AesCipher {
    cipher: Aes128,
}

impl AesCipher {
    /// # Errors
    ///
    /// Returns `GreeError::InvalidKey` unless `key` is exactly 16 bytes.
    pub fn new(key: &[u8]) -> Result<Self, GreeError> {
        if key.len() != BLOCK_SIZE {
            return Err(GreeError::InvalidKey(key.len()));
        }
        Ok(Self {
            cipher: Aes128::new(GenericArray::from_slice(key)),
        })
    }

    /// Pad `plaintext` to a block boundary and encrypt it block by block.
    #[must_use]
    pub fn encrypt(&self, plaintext: &[u8]) -> Vec<u8> {
        let mut buf = pad(plaintext);
        for block in buf.chunks_exact_mut(BLOCK_SIZE) {
            self.cipher
                .encrypt_block(GenericArray::from_mut_slice(block));
        }
        buf
    }

    /// Decrypt `ciphertext` and strip the PKCS7 padding.
    ///
    /// # Errors
    ///
    /// Returns `GreeError::Padding` when the input is empty or not
    /// block-aligned, or when the decrypted tail is not a valid padding run
    /// (value outside 1..=16, or fewer than that many matching bytes).
    pub fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>, GreeError> {
        if ciphertext.is_empty() || ciphertext.len() % BLOCK_SIZE != 0 {
            return Err(GreeError::Padding);
        }
        let mut buf = ciphertext.to_vec();
        for block in buf.chunks_exact_mut(BLOCK_SIZE) {
            self.cipher
                .decrypt_block(GenericArray::from_mut_slice(block));
        }
        let len = unpadded_len(&buf)?;
        buf.truncate(len);
        Ok(buf)
    }
}

// PKCS7: pad with N bytes of value N; a full extra block when already aligned.
fn pad(data: &[u8]) -> Vec<u8> {
    let pad_len = BLOCK_SIZE - data.len() % BLOCK_SIZE;
    let mut buf = Vec::with_capacity(data.len() + pad_len);
    buf.extend_from_slice(data);
    buf.resize(data.len() + pad_len, pad_len as u8);
    buf
}

fn unpadded_len(data: &[u8]) -> Result<usize, GreeError> {
    let pad_byte = *data.last().ok_or(GreeError::Padding)?;
    let pad_len = usize::from(pad_byte);
    if pad_len == 0 || pad_len > BLOCK_SIZE || pad_len > data.len() {
        return Err(GreeError::Padding);
    }
    if !data[data.len() - pad_len..].iter().all(|&b| b == pad_byte) {
        return Err(GreeError::Padding);
    }
    Ok(data.len() - pad_len)
}
