//! xsalsa20poly1305 secretbox engine.

use crypto_secretbox::aead::{Aead, KeyInit};
use crypto_secretbox::{Nonce, XSalsa20Poly1305};

use super::{EngineFailure, SecretboxEngine, SECRETBOX_NONCE_LEN};

pub struct XsalsaSecretbox;

fn cipher(key: &[u8]) -> Result<XSalsa20Poly1305, EngineFailure> {
    XSalsa20Poly1305::new_from_slice(key).map_err(|_| EngineFailure)
}

fn nonce(bytes: &[u8]) -> Result<Nonce, EngineFailure> {
    let n: [u8; SECRETBOX_NONCE_LEN] = bytes.try_into().map_err(|_| EngineFailure)?;
    Ok(Nonce::from(n))
}

impl SecretboxEngine for XsalsaSecretbox {
    fn seal(
        &self,
        ciphertext: &mut [u8],
        message: &[u8],
        nonce_bytes: &[u8],
        key: &[u8],
    ) -> Result<usize, EngineFailure> {
        let sealed = cipher(key)?
            .encrypt(&nonce(nonce_bytes)?, message)
            .map_err(|_| EngineFailure)?;
        ciphertext[..sealed.len()].copy_from_slice(&sealed);
        Ok(sealed.len())
    }

    fn open(
        &self,
        message: &mut [u8],
        ciphertext: &[u8],
        nonce_bytes: &[u8],
        key: &[u8],
    ) -> Result<usize, EngineFailure> {
        let opened = cipher(key)?
            .decrypt(&nonce(nonce_bytes)?, ciphertext)
            .map_err(|_| EngineFailure)?;
        message[..opened.len()].copy_from_slice(&opened);
        Ok(opened.len())
    }
}
