//! curve25519xsalsa20poly1305 box engine.
//!
//! Ciphertexts carry a 16-byte Poly1305 tag ahead of the encrypted
//! payload; the nonce is supplied by the caller and not embedded.

use crypto_box::aead::{Aead, Nonce};
use crypto_box::{PublicKey, SalsaBox, SecretKey};
use zeroize::Zeroize;

use super::{BoxEngine, EngineFailure, BOX_NONCE_LEN};
use crate::random::RandomSource;

pub struct Curve25519Box;

fn cipher(public_key: &[u8], secret_key: &[u8]) -> Result<SalsaBox, EngineFailure> {
    let pk: [u8; 32] = public_key.try_into().map_err(|_| EngineFailure)?;
    let sk: [u8; 32] = secret_key.try_into().map_err(|_| EngineFailure)?;
    Ok(SalsaBox::new(&PublicKey::from(pk), &SecretKey::from(sk)))
}

fn nonce(bytes: &[u8]) -> Result<Nonce<SalsaBox>, EngineFailure> {
    let n: [u8; BOX_NONCE_LEN] = bytes.try_into().map_err(|_| EngineFailure)?;
    Ok(Nonce::<SalsaBox>::from(n))
}

impl BoxEngine for Curve25519Box {
    fn keypair(
        &self,
        rng: &mut dyn RandomSource,
        public_key: &mut [u8],
        secret_key: &mut [u8],
    ) -> Result<(), EngineFailure> {
        let mut seed = [0u8; 32];
        rng.fill(&mut seed);
        let secret = SecretKey::from(seed);
        seed.zeroize();
        public_key.copy_from_slice(secret.public_key().as_bytes());
        secret_key.copy_from_slice(&secret.to_bytes());
        Ok(())
    }

    fn seal(
        &self,
        ciphertext: &mut [u8],
        message: &[u8],
        nonce_bytes: &[u8],
        public_key: &[u8],
        secret_key: &[u8],
    ) -> Result<usize, EngineFailure> {
        let sealed = cipher(public_key, secret_key)?
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
        public_key: &[u8],
        secret_key: &[u8],
    ) -> Result<usize, EngineFailure> {
        let opened = cipher(public_key, secret_key)?
            .decrypt(&nonce(nonce_bytes)?, ciphertext)
            .map_err(|_| EngineFailure)?;
        message[..opened.len()].copy_from_slice(&opened);
        Ok(opened.len())
    }
}
