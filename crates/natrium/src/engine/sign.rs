//! Ed25519 signing engine.
//!
//! Signed messages are framed as the 64-byte signature followed by the
//! payload. Secret keys use the 64-byte seed-plus-public-key layout, so a
//! secret key embeds its own public half.

use ed25519_dalek::{Signature, Signer, SigningKey, Verifier, VerifyingKey};
use zeroize::Zeroize;

use super::{EngineFailure, SignEngine, SIGN_OVERHEAD};
use crate::random::RandomSource;

pub struct Ed25519Sign;

impl SignEngine for Ed25519Sign {
    fn keypair(
        &self,
        rng: &mut dyn RandomSource,
        public_key: &mut [u8],
        secret_key: &mut [u8],
    ) -> Result<(), EngineFailure> {
        let mut seed = [0u8; 32];
        rng.fill(&mut seed);
        let signing = SigningKey::from_bytes(&seed);
        seed.zeroize();
        secret_key.copy_from_slice(&signing.to_keypair_bytes());
        public_key.copy_from_slice(signing.verifying_key().as_bytes());
        Ok(())
    }

    fn sign(
        &self,
        signed: &mut [u8],
        message: &[u8],
        secret_key: &[u8],
    ) -> Result<usize, EngineFailure> {
        let key_bytes: [u8; 64] = secret_key.try_into().map_err(|_| EngineFailure)?;
        // Rejects keys whose public half does not match the seed.
        let signing = SigningKey::from_keypair_bytes(&key_bytes).map_err(|_| EngineFailure)?;
        let signature = signing.sign(message);
        signed[..SIGN_OVERHEAD].copy_from_slice(&signature.to_bytes());
        signed[SIGN_OVERHEAD..SIGN_OVERHEAD + message.len()].copy_from_slice(message);
        Ok(SIGN_OVERHEAD + message.len())
    }

    fn open(
        &self,
        message: &mut [u8],
        signed: &[u8],
        public_key: &[u8],
    ) -> Result<usize, EngineFailure> {
        let key_bytes: [u8; 32] = public_key.try_into().map_err(|_| EngineFailure)?;
        let verifying = VerifyingKey::from_bytes(&key_bytes).map_err(|_| EngineFailure)?;
        let (signature_bytes, payload) = signed.split_at(SIGN_OVERHEAD);
        let signature_bytes: [u8; 64] = signature_bytes.try_into().map_err(|_| EngineFailure)?;
        let signature = Signature::from_bytes(&signature_bytes);
        verifying
            .verify(payload, &signature)
            .map_err(|_| EngineFailure)?;
        message[..payload.len()].copy_from_slice(payload);
        Ok(payload.len())
    }
}
