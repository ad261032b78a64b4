//! HMAC-SHA-512-256 authentication engine.
//!
//! The authenticator is the leading 32 bytes of HMAC-SHA-512 output, per
//! the NaCl auth construction. Verification is constant-time.

use hmac::{Hmac, Mac};
use sha2::Sha512;

use super::{AuthEngine, EngineFailure, AUTH_LEN};

type HmacSha512 = Hmac<Sha512>;

pub struct HmacSha512256;

fn mac(key: &[u8], message: &[u8]) -> Result<HmacSha512, EngineFailure> {
    let mut mac = HmacSha512::new_from_slice(key).map_err(|_| EngineFailure)?;
    mac.update(message);
    Ok(mac)
}

impl AuthEngine for HmacSha512256 {
    fn auth(
        &self,
        authenticator: &mut [u8],
        message: &[u8],
        key: &[u8],
    ) -> Result<usize, EngineFailure> {
        let tag = mac(key, message)?.finalize().into_bytes();
        authenticator[..AUTH_LEN].copy_from_slice(&tag[..AUTH_LEN]);
        Ok(AUTH_LEN)
    }

    fn verify(
        &self,
        authenticator: &[u8],
        message: &[u8],
        key: &[u8],
    ) -> Result<(), EngineFailure> {
        mac(key, message)?
            .verify_truncated_left(authenticator)
            .map_err(|_| EngineFailure)
    }
}
