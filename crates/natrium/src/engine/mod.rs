//! Byte-buffer binding to the cryptographic engine.
//!
//! One trait per primitive family, each with a single reference
//! implementation selected when [`Engine::reference`] is constructed. The
//! trait methods keep the engine's native shape: caller-allocated output
//! slices, pre-marshalled input slices, and a written-length return. A
//! failure is opaque — the binding never interprets a specific engine
//! status, only success versus failure.
//!
//! Output slices must be at least the documented size for the operation
//! (the façade sizes them from the published constants); implementations do
//! not guard against undersized outputs.

mod auth;
mod hash;
mod pkbox;
mod secretbox;
mod sign;

pub use auth::HmacSha512256;
pub use hash::Sha512Hash;
pub use pkbox::Curve25519Box;
pub use secretbox::XsalsaSecretbox;
pub use sign::Ed25519Sign;

use crate::random::RandomSource;

/// Signing secret-key length in bytes.
pub const SIGN_SECRET_KEY_LEN: usize = 64;
/// Signing public-key length in bytes.
pub const SIGN_PUBLIC_KEY_LEN: usize = 32;
/// Bytes a signed message adds on top of its payload.
pub const SIGN_OVERHEAD: usize = 64;

/// Box secret-key length in bytes.
pub const BOX_SECRET_KEY_LEN: usize = 32;
/// Box public-key length in bytes.
pub const BOX_PUBLIC_KEY_LEN: usize = 32;
/// Box nonce length in bytes.
pub const BOX_NONCE_LEN: usize = 24;
/// Bytes a boxed message adds on top of its payload.
pub const BOX_OVERHEAD: usize = 16;

/// Secretbox key length in bytes.
pub const SECRETBOX_KEY_LEN: usize = 32;
/// Secretbox nonce length in bytes.
pub const SECRETBOX_NONCE_LEN: usize = 24;
/// Bytes a secretboxed message adds on top of its payload.
pub const SECRETBOX_OVERHEAD: usize = 16;

/// Auth shared-key length in bytes.
pub const AUTH_KEY_LEN: usize = 32;
/// Authenticator length in bytes.
pub const AUTH_LEN: usize = 32;

/// Digest length in bytes.
pub const HASH_LEN: usize = 64;

/// Opaque non-success status from an engine primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineFailure;

/// Public-key signing: keypair generation, signing, opening.
pub trait SignEngine {
    /// Generate a keypair into `public_key` (32 bytes) and `secret_key`
    /// (64 bytes).
    fn keypair(
        &self,
        rng: &mut dyn RandomSource,
        public_key: &mut [u8],
        secret_key: &mut [u8],
    ) -> Result<(), EngineFailure>;

    /// Write signature-prefixed `message` into `signed`; returns the
    /// signed length (`message.len() + SIGN_OVERHEAD`).
    fn sign(
        &self,
        signed: &mut [u8],
        message: &[u8],
        secret_key: &[u8],
    ) -> Result<usize, EngineFailure>;

    /// Verify `signed` and write the payload into `message`; returns the
    /// payload length. `signed` must already be at least `SIGN_OVERHEAD`
    /// bytes — this binding does not guard undersized input.
    fn open(
        &self,
        message: &mut [u8],
        signed: &[u8],
        public_key: &[u8],
    ) -> Result<usize, EngineFailure>;
}

/// Public-key authenticated encryption.
pub trait BoxEngine {
    /// Generate a keypair into `public_key` and `secret_key` (32 bytes
    /// each).
    fn keypair(
        &self,
        rng: &mut dyn RandomSource,
        public_key: &mut [u8],
        secret_key: &mut [u8],
    ) -> Result<(), EngineFailure>;

    /// Seal `message` for the holder of `public_key`'s secret half;
    /// returns the ciphertext length (`message.len() + BOX_OVERHEAD`).
    fn seal(
        &self,
        ciphertext: &mut [u8],
        message: &[u8],
        nonce: &[u8],
        public_key: &[u8],
        secret_key: &[u8],
    ) -> Result<usize, EngineFailure>;

    /// Open `ciphertext` sent by the holder of `public_key`'s secret half;
    /// returns the payload length. `ciphertext` must already be at least
    /// `BOX_OVERHEAD` bytes.
    fn open(
        &self,
        message: &mut [u8],
        ciphertext: &[u8],
        nonce: &[u8],
        public_key: &[u8],
        secret_key: &[u8],
    ) -> Result<usize, EngineFailure>;
}

/// Symmetric authenticated encryption.
pub trait SecretboxEngine {
    /// Seal `message` under `key`; returns the ciphertext length
    /// (`message.len() + SECRETBOX_OVERHEAD`).
    fn seal(
        &self,
        ciphertext: &mut [u8],
        message: &[u8],
        nonce: &[u8],
        key: &[u8],
    ) -> Result<usize, EngineFailure>;

    /// Open `ciphertext` under `key`; returns the payload length.
    /// `ciphertext` must already be at least `SECRETBOX_OVERHEAD` bytes.
    fn open(
        &self,
        message: &mut [u8],
        ciphertext: &[u8],
        nonce: &[u8],
        key: &[u8],
    ) -> Result<usize, EngineFailure>;
}

/// Message authentication under a shared key.
pub trait AuthEngine {
    /// Write the authenticator for `message` into `authenticator`
    /// (`AUTH_LEN` bytes); returns `AUTH_LEN`.
    fn auth(
        &self,
        authenticator: &mut [u8],
        message: &[u8],
        key: &[u8],
    ) -> Result<usize, EngineFailure>;

    /// Constant-time verification of `authenticator` over `message`.
    fn verify(
        &self,
        authenticator: &[u8],
        message: &[u8],
        key: &[u8],
    ) -> Result<(), EngineFailure>;
}

/// One-way hashing.
///
/// Digest computation has no failure path: no key material, no
/// verification. A hash engine that cannot produce output is a
/// configuration error, caught when the engine is bound.
pub trait HashEngine {
    /// Write the digest of `message` into `digest` (`HASH_LEN` bytes);
    /// returns `HASH_LEN`.
    fn hash(&self, digest: &mut [u8], message: &[u8]) -> usize;
}

/// The full set of family implementations, bound once at initialization.
pub struct Engine {
    sign: Box<dyn SignEngine>,
    pkbox: Box<dyn BoxEngine>,
    secretbox: Box<dyn SecretboxEngine>,
    auth: Box<dyn AuthEngine>,
    hash: Box<dyn HashEngine>,
}

impl Engine {
    /// Bind the reference implementations: Ed25519 signing,
    /// curve25519xsalsa20poly1305 box, xsalsa20poly1305 secretbox,
    /// HMAC-SHA-512-256 auth, SHA-512 hash.
    pub fn reference() -> Self {
        log::debug!("binding reference engine implementations");
        Self {
            sign: Box::new(Ed25519Sign),
            pkbox: Box::new(Curve25519Box),
            secretbox: Box::new(XsalsaSecretbox),
            auth: Box::new(HmacSha512256),
            hash: Box::new(Sha512Hash),
        }
    }

    /// Bind a custom set of family implementations.
    pub fn with_implementations(
        sign: Box<dyn SignEngine>,
        pkbox: Box<dyn BoxEngine>,
        secretbox: Box<dyn SecretboxEngine>,
        auth: Box<dyn AuthEngine>,
        hash: Box<dyn HashEngine>,
    ) -> Self {
        Self {
            sign,
            pkbox,
            secretbox,
            auth,
            hash,
        }
    }

    pub fn sign(&self) -> &dyn SignEngine {
        &*self.sign
    }

    pub fn pkbox(&self) -> &dyn BoxEngine {
        &*self.pkbox
    }

    pub fn secretbox(&self) -> &dyn SecretboxEngine {
        &*self.secretbox
    }

    pub fn auth(&self) -> &dyn AuthEngine {
        &*self.auth
    }

    pub fn hash(&self) -> &dyn HashEngine {
        &*self.hash
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::reference()
    }
}
