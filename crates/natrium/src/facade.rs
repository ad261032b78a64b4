//! The public operation surface.
//!
//! Every operation follows one protocol: validate fixed-length parameters
//! against the published constants, reject undersized opening inputs
//! before the engine sees them, encode text inputs into scratch regions,
//! invoke the bound engine with sized output buffers, then decode the
//! written output back to text or raise the family's error kind.
//!
//! Keys, nonces, signed messages, ciphertexts, authenticators and digests
//! are always binary text (one char per byte). Message payloads come in
//! two flavors per operation: the plain variant treats the message as
//! binary text, the `_utf8` variant as ordinary text encoded/decoded
//! through the UTF-8 codec.

use crate::arena::{Region, ScratchArena};
use crate::codec;
use crate::engine::{
    Engine, AUTH_KEY_LEN, AUTH_LEN, BOX_NONCE_LEN, BOX_OVERHEAD, BOX_PUBLIC_KEY_LEN,
    BOX_SECRET_KEY_LEN, HASH_LEN, SECRETBOX_KEY_LEN, SECRETBOX_NONCE_LEN, SECRETBOX_OVERHEAD,
    SIGN_OVERHEAD, SIGN_PUBLIC_KEY_LEN, SIGN_SECRET_KEY_LEN,
};
use crate::error::{AuthenticatorError, BoxError, SecretBoxError, SignatureError};
use crate::random::{OsRandom, RandomSource};

/// A freshly generated keypair, both halves as binary text.
#[derive(Clone)]
pub struct KeyPair {
    pub secret_key: String,
    pub public_key: String,
}

impl std::fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyPair")
            .field("secret_key", &"<redacted>")
            .field("public_key", &self.public_key.escape_default().to_string())
            .finish()
    }
}

/// The operation façade: a bound engine, a scratch arena, and an injected
/// random source.
///
/// Single-threaded cooperative: every operation runs to completion, and
/// one `Natrium` instance must not be shared between concurrent calls.
pub struct Natrium {
    engine: Engine,
    arena: ScratchArena,
    rng: Box<dyn RandomSource>,
}

impl Natrium {
    /// Reference engine implementations and the OS random source.
    pub fn new() -> Self {
        Self::with_rng(Box::new(OsRandom))
    }

    /// Reference engine implementations with a caller-supplied random
    /// source.
    pub fn with_rng(rng: Box<dyn RandomSource>) -> Self {
        Self::with_engine(Engine::reference(), rng)
    }

    /// Fully custom engine and random source.
    pub fn with_engine(engine: Engine, rng: Box<dyn RandomSource>) -> Self {
        Self {
            engine,
            arena: ScratchArena::new(),
            rng,
        }
    }

    fn random_text(&mut self, len: usize) -> String {
        let mut buf = self.arena.alloc(len);
        self.rng.fill(&mut buf);
        codec::decode_binary(&buf)
    }

    // ------------------------------------------------------------------
    // sign

    /// Generate a signing keypair.
    pub fn sign_keypair(&mut self) -> Result<KeyPair, SignatureError> {
        log::trace!("generating signing keypair");
        let mut pk = self.arena.alloc(SIGN_PUBLIC_KEY_LEN);
        let mut sk = self.arena.alloc(SIGN_SECRET_KEY_LEN);
        self.engine
            .sign()
            .keypair(self.rng.as_mut(), &mut pk, &mut sk)
            .map_err(|_| SignatureError::engine("inexplicably failed to create keypair"))?;
        Ok(KeyPair {
            secret_key: codec::decode_binary(&sk),
            public_key: codec::decode_binary(&pk),
        })
    }

    fn checked_sign_secret_key(&self, secret_key: &str) -> Result<Region<'_>, SignatureError> {
        let sk = codec::encode_binary(&self.arena, secret_key);
        if sk.len() != SIGN_SECRET_KEY_LEN {
            return Err(SignatureError::invalid_length(
                "secret-key",
                SIGN_SECRET_KEY_LEN,
                sk.len(),
            ));
        }
        Ok(sk)
    }

    fn sign_buffers(&self, message: &[u8], secret_key: &[u8]) -> Result<String, SignatureError> {
        let mut signed = self.arena.alloc(message.len() + SIGN_OVERHEAD);
        let written = self
            .engine
            .sign()
            .sign(&mut signed, message, secret_key)
            .map_err(|_| SignatureError::engine("inexplicably failed to sign message"))?;
        Ok(codec::decode_binary(&signed[..written]))
    }

    /// Sign a binary message; returns the signed message
    /// (`message + SIGN_OVERHEAD` bytes of binary text).
    pub fn sign(&self, message: &str, secret_key: &str) -> Result<String, SignatureError> {
        let sk = self.checked_sign_secret_key(secret_key)?;
        let m = codec::encode_binary(&self.arena, message);
        self.sign_buffers(&m, &sk)
    }

    /// Sign a text message, marshalled as UTF-8.
    pub fn sign_utf8(&self, message: &str, secret_key: &str) -> Result<String, SignatureError> {
        let sk = self.checked_sign_secret_key(secret_key)?;
        let m = codec::encode_utf8(&self.arena, message);
        self.sign_buffers(&m, &sk)
    }

    fn sign_open_region(
        &self,
        signed_message: &str,
        public_key: &str,
    ) -> Result<(Region<'_>, usize), SignatureError> {
        let pk = codec::encode_binary(&self.arena, public_key);
        if pk.len() != SIGN_PUBLIC_KEY_LEN {
            return Err(SignatureError::invalid_length(
                "public-key",
                SIGN_PUBLIC_KEY_LEN,
                pk.len(),
            ));
        }
        let sm = codec::encode_binary(&self.arena, signed_message);
        // The engine does not guard undersized input.
        if sm.len() < SIGN_OVERHEAD {
            return Err(SignatureError::too_short(
                "signed message",
                SIGN_OVERHEAD,
                sm.len(),
            ));
        }
        let mut message = self.arena.alloc(sm.len());
        let written = self
            .engine
            .sign()
            .open(&mut message, &sm, &pk)
            .map_err(|_| SignatureError::verification_failed("ciphertext fails verification"))?;
        Ok((message, written))
    }

    /// Verify a signed binary message and return its payload.
    pub fn sign_open(
        &self,
        signed_message: &str,
        public_key: &str,
    ) -> Result<String, SignatureError> {
        let (message, written) = self.sign_open_region(signed_message, public_key)?;
        Ok(codec::decode_binary(&message[..written]))
    }

    /// Verify a signed message and return its payload decoded as UTF-8.
    pub fn sign_open_utf8(
        &self,
        signed_message: &str,
        public_key: &str,
    ) -> Result<String, SignatureError> {
        let (message, written) = self.sign_open_region(signed_message, public_key)?;
        codec::decode_utf8(&message[..written]).map_err(SignatureError::encoding)
    }

    fn sign_peek_region(&self, signed_message: &str) -> Result<Region<'_>, SignatureError> {
        let sm = codec::encode_binary(&self.arena, signed_message);
        if sm.len() < SIGN_OVERHEAD {
            return Err(SignatureError::too_short(
                "signed message",
                SIGN_OVERHEAD,
                sm.len(),
            ));
        }
        Ok(sm)
    }

    /// Extract the payload of a signed binary message *without* verifying
    /// the signature, using the signature-prefix framing `sign` produces.
    pub fn sign_peek(&self, signed_message: &str) -> Result<String, SignatureError> {
        let sm = self.sign_peek_region(signed_message)?;
        Ok(codec::decode_binary(&sm[SIGN_OVERHEAD..]))
    }

    /// Like [`sign_peek`](Self::sign_peek), decoding the payload as UTF-8.
    pub fn sign_peek_utf8(&self, signed_message: &str) -> Result<String, SignatureError> {
        let sm = self.sign_peek_region(signed_message)?;
        codec::decode_utf8(&sm[SIGN_OVERHEAD..]).map_err(SignatureError::encoding)
    }

    // ------------------------------------------------------------------
    // box

    /// Generate a box keypair.
    pub fn box_keypair(&mut self) -> Result<KeyPair, BoxError> {
        log::trace!("generating box keypair");
        let mut pk = self.arena.alloc(BOX_PUBLIC_KEY_LEN);
        let mut sk = self.arena.alloc(BOX_SECRET_KEY_LEN);
        self.engine
            .pkbox()
            .keypair(self.rng.as_mut(), &mut pk, &mut sk)
            .map_err(|_| BoxError::engine("inexplicably failed to create keypair"))?;
        Ok(KeyPair {
            secret_key: codec::decode_binary(&sk),
            public_key: codec::decode_binary(&pk),
        })
    }

    /// A fresh random box nonce, as binary text.
    pub fn box_random_nonce(&mut self) -> String {
        self.random_text(BOX_NONCE_LEN)
    }

    fn box_params(
        &self,
        nonce: &str,
        public_key: &str,
        secret_key: &str,
    ) -> Result<(Region<'_>, Region<'_>, Region<'_>), BoxError> {
        let pk = codec::encode_binary(&self.arena, public_key);
        if pk.len() != BOX_PUBLIC_KEY_LEN {
            return Err(BoxError::invalid_length(
                "public-key",
                BOX_PUBLIC_KEY_LEN,
                pk.len(),
            ));
        }
        let sk = codec::encode_binary(&self.arena, secret_key);
        if sk.len() != BOX_SECRET_KEY_LEN {
            return Err(BoxError::invalid_length(
                "secret-key",
                BOX_SECRET_KEY_LEN,
                sk.len(),
            ));
        }
        let n = codec::encode_binary(&self.arena, nonce);
        if n.len() != BOX_NONCE_LEN {
            return Err(BoxError::invalid_length("nonce", BOX_NONCE_LEN, n.len()));
        }
        Ok((n, pk, sk))
    }

    fn box_seal_buffers(
        &self,
        message: &[u8],
        nonce: &[u8],
        public_key: &[u8],
        secret_key: &[u8],
    ) -> Result<String, BoxError> {
        let mut ciphertext = self.arena.alloc(message.len() + BOX_OVERHEAD);
        let written = self
            .engine
            .pkbox()
            .seal(&mut ciphertext, message, nonce, public_key, secret_key)
            .map_err(|_| BoxError::engine("inexplicably failed to box message"))?;
        Ok(codec::decode_binary(&ciphertext[..written]))
    }

    /// Seal a binary message to the holder of `public_key`'s secret half.
    pub fn box_seal(
        &self,
        message: &str,
        nonce: &str,
        public_key: &str,
        secret_key: &str,
    ) -> Result<String, BoxError> {
        let (n, pk, sk) = self.box_params(nonce, public_key, secret_key)?;
        let m = codec::encode_binary(&self.arena, message);
        self.box_seal_buffers(&m, &n, &pk, &sk)
    }

    /// Seal a text message, marshalled as UTF-8.
    pub fn box_seal_utf8(
        &self,
        message: &str,
        nonce: &str,
        public_key: &str,
        secret_key: &str,
    ) -> Result<String, BoxError> {
        let (n, pk, sk) = self.box_params(nonce, public_key, secret_key)?;
        let m = codec::encode_utf8(&self.arena, message);
        self.box_seal_buffers(&m, &n, &pk, &sk)
    }

    fn box_open_region(
        &self,
        ciphertext: &str,
        nonce: &str,
        public_key: &str,
        secret_key: &str,
    ) -> Result<(Region<'_>, usize), BoxError> {
        let (n, pk, sk) = self.box_params(nonce, public_key, secret_key)?;
        let ct = codec::encode_binary(&self.arena, ciphertext);
        if ct.len() < BOX_OVERHEAD {
            return Err(BoxError::too_short("ciphertext", BOX_OVERHEAD, ct.len()));
        }
        let mut message = self.arena.alloc(ct.len());
        let written = self
            .engine
            .pkbox()
            .open(&mut message, &ct, &n, &pk, &sk)
            .map_err(|_| BoxError::verification_failed("ciphertext fails verification"))?;
        Ok((message, written))
    }

    /// Open a boxed binary message from the holder of `public_key`'s
    /// secret half.
    pub fn box_open(
        &self,
        ciphertext: &str,
        nonce: &str,
        public_key: &str,
        secret_key: &str,
    ) -> Result<String, BoxError> {
        let (message, written) = self.box_open_region(ciphertext, nonce, public_key, secret_key)?;
        Ok(codec::decode_binary(&message[..written]))
    }

    /// Open a boxed message and decode the payload as UTF-8.
    pub fn box_open_utf8(
        &self,
        ciphertext: &str,
        nonce: &str,
        public_key: &str,
        secret_key: &str,
    ) -> Result<String, BoxError> {
        let (message, written) = self.box_open_region(ciphertext, nonce, public_key, secret_key)?;
        codec::decode_utf8(&message[..written]).map_err(BoxError::encoding)
    }

    // ------------------------------------------------------------------
    // secretbox

    /// A fresh random secretbox key, as binary text.
    pub fn secretbox_random_key(&mut self) -> String {
        self.random_text(SECRETBOX_KEY_LEN)
    }

    /// A fresh random secretbox nonce, as binary text.
    pub fn secretbox_random_nonce(&mut self) -> String {
        self.random_text(SECRETBOX_NONCE_LEN)
    }

    fn secretbox_params(
        &self,
        nonce: &str,
        key: &str,
    ) -> Result<(Region<'_>, Region<'_>), SecretBoxError> {
        let k = codec::encode_binary(&self.arena, key);
        if k.len() != SECRETBOX_KEY_LEN {
            return Err(SecretBoxError::invalid_length(
                "key",
                SECRETBOX_KEY_LEN,
                k.len(),
            ));
        }
        let n = codec::encode_binary(&self.arena, nonce);
        if n.len() != SECRETBOX_NONCE_LEN {
            return Err(SecretBoxError::invalid_length(
                "nonce",
                SECRETBOX_NONCE_LEN,
                n.len(),
            ));
        }
        Ok((n, k))
    }

    fn secretbox_seal_buffers(
        &self,
        message: &[u8],
        nonce: &[u8],
        key: &[u8],
    ) -> Result<String, SecretBoxError> {
        let mut ciphertext = self.arena.alloc(message.len() + SECRETBOX_OVERHEAD);
        let written = self
            .engine
            .secretbox()
            .seal(&mut ciphertext, message, nonce, key)
            .map_err(|_| SecretBoxError::engine("inexplicably failed to box message"))?;
        Ok(codec::decode_binary(&ciphertext[..written]))
    }

    /// Seal a binary message under a shared key.
    pub fn secretbox_seal(
        &self,
        message: &str,
        nonce: &str,
        key: &str,
    ) -> Result<String, SecretBoxError> {
        let (n, k) = self.secretbox_params(nonce, key)?;
        let m = codec::encode_binary(&self.arena, message);
        self.secretbox_seal_buffers(&m, &n, &k)
    }

    /// Seal a text message, marshalled as UTF-8.
    pub fn secretbox_seal_utf8(
        &self,
        message: &str,
        nonce: &str,
        key: &str,
    ) -> Result<String, SecretBoxError> {
        let (n, k) = self.secretbox_params(nonce, key)?;
        let m = codec::encode_utf8(&self.arena, message);
        self.secretbox_seal_buffers(&m, &n, &k)
    }

    fn secretbox_open_region(
        &self,
        ciphertext: &str,
        nonce: &str,
        key: &str,
    ) -> Result<(Region<'_>, usize), SecretBoxError> {
        let (n, k) = self.secretbox_params(nonce, key)?;
        let ct = codec::encode_binary(&self.arena, ciphertext);
        if ct.len() < SECRETBOX_OVERHEAD {
            return Err(SecretBoxError::too_short(
                "ciphertext",
                SECRETBOX_OVERHEAD,
                ct.len(),
            ));
        }
        let mut message = self.arena.alloc(ct.len());
        let written = self
            .engine
            .secretbox()
            .open(&mut message, &ct, &n, &k)
            .map_err(|_| SecretBoxError::verification_failed("ciphertext fails verification"))?;
        Ok((message, written))
    }

    /// Open a secretboxed binary message.
    pub fn secretbox_open(
        &self,
        ciphertext: &str,
        nonce: &str,
        key: &str,
    ) -> Result<String, SecretBoxError> {
        let (message, written) = self.secretbox_open_region(ciphertext, nonce, key)?;
        Ok(codec::decode_binary(&message[..written]))
    }

    /// Open a secretboxed message and decode the payload as UTF-8.
    pub fn secretbox_open_utf8(
        &self,
        ciphertext: &str,
        nonce: &str,
        key: &str,
    ) -> Result<String, SecretBoxError> {
        let (message, written) = self.secretbox_open_region(ciphertext, nonce, key)?;
        codec::decode_utf8(&message[..written]).map_err(SecretBoxError::encoding)
    }

    // ------------------------------------------------------------------
    // auth

    /// A fresh random auth key, as binary text.
    pub fn auth_random_key(&mut self) -> String {
        self.random_text(AUTH_KEY_LEN)
    }

    fn checked_auth_key(&self, key: &str) -> Result<Region<'_>, AuthenticatorError> {
        let k = codec::encode_binary(&self.arena, key);
        if k.len() != AUTH_KEY_LEN {
            return Err(AuthenticatorError::invalid_length(
                "key",
                AUTH_KEY_LEN,
                k.len(),
            ));
        }
        Ok(k)
    }

    fn auth_buffers(&self, message: &[u8], key: &[u8]) -> Result<String, AuthenticatorError> {
        let mut authenticator = self.arena.alloc(AUTH_LEN);
        let written = self
            .engine
            .auth()
            .auth(&mut authenticator, message, key)
            .map_err(|_| AuthenticatorError::engine("inexplicably failed to authenticate"))?;
        Ok(codec::decode_binary(&authenticator[..written]))
    }

    /// Compute the authenticator for a binary message under a shared key.
    pub fn auth(&self, message: &str, key: &str) -> Result<String, AuthenticatorError> {
        let k = self.checked_auth_key(key)?;
        let m = codec::encode_binary(&self.arena, message);
        self.auth_buffers(&m, &k)
    }

    /// Compute the authenticator for a text message, marshalled as UTF-8.
    pub fn auth_utf8(&self, message: &str, key: &str) -> Result<String, AuthenticatorError> {
        let k = self.checked_auth_key(key)?;
        let m = codec::encode_utf8(&self.arena, message);
        self.auth_buffers(&m, &k)
    }

    fn auth_verify_buffers(
        &self,
        authenticator: &str,
        message: &[u8],
        key: &[u8],
    ) -> Result<(), AuthenticatorError> {
        let a = codec::encode_binary(&self.arena, authenticator);
        if a.len() != AUTH_LEN {
            return Err(AuthenticatorError::invalid_length(
                "authenticator",
                AUTH_LEN,
                a.len(),
            ));
        }
        self.engine
            .auth()
            .verify(&a, message, key)
            .map_err(|_| AuthenticatorError::verification_failed("authenticator fails verification"))
    }

    /// Verify an authenticator over a binary message.
    pub fn auth_verify(
        &self,
        authenticator: &str,
        message: &str,
        key: &str,
    ) -> Result<(), AuthenticatorError> {
        let k = self.checked_auth_key(key)?;
        let m = codec::encode_binary(&self.arena, message);
        self.auth_verify_buffers(authenticator, &m, &k)
    }

    /// Verify an authenticator over a text message, marshalled as UTF-8.
    pub fn auth_verify_utf8(
        &self,
        authenticator: &str,
        message: &str,
        key: &str,
    ) -> Result<(), AuthenticatorError> {
        let k = self.checked_auth_key(key)?;
        let m = codec::encode_utf8(&self.arena, message);
        self.auth_verify_buffers(authenticator, &m, &k)
    }

    // ------------------------------------------------------------------
    // hash

    fn hash_buffers(&self, message: &[u8]) -> String {
        let mut digest = self.arena.alloc(HASH_LEN);
        let written = self.engine.hash().hash(&mut digest, message);
        codec::decode_binary(&digest[..written])
    }

    /// Digest of a binary message, as binary text.
    pub fn hash(&self, message: &str) -> String {
        let m = codec::encode_binary(&self.arena, message);
        self.hash_buffers(&m)
    }

    /// Digest of a text message, marshalled as UTF-8.
    pub fn hash_utf8(&self, message: &str) -> String {
        let m = codec::encode_utf8(&self.arena, message);
        self.hash_buffers(&m)
    }
}

impl Default for Natrium {
    fn default() -> Self {
        Self::new()
    }
}
