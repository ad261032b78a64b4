//! natrium — a NaCl-style cryptographic surface over pluggable
//! byte-buffer engines.
//!
//! The crate is the marshalling and binding layer, not the cryptography:
//! it converts host text to and from engine byte buffers, manages
//! per-call scratch regions, validates every fixed-length parameter
//! before an engine sees it, and turns engine failures into one typed
//! error per primitive family. The primitives themselves — signing, box,
//! secretbox, auth, hash — live behind the [`engine`] traits, bound once
//! at initialization.
//!
//! ```
//! use natrium::Natrium;
//!
//! let mut nacl = Natrium::new();
//! let keys = nacl.sign_keypair()?;
//! let signed = nacl.sign_utf8("Hello World!", &keys.secret_key)?;
//! assert_eq!(nacl.sign_open_utf8(&signed, &keys.public_key)?, "Hello World!");
//! # Ok::<(), natrium::SignatureError>(())
//! ```

pub mod arena;
pub mod codec;
pub mod engine;
pub mod error;
pub mod facade;
pub mod random;

// Re-export the operation surface and the four catchable error kinds.
pub use error::{AuthenticatorError, BoxError, FailureKind, SecretBoxError, SignatureError};
pub use facade::{KeyPair, Natrium};
pub use random::{OsRandom, RandomSource};

// Published length constants, fixed per primitive family.
pub use engine::{
    AUTH_KEY_LEN, AUTH_LEN, BOX_NONCE_LEN, BOX_OVERHEAD, BOX_PUBLIC_KEY_LEN, BOX_SECRET_KEY_LEN,
    HASH_LEN, SECRETBOX_KEY_LEN, SECRETBOX_NONCE_LEN, SECRETBOX_OVERHEAD, SIGN_OVERHEAD,
    SIGN_PUBLIC_KEY_LEN, SIGN_SECRET_KEY_LEN,
};
