//! Error types for natrium.
//!
//! One error kind per primitive family, so callers can catch by family the
//! way the original surface allowed. Every error carries the sub-kind that
//! produced it, a human-readable message, and a backtrace captured at the
//! point of raise. Key material is never included in error messages.

use std::backtrace::Backtrace;

// Alias so thiserror's derive does not special-case the field: a field whose
// type is written `Backtrace` makes the derive emit a nightly-only
// `Error::provide` impl, which does not compile on stable.
type CapturedBacktrace = Backtrace;

/// What went wrong inside a primitive family.
///
/// Splits "the input was malformed before we ever touched the engine" from
/// "the engine rejected the input cryptographically", which the original
/// surface distinguished only by message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// A fixed-length parameter (key, nonce, authenticator) had the wrong
    /// byte length.
    InvalidLength,
    /// An opening/verifying input was shorter than the minimum overhead.
    InputTooShort,
    /// The engine rejected the input: bad signature, tampered ciphertext,
    /// or a forged authenticator.
    VerificationFailed,
    /// The engine failed for a reason other than verification, e.g. an
    /// inconsistent keypair encoding.
    Engine,
    /// Text could not be decoded from the engine's output buffer.
    Encoding,
}

macro_rules! family_error {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, thiserror::Error)]
        #[error("{message}")]
        pub struct $name {
            kind: FailureKind,
            message: String,
            backtrace: CapturedBacktrace,
        }

        impl $name {
            pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
                Self {
                    kind,
                    message: message.into(),
                    backtrace: Backtrace::capture(),
                }
            }

            pub fn invalid_length(
                parameter: &'static str,
                expected: usize,
                actual: usize,
            ) -> Self {
                Self::new(
                    FailureKind::InvalidLength,
                    format!("incorrect {parameter} length: expected {expected} bytes, got {actual}"),
                )
            }

            pub fn too_short(what: &'static str, minimum: usize, actual: usize) -> Self {
                Self::new(
                    FailureKind::InputTooShort,
                    format!("{what} is smaller than the minimum size: {actual} < {minimum}"),
                )
            }

            pub fn verification_failed(message: &'static str) -> Self {
                Self::new(FailureKind::VerificationFailed, message)
            }

            pub fn engine(message: &'static str) -> Self {
                Self::new(FailureKind::Engine, message)
            }

            pub fn encoding(detail: impl std::fmt::Display) -> Self {
                Self::new(FailureKind::Encoding, format!("output is not decodable text: {detail}"))
            }

            /// The sub-kind that produced this error.
            pub fn kind(&self) -> FailureKind {
                self.kind
            }

            /// The human-readable failure message.
            pub fn message(&self) -> &str {
                &self.message
            }

            /// Backtrace captured when the error was raised.
            ///
            /// Disabled (and cheap) unless `RUST_BACKTRACE` is set.
            pub fn trace(&self) -> &Backtrace {
                &self.backtrace
            }
        }
    };
}

family_error! {
    /// Failure in the `sign` family: keypair generation, signing, opening
    /// or peeking a signed message.
    SignatureError
}

family_error! {
    /// Failure in the `box` family: public-key authenticated encryption.
    BoxError
}

family_error! {
    /// Failure in the `secretbox` family: symmetric authenticated
    /// encryption.
    SecretBoxError
}

family_error! {
    /// Failure in the `auth` family: message authentication.
    AuthenticatorError
}
