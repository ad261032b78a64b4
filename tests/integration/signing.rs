//! End-to-end signing properties: round trips, tamper detection,
//! cross-key rejection, and the minimum-length guard.

use natrium::{FailureKind, Natrium, SIGN_OVERHEAD};

fn flip_bit(text: &str, byte_index: usize, bit: u32) -> String {
    text.chars()
        .enumerate()
        .map(|(i, c)| {
            if i == byte_index {
                char::from((c as u32 as u8) ^ (1 << bit))
            } else {
                c
            }
        })
        .collect()
}

#[test]
fn sign_open_round_trip() {
    let mut nacl = Natrium::new();
    let keys = nacl.sign_keypair().unwrap();

    for message in ["", "x", "Hello World!", "a longer message with spaces"] {
        let signed = nacl.sign(message, &keys.secret_key).unwrap();
        assert_eq!(
            signed.encode_utf16().count(),
            message.len() + SIGN_OVERHEAD
        );
        assert_eq!(nacl.sign_open(&signed, &keys.public_key).unwrap(), message);
    }
}

#[test]
fn hello_world_is_seventy_six_bytes_and_peekable() {
    let mut nacl = Natrium::new();
    let keys = nacl.sign_keypair().unwrap();

    let signed = nacl.sign("Hello World!", &keys.secret_key).unwrap();
    assert_eq!(signed.encode_utf16().count(), 12 + SIGN_OVERHEAD);

    // Peek extracts the payload without touching the public key.
    assert_eq!(nacl.sign_peek(&signed).unwrap(), "Hello World!");
}

#[test]
fn any_single_bit_flip_is_detected() {
    let mut nacl = Natrium::new();
    let keys = nacl.sign_keypair().unwrap();
    let signed = nacl.sign("Hello World!", &keys.secret_key).unwrap();
    let len = signed.encode_utf16().count();

    for byte_index in 0..len {
        for bit in 0..8 {
            let tampered = flip_bit(&signed, byte_index, bit);
            let err = nacl.sign_open(&tampered, &keys.public_key).unwrap_err();
            assert_eq!(
                err.kind(),
                FailureKind::VerificationFailed,
                "bit {bit} of byte {byte_index} went undetected"
            );
        }
    }
}

#[test]
fn cross_key_open_is_rejected() {
    let mut nacl = Natrium::new();
    let keys_a = nacl.sign_keypair().unwrap();
    let keys_b = nacl.sign_keypair().unwrap();

    let signed = nacl.sign("Hello World!", &keys_a.secret_key).unwrap();
    let err = nacl.sign_open(&signed, &keys_b.public_key).unwrap_err();
    assert_eq!(err.kind(), FailureKind::VerificationFailed);
}

#[test]
fn undersized_signed_messages_never_reach_the_engine() {
    let mut nacl = Natrium::new();
    let keys = nacl.sign_keypair().unwrap();

    for len in [0, SIGN_OVERHEAD - 1] {
        let short = "a".repeat(len);
        let err = nacl.sign_open(&short, &keys.public_key).unwrap_err();
        assert_eq!(err.kind(), FailureKind::InputTooShort);
        let err = nacl.sign_peek(&short).unwrap_err();
        assert_eq!(err.kind(), FailureKind::InputTooShort);
    }
}

#[test]
fn gibberish_of_sufficient_length_fails_verification() {
    let mut nacl = Natrium::new();
    let keys = nacl.sign_keypair().unwrap();

    let gibberish = "I am not actually signed".repeat(4);
    assert!(gibberish.len() >= SIGN_OVERHEAD);
    let err = nacl.sign_open(&gibberish, &keys.public_key).unwrap_err();
    assert_eq!(err.kind(), FailureKind::VerificationFailed);
}

#[test]
fn utf8_round_trip_including_supplementary_plane() {
    let mut nacl = Natrium::new();
    let keys = nacl.sign_keypair().unwrap();

    for message in ["Hello World!", "héllo wörld", "snow: \u{2603}", "\u{1F980} crab"] {
        let signed = nacl.sign_utf8(message, &keys.secret_key).unwrap();
        assert_eq!(
            nacl.sign_open_utf8(&signed, &keys.public_key).unwrap(),
            message
        );
        assert_eq!(nacl.sign_peek_utf8(&signed).unwrap(), message);
    }
}

#[test]
fn distinct_keypairs_per_call() {
    let mut nacl = Natrium::new();
    let a = nacl.sign_keypair().unwrap();
    let b = nacl.sign_keypair().unwrap();
    assert_ne!(a.public_key, b.public_key);
    assert_ne!(a.secret_key, b.secret_key);
}
