//! Binary-safety and text-marshalling properties of the full surface:
//! payloads with embedded zero bytes must survive every primitive
//! byte-for-byte, and the UTF-8 variants must agree with the binary ones
//! on their shared subset.

use natrium::{FailureKind, Natrium, HASH_LEN, SIGN_OVERHEAD};

/// 54 bytes interleaving zero bytes with a strictly increasing pattern.
fn zero_laced_payload() -> String {
    (0u8..54)
        .map(|i| if i % 3 == 0 { 0 } else { i })
        .map(char::from)
        .collect()
}

#[test]
fn payload_has_embedded_zeros() {
    let payload = zero_laced_payload();
    assert_eq!(payload.encode_utf16().count(), 54);
    assert!(payload.chars().any(|c| c == '\u{0}'));
    assert!(payload.chars().any(|c| c != '\u{0}'));
}

#[test]
fn binary_payload_survives_signing() {
    let mut nacl = Natrium::new();
    let keys = nacl.sign_keypair().unwrap();
    let payload = zero_laced_payload();

    let signed = nacl.sign(&payload, &keys.secret_key).unwrap();
    assert_eq!(signed.encode_utf16().count(), 54 + SIGN_OVERHEAD);
    assert_eq!(nacl.sign_open(&signed, &keys.public_key).unwrap(), payload);
    assert_eq!(nacl.sign_peek(&signed).unwrap(), payload);
}

#[test]
fn binary_payload_survives_box() {
    let mut nacl = Natrium::new();
    let sender = nacl.box_keypair().unwrap();
    let recipient = nacl.box_keypair().unwrap();
    let nonce = nacl.box_random_nonce();
    let payload = zero_laced_payload();

    let boxed = nacl
        .box_seal(&payload, &nonce, &recipient.public_key, &sender.secret_key)
        .unwrap();
    assert_eq!(
        nacl.box_open(&boxed, &nonce, &sender.public_key, &recipient.secret_key)
            .unwrap(),
        payload
    );
}

#[test]
fn binary_payload_survives_secretbox_and_auth() {
    let mut nacl = Natrium::new();
    let key = nacl.secretbox_random_key();
    let nonce = nacl.secretbox_random_nonce();
    let payload = zero_laced_payload();

    let sealed = nacl.secretbox_seal(&payload, &nonce, &key).unwrap();
    assert_eq!(nacl.secretbox_open(&sealed, &nonce, &key).unwrap(), payload);

    let auth_key = nacl.auth_random_key();
    let authenticator = nacl.auth(&payload, &auth_key).unwrap();
    assert!(nacl.auth_verify(&authenticator, &payload, &auth_key).is_ok());
}

#[test]
fn all_byte_values_round_trip_through_secretbox() {
    let mut nacl = Natrium::new();
    let key = nacl.secretbox_random_key();
    let nonce = nacl.secretbox_random_nonce();

    let payload: String = (0u8..=255).map(char::from).collect();
    let sealed = nacl.secretbox_seal(&payload, &nonce, &key).unwrap();
    assert_eq!(nacl.secretbox_open(&sealed, &nonce, &key).unwrap(), payload);
}

#[test]
fn utf8_and_binary_variants_agree_on_ascii() {
    let mut nacl = Natrium::new();
    let keys = nacl.sign_keypair().unwrap();

    // ASCII marshals identically in both representations.
    let binary = nacl.sign("Hello World!", &keys.secret_key).unwrap();
    let utf8 = nacl.sign_utf8("Hello World!", &keys.secret_key).unwrap();
    assert_eq!(binary, utf8);

    assert_eq!(nacl.hash("abc"), nacl.hash_utf8("abc"));
}

#[test]
fn utf8_and_binary_variants_differ_beyond_ascii() {
    let nacl = Natrium::new();
    // U+00E9 is one byte in binary marshalling, two bytes in UTF-8.
    assert_ne!(nacl.hash("é"), nacl.hash_utf8("é"));
}

#[test]
fn undecodable_payload_is_an_encoding_error_on_utf8_open() {
    let mut nacl = Natrium::new();
    // 0xF0 is a 4-byte UTF-8 lead, outside the 1/2/3-byte format; a lone
    // 0xC3 ends mid-sequence. Both verify fine and then fail decoding.
    for payload in ["\u{f0}rest", "tail\u{c3}"] {
        let keys = nacl.sign_keypair().unwrap();
        let signed = nacl.sign(payload, &keys.secret_key).unwrap();
        let err = nacl.sign_open_utf8(&signed, &keys.public_key).unwrap_err();
        assert_eq!(err.kind(), FailureKind::Encoding);
        let err = nacl.sign_peek_utf8(&signed).unwrap_err();
        assert_eq!(err.kind(), FailureKind::Encoding);

        let key = nacl.secretbox_random_key();
        let nonce = nacl.secretbox_random_nonce();
        let sealed = nacl.secretbox_seal(payload, &nonce, &key).unwrap();
        let err = nacl.secretbox_open_utf8(&sealed, &nonce, &key).unwrap_err();
        assert_eq!(err.kind(), FailureKind::Encoding);
    }

    let sender = nacl.box_keypair().unwrap();
    let recipient = nacl.box_keypair().unwrap();
    let nonce = nacl.box_random_nonce();
    let boxed = nacl
        .box_seal("\u{f0}", &nonce, &recipient.public_key, &sender.secret_key)
        .unwrap();
    let err = nacl
        .box_open_utf8(&boxed, &nonce, &sender.public_key, &recipient.secret_key)
        .unwrap_err();
    assert_eq!(err.kind(), FailureKind::Encoding);
}

#[test]
fn hash_is_deterministic_and_fixed_length() {
    let nacl = Natrium::new();
    let digest = nacl.hash_utf8("Hello World!");
    assert_eq!(digest.encode_utf16().count(), HASH_LEN);
    assert_eq!(digest, nacl.hash_utf8("Hello World!"));
    assert_ne!(digest, nacl.hash_utf8("Hello World?"));
}

#[test]
fn keys_round_trip_as_binary_text() {
    // Keys returned by keypair generation must be directly usable as
    // parameters, whatever byte values they contain.
    let mut nacl = Natrium::new();
    for _ in 0..8 {
        let keys = nacl.sign_keypair().unwrap();
        let signed = nacl.sign("probe", &keys.secret_key).unwrap();
        assert_eq!(nacl.sign_open(&signed, &keys.public_key).unwrap(), "probe");
    }
}
