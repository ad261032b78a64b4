//! SHA-512 hashing engine.

use sha2::{Digest, Sha512};

use super::{HashEngine, HASH_LEN};

pub struct Sha512Hash;

impl HashEngine for Sha512Hash {
    fn hash(&self, digest: &mut [u8], message: &[u8]) -> usize {
        digest[..HASH_LEN].copy_from_slice(&Sha512::digest(message));
        HASH_LEN
    }
}
