//! Scratch-buffer arena for marshalled call data.
//!
//! Every operation encodes its inputs and receives its outputs through
//! temporary byte regions scoped to that one call. Regions are checked out
//! of a pool, used exclusively by the requesting call, and handed back when
//! they drop at the end of the call. Buffers are wiped before reuse because
//! key material passes through them.
//!
//! The arena is single-threaded cooperative: it is `!Sync` and must not be
//! shared between two in-flight top-level calls.

use std::cell::RefCell;
use std::ops::{Deref, DerefMut};

use zeroize::Zeroize;

/// Pool of reusable scratch buffers.
#[derive(Default)]
pub struct ScratchArena {
    pool: RefCell<Vec<Vec<u8>>>,
}

impl ScratchArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check out a zero-filled region of exactly `len` bytes.
    ///
    /// The region is exclusively owned by the caller and returns to the
    /// pool when dropped. Callers must not assume any relationship between
    /// regions from separate `alloc` calls.
    pub fn alloc(&self, len: usize) -> Region<'_> {
        let mut buf = self.pool.borrow_mut().pop().unwrap_or_default();
        buf.clear();
        buf.resize(len, 0);
        Region { arena: self, buf }
    }

    fn release(&self, mut buf: Vec<u8>) {
        buf.zeroize();
        self.pool.borrow_mut().push(buf);
    }

    #[cfg(test)]
    fn pooled(&self) -> usize {
        self.pool.borrow().len()
    }
}

/// An owned, fixed-size scratch region drawn from a [`ScratchArena`].
pub struct Region<'a> {
    arena: &'a ScratchArena,
    buf: Vec<u8>,
}

impl Deref for Region<'_> {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.buf
    }
}

impl DerefMut for Region<'_> {
    fn deref_mut(&mut self) -> &mut [u8] {
        &mut self.buf
    }
}

impl Drop for Region<'_> {
    fn drop(&mut self) {
        self.arena.release(std::mem::take(&mut self.buf));
    }
}
