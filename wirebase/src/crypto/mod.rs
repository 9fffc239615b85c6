/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 *
 * (c) ZeroTier, Inc.
 * https://www.zerotier.com/
 */
mod hmac;
mod sha1;
mod sha256;

pub use hmac::*;
pub use sha1::*;
pub use sha256::*;

/// Largest block size of any engine that may be plugged into `Hmac`.
/// Every engine supported here (SHA-1, SHA-256, MD5) compresses 64 byte blocks.
pub const MAX_BLOCK_SIZE: usize = 64;

/// A streaming hash function with a fixed digest and block size.
/// Its interface was designed so that any engine can be keyed through `Hmac`.
/// Does not need to be threadsafe.
pub trait HashEngine: Sized {
    /// Size of the digest in bytes.
    const DIGEST_SIZE: usize;
    /// Number of bytes consumed by one invocation of the compression function.
    /// Must be no larger than `MAX_BLOCK_SIZE`.
    const BLOCK_SIZE: usize;

    /// The digest, always exactly `DIGEST_SIZE` bytes.
    type Digest: AsRef<[u8]> + AsMut<[u8]> + Copy + Default + Eq + std::fmt::Debug + zeroize::Zeroize;

    /// Create a new instance, already initialized for a fresh input.
    fn new() -> Self;

    /// Reinitialize the internal state of the hash function for a fresh input.
    fn reset(&mut self);

    /// Update the instance with input `data`.
    /// This must update the state as if `data` was appended to the previous input.
    ///
    /// Calling this after `finish` without an intervening `reset` is a caller error.
    fn update(&mut self, data: &[u8]);

    /// Pad the input, process the final block(s) and return the digest.
    /// The digest is also kept so that it can be read back through `digest`.
    ///
    /// After this function is called the instance must be dropped or `reset`.
    fn finish(&mut self) -> Self::Digest;

    /// The digest produced by the last call to `finish`.
    /// Before that it holds no meaningful value.
    fn digest(&self) -> &Self::Digest;

    /// One-shot hash of `data`.
    fn hash(data: &[u8]) -> Self::Digest {
        let mut h = Self::new();
        h.update(data);
        h.finish()
    }

    /// The last digest rendered as lowercase hexadecimal.
    fn hex_digest(&self) -> String {
        hex::encode(self.digest())
    }

    /// One-shot hash of `data` rendered as lowercase hexadecimal.
    fn hash_hex(data: &[u8]) -> String {
        hex::encode(Self::hash(data))
    }
}

/// Constant time byte slice equality.
pub fn secure_eq<A: AsRef<[u8]> + ?Sized, B: AsRef<[u8]> + ?Sized>(a: &A, b: &B) -> bool {
    let (a, b) = (a.as_ref(), b.as_ref());
    if a.len() == b.len() {
        let mut x = 0u8;
        for (aa, bb) in a.iter().zip(b.iter()) {
            x |= *aa ^ *bb;
        }
        x == 0
    } else {
        false
    }
}
