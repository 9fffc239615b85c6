/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 *
 * (c) ZeroTier, Inc.
 * https://www.zerotier.com/
 */
use arrayvec::ArrayVec;
use zeroize::Zeroizing;

use super::{secure_eq, HashEngine, MAX_BLOCK_SIZE};
use crate::log_event::log;
#[cfg(feature = "logging")]
use crate::log_event::LogEvent;

const IPAD: u8 = 0x36;
const OPAD: u8 = 0x5c;

/// HMAC (RFC 2104) over any `HashEngine`.
///
/// The key is borrowed rather than copied so that `reset` can re-prime both engines
/// without the caller handing the key over again.
/// Does not need to be threadsafe.
pub struct Hmac<'k, H: HashEngine> {
    key: &'k [u8],
    inner: H,
    outer: H,
}

impl<'k, H: HashEngine> Hmac<'k, H> {
    /// Rejected at compile time for any engine whose pads would not fit the stack buffers.
    const PADS_FIT: () = assert!(H::BLOCK_SIZE <= MAX_BLOCK_SIZE && H::DIGEST_SIZE <= H::BLOCK_SIZE);

    /// Create an instance keyed with `key`, ready to receive message data.
    pub fn new(key: &'k [u8]) -> Self {
        let mut hmac = Self { key, inner: H::new(), outer: H::new() };
        hmac.prime();
        hmac
    }

    /// Replace the key and start a fresh message.
    pub fn rekey(&mut self, key: &'k [u8]) {
        self.key = key;
        self.prime();
    }

    /// Start a fresh message under the current key.
    pub fn reset(&mut self) {
        self.prime();
    }

    /// Feed message data into the inner hash.
    pub fn update(&mut self, data: &[u8]) {
        self.inner.update(data);
    }

    /// Finish the message and return the MAC.
    /// The MAC can also be read back afterwards through `digest`.
    pub fn finish(&mut self) -> H::Digest {
        let inner_hash = Zeroizing::new(self.inner.finish());
        self.outer.update((*inner_hash).as_ref());
        self.outer.finish()
    }

    /// The MAC produced by the last call to `finish`.
    pub fn digest(&self) -> &H::Digest {
        self.outer.digest()
    }

    /// Constant time comparison of the last MAC against `expected`.
    /// A length mismatch never compares equal.
    pub fn equal_digest(&self, expected: &[u8]) -> bool {
        secure_eq(self.digest(), expected)
    }

    /// The last MAC rendered as lowercase hexadecimal.
    pub fn hex_digest(&self) -> String {
        hex::encode(self.digest())
    }

    fn prime(&mut self) {
        let () = Self::PADS_FIT;

        let mut hashed_key = Zeroizing::new(H::Digest::default());
        let key: &[u8] = if self.key.len() > H::BLOCK_SIZE {
            log!(LogEvent::HmacKeyHashed(self.key.len(), H::BLOCK_SIZE));
            self.inner.reset();
            self.inner.update(self.key);
            *hashed_key = self.inner.finish();
            (*hashed_key).as_ref()
        } else {
            self.key
        };

        let mut key_ipad = Zeroizing::new(ArrayVec::<u8, MAX_BLOCK_SIZE>::new());
        let mut key_opad = Zeroizing::new(ArrayVec::<u8, MAX_BLOCK_SIZE>::new());
        for i in 0..H::BLOCK_SIZE {
            let k = key.get(i).copied().unwrap_or(0);
            key_ipad.push(k ^ IPAD);
            key_opad.push(k ^ OPAD);
        }

        self.inner.reset();
        self.inner.update(key_ipad.as_slice());
        self.outer.reset();
        self.outer.update(key_opad.as_slice());
    }
}

/// One-shot HMAC of `data` under `key`.
pub fn sign_hmac<H: HashEngine>(key: &[u8], data: &[u8]) -> H::Digest {
    let mut hmac = Hmac::<H>::new(key);
    hmac.update(data);
    hmac.finish()
}

/// One-shot HMAC of `data` under `key`, rendered as lowercase hexadecimal.
pub fn sign_hmac_hex<H: HashEngine>(key: &[u8], data: &[u8]) -> String {
    hex::encode(sign_hmac::<H>(key, data))
}
