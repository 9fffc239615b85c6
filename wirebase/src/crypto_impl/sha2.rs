/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 *
 * (c) ZeroTier, Inc.
 * https://www.zerotier.com/
 */
use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};
use zeroize::Zeroize;

use crate::crypto::*;

/// The version and type of the sha2 crate that the `HashEngine` trait is implemented for.
pub type Sha256Crate = Sha256;

/// SHA-256 from the RustCrypto `sha2` crate, exposed as a `HashEngine`.
/// Interchangeable with the native `crypto::Sha256`.
#[derive(Clone)]
pub struct CrateSha256 {
    inner: Sha256Crate,
    digest: [u8; SHA256_HASH_SIZE],
}

impl HashEngine for CrateSha256 {
    const DIGEST_SIZE: usize = SHA256_HASH_SIZE;
    const BLOCK_SIZE: usize = SHA256_BLOCK_SIZE;
    type Digest = [u8; SHA256_HASH_SIZE];

    fn new() -> Self {
        Self { inner: Digest::new(), digest: [0u8; SHA256_HASH_SIZE] }
    }

    fn reset(&mut self) {
        Digest::reset(&mut self.inner);
    }

    fn update(&mut self, data: &[u8]) {
        Digest::update(&mut self.inner, data);
    }

    fn finish(&mut self) -> [u8; SHA256_HASH_SIZE] {
        self.digest = self.inner.finalize_reset().into();
        self.digest
    }

    fn digest(&self) -> &[u8; SHA256_HASH_SIZE] {
        &self.digest
    }
}

impl Drop for CrateSha256 {
    fn drop(&mut self) {
        self.digest.zeroize();
    }
}

/// HMAC-SHA-256 computed entirely by the RustCrypto `hmac` and `sha2` crates.
pub fn crate_hmac_sha256(key: &[u8], data: &[u8]) -> [u8; SHA256_HASH_SIZE] {
    let mut hm = <Hmac<Sha256Crate> as Mac>::new_from_slice(key).unwrap();
    hm.update(data);
    hm.finalize().into_bytes().into()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn native_and_crate_agree() {
        let data: Vec<u8> = (0..1000u32).map(|i| (i ^ (i >> 3)) as u8).collect();
        for len in [0usize, 1, 55, 56, 64, 65, 127, 128, 999] {
            assert_eq!(CrateSha256::hash(&data[..len]), crate::crypto::Sha256::hash(&data[..len]));
            let key = &data[len / 2..len];
            assert_eq!(crate_hmac_sha256(key, &data[..len]), sign_hmac::<crate::crypto::Sha256>(key, &data[..len]));
            assert_eq!(sign_hmac::<CrateSha256>(key, &data[..len]), crate_hmac_sha256(key, &data[..len]));
        }
    }

    #[test]
    fn dropping_a_clone_keeps_the_digest() {
        let mut h = CrateSha256::new();
        h.update(b"abc");
        let expected = h.finish();
        drop(h.clone());
        assert_eq!(h.digest(), &expected);
        assert_eq!(h.hex_digest(), "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad");
    }
}
