/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 *
 * (c) ZeroTier, Inc.
 * https://www.zerotier.com/
 */
use md5::{Digest, Md5};
use zeroize::Zeroize;

use crate::crypto::HashEngine;

/// The size of an MD5 hash, which is always 16 bytes
pub const MD5_HASH_SIZE: usize = 16;
/// The size of an MD5 block, which is always 64 bytes
pub const MD5_BLOCK_SIZE: usize = 64;

/// MD5 from the RustCrypto `md-5` crate, exposed as a `HashEngine` so it can be keyed
/// through `Hmac<CrateMd5>`. Only for legacy interoperability.
#[derive(Clone)]
pub struct CrateMd5 {
    inner: Md5,
    digest: [u8; MD5_HASH_SIZE],
}

impl HashEngine for CrateMd5 {
    const DIGEST_SIZE: usize = MD5_HASH_SIZE;
    const BLOCK_SIZE: usize = MD5_BLOCK_SIZE;
    type Digest = [u8; MD5_HASH_SIZE];

    fn new() -> Self {
        Self { inner: Digest::new(), digest: [0u8; MD5_HASH_SIZE] }
    }

    fn reset(&mut self) {
        Digest::reset(&mut self.inner);
    }

    fn update(&mut self, data: &[u8]) {
        Digest::update(&mut self.inner, data);
    }

    fn finish(&mut self) -> [u8; MD5_HASH_SIZE] {
        self.digest = self.inner.finalize_reset().into();
        self.digest
    }

    fn digest(&self) -> &[u8; MD5_HASH_SIZE] {
        &self.digest
    }
}

impl Drop for CrateMd5 {
    fn drop(&mut self) {
        self.digest.zeroize();
    }
}
