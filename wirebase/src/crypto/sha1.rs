/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 *
 * (c) ZeroTier, Inc.
 * https://www.zerotier.com/
 */
use zeroize::Zeroize;

use super::HashEngine;

/// The size of a SHA-1 hash, which is always 20 bytes
pub const SHA1_HASH_SIZE: usize = 20;
/// The size of a SHA-1 block, which is always 64 bytes
pub const SHA1_BLOCK_SIZE: usize = 64;

const H0: [u32; 5] = [0x67452301, 0xefcdab89, 0x98badcfe, 0x10325476, 0xc3d2e1f0];

/// Round function and round constant for round `t`, per FIPS 180-3 section 4.1.1 and 4.2.1.
#[inline(always)]
fn f_k(t: usize, b: u32, c: u32, d: u32) -> (u32, u32) {
    if t < 20 {
        ((b & c) | (!b & d), 0x5a827999)
    } else if t < 40 {
        (b ^ c ^ d, 0x6ed9eba1)
    } else if t < 60 {
        ((b & c) | (b & d) | (c & d), 0x8f1bbcdc)
    } else {
        (b ^ c ^ d, 0xca62c1d6)
    }
}

fn compress(h: &mut [u32; 5], block: &[u8; SHA1_BLOCK_SIZE]) {
    let mut w = [0u32; 80];
    for (t, word) in block.chunks_exact(4).enumerate() {
        w[t] = u32::from_be_bytes([word[0], word[1], word[2], word[3]]);
    }
    for t in 16..80 {
        w[t] = (w[t - 3] ^ w[t - 8] ^ w[t - 14] ^ w[t - 16]).rotate_left(1);
    }

    let [mut a, mut b, mut c, mut d, mut e] = *h;
    for (t, wt) in w.iter().enumerate() {
        let (f, k) = f_k(t, b, c, d);
        let temp = a.rotate_left(5).wrapping_add(f).wrapping_add(e).wrapping_add(*wt).wrapping_add(k);
        e = d;
        d = c;
        c = b.rotate_left(30);
        b = a;
        a = temp;
    }

    h[0] = h[0].wrapping_add(a);
    h[1] = h[1].wrapping_add(b);
    h[2] = h[2].wrapping_add(c);
    h[3] = h[3].wrapping_add(d);
    h[4] = h[4].wrapping_add(e);

    w.zeroize();
}

/// SHA-1 (FIPS 180-3) streaming engine.
///
/// SHA-1 is only provided for interoperability with protocols that still mandate it,
/// mostly through `Hmac<Sha1>`. It should not be chosen for anything new.
#[derive(Clone)]
pub struct Sha1 {
    h: [u32; 5],
    buffer: [u8; SHA1_BLOCK_SIZE],
    cursor: usize,
    /// Total number of message bytes seen, the bit length is derived from this at padding time.
    len: u64,
    digest: [u8; SHA1_HASH_SIZE],
    finished: bool,
}

impl Sha1 {
    pub const fn new() -> Self {
        Self {
            h: H0,
            buffer: [0u8; SHA1_BLOCK_SIZE],
            cursor: 0,
            len: 0,
            digest: [0u8; SHA1_HASH_SIZE],
            finished: false,
        }
    }

    fn process_buffer(&mut self) {
        compress(&mut self.h, &self.buffer);
        self.cursor = 0;
    }
}

impl Default for Sha1 {
    fn default() -> Self {
        Self::new()
    }
}

impl HashEngine for Sha1 {
    const DIGEST_SIZE: usize = SHA1_HASH_SIZE;
    const BLOCK_SIZE: usize = SHA1_BLOCK_SIZE;
    type Digest = [u8; SHA1_HASH_SIZE];

    fn new() -> Self {
        Sha1::new()
    }

    fn reset(&mut self) {
        self.h = H0;
        self.buffer.zeroize();
        self.cursor = 0;
        self.len = 0;
        self.finished = false;
    }

    fn update(&mut self, mut data: &[u8]) {
        debug_assert!(!self.finished, "update called on a finished hash without reset");
        self.len = self.len.wrapping_add(data.len() as u64);

        while !data.is_empty() {
            let n = (SHA1_BLOCK_SIZE - self.cursor).min(data.len());
            self.buffer[self.cursor..self.cursor + n].copy_from_slice(&data[..n]);
            self.cursor += n;
            data = &data[n..];
            if self.cursor == SHA1_BLOCK_SIZE {
                self.process_buffer();
            }
        }
    }

    fn finish(&mut self) -> [u8; SHA1_HASH_SIZE] {
        let bit_len = self.len.wrapping_mul(8);

        self.buffer[self.cursor] = 0x80;
        self.cursor += 1;
        if self.cursor > SHA1_BLOCK_SIZE - 8 {
            self.buffer[self.cursor..].fill(0);
            self.process_buffer();
        }
        self.buffer[self.cursor..SHA1_BLOCK_SIZE - 8].fill(0);
        self.buffer[SHA1_BLOCK_SIZE - 8..].copy_from_slice(&bit_len.to_be_bytes());
        self.process_buffer();

        for (out, word) in self.digest.chunks_exact_mut(4).zip(self.h.iter()) {
            out.copy_from_slice(&word.to_be_bytes());
        }
        self.buffer.zeroize();
        self.finished = true;
        self.digest
    }

    fn digest(&self) -> &[u8; SHA1_HASH_SIZE] {
        &self.digest
    }
}

impl Drop for Sha1 {
    fn drop(&mut self) {
        self.h.zeroize();
        self.buffer.zeroize();
        self.digest.zeroize();
    }
}
