/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 *
 * (c) ZeroTier, Inc.
 * https://www.zerotier.com/
 */
use zeroize::Zeroize;

use super::HashEngine;

/// The size of a SHA-256 hash, which is always 32 bytes
pub const SHA256_HASH_SIZE: usize = 32;
/// The size of a SHA-256 block, which is always 64 bytes
pub const SHA256_BLOCK_SIZE: usize = 64;

const H0: [u32; 8] = [
    0x6a09e667, 0xbb67ae85, 0x3c6ef372, 0xa54ff53a, 0x510e527f, 0x9b05688c, 0x1f83d9ab, 0x5be0cd19,
];

#[rustfmt::skip]
static K: [u32; 64] = [
    0x428a2f98, 0x71374491, 0xb5c0fbcf, 0xe9b5dba5, 0x3956c25b, 0x59f111f1, 0x923f82a4, 0xab1c5ed5,
    0xd807aa98, 0x12835b01, 0x243185be, 0x550c7dc3, 0x72be5d74, 0x80deb1fe, 0x9bdc06a7, 0xc19bf174,
    0xe49b69c1, 0xefbe4786, 0x0fc19dc6, 0x240ca1cc, 0x2de92c6f, 0x4a7484aa, 0x5cb0a9dc, 0x76f988da,
    0x983e5152, 0xa831c66d, 0xb00327c8, 0xbf597fc7, 0xc6e00bf3, 0xd5a79147, 0x06ca6351, 0x14292967,
    0x27b70a85, 0x2e1b2138, 0x4d2c6dfc, 0x53380d13, 0x650a7354, 0x766a0abb, 0x81c2c92e, 0x92722c85,
    0xa2bfe8a1, 0xa81a664b, 0xc24b8b70, 0xc76c51a3, 0xd192e819, 0xd6990624, 0xf40e3585, 0x106aa070,
    0x19a4c116, 0x1e376c08, 0x2748774c, 0x34b0bcb5, 0x391c0cb3, 0x4ed8aa4a, 0x5b9cca4f, 0x682e6ff3,
    0x748f82ee, 0x78a5636f, 0x84c87814, 0x8cc70208, 0x90befffa, 0xa4506ceb, 0xbef9a3f7, 0xc67178f2,
];

#[inline(always)]
fn ch(x: u32, y: u32, z: u32) -> u32 {
    (x & (y ^ z)) ^ z
}

#[inline(always)]
fn maj(x: u32, y: u32, z: u32) -> u32 {
    (x & (y | z)) | (y & z)
}

#[inline(always)]
fn big_sigma0(x: u32) -> u32 {
    x.rotate_right(2) ^ x.rotate_right(13) ^ x.rotate_right(22)
}

#[inline(always)]
fn big_sigma1(x: u32) -> u32 {
    x.rotate_right(6) ^ x.rotate_right(11) ^ x.rotate_right(25)
}

#[inline(always)]
fn small_sigma0(x: u32) -> u32 {
    x.rotate_right(7) ^ x.rotate_right(18) ^ (x >> 3)
}

#[inline(always)]
fn small_sigma1(x: u32) -> u32 {
    x.rotate_right(17) ^ x.rotate_right(19) ^ (x >> 10)
}

fn compress(state: &mut [u32; 8], block: &[u8]) {
    debug_assert_eq!(block.len(), SHA256_BLOCK_SIZE);
    let mut w = [0u32; 64];
    for (i, word) in block.chunks_exact(4).enumerate() {
        w[i] = u32::from_be_bytes([word[0], word[1], word[2], word[3]]);
    }
    for i in 16..64 {
        w[i] = small_sigma1(w[i - 2])
            .wrapping_add(w[i - 7])
            .wrapping_add(small_sigma0(w[i - 15]))
            .wrapping_add(w[i - 16]);
    }

    // Instead of shuffling a..h every round the working variables stay in place
    // and the index of `a` walks backwards through the array.
    let mut s = *state;
    for i in 0..64 {
        let at = |n: usize| (64 + n - i) % 8;
        let e = s[at(4)];
        let t0 = s[at(7)]
            .wrapping_add(big_sigma1(e))
            .wrapping_add(ch(e, s[at(5)], s[at(6)]))
            .wrapping_add(K[i])
            .wrapping_add(w[i]);
        let a = s[at(0)];
        let t1 = big_sigma0(a).wrapping_add(maj(a, s[at(1)], s[at(2)]));
        s[at(3)] = s[at(3)].wrapping_add(t0);
        s[at(7)] = t0.wrapping_add(t1);
    }

    for (h, v) in state.iter_mut().zip(s.iter()) {
        *h = h.wrapping_add(*v);
    }

    w.zeroize();
    s.zeroize();
}

/// SHA-256 (FIPS 180-3) streaming engine.
#[derive(Clone)]
pub struct Sha256 {
    state: [u32; 8],
    buffer: [u8; SHA256_BLOCK_SIZE],
    cursor: usize,
    /// Message length in bits, modulo 2^64.
    bit_len: u64,
    digest: [u8; SHA256_HASH_SIZE],
    finished: bool,
}

impl Sha256 {
    pub const fn new() -> Self {
        Self {
            state: H0,
            buffer: [0u8; SHA256_BLOCK_SIZE],
            cursor: 0,
            bit_len: 0,
            digest: [0u8; SHA256_HASH_SIZE],
            finished: false,
        }
    }
}

impl Default for Sha256 {
    fn default() -> Self {
        Self::new()
    }
}

impl HashEngine for Sha256 {
    const DIGEST_SIZE: usize = SHA256_HASH_SIZE;
    const BLOCK_SIZE: usize = SHA256_BLOCK_SIZE;
    type Digest = [u8; SHA256_HASH_SIZE];

    fn new() -> Self {
        Sha256::new()
    }

    fn reset(&mut self) {
        self.state = H0;
        self.buffer.zeroize();
        self.cursor = 0;
        self.bit_len = 0;
        self.finished = false;
    }

    fn update(&mut self, mut data: &[u8]) {
        debug_assert!(!self.finished, "update called on a finished hash without reset");
        self.bit_len = self.bit_len.wrapping_add((data.len() as u64).wrapping_shl(3));

        // Top up a partially filled buffer first.
        if self.cursor > 0 {
            let n = (SHA256_BLOCK_SIZE - self.cursor).min(data.len());
            self.buffer[self.cursor..self.cursor + n].copy_from_slice(&data[..n]);
            self.cursor += n;
            data = &data[n..];
            if self.cursor < SHA256_BLOCK_SIZE {
                return;
            }
            compress(&mut self.state, &self.buffer);
            self.cursor = 0;
        }

        let mut blocks = data.chunks_exact(SHA256_BLOCK_SIZE);
        for block in &mut blocks {
            compress(&mut self.state, block);
        }

        let rest = blocks.remainder();
        self.buffer[..rest.len()].copy_from_slice(rest);
        self.cursor = rest.len();
    }

    fn finish(&mut self) -> [u8; SHA256_HASH_SIZE] {
        let bit_len = self.bit_len;

        self.buffer[self.cursor] = 0x80;
        self.cursor += 1;
        if self.cursor > SHA256_BLOCK_SIZE - 8 {
            self.buffer[self.cursor..].fill(0);
            compress(&mut self.state, &self.buffer);
            self.cursor = 0;
        }
        self.buffer[self.cursor..SHA256_BLOCK_SIZE - 8].fill(0);
        self.buffer[SHA256_BLOCK_SIZE - 8..].copy_from_slice(&bit_len.to_be_bytes());
        compress(&mut self.state, &self.buffer);
        self.cursor = 0;

        for (out, word) in self.digest.chunks_exact_mut(4).zip(self.state.iter()) {
            out.copy_from_slice(&word.to_be_bytes());
        }
        self.buffer.zeroize();
        self.finished = true;
        self.digest
    }

    fn digest(&self) -> &[u8; SHA256_HASH_SIZE] {
        &self.digest
    }
}

impl Drop for Sha256 {
    fn drop(&mut self) {
        self.state.zeroize();
        self.buffer.zeroize();
        self.digest.zeroize();
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn known_answers() {
        assert_eq!(
            hex::encode(Sha256::hash(b"")),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
        assert_eq!(
            hex::encode(Sha256::hash(b"abc")),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
        assert_eq!(
            hex::encode(Sha256::hash(b"abcdbcdecdefdefgefghfghighijhijkijkljklmklmnlmnomnopnopq")),
            "248d6a61d20638b8e5c026930c3e6039a33ce45964ff2167f6ecedd419db06c1"
        );
    }

    #[test]
    fn million_a() {
        let mut h = Sha256::new();
        let chunk = [b'a'; 1000];
        for _ in 0..1000 {
            h.update(&chunk);
        }
        assert_eq!(
            hex::encode(h.finish()),
            "cdc76e5c9914fb9281a1c7e284d73e67f1809a48a497200e046d39ccc7112cd0"
        );
    }

    #[test]
    fn byte_at_a_time() {
        let data: Vec<u8> = (0..300u32).map(|i| (i * 7) as u8).collect();
        let mut h = Sha256::new();
        for b in data.iter() {
            h.update(std::slice::from_ref(b));
        }
        assert_eq!(h.finish(), Sha256::hash(&data));
    }

    #[test]
    fn empty_updates_are_noops() {
        let mut h = Sha256::new();
        h.update(&[]);
        h.update(b"ab");
        h.update(&[]);
        h.update(b"c");
        assert_eq!(h.finish(), Sha256::hash(b"abc"));
    }
}
