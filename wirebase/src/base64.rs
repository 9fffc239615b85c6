/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 *
 * (c) ZeroTier, Inc.
 * https://www.zerotier.com/
 */
//! Standard (RFC 4648) base64 with `+`, `/` and mandatory `=` padding.

use crate::log_event::log;
#[cfg(feature = "logging")]
use crate::log_event::LogEvent;
use crate::result::Base64Error;

const PAD: u8 = b'=';
const ALPHABET: &[u8; 64] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";

/// Length of the text produced by encoding `len` bytes.
pub const fn encoded_len(len: usize) -> usize {
    (len + 2) / 3 * 4
}

/// Encode `input` as padded base64.
pub fn encode(input: &[u8]) -> String {
    let mut out = String::new();
    encode_into(input, &mut out);
    out
}

/// Encode `input` as padded base64, replacing the contents of `output`.
pub fn encode_into(input: &[u8], output: &mut String) {
    let mut temp = Vec::with_capacity(encoded_len(input.len()));
    for group in input.chunks(3) {
        let b0 = group[0];
        let b1 = group.get(1).copied().unwrap_or(0);
        let b2 = group.get(2).copied().unwrap_or(0);

        temp.push(ALPHABET[(b0 >> 2) as usize]);
        temp.push(ALPHABET[(((b0 << 4) | (b1 >> 4)) & 0x3f) as usize]);
        temp.push(if group.len() > 1 { ALPHABET[(((b1 << 2) | (b2 >> 6)) & 0x3f) as usize] } else { PAD });
        temp.push(if group.len() > 2 { ALPHABET[(b2 & 0x3f) as usize] } else { PAD });
    }
    output.clear();
    // Every byte pushed above comes from the ASCII alphabet.
    output.extend(temp.iter().map(|b| *b as char));
}

#[inline]
fn decode_symbol(c: u8) -> Option<u32> {
    match c {
        b'A'..=b'Z' => Some((c - b'A') as u32),
        b'a'..=b'z' => Some((c - b'a') as u32 + 26),
        b'0'..=b'9' => Some((c - b'0') as u32 + 52),
        b'+' => Some(62),
        b'/' => Some(63),
        _ => None,
    }
}

/// Decode padded base64 text.
pub fn decode<T: AsRef<[u8]> + ?Sized>(input: &T) -> Result<Vec<u8>, Base64Error> {
    let mut out = Vec::new();
    decode_into(input, &mut out)?;
    Ok(out)
}

/// Decode padded base64 text, replacing the contents of `output`.
/// On failure `output` is left exactly as it was.
pub fn decode_into<T: AsRef<[u8]> + ?Sized>(input: &T, output: &mut Vec<u8>) -> Result<(), Base64Error> {
    match decode_inner(input.as_ref()) {
        Ok(temp) => {
            *output = temp;
            Ok(())
        }
        Err(err) => {
            log!(LogEvent::Base64Rejected(&err));
            Err(err)
        }
    }
}

fn decode_inner(s: &[u8]) -> Result<Vec<u8>, Base64Error> {
    let n = s.len();
    if n % 4 != 0 {
        return Err(Base64Error::InvalidLength { len: n });
    }
    let padding = s.iter().rev().take(2).take_while(|c| **c == PAD).count();
    let out_len = (n / 4) * 3 - padding;

    let mut out = Vec::with_capacity(out_len);
    let mut accum = 0u32;
    for (i, c) in s.iter().enumerate() {
        let value = if *c == PAD {
            if i < n - padding {
                return Err(Base64Error::MisplacedPadding { position: i });
            }
            0
        } else {
            decode_symbol(*c).ok_or(Base64Error::InvalidCharacter { position: i, byte: *c })?
        };
        accum = (accum << 6) | value;
        if (i + 1) % 4 == 0 {
            for shift in [16u32, 8, 0] {
                if out.len() < out_len {
                    out.push((accum >> shift) as u8);
                }
            }
            accum = 0;
        }
    }
    Ok(out)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn rfc4648_vectors() {
        let vectors: [(&str, &str); 7] = [
            ("", ""),
            ("f", "Zg=="),
            ("fo", "Zm8="),
            ("foo", "Zm9v"),
            ("foob", "Zm9vYg=="),
            ("fooba", "Zm9vYmE="),
            ("foobar", "Zm9vYmFy"),
        ];
        for (plain, coded) in vectors {
            assert_eq!(encode(plain.as_bytes()), coded);
            assert_eq!(decode(coded).unwrap(), plain.as_bytes());
        }
    }

    #[test]
    fn full_alphabet() {
        let all: Vec<u8> = (0..=255u8).collect();
        let coded = encode(&all);
        assert_eq!(coded.len(), encoded_len(all.len()));
        assert!(coded.starts_with("AAECAwQFBgcICQoLDA0ODxAREhMUFRYXGBkaGxwdHh8gISIjJCUmJygpKissLS4vMDEy"));
        assert!(coded.ends_with("+/w=="));
        assert_eq!(decode(&coded).unwrap(), all);
        assert_eq!(decode("++//").unwrap(), [0xfb, 0xef, 0xff]);
    }

    #[test]
    fn rejects_bad_length() {
        assert_eq!(decode("Zg="), Err(Base64Error::InvalidLength { len: 3 }));
        assert_eq!(decode("Zm9vY"), Err(Base64Error::InvalidLength { len: 5 }));
    }

    #[test]
    fn rejects_misplaced_padding() {
        assert_eq!(decode("Z=g="), Err(Base64Error::MisplacedPadding { position: 1 }));
        assert_eq!(decode("Zg==Zm8="), Err(Base64Error::MisplacedPadding { position: 2 }));
        assert_eq!(decode("Z==="), Err(Base64Error::MisplacedPadding { position: 1 }));
        assert_eq!(decode("===="), Err(Base64Error::MisplacedPadding { position: 0 }));
    }

    #[test]
    fn rejects_foreign_characters() {
        assert_eq!(decode("Zm9v-A=="), Err(Base64Error::InvalidCharacter { position: 4, byte: b'-' }));
        assert_eq!(decode("Zm 9"), Err(Base64Error::InvalidCharacter { position: 2, byte: b' ' }));
        assert_eq!(decode(&[0x5a, 0x6d, 0x39, 0xff][..]), Err(Base64Error::InvalidCharacter { position: 3, byte: 0xff }));
    }

    #[test]
    fn failed_decode_keeps_output() {
        let mut out = b"previous".to_vec();
        assert!(decode_into("Zm9v!", &mut out).is_err());
        assert!(decode_into("Zm9v!A==", &mut out).is_err());
        assert_eq!(out, b"previous");
        decode_into("Zm9v", &mut out).unwrap();
        assert_eq!(out, b"foo");

        let mut text = String::from("stale");
        encode_into(b"fo", &mut text);
        assert_eq!(text, "Zm8=");
    }
}
