/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 *
 * (c) ZeroTier, Inc.
 * https://www.zerotier.com/
 */
use std::fmt;

/// A cursor read, write or skip asked for more bytes than are left in the buffer.
///
/// The cursor that produced this error has not moved and, for writers, the
/// underlying buffer has not been touched.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub struct OutOfBounds {
    /// Number of bytes the failed operation needed.
    pub requested: usize,
    /// Number of bytes that were left between the cursor and the end of the buffer.
    pub remaining: usize,
}

impl fmt::Display for OutOfBounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "requested {} bytes but only {} remain", self.requested, self.remaining)
    }
}

impl std::error::Error for OutOfBounds {}

/// Base64 text that could not be decoded.
///
/// Decoding is all or nothing, so no output is ever produced alongside one of these.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Base64Error {
    /// Encoded text must be made of whole 4 character quanta.
    InvalidLength { len: usize },

    /// A byte that is neither in the alphabet nor the `=` pad character.
    InvalidCharacter { position: usize, byte: u8 },

    /// A `=` was found somewhere other than the last one or two positions of the input.
    MisplacedPadding { position: usize },
}

impl fmt::Display for Base64Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidLength { len } => write!(f, "base64 length {} is not a multiple of 4", len),
            Self::InvalidCharacter { position, byte } => {
                write!(f, "invalid base64 character 0x{:02x} at offset {}", byte, position)
            }
            Self::MisplacedPadding { position } => write!(f, "base64 padding at offset {} is not trailing", position),
        }
    }
}

impl std::error::Error for Base64Error {}
