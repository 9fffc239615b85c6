/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 *
 * (c) ZeroTier, Inc.
 * https://www.zerotier.com/
 */
use crate::result::{Base64Error, OutOfBounds};

/// Events that might be interesting to log while debugging a caller of this crate.
/// These must never be used to make decisions; every one of them is also reported
/// to the immediate caller through a return value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogEvent<'a> {
    /// An HMAC key longer than the engine block size was hashed down to a digest.
    /// `(key_len, block_size)`
    HmacKeyHashed(usize, usize),
    /// Base64 text was refused by the decoder.
    Base64Rejected(&'a Base64Error),
    ReadOutOfBounds(&'a OutOfBounds),
    WriteOutOfBounds(&'a OutOfBounds),
}

#[cfg(feature = "logging")]
impl<'a> LogEvent<'a> {
    pub(crate) fn emit(self) {
        ::log::trace!(target: "wirebase", "{:?}", self);
    }
}

/// Macro to turn off logging at compile time.
macro_rules! log {
    ($event:expr) => {
        #[cfg(feature = "logging")]
        $event.emit();
    };
}
pub(crate) use log;
