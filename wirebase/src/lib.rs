/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 *
 * (c) ZeroTier, Inc.
 * https://www.zerotier.com/
 */
//! Binary data primitives for protocol code: streaming SHA-1 and SHA-256, HMAC over any
//! hash engine, bounds checked big endian cursors and a base64 codec.
//!
//! None of the types here are threadsafe, and none need to be. Distinct instances share
//! no state and may be used from different threads freely.
pub mod base64;
pub mod big_endian;
pub mod crypto;
pub mod crypto_impl;

mod log_event;
pub mod result;

pub use crate::big_endian::{BigEndianReader, BigEndianWriter};
pub use crate::crypto::{HashEngine, Hmac, Sha1, Sha256};
pub use crate::log_event::LogEvent;
pub use crate::result::{Base64Error, OutOfBounds};
