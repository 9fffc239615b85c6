/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 *
 * (c) ZeroTier, Inc.
 * https://www.zerotier.com/
 */
#[cfg(feature = "md5")]
mod md5;
#[cfg(feature = "md5")]
pub use self::md5::*;

#[cfg(feature = "sha2")]
mod sha2;
#[cfg(feature = "sha2")]
pub use self::sha2::*;
#[cfg(feature = "sha2")]
pub use ::hmac;
#[cfg(feature = "sha2")]
pub use ::sha2 as sha2_crate;
