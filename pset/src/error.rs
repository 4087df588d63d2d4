// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum Error {
    #[error("malformed prefix {0}")]
    MalformedPrefix(String),

    #[error("prefix length {0} out of range")]
    PrefixLength(u8),

    #[error("malformed address {0}")]
    MalformedAddress(String),

    #[error("allow entry {0} is not a host address")]
    NotHostAddress(String),
}
