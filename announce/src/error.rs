// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("malformed community {0}")]
    MalformedCommunity(String),

    #[error("too large: {0}")]
    TooLarge(String),

    #[error("snapshot: {0}")]
    Snapshot(String),

    #[error("submit {prefix}: {message}")]
    Submit { prefix: String, message: String },

    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}
