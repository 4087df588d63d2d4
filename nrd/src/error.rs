// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    #[error("geo source format: {0}")]
    GeoFormat(#[from] serde_json::Error),

    #[error("country {0} not present in geo source")]
    UnknownCountry(String),

    #[error("speaker: {0}")]
    Speaker(String),
}
