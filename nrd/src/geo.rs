// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::error::Error;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Supplies the IPv4 networks registered to one country. Implementations
/// make no ordering promise; the output is treated purely as an unordered
/// list of prefix strings.
pub trait GeoSource {
    fn country_prefixes(&self, iso: &str) -> Result<Vec<String>, Error>;
}

/// A [`GeoSource`] over a JSON map of upper-case ISO codes to prefix
/// lists, e.g. `{"NZ": ["202.2.96.0/24"]}`. The whole map is read at
/// startup; failure to open or parse the file is fatal for the run.
pub struct FileGeoSource {
    map: BTreeMap<String, Vec<String>>,
}

impl FileGeoSource {
    pub fn open(path: &Path) -> Result<Self, Error> {
        let f = File::open(path)?;
        let map = serde_json::from_reader(BufReader::new(f))?;
        Ok(Self { map })
    }
}

impl GeoSource for FileGeoSource {
    fn country_prefixes(&self, iso: &str) -> Result<Vec<String>, Error> {
        self.map
            .get(iso)
            .cloned()
            .ok_or_else(|| Error::UnknownCountry(iso.into()))
    }
}
