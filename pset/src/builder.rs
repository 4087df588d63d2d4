// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::error::Error;
use crate::log::builder_log;
use crate::range::{AddressRange, RangeSet};
use crate::types::Prefix4;
use slog::Logger;
use std::net::Ipv4Addr;

/// Accumulates per-country prefix lists and an allow-list into a minimal
/// disjoint CIDR cover of the addresses to blackhole.
///
/// Country prefixes may overlap or repeat across countries; they collapse
/// under the union. Allow-listed addresses are carved out one address at a
/// time, splitting the covering range. Malformed entries are logged and
/// skipped, never fatal.
pub struct PrefixSetBuilder {
    set: RangeSet,
    log: Logger,
}

impl PrefixSetBuilder {
    pub fn new(log: Logger) -> Self {
        Self {
            set: RangeSet::new(),
            log,
        }
    }

    /// Union one country's prefix list into the set. Returns the number of
    /// prefixes accepted; malformed or non-IPv4 entries are skipped with a
    /// warning.
    pub fn add_country(&mut self, iso: &str, prefixes: &[String]) -> usize {
        let mut accepted = 0;
        for s in prefixes {
            let prefix: Prefix4 = match s.parse() {
                Ok(p) => p,
                Err(e) => {
                    builder_log!(self, warn,
                        "skipping prefix for {}: {}", iso, e;
                        "country" => iso.to_string(),
                        "prefix" => s.clone()
                    );
                    continue;
                }
            };
            self.set.insert(AddressRange::from(prefix));
            accepted += 1;
        }
        if accepted == 0 {
            builder_log!(self, warn,
                "country {} contributed no usable prefixes", iso;
                "country" => iso.to_string()
            );
        }
        accepted
    }

    /// Carve the allow-listed host addresses out of the set. Entries must
    /// be single addresses, not prefixes; a bad entry is rejected on its
    /// own with a warning. An address outside every blocked range is a
    /// no-op.
    pub fn allow(&mut self, entries: &[String]) {
        for s in entries {
            let addr = match Self::parse_host(s) {
                Ok(a) => a,
                Err(e) => {
                    builder_log!(self, warn,
                        "rejecting allow entry: {}", e;
                        "entry" => s.clone()
                    );
                    continue;
                }
            };
            self.set.remove(addr.to_bits());
        }
    }

    fn parse_host(s: &str) -> Result<Ipv4Addr, Error> {
        if s.contains('/') {
            return Err(Error::NotHostAddress(s.into()));
        }
        s.parse().map_err(|_| Error::MalformedAddress(s.into()))
    }

    /// Number of addresses currently covered.
    pub fn addresses(&self) -> u64 {
        self.set.addresses()
    }

    /// Finish: the minimal list of CIDR-aligned prefixes covering the
    /// unioned countries minus the allow-list.
    pub fn build(self) -> Vec<Prefix4> {
        self.set.prefixes()
    }
}
