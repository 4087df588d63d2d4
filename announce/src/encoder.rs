// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::attrs::{Community, PathAttributes, PathOrigin};
use crate::log::encoder_log;
use pset::Prefix4;
use slog::Logger;
use std::net::Ipv4Addr;

/// One announce or withdraw operation, fully described.
#[derive(
    Debug,
    PartialEq,
    Eq,
    Clone,
    serde::Serialize,
    serde::Deserialize,
    schemars::JsonSchema,
)]
pub struct PathUpdate {
    pub prefix: Prefix4,
    pub attributes: PathAttributes,
    pub withdraw: bool,
}

/// Builds the path-attribute bundle for each operation from configuration
/// fixed at startup. The next hop arrives already validated as an IPv4
/// host address; community strings are parsed once here, and a malformed
/// entry is dropped with a warning rather than failing the run.
pub struct AttributeEncoder {
    next_hop: Ipv4Addr,
    communities: Vec<Community>,
    log: Logger,
}

impl AttributeEncoder {
    pub fn new(
        next_hop: Ipv4Addr,
        communities: &[String],
        log: Logger,
    ) -> Self {
        let mut enc = Self {
            next_hop,
            communities: Vec::new(),
            log,
        };
        for s in communities {
            match s.parse::<Community>() {
                Ok(c) => enc.communities.push(c),
                Err(e) => {
                    encoder_log!(enc, warn,
                        "dropping community: {}", e;
                        "community" => s.clone()
                    );
                }
            }
        }
        enc
    }

    pub fn communities(&self) -> &[Community] {
        &self.communities
    }

    /// Describe one operation. Origin is always IGP; the target API wants
    /// a full path description for withdrawals too, so the bundle is the
    /// same in both directions and the withdraw flag passes through
    /// unchanged.
    pub fn encode(&self, prefix: Prefix4, withdraw: bool) -> PathUpdate {
        PathUpdate {
            prefix,
            attributes: PathAttributes {
                origin: PathOrigin::Igp,
                next_hop: self.next_hop,
                communities: self.communities.clone(),
            },
            withdraw,
        }
    }
}
