// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::RunArgs;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::net::Ipv4Addr;

/// The immutable configuration for one pass, handed to each component at
/// construction. The next hop has already been validated as an IPv4 host
/// address by argument parsing; a bad value never gets this far.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct RunConfig {
    pub countries: Vec<String>,
    pub allow: Vec<String>,
    pub next_hop: Ipv4Addr,
    pub communities: Vec<String>,
}

impl From<&RunArgs> for RunConfig {
    fn from(args: &RunArgs) -> Self {
        Self {
            countries: args
                .countries
                .iter()
                .map(|c| c.to_uppercase())
                .collect(),
            allow: args.allow.clone(),
            next_hop: args.next_hop,
            communities: args.communities.clone(),
        }
    }
}
