// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Path-attribute encoding for blackhole announcements and the contract
//! with the local routing daemon.
//!
//! Every operation, announce and withdraw alike, carries a full path
//! description: origin (always IGP), the configured next hop, and the
//! configured communities. The daemon-facing side is the [`RoutingClient`]
//! trait; [`test::MemoryClient`] backs it with an in-memory table for
//! testing.

pub mod attrs;
pub mod client;
pub mod encoder;
pub mod error;

pub use attrs::{Community, PathAttributes, PathOrigin};
pub use client::RoutingClient;
pub use encoder::{AttributeEncoder, PathUpdate};
pub use error::Error;

pub const COMPONENT_ANNOUNCE: &str = "announce";
pub const MOD_ENCODER: &str = "encoder";

mod log;

pub mod test;

#[cfg(test)]
mod test_attrs;
