// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Prefix-set algebra for the blackhole desired set.
//!
//! The desired block set is the union of every blocked country's prefixes
//! minus every allow-listed host address, reduced to a minimal CIDR cover.
//! [`RangeSet`] holds the intermediate interval form, and
//! [`PrefixSetBuilder`] drives the union / carve-out / decomposition steps.

pub mod builder;
pub mod error;
pub mod range;
pub mod types;

pub use builder::PrefixSetBuilder;
pub use error::Error;
pub use range::{AddressRange, RangeSet};
pub use types::Prefix4;

pub const COMPONENT_PSET: &str = "pset";
pub const MOD_BUILDER: &str = "builder";

mod log;
