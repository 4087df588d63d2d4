// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Converges the local speaker's announced set toward the desired block
//! set with minimal churn: prefixes present on both sides are untouched,
//! and only the delta is withdrawn or announced.

use announce::{AttributeEncoder, RoutingClient};
use pset::Prefix4;
use slog::Logger;
use std::collections::BTreeSet;

pub mod error;
pub use error::Error;

pub const COMPONENT_LOWER: &str = "nr-lower";
pub const MOD_RECONCILE: &str = "reconcile";

mod log;
use crate::log::reconcile_log;


/// The delta between desired and active. The two sets are disjoint by
/// construction, so there is no ordering requirement between them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Plan {
    pub to_withdraw: BTreeSet<Prefix4>,
    pub to_announce: BTreeSet<Prefix4>,
}

impl Plan {
    pub fn is_empty(&self) -> bool {
        self.to_withdraw.is_empty() && self.to_announce.is_empty()
    }
}

/// Outcome counts for one reconciliation pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PassStats {
    pub withdrawn: usize,
    pub announced: usize,
    pub failed: usize,
    pub kept: usize,
}

/// Diff desired against active, both keyed by exact canonical
/// (address, length) form. Withdraw what is active but no longer wanted,
/// announce what is wanted but not yet active, leave the intersection
/// alone.
pub fn reconcile(
    desired: &BTreeSet<Prefix4>,
    active: &BTreeSet<Prefix4>,
) -> Plan {
    Plan {
        to_withdraw: active.difference(desired).copied().collect(),
        to_announce: desired.difference(active).copied().collect(),
    }
}

/// One full pass: snapshot the active set, diff, submit the delta.
///
/// The snapshot must complete before any reconciliation begins; failure to
/// obtain it is fatal for the run. Malformed prefix strings in the
/// snapshot are skipped with a warning and the well-formed remainder is
/// reconciled. Submissions run sequentially, and an individual failure is
/// logged and counted without aborting the rest of the batch. There is no
/// per-item retry; convergence comes from re-running the whole pass.
pub fn run_pass<C: RoutingClient>(
    client: &C,
    encoder: &AttributeEncoder,
    desired: &BTreeSet<Prefix4>,
    log: &Logger,
) -> Result<PassStats, Error> {
    let raw = client
        .list_active_ipv4_unicast()
        .map_err(|e| Error::Snapshot(e.to_string()))?;

    let mut active = BTreeSet::new();
    for s in &raw {
        match s.parse::<Prefix4>() {
            Ok(p) => {
                active.insert(p);
            }
            Err(e) => {
                reconcile_log!(log, warn,
                    "skipping active prefix: {}", e;
                    "prefix" => s.clone()
                );
            }
        }
    }

    let plan = reconcile(desired, &active);
    let mut stats = PassStats {
        kept: desired.intersection(&active).count(),
        ..Default::default()
    };

    for prefix in &plan.to_withdraw {
        let update = encoder.encode(*prefix, true);
        match client.submit_path(&update) {
            Ok(()) => stats.withdrawn += 1,
            Err(e) => {
                stats.failed += 1;
                reconcile_log!(log, error,
                    "failed to withdraw {}: {}", prefix, e;
                    "prefix" => prefix.to_string()
                );
            }
        }
    }
    for prefix in &plan.to_announce {
        let update = encoder.encode(*prefix, false);
        match client.submit_path(&update) {
            Ok(()) => stats.announced += 1,
            Err(e) => {
                stats.failed += 1;
                reconcile_log!(log, error,
                    "failed to announce {}: {}", prefix, e;
                    "prefix" => prefix.to_string()
                );
            }
        }
    }

    Ok(stats)
}
