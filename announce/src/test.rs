// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Test utilities: an in-memory stand-in for the routing daemon.

use crate::client::RoutingClient;
use crate::encoder::PathUpdate;
use crate::error::Error;
use std::collections::BTreeSet;
use std::sync::Mutex;

/// A [`RoutingClient`] backed by an in-memory route table. Tests can seed
/// the table, inject malformed entries, force individual submissions to
/// fail, and inspect what was submitted.
#[derive(Default)]
pub struct MemoryClient {
    table: Mutex<BTreeSet<String>>,
    submitted: Mutex<Vec<PathUpdate>>,
    fail_submit: Mutex<BTreeSet<String>>,
    fail_snapshot: Mutex<bool>,
}

impl MemoryClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed(&self, prefixes: &[&str]) {
        let mut table = self.table.lock().unwrap();
        for p in prefixes {
            table.insert(p.to_string());
        }
    }

    /// Make the next snapshot call fail, as if the daemon connection
    /// dropped before the table could be read.
    pub fn break_snapshot(&self) {
        *self.fail_snapshot.lock().unwrap() = true;
    }

    /// Make submissions for `prefix` fail.
    pub fn break_submit(&self, prefix: &str) {
        self.fail_submit.lock().unwrap().insert(prefix.to_string());
    }

    pub fn active(&self) -> Vec<String> {
        self.table.lock().unwrap().iter().cloned().collect()
    }

    pub fn submitted(&self) -> Vec<PathUpdate> {
        self.submitted.lock().unwrap().clone()
    }
}

impl RoutingClient for MemoryClient {
    fn list_active_ipv4_unicast(&self) -> Result<Vec<String>, Error> {
        if *self.fail_snapshot.lock().unwrap() {
            return Err(Error::Snapshot("connection reset".into()));
        }
        Ok(self.active())
    }

    fn submit_path(&self, update: &PathUpdate) -> Result<(), Error> {
        let key = update.prefix.to_string();
        if self.fail_submit.lock().unwrap().contains(&key) {
            return Err(Error::Submit {
                prefix: key,
                message: "rejected by speaker".into(),
            });
        }
        let mut table = self.table.lock().unwrap();
        if update.withdraw {
            table.remove(&key);
        } else {
            table.insert(key);
        }
        self.submitted.lock().unwrap().push(update.clone());
        Ok(())
    }
}
