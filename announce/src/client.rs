// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::encoder::PathUpdate;
use crate::error::Error;

/// Contract with the local routing daemon.
///
/// The snapshot must be exhaustive and synchronous: reconciliation never
/// begins against a partial result. An empty snapshot is valid (first run,
/// nothing announced yet). Submissions are one at a time; a failure is
/// reported per operation and never tears down the connection.
pub trait RoutingClient {
    /// Every prefix currently announced by the local speaker for IPv4
    /// unicast, in `a.b.c.d/len` string form as the daemon reports it.
    fn list_active_ipv4_unicast(&self) -> Result<Vec<String>, Error>;

    /// Submit one announce or withdraw operation.
    fn submit_path(&self, update: &PathUpdate) -> Result<(), Error>;
}
