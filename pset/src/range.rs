// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Sorted disjoint address-range set with CIDR decomposition.

use crate::types::Prefix4;
use std::net::Ipv4Addr;

/// An inclusive interval of IPv4 addresses in integer form.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd)]
pub struct AddressRange {
    pub start: u32,
    pub end: u32,
}

impl AddressRange {
    pub fn contains(&self, addr: u32) -> bool {
        self.start <= addr && addr <= self.end
    }

    /// Number of addresses covered. A full /0 covers 2^32, hence u64.
    pub fn addresses(&self) -> u64 {
        u64::from(self.end) - u64::from(self.start) + 1
    }

    /// Decompose into the minimal list of CIDR-aligned prefixes: repeatedly
    /// take the largest power-of-two block that starts at the current
    /// position, is aligned there, and does not run past the end.
    pub fn prefixes(&self) -> Vec<Prefix4> {
        let mut out = Vec::new();
        let mut cur = u64::from(self.start);
        let end = u64::from(self.end);
        while cur <= end {
            let align = if cur == 0 {
                32
            } else {
                cur.trailing_zeros().min(32)
            };
            let remaining = end - cur + 1;
            let span = 63 - remaining.leading_zeros();
            let bits = align.min(span);
            out.push(Prefix4::new(
                Ipv4Addr::from_bits(cur as u32),
                (32 - bits) as u8,
            ));
            cur += 1u64 << bits;
        }
        out
    }
}

impl From<Prefix4> for AddressRange {
    fn from(p: Prefix4) -> Self {
        Self {
            start: p.first_addr(),
            end: p.last_addr(),
        }
    }
}

/// A set of addresses kept as sorted, pairwise disjoint, non-adjacent
/// inclusive ranges. Inserting a range that overlaps or abuts existing
/// ranges coalesces them; removing an address splits its range in place.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct RangeSet {
    ranges: Vec<AddressRange>,
}

impl RangeSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &AddressRange> {
        self.ranges.iter()
    }

    /// Total number of addresses covered by the set.
    pub fn addresses(&self) -> u64 {
        self.ranges.iter().map(|r| r.addresses()).sum()
    }

    pub fn contains(&self, addr: u32) -> bool {
        let i = self.ranges.partition_point(|r| r.end < addr);
        i < self.ranges.len() && self.ranges[i].contains(addr)
    }

    /// Union this set with `r`, merging every range that overlaps or
    /// touches it. Adjacency counts as mergeable: [a, b] and [b+1, c]
    /// coalesce into [a, c].
    pub fn insert(&mut self, r: AddressRange) {
        // first range not entirely left of r (no gap between them)
        let lo = self
            .ranges
            .partition_point(|x| u64::from(x.end) + 1 < u64::from(r.start));

        let mut start = r.start;
        let mut end = r.end;
        let mut hi = lo;
        while hi < self.ranges.len()
            && u64::from(self.ranges[hi].start) <= u64::from(r.end) + 1
        {
            start = start.min(self.ranges[hi].start);
            end = end.max(self.ranges[hi].end);
            hi += 1;
        }
        self.ranges.splice(lo..hi, [AddressRange { start, end }]);
    }

    /// Carve a single address out of the set. The containing range is
    /// replaced by zero, one, or two sub-ranges flanking the address.
    /// Returns false if the address was not covered.
    pub fn remove(&mut self, addr: u32) -> bool {
        let i = self.ranges.partition_point(|r| r.end < addr);
        if i == self.ranges.len() || !self.ranges[i].contains(addr) {
            return false;
        }
        let r = self.ranges[i];
        match (r.start == addr, r.end == addr) {
            (true, true) => {
                self.ranges.remove(i);
            }
            (true, false) => self.ranges[i].start = addr + 1,
            (false, true) => self.ranges[i].end = addr - 1,
            (false, false) => {
                self.ranges[i].end = addr - 1;
                self.ranges.insert(
                    i + 1,
                    AddressRange {
                        start: addr + 1,
                        end: r.end,
                    },
                );
            }
        }
        true
    }

    /// The minimal CIDR cover of the whole set, in ascending order.
    pub fn prefixes(&self) -> Vec<Prefix4> {
        self.ranges.iter().flat_map(|r| r.prefixes()).collect()
    }
}
