// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::error::Error;
use num_enum::TryFromPrimitive;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;

pub mod path_attribute_flags {
    pub const OPTIONAL: u8 = 0b10000000;
    pub const TRANSITIVE: u8 = 0b01000000;
    pub const PARTIAL: u8 = 0b00100000;
    pub const EXTENDED_LENGTH: u8 = 0b00010000;
}

#[derive(Debug, PartialEq, Eq, Copy, Clone, TryFromPrimitive)]
#[repr(u8)]
pub enum PathAttributeTypeCode {
    /// RFC 4271
    Origin = 1,
    NextHop = 3,
    Communities = 8,
}

#[derive(
    Debug,
    PartialEq,
    Eq,
    Copy,
    Clone,
    TryFromPrimitive,
    Serialize,
    Deserialize,
    JsonSchema,
)]
#[repr(u8)]
pub enum PathOrigin {
    Igp = 0,
    Egp = 1,
    Incomplete = 2,
}

/// A 32-bit community tag. The textual form is a pair `A:B` of 16-bit
/// unsigned decimals. The packing places B in the high half and A in the
/// low half: `encoded = (B << 16) | A`. This ordering was verified against
/// the downstream speaker and must not change.
#[derive(
    Debug,
    PartialEq,
    Eq,
    Copy,
    Clone,
    Hash,
    Serialize,
    Deserialize,
    JsonSchema,
)]
pub struct Community(pub u32);

impl Community {
    pub fn from_pair(a: u16, b: u16) -> Self {
        Self((u32::from(b) << 16) | u32::from(a))
    }

    pub fn low(&self) -> u16 {
        (self.0 & 0xffff) as u16
    }

    pub fn high(&self) -> u16 {
        (self.0 >> 16) as u16
    }
}

impl From<Community> for u32 {
    fn from(c: Community) -> Self {
        c.0
    }
}

impl fmt::Display for Community {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.low(), self.high())
    }
}

impl FromStr for Community {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split(':');
        let (a, b) = match (parts.next(), parts.next(), parts.next()) {
            (Some(a), Some(b), None) => (a, b),
            _ => return Err(Error::MalformedCommunity(s.into())),
        };
        let a: u16 = a
            .parse()
            .map_err(|_| Error::MalformedCommunity(s.into()))?;
        let b: u16 = b
            .parse()
            .map_err(|_| Error::MalformedCommunity(s.into()))?;
        Ok(Self::from_pair(a, b))
    }
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub enum PathAttributeValue {
    Origin(PathOrigin),
    NextHop(Ipv4Addr),
    Communities(Vec<Community>),
}

impl PathAttributeValue {
    pub fn to_wire(&self) -> Vec<u8> {
        match self {
            Self::Origin(x) => vec![*x as u8],
            Self::NextHop(addr) => addr.octets().into(),
            Self::Communities(communities) => {
                let mut buf = Vec::new();
                for community in communities {
                    buf.extend_from_slice(&u32::from(*community).to_be_bytes());
                }
                buf
            }
        }
    }
}

impl From<&PathAttributeValue> for PathAttributeTypeCode {
    fn from(v: &PathAttributeValue) -> Self {
        match v {
            PathAttributeValue::Origin(_) => PathAttributeTypeCode::Origin,
            PathAttributeValue::NextHop(_) => PathAttributeTypeCode::NextHop,
            PathAttributeValue::Communities(_) => {
                PathAttributeTypeCode::Communities
            }
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct PathAttribute {
    pub flags: u8,
    pub type_code: PathAttributeTypeCode,
    pub value: PathAttributeValue,
}

impl From<PathAttributeValue> for PathAttribute {
    fn from(v: PathAttributeValue) -> Self {
        let flags = match v {
            PathAttributeValue::Origin(_) => path_attribute_flags::TRANSITIVE,
            PathAttributeValue::NextHop(_) => path_attribute_flags::TRANSITIVE,
            PathAttributeValue::Communities(_) => {
                path_attribute_flags::OPTIONAL
                    | path_attribute_flags::TRANSITIVE
            }
        };
        Self {
            flags,
            type_code: (&v).into(),
            value: v,
        }
    }
}

impl PathAttribute {
    pub fn to_wire(&self) -> Result<Vec<u8>, Error> {
        let mut buf = vec![self.flags, self.type_code as u8];
        let val = self.value.to_wire();
        if self.flags & path_attribute_flags::EXTENDED_LENGTH != 0 {
            if val.len() > u16::MAX as usize {
                return Err(Error::TooLarge("extended path attribute".into()));
            }
            let len = val.len() as u16;
            buf.extend_from_slice(&len.to_be_bytes())
        } else {
            if val.len() > u8::MAX as usize {
                return Err(Error::TooLarge("path attribute".into()));
            }
            buf.push(val.len() as u8);
        }
        buf.extend_from_slice(&val);
        Ok(buf)
    }
}

/// The attribute bundle attached to one announce or withdraw operation.
#[derive(
    Debug, PartialEq, Eq, Clone, Serialize, Deserialize, JsonSchema,
)]
pub struct PathAttributes {
    pub origin: PathOrigin,
    pub next_hop: Ipv4Addr,
    pub communities: Vec<Community>,
}

impl PathAttributes {
    pub fn attributes(&self) -> Vec<PathAttribute> {
        let mut attrs = vec![
            PathAttributeValue::Origin(self.origin).into(),
            PathAttributeValue::NextHop(self.next_hop).into(),
        ];
        if !self.communities.is_empty() {
            attrs.push(
                PathAttributeValue::Communities(self.communities.clone())
                    .into(),
            );
        }
        attrs
    }

    pub fn to_wire(&self) -> Result<Vec<u8>, Error> {
        let mut buf = Vec::new();
        for a in self.attributes() {
            buf.extend_from_slice(&a.to_wire()?);
        }
        Ok(buf)
    }
}
