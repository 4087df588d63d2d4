// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::attrs::{
    path_attribute_flags, Community, PathAttribute, PathAttributeValue,
    PathOrigin,
};
use crate::encoder::AttributeEncoder;
use pretty_assertions::assert_eq;
use pset::Prefix4;
use slog::Logger;
use std::net::Ipv4Addr;
use std::str::FromStr;

fn test_logger() -> Logger {
    Logger::root(slog::Discard, slog::o!())
}

#[test]
fn community_packing() {
    // 100 = 0x0064 in the low half, 200 = 0x00c8 in the high half
    let c = Community::from_str("100:200").unwrap();
    assert_eq!(u32::from(c), 0x00c8_0064);
    assert_eq!(c.low(), 100);
    assert_eq!(c.high(), 200);
    assert_eq!(c.to_string(), "100:200");
}

#[test]
fn community_rejects_malformed() {
    for s in ["", "100", "100:200:300", "a:b", "65536:1", "1:-2", "1:"] {
        assert!(Community::from_str(s).is_err(), "{s} should not parse");
    }
    // boundary values are fine
    assert!(Community::from_str("0:0").is_ok());
    assert!(Community::from_str("65535:65535").is_ok());
}

#[test]
fn community_wire_form() {
    let c = Community::from_str("100:200").unwrap();
    let attr: PathAttribute = PathAttributeValue::Communities(vec![c]).into();
    assert_eq!(
        attr.flags,
        path_attribute_flags::OPTIONAL | path_attribute_flags::TRANSITIVE
    );
    // flags, type code 8, length 4, then the packed value big-endian
    assert_eq!(
        attr.to_wire().unwrap(),
        vec![0b1100_0000, 8, 4, 0x00, 0xc8, 0x00, 0x64]
    );
}

#[test]
fn origin_and_next_hop_wire_form() {
    let origin: PathAttribute =
        PathAttributeValue::Origin(PathOrigin::Igp).into();
    assert_eq!(origin.to_wire().unwrap(), vec![0b0100_0000, 1, 1, 0]);

    let nh: PathAttribute =
        PathAttributeValue::NextHop(Ipv4Addr::new(192, 0, 2, 1)).into();
    assert_eq!(
        nh.to_wire().unwrap(),
        vec![0b0100_0000, 3, 4, 192, 0, 2, 1]
    );
}

#[test]
fn bundle_wire_form() {
    let enc = AttributeEncoder::new(
        Ipv4Addr::new(192, 0, 2, 1),
        &["100:200".to_string()],
        test_logger(),
    );
    let up = enc.encode(Prefix4::from_str("203.0.113.0/24").unwrap(), false);
    assert_eq!(
        up.attributes.to_wire().unwrap(),
        vec![
            0b0100_0000, 1, 1, 0, // origin IGP
            0b0100_0000, 3, 4, 192, 0, 2, 1, // next hop
            0b1100_0000, 8, 4, 0x00, 0xc8, 0x00, 0x64, // communities
        ]
    );
}

#[test]
fn encoder_fixes_origin_and_carries_withdraw() {
    let enc = AttributeEncoder::new(
        Ipv4Addr::new(192, 0, 2, 1),
        &["100:200".to_string()],
        test_logger(),
    );
    let prefix = Prefix4::from_str("203.0.113.0/24").unwrap();

    let up = enc.encode(prefix, false);
    assert_eq!(up.attributes.origin, PathOrigin::Igp);
    assert_eq!(up.attributes.next_hop, Ipv4Addr::new(192, 0, 2, 1));
    assert!(!up.withdraw);

    // withdrawals carry the same full bundle
    let down = enc.encode(prefix, true);
    assert!(down.withdraw);
    assert_eq!(down.attributes, up.attributes);
}

#[test]
fn encoder_drops_bad_communities_only() {
    let enc = AttributeEncoder::new(
        Ipv4Addr::new(192, 0, 2, 1),
        &[
            "100:200".to_string(),
            "70000:1".to_string(),
            "1:2:3".to_string(),
            "666:0".to_string(),
        ],
        test_logger(),
    );
    assert_eq!(
        enc.communities(),
        &[Community::from_pair(100, 200), Community::from_pair(666, 0)]
    );
}

#[test]
fn bundle_attribute_order() {
    let enc = AttributeEncoder::new(
        Ipv4Addr::new(10, 0, 0, 1),
        &["1:2".to_string()],
        test_logger(),
    );
    let up = enc.encode(Prefix4::from_str("192.0.2.0/24").unwrap(), false);
    let attrs = up.attributes.attributes();
    assert_eq!(attrs.len(), 3);
    assert_eq!(attrs[0].type_code as u8, 1);
    assert_eq!(attrs[1].type_code as u8, 3);
    assert_eq!(attrs[2].type_code as u8, 8);

    // no communities configured: the attribute is omitted entirely
    let bare =
        AttributeEncoder::new(Ipv4Addr::new(10, 0, 0, 1), &[], test_logger());
    let up = bare.encode(Prefix4::from_str("192.0.2.0/24").unwrap(), false);
    assert_eq!(up.attributes.attributes().len(), 2);
}
