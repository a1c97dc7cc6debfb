// Common test utilities: a minimal OTB reader used to verify writer output
#![allow(dead_code)]

use std::path::PathBuf;

use otb_tools_lib::item::{ServerItem, ServerItemType, TileStackOrder, SPRITE_HASH_SIZE};
use otb_tools_lib::otb::flags::*;
use otb_tools_lib::otb::{ServerItemAttribute, ESCAPE_CHAR, NODE_END, NODE_START};

/// Path of a catalog fixture under tests/fixtures
pub fn fixture(filename: &str) -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests/fixtures");
    path.push(filename);

    assert!(path.exists(), "Test fixture not found: {}", path.display());
    path
}

#[derive(Debug, Clone, PartialEq)]
pub struct OtbNode {
    pub group: u8,
    /// Unescaped node body, children excluded
    pub data: Vec<u8>,
    pub children: Vec<OtbNode>,
}

#[derive(Debug)]
pub struct OtbFile {
    pub version: u32,
    pub root: OtbNode,
}

pub fn parse_otb(bytes: &[u8]) -> OtbFile {
    assert!(bytes.len() >= 5, "file too short: {} bytes", bytes.len());
    let version = u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
    assert_eq!(bytes[4], NODE_START, "root node start marker missing");

    let mut pos = 5;
    let root = parse_node(bytes, &mut pos);
    assert_eq!(pos, bytes.len(), "trailing bytes after root node");

    OtbFile { version, root }
}

fn next(bytes: &[u8], pos: &mut usize) -> u8 {
    assert!(*pos < bytes.len(), "unexpected end of stream at {}", pos);
    let b = bytes[*pos];
    *pos += 1;
    b
}

fn parse_node(bytes: &[u8], pos: &mut usize) -> OtbNode {
    let mut group = next(bytes, pos);
    if group == ESCAPE_CHAR {
        group = next(bytes, pos);
    }

    let mut node = OtbNode {
        group,
        data: Vec::new(),
        children: Vec::new(),
    };

    loop {
        match next(bytes, pos) {
            NODE_START => node.children.push(parse_node(bytes, pos)),
            NODE_END => return node,
            ESCAPE_CHAR => {
                let b = next(bytes, pos);
                node.data.push(b);
            }
            b => node.data.push(b),
        }
    }
}

/// Split a node body into the leading u32 flags and its tagged properties.
pub fn parse_props(data: &[u8]) -> (u32, Vec<(u8, Vec<u8>)>) {
    assert!(data.len() >= 4, "node body missing flags");
    let flags = u32::from_le_bytes([data[0], data[1], data[2], data[3]]);

    let mut props = Vec::new();
    let mut pos = 4;
    while pos < data.len() {
        assert!(pos + 3 <= data.len(), "truncated property header at {}", pos);
        let tag = data[pos];
        let len = u16::from_le_bytes([data[pos + 1], data[pos + 2]]) as usize;
        pos += 3;
        assert!(pos + len <= data.len(), "property 0x{:02X} overruns node", tag);
        props.push((tag, data[pos..pos + len].to_vec()));
        pos += len;
    }

    (flags, props)
}

fn u16_at(payload: &[u8], offset: usize) -> u16 {
    u16::from_le_bytes([payload[offset], payload[offset + 1]])
}

fn item_type_for_group(group: u8) -> ServerItemType {
    match group {
        0 => ServerItemType::None,
        1 => ServerItemType::Ground,
        2 => ServerItemType::Container,
        11 => ServerItemType::Splash,
        12 => ServerItemType::Fluid,
        14 => ServerItemType::Deprecated,
        other => panic!("unexpected item group {}", other),
    }
}

fn stack_order_from(b: u8) -> TileStackOrder {
    match b {
        0 => TileStackOrder::None,
        1 => TileStackOrder::Border,
        2 => TileStackOrder::Bottom,
        3 => TileStackOrder::Top,
        other => panic!("unexpected stack order {}", other),
    }
}

/// Rebuild an item from its node. Fields not present in the node keep their
/// defaults.
pub fn decode_item(node: &OtbNode) -> ServerItem {
    let (flags, props) = parse_props(&node.data);
    let mut item = ServerItem::new(0, item_type_for_group(node.group));

    for (tag, payload) in &props {
        match *tag {
            t if t == ServerItemAttribute::ServerId as u8 => item.id = u16_at(payload, 0),
            t if t == ServerItemAttribute::ClientId as u8 => item.client_id = u16_at(payload, 0),
            t if t == ServerItemAttribute::Name as u8 => {
                item.name = String::from_utf8(payload.clone()).expect("utf-8 name")
            }
            t if t == ServerItemAttribute::GroundSpeed as u8 => {
                item.ground_speed = u16_at(payload, 0)
            }
            t if t == ServerItemAttribute::SpriteHash as u8 => {
                assert_eq!(payload.len(), SPRITE_HASH_SIZE);
                item.sprite_hash.copy_from_slice(payload);
            }
            t if t == ServerItemAttribute::MinimapColor as u8 => {
                item.minimap_color = u16_at(payload, 0)
            }
            t if t == ServerItemAttribute::MaxReadWriteChars as u8 => {
                item.max_read_write_chars = u16_at(payload, 0)
            }
            t if t == ServerItemAttribute::MaxReadChars as u8 => {
                item.max_read_chars = u16_at(payload, 0)
            }
            t if t == ServerItemAttribute::Light as u8 => {
                assert_eq!(payload.len(), 4);
                item.light_level = u16_at(payload, 0);
                item.light_color = u16_at(payload, 2);
            }
            t if t == ServerItemAttribute::StackOrder as u8 => {
                assert_eq!(payload.len(), 1);
                item.stack_order = stack_order_from(payload[0]);
            }
            t if t == ServerItemAttribute::TradeAs as u8 => item.trade_as = u16_at(payload, 0),
            other => panic!("unknown property tag 0x{:02X}", other),
        }
    }

    item.unpassable = flags & FLAG_UNPASSABLE != 0;
    item.block_missiles = flags & FLAG_BLOCK_MISSILES != 0;
    item.block_pathfinder = flags & FLAG_BLOCK_PATHFINDER != 0;
    item.has_elevation = flags & FLAG_HAS_ELEVATION != 0;
    item.force_use = flags & FLAG_FORCE_USE != 0;
    item.multi_use = flags & FLAG_MULTI_USE != 0;
    item.pickupable = flags & FLAG_PICKUPABLE != 0;
    item.movable = flags & FLAG_MOVABLE != 0;
    item.stackable = flags & FLAG_STACKABLE != 0;
    item.readable = flags & FLAG_READABLE != 0;
    item.rotatable = flags & FLAG_ROTATABLE != 0;
    item.hangable = flags & FLAG_HANGABLE != 0;
    item.hook_south = flags & FLAG_HOOK_SOUTH != 0;
    item.hook_east = flags & FLAG_HOOK_EAST != 0;
    item.has_charges = flags & FLAG_CLIENT_CHARGES != 0;
    item.ignore_look = flags & FLAG_IGNORE_LOOK != 0;
    item.allow_distance_read = flags & FLAG_ALLOW_DISTANCE_READ != 0;
    item.is_animation = flags & FLAG_IS_ANIMATION != 0;
    item.full_ground = flags & FLAG_FULL_GROUND != 0;

    item
}

/// What a reader can recover from an item after it went through the writer.
pub fn expected_after_roundtrip(item: &ServerItem) -> ServerItem {
    let mut expected = item.clone();
    match item.item_type {
        ServerItemType::Deprecated => {
            expected.client_id = 0;
            expected.trade_as = 0;
            expected.name.clear();
            expected.sprite_hash = [0; SPRITE_HASH_SIZE];
            expected.ground_speed = 0;
            expected.minimap_color = 0;
            expected.max_read_write_chars = 0;
            expected.max_read_chars = 0;
            expected.light_level = 0;
            expected.light_color = 0;
            expected.stack_order = TileStackOrder::None;
        }
        ServerItemType::Ground => {}
        _ => expected.ground_speed = 0,
    }
    expected
}

/// Deterministic pseudo-random catalog items (xorshift).
pub fn generated_items(count: usize, seed: u64) -> Vec<ServerItem> {
    let mut state = seed.max(1);
    let mut rand = move || {
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        state
    };

    let types = [
        ServerItemType::None,
        ServerItemType::Ground,
        ServerItemType::Container,
        ServerItemType::Fluid,
        ServerItemType::Splash,
        ServerItemType::Deprecated,
    ];
    let orders = [
        TileStackOrder::None,
        TileStackOrder::Border,
        TileStackOrder::Bottom,
        TileStackOrder::Top,
    ];

    (0..count)
        .map(|i| {
            let r = rand();
            let mut hash = [0u8; SPRITE_HASH_SIZE];
            for b in hash.iter_mut() {
                *b = rand() as u8;
            }
            // Bias small fields towards zero so optional properties are skipped too
            let maybe = |v: u64| if v % 3 == 0 { 0 } else { (v >> 8) as u16 };

            ServerItem {
                id: 100 + i as u16,
                client_id: rand() as u16,
                trade_as: maybe(rand()),
                item_type: types[(r % types.len() as u64) as usize],
                name: match r % 4 {
                    0 => String::new(),
                    // 0xFD-byte name: the length field itself needs escaping
                    1 => "x".repeat(0xFD),
                    _ => format!("item {}", i),
                },
                sprite_hash: hash,
                ground_speed: rand() as u16,
                minimap_color: maybe(rand()),
                max_read_write_chars: maybe(rand()),
                max_read_chars: maybe(rand()),
                light_level: maybe(rand()),
                light_color: maybe(rand()),
                stack_order: orders[(rand() % 4) as usize],
                unpassable: rand() % 2 == 0,
                block_missiles: rand() % 2 == 0,
                block_pathfinder: rand() % 2 == 0,
                has_elevation: rand() % 2 == 0,
                force_use: rand() % 2 == 0,
                multi_use: rand() % 2 == 0,
                pickupable: rand() % 2 == 0,
                movable: rand() % 2 == 0,
                stackable: rand() % 2 == 0,
                readable: rand() % 2 == 0,
                rotatable: rand() % 2 == 0,
                hangable: rand() % 2 == 0,
                hook_south: rand() % 2 == 0,
                hook_east: rand() % 2 == 0,
                has_charges: rand() % 2 == 0,
                ignore_look: rand() % 2 == 0,
                allow_distance_read: rand() % 2 == 0,
                is_animation: rand() % 2 == 0,
                full_ground: rand() % 2 == 0,
            }
        })
        .collect()
}
