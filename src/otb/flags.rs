//! Item flag bitmask written untagged at the start of every item node.

use crate::item::{ServerItem, TileStackOrder};

pub const FLAG_UNPASSABLE: u32 = 1 << 0;
pub const FLAG_BLOCK_MISSILES: u32 = 1 << 1;
pub const FLAG_BLOCK_PATHFINDER: u32 = 1 << 2;
pub const FLAG_HAS_ELEVATION: u32 = 1 << 3;
pub const FLAG_MULTI_USE: u32 = 1 << 4;
pub const FLAG_PICKUPABLE: u32 = 1 << 5;
pub const FLAG_MOVABLE: u32 = 1 << 6;
pub const FLAG_STACKABLE: u32 = 1 << 7;
// Bits 8..=12 are the legacy floor-change flags, never set by this writer.
pub const FLAG_STACK_ORDER: u32 = 1 << 13;
pub const FLAG_READABLE: u32 = 1 << 14;
pub const FLAG_ROTATABLE: u32 = 1 << 15;
pub const FLAG_HANGABLE: u32 = 1 << 16;
pub const FLAG_HOOK_SOUTH: u32 = 1 << 17;
pub const FLAG_HOOK_EAST: u32 = 1 << 18;
// Bit 19: cannot-decay (unused)
pub const FLAG_ALLOW_DISTANCE_READ: u32 = 1 << 20;
// Bit 21: unused
pub const FLAG_CLIENT_CHARGES: u32 = 1 << 22;
pub const FLAG_IGNORE_LOOK: u32 = 1 << 23;
pub const FLAG_IS_ANIMATION: u32 = 1 << 24;
pub const FLAG_FULL_GROUND: u32 = 1 << 25;
pub const FLAG_FORCE_USE: u32 = 1 << 26;

/// Pack an item's boolean traits into the OTB flag word.
pub fn item_flags(item: &ServerItem) -> u32 {
    let bits = [
        (item.unpassable, FLAG_UNPASSABLE),
        (item.block_missiles, FLAG_BLOCK_MISSILES),
        (item.block_pathfinder, FLAG_BLOCK_PATHFINDER),
        (item.has_elevation, FLAG_HAS_ELEVATION),
        (item.force_use, FLAG_FORCE_USE),
        (item.multi_use, FLAG_MULTI_USE),
        (item.pickupable, FLAG_PICKUPABLE),
        (item.movable, FLAG_MOVABLE),
        (item.stackable, FLAG_STACKABLE),
        (item.stack_order != TileStackOrder::None, FLAG_STACK_ORDER),
        (item.readable, FLAG_READABLE),
        (item.rotatable, FLAG_ROTATABLE),
        (item.hangable, FLAG_HANGABLE),
        (item.hook_south, FLAG_HOOK_SOUTH),
        (item.hook_east, FLAG_HOOK_EAST),
        (item.has_charges, FLAG_CLIENT_CHARGES),
        (item.ignore_look, FLAG_IGNORE_LOOK),
        (item.allow_distance_read, FLAG_ALLOW_DISTANCE_READ),
        (item.is_animation, FLAG_IS_ANIMATION),
        (item.full_ground, FLAG_FULL_GROUND),
    ];

    bits.iter()
        .filter(|&&(set, _)| set)
        .fold(0u32, |acc, &(_, flag)| acc | flag)
}
