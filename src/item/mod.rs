pub mod catalog;

use serde::{Deserialize, Serialize};

/// Size of the MD5 digest of an item's sprite pixels.
pub const SPRITE_HASH_SIZE: usize = 16;

/// Structural classification of a server item.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
pub enum ServerItemType {
    #[default]
    None,
    Ground,
    Container,
    Fluid,
    Splash,
    Deprecated,
}

impl ServerItemType {
    pub fn name(self) -> &'static str {
        match self {
            ServerItemType::None => "None",
            ServerItemType::Ground => "Ground",
            ServerItemType::Container => "Container",
            ServerItemType::Fluid => "Fluid",
            ServerItemType::Splash => "Splash",
            ServerItemType::Deprecated => "Deprecated",
        }
    }
}

/// Draw order of an item on its tile.
#[repr(u8)]
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
pub enum TileStackOrder {
    #[default]
    None = 0,
    Border = 1,
    Bottom = 2,
    Top = 3,
}

impl TileStackOrder {
    pub fn name(self) -> &'static str {
        match self {
            TileStackOrder::None => "None",
            TileStackOrder::Border => "Border",
            TileStackOrder::Bottom => "Bottom",
            TileStackOrder::Top => "Top",
        }
    }
}

/// One server item definition.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
#[serde(default)]
pub struct ServerItem {
    pub id: u16,
    pub client_id: u16,
    pub trade_as: u16,
    #[serde(rename = "type")]
    pub item_type: ServerItemType,
    pub name: String,
    pub sprite_hash: [u8; SPRITE_HASH_SIZE],

    pub ground_speed: u16,
    pub minimap_color: u16,
    pub max_read_write_chars: u16,
    pub max_read_chars: u16,
    pub light_level: u16,
    pub light_color: u16,
    pub stack_order: TileStackOrder,

    pub unpassable: bool,
    pub block_missiles: bool,
    pub block_pathfinder: bool,
    pub has_elevation: bool,
    pub force_use: bool,
    pub multi_use: bool,
    pub pickupable: bool,
    pub movable: bool,
    pub stackable: bool,
    pub readable: bool,
    pub rotatable: bool,
    pub hangable: bool,
    pub hook_south: bool,
    pub hook_east: bool,
    pub has_charges: bool,
    pub ignore_look: bool,
    pub allow_distance_read: bool,
    pub is_animation: bool,
    pub full_ground: bool,
}

impl ServerItem {
    pub fn new(id: u16, item_type: ServerItemType) -> Self {
        Self {
            id,
            item_type,
            ..Default::default()
        }
    }

    /// Sprite hash as uppercase dash-separated hex pairs (`0A-1B-...`).
    pub fn sprite_hash_hex(&self) -> String {
        self.sprite_hash
            .iter()
            .map(|b| format!("{:02X}", b))
            .collect::<Vec<_>>()
            .join("-")
    }
}

/// The item catalog plus the version metadata stored in the OTB header.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
#[serde(default)]
pub struct ServerItemList {
    pub major_version: u32,
    pub minor_version: u32,
    pub build_number: u32,
    /// Client protocol version, `major * 100 + minor` (e.g. 1098).
    pub client_version: u32,
    pub items: Vec<ServerItem>,
}

impl ServerItemList {
    pub fn count(&self) -> usize {
        self.items.len()
    }
}
