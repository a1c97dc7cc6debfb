//! Item schema: node groups, attribute tags and per-item property selection.

use crate::item::{ServerItem, ServerItemType, TileStackOrder, SPRITE_HASH_SIZE};

/// Group byte written after `NODE_START` for each item node.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerItemGroup {
    None = 0,
    Ground = 1,
    Container = 2,
    Splash = 11,
    Fluid = 12,
    Deprecated = 14,
}

impl From<ServerItemType> for ServerItemGroup {
    fn from(t: ServerItemType) -> Self {
        match t {
            ServerItemType::Container => ServerItemGroup::Container,
            ServerItemType::Fluid => ServerItemGroup::Fluid,
            ServerItemType::Ground => ServerItemGroup::Ground,
            ServerItemType::Splash => ServerItemGroup::Splash,
            ServerItemType::Deprecated => ServerItemGroup::Deprecated,
            ServerItemType::None => ServerItemGroup::None,
        }
    }
}

/// Properties of the root node.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RootAttribute {
    Version = 0x01,
}

/// Property tags of item nodes.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerItemAttribute {
    ServerId = 0x10,
    ClientId = 0x11,
    Name = 0x12,
    GroundSpeed = 0x14,
    SpriteHash = 0x20,
    MinimapColor = 0x21,
    MaxReadWriteChars = 0x22,
    MaxReadChars = 0x23,
    Light = 0x2A,
    StackOrder = 0x2B,
    TradeAs = 0x2D,
}

/// One tagged value of an item node, borrowing from the item it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemProperty<'a> {
    ServerId(u16),
    ClientId(u16),
    SpriteHash(&'a [u8; SPRITE_HASH_SIZE]),
    MinimapColor(u16),
    MaxReadWriteChars(u16),
    MaxReadChars(u16),
    Light { level: u16, color: u16 },
    GroundSpeed(u16),
    StackOrder(TileStackOrder),
    TradeAs(u16),
    Name(&'a str),
}

impl ItemProperty<'_> {
    pub fn attribute(&self) -> ServerItemAttribute {
        match self {
            ItemProperty::ServerId(_) => ServerItemAttribute::ServerId,
            ItemProperty::ClientId(_) => ServerItemAttribute::ClientId,
            ItemProperty::SpriteHash(_) => ServerItemAttribute::SpriteHash,
            ItemProperty::MinimapColor(_) => ServerItemAttribute::MinimapColor,
            ItemProperty::MaxReadWriteChars(_) => ServerItemAttribute::MaxReadWriteChars,
            ItemProperty::MaxReadChars(_) => ServerItemAttribute::MaxReadChars,
            ItemProperty::Light { .. } => ServerItemAttribute::Light,
            ItemProperty::GroundSpeed(_) => ServerItemAttribute::GroundSpeed,
            ItemProperty::StackOrder(_) => ServerItemAttribute::StackOrder,
            ItemProperty::TradeAs(_) => ServerItemAttribute::TradeAs,
            ItemProperty::Name(_) => ServerItemAttribute::Name,
        }
    }

    pub fn tag(&self) -> u8 {
        self.attribute() as u8
    }

    /// Little-endian payload bytes, unescaped.
    pub fn payload(&self) -> Vec<u8> {
        match self {
            ItemProperty::ServerId(v)
            | ItemProperty::ClientId(v)
            | ItemProperty::MinimapColor(v)
            | ItemProperty::MaxReadWriteChars(v)
            | ItemProperty::MaxReadChars(v)
            | ItemProperty::GroundSpeed(v)
            | ItemProperty::TradeAs(v) => v.to_le_bytes().to_vec(),
            ItemProperty::SpriteHash(hash) => hash.to_vec(),
            ItemProperty::Light { level, color } => {
                let mut buf = Vec::with_capacity(4);
                buf.extend_from_slice(&level.to_le_bytes());
                buf.extend_from_slice(&color.to_le_bytes());
                buf
            }
            ItemProperty::StackOrder(order) => vec![*order as u8],
            ItemProperty::Name(name) => name.as_bytes().to_vec(),
        }
    }
}

/// Select the properties written for `item`, in wire order.
///
/// Deprecated items carry only their server id.
pub fn encode_attributes(item: &ServerItem) -> Vec<ItemProperty<'_>> {
    let mut props = vec![ItemProperty::ServerId(item.id)];

    if item.item_type == ServerItemType::Deprecated {
        return props;
    }

    props.push(ItemProperty::ClientId(item.client_id));
    props.push(ItemProperty::SpriteHash(&item.sprite_hash));

    let optional = [
        (item.minimap_color != 0).then(|| ItemProperty::MinimapColor(item.minimap_color)),
        (item.max_read_write_chars != 0)
            .then(|| ItemProperty::MaxReadWriteChars(item.max_read_write_chars)),
        (item.max_read_chars != 0).then(|| ItemProperty::MaxReadChars(item.max_read_chars)),
        (item.light_level != 0 || item.light_color != 0).then(|| ItemProperty::Light {
            level: item.light_level,
            color: item.light_color,
        }),
        (item.item_type == ServerItemType::Ground)
            .then(|| ItemProperty::GroundSpeed(item.ground_speed)),
        (item.stack_order != TileStackOrder::None)
            .then(|| ItemProperty::StackOrder(item.stack_order)),
        (item.trade_as != 0).then(|| ItemProperty::TradeAs(item.trade_as)),
        (!item.name.is_empty()).then(|| ItemProperty::Name(item.name.as_str())),
    ];

    props.extend(optional.into_iter().flatten());
    props
}
