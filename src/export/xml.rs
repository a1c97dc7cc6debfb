//! Flat XML dump of an item catalog.
//!
//! Mirrors the fields of the OTB file as plain elements; booleans are written
//! as `true`/`false` and sprite hashes as dash-separated hex pairs.

use std::io::Write;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use tracing::debug;

use crate::item::{ServerItem, ServerItemList, TileStackOrder};
use crate::otb::{OtbError, Result, VersionInfo};

#[derive(Debug, Clone, Copy)]
pub struct XmlOptions {
    pub indent: usize,
}

impl Default for XmlOptions {
    fn default() -> Self {
        Self { indent: 2 }
    }
}

/// XML 1.0 `Char` production.
fn is_xml_char(c: char) -> bool {
    matches!(c, '\t' | '\n' | '\r')
        || matches!(c, '\u{20}'..='\u{D7FF}' | '\u{E000}'..='\u{FFFD}' | '\u{10000}'..)
}

fn check_text(name: &str, value: &str) -> Result<()> {
    match value.chars().find(|&c| !is_xml_char(c)) {
        Some(c) => Err(OtbError::Encoding(format!(
            "<{}> contains U+{:04X}, which XML 1.0 cannot represent",
            name, c as u32
        ))),
        None => Ok(()),
    }
}

struct XmlOut<W: Write> {
    writer: Writer<W>,
}

impl<W: Write> XmlOut<W> {
    fn event(&mut self, event: Event<'_>) -> Result<()> {
        self.writer.write_event(event).map_err(OtbError::Io)
    }

    fn start(&mut self, start: BytesStart<'_>) -> Result<()> {
        self.event(Event::Start(start))
    }

    fn end(&mut self, name: &str) -> Result<()> {
        self.event(Event::End(BytesEnd::new(name)))
    }

    fn element(&mut self, name: &str, value: &str) -> Result<()> {
        check_text(name, value)?;
        self.start(BytesStart::new(name))?;
        self.event(Event::Text(BytesText::new(value)))?;
        self.end(name)
    }

    fn flag(&mut self, name: &str, value: bool) -> Result<()> {
        self.element(name, if value { "true" } else { "false" })
    }
}

/// Write `list` as an indented XML document. `version` is the derived header
/// (same one the OTB writer emits).
pub fn write_xml<W: Write>(
    list: &ServerItemList,
    version: &VersionInfo,
    sink: W,
    options: &XmlOptions,
) -> Result<()> {
    let mut out = XmlOut {
        writer: Writer::new_with_indent(sink, b' ', options.indent),
    };

    out.event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;
    out.start(BytesStart::new("Items"))?;

    out.start(BytesStart::new("VersionInfo"))?;
    out.element("MajorVersion", &version.major_version.to_string())?;
    out.element("MinorVersion", &version.minor_version.to_string())?;
    out.element("BuildNumber", &version.build_number.to_string())?;
    out.element("CSDVersion", &version.csd_version)?;
    out.end("VersionInfo")?;

    for item in &list.items {
        write_item(&mut out, item)?;
    }

    out.end("Items")?;

    let mut sink = out.writer.into_inner();
    sink.write_all(b"\n")?;
    sink.flush()?;

    debug!(items = list.count(), "wrote XML document");
    Ok(())
}

fn write_item<W: Write>(out: &mut XmlOut<W>, item: &ServerItem) -> Result<()> {
    let id = item.id.to_string();
    out.start(BytesStart::new("Item").with_attributes([("ID", id.as_str())]))?;

    out.element("Type", item.item_type.name())?;
    out.element("ClientID", &item.client_id.to_string())?;
    out.element("Name", &item.name)?;
    out.element("TradeAs", &item.trade_as.to_string())?;
    out.element("GroundSpeed", &item.ground_speed.to_string())?;
    out.element("SpriteHash", &item.sprite_hash_hex())?;
    out.element("MinimapColor", &item.minimap_color.to_string())?;
    out.element("MaxReadWriteChars", &item.max_read_write_chars.to_string())?;
    out.element("MaxReadChars", &item.max_read_chars.to_string())?;
    out.element("LightLevel", &item.light_level.to_string())?;
    out.element("LightColor", &item.light_color.to_string())?;
    out.element("StackOrder", item.stack_order.name())?;

    out.flag("Unpassable", item.unpassable)?;
    out.flag("BlockMissiles", item.block_missiles)?;
    out.flag("BlockPathfinder", item.block_pathfinder)?;
    out.flag("HasElevation", item.has_elevation)?;
    out.flag("ForceUse", item.force_use)?;
    out.flag("MultiUse", item.multi_use)?;
    out.flag("Pickupable", item.pickupable)?;
    out.flag("Movable", item.movable)?;
    out.flag("Stackable", item.stackable)?;
    out.flag("StackOrderFlag", item.stack_order != TileStackOrder::None)?;
    out.flag("Readable", item.readable)?;
    out.flag("Rotatable", item.rotatable)?;
    out.flag("Hangable", item.hangable)?;
    out.flag("HookSouth", item.hook_south)?;
    out.flag("HookEast", item.hook_east)?;
    out.flag("HasCharges", item.has_charges)?;
    out.flag("IgnoreLook", item.ignore_look)?;
    out.flag("AllowDistanceRead", item.allow_distance_read)?;
    out.flag("IsAnimation", item.is_animation)?;
    out.flag("FullGround", item.full_ground)?;

    out.end("Item")
}
