//! OTB catalog writer.
//!
//! File layout:
//!
//! ```text
//! u32 file version (0)
//! FE 00                      root node
//!   u32 flags (0)
//!   01 <len=140> VersionInfo
//!   FE <group> u32 flags <props...> FF     one node per item
//! FF
//! ```

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::{debug, info, trace};

use super::attributes::{encode_attributes, RootAttribute, ServerItemGroup};
use super::error::Result;
use super::flags::item_flags;
use super::tree_writer::BinaryTreeWriter;
use super::version::VersionInfo;
use crate::config::ExportConfig;
use crate::export::xml::{write_xml, XmlOptions};
use crate::item::{ServerItem, ServerItemList};

/// Value of the 4-byte preamble; always 0.
pub const OTB_FILE_VERSION: u32 = 0;

const ROOT_GROUP: u8 = 0;
const ROOT_FLAGS: u32 = 0;

/// Write to a temp file next to `path` and rename it into place only after
/// `write` succeeded. On failure the temp file is removed and `path` is left
/// as it was.
pub(crate) fn persist_atomically<F>(path: &Path, write: F) -> Result<()>
where
    F: FnOnce(&mut BufWriter<&mut File>) -> Result<()>,
{
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir)?;
    {
        let mut w = BufWriter::new(tmp.as_file_mut());
        write(&mut w)?;
        w.flush()?;
    }
    tmp.as_file().sync_all()?;
    tmp.persist(path)?;
    Ok(())
}

/// Serializes a [`ServerItemList`] to OTB (and, for convenience, to XML).
pub struct OtbWriter<'a> {
    items: &'a ServerItemList,
    config: ExportConfig,
}

impl<'a> OtbWriter<'a> {
    pub fn new(items: &'a ServerItemList) -> Self {
        Self::with_config(items, ExportConfig::default())
    }

    pub fn with_config(items: &'a ServerItemList, config: ExportConfig) -> Self {
        Self { items, config }
    }

    pub fn count(&self) -> usize {
        self.items.count()
    }

    /// The header that the next write will emit.
    pub fn version_info(&self) -> Result<VersionInfo> {
        VersionInfo::for_catalog(self.items, &self.config)
    }

    /// Write the OTB file to `path`. The destination is replaced atomically.
    pub fn write(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        persist_atomically(path, |w| self.write_to(w).map(|_| ()))?;
        info!(path = %path.display(), items = self.count(), "wrote OTB file");
        Ok(())
    }

    /// Write the XML mirror of the catalog to `path`.
    pub fn write_to_xml(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let version = self.version_info()?;
        let options = XmlOptions {
            indent: self.config.xml_indent,
        };
        persist_atomically(path, |w| write_xml(self.items, &version, w, &options))?;
        info!(path = %path.display(), items = self.count(), "wrote XML file");
        Ok(())
    }

    /// Serialize the whole catalog into `sink` and return it flushed.
    pub fn write_to<W: Write>(&self, sink: W) -> Result<W> {
        self.items.validate()?;
        let version = self.version_info()?;

        let mut writer = BinaryTreeWriter::new(sink);
        writer.write_file_version(OTB_FILE_VERSION)?;

        writer.open_node(ROOT_GROUP)?;
        writer.write_u32(ROOT_FLAGS)?;
        writer.write_prop(RootAttribute::Version as u8, &version.payload()?)?;
        debug!(
            major = version.major_version,
            minor = version.minor_version,
            build = version.build_number,
            csd = %version.csd_version,
            "wrote OTB version header"
        );

        for item in &self.items.items {
            write_item(&mut writer, item)?;
        }

        writer.close_node()?;
        writer.finish()
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        self.write_to(Vec::new())
    }
}

fn write_item<W: Write>(writer: &mut BinaryTreeWriter<W>, item: &ServerItem) -> Result<()> {
    let group = ServerItemGroup::from(item.item_type);
    let props = encode_attributes(item);
    trace!(id = item.id, ?group, props = props.len(), "writing item node");

    writer.open_node(group as u8)?;
    writer.write_u32(item_flags(item))?;
    for prop in &props {
        writer.write_prop(prop.tag(), &prop.payload())?;
    }
    writer.close_node()
}
