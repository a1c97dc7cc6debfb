//! Node-tree writer for the OTB container format.
//!
//! An OTB stream is a tree of nodes. Each node is framed by `NODE_START`
//! and `NODE_END` markers and starts with a one-byte group tag. Everything
//! between the markers is node data; any data byte that collides with one of
//! the three reserved values is prefixed with `ESCAPE_CHAR`:
//!
//! ```text
//! FE <group> <data...> [FE <group> <data...> FF]* FF
//! ```
//!
//! Properties inside a node body are framed as `tag(1) + length(2) + payload`,
//! all of which go through the same escaping filter.

use std::io::Write;

use super::error::{OtbError, Result};

/// Marks the start of a node.
pub const NODE_START: u8 = 0xFE;
/// Marks the end of a node.
pub const NODE_END: u8 = 0xFF;
/// Prefixes a data byte that would otherwise read as a marker.
pub const ESCAPE_CHAR: u8 = 0xFD;

#[inline]
fn is_reserved(b: u8) -> bool {
    b == NODE_START || b == NODE_END || b == ESCAPE_CHAR
}

/// Append `data` to `out`, escaping reserved bytes.
pub fn escape_into(out: &mut Vec<u8>, data: &[u8]) {
    out.reserve(data.len());
    for &b in data {
        if is_reserved(b) {
            out.push(ESCAPE_CHAR);
        }
        out.push(b);
    }
}

/// Append-only writer that frames nodes and escapes data.
///
/// Nodes must be closed in LIFO order; [`BinaryTreeWriter::finish`] refuses to
/// hand back the sink while any node is still open.
pub struct BinaryTreeWriter<W: Write> {
    sink: W,
    open_nodes: Vec<u8>,
    started: bool,
    scratch: Vec<u8>,
}

impl<W: Write> BinaryTreeWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            sink,
            open_nodes: Vec::new(),
            started: false,
            scratch: Vec::new(),
        }
    }

    /// Number of currently open nodes.
    pub fn depth(&self) -> usize {
        self.open_nodes.len()
    }

    /// Write the 4-byte file preamble. It sits outside the node tree and is
    /// written verbatim.
    pub fn write_file_version(&mut self, version: u32) -> Result<()> {
        if self.started {
            return Err(OtbError::Encoding(
                "file version must precede the first node".to_string(),
            ));
        }
        self.sink.write_all(&version.to_le_bytes())?;
        Ok(())
    }

    pub fn open_node(&mut self, group: u8) -> Result<()> {
        self.started = true;
        self.sink.write_all(&[NODE_START])?;
        self.write_escaped(&[group])?;
        self.open_nodes.push(group);
        Ok(())
    }

    pub fn close_node(&mut self) -> Result<()> {
        if self.open_nodes.pop().is_none() {
            return Err(OtbError::UnbalancedNode { depth: 0 });
        }
        self.sink.write_all(&[NODE_END])?;
        Ok(())
    }

    /// Untagged data in the current node body.
    pub fn write_raw(&mut self, bytes: &[u8]) -> Result<()> {
        self.write_escaped(bytes)
    }

    pub fn write_u8(&mut self, v: u8) -> Result<()> {
        self.write_escaped(&[v])
    }

    pub fn write_u16(&mut self, v: u16) -> Result<()> {
        self.write_escaped(&v.to_le_bytes())
    }

    pub fn write_u32(&mut self, v: u32) -> Result<()> {
        self.write_escaped(&v.to_le_bytes())
    }

    /// Raw string bytes, no length prefix and no terminator.
    pub fn write_str(&mut self, s: &str) -> Result<()> {
        self.write_escaped(s.as_bytes())
    }

    /// Tagged property: `tag`, `u16` payload length, payload.
    pub fn write_prop(&mut self, tag: u8, payload: &[u8]) -> Result<()> {
        let len = u16::try_from(payload.len()).map_err(|_| {
            OtbError::Encoding(format!(
                "property 0x{:02X} payload is {} bytes (max {})",
                tag,
                payload.len(),
                u16::MAX
            ))
        })?;

        self.scratch.clear();
        escape_into(&mut self.scratch, &[tag]);
        escape_into(&mut self.scratch, &len.to_le_bytes());
        escape_into(&mut self.scratch, payload);
        self.sink.write_all(&self.scratch)?;
        Ok(())
    }

    /// Check that every node is closed, flush, and hand back the sink.
    pub fn finish(mut self) -> Result<W> {
        if !self.open_nodes.is_empty() {
            return Err(OtbError::UnbalancedNode {
                depth: self.open_nodes.len(),
            });
        }
        self.sink.flush()?;
        Ok(self.sink)
    }

    fn write_escaped(&mut self, data: &[u8]) -> Result<()> {
        self.scratch.clear();
        escape_into(&mut self.scratch, data);
        self.sink.write_all(&self.scratch)?;
        Ok(())
    }
}
