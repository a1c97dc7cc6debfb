//! OTB ("Open Tibia Binary") item catalog encoding.
//!
//! Layered as a generic node-tree framing ([`tree_writer`]) under the item
//! schema ([`attributes`], [`flags`]) with [`writer::OtbWriter`] driving both
//! across a whole [`crate::item::ServerItemList`].

pub mod attributes;
pub mod flags;
pub mod tree_writer;
pub mod version;
pub mod writer;

mod error;

pub use attributes::{encode_attributes, ItemProperty, RootAttribute, ServerItemAttribute, ServerItemGroup};
pub use error::{OtbError, Result};
pub use flags::item_flags;
pub use tree_writer::{BinaryTreeWriter, ESCAPE_CHAR, NODE_END, NODE_START};
pub use version::{VersionInfo, CSD_VERSION_SIZE, VERSION_INFO_SIZE};
pub use writer::{OtbWriter, OTB_FILE_VERSION};
