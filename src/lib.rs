//! Writers for OTB item catalogs.
//!
//! ```no_run
//! use otb_tools_lib::item::ServerItemList;
//! use otb_tools_lib::otb::OtbWriter;
//!
//! let items = ServerItemList::from_json_file("items.json").unwrap();
//! let writer = OtbWriter::new(&items);
//! writer.write("items.otb").unwrap();
//! writer.write_to_xml("items.xml").unwrap();
//! ```

pub mod config;
pub mod export;
pub mod item;
pub mod otb;
