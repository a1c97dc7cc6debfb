use std::io::Cursor;

use binrw::BinWrite;

use super::error::{OtbError, Result};
use crate::config::ExportConfig;
use crate::item::ServerItemList;

/// Fixed width of the CSD version string in the root header.
pub const CSD_VERSION_SIZE: usize = 128;

/// major(4) + minor(4) + build(4) + csd(128) = 140 bytes
pub const VERSION_INFO_SIZE: usize = 12 + CSD_VERSION_SIZE;

/// ASCII bytes of `s`, truncated or zero-padded to exactly 128 bytes.
fn csd_bytes(s: &str) -> [u8; CSD_VERSION_SIZE] {
    let mut fixed = [0u8; CSD_VERSION_SIZE];
    let len = s.len().min(CSD_VERSION_SIZE);
    fixed[..len].copy_from_slice(&s.as_bytes()[..len]);
    fixed
}

/// Version record stored in the root node.
#[derive(BinWrite, Debug, Clone, PartialEq, Eq)]
#[bw(little)]
pub struct VersionInfo {
    pub major_version: u32,
    pub minor_version: u32,
    pub build_number: u32,
    #[bw(map = |s: &String| csd_bytes(s))]
    pub csd_version: String,
}

impl VersionInfo {
    /// Derive the header for the next write of `list`: the build number is
    /// bumped by one, `list` itself is left untouched.
    pub fn for_catalog(list: &ServerItemList, config: &ExportConfig) -> Result<Self> {
        let major_version = config.major_version.unwrap_or(list.major_version);
        let minor_version = config.minor_version.unwrap_or(list.minor_version);
        let client_version = config.client_version.unwrap_or(list.client_version);
        let build_number = list.build_number.checked_add(1).ok_or_else(|| {
            OtbError::InvalidInput(format!(
                "build number {} cannot be incremented",
                list.build_number
            ))
        })?;

        let csd_version = format!(
            "OTB {}.{}.{}-{}.{}",
            major_version,
            minor_version,
            build_number,
            client_version / 100,
            client_version % 100
        );

        Ok(Self {
            major_version,
            minor_version,
            build_number,
            csd_version,
        })
    }

    /// The 140-byte `Version` property payload.
    pub fn payload(&self) -> Result<Vec<u8>> {
        if !self.csd_version.is_ascii() {
            return Err(OtbError::Encoding(format!(
                "CSD version is not ASCII: {:?}",
                self.csd_version
            )));
        }

        let mut cursor = Cursor::new(Vec::with_capacity(VERSION_INFO_SIZE));
        self.write_le(&mut cursor)?;
        Ok(cursor.into_inner())
    }
}
