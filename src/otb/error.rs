use thiserror::Error;

/// Errors raised while encoding a catalog to OTB or XML.
#[derive(Debug, Error)]
pub enum OtbError {
    /// Catalog data that cannot be encoded (duplicate ids, overflowing build number, bad JSON)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Sink create, write, flush or persist failure
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A node was closed without being opened, or left open at finish
    #[error("Unbalanced node structure (open nodes: {depth})")]
    UnbalancedNode { depth: usize },

    /// A value that does not fit its wire representation
    #[error("Encoding error: {0}")]
    Encoding(String),
}

impl From<binrw::Error> for OtbError {
    fn from(err: binrw::Error) -> Self {
        match err {
            binrw::Error::Io(e) => OtbError::Io(e),
            other => OtbError::Encoding(other.to_string()),
        }
    }
}

impl From<tempfile::PersistError> for OtbError {
    fn from(err: tempfile::PersistError) -> Self {
        OtbError::Io(err.error)
    }
}

/// Result type for OTB operations
pub type Result<T> = std::result::Result<T, OtbError>;
