//! Error types for the transaction, address and block codec.

/// Result alias used by every codec operation.
pub type Result<T> = std::result::Result<T, CodecError>;

/// Failures raised while decoding or encoding chain data.
///
/// None of these are retried: decoding the same bytes again can never
/// succeed, so the caller decides whether to skip or abort.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// The configured chain name is not in the parameter table.
    #[error("unknown network: {0}")]
    UnknownNetwork(String),

    /// Base58Check checksum mismatch.
    #[error("invalid address {0}: checksum mismatch")]
    InvalidAddress(String),

    /// The address version byte matches no template of the active network.
    #[error("address {address} has version byte {version:#04x} unknown to this network")]
    UnknownAddressVersion { address: String, version: u8 },

    /// Wrong length or characters outside the Base58 alphabet.
    #[error("malformed address {address}: {reason}")]
    MalformedAddress { address: String, reason: String },

    /// The packed buffer ends before the native transaction does.
    #[error("truncated buffer: {0}")]
    TruncatedBuffer(String),

    /// The native transaction body is structurally invalid.
    #[error("malformed transaction: {0}")]
    MalformedTransaction(String),

    /// The block ends before its declared contents do.
    #[error("truncated block: {0}")]
    TruncatedBlock(String),

    /// Bytes left over once the block was fully decoded.
    #[error("{0} trailing bytes after block payload")]
    TrailingBytes(usize),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CodecError {
    pub(crate) fn malformed_address(address: &str, reason: impl Into<String>) -> Self {
        CodecError::MalformedAddress {
            address: address.to_string(),
            reason: reason.into(),
        }
    }
}
