//! Per-network constants consumed by the address codec.
//!
//! A `NetworkParams` value is immutable and passed explicitly into every
//! parser; nothing in this crate keeps a process-wide "current network".

use serde::Serialize;
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NetworkKind {
    Main,
    Test,
    Regtest,
}

impl NetworkKind {
    /// Maps a node-reported chain name (`getblockchaininfo.chain`) to a kind.
    pub fn from_chain_name(name: &str) -> Option<Self> {
        match name {
            "main" | "mainnet" | "livenet" => Some(NetworkKind::Main),
            "test" | "testnet" => Some(NetworkKind::Test),
            "regtest" => Some(NetworkKind::Regtest),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            NetworkKind::Main => "main",
            NetworkKind::Test => "test",
            NetworkKind::Regtest => "regtest",
        }
    }
}

impl fmt::Display for NetworkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct NetworkParams {
    pub network: NetworkKind,
    /// Message start bytes in wire order.
    pub magic: [u8; 4],
    pub p2pkh_prefix: u8,
    pub p2sh_prefix: u8,
}

impl NetworkParams {
    /// Magic as the little-endian `u32` that P2P headers carry.
    pub fn magic_u32(&self) -> u32 {
        u32::from_le_bytes(self.magic)
    }

    /// The script template an address version byte stands for, if any.
    pub fn template_for_prefix(&self, prefix: u8) -> Option<AddressTemplate> {
        if prefix == self.p2pkh_prefix {
            Some(AddressTemplate::PubKeyHash)
        } else if prefix == self.p2sh_prefix {
            Some(AddressTemplate::ScriptHash)
        } else {
            None
        }
    }
}

/// Locking-script templates that have a Base58Check address form.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AddressTemplate {
    PubKeyHash,
    ScriptHash,
}
