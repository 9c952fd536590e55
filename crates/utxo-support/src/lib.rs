//! # UTXO Support
//!
//! Chain-family codec shared by the coin adapters of the indexer: network
//! parameters, locking-script classification and Base58Check addresses, the
//! native transaction model with its packed storage form, and block decoding.
//!
//! A coin adapter implements [`parser::ChainParser`] with its own
//! [`network::NetworkParams`] and overrides only the pieces its wire format
//! changes.

pub mod address;
pub mod block;
pub mod error;
pub mod network;
pub mod parser;
pub mod transaction;
pub mod utils;

pub use address::{addresses_from_script, script_from_address, ScriptClass};
pub use block::{Block, BlockHeader, RawTransaction};
pub use error::{CodecError, Result};
pub use network::{NetworkKind, NetworkParams};
pub use parser::ChainParser;
pub use transaction::{ScriptPubKey, Tx, Vin, Vout};
