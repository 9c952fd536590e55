//! The COLX coin adapter.

use crate::block::{read_header, read_signature};
use crate::config::ParserConfig;
use crate::network::get_chain_params;
use std::io::Cursor;
use utxo_support::block::{BlockHeader, RawTransaction};
use utxo_support::{ChainParser, NetworkParams, Result};

/// Bitcoin-family parser with COLX address versions and the PIVX block layout.
///
/// Transactions, scripts and the packed layout are the shared defaults;
/// only the block header and the proof-of-stake signature differ.
#[derive(Clone, Copy, Debug)]
pub struct ColxParser {
    params: &'static NetworkParams,
}

impl ColxParser {
    pub fn new(params: &'static NetworkParams) -> Self {
        Self { params }
    }

    /// Builds a parser for the chain name the node reports.
    pub fn for_chain(chain: &str) -> Result<Self> {
        get_chain_params(chain).map(Self::new)
    }

    pub fn from_config(config: &ParserConfig) -> Result<Self> {
        Self::for_chain(&config.network)
    }
}

impl ChainParser for ColxParser {
    fn params(&self) -> &NetworkParams {
        self.params
    }

    fn read_block_header(&self, cursor: &mut Cursor<&[u8]>) -> Result<BlockHeader> {
        read_header(cursor)
    }

    fn read_block_trailer(
        &self,
        cursor: &mut Cursor<&[u8]>,
        txs: &[RawTransaction],
    ) -> Result<Option<Vec<u8>>> {
        read_signature(cursor, txs)
    }
}
