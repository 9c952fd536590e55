//! Ingestion driver: fetches raw payloads, decodes them and hands packed
//! transactions to storage.
//!
//! Node access and the storage engine live outside this crate; they are
//! reached only through [`BlockSource`] and [`PackedTxSink`].

use crate::parser::ColxParser;
use anyhow::{Context, Result};
use log::{info, warn};
use utxo_support::{Block, ChainParser, Tx};

/// Raw payload access, normally backed by the node's RPC interface.
pub trait BlockSource {
    fn block_by_height(&self, height: u32) -> Result<Vec<u8>>;
    fn transaction_by_id(&self, txid: &str) -> Result<Vec<u8>>;
}

/// Storage for packed transactions, keyed by txid.
pub trait PackedTxSink {
    /// Stores every entry or none of them; a block is handed over as one
    /// batch, so a failed write must not leave part of it behind.
    fn put_packed_batch(&mut self, batch: Vec<(String, Vec<u8>)>) -> Result<()>;

    fn put_packed_tx(&mut self, txid: &str, packed: Vec<u8>) -> Result<()> {
        self.put_packed_batch(vec![(txid.to_string(), packed)])
    }
}

pub struct ColxIndexer<S, K> {
    parser: ColxParser,
    source: S,
    sink: K,
}

impl<S: BlockSource, K: PackedTxSink> ColxIndexer<S, K> {
    pub fn new(parser: ColxParser, source: S, sink: K) -> Self {
        Self {
            parser,
            source,
            sink,
        }
    }

    pub fn parser(&self) -> &ColxParser {
        &self.parser
    }

    pub fn sink(&self) -> &K {
        &self.sink
    }

    /// Decodes and packs the whole block before anything is written, so a
    /// block that fails to decode leaves storage untouched. The packed
    /// transactions reach the sink as a single batch.
    pub fn index_block(&mut self, height: u32) -> Result<Block> {
        let raw = self
            .source
            .block_by_height(height)
            .with_context(|| format!("fetching block {}", height))?;
        let block = match self.parser.parse_block(&raw) {
            Ok(block) => block,
            Err(e) => {
                warn!("block {} rejected: {}", height, e);
                return Err(e).with_context(|| format!("decoding block {}", height));
            }
        };
        let packed = block
            .txs
            .iter()
            .map(|tx| -> Result<(String, Vec<u8>)> {
                Ok((tx.txid.clone(), self.parser.pack_tx(tx, height)?))
            })
            .collect::<Result<Vec<_>>>()
            .with_context(|| format!("packing block {}", height))?;
        self.sink
            .put_packed_batch(packed)
            .with_context(|| format!("storing block {}", height))?;
        info!(
            "indexed block {}: {} txs, {} bytes",
            height,
            block.txs.len(),
            block.size
        );
        Ok(block)
    }

    /// Fetches and stores a single transaction confirmed at `height`.
    pub fn index_transaction(&mut self, txid: &str, height: u32, block_time: i64) -> Result<Tx> {
        let raw = self
            .source
            .transaction_by_id(txid)
            .with_context(|| format!("fetching transaction {}", txid))?;
        let tx = self
            .parser
            .parse_tx(&raw)
            .with_context(|| format!("decoding transaction {}", txid))?
            .with_block_time(block_time);
        if tx.txid != txid {
            warn!("node returned {} when asked for {}", tx.txid, txid);
            anyhow::bail!("transaction id mismatch: expected {}, got {}", txid, tx.txid);
        }
        let packed = self.parser.pack_tx(&tx, height)?;
        self.sink.put_packed_tx(&tx.txid, packed)?;
        Ok(tx)
    }
}
