use crate::indexer::{BlockSource, PackedTxSink};
use anyhow::{anyhow, Result};
use std::collections::BTreeMap;

/// Block 10000 of a mainnet-shaped chain: version 3 header, coinbase only.
pub const BLOCK_10000: &str = include_str!("./blocks/colx_10000.hex");
/// Version 4 proof-of-stake block: accumulator checkpoint, coinstake, signature.
pub const BLOCK_POS: &str = include_str!("./blocks/colx_pos.hex");

pub const COINBASE_10000: &str = "01000000010000000000000000000000000000000000000000000000000000000000000000ffffffff4b02102704fe2fd15908fabe6d6de11302ffffffff978c82600e136c1290a81b27526449d7d26f936ce957487c0c01000000000000003ffffffd4a0000000d2f6e6f64655374726174756d2f000000000100671a4c370000001976a914963c3306f96c2d2b70c89023480c6bbad7d6f0f788ac00000000";
pub const COINBASE_10000_TXID: &str =
    "835302f89d29e0f3b2a788d513964d937fa04144bdc6ae1c007bd47e3423e0c2";
pub const BLOCK_10000_TIME: i64 = 1506881534;

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn block_bytes(dump: &str) -> Vec<u8> {
    hex::decode(dump.trim()).expect("fixture hex")
}

#[derive(Default)]
pub struct MemorySource {
    pub blocks: BTreeMap<u32, Vec<u8>>,
    pub transactions: BTreeMap<String, Vec<u8>>,
}

impl MemorySource {
    pub fn with_block(mut self, height: u32, raw: Vec<u8>) -> Self {
        self.blocks.insert(height, raw);
        self
    }

    pub fn with_transaction(mut self, txid: &str, raw: Vec<u8>) -> Self {
        self.transactions.insert(txid.to_string(), raw);
        self
    }
}

impl BlockSource for MemorySource {
    fn block_by_height(&self, height: u32) -> Result<Vec<u8>> {
        self.blocks
            .get(&height)
            .cloned()
            .ok_or_else(|| anyhow!("no block at height {}", height))
    }

    fn transaction_by_id(&self, txid: &str) -> Result<Vec<u8>> {
        self.transactions
            .get(txid)
            .cloned()
            .ok_or_else(|| anyhow!("no transaction {}", txid))
    }
}

#[derive(Default)]
pub struct MemorySink {
    pub packed: BTreeMap<String, Vec<u8>>,
    pub batches: usize,
    /// Reject every write, leaving `packed` as it was.
    pub read_only: bool,
}

impl PackedTxSink for MemorySink {
    fn put_packed_batch(&mut self, batch: Vec<(String, Vec<u8>)>) -> Result<()> {
        if self.read_only {
            return Err(anyhow!("sink is read-only"));
        }
        self.batches += 1;
        self.packed.extend(batch);
        Ok(())
    }
}
