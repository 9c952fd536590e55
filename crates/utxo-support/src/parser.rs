//! The seam between the generic codec and a coin adapter.
//!
//! Every default method implements the Bitcoin-family behaviour; an adapter
//! provides its `NetworkParams` and overrides only what its chain changes,
//! typically the block header and whatever follows the transaction list.

use crate::address;
use crate::block::{self, Block, BlockHeader, RawTransaction};
use crate::error::{CodecError, Result};
use crate::transaction::{self, Tx};
use crate::utils::remaining_slice;
use bitcoin::ScriptBuf;
use log::debug;
use std::io::Cursor;

pub trait ChainParser {
    fn params(&self) -> &crate::network::NetworkParams;

    /// Addresses able to redeem `script`, and whether more than one key is
    /// involved. An empty list is a normal result.
    fn addresses_from_script(&self, script: &[u8]) -> (Vec<String>, bool) {
        address::addresses_from_script(script, self.params())
    }

    fn script_from_address(&self, address: &str) -> Result<ScriptBuf> {
        address::script_from_address(address, self.params())
    }

    /// Parses a buffer holding exactly one native transaction.
    fn parse_tx(&self, raw: &[u8]) -> Result<Tx> {
        let native = transaction::decode_native(raw)?;
        Ok(Tx::from_consensus(&native, raw.to_vec(), &|script| {
            self.addresses_from_script(script)
        }))
    }

    fn pack_tx(&self, tx: &Tx, height: u32) -> Result<Vec<u8>> {
        transaction::pack_tx(tx, height)
    }

    fn unpack_tx(&self, buf: &[u8]) -> Result<(Tx, u32)> {
        let (height, block_time, raw) = transaction::split_packed(buf)?;
        let tx = self.parse_tx(raw)?.with_block_time(block_time);
        Ok((tx, height))
    }

    fn read_block_header(&self, cursor: &mut Cursor<&[u8]>) -> Result<BlockHeader> {
        block::read_bitcoin_header(cursor)
    }

    /// Reads whatever the chain appends after the transaction list.
    fn read_block_trailer(
        &self,
        _cursor: &mut Cursor<&[u8]>,
        _txs: &[RawTransaction],
    ) -> Result<Option<Vec<u8>>> {
        Ok(None)
    }

    /// Decodes a whole block; any failure discards everything decoded so far.
    fn parse_block(&self, raw: &[u8]) -> Result<Block> {
        let mut cursor = Cursor::new(raw);
        let header = self.read_block_header(&mut cursor)?;
        let natives = block::read_transactions(&mut cursor)?;
        let signature = self.read_block_trailer(&mut cursor, &natives)?;
        let trailing = remaining_slice(&cursor).len();
        if trailing != 0 {
            return Err(CodecError::TrailingBytes(trailing));
        }
        let time = header.time;
        let txs = natives
            .into_iter()
            .map(|RawTransaction { tx, raw: bytes }| {
                Tx::from_consensus(&tx, bytes, &|script| self.addresses_from_script(script))
                    .with_block_time(time)
            })
            .collect::<Vec<_>>();
        debug!(
            "decoded block: {} bytes, {} txs, version {}, time {}",
            raw.len(),
            txs.len(),
            header.version,
            time
        );
        Ok(Block {
            size: raw.len(),
            time,
            header,
            signature,
            txs,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::{NetworkKind, NetworkParams};
    use pretty_assertions::assert_eq;

    struct BitcoinParser(NetworkParams);

    impl ChainParser for BitcoinParser {
        fn params(&self) -> &NetworkParams {
            &self.0
        }
    }

    fn parser() -> BitcoinParser {
        BitcoinParser(NetworkParams {
            network: NetworkKind::Main,
            magic: [0xf9, 0xbe, 0xb4, 0xd9],
            p2pkh_prefix: 0x00,
            p2sh_prefix: 0x05,
        })
    }

    const GENESIS: &str = "0100000000000000000000000000000000000000000000000000000000000000000000003ba3edfd7a7b12b27ac72c3e67768f617fc81bc3888a51323a9fb8aa4b1e5e4a29ab5f49ffff001d1dac2b7c0101000000010000000000000000000000000000000000000000000000000000000000000000ffffffff4d04ffff001d0104455468652054696d65732030332f4a616e2f32303039204368616e63656c6c6f72206f6e206272696e6b206f66207365636f6e64206261696c6f757420666f722062616e6b73ffffffff0100f2052a01000000434104678afdb0fe5548271967f1a67130b7105cd6a828e03909a67962e0ea1f61deb649f6bc3f4cef38c4f35504e51ec112de5c384df7ba0b8d578a4c702b6bf11d5fac00000000";

    #[test]
    fn test_parse_genesis_block() {
        let raw = hex::decode(GENESIS).unwrap();
        let block = parser().parse_block(&raw).unwrap();
        assert_eq!(block.size, 285);
        assert_eq!(block.time, 1231006505);
        assert_eq!(block.signature, None);
        assert_eq!(block.txs.len(), 1);
        let coinbase = &block.txs[0];
        assert_eq!(
            coinbase.txid,
            "4a5e1e4baab89f3a32518a88c31bc87f618f76673e2cc77ab2127b7afdeda33b"
        );
        assert_eq!(coinbase.block_time, 1231006505);
        assert!(coinbase.vin[0].coinbase.is_some());
        assert_eq!(
            coinbase.vout[0].script_pubkey.addresses,
            vec!["1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNa".to_string()]
        );
    }

    #[test]
    fn test_trailing_bytes_rejected() {
        let mut raw = hex::decode(GENESIS).unwrap();
        raw.extend_from_slice(&[0, 0]);
        assert!(matches!(
            parser().parse_block(&raw),
            Err(CodecError::TrailingBytes(2))
        ));
    }

    #[test]
    fn test_block_is_atomic() {
        let raw = hex::decode(GENESIS).unwrap();
        // drop the lock time of the only transaction
        assert!(matches!(
            parser().parse_block(&raw[..raw.len() - 4]),
            Err(CodecError::TruncatedBlock(_))
        ));
    }

    #[test]
    fn test_unpack_restores_height_and_time() {
        let raw = hex::decode(GENESIS).unwrap();
        let p = parser();
        let tx = p.parse_block(&raw).unwrap().txs.remove(0);
        let packed = p.pack_tx(&tx, 0).unwrap();
        let (unpacked, height) = p.unpack_tx(&packed).unwrap();
        assert_eq!(height, 0);
        assert_eq!(unpacked, tx);
    }
}
