//! Block model and the Bitcoin-format pieces block decoders are built from.

use crate::error::{CodecError, Result};
use crate::transaction::Tx;
use crate::utils::{consensus_decode, is_eof, remaining_slice};
use bitcoin::consensus::deserialize_partial;
use bitcoin::consensus::encode::VarInt;
use bitcoin::Transaction;
use serde::{Deserialize, Serialize};
use std::io::{BufRead, Cursor};

pub const HEADER_LEN: usize = 80;

/// version, empty input list, empty output list, lock time
pub const MIN_TX_LEN: usize = 10;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockHeader {
    pub version: i32,
    pub prev_hash: String,
    pub merkle_root: String,
    pub time: i64,
    pub bits: u32,
    pub nonce: u32,
    /// PIVX-family zerocoin accumulator checkpoint, present on extended headers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accumulator_checkpoint: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    /// Byte length of the raw payload.
    pub size: usize,
    pub time: i64,
    pub header: BlockHeader,
    /// Proof-of-stake block signature, when the chain carries one.
    #[serde(default, skip_serializing_if = "Option::is_none", with = "opt_hex")]
    pub signature: Option<Vec<u8>>,
    pub txs: Vec<Tx>,
}

/// A transaction as read from a block, with the exact bytes it came from.
#[derive(Clone, Debug)]
pub struct RawTransaction {
    pub tx: Transaction,
    pub raw: Vec<u8>,
}

fn block_error(err: bitcoin::consensus::encode::Error, what: &str) -> CodecError {
    if is_eof(&err) {
        CodecError::TruncatedBlock(format!("{}: {}", what, err))
    } else {
        CodecError::MalformedTransaction(format!("{}: {}", what, err))
    }
}

/// Reads the standard 80-byte header.
pub fn read_bitcoin_header(cursor: &mut Cursor<&[u8]>) -> Result<BlockHeader> {
    let header: bitcoin::block::Header =
        consensus_decode(cursor).map_err(|e| block_error(e, "block header"))?;
    Ok(BlockHeader {
        version: header.version.to_consensus(),
        prev_hash: header.prev_blockhash.to_string(),
        merkle_root: header.merkle_root.to_string(),
        time: header.time as i64,
        bits: header.bits.to_consensus(),
        nonce: header.nonce,
        accumulator_checkpoint: None,
    })
}

/// Reads the transaction count and that many native transactions.
pub fn read_transactions(cursor: &mut Cursor<&[u8]>) -> Result<Vec<RawTransaction>> {
    let count = consensus_decode::<VarInt>(cursor)
        .map_err(|e| block_error(e, "transaction count"))?
        .0;
    let available = remaining_slice(cursor).len();
    if count > (available / MIN_TX_LEN) as u64 {
        return Err(CodecError::TruncatedBlock(format!(
            "{} transactions declared, {} bytes left",
            count, available
        )));
    }
    let mut txs = Vec::with_capacity(count as usize);
    for index in 0..count {
        let slice = remaining_slice(cursor);
        let (tx, consumed) = deserialize_partial::<Transaction>(slice)
            .map_err(|e| block_error(e, &format!("transaction {} of {}", index, count)))?;
        txs.push(RawTransaction {
            tx,
            raw: slice[..consumed].to_vec(),
        });
        cursor.consume(consumed);
    }
    Ok(txs)
}

/// Reads a fixed-size field, reporting truncation as a block error.
pub fn read_array<const N: usize>(cursor: &mut Cursor<&[u8]>, what: &str) -> Result<[u8; N]> {
    let slice = remaining_slice(cursor);
    if slice.len() < N {
        return Err(CodecError::TruncatedBlock(format!(
            "{}: need {} bytes, {} left",
            what,
            N,
            slice.len()
        )));
    }
    let mut out = [0u8; N];
    out.copy_from_slice(&slice[..N]);
    cursor.consume(N);
    Ok(out)
}

/// Reads a varint-prefixed byte vector.
pub fn read_bytes(cursor: &mut Cursor<&[u8]>, what: &str) -> Result<Vec<u8>> {
    consensus_decode::<Vec<u8>>(cursor).map_err(|e| block_error(e, what))
}

mod opt_hex {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Option<Vec<u8>>, s: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(bytes) => s.serialize_str(&hex::encode(bytes)),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Vec<u8>>, D::Error> {
        Option::<String>::deserialize(d)?
            .map(|s| hex::decode(s).map_err(serde::de::Error::custom))
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // bitcoin genesis block
    const GENESIS: &str = "0100000000000000000000000000000000000000000000000000000000000000000000003ba3edfd7a7b12b27ac72c3e67768f617fc81bc3888a51323a9fb8aa4b1e5e4a29ab5f49ffff001d1dac2b7c0101000000010000000000000000000000000000000000000000000000000000000000000000ffffffff4d04ffff001d0104455468652054696d65732030332f4a616e2f32303039204368616e63656c6c6f72206f6e206272696e6b206f66207365636f6e64206261696c6f757420666f722062616e6b73ffffffff0100f2052a01000000434104678afdb0fe5548271967f1a67130b7105cd6a828e03909a67962e0ea1f61deb649f6bc3f4cef38c4f35504e51ec112de5c384df7ba0b8d578a4c702b6bf11d5fac00000000";

    #[test]
    fn test_read_bitcoin_header() {
        let raw = hex::decode(GENESIS).unwrap();
        let mut cursor = Cursor::new(&raw[..]);
        let header = read_bitcoin_header(&mut cursor).unwrap();
        assert_eq!(cursor.position() as usize, HEADER_LEN);
        assert_eq!(header.version, 1);
        assert_eq!(header.time, 1231006505);
        assert_eq!(header.bits, 0x1d00ffff);
        assert_eq!(header.nonce, 2083236893);
        assert_eq!(
            header.merkle_root,
            "4a5e1e4baab89f3a32518a88c31bc87f618f76673e2cc77ab2127b7afdeda33b"
        );
        let txs = read_transactions(&mut cursor).unwrap();
        assert_eq!(txs.len(), 1);
        assert_eq!(txs[0].raw.len(), raw.len() - HEADER_LEN - 1);
        assert!(remaining_slice(&cursor).is_empty());
    }

    #[test]
    fn test_truncated_header() {
        let raw = hex::decode(GENESIS).unwrap();
        let mut cursor = Cursor::new(&raw[..40]);
        assert!(matches!(
            read_bitcoin_header(&mut cursor),
            Err(CodecError::TruncatedBlock(_))
        ));
    }

    #[test]
    fn test_count_larger_than_payload() {
        let data = [0xfd, 0xff, 0x00, 0x01, 0x00, 0x00, 0x00];
        let mut cursor = Cursor::new(&data[..]);
        assert!(matches!(
            read_transactions(&mut cursor),
            Err(CodecError::TruncatedBlock(_))
        ));
    }

    #[test]
    fn test_read_array_and_bytes() {
        let data = [0x02, 0xaa, 0xbb, 0x01, 0x02, 0x03];
        let mut cursor = Cursor::new(&data[..]);
        assert_eq!(read_bytes(&mut cursor, "sig").unwrap(), vec![0xaa, 0xbb]);
        assert_eq!(read_array::<3>(&mut cursor, "tail").unwrap(), [1, 2, 3]);
        assert!(matches!(
            read_array::<1>(&mut cursor, "more"),
            Err(CodecError::TruncatedBlock(_))
        ));
    }
}
