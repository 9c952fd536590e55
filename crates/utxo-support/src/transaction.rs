//! Native transaction model and the packed storage layout.
//!
//! Packed layout: `[height: u32 BE][block time: SLEB128][native tx bytes]`.
//! Output addresses are never stored; they are re-derived on every decode.

use crate::error::{CodecError, Result};
use crate::utils::{is_eof, remaining_slice};
use bitcoin::consensus::deserialize_partial;
use bitcoin::Transaction;
use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};
use serde::{Deserialize, Serialize};
use std::io::Cursor;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptPubKey {
    pub hex: String,
    #[serde(default)]
    pub addresses: Vec<String>,
    /// More than one key can redeem the output; `addresses` is not an
    /// exhaustive owner list.
    #[serde(default)]
    pub ambiguous: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vin {
    /// Coinbase script hex; set only on the coinbase input.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coinbase: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub txid: Option<String>,
    pub vout: u32,
    #[serde(default)]
    pub script_sig: String,
    pub sequence: u32,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vout {
    /// Amount in the smallest currency unit.
    pub value_sat: u64,
    pub n: u32,
    pub script_pubkey: ScriptPubKey,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tx {
    /// Native serialized bytes, exactly as received from the node.
    #[serde(with = "hex::serde")]
    pub hex: Vec<u8>,
    pub txid: String,
    pub version: i32,
    pub lock_time: u32,
    pub vin: Vec<Vin>,
    pub vout: Vec<Vout>,
    pub block_time: i64,
    pub time: i64,
}

impl Tx {
    /// Builds the indexer view of a decoded transaction, resolving output
    /// addresses through `resolve`.
    pub fn from_consensus(
        tx: &Transaction,
        raw: Vec<u8>,
        resolve: &dyn Fn(&[u8]) -> (Vec<String>, bool),
    ) -> Self {
        let coinbase = tx.is_coinbase();
        let vin = tx
            .input
            .iter()
            .map(|input| {
                if coinbase {
                    Vin {
                        coinbase: Some(hex::encode(input.script_sig.as_bytes())),
                        sequence: input.sequence.0,
                        ..Default::default()
                    }
                } else {
                    Vin {
                        coinbase: None,
                        txid: Some(input.previous_output.txid.to_string()),
                        vout: input.previous_output.vout,
                        script_sig: hex::encode(input.script_sig.as_bytes()),
                        sequence: input.sequence.0,
                    }
                }
            })
            .collect();
        let vout = tx
            .output
            .iter()
            .enumerate()
            .map(|(n, output)| {
                let script = output.script_pubkey.as_bytes();
                let (addresses, ambiguous) = resolve(script);
                Vout {
                    value_sat: output.value.to_sat(),
                    n: n as u32,
                    script_pubkey: ScriptPubKey {
                        hex: hex::encode(script),
                        addresses,
                        ambiguous,
                    },
                }
            })
            .collect();
        Tx {
            hex: raw,
            txid: tx.compute_txid().to_string(),
            version: tx.version.0,
            lock_time: tx.lock_time.to_consensus_u32(),
            vin,
            vout,
            block_time: 0,
            time: 0,
        }
    }

    pub fn with_block_time(mut self, block_time: i64) -> Self {
        self.block_time = block_time;
        self.time = block_time;
        self
    }
}

pub(crate) fn tx_error(err: bitcoin::consensus::encode::Error) -> CodecError {
    if is_eof(&err) {
        CodecError::TruncatedBuffer(err.to_string())
    } else {
        CodecError::MalformedTransaction(err.to_string())
    }
}

/// Decodes a buffer holding exactly one native transaction.
pub fn decode_native(raw: &[u8]) -> Result<Transaction> {
    let (tx, consumed) = deserialize_partial::<Transaction>(raw).map_err(tx_error)?;
    if consumed != raw.len() {
        return Err(CodecError::MalformedTransaction(format!(
            "{} bytes left after transaction",
            raw.len() - consumed
        )));
    }
    Ok(tx)
}

pub fn pack_tx(tx: &Tx, height: u32) -> Result<Vec<u8>> {
    let mut buf = Vec::with_capacity(4 + 10 + tx.hex.len());
    buf.write_u32::<BigEndian>(height)?;
    leb128::write::signed(&mut buf, tx.block_time)?;
    buf.extend_from_slice(&tx.hex);
    Ok(buf)
}

/// Splits a packed buffer into height, block time and the native body.
pub fn split_packed(buf: &[u8]) -> Result<(u32, i64, &[u8])> {
    let mut cursor = Cursor::new(buf);
    let height = cursor.read_u32::<BigEndian>().map_err(|_| {
        CodecError::TruncatedBuffer(format!("{} byte buffer has no height", buf.len()))
    })?;
    let block_time = leb128::read::signed(&mut cursor).map_err(|e| match e {
        leb128::read::Error::IoError(e) => {
            CodecError::TruncatedBuffer(format!("block time: {}", e))
        }
        leb128::read::Error::Overflow => {
            CodecError::MalformedTransaction("block time overflows i64".to_string())
        }
    })?;
    Ok((height, block_time, remaining_slice(&cursor)))
}
