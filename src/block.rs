//! ColossusXT block layout.
//!
//! COLX inherits the PIVX block format: headers with `version > 3` carry a
//! 32-byte zerocoin accumulator checkpoint after the nonce, and proof-of-stake
//! blocks (second transaction is a coinstake) end with a signature by the
//! staking key.

use bitcoin::Transaction;
use std::io::Cursor;
use utxo_support::block::{read_array, read_bitcoin_header, read_bytes, BlockHeader, RawTransaction};
use utxo_support::Result;

pub const ACCUMULATOR_VERSION: i32 = 4;

/// A coinstake spends a real outpoint and marks itself with an empty first
/// output.
pub fn is_coinstake(tx: &Transaction) -> bool {
    !tx.input.is_empty()
        && !tx.input[0].previous_output.is_null()
        && tx.output.len() >= 2
        && tx.output[0].value.to_sat() == 0
        && tx.output[0].script_pubkey.is_empty()
}

pub fn is_proof_of_stake(txs: &[RawTransaction]) -> bool {
    txs.len() > 1 && is_coinstake(&txs[1].tx)
}

pub fn read_header(cursor: &mut Cursor<&[u8]>) -> Result<BlockHeader> {
    let mut header = read_bitcoin_header(cursor)?;
    if header.version >= ACCUMULATOR_VERSION {
        let mut checkpoint = read_array::<32>(cursor, "accumulator checkpoint")?;
        // uint256, displayed most significant byte first
        checkpoint.reverse();
        header.accumulator_checkpoint = Some(hex::encode(checkpoint));
    }
    Ok(header)
}

pub fn read_signature(
    cursor: &mut Cursor<&[u8]>,
    txs: &[RawTransaction],
) -> Result<Option<Vec<u8>>> {
    if is_proof_of_stake(txs) {
        read_bytes(cursor, "block signature").map(Some)
    } else {
        Ok(None)
    }
}
