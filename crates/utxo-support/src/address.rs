//! Locking-script classification and Base58Check address codec.
//!
//! Classification is structural only: lengths and opcode markers are matched
//! against the known templates, public keys are not checked to lie on the
//! curve. Hash-based templates map to exactly one address; bare keys are
//! hashed and rendered under the pay-to-pubkey-hash version byte.

use crate::error::{CodecError, Result};
use crate::network::{AddressTemplate, NetworkParams};
use bitcoin::base58;
use bitcoin::hashes::{hash160, sha256d, Hash};
use bitcoin::opcodes::all::{
    OP_CHECKMULTISIG, OP_CHECKSIG, OP_DUP, OP_EQUAL, OP_EQUALVERIFY, OP_HASH160,
    OP_PUSHBYTES_20, OP_PUSHBYTES_33, OP_PUSHBYTES_65, OP_PUSHNUM_1, OP_PUSHNUM_16, OP_RETURN,
};
use bitcoin::script::Instruction;
use bitcoin::{PubkeyHash, Script, ScriptBuf, ScriptHash};

const CHECKSUM_LEN: usize = 4;
const HASH_LEN: usize = 20;
const P2PKH_LEN: usize = 25;
const P2SH_LEN: usize = 23;
const P2PK_COMPRESSED_LEN: usize = 35;
const P2PK_UNCOMPRESSED_LEN: usize = 67;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ScriptClass {
    /// `OP_DUP OP_HASH160 <20> OP_EQUALVERIFY OP_CHECKSIG`
    PubKeyHash([u8; HASH_LEN]),
    /// `<33|65 byte key> OP_CHECKSIG`
    PubKey(Vec<u8>),
    /// `OP_HASH160 <20> OP_EQUAL`
    ScriptHash([u8; HASH_LEN]),
    /// `OP_m <key>... OP_n OP_CHECKMULTISIG`
    Multisig { required: u8, keys: Vec<Vec<u8>> },
    /// `OP_RETURN <data>`, a provably unspendable data carrier.
    NullData(Vec<u8>),
    NonStandard,
    Empty,
}

impl ScriptClass {
    /// Matches templates in precedence order: P2PKH, P2PK, P2SH, multisig.
    pub fn classify(script: &Script) -> Self {
        let b = script.as_bytes();
        if b.is_empty() {
            return ScriptClass::Empty;
        }
        if let Some(hash) = match_p2pkh(b) {
            return ScriptClass::PubKeyHash(hash);
        }
        if let Some(key) = match_p2pk(b) {
            return ScriptClass::PubKey(key.to_vec());
        }
        if let Some(hash) = match_p2sh(b) {
            return ScriptClass::ScriptHash(hash);
        }
        if let Some((required, keys)) = match_multisig(script) {
            return ScriptClass::Multisig { required, keys };
        }
        if b[0] == OP_RETURN.to_u8() {
            return ScriptClass::NullData(b[1..].to_vec());
        }
        ScriptClass::NonStandard
    }

    /// Addresses that can redeem the output, and whether more than one key
    /// is involved.
    pub fn addresses(&self, params: &NetworkParams) -> (Vec<String>, bool) {
        match self {
            ScriptClass::PubKeyHash(hash) => {
                (vec![encode_address(params.p2pkh_prefix, hash)], false)
            }
            ScriptClass::PubKey(key) => (vec![pubkey_address(key, params)], false),
            ScriptClass::ScriptHash(hash) => {
                (vec![encode_address(params.p2sh_prefix, hash)], false)
            }
            ScriptClass::Multisig { keys, .. } => (
                keys.iter().map(|key| pubkey_address(key, params)).collect(),
                keys.len() > 1,
            ),
            ScriptClass::NullData(_) | ScriptClass::NonStandard | ScriptClass::Empty => {
                (Vec::new(), false)
            }
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ScriptClass::PubKeyHash(_) => "pubkeyhash",
            ScriptClass::PubKey(_) => "pubkey",
            ScriptClass::ScriptHash(_) => "scripthash",
            ScriptClass::Multisig { .. } => "multisig",
            ScriptClass::NullData(_) => "nulldata",
            ScriptClass::NonStandard => "nonstandard",
            ScriptClass::Empty => "empty",
        }
    }
}

/// Derives the address list of a locking script. Non-standard scripts are a
/// normal outcome and yield `(vec![], false)`.
pub fn addresses_from_script(script: &[u8], params: &NetworkParams) -> (Vec<String>, bool) {
    ScriptClass::classify(Script::from_bytes(script)).addresses(params)
}

/// Decodes a Base58Check address and re-emits its canonical locking script.
///
/// The input is taken verbatim; surrounding whitespace makes it malformed.
pub fn script_from_address(address: &str, params: &NetworkParams) -> Result<ScriptBuf> {
    if address.is_empty() {
        return Err(CodecError::malformed_address(address, "empty address"));
    }
    let decoded = base58::decode(address)
        .map_err(|e| CodecError::malformed_address(address, e.to_string()))?;
    if decoded.len() <= CHECKSUM_LEN {
        return Err(CodecError::malformed_address(
            address,
            format!("{} bytes is too short", decoded.len()),
        ));
    }
    let (payload, checksum) = decoded.split_at(decoded.len() - CHECKSUM_LEN);
    if sha256d::Hash::hash(payload).to_byte_array()[..CHECKSUM_LEN] != *checksum {
        return Err(CodecError::InvalidAddress(address.to_string()));
    }
    if payload.len() != HASH_LEN + 1 {
        return Err(CodecError::malformed_address(
            address,
            format!("expected {} byte payload, got {}", HASH_LEN + 1, payload.len()),
        ));
    }
    let version = payload[0];
    let mut hash = [0u8; HASH_LEN];
    hash.copy_from_slice(&payload[1..]);
    match params.template_for_prefix(version) {
        Some(AddressTemplate::PubKeyHash) => {
            Ok(ScriptBuf::new_p2pkh(&PubkeyHash::from_byte_array(hash)))
        }
        Some(AddressTemplate::ScriptHash) => {
            Ok(ScriptBuf::new_p2sh(&ScriptHash::from_byte_array(hash)))
        }
        None => Err(CodecError::UnknownAddressVersion {
            address: address.to_string(),
            version,
        }),
    }
}

pub fn encode_address(prefix: u8, hash: &[u8; HASH_LEN]) -> String {
    let mut data = Vec::with_capacity(HASH_LEN + 1);
    data.push(prefix);
    data.extend_from_slice(hash);
    base58::encode_check(&data)
}

fn pubkey_address(key: &[u8], params: &NetworkParams) -> String {
    encode_address(params.p2pkh_prefix, &hash160::Hash::hash(key).to_byte_array())
}

fn is_pubkey(key: &[u8]) -> bool {
    match key.len() {
        33 => key[0] == 0x02 || key[0] == 0x03,
        65 => key[0] == 0x04 || key[0] == 0x06 || key[0] == 0x07,
        _ => false,
    }
}

fn hash_at(b: &[u8], start: usize) -> [u8; HASH_LEN] {
    let mut hash = [0u8; HASH_LEN];
    hash.copy_from_slice(&b[start..start + HASH_LEN]);
    hash
}

fn match_p2pkh(b: &[u8]) -> Option<[u8; HASH_LEN]> {
    (b.len() == P2PKH_LEN
        && b[0] == OP_DUP.to_u8()
        && b[1] == OP_HASH160.to_u8()
        && b[2] == OP_PUSHBYTES_20.to_u8()
        && b[23] == OP_EQUALVERIFY.to_u8()
        && b[24] == OP_CHECKSIG.to_u8())
    .then(|| hash_at(b, 3))
}

fn match_p2pk(b: &[u8]) -> Option<&[u8]> {
    let push = match b.len() {
        P2PK_COMPRESSED_LEN => OP_PUSHBYTES_33.to_u8(),
        P2PK_UNCOMPRESSED_LEN => OP_PUSHBYTES_65.to_u8(),
        _ => return None,
    };
    let key = &b[1..b.len() - 1];
    (b[0] == push && b[b.len() - 1] == OP_CHECKSIG.to_u8() && is_pubkey(key)).then_some(key)
}

fn match_p2sh(b: &[u8]) -> Option<[u8; HASH_LEN]> {
    (b.len() == P2SH_LEN
        && b[0] == OP_HASH160.to_u8()
        && b[1] == OP_PUSHBYTES_20.to_u8()
        && b[22] == OP_EQUAL.to_u8())
    .then(|| hash_at(b, 2))
}

fn pushnum(instruction: &Instruction) -> Option<u8> {
    match instruction {
        Instruction::Op(op) => {
            let b = op.to_u8();
            (OP_PUSHNUM_1.to_u8()..=OP_PUSHNUM_16.to_u8())
                .contains(&b)
                .then(|| b - OP_PUSHNUM_1.to_u8() + 1)
        }
        Instruction::PushBytes(_) => None,
    }
}

fn match_multisig(script: &Script) -> Option<(u8, Vec<Vec<u8>>)> {
    if script.as_bytes().last() != Some(&OP_CHECKMULTISIG.to_u8()) {
        return None;
    }
    let instructions = script
        .instructions()
        .collect::<std::result::Result<Vec<_>, _>>()
        .ok()?;
    // m, at least one key, n, OP_CHECKMULTISIG
    if instructions.len() < 4 {
        return None;
    }
    let required = pushnum(&instructions[0])?;
    let total = pushnum(&instructions[instructions.len() - 2])?;
    let pushed = &instructions[1..instructions.len() - 2];
    if pushed.len() != total as usize || required > total {
        return None;
    }
    let keys = pushed
        .iter()
        .map(|instruction| match instruction {
            Instruction::PushBytes(data) if is_pubkey(data.as_bytes()) => {
                Some(data.as_bytes().to_vec())
            }
            _ => None,
        })
        .collect::<Option<Vec<_>>>()?;
    Some((required, keys))
}
