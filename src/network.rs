// Copyright 2024-present, Fractal Industries, Inc.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! # ColossusXT Network Parameters
//!
//! Fixed per-network constants from the ColossusXT chain parameters, and the
//! selector that maps the chain name reported by the node to one of them.
//! The tables are plain constants; selecting one never mutates anything, so
//! parsers for different networks can live side by side.

use utxo_support::{CodecError, NetworkKind, NetworkParams, Result};

pub const MAINNET: NetworkParams = NetworkParams {
    network: NetworkKind::Main,
    magic: [0x91, 0xc5, 0xfe, 0xea],
    p2pkh_prefix: 30,
    p2sh_prefix: 13,
};

pub const TESTNET: NetworkParams = NetworkParams {
    network: NetworkKind::Test,
    magic: [0x45, 0x76, 0x65, 0xba],
    p2pkh_prefix: 139,
    p2sh_prefix: 19,
};

pub const REGTEST: NetworkParams = NetworkParams {
    network: NetworkKind::Regtest,
    magic: [0xa1, 0xcf, 0x7e, 0xac],
    p2pkh_prefix: 139,
    p2sh_prefix: 19,
};

pub fn params_for(network: NetworkKind) -> &'static NetworkParams {
    match network {
        NetworkKind::Main => &MAINNET,
        NetworkKind::Test => &TESTNET,
        NetworkKind::Regtest => &REGTEST,
    }
}

/// Resolves the chain name reported by `getblockchaininfo` (`main`, `test`,
/// `regtest`, plus the `mainnet`/`livenet`/`testnet` aliases).
pub fn get_chain_params(chain: &str) -> Result<&'static NetworkParams> {
    NetworkKind::from_chain_name(chain)
        .map(params_for)
        .ok_or_else(|| CodecError::UnknownNetwork(chain.to_string()))
}
