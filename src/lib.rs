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

//! # COLX
//!
//! ColossusXT adapter for the multi-chain UTXO indexer. It teaches the
//! shared `utxo-support` codec the COLX address versions and the PIVX-style
//! block layout; transactions and the packed storage form are inherited.
//!
//! ```rust,ignore
//! use colx::ColxParser;
//! use utxo_support::ChainParser;
//!
//! let parser = ColxParser::for_chain("main")?;
//! let block = parser.parse_block(&raw_block)?;
//! let packed = parser.pack_tx(&block.txs[0], height)?;
//! ```

pub mod block;
pub mod config;
pub mod indexer;
pub mod network;
pub mod parser;
#[cfg(any(test, feature = "test-utils"))]
pub mod tests;

pub use config::ParserConfig;
pub use indexer::{BlockSource, ColxIndexer, PackedTxSink};
pub use network::get_chain_params;
pub use parser::ColxParser;
