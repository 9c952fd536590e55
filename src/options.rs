use crate::subcommand::Subcommand;
use anyhow::Result;
use clap::Parser;
use colx::ParserConfig;
use std::path::PathBuf;

#[derive(Debug, Parser, Clone)]
#[clap(
    version,
    about = "Decode ColossusXT blocks, transactions and addresses"
)]
pub struct Options {
    #[clap(
        long,
        default_value = "main",
        help = "Chain to use: main, test, regtest"
    )]
    pub network: String,
    #[clap(long, help = "JSON parser configuration, takes precedence over --network")]
    pub config: Option<PathBuf>,
    #[clap(subcommand)]
    pub subcommand: Subcommand,
}

impl Options {
    pub fn parser_config(&self) -> Result<ParserConfig> {
        match &self.config {
            Some(path) => ParserConfig::load(path),
            None => Ok(ParserConfig {
                network: self.network.clone(),
            }),
        }
    }
}
