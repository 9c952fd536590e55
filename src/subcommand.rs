use anyhow::{Context, Result};
use clap::{Parser, Subcommand as ClapSubcommand};
use colx::ColxParser;
use serde::Serialize;
use std::io::Read;
use utxo_support::ChainParser;

#[derive(ClapSubcommand, Debug, Clone)]
pub enum Subcommand {
    Block(Payload),
    Tx(Payload),
    Pack(Pack),
    Unpack(Payload),
    Address(Address),
    Script(Payload),
}

#[derive(Parser, Debug, Clone)]
pub struct Payload {
    #[clap(help = "Hex payload, or - to read it from stdin")]
    pub hex: String,
}

#[derive(Parser, Debug, Clone)]
pub struct Pack {
    #[clap(help = "Raw transaction hex, or - to read it from stdin")]
    pub hex: String,
    #[clap(long, help = "Confirmation height")]
    pub height: u32,
    #[clap(long, default_value_t = 0, help = "Block time in seconds since the epoch")]
    pub block_time: i64,
}

#[derive(Parser, Debug, Clone)]
pub struct Address {
    pub address: String,
}

#[derive(Serialize)]
struct Unpacked {
    height: u32,
    tx: utxo_support::Tx,
}

#[derive(Serialize)]
struct Addresses {
    addresses: Vec<String>,
    ambiguous: bool,
}

fn read_hex(arg: &str) -> Result<Vec<u8>> {
    let text = if arg == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        arg.to_string()
    };
    hex::decode(text.trim()).context("payload is not valid hex")
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

impl Subcommand {
    pub fn run(&self, parser: &ColxParser) -> Result<()> {
        match self {
            Subcommand::Block(payload) => {
                print_json(&parser.parse_block(&read_hex(&payload.hex)?)?)
            }
            Subcommand::Tx(payload) => print_json(&parser.parse_tx(&read_hex(&payload.hex)?)?),
            Subcommand::Pack(pack) => {
                let tx = parser
                    .parse_tx(&read_hex(&pack.hex)?)?
                    .with_block_time(pack.block_time);
                println!("{}", hex::encode(parser.pack_tx(&tx, pack.height)?));
                Ok(())
            }
            Subcommand::Unpack(payload) => {
                let (tx, height) = parser.unpack_tx(&read_hex(&payload.hex)?)?;
                print_json(&Unpacked { height, tx })
            }
            Subcommand::Address(address) => {
                let script = parser.script_from_address(&address.address)?;
                println!("{}", hex::encode(script.as_bytes()));
                Ok(())
            }
            Subcommand::Script(payload) => {
                let (addresses, ambiguous) =
                    parser.addresses_from_script(&read_hex(&payload.hex)?);
                print_json(&Addresses {
                    addresses,
                    ambiguous,
                })
            }
        }
    }
}
