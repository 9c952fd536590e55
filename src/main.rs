use anyhow::Result;
use clap::Parser;
use colx::ColxParser;
use log::debug;
use options::Options;

mod options;
mod subcommand;

fn main() -> Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("warn"));
    let options = Options::parse();
    let config = options.parser_config()?;
    debug!("using network {}", config.network);
    let parser = ColxParser::from_config(&config)?;
    options.subcommand.run(&parser)
}
