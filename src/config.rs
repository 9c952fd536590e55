use anyhow::Context;
use serde::Deserialize;
use std::path::Path;

fn default_network() -> String {
    String::from("main")
}

/// Parser settings handed over by the surrounding service, usually as the
/// coin section of its JSON configuration.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct ParserConfig {
    /// Chain name as reported by the node: `main`, `test` or `regtest`.
    #[serde(default = "default_network")]
    pub network: String,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            network: default_network(),
        }
    }
}

impl ParserConfig {
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        Self::from_json(&json)
    }
}
