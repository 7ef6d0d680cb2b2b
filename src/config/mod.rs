mod basic;
mod llm;

pub use basic::BasicConfig;
pub use llm::LlmConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Application configuration managed by Figment.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Core server configuration (see `basic` table in config.toml).
    #[serde(default)]
    pub basic: BasicConfig,

    /// Fallback LLM endpoint and request settings (see `llm` table in config.toml).
    #[serde(default)]
    pub llm: LlmConfig,
}

const DEFAULT_CONFIG_FILE: &str = "config.toml";
const ENV_PREFIX: &str = "PROMPTBUILDER_";

impl Config {
    /// Builds a Figment that merges defaults, an optional config TOML file and
    /// `PROMPTBUILDER_`-prefixed environment variables (`__` separates tables,
    /// e.g. `PROMPTBUILDER_LLM__API_KEY`).
    pub fn figment() -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));
        if PathBuf::from(DEFAULT_CONFIG_FILE).is_file() {
            figment = figment.merge(Toml::file(DEFAULT_CONFIG_FILE));
        }
        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Extracts the merged configuration.
    pub fn load() -> Result<Self, figment::Error> {
        Self::figment().extract()
    }
}
