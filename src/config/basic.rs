use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr};
use std::path::PathBuf;

/// Basic (core) configuration managed by Figment.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BasicConfig {
    /// HTTP server listen address (e.g., "0.0.0.0", "127.0.0.1").
    /// TOML: `basic.listen_addr`. Default: `0.0.0.0`.
    #[serde(default = "default_listen_ip")]
    pub listen_addr: IpAddr,

    /// HTTP server listen port.
    /// TOML: `basic.listen_port`. Default: `5000`.
    #[serde(default = "default_listen_port")]
    pub listen_port: u16,

    /// Database URL for SQLite.
    /// TOML: `basic.database_url`. Default: `sqlite://promptbuilder.db`.
    #[serde(default = "default_database_url")]
    pub database_url: String,

    /// Log level for tracing subscriber initialization (e.g., "error", "warn", "info", "debug", "trace").
    /// TOML: `basic.loglevel`. Default: `info`.
    #[serde(default = "default_loglevel")]
    pub loglevel: String,

    /// Seed an empty database with a default provider and sample templates.
    /// TOML: `basic.seed_sample_data`. Default: `true`.
    #[serde(default = "default_seed_sample_data")]
    pub seed_sample_data: bool,

    /// Upper bound for the multipart body accepted by `POST /api/data/import`.
    /// TOML: `basic.max_import_bytes`. Default: 10 MiB.
    #[serde(default = "default_max_import_bytes")]
    pub max_import_bytes: usize,

    /// Optional directory holding the built frontend; served for non-API paths.
    /// TOML: `basic.static_dir`. Default: unset.
    #[serde(default)]
    pub static_dir: Option<PathBuf>,
}

impl Default for BasicConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_ip(),
            listen_port: default_listen_port(),
            database_url: default_database_url(),
            loglevel: default_loglevel(),
            seed_sample_data: default_seed_sample_data(),
            max_import_bytes: default_max_import_bytes(),
            static_dir: None,
        }
    }
}

/// Default IP address for the HTTP server listen address.
fn default_listen_ip() -> IpAddr {
    Ipv4Addr::new(0, 0, 0, 0).into()
}

/// Default port for the HTTP server.
fn default_listen_port() -> u16 {
    5000
}

fn default_database_url() -> String {
    "sqlite://promptbuilder.db".to_string()
}

fn default_loglevel() -> String {
    "info".to_string()
}

fn default_seed_sample_data() -> bool {
    true
}

fn default_max_import_bytes() -> usize {
    10 * 1024 * 1024
}
