//! Configuration structs for the layerfig demo application.
//!
//! The root [`DemoConfig`] holds two nested sub-configs, [`ServerConfig`] and
//! [`DisplayConfig`]. Each derives [`confique::Config`] for defaults plus
//! [`Serialize`]/[`Deserialize`] so the loaded value can be diffed back into
//! overlay arguments.

use confique::Config;
use serde::{Deserialize, Serialize};

/// Root configuration for the demo application.
#[derive(Config, Serialize, Deserialize, Debug)]
pub struct DemoConfig {
    /// Application name shown in the banner.
    #[config(default = "layerfig-demo")]
    pub name: String,

    /// Enable verbose output.
    #[config(default = false)]
    pub verbose: bool,

    /// Hosts allowed to connect.
    #[config(default = ["127.0.0.1"])]
    pub allow: Vec<String>,

    /// Server settings (nested config).
    #[config(nested)]
    pub server: ServerConfig,

    /// Display and formatting settings (nested config).
    #[config(nested)]
    pub display: DisplayConfig,
}

/// Server-related configuration, addressed as `server.*`.
#[derive(Config, Serialize, Deserialize, Debug)]
pub struct ServerConfig {
    /// Hostname to bind to.
    #[config(default = "127.0.0.1")]
    pub host: String,

    /// Port number.
    #[config(default = 3000)]
    pub port: u16,

    /// Maximum number of allowed connections.
    #[config(default = 100)]
    pub max_connections: u32,
}

/// Display and output formatting, addressed as `display.*`.
#[derive(Config, Serialize, Deserialize, Debug)]
pub struct DisplayConfig {
    /// Terminal color for the output.
    ///
    /// Supported values: red, green, yellow, blue, magenta, cyan, white.
    #[config(default = "yellow")]
    pub color: String,

    /// Output format (pretty or plain).
    #[config(default = "pretty")]
    pub format: String,
}

/// Typed paths into [`DemoConfig`], so callers building overlay arguments in
/// code cannot misspell a segment.
pub mod paths {
    use layerfig::DotPath;

    pub fn server() -> DotPath {
        DotPath::root().key("server")
    }

    pub fn server_port() -> DotPath {
        server().key("port")
    }
}
