//! Layered configuration for the proxy and backend binaries.

use std::net::SocketAddr;

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;

use crate::CorsOptions;

/// Which binary the settings are loaded for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Component {
    Proxy,
    Backend,
}

impl Component {
    pub fn name(self) -> &'static str {
        match self {
            Component::Proxy => "proxy",
            Component::Backend => "backend",
        }
    }

    pub fn default_port(self) -> u16 {
        match self {
            Component::Proxy => 8081,
            Component::Backend => 8080,
        }
    }
}

/// Root configuration structure.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub proxy: ProxySettings,
    pub cors: CorsSettings,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

/// Upstream the proxy forwards every request to.
#[derive(Debug, Clone, Deserialize)]
pub struct ProxySettings {
    pub upstream: String,
    pub timeout_secs: u64,
}

/// CORS options as they appear in files and environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct CorsSettings {
    pub allow_origins: Vec<String>,
    pub allow_methods: Vec<String>,
    pub allow_headers: Vec<String>,
    #[serde(default)]
    pub expose_headers: Vec<String>,
    #[serde(default)]
    pub allow_credentials: bool,
    pub max_age_secs: Option<u64>,
    pub options_response_status: Option<u16>,
    #[serde(default)]
    pub allow_private_network: bool,
    #[serde(default)]
    pub allow_browser_extensions: bool,
    #[serde(default)]
    pub allow_web_sockets: bool,
    #[serde(default)]
    pub allow_files: bool,
    #[serde(default)]
    pub custom_schemas: Vec<String>,
}

impl Settings {
    /// Load settings for `component`.
    ///
    /// Sources, lowest priority first:
    /// 1. built-in defaults
    /// 2. `config/default.toml`, then `config/{component}.toml`
    /// 3. `APP__`-prefixed environment variables, e.g.
    ///    `APP__PROXY__UPSTREAM=http://backend:8080` or
    ///    `APP__CORS__ALLOW_ORIGINS=https://a.test,https://b.test`
    pub fn load(component: Component) -> Result<Self, ConfigError> {
        // .env is optional
        let _ = dotenvy::dotenv();

        Self::defaults(component)?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", component.name())).required(false))
            .add_source(
                Environment::default()
                    .prefix("APP")
                    .prefix_separator("__")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("cors.allow_origins")
                    .with_list_parse_key("cors.allow_methods")
                    .with_list_parse_key("cors.allow_headers")
                    .with_list_parse_key("cors.expose_headers")
                    .with_list_parse_key("cors.custom_schemas")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    /// Built-in defaults only; no files, no environment.
    pub fn from_defaults(component: Component) -> Result<Self, ConfigError> {
        Self::defaults(component)?.build()?.try_deserialize()
    }

    fn defaults(component: Component) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", i64::from(component.default_port()))?
            .set_default("proxy.upstream", "http://localhost:8080")?
            .set_default("proxy.timeout_secs", 30)?
            .set_default("cors.allow_origins", vec!["*"])?
            .set_default(
                "cors.allow_methods",
                vec!["GET", "POST", "PUT", "PATCH", "DELETE", "HEAD"],
            )?
            .set_default(
                "cors.allow_headers",
                vec!["Origin", "Content-Length", "Content-Type"],
            )?
            .set_default("cors.max_age_secs", 12 * 60 * 60)
    }
}

impl ServerSettings {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|err| ConfigError::Message(format!("invalid listen address: {err}")))
    }
}

impl CorsSettings {
    pub fn to_options(&self) -> CorsOptions {
        CorsOptions {
            allow_origins: self.allow_origins.clone(),
            allow_methods: self.allow_methods.clone(),
            allow_headers: self.allow_headers.clone(),
            expose_headers: self.expose_headers.clone(),
            allow_credentials: self.allow_credentials,
            max_age: self.max_age_secs,
            options_response_status: self.options_response_status,
            allow_private_network: self.allow_private_network,
            allow_browser_extensions: self.allow_browser_extensions,
            allow_web_sockets: self.allow_web_sockets,
            allow_files: self.allow_files,
            custom_schemas: self.custom_schemas.clone(),
            ..CorsOptions::default()
        }
    }
}

#[cfg(test)]
#[path = "settings_test.rs"]
mod settings_test;
