use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8282;
pub const DEFAULT_CLIENT_VERSION: &str = "2.20240726.00.00";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub youtube: YoutubeConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Prefix prepended to localized media paths, e.g. "/companion".
    pub base_path: String,
    pub encrypt_query_params: bool,
    pub query_secret: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            base_path: String::new(),
            encrypt_query_params: false,
            query_secret: String::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct YoutubeConfig {
    pub po_token_enabled: bool,
    pub client_version: String,
    pub user_agent: String,
    pub timeout: u64,
}

impl Default for YoutubeConfig {
    fn default() -> Self {
        Self {
            po_token_enabled: false,
            client_version: DEFAULT_CLIENT_VERSION.to_string(),
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36".to_string(),
            timeout: 30,
        }
    }
}

impl Config {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Reading {}", path.display()))?;
        let config =
            toml::from_str(&content).with_context(|| format!("Parsing {}", path.display()))?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn make_config(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", contents).unwrap();
        file
    }

    #[test]
    fn load_without_path_uses_defaults() {
        let config = Config::load(None).unwrap();
        assert_eq!(config.server.port, DEFAULT_PORT);
        assert!(!config.server.encrypt_query_params);
        assert!(!config.youtube.po_token_enabled);
    }

    #[test]
    fn load_reads_server_section() {
        let file = make_config(
            "[server]\nport = 4242\nbase_path = \"/companion\"\nencrypt_query_params = true\nquery_secret = \"0123456789abcdef\"\n",
        );
        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.server.port, 4242);
        assert_eq!(config.server.base_path, "/companion");
        assert!(config.server.encrypt_query_params);
    }

    #[test]
    fn load_defaults_missing_sections() {
        let file = make_config("[youtube]\npo_token_enabled = true\n");
        let config = Config::load(Some(file.path())).unwrap();
        assert!(config.youtube.po_token_enabled);
        assert_eq!(config.server.host, DEFAULT_HOST);
        assert_eq!(config.youtube.client_version, DEFAULT_CLIENT_VERSION);
    }
}
