use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Configuration for the audit engine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Default audit target when no URL is given
    #[serde(default = "default_site_root")]
    pub site_root: String,

    /// Target keywords for content analysis
    #[serde(default)]
    pub keywords: Vec<String>,

    /// Base timeout for page retrieval, in milliseconds
    #[serde(default = "default_fetch_timeout_ms")]
    pub fetch_timeout_ms: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            site_root: default_site_root(),
            keywords: Vec::new(),
            fetch_timeout_ms: default_fetch_timeout_ms(),
        }
    }
}

/// Configuration for the HTTP server
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address to bind
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind
    #[serde(default = "default_port")]
    pub port: u16,

    /// Engine settings shared with the CLI path
    #[serde(default)]
    pub engine: EngineConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            engine: EngineConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn Error>> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        let config: Self = serde_json::from_str(&contents)?;
        Ok(config)
    }

    /// Load configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self, Box<dyn Error>> {
        let config: Self = serde_json::from_str(json)?;
        Ok(config)
    }
}

/// Default audit target
fn default_site_root() -> String {
    "http://localhost:8080/".to_string()
}

/// Default fetch timeout in milliseconds
fn default_fetch_timeout_ms() -> u64 {
    10_000
}

/// Default bind address
fn default_host() -> String {
    "0.0.0.0".to_string()
}

/// Default bind port
fn default_port() -> u16 {
    8080
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_fill_missing_fields() {
        let config = ServerConfig::from_json(r#"{"port": 9000}"#).unwrap();

        assert_eq!(config.port, 9000);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.engine.fetch_timeout_ms, 10_000);
        assert!(config.engine.keywords.is_empty());
    }

    #[test]
    fn test_engine_section_parses() {
        let config = ServerConfig::from_json(
            r#"{"engine": {"site_root": "https://example.com/", "keywords": ["rust", "course"]}}"#,
        )
        .unwrap();

        assert_eq!(config.engine.site_root, "https://example.com/");
        assert_eq!(config.engine.keywords.len(), 2);
    }
}
