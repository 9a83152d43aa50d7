//! Configuration management
//!
//! Loads settings from an optional `config.toml` with `CHAT_RELAY_*`
//! environment overrides, falling back to built-in defaults. The bind/connect
//! target is explicit configuration handed to the server and client at
//! construction time; nothing here is process-wide state.

// Leading `::` keeps the config crate distinct from this module.
use ::config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::protocol::MAX_PAYLOAD;

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct RelayConfig {
    /// Address to bind the listening socket to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Listen backlog handed to the OS.
    pub backlog: u32,
    /// Read buffer size, the upper bound on a single payload.
    pub max_payload: usize,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 1234,
            backlog: 5,
            max_payload: MAX_PAYLOAD,
        }
    }
}

impl RelayConfig {
    /// Load configuration from `config.toml` (if present) and the
    /// environment, validating the result.
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .set_default("host", "127.0.0.1")?
            .set_default("port", 1234)?
            .set_default("backlog", 5)?
            .set_default("max_payload", MAX_PAYLOAD as i64)?
            .add_source(File::with_name("config").required(false))
            .add_source(Environment::with_prefix("CHAT_RELAY"))
            .build()?;

        let config: RelayConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Bind target as a `host:port` string.
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.host.is_empty() {
            return Err(ConfigError::Message("host cannot be empty".into()));
        }
        if self.port == 0 {
            return Err(ConfigError::Message("port cannot be 0".into()));
        }
        if self.backlog == 0 {
            return Err(ConfigError::Message(
                "backlog must be greater than 0".into(),
            ));
        }
        if self.max_payload == 0 {
            return Err(ConfigError::Message(
                "max_payload must be greater than 0".into(),
            ));
        }
        Ok(())
    }
}

/// Connect target for the client agent.
#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 1234,
        }
    }
}

impl ClientConfig {
    /// Load the connect target from the same sources the server uses.
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .set_default("host", "127.0.0.1")?
            .set_default("port", 1234)?
            .add_source(File::with_name("config").required(false))
            .add_source(Environment::with_prefix("CHAT_RELAY"))
            .build()?;

        // Server-only keys may be present in the shared file; pick out ours.
        let host: String = settings.get_string("host")?;
        let port: u16 = settings.get_int("port")? as u16;
        Ok(Self { host, port })
    }

    /// Connect target as a `host:port` string.
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_pass_validation() {
        assert!(RelayConfig::default().validate().is_ok());
    }

    #[test]
    fn rejects_zero_port() {
        let config = RelayConfig {
            port: 0,
            ..RelayConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_zero_backlog() {
        let config = RelayConfig {
            backlog: 0,
            ..RelayConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn formats_socket_addr() {
        assert_eq!(RelayConfig::default().socket_addr(), "127.0.0.1:1234");
        assert_eq!(ClientConfig::default().socket_addr(), "127.0.0.1:1234");
    }
}
