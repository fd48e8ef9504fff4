//! Chat server configuration

use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use anyhow::Context;
use chrono::TimeDelta;
use pollchat_core::{ChatState, PRESENCE_TIMEOUT_SECS};

/// Configuration for the chat server
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerConfig {
    /// Interface to bind
    pub host: String,
    /// Port to bind
    pub port: u16,
    /// Seconds without activity before a name drops off `/users`
    pub presence_timeout_secs: i64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: std::env::var("POLLCHAT_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env_parse("POLLCHAT_PORT").unwrap_or(8080),
            presence_timeout_secs: env_parse::<i64>("POLLCHAT_PRESENCE_TIMEOUT_SECS")
                .filter(|secs| *secs > 0)
                .unwrap_or(PRESENCE_TIMEOUT_SECS),
        }
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|s| s.trim().parse().ok())
}

impl ServerConfig {
    /// Resolve `host:port` into a bind address
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        let ip: IpAddr = self
            .host
            .parse()
            .with_context(|| format!("invalid POLLCHAT_HOST {:?}", self.host))?;
        Ok(SocketAddr::new(ip, self.port))
    }

    pub fn presence_timeout(&self) -> TimeDelta {
        TimeDelta::seconds(self.presence_timeout_secs)
    }

    /// Build the shared chat state this configuration describes
    pub fn build_state(&self) -> ChatState {
        ChatState::new().presence_timeout(self.presence_timeout())
    }
}

/// App state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: ServerConfig,
    pub chat: Arc<ChatState>,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Self {
        let chat = Arc::new(config.build_state());
        Self { config, chat }
    }

    /// Wrap an existing chat state, e.g. one driven by a manual clock
    pub fn with_chat(config: ServerConfig, chat: Arc<ChatState>) -> Self {
        Self { config, chat }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(host: &str) -> ServerConfig {
        ServerConfig {
            host: host.to_string(),
            port: 9000,
            presence_timeout_secs: PRESENCE_TIMEOUT_SECS,
        }
    }

    #[test]
    fn socket_addr_parses_host() {
        let addr = config("127.0.0.1").socket_addr().unwrap();
        assert_eq!(addr, "127.0.0.1:9000".parse::<SocketAddr>().unwrap());
    }

    #[test]
    fn socket_addr_rejects_hostname_garbage() {
        assert!(config("not an ip").socket_addr().is_err());
    }

    #[test]
    fn presence_timeout_defaults_to_five_minutes() {
        assert_eq!(config("0.0.0.0").presence_timeout(), TimeDelta::minutes(5));
    }
}
