/// Environment-driven configuration for the API server.
use std::time::Duration;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_UPSTREAM: &str = "https://yewtu.be";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Base URL of the upstream metadata/media service.
    pub upstream_base_url: String,
    /// Optional connect timeout for outbound calls. `None` leaves it to the transport.
    pub upstream_connect_timeout: Option<Duration>,
}

impl Config {
    /// Read configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port: u16 = lookup("PORT")
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(DEFAULT_PORT);
        let upstream_base_url = lookup("INVIDIOUS_INSTANCE")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_UPSTREAM.to_string());
        let upstream_connect_timeout = lookup("UPSTREAM_CONNECT_TIMEOUT_SECS")
            .and_then(|v| v.trim().parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs);

        Self {
            host,
            port,
            upstream_base_url,
            upstream_connect_timeout,
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Config {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]);
        assert_eq!(config.port, 3000);
        assert_eq!(config.upstream_base_url, "https://yewtu.be");
        assert_eq!(config.upstream_connect_timeout, None);
        assert_eq!(config.bind_addr(), "0.0.0.0:3000");
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("PORT", "8080"),
            ("HOST", "127.0.0.1"),
            ("INVIDIOUS_INSTANCE", "https://inv.example"),
            ("UPSTREAM_CONNECT_TIMEOUT_SECS", "10"),
        ]);
        assert_eq!(config.bind_addr(), "127.0.0.1:8080");
        assert_eq!(config.upstream_base_url, "https://inv.example");
        assert_eq!(config.upstream_connect_timeout, Some(Duration::from_secs(10)));
    }

    #[test]
    fn test_bad_port_falls_back() {
        let config = config_from(&[("PORT", "not-a-port"), ("UPSTREAM_CONNECT_TIMEOUT_SECS", "x")]);
        assert_eq!(config.port, 3000);
        assert_eq!(config.upstream_connect_timeout, None);
    }
}
