//! Network binding and shutdown options for the HTTP listener.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

use anyhow::{Result as AnyhowResult, ensure};
use clap::Args;
use serde::{Deserialize, Serialize};

use crate::TRACING_TARGET_CONFIG;

/// Lowest port that does not require elevated privileges.
const MIN_UNPRIVILEGED_PORT: u16 = 1024;

/// Longest accepted graceful shutdown window, in seconds.
const MAX_SHUTDOWN_TIMEOUT_SECS: u64 = 300;

/// Port used when none is configured.
const DEFAULT_PORT: u16 = 3000;

/// Where and how the HTTP listener binds.
///
/// Every field can be set through a CLI flag or an environment variable
/// (`HOST`, `PORT`, `SHUTDOWN_TIMEOUT`). The per-request timeout is not
/// part of this struct; it belongs to the recovery middleware
/// configuration.
#[derive(Debug, Clone, Args, Serialize, Deserialize)]
#[must_use = "config does nothing unless you use it"]
pub struct ServerConfig {
    /// Host address to bind to. `127.0.0.1` keeps the server local,
    /// `0.0.0.0` exposes it on every interface.
    #[arg(long, env = "HOST", default_value = "127.0.0.1")]
    #[serde(default = "default_host")]
    pub host: IpAddr,

    /// TCP port to listen on, in the unprivileged range 1024-65535.
    #[arg(short = 'p', long, env = "PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Seconds to wait for in-flight requests once shutdown begins.
    #[arg(long, env = "SHUTDOWN_TIMEOUT", default_value_t = 30)]
    pub shutdown_timeout: u64,
}

fn default_host() -> IpAddr {
    IpAddr::V4(Ipv4Addr::LOCALHOST)
}

impl ServerConfig {
    /// Checks that the configured values are inside their accepted ranges.
    pub fn validate(&self) -> AnyhowResult<()> {
        ensure!(
            self.port >= MIN_UNPRIVILEGED_PORT,
            "port {} requires elevated privileges, use {}-65535",
            self.port,
            MIN_UNPRIVILEGED_PORT,
        );

        ensure!(
            (1..=MAX_SHUTDOWN_TIMEOUT_SECS).contains(&self.shutdown_timeout),
            "shutdown timeout must be 1-{MAX_SHUTDOWN_TIMEOUT_SECS} seconds, got {}",
            self.shutdown_timeout,
        );

        Ok(())
    }

    /// Socket address the listener binds to.
    #[must_use]
    pub const fn server_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Graceful shutdown window as a [`Duration`].
    #[must_use]
    pub const fn shutdown_timeout(&self) -> Duration {
        Duration::from_secs(self.shutdown_timeout)
    }

    /// Returns whether the listener is reachable from other hosts.
    #[must_use]
    pub const fn binds_to_all_interfaces(&self) -> bool {
        match self.host {
            IpAddr::V4(addr) => addr.is_unspecified(),
            IpAddr::V6(addr) => addr.is_unspecified(),
        }
    }

    /// Returns whether this looks like a local development setup.
    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self.host, IpAddr::V4(addr) if addr.is_loopback()) && self.port == DEFAULT_PORT
    }

    /// Emits the resolved binding options.
    pub fn log(&self) {
        tracing::info!(
            target: TRACING_TARGET_CONFIG,
            host = %self.host,
            port = self.port,
            development_mode = self.is_development(),
            "Server configured successfully"
        );
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: DEFAULT_PORT,
            shutdown_timeout: 30,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_local_and_valid() {
        let config = ServerConfig::default();
        assert!(config.validate().is_ok());
        assert!(config.is_development());
        assert!(!config.binds_to_all_interfaces());
        assert_eq!(config.server_addr().port(), DEFAULT_PORT);
    }

    #[test]
    fn privileged_ports_are_rejected() {
        let config = ServerConfig {
            port: 80,
            ..ServerConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn shutdown_window_is_bounded() {
        for (timeout, ok) in [(0, false), (1, true), (300, true), (301, false)] {
            let config = ServerConfig {
                shutdown_timeout: timeout,
                ..ServerConfig::default()
            };
            assert_eq!(config.validate().is_ok(), ok, "timeout {timeout}");
        }
    }

    #[test]
    fn unspecified_hosts_are_detected() {
        let config = ServerConfig {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            ..ServerConfig::default()
        };
        assert!(config.binds_to_all_interfaces());
    }
}
