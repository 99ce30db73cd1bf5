use std::net::{TcpStream, ToSocketAddrs};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::Url;
use tracing::debug;

/// Reports current network reachability. Called synchronously before each attempt.
///
/// Implementations run on the caller's task and block it, so they must return
/// within a bounded time.
pub trait ConnectivityProbe: Send + Sync {
    fn is_connected(&self) -> bool;
}

/// Connectivity flag set by the host application (or by offline mode).
#[derive(Debug)]
pub struct FixedConnectivity {
    connected: AtomicBool,
}

impl FixedConnectivity {
    pub fn new(connected: bool) -> Self {
        Self {
            connected: AtomicBool::new(connected),
        }
    }

    pub fn online() -> Self {
        Self::new(true)
    }

    pub fn offline() -> Self {
        Self::new(false)
    }

    pub fn set_connected(&self, connected: bool) {
        self.connected.store(connected, Ordering::SeqCst);
    }
}

impl ConnectivityProbe for FixedConnectivity {
    fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }
}

/// Considers the network up if a TCP connection to `host:port` opens within the timeout.
///
/// Name resolution and connecting both block the calling thread. The timeout
/// bounds all connect attempts together, not each resolved address.
#[derive(Debug, Clone)]
pub struct TcpConnectivityProbe {
    host: String,
    port: u16,
    timeout: Duration,
}

impl TcpConnectivityProbe {
    pub fn new(host: impl Into<String>, port: u16, timeout: Duration) -> Self {
        Self {
            host: host.into(),
            port,
            timeout,
        }
    }

    /// Probe the host serving `url`, using the scheme's default port when none is given.
    pub fn for_url(url: &str, timeout: Duration) -> Result<Self> {
        let parsed = Url::parse(url).with_context(|| format!("Invalid URL: {}", url))?;
        // IPv6 literals come back bracketed, which the resolver rejects
        let host = parsed
            .host_str()
            .map(|h| h.trim_start_matches('[').trim_end_matches(']'))
            .ok_or_else(|| anyhow::anyhow!("URL has no host: {}", url))?;
        let port = parsed
            .port_or_known_default()
            .ok_or_else(|| anyhow::anyhow!("URL has no port: {}", url))?;
        Ok(Self::new(host, port, timeout))
    }
}

impl ConnectivityProbe for TcpConnectivityProbe {
    fn is_connected(&self) -> bool {
        let addrs = match (self.host.as_str(), self.port).to_socket_addrs() {
            Ok(addrs) => addrs,
            Err(e) => {
                debug!(host = %self.host, error = %e, "Host did not resolve");
                return false;
            }
        };

        let deadline = Instant::now() + self.timeout;
        for addr in addrs {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                debug!(host = %self.host, "Connectivity check timed out");
                break;
            }
            if TcpStream::connect_timeout(&addr, remaining).is_ok() {
                return true;
            }
        }
        debug!(host = %self.host, port = self.port, "No address reachable");
        false
    }
}
