use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::net::TcpStream;
use tracing::debug;

/// Connectivity probe consulted before every request and when the
/// favorites list comes back empty.
#[async_trait]
pub trait Reachability: Send + Sync {
    async fn is_connected(&self) -> bool;
}

/// Opens a TCP connection to `addr` (`host:port`) and reports whether it
/// succeeded within `timeout`.
#[derive(Debug, Clone)]
pub struct TcpReachability {
    addr: String,
    timeout: Duration,
}

impl TcpReachability {
    pub fn new(addr: impl Into<String>, timeout: Duration) -> Self {
        Self {
            addr: addr.into(),
            timeout,
        }
    }
}

#[async_trait]
impl Reachability for TcpReachability {
    async fn is_connected(&self) -> bool {
        match tokio::time::timeout(self.timeout, TcpStream::connect(&self.addr)).await {
            Ok(Ok(_)) => true,
            Ok(Err(err)) => {
                debug!(addr = %self.addr, ?err, "reachability probe failed");
                false
            }
            Err(_) => {
                debug!(addr = %self.addr, "reachability probe timed out");
                false
            }
        }
    }
}

/// Fixed answer, switchable at runtime.
#[derive(Debug, Default)]
pub struct StaticReachability(AtomicBool);

impl StaticReachability {
    pub fn new(connected: bool) -> Self {
        Self(AtomicBool::new(connected))
    }

    pub fn set(&self, connected: bool) {
        self.0.store(connected, Ordering::SeqCst);
    }
}

#[async_trait]
impl Reachability for StaticReachability {
    async fn is_connected(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}
