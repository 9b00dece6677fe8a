//! Client configuration.

use std::time::Duration;

use uuid::Uuid;

/// Configuration for a [`Client`](crate::Client).
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use tradfri_rs::ClientConfig;
///
/// let config = ClientConfig::new("192.168.1.20", "SECURITYCODE")
///     .identity("living-room-panel")
///     .list_delay(Duration::from_millis(250));
/// assert_eq!(config.address(), "192.168.1.20:5684");
/// assert_eq!(config.identity_str(), "living-room-panel");
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub(crate) gateway: String,
    pub(crate) port: u16,
    pub(crate) key: String,
    pub(crate) identity: String,
    pub(crate) psk: Option<String>,
    pub(crate) list_delay: Duration,
}

impl ClientConfig {
    /// Default CoAPS port of the gateway.
    pub const PORT: u16 = 5684;
    /// Default pause between per-entity fetches when listing, to stay under
    /// the gateway's flood protection.
    pub const LIST_DELAY: Duration = Duration::from_millis(100);

    /// Create a configuration for the gateway at `gateway` (host name or IP),
    /// authenticating with the security code printed on the gateway.
    ///
    /// A fresh identity is generated; set a stable one with
    /// [`identity`](Self::identity) if the pre-shared key is persisted.
    pub fn new(gateway: &str, key: &str) -> Self {
        ClientConfig {
            gateway: gateway.to_string(),
            port: Self::PORT,
            key: key.to_string(),
            identity: generate_identity(),
            psk: None,
            list_delay: Self::LIST_DELAY,
        }
    }

    pub fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Identity the pre-shared key is issued for.
    pub fn identity(mut self, identity: &str) -> Self {
        self.identity = identity.to_string();
        self
    }

    /// Reuse a pre-shared key obtained earlier for the same identity, skipping
    /// the credential exchange.
    pub fn psk(mut self, psk: &str) -> Self {
        self.psk = Some(psk.to_string());
        self
    }

    /// The gateway's real rate limit is undocumented; only change this if
    /// listings trip its flood protection.
    pub fn list_delay(mut self, delay: Duration) -> Self {
        self.list_delay = delay;
        self
    }

    /// The `host:port` address channels are dialed at.
    pub fn address(&self) -> String {
        format!("{}:{}", self.gateway, self.port)
    }

    pub fn identity_str(&self) -> &str {
        &self.identity
    }

    pub fn list_delay_duration(&self) -> Duration {
        self.list_delay
    }
}

fn generate_identity() -> String {
    format!("tradfri-rs-{}", Uuid::new_v4().simple())
}
