//! Discovery server configuration.

use std::path::PathBuf;
use std::time::Duration;

use tracing::debug;
use xds_core::{Result, XdsError};

/// Default discovery server address (Istio's plaintext xDS port).
pub const DEFAULT_SERVER_ADDRESS: &str = "istiod.istio-system.svc:15010";

/// Default discovery server name.
pub const DEFAULT_SERVER_NAME: &str = "istiod.istio-system.svc";

/// Timeout applied to a resource fetch when none is configured.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(1);

/// Default location for dumping decoded resources.
pub const DEFAULT_DUMP_PATH: &str = "/tmp/xds_resource_manager.json";

/// Connection parameters for the xDS server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XdsServerConfig {
    /// Name of the xDS server, used for TLS verification.
    pub name: String,
    /// Address of the xDS server.
    pub address: String,
    /// Authenticate the xDS stream.
    pub auth_enabled: bool,
    /// Require name discovery (NDS). Istio needs it.
    pub nds_required: bool,
    /// Timeout for fetching resources. Zero means [`DEFAULT_FETCH_TIMEOUT`].
    pub fetch_timeout: Duration,
}

impl Default for XdsServerConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_SERVER_NAME.to_string(),
            address: DEFAULT_SERVER_ADDRESS.to_string(),
            auth_enabled: false,
            nds_required: true,
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
        }
    }
}

impl XdsServerConfig {
    /// Create a config pointing at `address`, other fields defaulted.
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            ..Default::default()
        }
    }

    /// Set the server name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Enable or disable stream authentication.
    pub fn with_auth(mut self, enabled: bool) -> Self {
        self.auth_enabled = enabled;
        self
    }

    /// Set whether name discovery is required.
    pub fn with_nds_required(mut self, required: bool) -> Self {
        self.nds_required = required;
        self
    }

    /// Set the fetch timeout.
    pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = timeout;
        self
    }

    /// Effective fetch timeout.
    #[must_use]
    pub fn fetch_timeout(&self) -> Duration {
        if self.fetch_timeout.is_zero() {
            DEFAULT_FETCH_TIMEOUT
        } else {
            self.fetch_timeout
        }
    }

    /// Check the config and fill in defaults in place.
    ///
    /// Only an empty address is an error. An empty name becomes
    /// [`DEFAULT_SERVER_NAME`] and a zero timeout becomes
    /// [`DEFAULT_FETCH_TIMEOUT`].
    pub fn validate(&mut self) -> Result<()> {
        if self.address.is_empty() {
            return Err(XdsError::InvalidServerConfig {
                reason: "xDS server address should be specified".to_string(),
            });
        }
        if self.name.is_empty() {
            debug!(name = DEFAULT_SERVER_NAME, "xDS server name not set, using default");
            self.name = DEFAULT_SERVER_NAME.to_string();
        }
        if self.fetch_timeout.is_zero() {
            self.fetch_timeout = DEFAULT_FETCH_TIMEOUT;
        }
        Ok(())
    }
}

/// Options for the xDS client.
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use xds_client::{ClientOptions, XdsServerConfig};
///
/// let options = ClientOptions::new()
///     .server(XdsServerConfig::new("127.0.0.1:15010").with_name(""))
///     .fetch_timeout(Duration::from_secs(3))
///     .build()
///     .unwrap();
///
/// assert_eq!(options.server.name, "istiod.istio-system.svc");
/// assert_eq!(options.server.fetch_timeout(), Duration::from_secs(3));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientOptions {
    /// Discovery server connection parameters.
    pub server: XdsServerConfig,
    /// File the resource manager writes its decoded resources to, as JSON,
    /// for debugging. This crate only carries the path; the resource manager
    /// that owns the cache does the writing, using the `Serialize` impl of
    /// [`ClusterResource`](crate::resources::ClusterResource).
    pub dump_path: PathBuf,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            server: XdsServerConfig::default(),
            dump_path: PathBuf::from(DEFAULT_DUMP_PATH),
        }
    }
}

impl ClientOptions {
    /// Create options with Istio defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the server config.
    pub fn server(mut self, server: XdsServerConfig) -> Self {
        self.server = server;
        self
    }

    /// Set the server address.
    pub fn server_address(mut self, address: impl Into<String>) -> Self {
        self.server.address = address.into();
        self
    }

    /// Set the fetch timeout.
    pub fn fetch_timeout(mut self, timeout: Duration) -> Self {
        self.server.fetch_timeout = timeout;
        self
    }

    /// Set the path the resource manager dumps decoded resources to.
    pub fn dump_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.dump_path = path.into();
        self
    }

    /// Validate the server config and return the final options.
    pub fn build(mut self) -> Result<Self> {
        self.server.validate()?;
        Ok(self)
    }
}
