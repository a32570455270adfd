// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Client and transport configuration

use std::env;
use std::time::Duration;

use crate::http::DEFAULT_USER_AGENT;

/// Environment variable holding the default base URL
pub const ENV_BASE_URL: &str = "REQKIT_BASE_URL";
/// Environment variable overriding the user agent
pub const ENV_USER_AGENT: &str = "REQKIT_USER_AGENT";
/// Environment variable holding a proxy URL
pub const ENV_PROXY: &str = "REQKIT_PROXY";

/// Client configuration
#[derive(Debug, Clone, Default)]
pub struct ClientConfig {
    /// Prepended to every string URL unless a request sets its own base
    pub base_url: Option<String>,
    /// Settings for the default reqwest transport
    pub transport: TransportConfig,
}

impl ClientConfig {
    /// Create a new client config
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the default base URL
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Set transport settings
    pub fn transport(mut self, transport: TransportConfig) -> Self {
        self.transport = transport;
        self
    }

    /// Build a config from `REQKIT_*` environment variables
    ///
    /// Unset or empty variables leave the defaults in place.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(base) = non_empty_var(ENV_BASE_URL) {
            config.base_url = Some(base);
        }
        if let Some(user_agent) = non_empty_var(ENV_USER_AGENT) {
            config.transport.user_agent = user_agent;
        }
        if let Some(proxy) = non_empty_var(ENV_PROXY) {
            config.transport.proxy = Some(proxy);
        }
        config
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.is_empty())
}

/// Transport configuration
#[derive(Debug, Clone)]
pub struct TransportConfig {
    /// User agent string
    pub user_agent: String,
    /// Overall request timeout; none by default
    pub timeout: Option<Duration>,
    /// Maximum redirects to follow
    pub max_redirects: usize,
    /// Accept invalid certificates (dangerous!)
    pub accept_invalid_certs: bool,
    /// Proxy URL
    pub proxy: Option<String>,
    /// Headers sent with every request
    pub default_headers: Vec<(String, String)>,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: None,
            max_redirects: 10,
            accept_invalid_certs: false,
            proxy: None,
            default_headers: vec![],
        }
    }
}

impl TransportConfig {
    /// Create a new transport config
    pub fn new() -> Self {
        Self::default()
    }

    /// Set user agent
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set max redirects
    pub fn max_redirects(mut self, max: usize) -> Self {
        self.max_redirects = max;
        self
    }

    /// Accept invalid certificates
    pub fn accept_invalid_certs(mut self, accept: bool) -> Self {
        self.accept_invalid_certs = accept;
        self
    }

    /// Set proxy
    pub fn proxy(mut self, proxy: impl Into<String>) -> Self {
        self.proxy = Some(proxy.into());
        self
    }

    /// Add default header
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers.push((name.into(), value.into()));
        self
    }
}
