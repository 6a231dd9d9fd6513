//! Proxied HTTP transport
//!
//! Every request leaves through the proxy under test for both `http` and
//! `https` targets. The transport is a trait so workloads can run against a
//! scripted fake instead of the network.


use crate::{
    error::{AppError, Result},
    models::Config,
};
use async_trait::async_trait;
use reqwest::{Client, Proxy, Url};
use std::time::Duration;

/// User agent sent with every probe
pub const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Capability to issue one GET routed through the proxy
#[async_trait]
pub trait ProxiedTransport: Send + Sync {
    /// Issue a single GET and read the body to completion. No retries.
    async fn get(&self, url: &str) -> Result<TransportResponse>;
}

/// Response observed at the end of the proxy/origin chain
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status_code: u16,
    pub body_size: usize,
}

impl TransportResponse {
    pub fn new(status_code: u16, body_size: usize) -> Self {
        Self { status_code, body_size }
    }
}

/// reqwest-backed transport with both schemes proxied to one address
pub struct ProxyClient {
    client: Client,
    proxy_url: String,
    timeout: Option<Duration>,
}

impl ProxyClient {
    /// Create a client without a request timeout
    pub fn new(proxy_url: &str) -> Result<Self> {
        Self::build(proxy_url, None)
    }

    /// Create a client that gives up on a request after `timeout`
    pub fn with_timeout(proxy_url: &str, timeout: Duration) -> Result<Self> {
        Self::build(proxy_url, Some(timeout))
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::build(&config.proxy_url, config.timeout())
    }

    fn build(proxy_url: &str, timeout: Option<Duration>) -> Result<Self> {
        let http_proxy = Proxy::http(proxy_url)
            .map_err(|e| AppError::config(format!("Invalid proxy URL '{}': {}", proxy_url, e)))?;
        let https_proxy = Proxy::https(proxy_url)
            .map_err(|e| AppError::config(format!("Invalid proxy URL '{}': {}", proxy_url, e)))?;

        // No idle connections are kept, so each probe pays for its own connect.
        let mut builder = Client::builder()
            .proxy(http_proxy)
            .proxy(https_proxy)
            .pool_max_idle_per_host(0)
            .user_agent(USER_AGENT);

        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder
            .build()
            .map_err(|e| AppError::network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            proxy_url: proxy_url.to_string(),
            timeout,
        })
    }

    pub fn proxy_url(&self) -> &str {
        &self.proxy_url
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}

#[async_trait]
impl ProxiedTransport for ProxyClient {
    async fn get(&self, url: &str) -> Result<TransportResponse> {
        let response = self.client.get(url).send().await?;
        let status_code = response.status().as_u16();
        let body = response.bytes().await?;

        Ok(TransportResponse::new(status_code, body.len()))
    }
}

/// Utility functions for HTTP operations
pub struct HttpUtils;

impl HttpUtils {
    /// Target URL for a resource: origin, one `/`, then the name verbatim
    pub fn resource_url(origin_url: &str, resource_name: &str) -> String {
        format!("{}/{}", origin_url, resource_name)
    }

    /// True for `localhost` and loopback IP hosts
    pub fn is_loopback(url: &str) -> bool {
        match Url::parse(url).ok().as_ref().and_then(Url::host) {
            Some(url::Host::Domain(domain)) => domain.eq_ignore_ascii_case("localhost"),
            Some(url::Host::Ipv4(ip)) => ip.is_loopback(),
            Some(url::Host::Ipv6(ip)) => ip.is_loopback(),
            None => false,
        }
    }

    /// Check if URL uses HTTPS
    pub fn is_https(url: &str) -> bool {
        url.starts_with("https://")
    }
}
