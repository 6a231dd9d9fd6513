//! Single measured request through the proxy

use crate::{
    client::{HttpUtils, ProxiedTransport},
    clock::Clock,
    logging::ProbeLogger,
    models::{Config, ProbeResult},
};
use std::sync::Arc;

/// Issues one GET per call and reports how long it took
///
/// A probe never fails: transport errors are folded into the returned
/// [`ProbeResult`] with the `-1` elapsed sentinel.
pub struct RequestProbe {
    transport: Arc<dyn ProxiedTransport>,
    clock: Arc<dyn Clock>,
    origin_url: String,
    logger: ProbeLogger,
}

impl RequestProbe {
    pub fn new(
        transport: Arc<dyn ProxiedTransport>,
        clock: Arc<dyn Clock>,
        origin_url: impl Into<String>,
        logger: ProbeLogger,
    ) -> Self {
        Self {
            transport,
            clock,
            origin_url: origin_url.into(),
            logger,
        }
    }

    pub fn from_config(config: &Config, transport: Arc<dyn ProxiedTransport>, clock: Arc<dyn Clock>) -> Self {
        Self::new(transport, clock, config.origin_url.clone(), ProbeLogger::new(config))
    }

    pub fn origin_url(&self) -> &str {
        &self.origin_url
    }

    /// GET `origin/<resource_name>` through the proxy and time it
    pub async fn probe(&self, resource_name: &str) -> ProbeResult {
        let url = HttpUtils::resource_url(&self.origin_url, resource_name);

        let start = self.clock.now();
        let outcome = self.transport.get(&url).await;
        let elapsed = self.clock.since(start);

        let result = match outcome {
            Ok(response) => ProbeResult::success(elapsed, response.status_code),
            Err(error) => ProbeResult::failed(&error),
        };

        self.logger.log_probe(&url, &result).await;
        result
    }
}
