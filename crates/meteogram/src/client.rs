//! Meteogram provider access.
//!
//! One GET per call, no retry and no caching. A transient failure surfaces
//! immediately as [`AtmoError::Fetch`].

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, instrument};

use atmo_common::{AtmoError, AtmoResult, Location};

use crate::config::ClientConfig;
use crate::model::ModelName;
use crate::payload::MeteogramResponse;

/// Anything that can return a meteogram for a model and location.
#[async_trait]
pub trait MeteogramSource: Send + Sync {
    async fn fetch(&self, model: &ModelName, location: Location) -> AtmoResult<MeteogramResponse>;
}

/// HTTP client for the windy.com meteogram endpoint.
#[derive(Debug, Clone)]
pub struct WindyClient {
    client: Client,
    config: ClientConfig,
}

impl WindyClient {
    /// Create a client with the given configuration.
    pub fn new(config: ClientConfig) -> AtmoResult<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| AtmoError::configuration(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    /// Endpoint for one model and location.
    pub fn meteogram_url(&self, model: &ModelName, location: Location) -> String {
        format!(
            "{}/forecast/meteogram/{}/{}/{}/?step=undefined",
            self.config.base_url, model, location.latitude, location.longitude
        )
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }
}

#[async_trait]
impl MeteogramSource for WindyClient {
    #[instrument(skip_all, fields(model = %model, location = %location))]
    async fn fetch(&self, model: &ModelName, location: Location) -> AtmoResult<MeteogramResponse> {
        let url = self.meteogram_url(model, location);
        debug!(url = %url, "Requesting meteogram");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(fetch_error)?;
        let body = response.text().await.map_err(fetch_error)?;

        debug!(bytes = body.len(), "Received meteogram");
        MeteogramResponse::parse(&body)
    }
}

fn fetch_error(err: reqwest::Error) -> AtmoError {
    if err.is_timeout() {
        AtmoError::fetch(format!("request timed out: {}", err))
    } else if let Some(status) = err.status() {
        AtmoError::fetch(format!("provider returned HTTP {}", status))
    } else {
        AtmoError::fetch(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meteogram_url() {
        let client = WindyClient::new(ClientConfig::default()).unwrap();
        let model = ModelName::normalize("ECMWF").unwrap();
        assert_eq!(
            client.meteogram_url(&model, Location::new(31.571, 120.294)),
            "https://node.windy.com/forecast/meteogram/ecmwf/31.571/120.294/?step=undefined"
        );
    }

    #[test]
    fn test_meteogram_url_custom_base() {
        let config = ClientConfig::default().with_base_url("http://127.0.0.1:9000/");
        let client = WindyClient::new(config).unwrap();
        let model = ModelName::normalize("iconeu").unwrap();
        assert_eq!(
            client.meteogram_url(&model, Location::new(48.1, -11.5)),
            "http://127.0.0.1:9000/forecast/meteogram/iconEu/48.1/-11.5/?step=undefined"
        );
    }

    #[tokio::test]
    async fn test_unreachable_host_is_fetch_error() {
        // Port 9 (discard) on localhost is expected to refuse connections
        let config = ClientConfig::default()
            .with_base_url("http://127.0.0.1:9")
            .with_timeout(std::time::Duration::from_secs(2));
        let client = WindyClient::new(config).unwrap();
        let model = ModelName::normalize("gfs").unwrap();

        let result = client.fetch(&model, Location::default()).await;
        assert!(matches!(result, Err(AtmoError::Fetch(_))));
    }
}
