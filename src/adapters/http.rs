use crate::core::{Result, VenueRecord, VenueSource};
use crate::utils::error::VenueError;
use crate::utils::validation::validate_venue;
use reqwest::Client;
use std::time::Duration;

/// Reads the venue list from a JSON endpoint that returns an array of venues.
#[derive(Debug, Clone)]
pub struct HttpVenueSource {
    client: Client,
    endpoint: String,
}

impl HttpVenueSource {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait::async_trait]
impl VenueSource for HttpVenueSource {
    fn name(&self) -> &str {
        "http"
    }

    async fn fetch_venues(&self) -> Result<Vec<VenueRecord>> {
        tracing::debug!("Making API request to: {}", self.endpoint);
        let response = self.client.get(&self.endpoint).send().await?;

        let status = response.status();
        tracing::debug!("API response status: {}", status);
        if !status.is_success() {
            return Err(VenueError::UpstreamStatus {
                status: status.as_u16(),
                endpoint: self.endpoint.clone(),
            });
        }

        let venues: Vec<VenueRecord> = response.json().await?;
        let total = venues.len();

        let valid: Vec<VenueRecord> = venues
            .into_iter()
            .filter(|venue| match validate_venue(venue) {
                Ok(()) => true,
                Err(e) => {
                    tracing::warn!("Skipping venue: {}", e);
                    false
                }
            })
            .collect();

        if valid.len() < total {
            tracing::warn!(
                "Dropped {} of {} venues that failed validation",
                total - valid.len(),
                total
            );
        }

        Ok(valid)
    }
}
