use crate::domain::model::Restaurant;
use crate::utils::error::{DirectoryError, Result};
use reqwest::Client;
use std::time::Duration;

/// Thin wrapper over the remote restaurants API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    endpoint: String,
}

impl ApiClient {
    pub fn new(endpoint: impl Into<String>, timeout_seconds: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub async fn fetch_restaurants(&self) -> Result<Vec<Restaurant>> {
        tracing::debug!("Making API request to: {}", self.endpoint);
        let response = self.client.get(&self.endpoint).send().await?;

        tracing::debug!("API response status: {}", response.status());

        if !response.status().is_success() {
            return Err(DirectoryError::HttpStatusError {
                status: response.status().as_u16(),
                url: self.endpoint.clone(),
            });
        }

        let body = response.bytes().await?;
        let restaurants: Vec<Restaurant> = serde_json::from_slice(&body)?;
        tracing::debug!("Fetched {} restaurants", restaurants.len());
        Ok(restaurants)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    #[tokio::test]
    async fn test_fetch_restaurants_parses_array() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET).path("/restaurants");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!([
                    {
                        "id": 1,
                        "name": "Mission Chinese Food",
                        "neighborhood": "Manhattan",
                        "address": "171 E Broadway",
                        "cuisine_type": "Asian",
                        "photograph": "1",
                        "latlng": {"lat": 40.713829, "lng": -73.989667}
                    }
                ]));
        });

        let client = ApiClient::new(server.url("/restaurants"), 5).unwrap();
        let restaurants = client.fetch_restaurants().await.unwrap();

        api_mock.assert();
        assert_eq!(restaurants.len(), 1);
        assert_eq!(restaurants[0].name, "Mission Chinese Food");
    }

    #[tokio::test]
    async fn test_fetch_restaurants_status_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/restaurants");
            then.status(500);
        });

        let client = ApiClient::new(server.url("/restaurants"), 5).unwrap();
        let err = client.fetch_restaurants().await.unwrap_err();

        assert!(matches!(
            err,
            DirectoryError::HttpStatusError { status: 500, .. }
        ));
    }

    #[tokio::test]
    async fn test_fetch_restaurants_rejects_non_array() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/restaurants");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({"error": "nope"}));
        });

        let client = ApiClient::new(server.url("/restaurants"), 5).unwrap();
        let err = client.fetch_restaurants().await.unwrap_err();

        assert!(matches!(err, DirectoryError::SerializationError(_)));
        assert!(!err.is_network());
    }
}
