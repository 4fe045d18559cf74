use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use crate::services::upstream::{build_http_client, join_url, UpstreamError};

const OPPORTUNITIES_PATH: &str = "/api/opportunities/";

/// Client for the opportunity provider service
///
/// Records are returned as raw JSON so the matcher can validate them one
/// at a time instead of failing the whole list on one bad entry.
pub struct OpportunityClient {
    base_url: String,
    client: Client,
}

impl OpportunityClient {
    pub fn new(base_url: String, timeout: Duration) -> Result<Self, UpstreamError> {
        Ok(Self {
            base_url,
            client: build_http_client(timeout)?,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch every published opportunity with its criteria
    pub async fn list_opportunities(&self) -> Result<Vec<Value>, UpstreamError> {
        let url = join_url(&self.base_url, OPPORTUNITIES_PATH);

        tracing::debug!("Fetching opportunities from: {}", url);

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(UpstreamError::ApiError(format!(
                "Failed to fetch opportunities: {}",
                response.status()
            )));
        }

        let json: Value = response.json().await?;

        let records = match json {
            Value::Array(records) => records,
            // tolerate a paginated envelope
            Value::Object(mut obj) => match obj.remove("items") {
                Some(Value::Array(records)) => records,
                _ => {
                    return Err(UpstreamError::InvalidResponse(
                        "Expected an array of opportunities".into(),
                    ))
                }
            },
            _ => {
                return Err(UpstreamError::InvalidResponse(
                    "Expected an array of opportunities".into(),
                ))
            }
        };

        tracing::debug!("Fetched {} opportunity records", records.len());

        Ok(records)
    }

    /// Whether the provider answers at all
    pub async fn health_check(&self) -> Result<bool, UpstreamError> {
        let response = self.client.get(join_url(&self.base_url, "/")).send().await?;
        Ok(!response.status().is_server_error())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base_url: String) -> OpportunityClient {
        OpportunityClient::new(base_url, Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_list_opportunities() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/opportunities/")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"[{"id": 1, "title": "A", "description": "", "type": "program"}, {"bad": true}]"#)
            .create_async()
            .await;

        let records = client(server.url()).list_opportunities().await.unwrap();

        assert_eq!(records.len(), 2);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_list_opportunities_envelope() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/opportunities/")
            .with_status(200)
            .with_body(r#"{"items": [{"id": 1}], "total": 1}"#)
            .create_async()
            .await;

        let records = client(server.url()).list_opportunities().await.unwrap();

        assert_eq!(records.len(), 1);
    }

    #[tokio::test]
    async fn test_list_opportunities_server_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/opportunities/")
            .with_status(503)
            .create_async()
            .await;

        let result = client(server.url()).list_opportunities().await;

        assert!(matches!(result, Err(UpstreamError::ApiError(_))));
    }

    #[tokio::test]
    async fn test_list_opportunities_not_a_list() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/opportunities/")
            .with_status(200)
            .with_body(r#""nope""#)
            .create_async()
            .await;

        let result = client(server.url()).list_opportunities().await;

        assert!(matches!(result, Err(UpstreamError::InvalidResponse(_))));
    }
}
