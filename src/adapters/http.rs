use crate::core::{NewRemoteItem, RemoteSource};
use crate::utils::error::{QuoteError, Result};
use reqwest::Client;
use std::time::Duration;

/// JSON collection resource over HTTP (GET the list, POST new items).
#[derive(Debug, Clone)]
pub struct HttpRemote {
    client: Client,
    endpoint: String,
}

impl HttpRemote {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }
}

#[async_trait::async_trait]
impl RemoteSource for HttpRemote {
    async fn fetch_items(&self) -> Result<Vec<serde_json::Value>> {
        tracing::debug!("Fetching remote quotes from: {}", self.endpoint);
        let response = self.client.get(&self.endpoint).send().await?;

        tracing::debug!("Remote response status: {}", response.status());
        if !response.status().is_success() {
            return Err(QuoteError::RemoteStatusError {
                status: response.status().as_u16(),
            });
        }

        match response.json::<serde_json::Value>().await? {
            serde_json::Value::Array(items) => Ok(items),
            other => Err(QuoteError::RemotePayloadError {
                message: format!("expected a JSON array, got {}", json_kind(&other)),
            }),
        }
    }

    async fn create_item(&self, item: &NewRemoteItem) -> Result<()> {
        tracing::debug!("Posting quote to: {}", self.endpoint);
        let response = self.client.post(&self.endpoint).json(item).send().await?;

        if !response.status().is_success() {
            return Err(QuoteError::RemoteStatusError {
                status: response.status().as_u16(),
            });
        }
        Ok(())
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
