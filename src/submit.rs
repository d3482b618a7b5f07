use crate::error::ClaimError;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{error, info};

pub const DEFAULT_SUBMIT_URL: &str = "https://dapi.orbiter.finance/api/submit";

/// Body of the compensation submission.
///
/// # Example
///
/// ```json
/// {
///     "oldAddress": "0x9cf7036aef81df2c0e48de0bb2e32270ee3283d5",
///     "newAddress": "0xd334dfdecb041336b1d3cf6d541f1e4143dae3f2",
///     "ticketId": "1234",
///     "signature": "0x..."
/// }
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionRequest {
    pub old_address: String,
    pub new_address: String,
    pub ticket_id: String,
    pub signature: String,
}

#[derive(Debug, Clone)]
pub struct SubmissionClient {
    url: String,
    client: Client,
}

impl Default for SubmissionClient {
    fn default() -> Self {
        Self::new(DEFAULT_SUBMIT_URL)
    }
}

impl SubmissionClient {
    pub fn new(url: &str) -> Self {
        Self {
            url: url.to_string(),
            client: Client::new(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Posts the claim once and returns the server's message on success.
    ///
    /// A 2xx answer without a non-empty `message` still counts as a failure.
    pub async fn submit(&self, request: &SubmissionRequest) -> Result<String, ClaimError> {
        info!("Submitting claim for {}", request.old_address);
        let response = self
            .client
            .post(&self.url)
            .json(request)
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|e| {
                error!("Submission request failed: {:?}", e);
                ClaimError::from(e)
            })?;

        // Any JSON value is a well-formed reply; only the `message` field decides success.
        let body = response.json::<Value>().await.map_err(|e| {
            error!("Failed to parse submission response: {:?}", e);
            ClaimError::from(e)
        })?;

        match body.get("message").and_then(message_text) {
            Some(message) => {
                info!("Submission accepted: {}", message);
                Ok(message)
            }
            None => {
                error!("Submission response carried no message");
                Err(ClaimError::ServerResponse)
            }
        }
    }
}

/// Text for a `message` field that carries something to show.
fn message_text(value: &Value) -> Option<String> {
    match value {
        Value::Null | Value::Bool(false) => None,
        Value::String(text) if text.is_empty() => None,
        Value::String(text) => Some(text.clone()),
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        other => Some(other.to_string()),
    }
}
