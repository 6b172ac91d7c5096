// Model provider clients. Each one turns prompt text into reply text.

pub mod anthropic;
pub mod chat;
pub mod gemini;

use futures::future::BoxFuture;
use std::time::Duration;

pub use anthropic::AnthropicClient;
pub use chat::ChatCompletionsClient;
pub use gemini::GeminiClient;

#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("no API key configured")]
    MissingApiKey,
    #[error("request failed: {0}")]
    Http(reqwest::Error),
    /// `body` is kept for the log; it is not part of the message.
    #[error("HTTP {status}")]
    Status { status: u16, body: String },
    #[error("provider reply contained no text")]
    EmptyReply,
}

// Gemini carries its key in the query string, so the URL never goes into
// the error text.
impl From<reqwest::Error> for BackendError {
    fn from(e: reqwest::Error) -> Self {
        BackendError::Http(e.without_url())
    }
}

/// A language model that can be asked for a move.
pub trait ModelBackend: Send + Sync {
    /// Model name reported by `/agents`.
    fn model(&self) -> &str;

    fn invoke<'a>(&'a self, prompt: &'a str) -> BoxFuture<'a, Result<String, BackendError>>;
}

/// Build the HTTP client shared by every provider.
pub fn http_client(timeout: Duration) -> Result<reqwest::Client, BackendError> {
    Ok(reqwest::Client::builder().timeout(timeout).build()?)
}

/// Turn a non-2xx response into [`BackendError::Status`], keeping the body
/// for the log.
async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, BackendError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(BackendError::Status {
        status: status.as_u16(),
        body,
    })
}

fn non_empty(text: String) -> Result<String, BackendError> {
    if text.is_empty() {
        Err(BackendError::EmptyReply)
    } else {
        Ok(text)
    }
}
