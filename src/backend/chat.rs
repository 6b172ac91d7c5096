// OpenAI-style chat completions. Also spoken by AI21's Jamba endpoint.

use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};

use super::{check_status, non_empty, BackendError, ModelBackend};

#[derive(Serialize, Deserialize, Clone, Debug)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

pub struct ChatCompletionsClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
    model: String,
    temperature: Option<f32>,
}

impl ChatCompletionsClient {
    /// OpenAI: `{base_url}/v1/chat/completions`.
    pub fn openai(
        http: reqwest::Client,
        base_url: &str,
        api_key: Option<String>,
        model: String,
    ) -> Self {
        Self {
            http,
            endpoint: format!("{}/v1/chat/completions", base_url.trim_end_matches('/')),
            api_key,
            model,
            temperature: None,
        }
    }

    /// AI21 Studio: `{base_url}/studio/v1/chat/completions`, sampled at
    /// temperature 0.
    pub fn ai21(
        http: reqwest::Client,
        base_url: &str,
        api_key: Option<String>,
        model: String,
    ) -> Self {
        Self {
            http,
            endpoint: format!(
                "{}/studio/v1/chat/completions",
                base_url.trim_end_matches('/')
            ),
            api_key,
            model,
            temperature: Some(0.0),
        }
    }

    async fn complete(&self, prompt: &str) -> Result<String, BackendError> {
        let api_key = self.api_key.as_deref().ok_or(BackendError::MissingApiKey)?;
        let body = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
            temperature: self.temperature,
        };

        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await?;
        let response: ChatCompletionResponse = check_status(response).await?.json().await?;

        let text = response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .unwrap_or_default();
        non_empty(text)
    }
}

impl ModelBackend for ChatCompletionsClient {
    fn model(&self) -> &str {
        &self.model
    }

    fn invoke<'a>(&'a self, prompt: &'a str) -> BoxFuture<'a, Result<String, BackendError>> {
        Box::pin(self.complete(prompt))
    }
}
