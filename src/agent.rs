// Agent identifiers and the roster of backends they map to.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::backend::{
    self, AnthropicClient, BackendError, ChatCompletionsClient, GeminiClient, ModelBackend,
};
use crate::config::Config;

/// The fixed set of agents a game can be played with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AgentId {
    Gemini,
    AI21,
    Claude,
    OpenAI,
}

impl AgentId {
    pub const ALL: [AgentId; 4] = [AgentId::Gemini, AgentId::AI21, AgentId::Claude, AgentId::OpenAI];

    /// Parse an identifier as sent by clients. Matching is exact.
    pub fn from_str_name(s: &str) -> Option<Self> {
        match s {
            "Gemini" => Some(Self::Gemini),
            "AI21" => Some(Self::AI21),
            "Claude" => Some(Self::Claude),
            "OpenAI" => Some(Self::OpenAI),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Gemini => "Gemini",
            Self::AI21 => "AI21",
            Self::Claude => "Claude",
            Self::OpenAI => "OpenAI",
        }
    }
}

impl std::fmt::Display for AgentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One backend per agent, built once at startup and shared read-only.
#[derive(Clone)]
pub struct Roster {
    gemini: Arc<dyn ModelBackend>,
    ai21: Arc<dyn ModelBackend>,
    claude: Arc<dyn ModelBackend>,
    openai: Arc<dyn ModelBackend>,
}

impl Roster {
    pub fn new(
        gemini: Arc<dyn ModelBackend>,
        ai21: Arc<dyn ModelBackend>,
        claude: Arc<dyn ModelBackend>,
        openai: Arc<dyn ModelBackend>,
    ) -> Self {
        Self {
            gemini,
            ai21,
            claude,
            openai,
        }
    }

    /// Build the provider clients described by `config`.
    pub fn from_config(config: &Config) -> Result<Self, BackendError> {
        let http = backend::http_client(config.backend_timeout)?;

        for (agent, provider) in [
            (AgentId::Gemini, &config.gemini),
            (AgentId::AI21, &config.ai21),
            (AgentId::Claude, &config.claude),
            (AgentId::OpenAI, &config.openai),
        ] {
            if provider.api_key.is_none() {
                tracing::warn!("No API key configured for {agent}; games using it will fail");
            }
        }

        Ok(Self::new(
            Arc::new(GeminiClient::new(
                http.clone(),
                &config.gemini.base_url,
                config.gemini.api_key.clone(),
                config.gemini.model.clone(),
            )),
            Arc::new(ChatCompletionsClient::ai21(
                http.clone(),
                &config.ai21.base_url,
                config.ai21.api_key.clone(),
                config.ai21.model.clone(),
            )),
            Arc::new(AnthropicClient::new(
                http.clone(),
                &config.claude.base_url,
                config.claude.api_key.clone(),
                config.claude.model.clone(),
            )),
            Arc::new(ChatCompletionsClient::openai(
                http,
                &config.openai.base_url,
                config.openai.api_key.clone(),
                config.openai.model.clone(),
            )),
        ))
    }

    pub fn backend(&self, agent: AgentId) -> &dyn ModelBackend {
        match agent {
            AgentId::Gemini => self.gemini.as_ref(),
            AgentId::AI21 => self.ai21.as_ref(),
            AgentId::Claude => self.claude.as_ref(),
            AgentId::OpenAI => self.openai.as_ref(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_agent_parsing_is_exact() {
        assert_eq!(AgentId::from_str_name("Gemini"), Some(AgentId::Gemini));
        assert_eq!(AgentId::from_str_name("AI21"), Some(AgentId::AI21));
        assert_eq!(AgentId::from_str_name("Claude"), Some(AgentId::Claude));
        assert_eq!(AgentId::from_str_name("OpenAI"), Some(AgentId::OpenAI));
        assert_eq!(AgentId::from_str_name("openai"), None);
        assert_eq!(AgentId::from_str_name("GPT"), None);
        assert_eq!(AgentId::from_str_name(""), None);
    }

    #[test]
    fn test_agent_names_round_trip() {
        for agent in AgentId::ALL {
            assert_eq!(AgentId::from_str_name(agent.as_str()), Some(agent));
        }
    }
}
