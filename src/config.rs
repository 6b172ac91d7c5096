// Application configuration, loaded from environment variables and CLI flags.

use std::time::Duration;

/// Connection settings for one model provider.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
}

impl ProviderConfig {
    fn from_env(prefix: &str, key_var: &str, default_model: &str, default_base: &str) -> Self {
        let api_key = std::env::var(key_var).ok().filter(|k| !k.is_empty());
        let model = std::env::var(format!("{prefix}_MODEL"))
            .unwrap_or_else(|_| default_model.to_string());
        ProviderConfig {
            api_key,
            model,
            base_url: default_base.to_string(),
        }
    }

    fn with_base_url_var(mut self, var: &str) -> Self {
        if let Ok(url) = std::env::var(var) {
            self.base_url = url;
        }
        self
    }
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Address to bind the HTTP server to.
    pub bind_addr: String,
    /// Port to bind the HTTP server to.
    pub port: u16,
    /// Upper bound on `rounds` accepted by either endpoint.
    pub max_rounds: u32,
    /// Per-request timeout for model provider calls.
    pub backend_timeout: Duration,
    pub gemini: ProviderConfig,
    pub ai21: ProviderConfig,
    pub claude: ProviderConfig,
    pub openai: ProviderConfig,
}

pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_MAX_ROUNDS: u32 = 100;
pub const DEFAULT_BACKEND_TIMEOUT_SECS: u64 = 120;

impl Config {
    /// Load configuration from environment variables and CLI arguments.
    ///
    /// Environment variables:
    /// - `PORT` - HTTP server port (default: 8000)
    /// - `BIND_ADDR` - Listen address (default: `0.0.0.0`)
    /// - `MAX_ROUNDS` - Largest accepted round count (default: 100)
    /// - `BACKEND_TIMEOUT_SECS` - Provider call timeout (default: 120)
    /// - `GEMINI_API_KEY`, `AI21_API_KEY`, `ANTHROPIC_API_KEY`, `OPENAI_API_KEY`
    /// - `GEMINI_MODEL`, `AI21_MODEL`, `CLAUDE_MODEL`, `OPENAI_MODEL`
    /// - `GEMINI_BASE_URL`, `AI21_BASE_URL`, `ANTHROPIC_BASE_URL`, `OPENAI_BASE_URL`
    ///
    /// CLI flags:
    /// - `--port <PORT>` - Override the port
    pub fn load() -> Self {
        let args: Vec<String> = std::env::args().collect();

        // Port: CLI flag --port takes precedence, then env var, then default
        let port = Self::parse_cli_value(&args, "--port")
            .and_then(|v| v.parse().ok())
            .or_else(|| std::env::var("PORT").ok().and_then(|v| v.parse().ok()))
            .unwrap_or(DEFAULT_PORT);

        let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0".to_string());

        let max_rounds = std::env::var("MAX_ROUNDS")
            .ok()
            .and_then(|v| v.parse().ok())
            .filter(|n| *n > 0)
            .unwrap_or(DEFAULT_MAX_ROUNDS);

        let backend_timeout = std::env::var("BACKEND_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(DEFAULT_BACKEND_TIMEOUT_SECS));

        Config {
            bind_addr,
            port,
            max_rounds,
            backend_timeout,
            gemini: ProviderConfig::from_env(
                "GEMINI",
                "GEMINI_API_KEY",
                "gemini-2.0-flash-thinking-exp-01-21",
                "https://generativelanguage.googleapis.com",
            )
            .with_base_url_var("GEMINI_BASE_URL"),
            ai21: ProviderConfig::from_env(
                "AI21",
                "AI21_API_KEY",
                "jamba-1.5-large",
                "https://api.ai21.com",
            )
            .with_base_url_var("AI21_BASE_URL"),
            claude: ProviderConfig::from_env(
                "CLAUDE",
                "ANTHROPIC_API_KEY",
                "claude-3-5-sonnet-20241022",
                "https://api.anthropic.com",
            )
            .with_base_url_var("ANTHROPIC_BASE_URL"),
            openai: ProviderConfig::from_env(
                "OPENAI",
                "OPENAI_API_KEY",
                "o1-preview",
                "https://api.openai.com",
            )
            .with_base_url_var("OPENAI_BASE_URL"),
        }
    }

    /// Parse a CLI flag value like `--port 8080`.
    fn parse_cli_value(args: &[String], flag: &str) -> Option<String> {
        args.windows(2).find_map(|pair| {
            if pair[0] == flag {
                Some(pair[1].clone())
            } else {
                None
            }
        })
    }
}
