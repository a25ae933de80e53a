use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Host address and port for the HTTP server to listen on.
    #[arg(long, env = "SERVER_ADDR", default_value = "127.0.0.1:5000")]
    pub server_addr: String,

    /// API key for the Gemini generative-language API.
    #[arg(long, env = "CHAT_API_KEY", default_value = "")]
    pub chat_api_key: String,

    /// Base URL for the generative-language API (defaults to the public endpoint).
    #[arg(long, env = "CHAT_BASE_URL")]
    pub chat_base_url: Option<String>,

    /// Comma-separated chat model candidates, tried in order until one answers.
    #[arg(
        long,
        env = "CHAT_MODELS",
        default_value = "gemini-2.5-flash-lite,gemini-2.0-flash-lite,gemini-2.0-flash"
    )]
    pub chat_models: String,

    /// Upper bound on generated tokens per reply.
    #[arg(long, env = "CHAT_MAX_OUTPUT_TOKENS", default_value = "2000")]
    pub max_output_tokens: u32,

    /// Sampling temperature for the chat model.
    #[arg(long, env = "CHAT_TEMPERATURE", default_value = "0.5")]
    pub temperature: f32,

    /// Per-candidate request timeout in seconds. Bounds worst-case latency
    /// across the whole fallback chain.
    #[arg(long, env = "CHAT_TIMEOUT_SECS", default_value = "120")]
    pub request_timeout_secs: u64,

    /// Optional path to the TLS certificate file (PEM format) for enabling HTTPS. Requires --tls-key-path.
    #[arg(long, env = "TLS_CERT_PATH")]
    pub tls_cert_path: Option<String>,

    /// Optional path to the TLS private key file (PEM format) for enabling HTTPS. Requires --tls-cert-path.
    #[arg(long, env = "TLS_KEY_PATH")]
    pub tls_key_path: Option<String>,

    #[arg(long, env = "ENABLE_TLS", default_value = "false")]
    pub enable_tls: bool,
}

impl Args {
    /// Candidate models in priority order, highest first.
    pub fn model_candidates(&self) -> Vec<String> {
        self.chat_models
            .split(',')
            .map(str::trim)
            .filter(|model| !model.is_empty())
            .map(str::to_string)
            .collect()
    }
}
