//! Remote API endpoints.

/// Default Anthropic Messages endpoint.
pub const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";
/// Default `OpenAI` Chat Completions endpoint.
pub const OPENAI_API_URL: &str = "https://api.openai.com/v1/chat/completions";
/// Default `DeepSeek` Chat Completions endpoint.
pub const DEEPSEEK_API_URL: &str = "https://api.deepseek.com/chat/completions";
/// Default `DeepL` endpoint for free-tier keys.
pub const DEEPL_FREE_API_URL: &str = "https://api-free.deepl.com/v2/translate";
/// Default `DeepL` endpoint for pro keys.
pub const DEEPL_PRO_API_URL: &str = "https://api.deepl.com/v2/translate";

/// Full URLs of the remote translation endpoints.
///
/// Defaults point at the vendors; tests and proxies override them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteEndpoints {
    /// Anthropic Messages endpoint.
    pub anthropic: String,
    /// `OpenAI` Chat Completions endpoint.
    pub openai: String,
    /// `DeepSeek` Chat Completions endpoint.
    pub deepseek: String,
    /// `DeepL` free-tier endpoint, used for keys ending in `:fx`.
    pub deepl_free: String,
    /// `DeepL` pro endpoint.
    pub deepl_pro: String,
}

impl Default for RemoteEndpoints {
    fn default() -> Self {
        Self {
            anthropic: ANTHROPIC_API_URL.to_string(),
            openai: OPENAI_API_URL.to_string(),
            deepseek: DEEPSEEK_API_URL.to_string(),
            deepl_free: DEEPL_FREE_API_URL.to_string(),
            deepl_pro: DEEPL_PRO_API_URL.to_string(),
        }
    }
}

impl RemoteEndpoints {
    /// Points every endpoint at `base`, keeping the vendor paths.
    ///
    /// Used to aim all providers at a single mock server.
    #[must_use]
    pub fn with_base(base: &str) -> Self {
        let base = base.trim_end_matches('/');
        Self {
            anthropic: format!("{base}/v1/messages"),
            openai: format!("{base}/v1/chat/completions"),
            deepseek: format!("{base}/chat/completions"),
            deepl_free: format!("{base}/free/v2/translate"),
            deepl_pro: format!("{base}/pro/v2/translate"),
        }
    }
}
