use anyhow::{Context, Result};

#[derive(Debug, Clone)]
pub struct Config {
    // YouTube
    pub video_id: String,
    pub credentials_file: String,
    pub youtube_api_base: String,

    // OpenAI
    pub openai_api_key: String,
    pub openai_model: String,
    pub openai_api_url: String,

    // Sync behavior
    pub target_language_codes: Vec<String>,
    pub max_concurrent_translations: usize,
    pub request_timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            // YouTube - resource id and OAuth credential file
            video_id: std::env::var("MY_VIDEO_ID").context("MY_VIDEO_ID not set")?,
            credentials_file: std::env::var("OAUTH_CREDENTIALS_FILE")
                .unwrap_or_else(|_| "oauth2.json".to_string()),
            youtube_api_base: std::env::var("YOUTUBE_API_BASE")
                .unwrap_or_else(|_| "https://www.googleapis.com/youtube/v3".to_string()),

            // OpenAI
            openai_api_key: std::env::var("OPENAI_API_KEY").context("OPENAI_API_KEY not set")?,
            openai_model: std::env::var("OPENAI_MODEL")
                .unwrap_or_else(|_| "gpt-4o-mini".to_string()),
            openai_api_url: std::env::var("OPENAI_API_URL")
                .unwrap_or_else(|_| "https://api.openai.com/v1/chat/completions".to_string()),

            // Sync behavior
            target_language_codes: std::env::var("TARGET_LANGUAGES")
                .unwrap_or_else(|_| "es,fr,de,it,pt,ja,ko".to_string())
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            max_concurrent_translations: std::env::var("MAX_CONCURRENT_TRANSLATIONS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(4),
            request_timeout_secs: std::env::var("REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),
        })
    }
}
