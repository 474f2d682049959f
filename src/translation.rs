use crate::config::Config;
use crate::error::TranslationError;
use crate::languages::LanguageTarget;
use crate::retry::{with_retry_if, RetryConfig};
use crate::youtube::Localization;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// OpenAI Chat Completion request for translation
#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<Message>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize, Deserialize)]
struct Message {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Message,
}

/// Fixed low temperature so repeated runs produce stable output.
const TRANSLATION_TEMPERATURE: f32 = 0.2;

const MAX_TRANSLATION_TOKENS: u32 = 1024;

/// Build the system prompt for translation
fn build_system_prompt(target_language: &str) -> String {
    format!(
        r#"You are a professional translator localizing YouTube video metadata.
Translate the text the user provides from English to {}.

Rules:
- Return only the translated text, with no quotes, labels, or commentary
- Preserve line breaks, hashtags, URLs, and @mentions exactly as written
- Keep proper names of people, companies, and products untranslated
- Match the tone of the original"#,
        target_language
    )
}

/// Translate a single piece of text into the target language.
///
/// Empty or whitespace-only input is nothing to translate: it short-circuits
/// to an empty result with no API call. Transient API failures (429, 5xx,
/// network) are retried; anything else fails the call.
pub async fn translate(
    client: &reqwest::Client,
    config: &Config,
    text: &str,
    target: &LanguageTarget,
) -> Result<String, TranslationError> {
    if text.trim().is_empty() {
        debug!("Nothing to translate for {}, skipping call", target.code);
        return Ok(String::new());
    }

    let request = ChatRequest {
        model: config.openai_model.clone(),
        messages: vec![
            Message {
                role: "system".to_string(),
                content: build_system_prompt(target.name),
            },
            Message {
                role: "user".to_string(),
                content: text.to_string(),
            },
        ],
        max_tokens: MAX_TRANSLATION_TOKENS,
        temperature: TRANSLATION_TEMPERATURE,
    };

    with_retry_if(
        &RetryConfig::api_call(),
        &format!("Translation to {}", target.name),
        || async {
            let response = client
                .post(&config.openai_api_url)
                .header("Authorization", format!("Bearer {}", config.openai_api_key))
                .header("Content-Type", "application/json")
                .json(&request)
                .send()
                .await
                .map_err(TranslationError::Http)?;

            if !response.status().is_success() {
                let status = response.status().as_u16();
                let message = response.text().await.unwrap_or_default();
                return Err(TranslationError::Api { status, message });
            }

            let chat_response: ChatResponse =
                response.json().await.map_err(TranslationError::Http)?;

            let translated = chat_response
                .choices
                .first()
                .map(|c| c.message.content.trim().to_string())
                .ok_or(TranslationError::EmptyResponse)?;

            if translated.is_empty() {
                return Err(TranslationError::EmptyResponse);
            }

            Ok(translated)
        },
        TranslationError::is_retryable,
    )
    .await
}

/// Translate both metadata fields for one language.
///
/// Returns a localization only when both the title and the description came
/// back non-empty. A failed or empty half drops the whole language so a
/// title is never published without its matching description. Both fields
/// are always attempted so the log attributes every broken field.
pub async fn translate_pair(
    client: &reqwest::Client,
    config: &Config,
    target: &LanguageTarget,
    title: &str,
    description: &str,
) -> Option<Localization> {
    let title_result = translate(client, config, title, target).await;
    let description_result = translate(client, config, description, target).await;

    if let Err(e) = &title_result {
        warn!(
            "Translation of title to {} ({}) failed: {}",
            target.name, target.code, e
        );
    }
    if let Err(e) = &description_result {
        warn!(
            "Translation of description to {} ({}) failed: {}",
            target.name, target.code, e
        );
    }

    match (title_result, description_result) {
        (Ok(title), Ok(description)) if !title.is_empty() && !description.is_empty() => {
            Some(Localization { title, description })
        }
        (Ok(_), Ok(_)) => {
            debug!(
                "Incomplete translation for {} (empty field), dropping language",
                target.code
            );
            None
        }
        _ => None,
    }
}
