//! Pre-flight diagnostics.
//!
//! Exercises each external collaborator on its own before a sync run so a
//! broken credential, translation key, or API scope fails fast with the
//! component named, instead of surfacing as a generic error mid-pipeline.
//! Optional: the sync engine does not depend on it.

use crate::config::Config;
use crate::credentials::CredentialStore;
use crate::languages::LanguageTarget;
use crate::translation::translate;
use crate::youtube;
use anyhow::{bail, Context, Result};
use tracing::info;

const PROBE_TEXT: &str = "Hello from the pre-flight check";

/// Run every pre-flight check, stopping at the first failing component.
pub async fn run_preflight(
    client: &reqwest::Client,
    config: &Config,
    targets: &[LanguageTarget],
) -> Result<()> {
    // Credential store: load + validity/refresh
    let store = CredentialStore::new(&config.credentials_file);
    let credential = store.load().context("Pre-flight: credential store failed")?;
    let credential = store
        .ensure_valid(client, credential)
        .await
        .context("Pre-flight: credential store failed")?;
    info!("Pre-flight: credential store OK");

    // Translation provider: one throwaway translation
    let Some(target) = targets.first() else {
        bail!("Pre-flight: no target languages configured");
    };
    let translated = translate(client, config, PROBE_TEXT, target)
        .await
        .context("Pre-flight: translation provider failed")?;
    if translated.is_empty() {
        bail!("Pre-flight: translation provider returned an empty result");
    }
    info!("Pre-flight: translation provider OK ({} -> {})", PROBE_TEXT, translated);

    // Metadata client: one read, then a write that replays what was read
    let video = youtube::fetch_video(client, config, &credential.token, &config.video_id)
        .await
        .context("Pre-flight: metadata read failed")?;
    info!(
        "Pre-flight: metadata read OK (video {}, {} localizations)",
        video.id,
        video.localizations.len()
    );

    if video.localizations.is_empty() {
        // Nothing stored yet; replaying an empty map proves nothing, skip
        info!("Pre-flight: no stored localizations, skipping write check");
    } else {
        youtube::update_localizations(
            client,
            config,
            &credential.token,
            &config.video_id,
            &video.localizations,
        )
        .await
        .context("Pre-flight: metadata write failed")?;
        info!("Pre-flight: metadata write OK (no-op replay)");
    }

    info!("Pre-flight: all checks passed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn create_test_config(youtube_base: &str, openai_url: &str, creds: &str) -> Config {
        Config {
            video_id: "vid-123".to_string(),
            credentials_file: creds.to_string(),
            youtube_api_base: youtube_base.to_string(),
            openai_api_key: "test-openai-key".to_string(),
            openai_model: "gpt-4o-mini".to_string(),
            openai_api_url: openai_url.to_string(),
            target_language_codes: vec!["es".to_string()],
            max_concurrent_translations: 4,
            request_timeout_secs: 30,
        }
    }

    fn spanish_targets() -> Vec<LanguageTarget> {
        vec![LanguageTarget {
            code: "es",
            name: "Spanish",
        }]
    }

    fn write_valid_credentials(dir: &TempDir) -> String {
        let path = dir.path().join("oauth2.json");
        std::fs::write(
            &path,
            r#"{
                "token": "access-token",
                "refresh_token": "refresh-token",
                "token_uri": "https://oauth2.googleapis.com/token",
                "client_id": "c",
                "client_secret": "s",
                "scopes": []
            }"#,
        )
        .expect("Failed to write credentials");
        path.to_str().unwrap().to_string()
    }

    fn openai_ok(content: &str) -> ResponseTemplate {
        ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "choices": [{"index": 0, "message": {"role": "assistant", "content": content}}]
        }))
    }

    #[tokio::test]
    async fn test_preflight_all_components_pass() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(openai_ok("Hola desde la comprobación"))
            .expect(1)
            .mount(&mock_server)
            .await;

        Mock::given(method("GET"))
            .and(path("/videos"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "items": [{
                    "id": "vid-123",
                    "snippet": {"title": "Hello", "description": "World"},
                    "localizations": {"de": {"title": "Hallo", "description": "Welt"}}
                }]
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        Mock::given(method("PUT"))
            .and(path("/videos"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"id": "vid-123"})),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let dir = TempDir::new().unwrap();
        let creds = write_valid_credentials(&dir);
        let config = create_test_config(
            &mock_server.uri(),
            &format!("{}/v1/chat/completions", mock_server.uri()),
            &creds,
        );
        let client = reqwest::Client::new();

        run_preflight(&client, &config, &spanish_targets())
            .await
            .expect("All probes should pass");
    }

    #[tokio::test]
    async fn test_preflight_skips_write_when_no_localizations_exist() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(openai_ok("Hola"))
            .mount(&mock_server)
            .await;

        Mock::given(method("GET"))
            .and(path("/videos"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "items": [{"id": "vid-123", "snippet": {"title": "T", "description": "D"}}]
            })))
            .mount(&mock_server)
            .await;

        Mock::given(method("PUT"))
            .and(path("/videos"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&mock_server)
            .await;

        let dir = TempDir::new().unwrap();
        let creds = write_valid_credentials(&dir);
        let config = create_test_config(
            &mock_server.uri(),
            &format!("{}/v1/chat/completions", mock_server.uri()),
            &creds,
        );
        let client = reqwest::Client::new();

        run_preflight(&client, &config, &spanish_targets())
            .await
            .expect("Probe should pass without a write");
    }

    #[tokio::test]
    async fn test_preflight_attributes_translation_failure() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(401).set_body_string("bad key"))
            .mount(&mock_server)
            .await;

        // The metadata client must never be reached
        Mock::given(method("GET"))
            .and(path("/videos"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&mock_server)
            .await;

        let dir = TempDir::new().unwrap();
        let creds = write_valid_credentials(&dir);
        let config = create_test_config(
            &mock_server.uri(),
            &format!("{}/v1/chat/completions", mock_server.uri()),
            &creds,
        );
        let client = reqwest::Client::new();

        let err = run_preflight(&client, &config, &spanish_targets())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("translation provider"));
    }

    #[tokio::test]
    async fn test_preflight_attributes_credential_failure() {
        let config = create_test_config(
            "http://localhost:1",
            "http://localhost:1",
            "/nonexistent/oauth2.json",
        );
        let client = reqwest::Client::new();

        let err = run_preflight(&client, &config, &spanish_targets())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("credential store"));
    }
}
