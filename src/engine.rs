//! The localization sync pipeline.
//!
//! One run walks a fixed sequence: load and validate the OAuth credential,
//! fetch the video's snippet and existing localizations in one read, fan out
//! per-language translation, merge complete results over the existing map,
//! and push the merged map back as a full replacement. Credential and fetch
//! failures abort the run; translation failures are isolated per language;
//! the single update is attempted at most once.

use crate::config::Config;
use crate::credentials::CredentialStore;
use crate::languages::LanguageTarget;
use crate::translation::translate_pair;
use crate::youtube::{self, Localization};
use anyhow::{Context, Result};
use futures::stream::{self, StreamExt};
use std::collections::{BTreeSet, HashMap};
use tracing::{info, warn};

/// What one run accomplished, reported at the end so partial failures are
/// never silent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncOutcome {
    /// Languages whose localization was written this run
    pub languages_updated: BTreeSet<String>,
    /// Targeted languages that produced no complete translation
    pub languages_failed: BTreeSet<String>,
    /// False when the merged map was empty and the update was skipped
    pub update_performed: bool,
}

/// Combine pre-existing localizations with this run's complete results.
///
/// Languages outside the target set pass through untouched; a complete
/// result overwrites any pre-existing entry for its language. Incomplete
/// results leave pre-existing entries alone.
fn merge_localizations(
    existing: &HashMap<String, Localization>,
    results: &[(String, Option<Localization>)],
) -> (HashMap<String, Localization>, BTreeSet<String>, BTreeSet<String>) {
    let mut merged = existing.clone();
    let mut updated = BTreeSet::new();
    let mut failed = BTreeSet::new();

    for (code, result) in results {
        match result {
            Some(localization) => {
                merged.insert(code.clone(), localization.clone());
                updated.insert(code.clone());
            }
            None => {
                failed.insert(code.clone());
            }
        }
    }

    (merged, updated, failed)
}

/// Run the full synchronization pipeline for the configured video.
pub async fn sync_localizations(
    client: &reqwest::Client,
    config: &Config,
    targets: &[LanguageTarget],
) -> Result<SyncOutcome> {
    // Authenticate: nothing is touched remotely if this fails
    let store = CredentialStore::new(&config.credentials_file);
    let credential = store.load().context("Authentication failed")?;
    let credential = store
        .ensure_valid(client, credential)
        .await
        .context("Authentication failed")?;

    // Fetch snippet and localizations in one read
    let video = youtube::fetch_video(client, config, &credential.token, &config.video_id)
        .await
        .context("Fetching video metadata failed")?;

    if video.title.trim().is_empty() || video.description.trim().is_empty() {
        warn!(
            "Video {} has an empty title or description; affected languages will be skipped",
            video.id
        );
    }

    info!(
        "Translating \"{}\" into {} languages",
        video.title,
        targets.len()
    );

    // Per-language fan-out with bounded concurrency. Each language resolves
    // both of its fields independently; one language failing or timing out
    // never cancels another.
    let results: Vec<(String, Option<Localization>)> = stream::iter(targets)
        .map(|target| {
            let title = video.title.as_str();
            let description = video.description.as_str();
            async move {
                let result = translate_pair(client, config, target, title, description).await;
                if let Some(localization) = &result {
                    info!("Translated into {}: {}", target.code, localization.title);
                }
                (target.code.to_string(), result)
            }
        })
        .buffer_unordered(config.max_concurrent_translations.max(1))
        .collect()
        .await;

    let (merged, languages_updated, languages_failed) =
        merge_localizations(&video.localizations, &results);

    if merged.is_empty() {
        // Nothing translated and nothing pre-existing: a legitimate no-op
        info!("No localizations to write, skipping update");
        return Ok(SyncOutcome {
            languages_updated,
            languages_failed,
            update_performed: false,
        });
    }

    // Full replacement: the merged map carries untouched languages too,
    // since submitting only the new entries would delete the rest
    youtube::update_localizations(client, config, &credential.token, &config.video_id, &merged)
        .await
        .context("Updating video localizations failed")?;

    Ok(SyncOutcome {
        languages_updated,
        languages_failed,
        update_performed: true,
    })
}
