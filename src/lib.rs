//! Sync a YouTube video's title/description localizations.
//!
//! One run fetches the video's snippet and existing localizations, translates
//! the title and description into each configured target language via the
//! OpenAI API, merges complete results over the existing localization map,
//! and writes the merged map back through the YouTube Data API.

pub mod config;
pub mod credentials;
pub mod engine;
pub mod error;
pub mod languages;
pub mod probe;
pub mod retry;
pub mod translation;
pub mod youtube;
