//! Co-word translation via DeepL, with an explicit on-disk cache.

use std::{collections::HashMap, path::PathBuf};

use anyhow::{Context, Result};
use futures::future::BoxFuture;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, info, warn};

/// ISO codes DeepL expects for the corpus languages.
pub fn lang_code(language: &str) -> Option<&'static str> {
    match language {
        "English" => Some("EN"),
        "Spanish" => Some("ES"),
        "Italian" => Some("IT"),
        "German" => Some("DE"),
        "Swedish" => Some("SV"),
        _ => None,
    }
}

/// Translation capability. `Ok(None)` means "no useful translation"; that
/// outcome is cached so the word is not retried on the next run.
pub trait Translator: Send + Sync {
    fn translate<'a>(
        &'a self,
        word: &'a str,
        language: &'a str,
    ) -> BoxFuture<'a, Result<Option<String>>>;
}

/// JSON file cache keyed `"{Language}:{word}"`, loaded once and passed by
/// reference through the enrichment pass.
#[derive(Debug)]
pub struct TranslationCache {
    path: PathBuf,
    entries: HashMap<String, Option<String>>,
}

impl TranslationCache {
    /// Load the cache from disk, starting empty if the file is absent.
    pub fn load(path: PathBuf) -> Result<Self> {
        let entries = if path.exists() {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("reading translation cache {}", path.display()))?;
            serde_json::from_str(&content).context("parsing translation cache")?
        } else {
            HashMap::new()
        };
        info!(entries = entries.len(), path = %path.display(), "loaded translation cache");
        Ok(Self { path, entries })
    }

    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(&self.entries)?;
        std::fs::write(&self.path, content)
            .with_context(|| format!("writing translation cache {}", self.path.display()))?;
        info!(entries = self.entries.len(), "saved translation cache");
        Ok(())
    }

    fn key(language: &str, word: &str) -> String {
        format!("{language}:{}", word.to_lowercase())
    }

    pub fn get(&self, language: &str, word: &str) -> Option<&Option<String>> {
        self.entries.get(&Self::key(language, word))
    }

    pub fn insert(&mut self, language: &str, word: &str, translation: Option<String>) {
        self.entries.insert(Self::key(language, word), translation);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// DeepL REST client.
pub struct DeepLTranslator {
    client: Client,
    api_key: String,
}

impl DeepLTranslator {
    pub fn new(api_key: String) -> Result<Self> {
        let client = Client::builder().user_agent("lexiscope/0.1").build()?;
        Ok(Self { client, api_key })
    }
}

impl Translator for DeepLTranslator {
    fn translate<'a>(
        &'a self,
        word: &'a str,
        language: &'a str,
    ) -> BoxFuture<'a, Result<Option<String>>> {
        Box::pin(async move {
            let Some(source) = lang_code(language) else {
                warn!(%language, "no DeepL language code configured");
                return Ok(None);
            };
            let resp = self
                .client
                .post("https://api-free.deepl.com/v2/translate")
                .header("Authorization", format!("DeepL-Auth-Key {}", self.api_key))
                .form(&[
                    ("text", word),
                    ("source_lang", source),
                    ("target_lang", "EN-US"),
                ])
                .send()
                .await
                .context("calling DeepL")?;
            if !resp.status().is_success() {
                anyhow::bail!("DeepL returned {}", resp.status());
            }
            let payload: Value = resp.json().await.context("decoding DeepL response")?;
            let translated = payload
                .pointer("/translations/0/text")
                .and_then(|v| v.as_str())
                .map(|s| s.trim().to_lowercase())
                .unwrap_or_default();
            if let Some(detected) = payload
                .pointer("/translations/0/detected_source_language")
                .and_then(|v| v.as_str())
            {
                if detected != source {
                    warn!(%word, %detected, expected = %source, "language detection mismatch");
                }
            }
            // An empty or identical result is no translation at all.
            if translated.is_empty() || translated == word.to_lowercase() {
                debug!(%word, "no useful translation");
                return Ok(None);
            }
            Ok(Some(translated))
        })
    }
}

/// Stand-in used when no API key is configured: everything stays
/// untranslated and only cached entries contribute English co-words.
pub struct NullTranslator;

impl Translator for NullTranslator {
    fn translate<'a>(
        &'a self,
        _word: &'a str,
        _language: &'a str,
    ) -> BoxFuture<'a, Result<Option<String>>> {
        Box::pin(async { Ok(None) })
    }
}
