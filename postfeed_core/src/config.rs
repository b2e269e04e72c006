use std::env;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use tracing::info;

use crate::api::{ApiClient, DEFAULT_API_URL};
use crate::collection::DEFAULT_PAGE_SIZE;
use crate::translation::PhraseTable;
use crate::trigger::DEFAULT_SCROLL_DEBOUNCE;

#[derive(Debug, Clone, PartialEq)]
pub struct PostfeedConfig {
    pub api_url: String,
    pub page_size: usize,
    pub scroll_debounce: Duration,
    pub http_timeout: Duration,
    pub translations_path: Option<PathBuf>,
}

impl Default for PostfeedConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            scroll_debounce: DEFAULT_SCROLL_DEBOUNCE,
            http_timeout: Duration::from_secs(15),
            translations_path: None,
        }
    }
}

impl PostfeedConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let api_url = lookup("POSTFEED_API_URL")
            .filter(|raw| !raw.trim().is_empty())
            .unwrap_or(defaults.api_url);
        let page_size = lookup("POSTFEED_PAGE_SIZE")
            .and_then(|raw| raw.trim().parse::<usize>().ok())
            .filter(|size| *size > 0)
            .unwrap_or(defaults.page_size);
        let scroll_debounce = lookup("POSTFEED_SCROLL_DEBOUNCE_MS")
            .and_then(|raw| raw.trim().parse::<u64>().ok())
            .map(Duration::from_millis)
            .unwrap_or(defaults.scroll_debounce);
        let http_timeout = lookup("POSTFEED_HTTP_TIMEOUT_SECS")
            .and_then(|raw| raw.trim().parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(defaults.http_timeout);
        let translations_path = lookup("POSTFEED_TRANSLATIONS")
            .filter(|raw| !raw.trim().is_empty())
            .map(PathBuf::from);
        Self {
            api_url,
            page_size,
            scroll_debounce,
            http_timeout,
            translations_path,
        }
    }

    pub fn api_client(&self) -> Result<ApiClient> {
        ApiClient::new(self.api_url.clone(), self.http_timeout)
    }

    /// The builtin table, overlaid with the configured file if any.
    pub fn translator(&self) -> Result<PhraseTable> {
        let mut table = PhraseTable::builtin();
        if let Some(path) = &self.translations_path {
            let overrides = PhraseTable::load(path)?;
            info!(path = %path.display(), words = overrides.len(), "loaded translation overrides");
            table = table.with_overrides(overrides);
        }
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;
    use std::io::Write;

    fn config(pairs: &[(&str, &str)]) -> PostfeedConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        PostfeedConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_without_environment() {
        assert_eq!(config(&[]), PostfeedConfig::default());
    }

    #[test]
    fn reads_overrides_and_ignores_garbage() {
        let cfg = config(&[
            ("POSTFEED_API_URL", "http://localhost:3000"),
            ("POSTFEED_PAGE_SIZE", "20"),
            ("POSTFEED_SCROLL_DEBOUNCE_MS", "soon"),
            ("POSTFEED_HTTP_TIMEOUT_SECS", "3"),
        ]);
        assert_eq!(cfg.api_url, "http://localhost:3000");
        assert_eq!(cfg.page_size, 20);
        assert_eq!(cfg.scroll_debounce, DEFAULT_SCROLL_DEBOUNCE);
        assert_eq!(cfg.http_timeout, Duration::from_secs(3));

        assert_eq!(config(&[("POSTFEED_PAGE_SIZE", "0")]).page_size, DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn translation_file_extends_builtin_table() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "[words]\nQuia = \"ибо\"\nnovum = \"новое\"").expect("write table");
        let path = file.path().to_string_lossy().into_owned();

        let table = config(&[("POSTFEED_TRANSLATIONS", &path)])
            .translator()
            .expect("translator");
        assert_eq!(table.len(), PhraseTable::builtin().len() + 1);
        assert_eq!(table.translate_text("Quia novum"), "Ибо новое");
    }

    #[test]
    fn missing_translation_file_is_an_error() {
        let cfg = config(&[("POSTFEED_TRANSLATIONS", "/nonexistent/postfeed/words.toml")]);
        assert!(cfg.translator().is_err());
    }
}
