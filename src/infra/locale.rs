use crate::application::history::LocaleProvider;
use anyhow::Result;
use async_trait::async_trait;

const LOCALE_VARS: &[&str] = &["LC_ALL", "LC_MESSAGES", "LANG"];
const FALLBACK_LOCALE: &str = "en";

/// Reads the locale from the POSIX environment variables.
#[derive(Debug, Default)]
pub struct EnvLocale;

#[async_trait]
impl LocaleProvider for EnvLocale {
    async fn detect(&self) -> Result<String> {
        let raw = LOCALE_VARS
            .iter()
            .filter_map(|name| std::env::var(name).ok())
            .find(|value| !value.trim().is_empty());
        Ok(normalize_locale(raw.as_deref().unwrap_or_default()))
    }
}

/// `en_US.UTF-8` becomes `en-US`; `C`, `POSIX` and empty become `en`.
pub fn normalize_locale(raw: &str) -> String {
    let tag = raw
        .split(['.', '@'])
        .next()
        .unwrap_or_default()
        .trim();
    if tag.is_empty() || tag.eq_ignore_ascii_case("c") || tag.eq_ignore_ascii_case("posix") {
        return FALLBACK_LOCALE.to_string();
    }
    tag.replace('_', "-")
}
