//! Supported display languages and their fallback chains.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Code of the language every fallback chain ends in.
pub const DEFAULT_LANGUAGE: &str = "en";

/// Code used for strings whose language is unknown.
pub const UNDETERMINED: &str = "und";

struct LanguageInfo {
    code: &'static str,
    native_name: &'static str,
    /// Built-in stemming analyzer of the search service, if it has one.
    analyzer: Option<&'static str>,
    /// Languages tried before the default language.
    fallbacks: &'static [&'static str],
}

const fn lang(
    code: &'static str,
    native_name: &'static str,
    analyzer: Option<&'static str>,
    fallbacks: &'static [&'static str],
) -> LanguageInfo {
    LanguageInfo {
        code,
        native_name,
        analyzer,
        fallbacks,
    }
}

static LANGUAGES: &[LanguageInfo] = &[
    lang("en", "English", Some("english"), &[]),
    lang("ar", "العربية", Some("arabic"), &[]),
    lang("bn", "বাংলা", Some("bengali"), &[]),
    lang("de", "Deutsch", Some("german"), &[]),
    lang("eo", "Esperanto", None, &[]),
    lang("es", "Español", Some("spanish"), &[]),
    lang("fi", "Suomi", Some("finnish"), &[]),
    lang("fr", "Français", Some("french"), &[]),
    lang("hu", "Magyar", Some("hungarian"), &[]),
    lang("it", "Italiano", Some("italian"), &[]),
    lang("ja", "日本語", Some("cjk"), &[]),
    lang("lt", "Lietuvių", Some("lithuanian"), &[]),
    lang("mk", "Македонски", None, &[]),
    lang("nl", "Nederlands", Some("dutch"), &[]),
    lang("pt", "Português", Some("portuguese"), &[]),
    lang("pt-PT", "Português (Portugal)", Some("portuguese"), &["pt"]),
    lang("sk", "Slovenčina", None, &[]),
    lang("sl", "Slovenščina", None, &[]),
    lang("sv", "Svenska", Some("swedish"), &[]),
    lang("tr", "Türkçe", Some("turkish"), &[]),
    lang("uk", "Українська", None, &[]),
    lang("zh", "中文", Some("cjk"), &[]),
    lang("zh-Hant", "中文（繁體）", Some("cjk"), &["zh"]),
];

/// A supported display language.
///
/// Only constructible from the supported set, so every value has a native
/// name, an optional search analyzer and a fallback chain.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Language(&'static str);

impl Language {
    /// The default language (`en`).
    #[must_use]
    pub fn default_language() -> Self {
        Self(DEFAULT_LANGUAGE)
    }

    /// All supported languages, default language first.
    pub fn all() -> impl Iterator<Item = Language> {
        LANGUAGES.iter().map(|info| Language(info.code))
    }

    /// Parses a language code.
    ///
    /// Matching is case-insensitive; a regional tag that is not supported
    /// itself (`fr-CA`) resolves to its base language (`fr`).
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        if value.is_empty() {
            return None;
        }
        let normalized = value.replace('_', "-");
        if let Some(info) = Self::lookup(&normalized) {
            return Some(Language(info.code));
        }
        let base = normalized.split('-').next().unwrap_or("");
        Self::lookup(base).map(|info| Language(info.code))
    }

    fn lookup(code: &str) -> Option<&'static LanguageInfo> {
        LANGUAGES
            .iter()
            .find(|info| info.code.eq_ignore_ascii_case(code))
    }

    fn info(&self) -> &'static LanguageInfo {
        Self::lookup(self.0).unwrap_or(&LANGUAGES[0])
    }

    /// The canonical language code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        self.0
    }

    /// Name of the language in that language.
    #[must_use]
    pub fn native_name(&self) -> &'static str {
        self.info().native_name
    }

    /// The search service's stemming analyzer for this language, if any.
    #[must_use]
    pub fn analyzer(&self) -> Option<&'static str> {
        self.info().analyzer
    }

    /// Whether this is the default language.
    #[must_use]
    pub fn is_default(&self) -> bool {
        self.0 == DEFAULT_LANGUAGE
    }

    /// Ordered list of languages to consult for content in this language:
    /// the language itself, its explicit fallbacks, then the default
    /// language. Never contains duplicates.
    #[must_use]
    pub fn fallback_chain(&self) -> Vec<Language> {
        let mut chain = vec![*self];
        let explicit = self.info().fallbacks.iter().copied();
        for code in explicit.chain(std::iter::once(DEFAULT_LANGUAGE)) {
            if let Some(info) = Self::lookup(code) {
                let language = Language(info.code);
                if !chain.contains(&language) {
                    chain.push(language);
                }
            }
        }
        chain
    }
}

impl Default for Language {
    fn default() -> Self {
        Self::default_language()
    }
}

impl fmt::Debug for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Language({})", self.0)
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

impl FromStr for Language {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| crate::Error::UnsupportedLanguage(s.to_string()))
    }
}

impl Serialize for Language {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.0)
    }
}

impl<'de> Deserialize<'de> for Language {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = String::deserialize(deserializer)?;
        code.parse().map_err(serde::de::Error::custom)
    }
}
