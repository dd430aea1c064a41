//! Multilingual strings: one value per language code.

use crate::language::{Language, UNDETERMINED};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A value together with the language code it was found under.
#[derive(Debug, PartialEq, Eq)]
pub struct Resolved<'a, T: ?Sized> {
    pub lang: &'a str,
    pub value: &'a T,
}

/// Text in several languages, keyed by language code.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MlString(BTreeMap<String, String>);

impl MlString {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with(mut self, lang: &str, text: impl Into<String>) -> Self {
        self.0.insert(lang.to_string(), text.into());
        self
    }

    pub fn get(&self, lang: &str) -> Option<&str> {
        self.0.get(lang).map(String::as_str)
    }

    /// Replaces the value for one language, leaving the others alone.
    pub fn set(&mut self, lang: Language, text: impl Into<String>) {
        self.0.insert(lang.code().to_string(), text.into());
    }

    pub fn remove(&mut self, lang: Language) -> Option<String> {
        self.0.remove(lang.code())
    }

    pub fn is_empty(&self) -> bool {
        self.0.values().all(|v| v.is_empty())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Resolves the text to show to a reader of `lang`.
    ///
    /// Walks the fallback chain first, then the undetermined-language
    /// value, then any non-empty value.
    pub fn resolve(&self, lang: Language) -> Option<Resolved<'_, str>> {
        resolve_in(&self.0, lang, |v| !v.is_empty()).map(|(lang, value)| Resolved {
            lang,
            value: value.as_str(),
        })
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MlString {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Lists of strings (e.g. aliases) in several languages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MlStringList(BTreeMap<String, Vec<String>>);

impl MlStringList {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, lang: &str, values: Vec<String>) -> Self {
        self.0.insert(lang.to_string(), values);
        self
    }

    pub fn get(&self, lang: &str) -> Option<&[String]> {
        self.0.get(lang).map(Vec::as_slice)
    }

    pub fn set(&mut self, lang: Language, values: Vec<String>) {
        self.0.insert(lang.code().to_string(), values);
    }

    pub fn is_empty(&self) -> bool {
        self.0.values().all(Vec::is_empty)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn resolve(&self, lang: Language) -> Option<Resolved<'_, [String]>> {
        resolve_in(&self.0, lang, |v| !v.is_empty()).map(|(lang, value)| Resolved {
            lang,
            value: value.as_slice(),
        })
    }
}

fn resolve_in<'a, V>(
    map: &'a BTreeMap<String, V>,
    lang: Language,
    present: impl Fn(&V) -> bool,
) -> Option<(&'a str, &'a V)> {
    let find = |code: &str| {
        map.get_key_value(code)
            .filter(|(_, v)| present(v))
            .map(|(k, v)| (k.as_str(), v))
    };

    lang.fallback_chain()
        .iter()
        .find_map(|l| find(l.code()))
        .or_else(|| find(UNDETERMINED))
        .or_else(|| {
            map.iter()
                .find(|(_, v)| present(v))
                .map(|(k, v)| (k.as_str(), v))
        })
}
