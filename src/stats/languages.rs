//! Language share by bytes.

use serde::Serialize;
use std::collections::BTreeMap;

/// A language and its share of all bytes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LanguageShare {
    pub name: String,
    pub bytes: u64,
    /// 0.0..=100.0
    pub percent: f64,
}

/// Top `n` languages by bytes, descending; ties by name.
pub fn top_languages(languages: &BTreeMap<String, u64>, n: usize) -> Vec<LanguageShare> {
    let total: u64 = languages.values().sum();
    if total == 0 {
        return Vec::new();
    }

    let mut entries: Vec<(&String, u64)> = languages
        .iter()
        .filter(|(_, &bytes)| bytes > 0)
        .map(|(name, &bytes)| (name, bytes))
        .collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));

    entries
        .into_iter()
        .take(n)
        .map(|(name, bytes)| LanguageShare {
            name: name.clone(),
            bytes,
            percent: bytes as f64 * 100.0 / total as f64,
        })
        .collect()
}

/// Languages with any bytes at all.
pub fn language_count(languages: &BTreeMap<String, u64>) -> usize {
    languages.values().filter(|&&bytes| bytes > 0).count()
}
