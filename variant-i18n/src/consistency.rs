//! Key-set comparison between registered languages.

use crate::entry::TranslationEntries;
use std::collections::{HashMap, HashSet};
use std::fmt;

/// One difference found by [`check_language_consistency`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inconsistency {
    /// The checked language is not registered.
    UnknownLanguage(String),
    /// `present_in` has `key`, `missing_from` does not.
    MissingKey {
        key: String,
        present_in: String,
        missing_from: String,
    },
}

impl fmt::Display for Inconsistency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Inconsistency::UnknownLanguage(language) => {
                write!(f, "the language '{}' doesn't exist", language)
            }
            Inconsistency::MissingKey {
                key,
                present_in,
                missing_from,
            } => write!(
                f,
                "the language '{}' has the key '{}' that doesn't exist in '{}'",
                present_in, key, missing_from
            ),
        }
    }
}

/// Compare the keys of `language_name` with every other language.
///
/// Reports keys the checked language has and another lacks, and keys
/// another language has and the checked one lacks. Other languages are
/// visited in name order; a key duplicated within one language is reported
/// once.
pub fn check_language_consistency(
    languages: &HashMap<String, TranslationEntries>,
    language_name: &str,
) -> Vec<Inconsistency> {
    let Some(checked) = languages.get(language_name) else {
        return vec![Inconsistency::UnknownLanguage(language_name.to_owned())];
    };
    let checked_keys = key_set(checked);

    let mut others: Vec<(&String, &TranslationEntries)> = languages
        .iter()
        .filter(|(name, _)| name.as_str() != language_name)
        .collect();
    others.sort_by(|a, b| a.0.cmp(b.0));

    let mut inconsistencies = Vec::new();
    for (other_name, other) in others {
        let other_keys = key_set(other);
        inconsistencies.extend(missing_keys(checked, &other_keys).map(|key| {
            Inconsistency::MissingKey {
                key: key.to_owned(),
                present_in: language_name.to_owned(),
                missing_from: other_name.clone(),
            }
        }));
        inconsistencies.extend(missing_keys(other, &checked_keys).map(|key| {
            Inconsistency::MissingKey {
                key: key.to_owned(),
                present_in: other_name.clone(),
                missing_from: language_name.to_owned(),
            }
        }));
    }
    inconsistencies
}

fn key_set(entries: &TranslationEntries) -> HashSet<&str> {
    entries.iter().map(|entry| entry.key.as_str()).collect()
}

/// Keys of `entries` absent from `keys`, in entry order, without repeats.
fn missing_keys<'a>(
    entries: &'a TranslationEntries,
    keys: &'a HashSet<&str>,
) -> impl Iterator<Item = &'a str> + 'a {
    let mut seen = HashSet::new();
    entries
        .iter()
        .map(|entry| entry.key.as_str())
        .filter(move |key| !keys.contains(key) && seen.insert(*key))
}
