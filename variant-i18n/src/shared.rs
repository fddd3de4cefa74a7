//! A registry handle for concurrent readers and occasional writers.
//!
//! [`I18n`] is `Send + Sync`, so a registry that is fully built before use
//! can simply be put in an `Arc`. [`SharedI18n`] is for the case where
//! languages or strategies change while translations are being served.

use crate::{I18n, Options, PluralizationFunc, TranslationEntries};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

#[derive(Debug, Clone, Default)]
pub struct SharedI18n(Arc<RwLock<I18n>>);

impl SharedI18n {
    pub fn new(i18n: I18n) -> Self {
        SharedI18n(Arc::new(RwLock::new(i18n)))
    }

    /// Read access. A poisoned lock is recovered, the registry has no
    /// invariant a panicking writer could break halfway.
    pub fn read(&self) -> RwLockReadGuard<'_, I18n> {
        self.0.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn write(&self) -> RwLockWriteGuard<'_, I18n> {
        self.0.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn add_language(&self, language_name: &str, entries: TranslationEntries) -> Vec<String> {
        self.write().add_language(language_name, entries)
    }

    pub fn set_pluralization_func(&self, language_name: &str, func: PluralizationFunc) {
        self.write().set_pluralization_func(language_name, func);
    }

    pub fn has_language(&self, language_name: &str) -> bool {
        self.read().has_language(language_name)
    }

    pub fn translate(&self, language_name: &str, translate_key: &str, options: &Options) -> String {
        self.read().translate(language_name, translate_key, options)
    }

    pub fn translate_pairs<I, K, V>(&self, pairs: I) -> String
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        self.read().translate_pairs(pairs)
    }
}

impl From<I18n> for SharedI18n {
    fn from(i18n: I18n) -> Self {
        SharedI18n::new(i18n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Config, TranslationEntry, VerbosityLevel};
    use std::thread;

    fn registry() -> SharedI18n {
        let mut i18n = I18n::with_config(Config::default().with_verbosity(VerbosityLevel::Silent));
        i18n.add_language("en", vec![TranslationEntry::new("hi").with_default("Hello")]);
        SharedI18n::new(i18n)
    }

    #[test]
    fn test_concurrent_translate_and_add_language() {
        let shared = registry();

        let readers: Vec<_> = (0..4)
            .map(|_| {
                let shared = shared.clone();
                thread::spawn(move || {
                    for _ in 0..100 {
                        let text = shared.translate("es", "hi", &Options::new());
                        assert!(text == "Hello" || text == "Hola");
                    }
                })
            })
            .collect();

        shared.add_language("es", vec![TranslationEntry::new("hi").with_default("Hola")]);

        for reader in readers {
            reader.join().unwrap();
        }
        assert!(shared.has_language("es"));
        assert_eq!(shared.translate("es", "hi", &Options::new()), "Hola");
    }

    #[test]
    fn test_set_pluralization_through_handle() {
        let shared = registry();
        shared.add_language(
            "en",
            vec![
                TranslationEntry::new("n")
                    .with_default("some")
                    .with_variant(crate::Variant::Zero, "none"),
            ],
        );
        let zero_or_many = PluralizationFunc::new(|c| if c == 0 { "Zero" } else { "Many" });
        shared.set_pluralization_func("en", zero_or_many);
        assert_eq!(shared.translate("en", "n", &Options::new().with_count(0)), "none");
    }

    #[test]
    fn test_translate_pairs_through_handle() {
        let shared = registry();
        assert_eq!(shared.translate_pairs([("lang", "en"), ("key", "hi")]), "Hello");
    }
}
