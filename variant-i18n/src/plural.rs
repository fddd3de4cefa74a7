//! Per-language pluralization strategies.
//!
//! A strategy maps a count to a plural category label. Labels are matched
//! against entry slot names, so only `Zero`, `One`, `Two`, `Few` and `Many`
//! select a variant; any other label falls through to `Default`.

use crate::entry::PluralCategory;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// English-like default: `One` for exactly 1, `Many` for everything else,
/// including 0 and negative counts.
pub fn default_pluralization(count: i64) -> PluralCategory {
    if count == 1 {
        PluralCategory::One
    } else {
        PluralCategory::Many
    }
}

/// A pluralization strategy, shareable across threads.
#[derive(Clone)]
pub struct PluralizationFunc(Arc<dyn Fn(i64) -> String + Send + Sync>);

impl PluralizationFunc {
    /// Wrap a strategy returning anything string-like.
    ///
    /// ```
    /// use variant_i18n::{PluralCategory, PluralizationFunc};
    ///
    /// let slavic = PluralizationFunc::new(|count| match count.rem_euclid(10) {
    ///     1 => "One",
    ///     2..=4 => "Few",
    ///     _ => "Many",
    /// });
    /// assert_eq!(slavic.category(3), Some(PluralCategory::Few));
    /// ```
    pub fn new<F, S>(f: F) -> Self
    where
        F: Fn(i64) -> S + Send + Sync + 'static,
        S: AsRef<str>,
    {
        PluralizationFunc(Arc::new(move |count| f(count).as_ref().to_owned()))
    }

    /// The raw label produced for `count`.
    pub fn label(&self, count: i64) -> String {
        (self.0)(count)
    }

    /// The category for `count`, or `None` if the label names no category.
    pub fn category(&self, count: i64) -> Option<PluralCategory> {
        PluralCategory::from_label(&self.label(count))
    }
}

impl Default for PluralizationFunc {
    fn default() -> Self {
        PluralizationFunc::new(default_pluralization)
    }
}

impl fmt::Debug for PluralizationFunc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PluralizationFunc(..)")
    }
}

/// Strategy lookup keyed by language name.
#[derive(Debug, Clone, Default)]
pub struct PluralizationRegistry {
    funcs: HashMap<String, PluralizationFunc>,
}

impl PluralizationRegistry {
    pub fn new() -> Self {
        PluralizationRegistry {
            funcs: HashMap::new(),
        }
    }

    /// Replace the strategy of `language_name`.
    pub fn set(&mut self, language_name: &str, func: PluralizationFunc) {
        self.funcs.insert(language_name.to_owned(), func);
    }

    /// Reset `language_name` to the default strategy.
    pub fn set_default(&mut self, language_name: &str) {
        self.set(language_name, PluralizationFunc::default());
    }

    pub fn contains(&self, language_name: &str) -> bool {
        self.funcs.contains_key(language_name)
    }

    /// Strategy for `language_name`, the default one if none was set.
    pub fn get(&self, language_name: &str) -> PluralizationFunc {
        self.funcs.get(language_name).cloned().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_pluralization() {
        assert_eq!(default_pluralization(1), PluralCategory::One);
        assert_eq!(default_pluralization(0), PluralCategory::Many);
        assert_eq!(default_pluralization(2), PluralCategory::Many);
        assert_eq!(default_pluralization(-1), PluralCategory::Many);
        assert_eq!(default_pluralization(i64::MIN), PluralCategory::Many);
    }

    #[test]
    fn test_custom_label_outside_vocabulary() {
        let func = PluralizationFunc::new(|_| "Other");
        assert_eq!(func.label(7), "Other");
        assert_eq!(func.category(7), None);
    }

    #[test]
    fn test_strategy_returning_category() {
        let func = PluralizationFunc::new(|count| {
            if count == 0 {
                PluralCategory::Zero
            } else {
                default_pluralization(count)
            }
        });
        assert_eq!(func.category(0), Some(PluralCategory::Zero));
        assert_eq!(func.category(1), Some(PluralCategory::One));
    }

    #[test]
    fn test_registry_replaces_and_resets() {
        let mut registry = PluralizationRegistry::new();
        assert!(!registry.contains("ar"));
        assert_eq!(registry.get("ar").category(0), Some(PluralCategory::Many));

        registry.set("ar", PluralizationFunc::new(|c| if c == 0 { "Zero" } else { "Many" }));
        assert!(registry.contains("ar"));
        assert_eq!(registry.get("ar").category(0), Some(PluralCategory::Zero));

        registry.set_default("ar");
        assert_eq!(registry.get("ar").category(0), Some(PluralCategory::Many));
    }
}
