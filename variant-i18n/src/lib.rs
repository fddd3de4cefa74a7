use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;

pub mod consistency;
pub mod entry;
pub mod error;
pub mod interpolate;
pub mod loader;
pub mod options;
pub mod plural;
pub mod resolve;
pub mod shared;
pub mod template;


pub use consistency::{Inconsistency, check_language_consistency};
pub use entry::{Gender, PluralCategory, TranslationEntries, TranslationEntry, Variant};
pub use error::{LoadError, LoadResult};
pub use interpolate::{HtmlInterpolator, Interpolator, TemplateInterpolator};
pub use loader::{
    Format, load_from_files, load_from_json_bytes, load_from_json_files, load_from_json_str,
    load_from_yaml_bytes, load_from_yaml_files, load_from_yaml_str, load_languages_from_dir,
};
pub use options::{Data, Options};
pub use plural::{PluralizationFunc, default_pluralization};
pub use resolve::Mode;
pub use shared::SharedI18n;
pub use template::TemplateCall;

/// Language used when neither a requested language nor a configured
/// fallback is given.
pub const DEFAULT_FALLBACK_LANGUAGE: &str = "en";

/// Verbosity level for library logging
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerbosityLevel {
    /// No logging
    Silent = 0,
    /// Log consistency warnings and fallbacks (default)
    #[default]
    Normal = 1,
    /// Also log how each translation was resolved
    Verbose = 2,
}

/// Registry configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Language substituted for missing languages and keys. Default: `"en"`
    pub fallback_language_name: String,
    /// Skip the key-set comparison done by `add_language`. Default: `false`
    pub disable_consistency_check: bool,
    pub verbosity: VerbosityLevel,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            fallback_language_name: DEFAULT_FALLBACK_LANGUAGE.to_string(),
            disable_consistency_check: false,
            verbosity: VerbosityLevel::Normal,
        }
    }
}

impl Config {
    pub fn with_fallback_language(mut self, language_name: &str) -> Self {
        self.fallback_language_name = language_name.to_owned();
        self
    }

    pub fn with_consistency_check(mut self, enabled: bool) -> Self {
        self.disable_consistency_check = !enabled;
        self
    }

    pub fn with_verbosity(mut self, verbosity: VerbosityLevel) -> Self {
        self.verbosity = verbosity;
        self
    }
}

/// The translation registry.
///
/// Holds one entry list per language, one pluralization strategy per
/// language and the fallback language. Mutation needs `&mut self`;
/// translation only `&self`, so a registry built up front can be shared
/// freely. See [`SharedI18n`] for mutation while serving.
pub struct I18n {
    // Keyed by language name, entries in registration order
    // e.g. languages["en"] = [{Key: "welcome", Default: "Welcome"}, ...]
    //      languages["es"] = [{Key: "welcome", Default: "Bienvenido"}, ...]
    languages: HashMap<String, TranslationEntries>,
    pluralization: plural::PluralizationRegistry,
    fallback_language: String,
    disable_consistency_check: bool,
    verbosity: VerbosityLevel,
    interpolator: Arc<dyn Interpolator>,
}

impl Default for I18n {
    fn default() -> Self {
        I18n::new()
    }
}

impl std::fmt::Debug for I18n {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("I18n")
            .field("languages", &self.languages())
            .field("fallback_language", &self.fallback_language)
            .field("disable_consistency_check", &self.disable_consistency_check)
            .field("verbosity", &self.verbosity)
            .finish_non_exhaustive()
    }
}

impl I18n {
    pub fn new() -> Self {
        I18n::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Self {
        let fallback_language = if config.fallback_language_name.is_empty() {
            DEFAULT_FALLBACK_LANGUAGE.to_string()
        } else {
            config.fallback_language_name
        };
        I18n {
            languages: HashMap::new(),
            pluralization: plural::PluralizationRegistry::new(),
            fallback_language,
            disable_consistency_check: config.disable_consistency_check,
            verbosity: config.verbosity,
            interpolator: Arc::new(TemplateInterpolator::new()),
        }
    }

    /// Replace the interpolation engine used when data is supplied.
    pub fn with_interpolator(mut self, interpolator: impl Interpolator + 'static) -> Self {
        self.interpolator = Arc::new(interpolator);
        self
    }

    pub fn fallback_language(&self) -> &str {
        &self.fallback_language
    }

    pub fn verbosity(&self) -> VerbosityLevel {
        self.verbosity
    }

    pub fn set_verbosity(&mut self, verbosity: VerbosityLevel) {
        self.verbosity = verbosity;
    }

    /// Register `entries` under `language_name`.
    ///
    /// An existing language is replaced as a whole, never merged. The
    /// language gets the default pluralization strategy, also when it
    /// replaces a language that had a custom one. Unless disabled, the key
    /// set is then compared with every other language; the differences are
    /// logged and returned but never block registration.
    ///
    /// Duplicate keys within `entries` are kept; lookups use the first.
    pub fn add_language(
        &mut self,
        language_name: &str,
        entries: TranslationEntries,
    ) -> Vec<String> {
        self.languages.insert(language_name.to_owned(), entries);
        self.pluralization.set_default(language_name);

        if self.disable_consistency_check {
            return Vec::new();
        }

        let warnings: Vec<String> = self
            .check_consistency(language_name)
            .iter()
            .map(ToString::to_string)
            .collect();
        if self.verbosity >= VerbosityLevel::Normal {
            for warning in &warnings {
                tracing::warn!(language = language_name, "{}", warning);
            }
        }
        warnings
    }

    pub fn has_language(&self, language_name: &str) -> bool {
        self.languages.contains_key(language_name)
    }

    /// Registered language names, sorted.
    pub fn languages(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.languages.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Entries of a language, in registration order.
    pub fn entries(&self, language_name: &str) -> Option<&[TranslationEntry]> {
        self.languages.get(language_name).map(Vec::as_slice)
    }

    /// Replace the pluralization strategy of `language_name`.
    ///
    /// The language does not need to be registered yet, but a later
    /// `add_language` for it resets the strategy to the default.
    pub fn set_pluralization_func(&mut self, language_name: &str, func: PluralizationFunc) {
        if self.verbosity >= VerbosityLevel::Verbose {
            tracing::trace!(language = language_name, "Pluralization strategy replaced");
        }
        self.pluralization.set(language_name, func);
    }

    /// Compare the keys of `language_name` with every other language.
    ///
    /// Returns whether they match, and one message per difference. Message
    /// order is not significant.
    pub fn check_language_consistency(&self, language_name: &str) -> (bool, Vec<String>) {
        let warnings: Vec<String> = self
            .check_consistency(language_name)
            .iter()
            .map(ToString::to_string)
            .collect();
        (warnings.is_empty(), warnings)
    }

    /// Typed form of [`I18n::check_language_consistency`].
    pub fn check_consistency(&self, language_name: &str) -> Vec<Inconsistency> {
        consistency::check_language_consistency(&self.languages, language_name)
    }

    /// Translate `key` into `language_name`.
    ///
    /// 1. A missing language is replaced by the fallback language.
    /// 2. A key missing from the language is looked up in the fallback
    ///    language.
    /// 3. `count` and `gender` pick the variant (see [`resolve`]); empty
    ///    variants fall back towards `Default`.
    /// 4. With `data`, the text is interpolated; without, it is returned
    ///    verbatim.
    ///
    /// Never fails: anything not found gives an empty string.
    ///
    /// ```
    /// use variant_i18n::{Data, I18n, Options, TranslationEntry, Variant};
    ///
    /// let mut i18n = I18n::new();
    /// i18n.add_language("en", vec![
    ///     TranslationEntry::new("greet")
    ///         .with_default("Hi")
    ///         .with_variant(Variant::One, "Hi one")
    ///         .with_variant(Variant::Many, "Hi {{.N}}"),
    /// ]);
    ///
    /// let options = Options::new().with_count(5).with_data(Data::new().with("N", 5));
    /// assert_eq!(i18n.translate("en", "greet", &options), "Hi 5");
    /// assert_eq!(i18n.translate("fr", "greet", &Options::new()), "Hi");
    /// assert_eq!(i18n.translate("en", "missing_key", &Options::new()), "");
    /// ```
    pub fn translate(&self, language_name: &str, translate_key: &str, options: &Options) -> String {
        let fallback = self.languages.get(&self.fallback_language);

        let (language_name, language) = match (self.languages.get(language_name), fallback) {
            (Some(language), _) => (language_name, language),
            (None, Some(fallback)) => {
                if self.verbosity >= VerbosityLevel::Normal {
                    tracing::debug!(
                        requested = language_name,
                        fallback = %self.fallback_language,
                        "Language not found, using fallback language"
                    );
                }
                (self.fallback_language.as_str(), fallback)
            }
            (None, None) => {
                if self.verbosity >= VerbosityLevel::Normal {
                    tracing::debug!(
                        requested = language_name,
                        fallback = %self.fallback_language,
                        "Neither language nor fallback language registered"
                    );
                }
                return String::new();
            }
        };

        let entry = match find_entry(language, translate_key) {
            Some(entry) => entry,
            None => match fallback.and_then(|fallback| find_entry(fallback, translate_key)) {
                Some(entry) => {
                    if self.verbosity >= VerbosityLevel::Normal {
                        tracing::debug!(
                            key = translate_key,
                            language = language_name,
                            fallback = %self.fallback_language,
                            "Key not found, using fallback language"
                        );
                    }
                    entry
                }
                None => {
                    if self.verbosity >= VerbosityLevel::Verbose {
                        tracing::debug!(
                            key = translate_key,
                            language = language_name,
                            "Key not found in language or fallback language"
                        );
                    }
                    return String::new();
                }
            },
        };

        let mode = Mode::select(options);
        let plural = options
            .count
            .filter(|_| mode.uses_count())
            .and_then(|count| self.pluralization.get(language_name).category(count));
        let gender = if mode.uses_gender() {
            options.gender_category()
        } else {
            None
        };

        let chain = resolve::variant_chain(mode, plural, gender);
        let (variant, text) = resolve::select_text(entry, &chain);

        if self.verbosity >= VerbosityLevel::Verbose {
            tracing::debug!(
                key = translate_key,
                language = language_name,
                %mode,
                chain = ?chain,
                %variant,
                "Resolved translation variant"
            );
        }

        match &options.data {
            Some(data) => self.interpolator.interpolate(text, data),
            None => text.to_owned(),
        }
    }

    /// Shortcut for [`I18n::translate`].
    pub fn t(&self, language_name: &str, translate_key: &str, options: &Options) -> String {
        self.translate(language_name, translate_key, options)
    }

    /// A translator bound to one language.
    ///
    /// ```
    /// use variant_i18n::{I18n, Options, TranslationEntry};
    ///
    /// let mut i18n = I18n::new();
    /// i18n.add_language("es", vec![TranslationEntry::new("hi").with_default("Hola")]);
    /// let t = i18n.translator_for("es");
    /// assert_eq!(t("hi", &Options::new()), "Hola");
    /// ```
    pub fn translator_for(&self, language_name: &str) -> impl Fn(&str, &Options) -> String + '_ {
        let language_name = language_name.to_owned();
        move |translate_key: &str, options: &Options| {
            self.translate(&language_name, translate_key, options)
        }
    }

    /// Translate a request given as keyed template arguments.
    ///
    /// See [`template`] for the argument format.
    pub fn translate_pairs<I, K, V>(&self, pairs: I) -> String
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let call = TemplateCall::from_pairs(pairs);
        self.translate(&call.lang, &call.key, &call.options)
    }

    /// A helper function for template engines taking flat arguments:
    /// `"lang", "en", "key", "hello", "count", "3", "Name", "Ada"`.
    pub fn templating_translate_func(&self) -> impl Fn(&[&str]) -> String + '_ {
        move |args: &[&str]| {
            let call = TemplateCall::from_args(args);
            self.translate(&call.lang, &call.key, &call.options)
        }
    }
}

/// First entry with `key`. Entries without a key are never found.
fn find_entry<'a>(entries: &'a [TranslationEntry], key: &str) -> Option<&'a TranslationEntry> {
    if key.is_empty() {
        return None;
    }
    entries.iter().find(|entry| entry.key == key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let i18n = I18n::new();
        assert_eq!(i18n.fallback_language(), "en");
        assert_eq!(i18n.verbosity(), VerbosityLevel::Normal);
    }

    #[test]
    fn test_empty_fallback_name_means_english() {
        let i18n = I18n::with_config(Config::default().with_fallback_language(""));
        assert_eq!(i18n.fallback_language(), "en");
    }

    #[test]
    fn test_config_from_json() {
        let config: Config = serde_json::from_str(
            r#"{"fallback_language_name": "es", "verbosity": "silent"}"#,
        )
        .unwrap();
        assert_eq!(config.fallback_language_name, "es");
        assert!(!config.disable_consistency_check);
        assert_eq!(config.verbosity, VerbosityLevel::Silent);
    }

    #[test]
    fn test_verbosity_levels() {
        let mut i18n = I18n::new();
        i18n.set_verbosity(VerbosityLevel::Silent);
        assert_eq!(i18n.verbosity(), VerbosityLevel::Silent);
        i18n.set_verbosity(VerbosityLevel::Verbose);
        assert_eq!(i18n.verbosity(), VerbosityLevel::Verbose);
        assert!(VerbosityLevel::Verbose > VerbosityLevel::Normal);
    }

    #[test]
    fn test_has_language() {
        let mut i18n = I18n::new();
        i18n.add_language("en", vec![]);
        i18n.add_language("es", vec![]);
        assert!(i18n.has_language("en"));
        assert!(i18n.has_language("es"));
        assert!(!i18n.has_language("xxx"));
        assert_eq!(i18n.languages(), vec!["en", "es"]);
    }

    #[test]
    fn test_add_language_replaces_entries() {
        let mut i18n = I18n::new();
        i18n.add_language("en", vec![TranslationEntry::new("a").with_default("A")]);
        i18n.add_language("en", vec![TranslationEntry::new("b").with_default("B")]);
        assert_eq!(i18n.entries("en").map(<[_]>::len), Some(1));
        assert_eq!(i18n.translate("en", "a", &Options::new()), "");
        assert_eq!(i18n.translate("en", "b", &Options::new()), "B");
    }

    #[test]
    fn test_add_language_returns_warnings() {
        let mut i18n = I18n::with_config(Config::default().with_verbosity(VerbosityLevel::Silent));
        assert!(i18n.add_language("en", vec![TranslationEntry::new("a")]).is_empty());
        let warnings = i18n.add_language("es", vec![TranslationEntry::new("b")]);
        assert_eq!(warnings.len(), 2);
        let (consistent, again) = i18n.check_language_consistency("es");
        assert!(!consistent);
        assert_eq!(again.len(), 2);
    }

    #[test]
    fn test_disabled_consistency_check() {
        let mut i18n = I18n::with_config(Config::default().with_consistency_check(false));
        i18n.add_language("en", vec![TranslationEntry::new("a")]);
        assert!(i18n.add_language("es", vec![TranslationEntry::new("b")]).is_empty());
        // The explicit check still works
        assert!(!i18n.check_language_consistency("es").0);
    }

    #[test]
    fn test_check_unknown_language() {
        let i18n = I18n::new();
        let (consistent, warnings) = i18n.check_language_consistency("fr");
        assert!(!consistent);
        assert_eq!(warnings, vec!["the language 'fr' doesn't exist".to_string()]);
    }

    #[test]
    fn test_first_duplicate_key_wins() {
        let mut i18n = I18n::new();
        i18n.add_language(
            "en",
            vec![
                TranslationEntry::new("dup").with_default("first"),
                TranslationEntry::new("dup").with_default("second"),
            ],
        );
        assert_eq!(i18n.translate("en", "dup", &Options::new()), "first");
    }

    struct Shouting;

    impl Interpolator for Shouting {
        fn interpolate(&self, template: &str, _data: &Data) -> String {
            template.to_uppercase()
        }
    }

    #[test]
    fn test_custom_interpolator_only_runs_with_data() {
        let mut i18n = I18n::new().with_interpolator(Shouting);
        i18n.add_language("en", vec![TranslationEntry::new("hi").with_default("hi")]);
        assert_eq!(i18n.translate("en", "hi", &Options::new()), "hi");
        assert_eq!(
            i18n.translate("en", "hi", &Options::new().with_data(Data::new())),
            "HI"
        );
    }

    #[test]
    fn test_t_is_translate() {
        let mut i18n = I18n::new();
        i18n.add_language("en", vec![TranslationEntry::new("hi").with_default("Hello")]);
        assert_eq!(
            i18n.t("en", "hi", &Options::new()),
            i18n.translate("en", "hi", &Options::new())
        );
    }

    #[test]
    fn test_entry_without_key_is_never_found() {
        let mut i18n = I18n::with_config(Config::default().with_verbosity(VerbosityLevel::Silent));
        let entries = load_from_json_str(r#"[{"Default": "orphan"}]"#).unwrap();
        i18n.add_language("en", entries);
        i18n.add_language("es", vec![TranslationEntry::new("").with_default("huérfano")]);

        assert_eq!(i18n.translate("en", "", &Options::new()), "");
        assert_eq!(i18n.translate("es", "", &Options::new()), "");
        assert_eq!(i18n.translate_pairs([("lang", "en")]), "");
    }

    #[test]
    fn test_html_interpolator_escapes_data() {
        let mut i18n = I18n::new().with_interpolator(HtmlInterpolator::new());
        i18n.add_language("en", vec![TranslationEntry::new("hi").with_default("<b>{{.Name}}</b>")]);
        let options = Options::new().with_data(Data::new().with("Name", "A & B"));
        assert_eq!(i18n.translate("en", "hi", &options), "<b>A &amp; B</b>");
    }
}
