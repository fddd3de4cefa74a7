//! Command line support for variant-i18n
//!
//! Builds a registry from translation files and runs translations or
//! consistency checks against it.
//!
//! # Loading
//!
//! - `--dir locales` registers one language per file stem
//!   (`locales/en.json`, `locales/es.yaml`, ...)
//! - `--load es=locales/es/*.yaml` registers the matches of a pattern under
//!   a language; repeated loads of one language are concatenated

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use variant_i18n::{
    Config, Data, I18n, LoadResult, Options, load_from_files, load_languages_from_dir,
};

/// Where the translations of one language come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadSpec {
    pub language: String,
    pub pattern: PathBuf,
}

/// Parse `LANG=PATTERN`.
pub fn parse_load_spec(arg: &str) -> Result<LoadSpec, String> {
    let (language, pattern) = split_pair(arg)?;
    Ok(LoadSpec {
        language: language.to_owned(),
        pattern: PathBuf::from(pattern),
    })
}

/// Parse a `FIELD=VALUE` interpolation argument.
pub fn parse_data_pair(arg: &str) -> Result<(String, String), String> {
    let (field, value) = split_pair(arg)?;
    Ok((field.to_owned(), value.to_owned()))
}

fn split_pair(arg: &str) -> Result<(&str, &str), String> {
    match arg.split_once('=') {
        Some((name, value)) if !name.is_empty() => Ok((name, value)),
        _ => Err(format!("expected NAME=VALUE, got '{}'", arg)),
    }
}

/// Build a registry from a translation directory and explicit loads.
///
/// The consistency check is disabled while loading, since languages are
/// registered one at a time; run [`consistency_report`] once all are in.
pub fn build_registry(config: Config, dir: Option<&Path>, loads: &[LoadSpec]) -> LoadResult<I18n> {
    let mut languages: BTreeMap<String, Vec<_>> = BTreeMap::new();

    if let Some(dir) = dir {
        languages.extend(load_languages_from_dir(dir)?);
    }
    for load in loads {
        let entries = load_from_files(&[&load.pattern])?;
        languages.entry(load.language.clone()).or_default().extend(entries);
    }

    let mut i18n = I18n::with_config(config.with_consistency_check(false));
    for (language, entries) in languages {
        tracing::info!(language = %language, entries = entries.len(), "Registered language");
        i18n.add_language(&language, entries);
    }
    Ok(i18n)
}

/// Options from command line values. Data is only attached when at least
/// one field was given, so texts without data are never interpolated.
pub fn build_options(
    count: Option<i64>,
    gender: Option<&str>,
    data: &[(String, String)],
) -> Options {
    Options {
        count,
        gender: gender.map(str::to_owned),
        data: if data.is_empty() {
            None
        } else {
            Some(
                data.iter()
                    .map(|(field, value)| (field.as_str(), value.as_str()))
                    .collect::<Data>(),
            )
        },
    }
}

/// Consistency messages for `languages`, or for every language when empty.
pub fn consistency_report(i18n: &I18n, languages: &[String]) -> Vec<String> {
    let names: Vec<&str> = if languages.is_empty() {
        i18n.languages()
    } else {
        languages.iter().map(String::as_str).collect()
    };
    names
        .into_iter()
        .flat_map(|name| i18n.check_language_consistency(name).1)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_parse_load_spec() {
        assert_eq!(
            parse_load_spec("es=locales/es/*.yaml").unwrap(),
            LoadSpec {
                language: "es".to_string(),
                pattern: PathBuf::from("locales/es/*.yaml"),
            }
        );
        assert!(parse_load_spec("locales/es.yaml").is_err());
        assert!(parse_load_spec("=x").is_err());
    }

    #[test]
    fn test_parse_data_pair_keeps_extra_equals() {
        assert_eq!(
            parse_data_pair("Expr=a=b").unwrap(),
            ("Expr".to_string(), "a=b".to_string())
        );
    }

    #[test]
    fn test_build_options_without_data() {
        let options = build_options(Some(2), None, &[]);
        assert_eq!(options.count, Some(2));
        assert!(options.data.is_none());

        let data = [("Name".to_string(), "Ada".to_string())];
        let options = build_options(None, Some("female"), &data);
        assert_eq!(options.gender.as_deref(), Some("female"));
        assert_eq!(options.data.unwrap().len(), 1);
    }

    #[test]
    fn test_build_registry_and_report() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("en.json"),
            r#"[{"Key": "hi", "Default": "Hello"}, {"Key": "bye", "Default": "Bye"}]"#,
        )
        .unwrap();
        let extra = dir.path().join("extra");
        fs::create_dir(&extra).unwrap();
        fs::write(extra.join("es-1.yaml"), "- Key: hi\n  Default: Hola\n").unwrap();

        let loads = vec![LoadSpec {
            language: "es".to_string(),
            pattern: extra.join("es-*.yaml"),
        }];
        let i18n = build_registry(Config::default(), Some(dir.path()), &loads).unwrap();
        assert_eq!(i18n.languages(), vec!["en", "es"]);
        assert_eq!(i18n.translate("es", "hi", &Options::new()), "Hola");
        assert_eq!(i18n.translate("es", "bye", &Options::new()), "Bye");

        let report = consistency_report(&i18n, &["es".to_string()]);
        assert_eq!(
            report,
            vec!["the language 'en' has the key 'bye' that doesn't exist in 'es'".to_string()]
        );
        // Both directions when checking everything
        assert_eq!(consistency_report(&i18n, &[]).len(), 2);
    }
}
