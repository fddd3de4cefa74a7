use crate::entry::TranslationEntries;
use crate::error::{LoadError, LoadResult};
use regex::Regex;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Translation file formats.
///
/// Both formats hold a list of entries with PascalCase fields:
/// ```json
/// [
///     { "Key": "emails", "One": "You have one email", "Many": "You have {{.Qty}} emails" },
///     { "Key": "welcome", "Default": "Welcome", "Female": "Welcome, ma'am" }
/// ]
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Yaml,
}

impl Format {
    /// Format by file extension: `.json`, `.yaml` or `.yml`.
    pub fn from_path(path: &Path) -> Option<Format> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Some(Format::Json),
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                Some(Format::Yaml)
            }
            _ => None,
        }
    }

    pub fn parse(&self, bytes: &[u8]) -> LoadResult<TranslationEntries> {
        match self {
            Format::Json => load_from_json_bytes(bytes),
            Format::Yaml => load_from_yaml_bytes(bytes),
        }
    }
}

pub fn load_from_json_bytes(bytes: &[u8]) -> LoadResult<TranslationEntries> {
    Ok(serde_json::from_slice(bytes)?)
}

pub fn load_from_json_str(json: &str) -> LoadResult<TranslationEntries> {
    load_from_json_bytes(json.as_bytes())
}

/// Parse YAML translations. An empty document is an empty list.
pub fn load_from_yaml_bytes(bytes: &[u8]) -> LoadResult<TranslationEntries> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Vec::new());
    }
    Ok(serde_norway::from_slice(bytes)?)
}

pub fn load_from_yaml_str(yaml: &str) -> LoadResult<TranslationEntries> {
    load_from_yaml_bytes(yaml.as_bytes())
}

/// Load and concatenate JSON files.
///
/// Each pattern is a path whose file name may contain `*` and `?`
/// wildcards, e.g. `locales/en/*.json`. Matches of one pattern are read in
/// name order. A wildcard pattern matching nothing contributes no entries;
/// a plain path that does not exist is an error.
pub fn load_from_json_files<P: AsRef<Path>>(patterns: &[P]) -> LoadResult<TranslationEntries> {
    load_files_as(patterns, Some(Format::Json))
}

/// YAML counterpart of [`load_from_json_files`].
pub fn load_from_yaml_files<P: AsRef<Path>>(patterns: &[P]) -> LoadResult<TranslationEntries> {
    load_files_as(patterns, Some(Format::Yaml))
}

/// Like [`load_from_json_files`], picking the format of each file from
/// its extension. Files with other extensions are skipped.
pub fn load_from_files<P: AsRef<Path>>(patterns: &[P]) -> LoadResult<TranslationEntries> {
    load_files_as(patterns, None)
}

fn load_files_as<P: AsRef<Path>>(
    patterns: &[P],
    format: Option<Format>,
) -> LoadResult<TranslationEntries> {
    let mut all_entries = Vec::new();

    for pattern in patterns {
        for path in expand_pattern(pattern.as_ref())? {
            let Some(file_format) = format.or_else(|| Format::from_path(&path)) else {
                tracing::debug!(path = %path.display(), "Skipping file with unknown extension");
                continue;
            };
            all_entries.extend(load_file(&path, file_format)?);
        }
    }

    Ok(all_entries)
}

fn load_file(path: &Path, format: Format) -> LoadResult<TranslationEntries> {
    let bytes = fs::read(path).map_err(|e| io_error(path, e))?;
    let entries = format.parse(&bytes)?;
    tracing::debug!(path = %path.display(), entries = entries.len(), "Loaded translations");
    Ok(entries)
}

/// Load every translation file of a directory, one language per file stem.
///
/// `en.json` and `en.yaml` both feed language `"en"`; files of the same
/// language are concatenated in name order. Other files are ignored.
pub fn load_languages_from_dir(dir: &Path) -> LoadResult<HashMap<String, TranslationEntries>> {
    if !dir.is_dir() {
        return Err(LoadError::NotADirectory(dir.display().to_string()));
    }

    let mut paths = Vec::new();
    for entry in fs::read_dir(dir).map_err(|e| io_error(dir, e))? {
        let path = entry.map_err(|e| io_error(dir, e))?.path();
        if path.is_file() && Format::from_path(&path).is_some() {
            paths.push(path);
        }
    }
    paths.sort();

    let mut languages: HashMap<String, TranslationEntries> = HashMap::new();
    for path in paths {
        let Some(language) = path.file_stem().and_then(|stem| stem.to_str()) else {
            tracing::warn!(path = %path.display(), "Skipping file with a non UTF-8 name");
            continue;
        };
        let Some(format) = Format::from_path(&path) else {
            continue;
        };
        let entries = load_file(&path, format)?;
        languages
            .entry(language.to_owned())
            .or_default()
            .extend(entries);
    }

    if languages.is_empty() {
        tracing::warn!(dir = %dir.display(), "No translation files found");
    }

    Ok(languages)
}

/// Resolve wildcards in the file name component of `pattern`.
fn expand_pattern(pattern: &Path) -> LoadResult<Vec<PathBuf>> {
    let file_name = pattern.file_name().and_then(|name| name.to_str());
    let is_pattern = |name: &&str| name.contains(|c: char| c == '*' || c == '?');
    let Some(file_name) = file_name.filter(is_pattern) else {
        return Ok(vec![pattern.to_path_buf()]);
    };

    let dir = match pattern.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let matcher = wildcard_regex(file_name)?;

    let Ok(entries) = fs::read_dir(&dir) else {
        tracing::debug!(
            pattern = %pattern.display(),
            "Pattern directory is not readable, no matches"
        );
        return Ok(Vec::new());
    };

    let mut matches = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| io_error(&dir, e))?.path();
        let is_match = path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| matcher.is_match(name));
        if is_match && path.is_file() {
            matches.push(path);
        }
    }
    matches.sort();
    Ok(matches)
}

fn wildcard_regex(file_name: &str) -> LoadResult<Regex> {
    let mut pattern = String::from("^");
    for c in file_name.chars() {
        match c {
            '*' => pattern.push_str(".*"),
            '?' => pattern.push('.'),
            _ => pattern.push_str(&regex::escape(c.encode_utf8(&mut [0; 4]))),
        }
    }
    pattern.push('$');
    Regex::new(&pattern).map_err(|e| LoadError::Pattern(e.to_string()))
}

fn io_error(path: &Path, error: std::io::Error) -> LoadError {
    LoadError::Io {
        path: path.display().to_string(),
        message: error.to_string(),
    }
}
