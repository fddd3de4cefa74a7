/// Errors raised while loading translation entries.
///
/// Translation itself never fails; these only come from the loaders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    /// Reading a file or directory failed
    Io { path: String, message: String },
    /// Malformed JSON, or JSON not shaped as a list of entries
    Json(String),
    /// Malformed YAML, or YAML not shaped as a list of entries
    Yaml(String),
    /// A file pattern could not be compiled
    Pattern(String),
    /// A directory was expected
    NotADirectory(String),
}

impl std::fmt::Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadError::Io { path, message } => write!(f, "Failed to read '{}': {}", path, message),
            LoadError::Json(msg) => write!(f, "Invalid JSON translations: {}", msg),
            LoadError::Yaml(msg) => write!(f, "Invalid YAML translations: {}", msg),
            LoadError::Pattern(msg) => write!(f, "Invalid file pattern: {}", msg),
            LoadError::NotADirectory(path) => write!(f, "Path is not a directory: {}", path),
        }
    }
}

impl std::error::Error for LoadError {}

impl From<serde_json::Error> for LoadError {
    fn from(error: serde_json::Error) -> Self {
        LoadError::Json(error.to_string())
    }
}

impl From<serde_norway::Error> for LoadError {
    fn from(error: serde_norway::Error) -> Self {
        LoadError::Yaml(error.to_string())
    }
}

/// Result type for loader operations
pub type LoadResult<T> = Result<T, LoadError>;
