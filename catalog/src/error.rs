use std::fmt;
use std::path::PathBuf;

/// Errors raised while loading catalog data.
#[derive(Debug)]
pub enum CatalogError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    UnknownItem(String),
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::Io { path, source } => {
                write!(f, "cannot read '{}': {}", path.display(), source)
            }
            CatalogError::Json { path, source } => {
                write!(f, "invalid JSON in '{}': {}", path.display(), source)
            }
            CatalogError::UnknownItem(name) => {
                write!(f, "no item named '{}' in the catalog", name)
            }
        }
    }
}

impl std::error::Error for CatalogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CatalogError::Io { source, .. } => Some(source),
            CatalogError::Json { source, .. } => Some(source),
            CatalogError::UnknownItem(_) => None,
        }
    }
}
