//! Page records consumed by the tree builder.
//!
//! Records come from the content build as a flat list. Each record carries
//! a slash-delimited path (e.g. `/orm/client/queries`), a title and a set of
//! presentation flags that are copied onto the navigation node unchanged.
//!
//! # File Formats
//!
//! [`load_records`] accepts JSON (`.json`) and YAML (`.yaml`, `.yml`) files
//! containing either a bare list of records or an object with a `pages` list:
//!
//! ```yaml
//! pages:
//!   - path: /orm/index
//!     title: ORM
//!   - path: /orm/client/queries
//!     title: Queries
//!     navTitle: Query API
//!     langVariant: [typescript]
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Presentation flags copied from a record onto its tree node.
///
/// Flags never affect tree structure.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PageFlags {
    /// Always-visible entry without a disclosure toggle.
    pub static_link: bool,
    /// Estimated reading time (e.g. "15 min").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    /// Preview feature badge.
    pub preview: bool,
    /// Deprecated feature badge.
    pub deprecated: bool,
    /// Early access badge.
    pub early_access: bool,
    /// Page is excluded from the rendered sidebar.
    pub hide_page: bool,
    /// Render the label in code style.
    pub code_style: bool,
}

/// A documentation page as produced by the content build.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRecord {
    /// Slash-delimited page path (e.g. "/orm/client/index").
    pub path: String,
    /// Page title.
    pub title: String,
    /// Optional label override for the navigation tree.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nav_title: Option<String>,
    /// Presentation flags.
    #[serde(flatten)]
    pub flags: PageFlags,
    /// Language selector values. Only the first one is used for URLs.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub lang_variant: Vec<String>,
    /// Database selector values. Only the first one is used for URLs.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub db_variant: Vec<String>,
}

impl PageRecord {
    /// Create a record with a path and title and no optional fields.
    #[must_use]
    pub fn new(path: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            title: title.into(),
            ..Self::default()
        }
    }

    /// Set the navigation title override.
    #[must_use]
    pub fn with_nav_title(mut self, nav_title: impl Into<String>) -> Self {
        self.nav_title = Some(nav_title.into());
        self
    }

    /// Replace the presentation flags.
    #[must_use]
    pub fn with_flags(mut self, flags: PageFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Set the tech-switcher selectors.
    #[must_use]
    pub fn with_variants(mut self, lang: &[&str], db: &[&str]) -> Self {
        self.lang_variant = lang.iter().map(|&s| s.to_owned()).collect();
        self.db_variant = db.iter().map(|&s| s.to_owned()).collect();
        self
    }

    /// First language selector, if any.
    #[must_use]
    pub fn lang(&self) -> Option<&str> {
        self.lang_variant.first().map(String::as_str)
    }

    /// First database selector, if any.
    #[must_use]
    pub fn db(&self) -> Option<&str> {
        self.db_variant.first().map(String::as_str)
    }
}

/// Supported record file formats.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RecordFormat {
    /// JSON document.
    Json,
    /// YAML document.
    Yaml,
}

impl RecordFormat {
    /// Detect the format from a file extension.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "json" => Some(Self::Json),
            "yaml" | "yml" => Some(Self::Yaml),
            _ => None,
        }
    }
}

/// Error returned when record loading fails.
#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    /// Record file could not be read.
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        /// Path of the record file.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// JSON parsing error.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    /// YAML parsing error.
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    /// File extension is not `.json`, `.yaml` or `.yml`.
    #[error("Unsupported record file format: {}", .0.display())]
    UnsupportedFormat(PathBuf),
}

/// Accepted document shapes: a bare list or `{ pages: [...] }`.
#[derive(Deserialize)]
#[serde(untagged)]
enum RecordDocument {
    List(Vec<PageRecord>),
    Wrapped { pages: Vec<PageRecord> },
}

impl RecordDocument {
    fn into_records(self) -> Vec<PageRecord> {
        match self {
            Self::List(pages) | Self::Wrapped { pages } => pages,
        }
    }
}

/// Parse records from an in-memory document.
pub fn parse_records(content: &str, format: RecordFormat) -> Result<Vec<PageRecord>, RecordError> {
    let document: RecordDocument = match format {
        RecordFormat::Json => serde_json::from_str(content)?,
        RecordFormat::Yaml => serde_yaml::from_str(content)?,
    };
    Ok(document.into_records())
}

/// Load records from a JSON or YAML file.
///
/// The format is detected from the file extension.
pub fn load_records(path: &Path) -> Result<Vec<PageRecord>, RecordError> {
    let format = RecordFormat::from_path(path)
        .ok_or_else(|| RecordError::UnsupportedFormat(path.to_path_buf()))?;
    let content = std::fs::read_to_string(path).map_err(|source| RecordError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let records = parse_records(&content, format)?;
    tracing::debug!(path = %path.display(), record_count = records.len(), "Records loaded");
    Ok(records)
}
