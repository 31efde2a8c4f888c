//! Load options and defaults.
//!
//! Parser configuration is passed explicitly to every `load` call; nothing
//! here is global state.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{NavError, Result};

/// Default maximum input file size in bytes (256 MB).
pub const DEFAULT_MAX_FILE_SIZE: u64 = 256 * 1024 * 1024;

/// Default cap on the number of nodes the backend may allocate.
pub const DEFAULT_NODES_LIMIT: u32 = u32::MAX;

/// Source label used for documents loaded from memory.
pub const MEMORY_SOURCE: &str = "<memory>";

/// Which form of an element or attribute name is compared during lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NameMatching {
    /// Compare the local name only (`item` matches `<ns:item>`).
    #[default]
    Local,

    /// Compare the name as written, including its prefix (`ns:item`).
    Qualified,
}

/// Options applied when a document is loaded.
///
/// # Examples
/// ```
/// use xmlnav::{LoadOptions, NameMatching};
///
/// let options = LoadOptions::default()
///     .with_max_text_len(64)
///     .with_name_matching(NameMatching::Qualified);
/// assert_eq!(options.max_text_len, Some(64));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoadOptions {
    /// Maximum length in bytes of text returned by `contents`/`attribute`.
    /// `None` means unbounded.
    pub max_text_len: Option<usize>,

    /// Trim leading and trailing whitespace from element text.
    pub trim_text: bool,

    /// Name comparison mode for element and attribute lookups.
    pub name_matching: NameMatching,

    /// Accept documents that carry a DTD.
    pub allow_dtd: bool,

    /// Maximum number of nodes the backend may allocate.
    pub nodes_limit: u32,

    /// Refuse files larger than this many bytes.
    pub max_file_size: u64,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            max_text_len: None,
            trim_text: false,
            name_matching: NameMatching::Local,
            allow_dtd: false,
            nodes_limit: DEFAULT_NODES_LIMIT,
            max_file_size: DEFAULT_MAX_FILE_SIZE,
        }
    }
}

impl LoadOptions {
    #[must_use]
    pub fn with_max_text_len(mut self, len: usize) -> Self {
        self.max_text_len = Some(len);
        self
    }

    #[must_use]
    pub fn with_trim_text(mut self, trim: bool) -> Self {
        self.trim_text = trim;
        self
    }

    #[must_use]
    pub fn with_name_matching(mut self, mode: NameMatching) -> Self {
        self.name_matching = mode;
        self
    }

    #[must_use]
    pub fn with_allow_dtd(mut self, allow: bool) -> Self {
        self.allow_dtd = allow;
        self
    }

    #[must_use]
    pub fn with_nodes_limit(mut self, limit: u32) -> Self {
        self.nodes_limit = limit;
        self
    }

    #[must_use]
    pub fn with_max_file_size(mut self, size: u64) -> Self {
        self.max_file_size = size;
        self
    }

    /// Backend options derived from these settings.
    pub(crate) fn parsing_options(&self) -> roxmltree::ParsingOptions {
        let mut options = roxmltree::ParsingOptions::default();
        options.allow_dtd = self.allow_dtd;
        options.nodes_limit = self.nodes_limit;
        options
    }

    /// Parse options from YAML text. Missing keys keep their defaults.
    pub fn from_yaml_str(yaml: &str) -> std::result::Result<Self, serde_yaml_ng::Error> {
        serde_yaml_ng::from_str(yaml)
    }

    /// Read options from a YAML file.
    ///
    /// # Returns
    /// * `Ok(LoadOptions)` on success
    /// * `Err(NavError::Config)` if the file can't be read or deserialized
    pub fn from_yaml_file(path: &Path) -> Result<Self> {
        let yaml = fs::read_to_string(path).map_err(|e| NavError::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Self::from_yaml_str(&yaml).map_err(|e| NavError::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }
}
