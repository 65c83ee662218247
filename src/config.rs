//! Configuration for the species extraction pass.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default sentinel identifying a species entry line.
pub const DEFAULT_SENTINEL: &str = "CITES";

/// Default token marking a superseded entry.
pub const DEFAULT_SUPERSEDED_FLAG: &str = "OBSOLETE";

/// Default separator preceding the English name (followed by a space).
pub const DEFAULT_SEPARATOR: &str = "/";

/// Default label of the status field (followed by a space).
pub const DEFAULT_STATUS_LABEL: &str = "IUCN:";

/// Status recorded when a marker line carries no status field.
pub const DEFAULT_STATUS: &str = "Not available";

/// First identifier handed out by a fresh registry.
pub const DEFAULT_STARTING_ID: u32 = 1001;

/// Marker grammar and identity seed for the extraction pass.
///
/// # Example
///
/// ```
/// use cites_ledger::config::ExtractionConfig;
///
/// let config = ExtractionConfig::default()
///     .with_starting_id(1)
///     .with_default_status("NE");
/// assert_eq!(config.sentinel, "CITES");
/// assert_eq!(config.starting_id, 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Substring that makes a line a candidate marker line
    pub sentinel: String,

    /// Token that switches a marker line to the superseded form
    pub superseded_flag: String,

    /// Separator before the English name; the name starts after "separator + space"
    pub separator: String,

    /// Label of the status field; the value starts after "label + space"
    pub status_label: String,

    /// Status used when the label is absent
    pub default_status: String,

    /// Seed of the identifier sequence
    pub starting_id: u32,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl ExtractionConfig {
    /// Create a configuration with the built-in marker grammar.
    pub fn new() -> Self {
        Self {
            sentinel: DEFAULT_SENTINEL.to_string(),
            superseded_flag: DEFAULT_SUPERSEDED_FLAG.to_string(),
            separator: DEFAULT_SEPARATOR.to_string(),
            status_label: DEFAULT_STATUS_LABEL.to_string(),
            default_status: DEFAULT_STATUS.to_string(),
            starting_id: DEFAULT_STARTING_ID,
        }
    }

    /// Load a configuration from a JSON file.
    ///
    /// Keys missing from the document keep their default values.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Set the sentinel substring.
    pub fn with_sentinel(mut self, sentinel: impl Into<String>) -> Self {
        self.sentinel = sentinel.into();
        self
    }

    /// Set the superseding flag token.
    pub fn with_superseded_flag(mut self, flag: impl Into<String>) -> Self {
        self.superseded_flag = flag.into();
        self
    }

    /// Set the English-name separator.
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    /// Set the status field label.
    pub fn with_status_label(mut self, label: impl Into<String>) -> Self {
        self.status_label = label.into();
        self
    }

    /// Set the status used when the field is absent.
    pub fn with_default_status(mut self, status: impl Into<String>) -> Self {
        self.default_status = status.into();
        self
    }

    /// Set the seed of the identifier sequence.
    pub fn with_starting_id(mut self, id: u32) -> Self {
        self.starting_id = id;
        self
    }

    /// Reject configurations whose tokens would match everywhere.
    pub fn validate(&self) -> Result<()> {
        let tokens = [
            ("sentinel", &self.sentinel),
            ("superseded_flag", &self.superseded_flag),
            ("separator", &self.separator),
            ("status_label", &self.status_label),
        ];
        for (name, value) in tokens {
            if value.trim().is_empty() {
                return Err(Error::InvalidConfig(format!("'{}' must not be empty", name)));
            }
        }
        Ok(())
    }
}
