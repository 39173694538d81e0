//! Codec configuration
//!
//! Loaded from TOML:
//!
//! ```toml
//! default_encoding = "hash"
//! max_depth = 16
//!
//! [[classpath_prefixes]]
//! prefix = "com/example/templates"
//! code = "x1"
//!
//! [[repository_prefixes]]
//! prefix = "/app:company_home/cm:projects"   # code derived from the digest
//! ```

use crate::codecs::DEFAULT_MAX_DEPTH;
use crate::encoding::Encoding;
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use vref_hash::{classpath_store, repository_store, HashCode, HashStore};

/// Hash prefix registration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrefixEntry {
    /// Path prefix
    pub prefix: String,

    /// Explicit code; derived from the prefix digest when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl PrefixEntry {
    /// Entry with an explicit code
    #[must_use]
    pub fn with_code(prefix: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            code: Some(code.into()),
        }
    }

    /// Entry with a derived code
    #[must_use]
    pub fn derived(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            code: None,
        }
    }

    fn register(&self, store: &HashStore) -> Result<HashCode, ConfigError> {
        match &self.code {
            Some(code) => {
                let code: HashCode = code.parse()?;
                store.put(&self.prefix, code.clone())?;
                Ok(code)
            }
            None => Ok(store.put_derived(&self.prefix)?),
        }
    }
}

/// Codec configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecConfig {
    /// Encoding used by `encode` and node-id embedding
    pub default_encoding: Encoding,

    /// Deepest reference nesting accepted by parsers
    pub max_depth: usize,

    /// Extra classpath hash prefixes
    pub classpath_prefixes: Vec<PrefixEntry>,

    /// Extra repository path hash prefixes
    pub repository_prefixes: Vec<PrefixEntry>,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            default_encoding: Encoding::DEFAULT,
            max_depth: DEFAULT_MAX_DEPTH,
            classpath_prefixes: Vec::new(),
            repository_prefixes: Vec::new(),
        }
    }
}

impl CodecConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With default encoding
    #[inline]
    #[must_use]
    pub fn with_default_encoding(mut self, encoding: Encoding) -> Self {
        self.default_encoding = encoding;
        self
    }

    /// With max nesting depth
    #[inline]
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// With an extra classpath prefix
    #[inline]
    #[must_use]
    pub fn with_classpath_prefix(mut self, entry: PrefixEntry) -> Self {
        self.classpath_prefixes.push(entry);
        self
    }

    /// With an extra repository path prefix
    #[inline]
    #[must_use]
    pub fn with_repository_prefix(mut self, entry: PrefixEntry) -> Self {
        self.repository_prefixes.push(entry);
        self
    }

    /// Parse and validate TOML configuration
    ///
    /// # Errors
    /// Returns error on malformed TOML or invalid settings
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Read configuration from a TOML file
    ///
    /// # Errors
    /// Returns error if the file cannot be read or is invalid
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::io_error(path, e))?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!(path = %path.display(), "loaded codec configuration");
        Ok(config)
    }

    /// Check setting ranges
    ///
    /// # Errors
    /// Returns error if `max_depth` is zero
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_depth == 0 {
            return Err(ConfigError::InvalidSetting {
                setting: "max_depth",
                message: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    /// Register the configured prefixes in the process-wide stores
    ///
    /// # Errors
    /// Returns error if a prefix or code conflicts with an existing one
    pub fn apply(&self) -> Result<(), ConfigError> {
        self.apply_to(classpath_store(), repository_store())
    }

    /// Register the configured prefixes in the given stores
    ///
    /// # Errors
    /// Returns error if a prefix or code conflicts with an existing one
    pub fn apply_to(&self, classpath: &HashStore, repository: &HashStore) -> Result<(), ConfigError> {
        self.validate()?;
        for entry in &self.classpath_prefixes {
            let code = entry.register(classpath)?;
            tracing::info!(prefix = %entry.prefix, %code, "classpath hash prefix configured");
        }
        for entry in &self.repository_prefixes {
            let code = entry.register(repository)?;
            tracing::info!(prefix = %entry.prefix, %code, "repository hash prefix configured");
        }
        Ok(())
    }
}
