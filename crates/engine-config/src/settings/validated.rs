use super::error::SettingsError;
use serde::Deserialize;
use std::path::Path;
use tracing::info;

/// Deepest list nesting accepted by default.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Immutable, validated configuration of the filter adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSettings {
    /// Deepest predicate list nesting the adapter will traverse
    max_depth: usize,
    /// Whether adapting a filter first checks that every predicate is supported
    verify_support: bool,
}

impl FilterSettings {
    pub fn builder() -> FilterSettingsBuilder {
        FilterSettingsBuilder::default()
    }

    pub fn from_builder(builder: FilterSettingsBuilder) -> Result<Self, SettingsError> {
        let settings = Self {
            max_depth: builder.max_depth.unwrap_or(DEFAULT_MAX_DEPTH),
            verify_support: builder.verify_support.unwrap_or(false),
        };
        settings.validate()?;
        Ok(settings)
    }

    /// Parse settings from a JSON document. Missing keys take their defaults.
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let builder: FilterSettingsBuilder = serde_json::from_str(json)?;
        Self::from_builder(builder)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        info!(path = %path.display(), ?settings, "Loaded filter settings");
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.max_depth == 0 {
            return Err(SettingsError::InvalidValue {
                key: "max_depth",
                message: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn verify_support(&self) -> bool {
        self.verify_support
    }
}

impl Default for FilterSettings {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            verify_support: false,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FilterSettingsBuilder {
    max_depth: Option<usize>,
    verify_support: Option<bool>,
}

impl FilterSettingsBuilder {
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    pub fn verify_support(mut self, verify: bool) -> Self {
        self.verify_support = Some(verify);
        self
    }

    pub fn build(self) -> Result<FilterSettings, SettingsError> {
        FilterSettings::from_builder(self)
    }
}
