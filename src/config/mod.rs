//! Index configuration.

mod file_config;
pub use file_config::FileConfig;

use serde::Deserialize;

/// Policy applied when a creation operation reuses an existing lookup key
/// (mobile number, artist name, album/song/playlist title).
///
/// `Allow` is the source-faithful behavior: creations append
/// unconditionally, duplicate keys are permitted and lookups resolve to the
/// first-created entity. `Reject` is the stricter alternative: a creation
/// whose key is already taken fails with `DuplicateKey`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    #[default]
    Allow,
    Reject,
}

/// Runtime configuration for the index.
#[derive(Debug, Clone, Default)]
pub struct IndexConfig {
    pub duplicate_policy: DuplicatePolicy,
}

impl IndexConfig {
    /// Build a config from optional file overrides, falling back to defaults
    /// for anything the file does not set.
    pub fn from_file_config(file: &FileConfig) -> Self {
        Self {
            duplicate_policy: file.duplicate_policy.unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy_allows_duplicates() {
        assert_eq!(IndexConfig::default().duplicate_policy, DuplicatePolicy::Allow);
    }

    #[test]
    fn test_file_config_overrides_policy() {
        let file = FileConfig {
            duplicate_policy: Some(DuplicatePolicy::Reject),
        };
        let config = IndexConfig::from_file_config(&file);
        assert_eq!(config.duplicate_policy, DuplicatePolicy::Reject);
    }

    #[test]
    fn test_empty_file_config_keeps_defaults() {
        let config = IndexConfig::from_file_config(&FileConfig::default());
        assert_eq!(config.duplicate_policy, DuplicatePolicy::Allow);
    }
}
