//! Settings for user-type behavior, loadable from a TOML file.
//!
//! ```toml
//! [user_types]
//! unknown_fields = "ignore"
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{info, warn};

use crate::{UserTypeError, UserTypeResult};

/// What instance construction does with field names the type does not declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownFieldPolicy {
    /// Fail with [`UserTypeError::UnknownField`].
    #[default]
    Reject,
    /// Drop the value and log a warning.
    Ignore,
}

/// Behavior knobs attached to a user-type definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UserTypeSettings {
    #[serde(default)]
    pub unknown_fields: UnknownFieldPolicy,
}

/// On-disk layout of a settings file.
#[derive(Debug, Default, Deserialize)]
struct SettingsFile {
    #[serde(default)]
    user_types: UserTypeSettings,
}

impl UserTypeSettings {
    /// Parses settings from TOML text.
    pub fn from_toml_str(contents: &str) -> UserTypeResult<Self> {
        toml::from_str::<SettingsFile>(contents)
            .map(|file| file.user_types)
            .map_err(|e| UserTypeError::Config(e.to_string()))
    }

    /// Loads settings from `path`.
    /// Falls back to defaults when the file is missing or invalid.
    pub fn load_from(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            info!("No user type settings at {:?}, using defaults", path);
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(contents) => match Self::from_toml_str(&contents) {
                Ok(settings) => {
                    info!("Loaded user type settings from {:?}", path);
                    settings
                }
                Err(e) => {
                    warn!("{} in {:?}. Falling back to defaults.", e, path);
                    Self::default()
                }
            },
            Err(e) => {
                warn!("Failed to read user type settings {:?}: {}", path, e);
                Self::default()
            }
        }
    }
}
