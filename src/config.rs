//! Project configuration read from `docsmith.yaml`.
//!
//! ```yaml
//! exclude:
//!   - '^fixtures$'
//! badge_style: flat-square
//! default_badge_style: plastic
//! model: claude-sonnet-4-20250514
//! max_tokens: 4096
//! ```
//!
//! Every key is optional. Command-line flags take precedence.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::badges::{BadgeOptions, BadgeStyle};
use crate::generation::{DEFAULT_MAX_TOKENS, DEFAULT_MODEL};
use crate::scan::ExclusionSet;

/// Config file name looked up in the project directory.
pub const CONFIG_FILE: &str = "docsmith.yaml";

/// Settings for one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Extra exclusion patterns, matched against base names.
    pub exclude: Vec<String>,
    /// Forces a badge style.
    pub badge_style: Option<BadgeStyle>,
    /// Style used when no repository or manifest signal picks one.
    pub default_badge_style: BadgeStyle,
    /// Model identifier for the narrative.
    pub model: String,
    /// Completion token budget.
    pub max_tokens: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            exclude: Vec::new(),
            badge_style: None,
            default_badge_style: BadgeStyle::default(),
            model: DEFAULT_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }
}

impl Settings {
    /// Loads `docsmith.yaml` from `dir`, or defaults when there is none.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(dir: &Path) -> Result<Self, String> {
        let path = dir.join(CONFIG_FILE);
        if !path.is_file() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(&path)
            .map_err(|e| format!("failed to read {}: {e}", path.display()))?;
        let settings =
            Self::from_yaml(&text).map_err(|e| format!("invalid {}: {e}", path.display()))?;
        debug!(path = %path.display(), ?settings, "loaded config");
        Ok(settings)
    }

    /// Parses settings from YAML text. Blank text yields defaults.
    ///
    /// # Errors
    ///
    /// Returns the parser error for malformed YAML or unknown keys.
    pub fn from_yaml(text: &str) -> Result<Self, serde_yaml::Error> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(text)
    }

    /// Compiles the built-in exclusions plus [`Settings::exclude`].
    ///
    /// # Errors
    ///
    /// Returns an error naming the bad pattern set if a regex does not compile.
    pub fn exclusion_set(&self) -> Result<ExclusionSet, String> {
        ExclusionSet::with_extra(&self.exclude)
            .map_err(|e| format!("invalid exclusion pattern in {CONFIG_FILE}: {e}"))
    }

    /// Badge options with `style_flag` taking precedence over the config,
    /// for a README written to `output_dir`.
    #[must_use]
    pub fn badge_options(&self, style_flag: Option<BadgeStyle>, output_dir: &Path) -> BadgeOptions {
        BadgeOptions {
            style: style_flag.or(self.badge_style),
            default_style: self.default_badge_style,
            output_dir: Some(output_dir.to_path_buf()),
        }
    }
}
