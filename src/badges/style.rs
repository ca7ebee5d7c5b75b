//! Visual style selection for a badge set.

use std::path::PathBuf;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::metadata::AggregatedMetadata;
use crate::remote::RemoteMetadata;

/// Star count from which a repository counts as popular.
pub const POPULAR_STARS: u64 = 1000;

/// Topics marking a repository as legacy.
pub const LEGACY_TOPICS: &[&str] = &["legacy", "deprecated", "unmaintained"];

/// A shields.io badge style.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum BadgeStyle {
    /// `flat`.
    #[default]
    Flat,
    /// `flat-square`.
    FlatSquare,
    /// `plastic`.
    Plastic,
    /// `for-the-badge`.
    ForTheBadge,
    /// `social`.
    Social,
}

impl BadgeStyle {
    /// The `style=` query value.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Flat => "flat",
            Self::FlatSquare => "flat-square",
            Self::Plastic => "plastic",
            Self::ForTheBadge => "for-the-badge",
            Self::Social => "social",
        }
    }
}

/// Caller preferences for badge synthesis.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BadgeOptions {
    /// Forces this style regardless of the heuristic.
    pub style: Option<BadgeStyle>,
    /// Style used when no heuristic applies.
    pub default_style: BadgeStyle,
    /// Directory the README is written to. Local file links are made
    /// relative to it; when unset they are relative to the analyzed project.
    pub output_dir: Option<PathBuf>,
}

/// Picks the style for one badge set.
///
/// Priority: explicit override, legacy repository (`plastic`), popular
/// repository (`for-the-badge`), library manifest (`flat-square`),
/// application manifest (`flat`), then the configured default.
#[must_use]
pub fn resolve_style(
    remote: Option<&RemoteMetadata>,
    local: Option<&AggregatedMetadata>,
    options: &BadgeOptions,
) -> BadgeStyle {
    if let Some(style) = options.style {
        return style;
    }
    if remote.is_some_and(is_legacy) {
        return BadgeStyle::Plastic;
    }
    if remote.is_some_and(|r| r.stars >= POPULAR_STARS) {
        return BadgeStyle::ForTheBadge;
    }
    if local.is_some_and(AggregatedMetadata::is_library) {
        return BadgeStyle::FlatSquare;
    }
    if local.is_some_and(AggregatedMetadata::is_application) {
        return BadgeStyle::Flat;
    }
    options.default_style
}

fn is_legacy(remote: &RemoteMetadata) -> bool {
    remote.archived || remote.topics.iter().any(|t| LEGACY_TOPICS.contains(&t.as_str()))
}
