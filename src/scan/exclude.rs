//! Exclusion rules applied to entry base names during a scan.

use regex::RegexSet;

/// Built-in exclusion patterns, matched against an entry's base name.
pub const DEFAULT_EXCLUSIONS: &[&str] = &[
    // version control
    r"^\.git$",
    r"^\.hg$",
    r"^\.svn$",
    // dependency caches and virtualenvs
    r"^node_modules$",
    r"^bower_components$",
    r"^__pycache__$",
    r"^\.venv$",
    r"^venv$",
    r"^\.tox$",
    r"^\.mypy_cache$",
    r"^\.pytest_cache$",
    // build and coverage output
    r"^target$",
    r"^dist$",
    r"^build$",
    r"^out$",
    r"^\.next$",
    r"^coverage$",
    r"^\.nyc_output$",
    // lock and log files
    r"^package-lock\.json$",
    r"^yarn\.lock$",
    r"^pnpm-lock\.yaml$",
    r"^Cargo\.lock$",
    r"^poetry\.lock$",
    r"^Pipfile\.lock$",
    r"\.log$",
    // environment files
    r"^\.env(\..+)?$",
    // binary assets that cannot be read as text
    r"(?i)\.(png|jpe?g|gif|ico|webp|bmp|pdf|zip|gz|tgz|tar|jar|woff2?|ttf|otf|eot|exe|dll|so|dylib|o|a|class|pyc|wasm|mp3|mp4|mov)$",
    r"^\.DS_Store$",
];

/// Compiled set of exclusion patterns.
#[derive(Debug, Clone)]
pub struct ExclusionSet {
    patterns: RegexSet,
}

impl ExclusionSet {
    /// Compiles the given patterns.
    ///
    /// # Errors
    ///
    /// Returns an error if any pattern is not a valid regular expression.
    pub fn new<I, S>(patterns: I) -> Result<Self, regex::Error>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Ok(Self { patterns: RegexSet::new(patterns)? })
    }

    /// Built-in defaults followed by `extra`.
    ///
    /// # Errors
    ///
    /// Returns an error if any extra pattern is not a valid regular expression.
    pub fn with_extra<S: AsRef<str>>(extra: &[S]) -> Result<Self, regex::Error> {
        Self::new(DEFAULT_EXCLUSIONS.iter().copied().chain(extra.iter().map(|s| s.as_ref())))
    }

    /// Returns `true` if `name` matches any pattern.
    #[must_use]
    pub fn is_excluded(&self, name: &str) -> bool {
        self.patterns.is_match(name)
    }

    /// Number of patterns in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Returns `true` if the set has no patterns.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

impl Default for ExclusionSet {
    fn default() -> Self {
        let empty: [&str; 0] = [];
        Self::with_extra(&empty).expect("built-in exclusion patterns compile")
    }
}
