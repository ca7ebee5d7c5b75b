//! Builds cassettes and writes them to disk.

use std::path::Path;

use super::format::{Cassette, Interaction};

/// Accumulates interactions and writes them as a YAML cassette.
#[derive(Debug)]
pub struct CassetteRecorder {
    name: String,
    interactions: Vec<Interaction>,
}

impl CassetteRecorder {
    /// Starts an empty recording named `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), interactions: Vec::new() }
    }

    /// Appends one interaction.
    pub fn record(
        &mut self,
        port: impl Into<String>,
        method: impl Into<String>,
        input: serde_json::Value,
        output: serde_json::Value,
    ) -> &mut Self {
        self.interactions.push(Interaction::new(port, method, input, output));
        self
    }

    /// Finishes the recording without touching the disk.
    #[must_use]
    pub fn into_cassette(self) -> Cassette {
        Cassette::new(self.name, self.interactions)
    }

    /// Finishes the recording and writes it to `path`, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette cannot be serialized or written.
    pub fn finish(self, path: &Path) -> Result<Cassette, std::io::Error> {
        let cassette = self.into_cassette();
        let yaml = serde_yaml::to_string(&cassette).map_err(std::io::Error::other)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, yaml)?;
        Ok(cassette)
    }
}
