//! Cassette data structures.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single recorded call on a port.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Interaction {
    /// Position in the recording, assigned by the recorder.
    pub seq: u64,
    /// Port name (`remote`, `llm`, `git`, `confirm`).
    pub port: String,
    /// Method invoked on the port.
    pub method: String,
    /// Arguments of the call.
    #[serde(default)]
    pub input: serde_json::Value,
    /// What the port returned.
    pub output: serde_json::Value,
}

/// A named, timestamped sequence of interactions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Cassette {
    /// Human-readable name.
    pub name: String,
    /// When the cassette was recorded.
    pub recorded_at: DateTime<Utc>,
    /// Interactions in recording order.
    #[serde(default)]
    pub interactions: Vec<Interaction>,
}

impl Cassette {
    /// Builds a cassette from interactions, renumbering them in order.
    #[must_use]
    pub fn new(name: impl Into<String>, interactions: Vec<Interaction>) -> Self {
        let interactions = interactions
            .into_iter()
            .zip(0..)
            .map(|(interaction, seq)| Interaction { seq, ..interaction })
            .collect();
        Self { name: name.into(), recorded_at: Utc::now(), interactions }
    }

    /// Reads a YAML cassette from disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("failed to read cassette {}: {e}", path.display()))?;
        serde_yaml::from_str(&content)
            .map_err(|e| format!("failed to parse cassette {}: {e}", path.display()))
    }
}

impl Interaction {
    /// Creates an interaction with `seq` 0; [`Cassette::new`] renumbers.
    pub fn new(
        port: impl Into<String>,
        method: impl Into<String>,
        input: serde_json::Value,
        output: serde_json::Value,
    ) -> Self {
        Self { seq: 0, port: port.into(), method: method.into(), input, output }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn new_renumbers_interactions() {
        let cassette = Cassette::new(
            "renumber",
            vec![
                Interaction::new("git", "remote_url", json!({}), json!({"ok": null})),
                Interaction::new("confirm", "confirm", json!({}), json!(false)),
            ],
        );
        let seqs: Vec<u64> = cassette.interactions.iter().map(|i| i.seq).collect();
        assert_eq!(seqs, vec![0, 1]);
    }

    #[test]
    fn missing_input_defaults_to_null() {
        let yaml = "name: t\nrecorded_at: 2025-01-01T00:00:00Z\ninteractions:\n  - seq: 0\n    port: confirm\n    method: confirm\n    output: true\n";
        let cassette: Cassette = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(cassette.interactions[0].input, serde_json::Value::Null);
        assert_eq!(cassette.interactions[0].output, json!(true));
    }
}
