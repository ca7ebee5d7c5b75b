//! Serves recorded interactions back in order.

use std::collections::{HashMap, VecDeque};

use super::format::{Cassette, Interaction};

/// Hands out a cassette's interactions, one queue per `(port, method)`.
///
/// Calls on different ports do not consume each other's interactions, so
/// the relative order of ports in the recording does not matter.
#[derive(Debug, Default)]
pub struct CassetteReplayer {
    queues: HashMap<(String, String), VecDeque<Interaction>>,
}

impl CassetteReplayer {
    /// Indexes every interaction of `cassette`.
    #[must_use]
    pub fn new(cassette: &Cassette) -> Self {
        let mut queues: HashMap<(String, String), VecDeque<Interaction>> = HashMap::new();
        for interaction in &cassette.interactions {
            queues
                .entry((interaction.port.clone(), interaction.method.clone()))
                .or_default()
                .push_back(interaction.clone());
        }
        Self { queues }
    }

    /// Takes the next interaction recorded for `port::method`.
    ///
    /// # Panics
    ///
    /// Panics when nothing (more) was recorded for that pair. A replayed
    /// run that makes an unrecorded call is a broken test fixture.
    pub fn next_interaction(&mut self, port: &str, method: &str) -> Interaction {
        let key = (port.to_string(), method.to_string());
        match self.queues.get_mut(&key).and_then(VecDeque::pop_front) {
            Some(interaction) => interaction,
            None => {
                let mut remaining: Vec<String> = self
                    .queues
                    .iter()
                    .filter(|(_, queue)| !queue.is_empty())
                    .map(|((p, m), queue)| format!("{p}::{m} ({})", queue.len()))
                    .collect();
                remaining.sort();
                panic!(
                    "Cassette exhausted: no interaction left for {port}::{method}. Remaining: [{}]",
                    remaining.join(", ")
                );
            }
        }
    }

    /// Number of interactions not yet consumed.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.queues.values().map(VecDeque::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn cassette() -> Cassette {
        Cassette::new(
            "replayer",
            vec![
                Interaction::new("llm", "complete", json!({"prompt": "a"}), json!({"ok": "1"})),
                Interaction::new("remote", "fetch", json!({}), json!({"err": {"kind": "rate_limited"}})),
                Interaction::new("llm", "complete", json!({"prompt": "b"}), json!({"ok": "2"})),
            ],
        )
    }

    #[test]
    fn ports_are_replayed_independently_in_order() {
        let mut replayer = CassetteReplayer::new(&cassette());
        assert_eq!(replayer.next_interaction("llm", "complete").output, json!({"ok": "1"}));
        assert_eq!(replayer.next_interaction("llm", "complete").output, json!({"ok": "2"}));
        assert_eq!(replayer.remaining(), 1);
        assert_eq!(replayer.next_interaction("remote", "fetch").seq, 1);
        assert_eq!(replayer.remaining(), 0);
    }

    #[test]
    #[should_panic(expected = "Cassette exhausted")]
    fn exhausted_pair_panics() {
        let mut replayer = CassetteReplayer::new(&cassette());
        let _ = replayer.next_interaction("remote", "fetch");
        let _ = replayer.next_interaction("remote", "fetch");
    }

    #[test]
    #[should_panic(expected = "no interaction left for git::remote_url")]
    fn unrecorded_pair_panics() {
        let mut replayer = CassetteReplayer::new(&cassette());
        let _ = replayer.next_interaction("git", "remote_url");
    }
}
