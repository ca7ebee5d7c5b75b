//! Replaying adapters that serve recorded interactions.

pub mod confirm;
pub mod git;
pub mod llm;
pub mod remote;

use std::sync::{Arc, Mutex};

use serde::de::DeserializeOwned;

pub use confirm::ReplayingConfirm;
pub use git::ReplayingGitRepo;
pub use llm::ReplayingLlmClient;
pub use remote::ReplayingRemote;

use crate::cassette::replayer::CassetteReplayer;
use crate::ports::BoxError;

/// A replayer shared by all replaying adapters of one context.
pub type SharedReplayer = Arc<Mutex<CassetteReplayer>>;

/// Takes the output of the next `port::method` interaction.
pub(crate) fn next_output(replayer: &SharedReplayer, port: &str, method: &str) -> serde_json::Value {
    let mut guard = replayer.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
    guard.next_interaction(port, method).output
}

/// Decodes an `{"ok": value}` / `{"err": "message"}` output.
pub(crate) fn replay_result<T: DeserializeOwned>(
    output: serde_json::Value,
    context: &str,
) -> Result<T, BoxError> {
    if let Some(err) = output.get("err") {
        let message = err.as_str().map_or_else(|| err.to_string(), str::to_string);
        return Err(message.into());
    }
    let value = match output {
        serde_json::Value::Object(mut map) if map.contains_key("ok") => {
            map.remove("ok").unwrap_or_default()
        }
        other => other,
    };
    serde_json::from_value(value).map_err(|e| format!("{context}: failed to deserialize: {e}").into())
}
