//! Replaying adapter for the `RemoteRepository` port.

use super::{next_output, SharedReplayer};
use crate::ports::remote::{RemoteFuture, RemoteRepository};
use crate::remote::{RemoteError, RemoteMetadata, RepoRef};

/// Serves recorded repository records. Recorded errors are typed
/// [`RemoteError`] values, e.g. `{"err": {"kind": "not_found", "detail": "o/r"}}`.
pub struct ReplayingRemote {
    replayer: SharedReplayer,
}

impl ReplayingRemote {
    /// Creates the adapter over a shared replayer.
    #[must_use]
    pub fn new(replayer: SharedReplayer) -> Self {
        Self { replayer }
    }
}

impl RemoteRepository for ReplayingRemote {
    fn fetch<'a>(&'a self, _repo: &'a RepoRef) -> RemoteFuture<'a> {
        let output = next_output(&self.replayer, "remote", "fetch");
        Box::pin(async move { decode(output) })
    }
}

fn decode(mut output: serde_json::Value) -> Result<RemoteMetadata, RemoteError> {
    if let Some(err) = output.get_mut("err").map(serde_json::Value::take) {
        let err = serde_json::from_value::<RemoteError>(err)
            .unwrap_or_else(|e| RemoteError::Decode(format!("remote::fetch: {e}")));
        return Err(err);
    }
    if let Some(ok) = output.get_mut("ok") {
        output = ok.take();
    }
    serde_json::from_value(output).map_err(|e| RemoteError::Decode(format!("remote::fetch: {e}")))
}
