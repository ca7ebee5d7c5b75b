//! Port traits defining external boundaries.
//!
//! Each trait represents a boundary between the README pipeline and an
//! external system (filesystem, git, hosting API, LLM, interactive prompt).
//! Implementations live in `src/adapters/`.

pub mod confirm;
pub mod filesystem;
pub mod git;
pub mod llm;
pub mod remote;

pub use confirm::Confirm;
pub use filesystem::{DirEntry, FileSystem, FsFuture};
pub use git::GitRepo;
pub use llm::{CompletionFuture, CompletionRequest, CompletionResponse, LlmClient};
pub use remote::{RemoteFuture, RemoteRepository};

/// Error type returned by port methods that do not have a typed failure.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;
