//! Live adapters for real external interactions.

pub mod confirm;
pub mod filesystem;
pub mod git;
pub mod github;
pub mod llm;

pub use confirm::LiveConfirm;
pub use filesystem::LiveFileSystem;
pub use git::LiveGitRepo;
pub use github::LiveGitHubClient;
pub use llm::LiveLlmClient;
