//! Service context bundling all port trait objects.

use std::path::Path;
use std::sync::{Arc, Mutex};

use crate::adapters::live::{
    LiveConfirm, LiveFileSystem, LiveGitHubClient, LiveGitRepo, LiveLlmClient,
};
use crate::adapters::replaying::{
    ReplayingConfirm, ReplayingGitRepo, ReplayingLlmClient, ReplayingRemote,
};
use crate::cassette::format::Cassette;
use crate::cassette::replayer::CassetteReplayer;
use crate::ports::confirm::Confirm;
use crate::ports::filesystem::FileSystem;
use crate::ports::git::GitRepo;
use crate::ports::llm::LlmClient;
use crate::ports::remote::RemoteRepository;

/// Bundles all port trait objects into a single context.
///
/// Each field provides access to one external boundary. Constructors
/// wire up live or replaying adapter implementations.
pub struct ServiceContext {
    /// Filesystem for scanning and writing the README.
    pub fs: Box<dyn FileSystem>,
    /// Git checkout queries.
    pub git: Box<dyn GitRepo>,
    /// Hosting provider for repository records.
    pub remote: Box<dyn RemoteRepository>,
    /// Language model for the narrative.
    pub llm: Box<dyn LlmClient>,
    /// Interactive yes/no questions.
    pub confirm: Box<dyn Confirm>,
}

impl ServiceContext {
    /// Creates a context that talks to the real world.
    #[must_use]
    pub fn live() -> Self {
        Self {
            fs: Box::new(LiveFileSystem),
            git: Box::new(LiveGitRepo),
            remote: Box::new(LiveGitHubClient::new()),
            llm: Box::new(LiveLlmClient::new()),
            confirm: Box::new(LiveConfirm),
        }
    }

    /// Creates a context whose network, git and prompt ports replay `cassette`.
    ///
    /// The filesystem stays live; tests point it at a temporary directory.
    #[must_use]
    pub fn from_cassette(cassette: &Cassette) -> Self {
        let replayer = Arc::new(Mutex::new(CassetteReplayer::new(cassette)));
        Self {
            fs: Box::new(LiveFileSystem),
            git: Box::new(ReplayingGitRepo::new(Arc::clone(&replayer))),
            remote: Box::new(ReplayingRemote::new(Arc::clone(&replayer))),
            llm: Box::new(ReplayingLlmClient::new(Arc::clone(&replayer))),
            confirm: Box::new(ReplayingConfirm::new(replayer)),
        }
    }

    /// Creates a replaying context from a YAML cassette file.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette file cannot be read or parsed.
    pub fn replaying(path: &Path) -> Result<Self, String> {
        Ok(Self::from_cassette(&Cassette::load(path)?))
    }
}
