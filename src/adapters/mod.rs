//! Port implementations.
//!
//! `live` talks to the real filesystem, git, GitHub, Anthropic and the
//! terminal. `replaying` serves cassette recordings to tests.

pub mod live;
pub mod replaying;
