//! Cassettes: recorded port interactions replayed in tests.
//!
//! A cassette is a YAML document holding an ordered list of
//! `{port, method, input, output}` interactions. Outputs that can fail use
//! `{"ok": value}` or `{"err": value}`.

pub mod format;
pub mod recorder;
pub mod replayer;

pub use format::{Cassette, Interaction};
pub use recorder::CassetteRecorder;
pub use replayer::CassetteReplayer;
