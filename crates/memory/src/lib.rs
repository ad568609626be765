//! In-memory backend adapter.
//!
//! Stands in for a live native or browser connection: tests drive it
//! directly, and the CLI replays recorded [`BackendFixture`] files through it.

pub mod backend;
pub mod fixture;
pub mod logs;

pub use backend::MemoryBackend;
pub use fixture::{BackendFixture, FixtureError, ScriptFixture};
pub use logs::LogStore;
