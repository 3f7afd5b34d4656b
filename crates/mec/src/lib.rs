//! Text-first mechanical design: geometric objects, and sessions that keep them in a workspace
//! and save them to plain-text files.

pub mod fuzzy;
pub mod geometry;
pub mod id;
pub mod object;
pub mod session;

mod serialization;

/// Version of the crate, recorded in every saved session file.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
