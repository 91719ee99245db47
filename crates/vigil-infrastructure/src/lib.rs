//! Durable client-side state for Vigil: session snapshot storage,
//! client configuration, and platform paths.

pub mod config;
pub mod paths;
pub mod session_storage;

pub use config::ClientConfig;
pub use paths::VigilPaths;
pub use session_storage::{JsonSessionStore, MemorySessionStore};
