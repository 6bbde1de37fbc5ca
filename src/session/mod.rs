pub mod client;
pub mod store;
pub mod types;

pub use client::SessionClient;
pub use store::{FileStore, MemoryStore, SessionStore};
pub use types::{ProfileSummary, Session};
