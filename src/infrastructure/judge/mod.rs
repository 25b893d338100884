//! Judge adapters: the Ollama HTTP client and a scripted mock.

pub mod client;
pub mod mock;
pub mod offline;
pub mod retry;
pub mod types;

pub use client::OllamaJudge;
pub use mock::{MockJudge, MockObfuscation, MockScore};
pub use offline::OfflineJudge;
pub use retry::RetryPolicy;
