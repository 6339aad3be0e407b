//! # Stack Analysis GitHub Client
//!
//! Async client for pulling a named file out of a remote GitHub repository,
//! optionally from a specific branch. This is the file-fetch collaborator of
//! the stack analysis service: a thin wrapper over the GitHub REST API that
//! keeps "nothing there" (empty result) clearly separate from transport and
//! auth failures (errors).
//!
//! ## Example
//!
//! ```no_run
//! use stack_analysis_github::GithubClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Picks up GITHUB_TOKEN if set, works anonymously otherwise
//!     let client = GithubClient::from_env();
//!
//!     let entries = client
//!         .fetch_file("https://github.com/ravsa/testManifest", "pom.xml", None)
//!         .await?;
//!
//!     for entry in entries {
//!         println!("{}: {} bytes", entry.filepath, entry.content.len());
//!     }
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod error;

// Re-export main types for convenience
pub use client::{FileEntry, GithubClient};
pub use error::GithubError;
