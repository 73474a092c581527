//! Roanuz Football API Client Library
//!
//! A Rust client for the Roanuz Football APIs, covering live match data,
//! tournaments, schedules, standings and fantasy stats.
//!
//! ## Features
//!
//! - **Token Lifecycle**: Acquires a bearer token once, caches it through a
//!   pluggable storage handler and transparently re-authenticates when it
//!   expires
//! - **Pluggable Storage**: File-backed session storage by default, with an
//!   in-memory handler and a trait for custom backends
//! - **Endpoint Catalog**: One thin accessor per read-only API endpoint,
//!   returning the raw JSON payload
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use rfa_football::RfaClient;
//!
//! # fn example() -> rfa_football::Result<()> {
//! let client = RfaClient::builder()
//!     .access_key("your_access_key")
//!     .secret_key("your_secret_key")
//!     .app_id("your_app_id")
//!     .build()?;
//!
//! let schedule = client.get_schedule(Some("2020-05"))?;
//! println!("{schedule}");
//! # Ok(())
//! # }
//! ```
//!
//! ## Environment Configuration
//!
//! Credentials left unset on the builder are read from the environment:
//! ```bash
//! export RFA_ACCESS_KEY=...
//! export RFA_SECRET_KEY=...
//! export RFA_APP_ID=...
//! ```
//!
//! Non-200 `status_code` payloads are logged through [`tracing`] and
//! returned to the caller unchanged; install a subscriber to see them.

pub mod client;
pub mod config;
pub mod error;
pub mod storage;

// Re-export commonly used types
pub use client::{RequestMethod, RfaClient, RfaClientBuilder, API_BASE_URL, DEFAULT_FANTASY_MODEL};
pub use config::{Credentials, ACCESS_KEY_ENV_VAR, APP_ID_ENV_VAR, SECRET_KEY_ENV_VAR};
pub use error::{Result, RfaError};
pub use storage::{FileStorageHandler, MemoryStorageHandler, StorageHandler};
