//! JSON-file persistence layer for DialCoach.
//!
//! This crate provides the two stores the training server persists to disk:
//!
//! - [`ConfigStore`] - the single tenant-wide configuration record
//!   (`config.json`), deep-merged onto hard-coded defaults on load
//! - [`ScenarioStore`] - CRUD over the training scenarios (`scenarios.json`),
//!   seeded with the built-in scenarios on first load
//!
//! Both stores guard their read-modify-write cycles with an in-process mutex.
//! Atomic file replacement and cross-process locking are out of scope: a crash
//! mid-write can still corrupt a file.
//!
//! # Example
//!
//! ```no_run
//! use datastore::{ConfigStore, ScenarioStore};
//!
//! #[tokio::main]
//! async fn main() -> datastore::Result<()> {
//!     let config = ConfigStore::new("data/config.json");
//!     let cfg = config.load().await?;
//!
//!     let scenarios = ScenarioStore::new("data/scenarios.json");
//!     let all = scenarios.list(&cfg.company).await?;
//!     println!("{} scenarios", all.len());
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
mod merge;
pub mod scenarios;

pub use config::ConfigStore;
pub use error::{DatastoreError, Result};
pub use merge::deep_merge;
pub use scenarios::ScenarioStore;
