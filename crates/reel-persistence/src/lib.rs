//! Persistence layer for reel.
//!
//! The [`ProjectStore`] keeps every project in memory and rewrites the whole
//! collection to a single JSON file after each mutation. Writes go through a
//! temporary file followed by a rename so the file is never half written.
//!
//! # Example
//!
//! ```no_run
//! use chrono::NaiveDate;
//! use reel_models::NewProject;
//! use reel_persistence::ProjectStore;
//!
//! let (mut store, _outcome) = ProjectStore::open("/home/user/.reel/projects.json");
//!
//! let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
//! let id = store
//!     .create_project(NewProject::new("Sunset", "A. Diaz", 1000.0, start))
//!     .unwrap()
//!     .id;
//!
//! store.register_expense(id, 1200.0).unwrap();
//! assert_eq!(store.get_project(id).unwrap().remaining_budget(), -200.0);
//! ```

pub mod atomic;
pub mod error;
pub mod stats;
pub mod store;

pub use error::{Result, StoreError};
pub use stats::ProjectStats;
pub use store::{LoadOutcome, ProjectStore};
