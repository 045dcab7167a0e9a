//! Core data models for reel.
//!
//! This crate provides the project aggregate: a film production project
//! together with its scenes and crew, plus the lifecycle states and the
//! enumerated field changes the store applies on update.

pub mod change;
pub mod crew;
pub mod error;
pub mod ids;
pub mod project;
pub mod scene;

// Re-export main types
pub use change::FieldChange;
pub use crew::CrewMember;
pub use error::{ModelError, Result};
pub use ids::ProjectId;
pub use project::{NewProject, Project, ProjectState};
pub use scene::Scene;
