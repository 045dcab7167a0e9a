//! Scenes within a production.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A discrete filmed unit within a project.
///
/// Scene numbers are supplied by the caller and are not required to be
/// unique within a project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    /// Caller-assigned scene number.
    pub number: u32,

    /// Short name of the scene.
    pub name: String,

    /// Where the scene is shot.
    pub location: String,

    /// Estimated shooting time in minutes.
    pub estimated_minutes: u32,

    /// Free-text description, empty when not given.
    #[serde(default)]
    pub description: String,

    /// Whether the scene has been shot.
    #[serde(default)]
    pub completed: bool,
}

impl Scene {
    /// Creates a new, not yet completed scene.
    pub fn new(
        number: u32,
        name: impl Into<String>,
        location: impl Into<String>,
        estimated_minutes: u32,
    ) -> Self {
        Self {
            number,
            name: name.into(),
            location: location.into(),
            estimated_minutes,
            description: String::new(),
            completed: false,
        }
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Marks the scene as shot. There is no way back to pending.
    pub fn mark_completed(&mut self) {
        self.completed = true;
    }
}

impl fmt::Display for Scene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let marker = if self.completed { "x" } else { " " };
        write!(
            f,
            "[{}] Scene {}: {} - {}",
            marker, self.number, self.name, self.location
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scene_creation() {
        let scene = Scene::new(1, "Opening", "Beach", 12);

        assert_eq!(scene.number, 1);
        assert_eq!(scene.estimated_minutes, 12);
        assert!(scene.description.is_empty());
        assert!(!scene.completed);
    }

    #[test]
    fn test_mark_completed_is_sticky() {
        let mut scene = Scene::new(1, "Opening", "Beach", 12);
        scene.mark_completed();
        scene.mark_completed();
        assert!(scene.completed);
    }

    #[test]
    fn test_scene_display() {
        let mut scene = Scene::new(4, "Chase", "Downtown", 8);
        assert_eq!(scene.to_string(), "[ ] Scene 4: Chase - Downtown");

        scene.mark_completed();
        assert_eq!(scene.to_string(), "[x] Scene 4: Chase - Downtown");
    }

    #[test]
    fn test_scene_defaults_on_deserialize() {
        let json = r#"{"number":2,"name":"Dinner","location":"Studio B","estimated_minutes":5}"#;
        let scene: Scene = serde_json::from_str(json).unwrap();

        assert_eq!(scene.description, "");
        assert!(!scene.completed);
    }
}
