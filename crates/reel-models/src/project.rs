//! Project types for reel.
//!
//! A project is the aggregate root: it owns its scenes and crew outright and
//! tracks budget against cumulative spend.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::change::FieldChange;
use crate::crew::CrewMember;
use crate::error::{ModelError, Result};
use crate::ids::ProjectId;
use crate::scene::Scene;

/// Production phase of a project.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "snake_case")]
pub enum ProjectState {
    /// Pre-production; every new project starts here.
    #[default]
    Planning,
    /// Principal photography is under way.
    InProduction,
    /// Shooting is done, editing and finishing in progress.
    PostProduction,
    /// Delivered.
    Completed,
}

impl ProjectState {
    /// All recognized states, in lifecycle order.
    pub const ALL: [ProjectState; 4] = [
        ProjectState::Planning,
        ProjectState::InProduction,
        ProjectState::PostProduction,
        ProjectState::Completed,
    ];

    /// Returns the persisted name of the state.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectState::Planning => "planning",
            ProjectState::InProduction => "in_production",
            ProjectState::PostProduction => "post_production",
            ProjectState::Completed => "completed",
        }
    }
}

impl fmt::Display for ProjectState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for ProjectState {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|state| state.as_str() == s)
            .ok_or_else(|| ModelError::InvalidState(s.to_string()))
    }
}

/// Input for creating a new project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewProject {
    pub name: String,
    pub director: String,
    pub budget: f64,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
}

impl NewProject {
    pub fn new(
        name: impl Into<String>,
        director: impl Into<String>,
        budget: f64,
        start_date: NaiveDate,
    ) -> Self {
        Self {
            name: name.into(),
            director: director.into(),
            budget,
            start_date,
            end_date: None,
        }
    }

    pub fn with_end_date(mut self, end_date: NaiveDate) -> Self {
        self.end_date = Some(end_date);
        self
    }
}

/// A film production tracked by reel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    /// Identifier assigned by the store.
    pub id: ProjectId,

    /// Working title of the production.
    pub name: String,

    /// Director of the production.
    pub director: String,

    /// Total approved budget.
    pub budget: f64,

    /// Date the production starts.
    pub start_date: NaiveDate,

    /// Planned or actual wrap date.
    #[serde(default)]
    pub end_date: Option<NaiveDate>,

    /// Current lifecycle state.
    #[serde(default)]
    pub state: ProjectState,

    /// Cumulative registered expenses. Only ever grows.
    #[serde(default)]
    pub spend: f64,

    /// Scenes in insertion order.
    #[serde(default)]
    pub scenes: Vec<Scene>,

    /// Crew in insertion order.
    #[serde(default)]
    pub crew: Vec<CrewMember>,
}

impl Project {
    /// Creates a project in the planning state with nothing spent.
    pub fn new(id: ProjectId, input: NewProject) -> Self {
        Self {
            id,
            name: input.name,
            director: input.director,
            budget: input.budget,
            start_date: input.start_date,
            end_date: input.end_date,
            state: ProjectState::Planning,
            spend: 0.0,
            scenes: Vec::new(),
            crew: Vec::new(),
        }
    }

    /// Appends a scene. Duplicate scene numbers are accepted.
    pub fn add_scene(&mut self, scene: Scene) {
        self.scenes.push(scene);
    }

    /// Removes the first scene with the given number.
    ///
    /// Returns `false` and leaves the scenes untouched when none matches.
    pub fn remove_scene(&mut self, number: u32) -> bool {
        match self.scenes.iter().position(|s| s.number == number) {
            Some(index) => {
                self.scenes.remove(index);
                true
            }
            None => false,
        }
    }

    /// Returns the first scene with the given number.
    pub fn scene(&self, number: u32) -> Option<&Scene> {
        self.scenes.iter().find(|s| s.number == number)
    }

    /// Marks the first scene with the given number as completed.
    pub fn complete_scene(&mut self, number: u32) -> bool {
        match self.scenes.iter_mut().find(|s| s.number == number) {
            Some(scene) => {
                scene.mark_completed();
                true
            }
            None => false,
        }
    }

    /// Appends a crew member.
    pub fn add_crew_member(&mut self, member: CrewMember) {
        self.crew.push(member);
    }

    /// Moves the project to the named lifecycle state.
    ///
    /// # Errors
    /// Returns [`ModelError::InvalidState`] for an unrecognized name; the
    /// current state is left unchanged.
    pub fn change_state(&mut self, new_state: &str) -> Result<()> {
        let state = new_state.parse()?;
        self.set_state(state);
        Ok(())
    }

    /// Sets the lifecycle state.
    pub fn set_state(&mut self, state: ProjectState) {
        self.state = state;
    }

    /// Adds `amount` to the cumulative spend.
    ///
    /// No bounds are checked here; callers reject non-positive amounts.
    pub fn register_expense(&mut self, amount: f64) {
        self.spend += amount;
    }

    /// Budget left after registered expenses. Negative on overrun.
    pub fn remaining_budget(&self) -> f64 {
        self.budget - self.spend
    }

    pub fn is_over_budget(&self) -> bool {
        self.remaining_budget() < 0.0
    }

    /// Applies a single field change.
    pub fn apply(&mut self, change: FieldChange) {
        match change {
            FieldChange::Name(name) => self.name = name,
            FieldChange::Director(director) => self.director = director,
            FieldChange::Budget(budget) => self.budget = budget,
            FieldChange::StartDate(date) => self.start_date = date,
            FieldChange::EndDate(date) => self.end_date = date,
            FieldChange::State(state) => self.set_state(state),
        }
    }
}

impl fmt::Display for Project {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Project: {} - Director: {} - State: {}",
            self.name, self.director, self.state
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn sunset() -> Project {
        Project::new(
            ProjectId::new(1),
            NewProject::new("Sunset", "A. Diaz", 1000.0, date("2024-01-01")),
        )
    }

    #[test]
    fn test_project_state_default() {
        assert_eq!(ProjectState::default(), ProjectState::Planning);
    }

    #[test]
    fn test_project_creation() {
        let project = sunset();

        assert_eq!(project.id, ProjectId::new(1));
        assert_eq!(project.state, ProjectState::Planning);
        assert_eq!(project.spend, 0.0);
        assert!(project.end_date.is_none());
        assert!(project.scenes.is_empty());
        assert!(project.crew.is_empty());
    }

    #[test]
    fn test_register_expense_accumulates() {
        let mut project = sunset();
        for amount in [100.0, 250.5, 49.5] {
            project.register_expense(amount);
        }

        assert_eq!(project.spend, 400.0);
        assert_eq!(project.remaining_budget(), 600.0);
        assert!(!project.is_over_budget());
    }

    #[test]
    fn test_remaining_budget_goes_negative() {
        let mut project = sunset();
        project.register_expense(1200.0);

        assert_eq!(project.remaining_budget(), -200.0);
        assert!(project.is_over_budget());
    }

    #[test]
    fn test_change_state_recognized_and_idempotent() {
        let mut project = sunset();
        for state in ProjectState::ALL {
            project.change_state(state.as_str()).unwrap();
            project.change_state(state.as_str()).unwrap();
            assert_eq!(project.state, state);
        }
    }

    #[test]
    fn test_change_state_rejects_unknown() {
        let mut project = sunset();
        project.change_state("in_production").unwrap();

        let err = project.change_state("wrapped").unwrap_err();

        assert_eq!(err, ModelError::InvalidState("wrapped".to_string()));
        assert_eq!(project.state, ProjectState::InProduction);
    }

    #[test]
    fn test_remove_scene_first_match_only() {
        let mut project = sunset();
        project.add_scene(Scene::new(1, "A", "Beach", 5));
        project.add_scene(Scene::new(2, "B", "Studio", 5));
        project.add_scene(Scene::new(1, "C", "Roof", 5));

        assert!(project.remove_scene(1));
        let names: Vec<_> = project.scenes.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["B", "C"]);

        assert!(!project.remove_scene(9));
        assert_eq!(project.scenes.len(), 2);
    }

    #[test]
    fn test_complete_scene() {
        let mut project = sunset();
        project.add_scene(Scene::new(3, "Night", "Harbor", 20));

        assert!(project.complete_scene(3));
        assert!(project.scene(3).unwrap().completed);
        assert!(!project.complete_scene(4));
    }

    #[test]
    fn test_apply_field_changes() {
        let mut project = sunset();
        project.apply(FieldChange::Name("Sunrise".to_string()));
        project.apply(FieldChange::Budget(2500.0));
        project.apply(FieldChange::EndDate(Some(date("2024-06-30"))));
        project.apply(FieldChange::State(ProjectState::PostProduction));

        assert_eq!(project.name, "Sunrise");
        assert_eq!(project.budget, 2500.0);
        assert_eq!(project.end_date, Some(date("2024-06-30")));
        assert_eq!(project.state, ProjectState::PostProduction);
    }

    #[test]
    fn test_project_state_serialization() {
        let json = serde_json::to_string(&ProjectState::InProduction).unwrap();
        assert_eq!(json, "\"in_production\"");

        let state: ProjectState = serde_json::from_str("\"post_production\"").unwrap();
        assert_eq!(state, ProjectState::PostProduction);
    }

    #[test]
    fn test_project_serialization_roundtrip() {
        let mut project = sunset();
        project.end_date = Some(date("2024-03-15"));
        project.set_state(ProjectState::InProduction);
        project.register_expense(320.75);
        project.add_scene(Scene::new(1, "Opening", "Beach", 12).with_description("Wide shot"));
        project.complete_scene(1);
        project.add_crew_member(CrewMember::new("Luz Marina", "DoP").with_email("luz@example.com"));

        let json = serde_json::to_string_pretty(&project).unwrap();
        let restored: Project = serde_json::from_str(&json).unwrap();

        assert_eq!(project, restored);
    }

    #[test]
    fn test_project_defaults_on_deserialize() {
        let json = r#"{
            "id": 5,
            "name": "Minimal",
            "director": "R. Paz",
            "budget": 10.0,
            "start_date": "2024-02-01"
        }"#;
        let project: Project = serde_json::from_str(json).unwrap();

        assert_eq!(project.id, ProjectId::new(5));
        assert!(project.end_date.is_none());
        assert_eq!(project.state, ProjectState::Planning);
        assert_eq!(project.spend, 0.0);
        assert!(project.scenes.is_empty());
        assert!(project.crew.is_empty());
    }

    #[test]
    fn test_project_json_layout() {
        let value = serde_json::to_value(sunset()).unwrap();

        assert_eq!(value["id"], 1);
        assert_eq!(value["start_date"], "2024-01-01");
        assert!(value["end_date"].is_null());
        assert_eq!(value["state"], "planning");
        assert_eq!(value["spend"], 0.0);
    }
}
