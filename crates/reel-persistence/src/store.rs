//! Project store: the in-memory collection and its backing file.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use reel_models::{CrewMember, FieldChange, NewProject, Project, ProjectId, ProjectState, Scene};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::atomic::{read_json_if_exists, write_json_atomic};
use crate::error::{Result, StoreError};
use crate::stats::ProjectStats;

/// First identifier handed out by an empty store.
const FIRST_ID: u64 = 1;

fn first_id() -> u64 {
    FIRST_ID
}

/// On-disk layout of the backing file.
#[derive(Debug, Deserialize)]
struct StoreFile {
    #[serde(default = "first_id")]
    next_id: u64,
    #[serde(default)]
    projects: Vec<Project>,
}

/// Borrowed view of the collection for serialization.
#[derive(Serialize)]
struct StoreFileRef<'a> {
    next_id: u64,
    projects: &'a [Project],
}

/// What [`ProjectStore::load`] found on disk.
#[derive(Debug)]
pub enum LoadOutcome {
    /// No backing file yet; the store starts empty.
    Missing,
    /// The file was read successfully.
    Loaded { projects: usize },
    /// The file could not be used. The store was reset to empty and the
    /// cause is carried here for the caller to report.
    Recovered(StoreError),
}

impl LoadOutcome {
    /// Returns the recovery error, if any.
    pub fn error(&self) -> Option<&StoreError> {
        match self {
            LoadOutcome::Recovered(err) => Some(err),
            _ => None,
        }
    }
}

/// Owns every project and keeps the backing file in sync.
///
/// Each mutating operation rewrites the whole file before returning. Between
/// [`begin_batch`](Self::begin_batch) and [`end_batch`](Self::end_batch) the
/// writes are deferred and collapsed into one.
///
/// The file holds a single JSON document:
/// ```text
/// { "next_id": 3, "projects": [ { "id": 1, ... }, { "id": 2, ... } ] }
/// ```
#[derive(Debug)]
pub struct ProjectStore {
    path: PathBuf,
    projects: Vec<Project>,
    next_id: u64,
    batching: bool,
    dirty: bool,
}

impl ProjectStore {
    /// Creates an empty store backed by `path` without reading it.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            projects: Vec::new(),
            next_id: FIRST_ID,
            batching: false,
            dirty: false,
        }
    }

    /// Creates a store backed by `path` and loads whatever is there.
    pub fn open(path: impl Into<PathBuf>) -> (Self, LoadOutcome) {
        let mut store = Self::new(path);
        let outcome = store.load();
        (store, outcome)
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Identifier the next created project will receive.
    pub fn next_id(&self) -> ProjectId {
        ProjectId::new(self.next_id)
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    /// Replaces the in-memory collection with the content of the backing file.
    ///
    /// Never fails: a missing file yields an empty store, and an unreadable
    /// or malformed one resets the store to empty and reports the cause via
    /// [`LoadOutcome::Recovered`].
    pub fn load(&mut self) -> LoadOutcome {
        self.projects.clear();
        self.next_id = FIRST_ID;
        self.dirty = false;

        let file = match read_json_if_exists::<StoreFile>(&self.path) {
            Ok(Some(file)) => file,
            Ok(None) => {
                debug!(path = %self.path.display(), "No existing project file");
                return LoadOutcome::Missing;
            }
            Err(e) => return self.recover(e.to_string()),
        };

        let mut seen = HashSet::new();
        if let Some(dup) = file.projects.iter().find(|p| !seen.insert(p.id)) {
            return self.recover(format!("duplicate project id {}", dup.id));
        }

        self.projects = file.projects;
        self.next_id = file.next_id;

        let max_id = self.projects.iter().map(|p| p.id.get()).max().unwrap_or(0);
        if self.next_id <= max_id {
            let Some(repaired) = max_id.checked_add(1) else {
                return self.recover("identifier space exhausted".to_string());
            };
            warn!(
                stored = self.next_id,
                repaired,
                "Stored next_id would reuse an identifier, raising it"
            );
            self.next_id = repaired;
        }

        debug!(
            path = %self.path.display(),
            count = self.projects.len(),
            next_id = self.next_id,
            "Loaded projects"
        );
        LoadOutcome::Loaded {
            projects: self.projects.len(),
        }
    }

    fn recover(&mut self, reason: String) -> LoadOutcome {
        warn!(
            path = %self.path.display(),
            error = %reason,
            "Project file is malformed, starting with an empty store"
        );
        self.projects.clear();
        self.next_id = FIRST_ID;
        LoadOutcome::Recovered(StoreError::MalformedStorage {
            path: self.path.clone(),
            reason,
        })
    }

    /// Writes the full collection to the backing file, replacing it.
    pub fn save(&self) -> Result<()> {
        let file = StoreFileRef {
            next_id: self.next_id,
            projects: &self.projects,
        };
        write_json_atomic(&self.path, &file)?;
        debug!(
            path = %self.path.display(),
            count = self.projects.len(),
            "Saved projects"
        );
        Ok(())
    }

    /// Saves now, or marks the store dirty while batching.
    fn persist(&mut self) -> Result<()> {
        if self.batching {
            self.dirty = true;
            return Ok(());
        }
        self.save()
    }

    /// Defers saves until [`end_batch`](Self::end_batch).
    pub fn begin_batch(&mut self) {
        self.batching = true;
    }

    /// Leaves batch mode, writing once if anything changed meanwhile.
    pub fn end_batch(&mut self) -> Result<()> {
        self.batching = false;
        if self.dirty {
            self.save()?;
            self.dirty = false;
        }
        Ok(())
    }

    pub fn is_batching(&self) -> bool {
        self.batching
    }

    /// Creates a project in the planning state and assigns it the next id.
    pub fn create_project(&mut self, input: NewProject) -> Result<&Project> {
        let id = ProjectId::new(self.next_id);
        self.next_id = self
            .next_id
            .checked_add(1)
            .ok_or(StoreError::IdsExhausted)?;

        let project = Project::new(id, input);
        info!(project_id = %id, name = %project.name, "Created project");
        self.projects.push(project);
        self.persist()?;

        self.projects.last().ok_or_else(|| not_found(id))
    }

    /// Looks up a project by id.
    pub fn get_project(&self, id: ProjectId) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    /// Lists projects in stored order, optionally only those in `state`.
    pub fn list_projects(&self, state: Option<ProjectState>) -> Vec<&Project> {
        self.projects
            .iter()
            .filter(|p| state.map_or(true, |s| p.state == s))
            .collect()
    }

    /// Applies `changes` to the project with the given id, in order.
    ///
    /// Returns `false` without writing when no project has that id.
    pub fn update_project(
        &mut self,
        id: ProjectId,
        changes: impl IntoIterator<Item = FieldChange>,
    ) -> Result<bool> {
        let Some(project) = self.projects.iter_mut().find(|p| p.id == id) else {
            return Ok(false);
        };
        for change in changes {
            debug!(project_id = %id, field = change.field(), "Updating field");
            project.apply(change);
        }
        self.persist()?;
        Ok(true)
    }

    /// Removes the project with the given id.
    ///
    /// Returns `false` and leaves the collection untouched when absent. The
    /// id is not handed out again.
    pub fn delete_project(&mut self, id: ProjectId) -> Result<bool> {
        let Some(index) = self.projects.iter().position(|p| p.id == id) else {
            return Ok(false);
        };
        let removed = self.projects.remove(index);
        info!(project_id = %id, name = %removed.name, "Deleted project");
        self.persist()?;
        Ok(true)
    }

    /// Case-insensitive substring search over name and director.
    pub fn search_projects(&self, term: &str) -> Vec<&Project> {
        let term = term.to_lowercase();
        self.projects
            .iter()
            .filter(|p| {
                p.name.to_lowercase().contains(&term) || p.director.to_lowercase().contains(&term)
            })
            .collect()
    }

    pub fn compute_statistics(&self) -> ProjectStats {
        ProjectStats::collect(&self.projects)
    }

    /// Moves a project to the named lifecycle state.
    pub fn change_state(&mut self, id: ProjectId, state: &str) -> Result<()> {
        self.modify(id, |p| Ok(p.change_state(state)?))
    }

    pub fn add_scene(&mut self, id: ProjectId, scene: Scene) -> Result<()> {
        self.modify(id, |p| {
            p.add_scene(scene);
            Ok(())
        })
    }

    /// Removes the first scene with `number`; `Ok(false)` if none matched.
    pub fn remove_scene(&mut self, id: ProjectId, number: u32) -> Result<bool> {
        self.modify_if(id, |p| p.remove_scene(number))
    }

    /// Marks the first scene with `number` as completed.
    pub fn complete_scene(&mut self, id: ProjectId, number: u32) -> Result<bool> {
        self.modify_if(id, |p| p.complete_scene(number))
    }

    pub fn add_crew_member(&mut self, id: ProjectId, member: CrewMember) -> Result<()> {
        self.modify(id, |p| {
            p.add_crew_member(member);
            Ok(())
        })
    }

    /// Registers an expense and returns the remaining budget.
    ///
    /// # Errors
    /// [`StoreError::InvalidAmount`] unless `amount` is positive and finite,
    /// [`StoreError::NotFound`] for an unknown project.
    pub fn register_expense(&mut self, id: ProjectId, amount: f64) -> Result<f64> {
        if !(amount.is_finite() && amount > 0.0) {
            return Err(StoreError::InvalidAmount(amount));
        }
        self.modify(id, |p| {
            p.register_expense(amount);
            let remaining = p.remaining_budget();
            info!(project_id = %id, amount, remaining, "Registered expense");
            if remaining < 0.0 {
                warn!(project_id = %id, overrun = -remaining, "Project is over budget");
            }
            Ok(remaining)
        })
    }

    /// Runs `f` on the project with the given id and persists on success.
    fn modify<R>(
        &mut self,
        id: ProjectId,
        f: impl FnOnce(&mut Project) -> Result<R>,
    ) -> Result<R> {
        let out = f(self.project_mut(id)?)?;
        self.persist()?;
        Ok(out)
    }

    /// Runs `f` on the project with the given id and persists only if it
    /// reports a change.
    fn modify_if(&mut self, id: ProjectId, f: impl FnOnce(&mut Project) -> bool) -> Result<bool> {
        let changed = f(self.project_mut(id)?);
        if changed {
            self.persist()?;
        }
        Ok(changed)
    }

    fn project_mut(&mut self, id: ProjectId) -> Result<&mut Project> {
        self.projects
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| not_found(id))
    }
}

fn not_found(id: ProjectId) -> StoreError {
    StoreError::NotFound {
        kind: "project".to_string(),
        id: id.to_string(),
    }
}
