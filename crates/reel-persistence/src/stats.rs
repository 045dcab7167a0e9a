//! Aggregate figures across every project in the store.

use std::collections::BTreeMap;

use reel_models::{Project, ProjectState};
use serde::Serialize;

/// Portfolio-wide totals.
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct ProjectStats {
    pub total_projects: usize,
    /// Project count per state. Only states that occur are present.
    pub by_state: BTreeMap<ProjectState, usize>,
    pub budget_total: f64,
    pub spend_total: f64,
    /// `budget_total - spend_total`, negative when the portfolio overran.
    pub remaining: f64,
}

impl ProjectStats {
    /// Folds the given projects into totals.
    pub fn collect<'a>(projects: impl IntoIterator<Item = &'a Project>) -> Self {
        let mut stats = Self::default();
        for project in projects {
            stats.total_projects += 1;
            *stats.by_state.entry(project.state).or_insert(0) += 1;
            stats.budget_total += project.budget;
            stats.spend_total += project.spend;
        }
        stats.remaining = stats.budget_total - stats.spend_total;
        stats
    }

    /// Share of the total budget already spent, as a percentage.
    ///
    /// `None` when the total budget is zero or negative.
    pub fn percent_spent(&self) -> Option<f64> {
        (self.budget_total > 0.0).then(|| self.spend_total / self.budget_total * 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use reel_models::{NewProject, ProjectId};

    fn project(id: u64, budget: f64, spend: f64, state: ProjectState) -> Project {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let mut p = Project::new(ProjectId::new(id), NewProject::new("P", "D", budget, start));
        p.register_expense(spend);
        p.set_state(state);
        p
    }

    #[test]
    fn test_empty_stats() {
        let stats = ProjectStats::collect(std::iter::empty());

        assert_eq!(stats.total_projects, 0);
        assert!(stats.by_state.is_empty());
        assert_eq!(stats.remaining, 0.0);
        assert_eq!(stats.percent_spent(), None);
    }

    #[test]
    fn test_stats_by_state_only_present_states() {
        let projects = vec![
            project(1, 100.0, 10.0, ProjectState::Planning),
            project(2, 200.0, 50.0, ProjectState::Completed),
            project(3, 300.0, 40.0, ProjectState::Planning),
        ];

        let stats = ProjectStats::collect(&projects);

        assert_eq!(stats.total_projects, 3);
        assert_eq!(stats.by_state.len(), 2);
        assert_eq!(stats.by_state[&ProjectState::Planning], 2);
        assert_eq!(stats.by_state[&ProjectState::Completed], 1);
        assert_eq!(stats.budget_total, 600.0);
        assert_eq!(stats.spend_total, 100.0);
        assert_eq!(stats.remaining, 500.0);
    }

    #[test]
    fn test_percent_spent() {
        let projects = vec![project(1, 400.0, 100.0, ProjectState::Planning)];
        assert_eq!(ProjectStats::collect(&projects).percent_spent(), Some(25.0));
    }

    #[test]
    fn test_stats_serialize_state_keys() {
        let projects = vec![project(1, 1.0, 0.0, ProjectState::InProduction)];
        let value = serde_json::to_value(ProjectStats::collect(&projects)).unwrap();

        assert_eq!(value["by_state"]["in_production"], 1);
    }
}
