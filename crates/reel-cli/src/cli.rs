//! Command-line interface definition using clap.

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use reel_models::{FieldChange, ProjectId, ProjectState};
use std::path::PathBuf;

/// reel - film production project tracker
#[derive(Parser, Debug)]
#[command(name = "reel")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to the project data file
    #[arg(short = 'f', long, env = "REEL_DATA_FILE", global = true)]
    pub data_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a new project
    Create {
        /// Project name
        name: String,

        /// Director
        director: String,

        /// Approved budget
        #[arg(short, long)]
        budget: f64,

        /// Start date (YYYY-MM-DD)
        #[arg(short, long)]
        start: NaiveDate,

        /// End date (YYYY-MM-DD)
        #[arg(short, long)]
        end: Option<NaiveDate>,
    },

    /// List projects
    List {
        /// Only projects in this state
        #[arg(short, long)]
        state: Option<ProjectState>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Show a project with its scenes and crew
    Show {
        id: ProjectId,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Update project fields (name, director, budget, start_date, end_date, state)
    Update {
        id: ProjectId,

        /// Field change as field=value, repeatable
        #[arg(long = "set", value_parser = parse_field_change, required = true)]
        changes: Vec<FieldChange>,
    },

    /// Delete a project
    Delete {
        id: ProjectId,

        /// Confirm the deletion
        #[arg(short, long)]
        yes: bool,
    },

    /// Search projects by name or director
    Search {
        term: String,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Show totals across all projects
    Stats {
        #[command(flatten)]
        output: OutputArgs,
    },

    /// Change a project's lifecycle state
    State {
        id: ProjectId,

        /// planning, in_production, post_production or completed
        state: String,
    },

    /// Register an expense against a project's budget
    Expense { id: ProjectId, amount: f64 },

    /// Manage scenes
    Scene {
        #[command(subcommand)]
        action: SceneCommand,
    },

    /// Manage crew
    Crew {
        #[command(subcommand)]
        action: CrewCommand,
    },
}

#[derive(Subcommand, Debug)]
pub enum SceneCommand {
    /// Add a scene to a project
    Add {
        id: ProjectId,
        number: u32,
        name: String,
        location: String,

        /// Estimated duration in minutes
        #[arg(short, long)]
        minutes: u32,

        #[arg(short, long, default_value = "")]
        description: String,
    },

    /// List a project's scenes
    List { id: ProjectId },

    /// Mark a scene as completed
    Complete { id: ProjectId, number: u32 },

    /// Remove a scene
    Remove { id: ProjectId, number: u32 },
}

#[derive(Subcommand, Debug)]
pub enum CrewCommand {
    /// Add a crew member to a project
    Add {
        id: ProjectId,
        name: String,
        role: String,

        #[arg(long)]
        email: Option<String>,

        #[arg(long)]
        phone: Option<String>,
    },

    /// List a project's crew
    List { id: ProjectId },
}

#[derive(Args, Debug, Clone, Copy)]
pub struct OutputArgs {
    /// Output format (table, json, brief)
    #[arg(long, default_value = "table")]
    pub format: OutputFormat,
}

/// Output format for listing commands
#[derive(Debug, Clone, Copy, Default, PartialEq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Brief,
}

fn parse_field_change(s: &str) -> Result<FieldChange, String> {
    let (field, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected field=value, got '{}'", s))?;
    FieldChange::parse(field, value).map_err(|e| e.to_string())
}

impl Cli {
    /// Returns the data file path, using the default if not specified.
    pub fn data_file(&self) -> PathBuf {
        self.data_file.clone().unwrap_or_else(|| {
            dirs::home_dir()
                .map(|h| h.join(".reel").join("projects.json"))
                .unwrap_or_else(|| PathBuf::from("projects.json"))
        })
    }

    /// Returns the log level based on verbosity.
    pub fn log_level(&self) -> tracing::Level {
        match self.verbose {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        }
    }
}
