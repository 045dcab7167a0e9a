//! Command handlers for CLI subcommands.

use std::path::Path;

use reel_models::{CrewMember, NewProject, Project, ProjectId, Scene};
use reel_persistence::{LoadOutcome, ProjectStats, ProjectStore};
use tracing::{debug, warn};

use crate::cli::{Commands, CrewCommand, OutputFormat, SceneCommand};

/// Result type for command operations.
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

/// Execute a CLI command against the store at `data_file`.
pub fn execute(command: Commands, data_file: &Path) -> Result<()> {
    let (mut store, outcome) = ProjectStore::open(data_file);
    match &outcome {
        LoadOutcome::Recovered(err) => {
            eprintln!("Warning: {}", err);
            eprintln!("  Starting with an empty project list.");
        }
        other => debug!(?other, "Opened project store"),
    }

    match command {
        Commands::Create {
            name,
            director,
            budget,
            start,
            end,
        } => {
            require_non_empty("name", &name)?;
            require_non_empty("director", &director)?;
            if budget < 0.0 {
                return Err("budget cannot be negative".into());
            }
            let mut input = NewProject::new(name.trim(), director.trim(), budget, start);
            if let Some(end) = end {
                input = input.with_end_date(end);
            }
            let project = store.create_project(input)?;
            println!("Created project '{}' (id {})", project.name, project.id);
            Ok(())
        }
        Commands::List { state, output } => {
            print_projects(&store.list_projects(state), output.format)
        }
        Commands::Show { id, output } => {
            let project = find(&store, id)?;
            match output.format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(project)?),
                OutputFormat::Brief => println!("{}\t{}\t{}", project.id, project.name, project.state),
                OutputFormat::Table => print_project_detail(project),
            }
            Ok(())
        }
        Commands::Update { id, changes } => {
            if store.update_project(id, changes)? {
                println!("Updated project {}", id);
                Ok(())
            } else {
                Err(not_found(id))
            }
        }
        Commands::Delete { id, yes } => {
            let name = find(&store, id)?.name.clone();
            if !yes {
                println!("Refusing to delete '{}' ({}) without --yes", name, id);
                return Ok(());
            }
            store.delete_project(id)?;
            println!("Deleted project '{}' ({})", name, id);
            Ok(())
        }
        Commands::Search { term, output } => {
            print_projects(&store.search_projects(&term), output.format)
        }
        Commands::Stats { output } => {
            let stats = store.compute_statistics();
            match output.format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&stats)?),
                _ => print_stats(&stats),
            }
            Ok(())
        }
        Commands::State { id, state } => {
            store.change_state(id, state.trim())?;
            println!("Project {} is now {}", id, state.trim());
            Ok(())
        }
        Commands::Expense { id, amount } => {
            let remaining = store.register_expense(id, amount)?;
            println!("Registered {:.2} against project {}", amount, id);
            println!("  Remaining budget: {:.2}", remaining);
            if remaining < 0.0 {
                warn!(project_id = %id, "Budget exceeded");
                println!("  Warning: budget exceeded by {:.2}", -remaining);
            }
            Ok(())
        }
        Commands::Scene { action } => run_scene(&mut store, action),
        Commands::Crew { action } => run_crew(&mut store, action),
    }
}

fn run_scene(store: &mut ProjectStore, action: SceneCommand) -> Result<()> {
    match action {
        SceneCommand::Add {
            id,
            number,
            name,
            location,
            minutes,
            description,
        } => {
            require_non_empty("name", &name)?;
            require_non_empty("location", &location)?;
            let scene = Scene::new(number, name.trim(), location.trim(), minutes)
                .with_description(description.trim());
            store.add_scene(id, scene)?;
            println!("Added scene {} to project {}", number, id);
        }
        SceneCommand::List { id } => {
            let project = find(store, id)?;
            if project.scenes.is_empty() {
                println!("No scenes.");
            }
            for scene in &project.scenes {
                println!("{}", scene);
            }
        }
        SceneCommand::Complete { id, number } => {
            if !store.complete_scene(id, number)? {
                return Err(format!("scene {} not found in project {}", number, id).into());
            }
            println!("Scene {} marked as completed", number);
        }
        SceneCommand::Remove { id, number } => {
            if !store.remove_scene(id, number)? {
                return Err(format!("scene {} not found in project {}", number, id).into());
            }
            println!("Removed scene {} from project {}", number, id);
        }
    }
    Ok(())
}

fn run_crew(store: &mut ProjectStore, action: CrewCommand) -> Result<()> {
    match action {
        CrewCommand::Add {
            id,
            name,
            role,
            email,
            phone,
        } => {
            require_non_empty("name", &name)?;
            require_non_empty("role", &role)?;
            let mut member = CrewMember::new(name.trim(), role.trim());
            if let Some(email) = email {
                member = member.with_email(email.trim());
            }
            if let Some(phone) = phone {
                member = member.with_phone(phone.trim());
            }
            store.add_crew_member(id, member)?;
            println!("Added {} to project {}", name.trim(), id);
        }
        CrewCommand::List { id } => {
            let project = find(store, id)?;
            if project.crew.is_empty() {
                println!("No crew members.");
            }
            for member in &project.crew {
                println!("{}", member);
            }
        }
    }
    Ok(())
}

fn find(store: &ProjectStore, id: ProjectId) -> Result<&Project> {
    store.get_project(id).ok_or_else(|| not_found(id))
}

fn not_found(id: ProjectId) -> Box<dyn std::error::Error> {
    format!("Project not found: {}", id).into()
}

fn require_non_empty(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(format!("{} cannot be empty", field).into());
    }
    Ok(())
}

fn print_projects(projects: &[&Project], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => {
            if projects.is_empty() {
                println!("No projects found.");
                return Ok(());
            }

            println!(
                "{:<5}  {:<24}  {:<20}  {:<16}  {:>12}",
                "ID", "NAME", "DIRECTOR", "STATE", "REMAINING"
            );
            println!("{}", "-".repeat(85));
            for project in projects {
                println!(
                    "{:<5}  {:<24}  {:<20}  {:<16}  {:>12.2}",
                    project.id,
                    truncate(&project.name, 24),
                    truncate(&project.director, 20),
                    project.state,
                    project.remaining_budget()
                );
            }
            println!("\n{} project(s)", projects.len());
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(projects)?);
        }
        OutputFormat::Brief => {
            for project in projects {
                println!("{}\t{}", project.id, project.name);
            }
        }
    }
    Ok(())
}

fn print_project_detail(project: &Project) {
    println!("{} (id {})", project, project.id);
    println!("  Start: {}", project.start_date);
    if let Some(end) = project.end_date {
        println!("  End: {}", end);
    }
    println!("  Budget: {:.2}", project.budget);
    println!("  Spent: {:.2}", project.spend);
    println!("  Remaining: {:.2}", project.remaining_budget());
    if project.is_over_budget() {
        println!("  Warning: budget exceeded");
    }

    println!("  Scenes ({}):", project.scenes.len());
    for scene in &project.scenes {
        println!("    {}", scene);
    }
    println!("  Crew ({}):", project.crew.len());
    for member in &project.crew {
        println!("    {}", member);
    }
}

fn print_stats(stats: &ProjectStats) {
    println!("Projects: {}", stats.total_projects);
    for (state, count) in &stats.by_state {
        println!("  {:<16} {}", state, count);
    }
    println!("Total budget:    {:.2}", stats.budget_total);
    println!("Total spent:     {:.2}", stats.spend_total);
    println!("Total remaining: {:.2}", stats.remaining);
    if let Some(percent) = stats.percent_spent() {
        println!("Spent:           {:.1}%", percent);
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}
