//! Unitrack CLI - multi-project progress and ETC tracking.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use tracing::Level;
use unitrack_core::{Project, ProjectId};
use unitrack_engine::ProgressEngine;
use unitrack_storage::JsonStore;

#[derive(Parser)]
#[command(name = "unitrack")]
#[command(about = "Track progress and estimated completion time across projects", long_about = None)]
struct Cli {
    /// Override the data file location
    #[arg(long, global = true, value_name = "PATH")]
    data_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a new project
    Add {
        /// Project name
        #[arg(long, default_value = "")]
        name: String,
    },
    /// List all projects
    List,
    /// Show one project in detail
    Show {
        /// Project ID (unique prefix accepted)
        id: String,
    },
    /// Delete a project permanently
    Delete {
        /// Project ID (unique prefix accepted)
        id: String,
        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },
    /// Edit a project's fields
    Set {
        /// Project ID (unique prefix accepted)
        id: String,
        /// New name
        #[arg(long)]
        name: Option<String>,
        /// New description
        #[arg(long)]
        description: Option<String>,
        /// Total work units
        #[arg(long)]
        total: Option<f64>,
        /// Completed work units
        #[arg(long)]
        current: Option<f64>,
    },
    /// Zero a project's totals and elapsed time (name kept)
    Reset {
        /// Project ID (unique prefix accepted)
        id: String,
    },
    /// Print the estimated time to completion
    Etc {
        /// Project ID (unique prefix accepted)
        id: String,
    },
    /// Run the activity timer until Ctrl-C, then commit the time
    Track {
        /// Project ID (unique prefix accepted)
        id: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(Level::WARN)
        .init();

    let cli = Cli::parse();

    let mut store = match &cli.data_file {
        Some(path) => JsonStore::new(path),
        None => JsonStore::default_location(),
    };
    let mut engine = ProgressEngine::load(&store)
        .await
        .context("failed to load project data")?;

    match cli.command {
        Commands::Add { name } => {
            let id = engine.add_project();
            if !name.is_empty() {
                engine.rename(id, name)?;
            }
            engine.persist(&mut store).await?;
            println!("Added project {}", id);
        }
        Commands::List => {
            if engine.is_empty() {
                println!("No projects. Add one with `unitrack add --name <name>`.");
            }
            for project in engine.projects() {
                println!(
                    "{}  {:>5.1}%  {:>8}  {}",
                    project.id(),
                    project.progress_ratio() * 100.0,
                    fmt_hms(project.elapsed()),
                    display_name(project),
                );
            }
        }
        Commands::Show { id } => {
            let id = resolve_id(&engine, &id)?;
            let now = Utc::now();
            let project = engine.project(id).context("project vanished mid-command")?;
            println!("Project:     {}", display_name(project));
            println!("Id:          {}", project.id());
            println!("Description: {}", project.description);
            println!(
                "Progress:    {:.1} / {:.1} units ({:.1}%)",
                project.current_units(),
                project.total_units(),
                project.progress_ratio() * 100.0
            );
            println!("Elapsed:     {}", fmt_hms(project.elapsed()));
            println!("ETC:         {}", engine.compute_etc(id, now)?);
            println!("Created:     {}", project.created_at.format("%Y-%m-%d %H:%M"));
        }
        Commands::Delete { id, yes } => {
            let id = resolve_id(&engine, &id)?;
            if !yes {
                bail!("refusing to delete without --yes");
            }
            let removed = engine.delete_project(id)?;
            engine.persist(&mut store).await?;
            println!("Deleted project {}", display_name(&removed));
        }
        Commands::Set { id, name, description, total, current } => {
            let id = resolve_id(&engine, &id)?;
            let now = Utc::now();
            if let Some(name) = name {
                engine.rename(id, name)?;
            }
            if let Some(description) = description {
                engine.set_description(id, description)?;
            }
            if let Some(total) = total {
                engine.update_total_units(id, total, now)?;
            }
            if let Some(current) = current {
                engine.update_current_units(id, current, now)?;
            }
            engine.persist(&mut store).await?;
            let project = engine.project(id).context("project vanished mid-command")?;
            println!(
                "{}: {:.1} / {:.1} units, ETC {}",
                display_name(project),
                project.current_units(),
                project.total_units(),
                engine.compute_etc(id, now)?
            );
        }
        Commands::Reset { id } => {
            let id = resolve_id(&engine, &id)?;
            engine.reset(id)?;
            engine.persist(&mut store).await?;
            println!("Reset project {}", id);
        }
        Commands::Etc { id } => {
            let id = resolve_id(&engine, &id)?;
            println!("{}", engine.compute_etc(id, Utc::now())?);
        }
        Commands::Track { id } => {
            let id = resolve_id(&engine, &id)?;
            track(&mut engine, id).await?;
            engine.persist(&mut store).await?;
        }
    }

    Ok(())
}

/// Run the timer for one project until Ctrl-C, redrawing elapsed time
/// and ETC once per second.
async fn track(engine: &mut ProgressEngine, id: ProjectId) -> Result<()> {
    engine.start_timer(id, Utc::now())?;
    println!("Tracking {} - Ctrl-C to stop", id);

    let mut interval = tokio::time::interval(std::time::Duration::from_secs(1));
    loop {
        tokio::select! {
            _ = interval.tick() => {
                let now = Utc::now();
                let elapsed = engine.tick(id, now)?;
                let etc = engine.compute_etc(id, now)?;
                print!("\relapsed {}  ETC {}   ", fmt_hms(elapsed), etc);
                std::io::stdout().flush().ok();
            }
            _ = tokio::signal::ctrl_c() => {
                break;
            }
        }
    }

    engine.stop_timer(id, Utc::now())?;
    let project = engine.project(id).context("project vanished mid-command")?;
    println!("\nStopped. Committed elapsed time: {}", fmt_hms(project.elapsed()));
    Ok(())
}

/// Resolve a full id or unique id prefix against the collection.
fn resolve_id(engine: &ProgressEngine, input: &str) -> Result<ProjectId> {
    if let Ok(id) = input.parse::<ProjectId>() {
        if engine.project(id).is_some() {
            return Ok(id);
        }
    }

    let needle = input.to_uppercase();
    let matches: Vec<ProjectId> = engine
        .projects()
        .iter()
        .map(|p| p.id())
        .filter(|id| id.to_string().starts_with(&needle))
        .collect();

    match matches.as_slice() {
        [id] => Ok(*id),
        [] => bail!("no project matches '{input}'"),
        _ => bail!("'{input}' is ambiguous ({} matches)", matches.len()),
    }
}

fn display_name(project: &Project) -> &str {
    if project.name.is_empty() {
        "(unnamed)"
    } else {
        &project.name
    }
}

/// Format seconds as HH:MM:SS.
fn fmt_hms(seconds: f64) -> String {
    let whole = seconds.max(0.0) as u64;
    format!("{:02}:{:02}:{:02}", whole / 3600, (whole % 3600) / 60, whole % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fmt_hms_rolls_over_units() {
        assert_eq!(fmt_hms(0.0), "00:00:00");
        assert_eq!(fmt_hms(59.9), "00:00:59");
        assert_eq!(fmt_hms(3725.0), "01:02:05");
        assert_eq!(fmt_hms(-5.0), "00:00:00");
    }

    #[test]
    fn resolve_id_accepts_unique_prefix() {
        let mut engine = ProgressEngine::new();
        let id = engine.add_project();
        let prefix: String = id.to_string().chars().take(8).collect();

        assert_eq!(resolve_id(&engine, &id.to_string()).unwrap(), id);
        assert_eq!(resolve_id(&engine, &prefix).unwrap(), id);
        assert_eq!(resolve_id(&engine, &prefix.to_lowercase()).unwrap(), id);
        assert!(resolve_id(&engine, "NOPE~").is_err());
    }
}
