use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use ccsync::cli::{
    handle_add_project, handle_backup_global, handle_history, handle_init, handle_remove_project,
    handle_status, handle_sync, AddProjectArgs, BackupGlobalArgs,
};
use ccsync::config::CcsyncPaths;

#[derive(Parser)]
#[command(
    name = "ccsync",
    version,
    about = "Back up Claude configuration files with versioning",
    long_about = "ccsync collects claude.md files and Claude settings from your projects \
                  into one destination tree, keeping prior versions of changed files \
                  according to each project's versioning policy."
)]
struct Cli {
    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize configuration
    Init {
        /// Sync destination directory
        #[arg(short, long)]
        destination: Option<PathBuf>,
    },

    /// Add a project to sync
    AddProject(AddProjectArgs),

    /// Remove a project (its backups are kept)
    RemoveProject {
        /// Project name
        name: String,
    },

    /// Sync one project, or all projects when no name is given
    Sync {
        /// Project name
        project: Option<String>,
    },

    /// Sync all projects
    SyncAll,

    /// Back up ~/.claude/projects
    BackupGlobal(BackupGlobalArgs),

    /// Show configuration and project status
    Status,

    /// Show sync history
    History {
        /// Only show entries for this project
        project: Option<String>,
        /// Maximum number of entries
        #[arg(short, long, default_value_t = 10)]
        limit: usize,
    },
}

impl Commands {
    fn name(&self) -> &'static str {
        match self {
            Commands::Init { .. } => "init",
            Commands::AddProject(_) => "add-project",
            Commands::RemoveProject { .. } => "remove-project",
            Commands::Sync { .. } => "sync",
            Commands::SyncAll => "sync-all",
            Commands::BackupGlobal(_) => "backup-global",
            Commands::Status => "status",
            Commands::History { .. } => "history",
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    ccsync::logging::init(cli.verbose)
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    let paths = CcsyncPaths::new()?;
    let command_name = cli.command.name();

    let result = match cli.command {
        Commands::Init { destination } => handle_init(&paths, destination),
        Commands::AddProject(args) => handle_add_project(&paths, args),
        Commands::RemoveProject { name } => handle_remove_project(&paths, &name),
        Commands::Sync { project } => handle_sync(&paths, project.as_deref()),
        Commands::SyncAll => handle_sync(&paths, None),
        Commands::BackupGlobal(args) => handle_backup_global(&paths, args),
        Commands::Status => handle_status(&paths),
        Commands::History { project, limit } => handle_history(&paths, project.as_deref(), limit),
    };

    result.with_context(|| format!("Failed to execute {}", command_name))
}
