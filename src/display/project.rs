//! Project display formatting
//!
//! Formats configured projects for `ccsync status`.

use std::path::Path;

use crate::config::Project;

/// Per-project facts gathered at status time
#[derive(Debug, Clone)]
pub struct ProjectStatus<'a> {
    pub project: &'a Project,
    /// Files discovery would pick up now, or the reason it could not run
    pub files_found: Result<usize, String>,
}

/// Format one project's status block
pub fn format_project_status(status: &ProjectStatus<'_>, default_root: &Path) -> String {
    let project = status.project;
    let mut output = String::new();

    output.push_str(&format!("Project: {}\n", project.name));
    output.push_str(&format!("  Source:       {}\n", project.source.display()));
    output.push_str(&format!(
        "  Destination:  {}\n",
        project.destination_under(default_root).display()
    ));
    output.push_str(&format!(
        "  Auto-sync:    {}\n",
        if project.auto_sync { "Yes" } else { "No" }
    ));
    output.push_str(&format!(
        "  Git-ignored:  {}\n",
        if project.include_git_ignored {
            "Included"
        } else {
            "Skipped"
        }
    ));

    let labels = project.backup_types.enabled_labels();
    output.push_str(&format!(
        "  Backs up:     {}\n",
        if labels.is_empty() {
            "nothing".to_string()
        } else {
            labels.join(", ")
        }
    ));

    output.push_str(&format!("  Versioning:   {}", project.versioning_strategy));
    if project.versioning_strategy.keeps_history() {
        if project.keep_versions == 0 {
            output.push_str(" (keep all)");
        } else {
            output.push_str(&format!(" (keep {})", project.keep_versions));
        }
    }
    output.push('\n');

    match &status.files_found {
        Ok(count) => output.push_str(&format!("  Files found:  {}\n", count)),
        Err(reason) => output.push_str(&format!("  Files found:  unavailable ({})\n", reason)),
    }

    output
}

/// Format every project, separated by blank lines
pub fn format_project_list(statuses: &[ProjectStatus<'_>], default_root: &Path) -> String {
    if statuses.is_empty() {
        return "No projects configured.\n".to_string();
    }

    statuses
        .iter()
        .map(|s| format_project_status(s, default_root))
        .collect::<Vec<_>>()
        .join("\n")
}
