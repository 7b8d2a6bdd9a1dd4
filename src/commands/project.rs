use std::fs;
use std::path::Path;

use colored::Colorize;
use serde_json::json;

use crate::api::{NewProject, Project, ProjectPatch, Subtask, Task};
use crate::cli::ProjectCommand;
use crate::commands::Context;
use crate::error::{ServiceError, ServiceResult};

pub async fn run(ctx: &Context, command: ProjectCommand) -> ServiceResult<()> {
    match command {
        ProjectCommand::List => {
            let projects = ctx.projects.get_all_projects().await?;
            ctx.emit(&projects, |p| render_project_list(p))
        }
        ProjectCommand::Show { id } => {
            let project = ctx.projects.get_project_by_id(&id).await?;
            ctx.emit(&project, render_project)
        }
        ProjectCommand::Create { name, description } => {
            let new_project = NewProject {
                project_name: name,
                project_description: description,
            };
            let project = ctx.projects.create_project(&new_project).await?;
            ctx.emit(&project, |p| {
                format!("{} {}", "Created".green().bold(), render_summary(p))
            })
        }
        ProjectCommand::Update {
            id,
            name,
            description,
            tasks_file,
        } => {
            if name.is_none() && description.is_none() && tasks_file.is_none() {
                return Err(ServiceError::InvalidInput(
                    "nothing to update; pass --name, --description or --tasks-file".to_string(),
                ));
            }
            let project_tasks = tasks_file.as_deref().map(read_tasks_file).transpose()?;

            // The backend replaces every field, so the untouched ones are sent as stored.
            let mut project = ctx.projects.get_project_by_id(&id).await?;
            if let Some(name) = name {
                project.project_name = name;
            }
            if let Some(description) = description {
                project.project_description = description;
            }
            if let Some(tasks) = project_tasks {
                project.project_tasks = tasks;
            }

            let project = save_project(ctx, project).await?;
            ctx.emit(&project, |p| {
                format!("{} {}", "Updated".green().bold(), render_summary(p))
            })
        }
        ProjectCommand::Delete { id } => {
            ctx.projects.delete_project(&id).await?;
            ctx.emit(&deletion_report(&id), |_| {
                format!("{} project {}", "Deleted".red().bold(), id)
            })
        }
    }
}

/// PUT the full project back under its own id.
pub async fn save_project(ctx: &Context, project: Project) -> ServiceResult<Project> {
    let id = project.project_id.clone();
    ctx.projects
        .update_project(&id, &ProjectPatch::from(project))
        .await
}

/// `--json` output of `project delete`; the backend answers 204 with no body.
pub fn deletion_report(id: &str) -> serde_json::Value {
    json!({ "deleted": id })
}

/// Read a JSON array of tasks, e.g. the `project_tasks` of `project show --json`.
pub fn read_tasks_file(path: &Path) -> ServiceResult<Vec<Task>> {
    let contents = fs::read_to_string(path)?;
    serde_json::from_str(&contents).map_err(|e| {
        ServiceError::InvalidInput(format!("{} is not a task list: {}", path.display(), e))
    })
}

pub fn render_summary(project: &Project) -> String {
    format!(
        "{} {}",
        project.project_name.bold(),
        format!("({})", project.project_id).dimmed()
    )
}

pub fn render_project_list(projects: &[Project]) -> String {
    if projects.is_empty() {
        return "No projects yet.".dimmed().to_string();
    }
    projects
        .iter()
        .map(|project| {
            format!(
                "{}  {} task(s)\n    {}",
                render_summary(project),
                project.project_tasks.len(),
                project.project_description
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_project(project: &Project) -> String {
    let mut out = vec![render_summary(project), project.project_description.clone()];
    if project.project_tasks.is_empty() {
        out.push("No tasks.".dimmed().to_string());
    }
    for task in &project.project_tasks {
        out.push(render_task_line(task));
        for subtask in &task.subtasks {
            out.push(render_subtask_line(subtask));
        }
    }
    out.join("\n")
}

fn render_task_line(task: &Task) -> String {
    let kind = task
        .task_type
        .as_deref()
        .map(|t| format!(" <{}>", t))
        .unwrap_or_default();
    format!(
        "  - [{}] {}{} due {} ({}) {}",
        colorize_status(&task.status),
        task.name.bold(),
        kind,
        task.due_date,
        task.difficulty,
        task.id.dimmed()
    )
}

fn render_subtask_line(subtask: &Subtask) -> String {
    format!(
        "      * [{}] {} due {} ({}) {}",
        colorize_status(&subtask.status),
        subtask.name,
        subtask.due_date,
        subtask.difficulty,
        subtask.id.dimmed()
    )
}

/// Statuses are free-form; only a few well-known spellings get a color.
fn colorize_status(status: &str) -> colored::ColoredString {
    match status.to_ascii_lowercase().as_str() {
        "done" | "complete" | "completed" => status.green(),
        "in progress" | "in-progress" | "doing" => status.yellow(),
        "blocked" => status.red(),
        _ => status.normal(),
    }
}
