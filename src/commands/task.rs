//! Task and subtask editing.
//!
//! The backend has no task endpoints: a project's task list is replaced
//! wholesale by `PUT /project/updateProject/{id}`. Every command here
//! fetches the project, edits its task tree locally and sends the whole
//! project back. New items go out with an empty id so the server assigns one.

use colored::Colorize;

use crate::api::{Project, Subtask, Task};
use crate::cli::{SubtaskCommand, TaskCommand, WorkItemArguments};
use crate::commands::project::{render_project, save_project};
use crate::commands::{Context, parse_date};
use crate::error::{ServiceError, ServiceResult};

pub async fn run_task(ctx: &Context, command: TaskCommand) -> ServiceResult<()> {
    let (project_id, verb) = match &command {
        TaskCommand::Add { project_id, .. } => (project_id.clone(), "Added task to"),
        TaskCommand::Status { project_id, .. } => (project_id.clone(), "Updated task in"),
        TaskCommand::Remove { project_id, .. } => (project_id.clone(), "Removed task from"),
    };

    let mut project = ctx.projects.get_project_by_id(&project_id).await?;
    match command {
        TaskCommand::Add {
            item, task_type, ..
        } => add_task(&mut project, new_task(item, task_type)?),
        TaskCommand::Status {
            task_id, status, ..
        } => set_task_status(&mut project, &task_id, &status)?,
        TaskCommand::Remove { task_id, .. } => remove_task(&mut project, &task_id)?,
    }

    let saved = save_project(ctx, project).await?;
    ctx.emit(&saved, |p| format!("{}\n{}", verb.green().bold(), render_project(p)))
}

pub async fn run_subtask(ctx: &Context, command: SubtaskCommand) -> ServiceResult<()> {
    let project_id = match &command {
        SubtaskCommand::Add { project_id, .. } | SubtaskCommand::Status { project_id, .. } => {
            project_id.clone()
        }
    };

    let mut project = ctx.projects.get_project_by_id(&project_id).await?;
    match command {
        SubtaskCommand::Add { task_id, item, .. } => {
            add_subtask(&mut project, &task_id, new_subtask(item)?)?
        }
        SubtaskCommand::Status {
            task_id,
            subtask_id,
            status,
            ..
        } => set_subtask_status(&mut project, &task_id, &subtask_id, &status)?,
    }

    let saved = save_project(ctx, project).await?;
    ctx.emit(&saved, |p| {
        format!("{}\n{}", "Saved subtasks of".green().bold(), render_project(p))
    })
}

fn new_task(item: WorkItemArguments, task_type: Option<String>) -> ServiceResult<Task> {
    Ok(Task {
        id: String::new(),
        name: item.name,
        description: item.description,
        due_date: parse_date(&item.due)?,
        status: item.status,
        difficulty: item.difficulty,
        task_type,
        subtasks: Vec::new(),
    })
}

fn new_subtask(item: WorkItemArguments) -> ServiceResult<Subtask> {
    Ok(Subtask {
        id: String::new(),
        name: item.name,
        description: item.description,
        due_date: parse_date(&item.due)?,
        status: item.status,
        difficulty: item.difficulty,
    })
}

pub fn add_task(project: &mut Project, task: Task) {
    project.project_tasks.push(task);
}

pub fn set_task_status(project: &mut Project, task_id: &str, status: &str) -> ServiceResult<()> {
    let task = project
        .task_mut(task_id)
        .ok_or_else(|| ServiceError::TaskNotFound(task_id.to_string()))?;
    task.status = status.to_string();
    Ok(())
}

pub fn remove_task(project: &mut Project, task_id: &str) -> ServiceResult<()> {
    let before = project.project_tasks.len();
    project.project_tasks.retain(|t| t.id != task_id);
    if project.project_tasks.len() == before {
        return Err(ServiceError::TaskNotFound(task_id.to_string()));
    }
    Ok(())
}

pub fn add_subtask(project: &mut Project, task_id: &str, subtask: Subtask) -> ServiceResult<()> {
    let task = project
        .task_mut(task_id)
        .ok_or_else(|| ServiceError::TaskNotFound(task_id.to_string()))?;
    task.subtasks.push(subtask);
    Ok(())
}

pub fn set_subtask_status(
    project: &mut Project,
    task_id: &str,
    subtask_id: &str,
    status: &str,
) -> ServiceResult<()> {
    let task = project
        .task_mut(task_id)
        .ok_or_else(|| ServiceError::TaskNotFound(task_id.to_string()))?;
    let subtask = task
        .subtask_mut(subtask_id)
        .ok_or_else(|| ServiceError::SubtaskNotFound(subtask_id.to_string()))?;
    subtask.status = status.to_string();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::RecordingTransport;
    use crate::api::{HttpClient, Method};
    use serde_json::json;

    fn project_with_task() -> Project {
        Project {
            project_id: "p-1".to_string(),
            project_name: "Platformer".to_string(),
            project_description: "2D jump and run".to_string(),
            project_tasks: vec![Task {
                id: "t-1".to_string(),
                name: "Level one".to_string(),
                status: "Todo".to_string(),
                subtasks: vec![Subtask {
                    id: "s-1".to_string(),
                    name: "Tileset".to_string(),
                    status: "Todo".to_string(),
                    ..Default::default()
                }],
                ..Default::default()
            }],
        }
    }

    fn item(name: &str, due: &str) -> WorkItemArguments {
        WorkItemArguments {
            name: name.to_string(),
            description: String::new(),
            due: due.to_string(),
            status: "Todo".to_string(),
            difficulty: "Easy".to_string(),
        }
    }

    #[test]
    fn status_changes_only_the_target() {
        let mut project = project_with_task();
        set_task_status(&mut project, "t-1", "Done").unwrap();
        set_subtask_status(&mut project, "t-1", "s-1", "Blocked").unwrap();

        let task = &project.project_tasks[0];
        assert_eq!(task.status, "Done");
        assert_eq!(task.subtasks[0].status, "Blocked");
    }

    #[test]
    fn unknown_ids_are_reported() {
        let mut project = project_with_task();
        assert!(matches!(
            set_task_status(&mut project, "t-404", "Done"),
            Err(ServiceError::TaskNotFound(id)) if id == "t-404"
        ));
        assert!(matches!(
            set_subtask_status(&mut project, "t-1", "s-404", "Done"),
            Err(ServiceError::SubtaskNotFound(_))
        ));
        assert!(remove_task(&mut project, "t-404").is_err());
        assert_eq!(project.project_tasks.len(), 1);
    }

    #[test]
    fn new_items_leave_id_for_server() {
        let task = new_task(item("Boss", "2024-09-01"), Some("feature".to_string())).unwrap();
        assert!(task.id.is_empty());
        assert_eq!(task.task_type.as_deref(), Some("feature"));

        assert!(new_subtask(item("Arena", "next week")).is_err());
    }

    #[test]
    fn removing_a_task_drops_its_subtasks() {
        let mut project = project_with_task();
        remove_task(&mut project, "t-1").unwrap();
        assert!(project.project_tasks.is_empty());
    }

    #[tokio::test]
    async fn task_add_puts_whole_project_back() {
        let stored = serde_json::to_value(project_with_task()).unwrap();
        let transport = RecordingTransport::with_json(vec![stored.clone(), stored]);
        let ctx = Context::new(HttpClient::new(transport.clone()), true);

        run_task(
            &ctx,
            TaskCommand::Add {
                project_id: "p-1".to_string(),
                item: item("Level two", "2024-10-01"),
                task_type: None,
            },
        )
        .await
        .unwrap();

        let requests = transport.requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].method, Method::Get);
        assert_eq!(requests[0].path, "/project/p-1");
        assert_eq!(requests[1].method, Method::Put);
        assert_eq!(requests[1].path, "/project/updateProject/p-1");

        let body = requests[1].body.as_ref().unwrap();
        assert_eq!(body["project_id"], "p-1");
        assert_eq!(body["project_name"], "Platformer");
        let tasks = body["project_tasks"].as_array().unwrap();
        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[1]["id"], "");
        assert_eq!(tasks[1]["name"], "Level two");
        assert_eq!(tasks[1]["dueDate"], "2024-10-01");
        assert_eq!(tasks[1]["subtasks"], json!([]));
    }

    #[tokio::test]
    async fn missing_task_aborts_before_update() {
        let stored = serde_json::to_value(project_with_task()).unwrap();
        let transport = RecordingTransport::with_json(vec![stored]);
        let ctx = Context::new(HttpClient::new(transport.clone()), true);

        let err = run_subtask(
            &ctx,
            SubtaskCommand::Add {
                project_id: "p-1".to_string(),
                task_id: "t-missing".to_string(),
                item: item("Orphan", "2024-10-01"),
            },
        )
        .await
        .unwrap_err();

        assert!(matches!(err, ServiceError::TaskNotFound(_)));
        assert_eq!(transport.requests().len(), 1);
    }
}
