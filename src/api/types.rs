use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subtask {
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(rename = "dueDate")]
    pub due_date: String,
    pub status: String,
    pub difficulty: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(rename = "dueDate")]
    pub due_date: String,
    pub status: String,
    pub difficulty: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_type: Option<String>,
    #[serde(default)]
    pub subtasks: Vec<Subtask>,
}

impl Task {
    pub fn subtask_mut(&mut self, subtask_id: &str) -> Option<&mut Subtask> {
        self.subtasks.iter_mut().find(|s| s.id == subtask_id)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub project_id: String,
    pub project_name: String,
    pub project_description: String,
    #[serde(default)]
    pub project_tasks: Vec<Task>,
}

impl Project {
    pub fn task_mut(&mut self, task_id: &str) -> Option<&mut Task> {
        self.project_tasks.iter_mut().find(|t| t.id == task_id)
    }
}

/// Creation payload; the server assigns `project_id`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProject {
    pub project_name: String,
    pub project_description: String,
}

/// Any subset of [`Project`] fields. Unset fields never reach the wire.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_tasks: Option<Vec<Task>>,
}

impl ProjectPatch {
    pub fn is_empty(&self) -> bool {
        self.project_id.is_none()
            && self.project_name.is_none()
            && self.project_description.is_none()
            && self.project_tasks.is_none()
    }
}

impl From<Project> for ProjectPatch {
    fn from(project: Project) -> Self {
        Self {
            project_id: Some(project.project_id),
            project_name: Some(project.project_name),
            project_description: Some(project.project_description),
            project_tasks: Some(project.project_tasks),
        }
    }
}

/// A journal entry as the caller sees it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub date: String,
    pub content: String,
}

/// A journal entry as the server stores and returns it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalRecord {
    pub entry_id: String,
    pub entry_date: String,
    pub entry_body: String,
}

impl From<JournalRecord> for JournalEntry {
    fn from(record: JournalRecord) -> Self {
        Self {
            date: record.entry_date,
            content: record.entry_body,
        }
    }
}

/// Error body produced by the backend's exception handler.
#[derive(Clone, Debug, Deserialize)]
pub struct ErrorBody {
    #[serde(rename = "errorCode")]
    pub error_code: u16,
    #[serde(rename = "errorMessage")]
    pub error_message: String,
}
