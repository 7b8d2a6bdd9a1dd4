use crate::api::client::HttpClient;
use crate::api::types::{NewProject, Project, ProjectPatch};
use crate::error::ServiceResult;

/// Project endpoints under `/project`.
///
/// Every method is a single request; identifiers go into the path
/// verbatim and bodies are sent exactly as given.
#[derive(Clone)]
pub struct ProjectApi {
    http: HttpClient,
}

impl ProjectApi {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    pub async fn get_all_projects(&self) -> ServiceResult<Vec<Project>> {
        self.http.get("/project/all").await
    }

    pub async fn get_project_by_id(&self, id: &str) -> ServiceResult<Project> {
        self.http.get(&format!("/project/{}", id)).await
    }

    pub async fn create_project(&self, project: &NewProject) -> ServiceResult<Project> {
        self.http.post("/project/newProject", project).await
    }

    pub async fn update_project(&self, id: &str, project: &ProjectPatch) -> ServiceResult<Project> {
        self.http
            .put(&format!("/project/updateProject/{}", id), project)
            .await
    }

    pub async fn delete_project(&self, id: &str) -> ServiceResult<()> {
        self.http.delete(&format!("/project/{}", id)).await
    }
}
