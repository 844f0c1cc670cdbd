//! Axum route handlers for the Job Description API.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use crate::errors::AppError;
use crate::models::job::JobDescription;
use crate::state::AppState;

const DEFAULT_COMPANY: &str = "Unknown Company";

/// Requirements arrive either as a list or as one newline-separated block.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum RequirementsInput {
    List(Vec<String>),
    Text(String),
}

impl RequirementsInput {
    /// Trimmed, non-empty requirement lines.
    pub fn into_lines(self) -> Vec<String> {
        let raw: Vec<String> = match self {
            RequirementsInput::List(items) => items,
            RequirementsInput::Text(text) => text.lines().map(str::to_string).collect(),
        };
        raw.into_iter()
            .map(|r| r.trim().to_string())
            .filter(|r| !r.is_empty())
            .collect()
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateJobRequest {
    pub title: String,
    #[serde(default)]
    pub company: Option<String>,
    pub description: String,
    #[serde(default)]
    pub requirements: Option<RequirementsInput>,
    #[serde(default)]
    pub location: Option<String>,
}

impl CreateJobRequest {
    pub fn into_job(self) -> Result<JobDescription, AppError> {
        if self.title.trim().is_empty() || self.description.trim().is_empty() {
            return Err(AppError::Validation(
                "Job title and description are required".to_string(),
            ));
        }

        let company = self
            .company
            .filter(|c| !c.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_COMPANY.to_string());
        let requirements = self
            .requirements
            .map(RequirementsInput::into_lines)
            .unwrap_or_default();

        let mut job = JobDescription::new(self.title, company, self.description, requirements);
        job.location = self.location.filter(|l| !l.trim().is_empty());
        Ok(job)
    }
}

/// POST /api/v1/jobs
pub async fn handle_create_job(
    State(state): State<AppState>,
    Json(request): Json<CreateJobRequest>,
) -> Result<(StatusCode, Json<JobDescription>), AppError> {
    let job = request.into_job()?;
    state.repo.add_job(job.clone()).await?;
    Ok((StatusCode::CREATED, Json(job)))
}

/// GET /api/v1/jobs
pub async fn handle_list_jobs(
    State(state): State<AppState>,
) -> Result<Json<Vec<JobDescription>>, AppError> {
    Ok(Json(state.repo.list_jobs().await?))
}

/// GET /api/v1/jobs/:id
pub async fn handle_get_job(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<JobDescription>, AppError> {
    let job = state
        .repo
        .get_job(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Job {id} not found")))?;
    Ok(Json(job))
}

/// DELETE /api/v1/jobs/:id
pub async fn handle_delete_job(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    if !state.repo.remove_job(&id).await? {
        return Err(AppError::NotFound(format!("Job {id} not found")));
    }
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(json: &str) -> CreateJobRequest {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_requirements_text_split_into_lines() {
        let job = request(
            r#"{"title": "Dev", "description": "Build APIs",
                "requirements": "React\n\n  Node backend  \n"}"#,
        )
        .into_job()
        .unwrap();
        assert_eq!(job.requirements, vec!["React", "Node backend"]);
    }

    #[test]
    fn test_requirements_list_trimmed() {
        let job = request(
            r#"{"title": "Dev", "description": "Build APIs", "requirements": [" SQL ", ""]}"#,
        )
        .into_job()
        .unwrap();
        assert_eq!(job.requirements, vec!["SQL"]);
    }

    #[test]
    fn test_company_defaults() {
        let job = request(r#"{"title": "Dev", "description": "Build APIs", "company": "  "}"#)
            .into_job()
            .unwrap();
        assert_eq!(job.company, "Unknown Company");
        assert!(job.id.starts_with("job-"));
        assert!(job.requirements.is_empty());
    }

    #[test]
    fn test_title_and_description_required() {
        let err = request(r#"{"title": " ", "description": "Build APIs"}"#)
            .into_job()
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        let err = request(r#"{"title": "Dev", "description": ""}"#)
            .into_job()
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
