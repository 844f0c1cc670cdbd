//! Axum route handlers for the Resume API.

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};
use bytes::Bytes;
use serde::Deserialize;
use tracing::{info, warn};

use crate::analysis::analyzer::analyze;
use crate::errors::AppError;
use crate::extraction::{ensure_readable, validate_upload};
use crate::models::resume::{Resume, ResumeAnalysis};
use crate::state::AppState;
use crate::storage::objects::resume_object_key;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReanalyzeRequest {
    #[serde(default)]
    pub job_description: Option<String>,
}

struct UploadedFile {
    file_name: String,
    content_type: Option<String>,
    data: Bytes,
}

fn non_blank(text: Option<String>) -> Option<String> {
    text.filter(|t| !t.trim().is_empty())
}

/// Best-effort delete of a retained upload. Failures are only logged.
async fn discard_retained_file(state: &AppState, key: &str) {
    if let Some(objects) = &state.objects {
        if let Err(e) = objects.delete(key).await {
            warn!("Could not delete {key} from bucket {}: {e}", objects.bucket());
        }
    }
}

/// POST /api/v1/resumes
///
/// Multipart upload: `file` (PDF) and optional `jobDescription` text.
/// Extracts text, retains the file if object storage is configured,
/// analyzes, then stores the resume. Nothing is stored if any step fails.
pub async fn handle_upload_resume(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<Resume>), AppError> {
    let mut upload: Option<UploadedFile> = None;
    let mut job_description: Option<String> = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("file") => {
                let file_name = field.file_name().unwrap_or("resume.pdf").to_string();
                let content_type = field.content_type().map(str::to_string);
                let data = field.bytes().await?;
                upload = Some(UploadedFile {
                    file_name,
                    content_type,
                    data,
                });
            }
            Some("jobDescription") => {
                job_description = non_blank(Some(field.text().await?));
            }
            _ => {}
        }
    }

    let upload = upload.ok_or_else(|| AppError::Validation("Please select a file".to_string()))?;
    validate_upload(
        &upload.file_name,
        upload.content_type.as_deref(),
        upload.data.len(),
        state.config.max_upload_bytes,
    )?;

    let text = state.extractor.extract(upload.data.clone()).await?;
    ensure_readable(&text)?;

    let mut resume = Resume::new(upload.file_name, text);
    if let Some(objects) = &state.objects {
        let key = resume_object_key(&resume.id, &resume.file_name);
        objects.put_pdf(&key, upload.data).await?;
        resume.file_key = Some(key);
    }
    resume.analysis = Some(analyze(&resume.text, job_description.as_deref()));

    if let Err(e) = state.repo.add_resume(resume.clone()).await {
        if let Some(key) = resume.file_key.as_deref() {
            warn!("Storing resume {} failed, removing retained file", resume.id);
            discard_retained_file(&state, key).await;
        }
        return Err(e.into());
    }
    info!(
        "Uploaded resume {} (ATS {})",
        resume.id,
        resume.analysis.as_ref().map_or(0, |a| a.ats_score)
    );

    Ok((StatusCode::CREATED, Json(resume)))
}

/// GET /api/v1/resumes
pub async fn handle_list_resumes(
    State(state): State<AppState>,
) -> Result<Json<Vec<Resume>>, AppError> {
    Ok(Json(state.repo.list_resumes().await?))
}

/// GET /api/v1/resumes/:id
pub async fn handle_get_resume(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Resume>, AppError> {
    let resume = state
        .repo
        .get_resume(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Resume {id} not found")))?;
    Ok(Json(resume))
}

/// DELETE /api/v1/resumes/:id
///
/// Drops the resume, its matches, and the retained file if there is one.
pub async fn handle_delete_resume(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let removed = state
        .repo
        .remove_resume(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Resume {id} not found")))?;

    if let Some(key) = removed.file_key.as_deref() {
        discard_retained_file(&state, key).await;
    }

    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/resumes/:id/analyze
///
/// Re-runs the analyzer, optionally against a job description, and stores
/// the new analysis on the resume.
pub async fn handle_reanalyze_resume(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<ReanalyzeRequest>,
) -> Result<Json<ResumeAnalysis>, AppError> {
    let mut resume = state
        .repo
        .get_resume(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Resume {id} not found")))?;

    let job_description = non_blank(request.job_description);
    let analysis = analyze(&resume.text, job_description.as_deref());
    resume.analysis = Some(analysis.clone());

    if !state.repo.replace_resume(resume).await? {
        return Err(AppError::NotFound(format!("Resume {id} not found")));
    }
    Ok(Json(analysis))
}
