//! Axum route handlers for analysis, matching and the dashboard.

use anyhow::anyhow;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::analysis::analyzer::analyze;
use crate::analysis::matcher::match_many;
use crate::errors::AppError;
use crate::models::job::JobMatch;
use crate::models::resume::{Resume, ResumeAnalysis};
use crate::state::AppState;

const RECENT_RESUMES: usize = 5;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    pub text: String,
    #[serde(default)]
    pub job_description: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchRequest {
    /// Resume to match; the first stored resume when omitted.
    #[serde(default)]
    pub resume_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchQuery {
    pub resume_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeSummary {
    pub id: String,
    pub file_name: String,
    pub upload_date: DateTime<Utc>,
    pub ats_score: Option<u32>,
    pub overall_score: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    pub resume_count: usize,
    pub job_count: usize,
    pub match_count: usize,
    pub average_ats_score: u32,
    pub average_match_score: u32,
    pub recent_resumes: Vec<ResumeSummary>,
}

// ────────────────────────────────────────────────────────────────────────────
// Dashboard aggregation
// ────────────────────────────────────────────────────────────────────────────

fn rounded_mean(values: impl ExactSizeIterator<Item = u32>) -> u32 {
    let n = values.len();
    if n == 0 {
        return 0;
    }
    (values.map(f64::from).sum::<f64>() / n as f64).round() as u32
}

/// Resumes without an analysis count as ATS 0.
pub fn compute_dashboard(
    resumes: &[Resume],
    job_count: usize,
    matches: &[JobMatch],
) -> DashboardResponse {
    let average_ats_score = rounded_mean(
        resumes
            .iter()
            .map(|r| r.analysis.as_ref().map_or(0, |a| a.ats_score)),
    );
    let average_match_score = rounded_mean(matches.iter().map(|m| m.match_score));

    let mut recent: Vec<&Resume> = resumes.iter().collect();
    recent.sort_by(|a, b| b.upload_date.cmp(&a.upload_date));
    let recent_resumes = recent
        .into_iter()
        .take(RECENT_RESUMES)
        .map(|r| ResumeSummary {
            id: r.id.clone(),
            file_name: r.file_name.clone(),
            upload_date: r.upload_date,
            ats_score: r.analysis.as_ref().map(|a| a.ats_score),
            overall_score: r.analysis.as_ref().map(|a| a.overall_score),
        })
        .collect();

    DashboardResponse {
        resume_count: resumes.len(),
        job_count,
        match_count: matches.len(),
        average_ats_score,
        average_match_score,
        recent_resumes,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/analyze
///
/// Analyzes raw text without storing anything.
pub async fn handle_analyze(Json(request): Json<AnalyzeRequest>) -> Json<ResumeAnalysis> {
    let job = request
        .job_description
        .as_deref()
        .filter(|j| !j.trim().is_empty());
    Json(analyze(&request.text, job))
}

/// POST /api/v1/matches
///
/// Matches one resume against every stored job and stores the results.
/// Returns the fresh matches, best first.
pub async fn handle_match_jobs(
    State(state): State<AppState>,
    Json(request): Json<MatchRequest>,
) -> Result<Json<Vec<JobMatch>>, AppError> {
    let resumes = state.repo.list_resumes().await?;
    if resumes.is_empty() {
        return Err(AppError::Validation(
            "Please upload at least one resume first".to_string(),
        ));
    }
    let jobs = state.repo.list_jobs().await?;
    if jobs.is_empty() {
        return Err(AppError::Validation(
            "Please add at least one job description".to_string(),
        ));
    }

    let resume = match request.resume_id {
        Some(id) => resumes
            .into_iter()
            .find(|r| r.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Resume {id} not found")))?,
        None => resumes
            .into_iter()
            .next()
            .ok_or_else(|| AppError::Validation("No resume available".to_string()))?,
    };

    let resume_id = resume.id.clone();
    let job_count = jobs.len();
    let matches = tokio::task::spawn_blocking(move || match_many(&resume, &jobs))
        .await
        .map_err(|e| AppError::Internal(anyhow!("matching task failed: {e}")))?;

    state.repo.upsert_matches(&matches).await?;
    info!("Matched resume {resume_id} against {job_count} jobs");

    Ok(Json(matches))
}

/// GET /api/v1/matches?resumeId=
pub async fn handle_list_matches(
    State(state): State<AppState>,
    Query(query): Query<MatchQuery>,
) -> Result<Json<Vec<JobMatch>>, AppError> {
    Ok(Json(
        state.repo.list_matches(query.resume_id.as_deref()).await?,
    ))
}

/// GET /api/v1/dashboard
pub async fn handle_dashboard(
    State(state): State<AppState>,
) -> Result<Json<DashboardResponse>, AppError> {
    let resumes = state.repo.list_resumes().await?;
    let jobs = state.repo.list_jobs().await?;
    let matches = state.repo.list_matches(None).await?;
    Ok(Json(compute_dashboard(&resumes, jobs.len(), &matches)))
}

/// DELETE /api/v1/data
pub async fn handle_clear_data(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    state.repo.clear_all().await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn resume_with_score(name: &str, ats: Option<u32>, age_days: i64) -> Resume {
        let mut resume = Resume::new(name, "Phone: 555");
        resume.upload_date = Utc::now() - Duration::days(age_days);
        if let Some(score) = ats {
            let mut analysis = analyze("Phone: 555", None);
            analysis.ats_score = score;
            resume.analysis = Some(analysis);
        }
        resume
    }

    fn job_match(score: u32) -> JobMatch {
        JobMatch {
            job_id: "j".to_string(),
            resume_id: "r".to_string(),
            match_score: score,
            matched_skills: vec![],
            missing_skills: vec![],
            analysis: String::new(),
        }
    }

    #[test]
    fn test_empty_dashboard() {
        let dashboard = compute_dashboard(&[], 0, &[]);
        assert_eq!(dashboard.average_ats_score, 0);
        assert_eq!(dashboard.average_match_score, 0);
        assert!(dashboard.recent_resumes.is_empty());
    }

    #[test]
    fn test_averages_round_and_count_unanalyzed_as_zero() {
        let resumes = vec![
            resume_with_score("a.pdf", Some(80), 1),
            resume_with_score("b.pdf", Some(71), 2),
            resume_with_score("c.pdf", None, 3),
        ];
        let matches = vec![job_match(50), job_match(65)];
        let dashboard = compute_dashboard(&resumes, 4, &matches);
        // (80 + 71 + 0) / 3 = 50.33
        assert_eq!(dashboard.average_ats_score, 50);
        // (50 + 65) / 2 = 57.5
        assert_eq!(dashboard.average_match_score, 58);
        assert_eq!(dashboard.job_count, 4);
        assert_eq!(dashboard.match_count, 2);
    }

    #[test]
    fn test_recent_resumes_newest_first_and_capped() {
        let resumes: Vec<Resume> = (0..7)
            .map(|i| resume_with_score(&format!("{i}.pdf"), Some(50), i))
            .collect();
        let dashboard = compute_dashboard(&resumes, 0, &[]);
        assert_eq!(dashboard.recent_resumes.len(), RECENT_RESUMES);
        assert_eq!(dashboard.recent_resumes[0].file_name, "0.pdf");
        assert_eq!(dashboard.recent_resumes[4].file_name, "4.pdf");
    }
}
