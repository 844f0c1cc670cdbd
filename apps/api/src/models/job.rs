use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A job posting entered by the user. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobDescription {
    pub id: String,
    pub title: String,
    pub company: String,
    pub description: String,
    #[serde(default)]
    pub requirements: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl JobDescription {
    pub fn new(
        title: impl Into<String>,
        company: impl Into<String>,
        description: impl Into<String>,
        requirements: Vec<String>,
    ) -> Self {
        Self {
            id: format!("job-{}", Uuid::new_v4()),
            title: title.into(),
            company: company.into(),
            description: description.into(),
            requirements,
            location: None,
        }
    }
}

/// Compatibility of one resume with one job. `(job_id, resume_id)` is the pairing key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobMatch {
    pub job_id: String,
    pub resume_id: String,
    pub match_score: u32,
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub analysis: String,
}

impl JobMatch {
    pub fn same_pair(&self, other: &JobMatch) -> bool {
        self.job_id == other.job_id && self.resume_id == other.resume_id
    }
}
