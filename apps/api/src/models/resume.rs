use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An uploaded resume and, once the analyzer has run, its analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resume {
    pub id: String,
    pub file_name: String,
    pub upload_date: DateTime<Utc>,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis: Option<ResumeAnalysis>,
    /// Object-storage key of the retained PDF, when object storage is configured.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_key: Option<String>,
}

impl Resume {
    pub fn new(file_name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: format!("resume-{}", Uuid::new_v4()),
            file_name: file_name.into(),
            upload_date: Utc::now(),
            text: text.into(),
            analysis: None,
            file_key: None,
        }
    }
}

/// Structured output of the resume analyzer. All scores are integers in 0..=100.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeAnalysis {
    pub ats_score: u32,
    pub overall_score: u32,
    pub feedback: Feedback,
    pub sections: Sections,
    pub keywords: Keywords,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Feedback {
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub suggestions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionScore {
    pub score: u32,
    pub feedback: String,
}

/// Fixed mapping of resume section → score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sections {
    pub contact: SectionScore,
    pub summary: SectionScore,
    pub experience: SectionScore,
    pub skills: SectionScore,
    pub education: SectionScore,
}

impl Sections {
    pub fn scores(&self) -> [u32; 5] {
        [
            self.contact.score,
            self.summary.score,
            self.experience.score,
            self.skills.score,
            self.education.score,
        ]
    }
}

/// `found` is in vocabulary order; `missing` holds at most 10 entries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Keywords {
    pub found: Vec<String>,
    pub missing: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resume_json_uses_camel_case_and_round_trips() {
        let mut resume = Resume::new("cv.pdf", "Skills: Rust");
        resume.analysis = Some(ResumeAnalysis {
            ats_score: 40,
            overall_score: 43,
            feedback: Feedback {
                strengths: vec![],
                weaknesses: vec!["Add contact information".to_string()],
                suggestions: vec![],
            },
            sections: Sections {
                contact: SectionScore { score: 0, feedback: String::new() },
                summary: SectionScore { score: 0, feedback: String::new() },
                experience: SectionScore { score: 0, feedback: String::new() },
                skills: SectionScore { score: 100, feedback: String::new() },
                education: SectionScore { score: 0, feedback: String::new() },
            },
            keywords: Keywords::default(),
        });

        let json = serde_json::to_value(&resume).unwrap();
        assert!(json.get("fileName").is_some());
        assert!(json.get("uploadDate").unwrap().is_string());
        assert!(json.get("fileKey").is_none());
        assert_eq!(json["analysis"]["atsScore"], 40);

        let back: Resume = serde_json::from_value(json).unwrap();
        assert_eq!(back, resume);
        assert_eq!(back.analysis.unwrap().sections.scores(), [0, 0, 0, 100, 0]);
    }
}
