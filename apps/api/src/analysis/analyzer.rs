//! Resume Analyzer: turns free-form resume text into section scores,
//! an ATS score, an overall score, feedback and keyword sets.
//!
//! Pure and deterministic. Section scores are fixed heuristic constants
//! awarded on marker-word presence.

use std::sync::LazyLock;

use regex::Regex;

use crate::analysis::feedback::{generate_feedback, section_feedback, FeedbackInputs, Section};
use crate::analysis::quality::content_quality;
use crate::analysis::vocabulary::{scan_substrings, scan_words, Scope};
use crate::models::resume::{Keywords, ResumeAnalysis, SectionScore, Sections};

pub const MAX_MISSING_KEYWORDS: usize = 10;

const CONTACT_SCORE: u32 = 100;
const SUMMARY_SCORE: u32 = 80;
const SUMMARY_LOOSE_SCORE: u32 = 60;
const EXPERIENCE_SCORE: u32 = 85;
const EDUCATION_SCORE: u32 = 90;
/// Number of recognised skills that earns a full skills score.
const SKILLS_FOR_FULL_SCORE: f64 = 5.0;

const ATS_WEIGHT: f64 = 0.7;
const QUALITY_WEIGHT: f64 = 0.3;

fn marker(pattern: &str) -> Regex {
    Regex::new(&format!("(?i)({pattern})")).expect("static regex")
}

static CONTACT: LazyLock<Regex> = LazyLock::new(|| marker("phone|email|address|contact"));
static SUMMARY: LazyLock<Regex> = LazyLock::new(|| marker("summary|objective|profile|about"));
static SUMMARY_NARROW: LazyLock<Regex> = LazyLock::new(|| marker("summary|objective|profile"));
static EXPERIENCE: LazyLock<Regex> =
    LazyLock::new(|| marker("experience|employment|work history|professional"));
static SKILLS: LazyLock<Regex> =
    LazyLock::new(|| marker("skills|technical|competencies|abilities"));
static EDUCATION: LazyLock<Regex> =
    LazyLock::new(|| marker("education|university|degree|bachelor|master|phd"));

/// Which resume sections were detected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SectionPresence {
    pub contact: bool,
    pub summary: bool,
    pub experience: bool,
    pub skills: bool,
    pub education: bool,
}

pub fn detect_sections(text: &str) -> SectionPresence {
    SectionPresence {
        contact: CONTACT.is_match(text),
        summary: SUMMARY.is_match(text),
        experience: EXPERIENCE.is_match(text),
        skills: SKILLS.is_match(text),
        education: EDUCATION.is_match(text),
    }
}

/// Vocabulary terms in `job_text` that the resume never mentions, capped.
pub fn missing_keywords(resume_text: &str, job_text: &str) -> Vec<String> {
    let resume_lower = resume_text.to_lowercase();
    scan_words(job_text, Scope::CoreOnly)
        .into_iter()
        .filter(|kw| !resume_lower.contains(kw.as_str()))
        .take(MAX_MISSING_KEYWORDS)
        .collect()
}

fn summary_score(text: &str, present: bool) -> u32 {
    if !present {
        0
    } else if SUMMARY_NARROW.is_match(text) {
        SUMMARY_SCORE
    } else {
        SUMMARY_LOOSE_SCORE
    }
}

fn skills_score(present: bool, found: usize) -> u32 {
    if !present {
        return 0;
    }
    ((found as f64 / SKILLS_FOR_FULL_SCORE) * 100.0).min(100.0).round() as u32
}

fn score_if(present: bool, score: u32) -> u32 {
    if present {
        score
    } else {
        0
    }
}

/// Analyzes resume text, optionally against a job description.
pub fn analyze(resume_text: &str, job_text: Option<&str>) -> ResumeAnalysis {
    let presence = detect_sections(resume_text);
    let found = scan_substrings(resume_text, Scope::CoreOnly);
    let missing = job_text
        .map(|job| missing_keywords(resume_text, job))
        .unwrap_or_default();

    let contact = score_if(presence.contact, CONTACT_SCORE);
    let summary = summary_score(resume_text, presence.summary);
    let experience = score_if(presence.experience, EXPERIENCE_SCORE);
    let skills = skills_score(presence.skills, found.len());
    let education = score_if(presence.education, EDUCATION_SCORE);

    let feedback = generate_feedback(&FeedbackInputs {
        contact_score: contact,
        skills_score: skills,
        experience_score: experience,
        found_skills: &found,
        missing_skills: &missing,
    });

    let section = |kind: Section, score: u32, present: bool| SectionScore {
        score,
        feedback: section_feedback(kind, present, &found),
    };
    let sections = Sections {
        contact: section(Section::Contact, contact, presence.contact),
        summary: section(Section::Summary, summary, presence.summary),
        experience: section(Section::Experience, experience, presence.experience),
        skills: section(Section::Skills, skills, presence.skills),
        education: section(Section::Education, education, presence.education),
    };

    let section_scores = sections.scores();
    let ats_score = (section_scores.iter().sum::<u32>() as f64 / section_scores.len() as f64)
        .round() as u32;

    let quality = content_quality(resume_text);
    let overall_score =
        (ats_score as f64 * ATS_WEIGHT + quality as f64 * QUALITY_WEIGHT).round() as u32;

    ResumeAnalysis {
        ats_score: ats_score.min(100),
        overall_score: overall_score.min(100),
        feedback,
        sections,
        keywords: Keywords { found, missing },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_RESUME: &str = "\
        Jane Doe | Phone: 555-0100 | Email: jane@example.com\n\
        Summary: Backend engineer focused on reliable services.\n\
        Experience: Senior Engineer at Acme (2019-2024). Led migration to Kubernetes.\n\
        Skills: Python, SQL, AWS, Docker, Git, Agile\n\
        Education: BSc Computer Science, State University";

    #[test]
    fn test_empty_text_scores_zero() {
        let analysis = analyze("", None);
        assert_eq!(analysis.ats_score, 0);
        assert_eq!(analysis.overall_score, 12);
        assert_eq!(analysis.sections.scores(), [0, 0, 0, 0, 0]);
        assert_eq!(detect_sections(""), SectionPresence::default());
        assert!(analysis.keywords.found.is_empty());
        assert!(analysis.keywords.missing.is_empty());
    }

    #[test]
    fn test_contact_only_text() {
        let analysis = analyze("Phone: 555-1234, Email: a@b.com", None);
        assert_eq!(analysis.sections.contact.score, 100);
        assert_eq!(analysis.sections.summary.score, 0);
        assert_eq!(analysis.sections.experience.score, 0);
        assert_eq!(analysis.sections.skills.score, 0);
        assert_eq!(analysis.sections.education.score, 0);
        assert_eq!(analysis.ats_score, 20);
    }

    #[test]
    fn test_full_resume_section_scores() {
        let analysis = analyze(FULL_RESUME, None);
        let s = &analysis.sections;
        assert_eq!(s.contact.score, 100);
        assert_eq!(s.summary.score, 80);
        assert_eq!(s.experience.score, 85);
        assert_eq!(s.skills.score, 100);
        assert_eq!(s.education.score, 90);
        // (100 + 80 + 85 + 100 + 90) / 5 = 91
        assert_eq!(analysis.ats_score, 91);
    }

    #[test]
    fn test_summary_via_about_only_scores_60() {
        let analysis = analyze("About me: I build things", None);
        assert_eq!(analysis.sections.summary.score, 60);
    }

    #[test]
    fn test_skills_score_scales_with_found_terms() {
        let analysis = analyze("Skills: python, docker", None);
        assert_eq!(analysis.keywords.found, vec!["python", "docker"]);
        assert_eq!(analysis.sections.skills.score, 40);
    }

    #[test]
    fn test_skills_without_section_marker_score_zero() {
        let analysis = analyze("python docker kubernetes", None);
        assert_eq!(analysis.keywords.found.len(), 3);
        assert_eq!(analysis.sections.skills.score, 0);
    }

    #[test]
    fn test_missing_keywords_from_job_text() {
        let analysis = analyze(FULL_RESUME, Some("We need Python, React and Terraform. Java a plus."));
        // terraform is not in the analyzer's tier; python is on the resume
        assert_eq!(analysis.keywords.missing, vec!["java", "react"]);
        assert!(analysis
            .feedback
            .suggestions
            .iter()
            .any(|s| s == "Consider adding these keywords from the job description: java, react"));
    }

    #[test]
    fn test_missing_is_disjoint_from_found() {
        let job = "javascript python java react node typescript sql aws docker kubernetes";
        let analysis = analyze("Skills: javascript, sql", Some(job));
        for kw in &analysis.keywords.missing {
            assert!(!analysis.keywords.found.contains(kw), "{kw} in both sets");
        }
        // "java" is a substring of "javascript" on the resume, so not missing
        assert!(!analysis.keywords.missing.contains(&"java".to_string()));
    }

    #[test]
    fn test_missing_keywords_capped_at_ten() {
        let job = "javascript python java react node typescript sql aws docker kubernetes git agile scrum";
        let analysis = analyze("nothing relevant", Some(job));
        assert_eq!(analysis.keywords.missing.len(), MAX_MISSING_KEYWORDS);
    }

    #[test]
    fn test_analyze_is_deterministic() {
        let a = serde_json::to_string(&analyze(FULL_RESUME, Some("react"))).unwrap();
        let b = serde_json::to_string(&analyze(FULL_RESUME, Some("react"))).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_scores_bounded_for_assorted_inputs() {
        let long = "managed led 1 2 3 4 5 experience skills ".repeat(200);
        for text in ["", "   ", FULL_RESUME, "phd phd phd", long.as_str()] {
            let analysis = analyze(text, Some(text));
            assert!(analysis.ats_score <= 100);
            assert!(analysis.overall_score <= 100);
            for score in analysis.sections.scores() {
                assert!(score <= 100);
            }
        }
    }

    #[test]
    fn test_generic_suggestions_always_present() {
        let analysis = analyze(FULL_RESUME, None);
        let n = analysis.feedback.suggestions.len();
        assert!(n >= 3);
        assert_eq!(
            analysis.feedback.suggestions[n - 3..],
            crate::analysis::feedback::GENERIC_SUGGESTIONS.map(String::from)
        );
    }
}
