//! Job Matcher: scores one resume against one or many job descriptions.
//!
//! Algorithm:
//! 1. Analyze the resume with the job description as context (ATS score + found keywords).
//! 2. Extract job keywords from description + requirements (full vocabulary, plus a
//!    synthetic "N years experience" keyword).
//! 3. Reconcile: two keywords match when either contains the other.
//! 4. match = 0.4·ATS + 0.4·keyword coverage + 20·requirements ratio, clamped to 0..=100.

use std::sync::LazyLock;

use rayon::prelude::*;
use regex::Regex;

use crate::analysis::analyzer::analyze;
use crate::analysis::vocabulary::{scan_substrings, Scope};
use crate::models::job::{JobDescription, JobMatch};
use crate::models::resume::Resume;

pub const MAX_MISSING_SKILLS: usize = 10;

const ATS_WEIGHT: f64 = 0.4;
const KEYWORD_WEIGHT: f64 = 0.4;
const REQUIREMENTS_WEIGHT: f64 = 20.0;
/// Share of a requirement's significant words the resume must mention.
const REQUIREMENT_WORD_THRESHOLD: f64 = 0.3;
/// Ratio used when a job lists no requirements.
const NO_REQUIREMENTS_RATIO: f64 = 0.5;

static YEARS_EXPERIENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d+)\+?\s*(years?|yrs?)\s*(of\s*)?experience").expect("static regex")
});

/// Keywords a job asks for, deduplicated in first-seen order.
pub fn extract_job_keywords(job: &JobDescription) -> Vec<String> {
    let text = format!("{} {}", job.description, job.requirements.join(" ")).to_lowercase();
    let mut keywords = scan_substrings(&text, Scope::All);

    for requirement in &job.requirements {
        for skill in scan_substrings(requirement, Scope::All) {
            if !keywords.contains(&skill) {
                keywords.push(skill);
            }
        }
    }

    if let Some(caps) = YEARS_EXPERIENCE.captures(&text) {
        let years = format!("{} years experience", &caps[1]);
        if !keywords.contains(&years) {
            keywords.push(years);
        }
    }

    keywords
}

fn keywords_overlap(a: &str, b: &str) -> bool {
    let a = a.to_lowercase();
    let b = b.to_lowercase();
    a.contains(&b) || b.contains(&a)
}

/// Splits keywords into (resume keywords the job wants, job keywords the resume lacks).
pub fn reconcile_skills(
    resume_keywords: &[String],
    job_keywords: &[String],
) -> (Vec<String>, Vec<String>) {
    let matched = resume_keywords
        .iter()
        .filter(|skill| job_keywords.iter().any(|kw| keywords_overlap(skill, kw)))
        .cloned()
        .collect();
    let missing = job_keywords
        .iter()
        .filter(|kw| !resume_keywords.iter().any(|skill| keywords_overlap(skill, kw)))
        .cloned()
        .collect();
    (matched, missing)
}

/// Fraction of requirements the resume text covers, in 0.0..=1.0.
pub fn requirements_match_ratio(resume_text: &str, requirements: &[String]) -> f64 {
    if requirements.is_empty() {
        return NO_REQUIREMENTS_RATIO;
    }
    let resume_lower = resume_text.to_lowercase();

    let satisfied = requirements
        .iter()
        .filter(|req| {
            let req_lower = req.to_lowercase();
            let words: Vec<&str> = req_lower
                .split_whitespace()
                .filter(|w| w.chars().count() > 3)
                .collect();
            if words.is_empty() {
                return false;
            }
            let hits = words.iter().filter(|w| resume_lower.contains(*w)).count();
            hits as f64 / words.len() as f64 > REQUIREMENT_WORD_THRESHOLD
        })
        .count();

    satisfied as f64 / requirements.len() as f64
}

fn compute_match_score(ats_score: u32, matched: usize, job_keywords: usize, ratio: f64) -> u32 {
    let keyword_score = matched as f64 / job_keywords.max(1) as f64 * 100.0;
    let raw = ats_score as f64 * ATS_WEIGHT
        + keyword_score * KEYWORD_WEIGHT
        + ratio * REQUIREMENTS_WEIGHT;
    raw.round().clamp(0.0, 100.0) as u32
}

/// Builds the narrative shown next to a match.
pub fn build_match_narrative(score: u32, matched: &[String], missing: &[String]) -> String {
    let mut narrative = if score >= 80 {
        "Excellent match! Your resume aligns very well with this position. ".to_string()
    } else if score >= 60 {
        "Good match. Your resume has strong alignment with the job requirements. ".to_string()
    } else if score >= 40 {
        "Moderate match. There are some gaps between your resume and the job requirements. "
            .to_string()
    } else {
        "Low match. Your resume needs significant improvements to align with this position. "
            .to_string()
    };

    if !matched.is_empty() {
        narrative.push_str(&format!(
            "You have strong alignment with {} required skills: {}. ",
            matched.len(),
            first_five(matched)
        ));
    }
    if !missing.is_empty() {
        narrative.push_str(&format!(
            "Consider highlighting or adding these skills: {}. ",
            first_five(missing)
        ));
    }

    let compatibility = if score >= 70 {
        "strong"
    } else if score >= 50 {
        "moderate"
    } else {
        "weak"
    };
    narrative.push_str(&format!(
        "Your ATS score indicates {compatibility} compatibility with applicant tracking systems."
    ));
    narrative
}

fn first_five(items: &[String]) -> String {
    items
        .iter()
        .take(5)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Scores one resume against one job.
pub fn match_one(resume: &Resume, job: &JobDescription) -> JobMatch {
    let analysis = analyze(&resume.text, Some(&job.description));
    let job_keywords = extract_job_keywords(job);
    let (matched_skills, mut missing_skills) =
        reconcile_skills(&analysis.keywords.found, &job_keywords);

    let ratio = requirements_match_ratio(&resume.text, &job.requirements);
    let match_score = compute_match_score(
        analysis.ats_score,
        matched_skills.len(),
        job_keywords.len(),
        ratio,
    );
    let narrative = build_match_narrative(match_score, &matched_skills, &missing_skills);
    missing_skills.truncate(MAX_MISSING_SKILLS);

    JobMatch {
        job_id: job.id.clone(),
        resume_id: resume.id.clone(),
        match_score,
        matched_skills,
        missing_skills,
        analysis: narrative,
    }
}

/// Scores one resume against every job, best match first. Ties keep input order.
pub fn match_many(resume: &Resume, jobs: &[JobDescription]) -> Vec<JobMatch> {
    let mut matches: Vec<JobMatch> = jobs.par_iter().map(|job| match_one(resume, job)).collect();
    matches.sort_by(|a, b| b.match_score.cmp(&a.match_score));
    matches
}
