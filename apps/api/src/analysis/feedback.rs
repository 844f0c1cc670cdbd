//! Feedback rules: maps section scores to strengths, weaknesses and suggestions.

use crate::models::resume::Feedback;

/// Appended to every analysis regardless of scores.
pub const GENERIC_SUGGESTIONS: [&str; 3] = [
    "Use action verbs and quantify achievements where possible",
    "Keep formatting consistent and ATS-friendly (avoid complex layouts)",
    "Tailor your resume to match keywords from the job description",
];

/// Inputs the feedback rules look at.
pub struct FeedbackInputs<'a> {
    pub contact_score: u32,
    pub skills_score: u32,
    pub experience_score: u32,
    pub found_skills: &'a [String],
    pub missing_skills: &'a [String],
}

pub fn generate_feedback(inputs: &FeedbackInputs<'_>) -> Feedback {
    let mut feedback = Feedback::default();

    if inputs.contact_score == 100 {
        feedback
            .strengths
            .push("Contact information is complete and easily accessible".to_string());
    } else {
        feedback
            .weaknesses
            .push("Contact information is missing or incomplete".to_string());
        feedback
            .suggestions
            .push("Add your phone number, email address, and LinkedIn profile".to_string());
    }

    if inputs.skills_score > 70 {
        feedback.strengths.push(format!(
            "Strong technical skills section with {} relevant skills",
            inputs.found_skills.len()
        ));
    } else {
        feedback
            .weaknesses
            .push("Skills section needs improvement".to_string());
        feedback
            .suggestions
            .push("Expand your skills section with relevant technical and soft skills".to_string());
    }

    if inputs.experience_score > 0 {
        feedback
            .strengths
            .push("Work experience is clearly documented".to_string());
    } else {
        feedback
            .weaknesses
            .push("Missing or unclear work experience section".to_string());
        feedback.suggestions.push(
            "Format your experience with clear job titles, companies, dates, and bullet points"
                .to_string(),
        );
    }

    if !inputs.missing_skills.is_empty() {
        let top: Vec<&str> = inputs
            .missing_skills
            .iter()
            .take(5)
            .map(String::as_str)
            .collect();
        feedback.suggestions.push(format!(
            "Consider adding these keywords from the job description: {}",
            top.join(", ")
        ));
    }

    feedback
        .suggestions
        .extend(GENERIC_SUGGESTIONS.iter().map(|s| s.to_string()));

    feedback
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Contact,
    Summary,
    Experience,
    Skills,
    Education,
}

/// Per-section feedback line, chosen by presence.
pub fn section_feedback(section: Section, present: bool, found_skills: &[String]) -> String {
    match (section, present) {
        (Section::Contact, true) => "Contact information is present and clear.".to_string(),
        (Section::Contact, false) => {
            "Missing contact information. Add phone, email, and location.".to_string()
        }
        (Section::Summary, true) => {
            "Summary section is present. Consider making it more impactful.".to_string()
        }
        (Section::Summary, false) => {
            "Add a professional summary or objective statement at the top.".to_string()
        }
        (Section::Experience, true) => "Experience section is well-structured.".to_string(),
        (Section::Experience, false) => {
            "Ensure your work experience is clearly listed with dates and achievements."
                .to_string()
        }
        (Section::Skills, true) => format!(
            "Good technical skills listed. Found: {}",
            found_skills.join(", ")
        ),
        (Section::Skills, false) => {
            "Add a dedicated skills section highlighting your technical and soft skills."
                .to_string()
        }
        (Section::Education, true) => "Education section is present.".to_string(),
        (Section::Education, false) => {
            "Include your educational background with degrees and institutions.".to_string()
        }
    }
}
