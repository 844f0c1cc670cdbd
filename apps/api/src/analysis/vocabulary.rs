//! Skill vocabulary, the single table of recognised technical terms.
//!
//! The analyzer scans resumes against the `Core` tier; the matcher scans job
//! postings against `Core` and `Extended` together. Bump `VOCABULARY_VERSION`
//! whenever a term is added, removed or reordered, since stored analyses are
//! only comparable within one version.

use std::sync::LazyLock;

use regex::Regex;

pub const VOCABULARY_VERSION: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    /// Terms the analyzer looks for in resumes.
    Core,
    /// Terms only recognised in job postings.
    Extended,
}

#[derive(Debug, Clone, Copy)]
pub struct SkillTerm {
    pub term: &'static str,
    pub tier: Tier,
}

const fn core(term: &'static str) -> SkillTerm {
    SkillTerm {
        term,
        tier: Tier::Core,
    }
}

const fn extended(term: &'static str) -> SkillTerm {
    SkillTerm {
        term,
        tier: Tier::Extended,
    }
}

/// Ordered vocabulary. Scan results always follow this order.
pub const SKILL_VOCABULARY: &[SkillTerm] = &[
    core("javascript"),
    core("python"),
    core("java"),
    core("react"),
    core("node"),
    core("typescript"),
    core("sql"),
    core("aws"),
    core("docker"),
    core("kubernetes"),
    core("git"),
    core("agile"),
    core("scrum"),
    core("machine learning"),
    core("ai"),
    core("data science"),
    core("web development"),
    core("mobile development"),
    core("devops"),
    core("cloud computing"),
    core("databases"),
    extended("html"),
    extended("css"),
    extended("angular"),
    extended("vue"),
    extended("mongodb"),
    extended("postgresql"),
    extended("mysql"),
    extended("azure"),
    extended("gcp"),
    extended("terraform"),
    extended("ci/cd"),
    extended("microservices"),
    extended("api"),
];

/// Which part of the vocabulary a scan uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    CoreOnly,
    All,
}

impl Scope {
    fn includes(self, tier: Tier) -> bool {
        match self {
            Scope::CoreOnly => tier == Tier::Core,
            Scope::All => true,
        }
    }
}

pub fn terms(scope: Scope) -> impl Iterator<Item = &'static str> {
    SKILL_VOCABULARY
        .iter()
        .filter(move |t| scope.includes(t.tier))
        .map(|t| t.term)
}

/// Returns every term occurring anywhere in `text` as a case-insensitive
/// substring. "java" therefore also hits "javascript"; that is accepted.
pub fn scan_substrings(text: &str, scope: Scope) -> Vec<String> {
    let lower = text.to_lowercase();
    terms(scope)
        .filter(|term| lower.contains(term))
        .map(String::from)
        .collect()
}

static WORD_PATTERNS: LazyLock<Vec<(&'static str, Regex)>> = LazyLock::new(|| {
    SKILL_VOCABULARY
        .iter()
        .map(|t| {
            let pattern = format!(r"(?i)\b{}\b", regex::escape(t.term));
            let re = Regex::new(&pattern).expect("vocabulary terms are valid regex literals");
            (t.term, re)
        })
        .collect()
});

/// Returns every term occurring in `text` delimited by word boundaries.
pub fn scan_words(text: &str, scope: Scope) -> Vec<String> {
    SKILL_VOCABULARY
        .iter()
        .zip(WORD_PATTERNS.iter())
        .filter(|(t, _)| scope.includes(t.tier))
        .filter(|(_, (_, re))| re.is_match(text))
        .map(|(_, (term, _))| term.to_string())
        .collect()
}
