//! Content-quality heuristic: length, action verbs, quantified achievements
//! and professional phrasing. Feeds 30% of the overall score.

use std::sync::LazyLock;

use regex::Regex;

const BASE_SCORE: i32 = 50;

static ACTION_VERBS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(achieved|improved|developed|created|managed|led|increased|reduced|designed|implemented)",
    )
    .expect("static regex")
});

static NUMBERS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+").expect("static regex"));

static PROFESSIONAL_TERMS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(managed|lead|responsible|collaborated|implemented|optimized)")
        .expect("static regex")
});

static WHITESPACE_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("static regex"));

/// Number of pieces left after splitting on whitespace runs. Leading and
/// trailing whitespace each contribute an empty piece, and "" counts as one.
pub fn word_count(text: &str) -> usize {
    WHITESPACE_RUN.split(text).count()
}

pub fn content_quality(text: &str) -> u32 {
    let mut score = BASE_SCORE;

    let words = word_count(text);
    if words > 300 && words < 1000 {
        score += 10;
    } else if words < 200 {
        score -= 10;
    }

    if ACTION_VERBS.find_iter(text).count() > 5 {
        score += 15;
    }
    if NUMBERS.find_iter(text).count() > 3 {
        score += 15;
    }
    if PROFESSIONAL_TERMS.find_iter(text).count() > 3 {
        score += 10;
    }

    score.clamp(0, 100) as u32
}
