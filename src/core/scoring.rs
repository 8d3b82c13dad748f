use crate::core::skills::{matching_skills, normalize_skills};
use crate::models::{CandidateMatchWeights, JobMatchWeights, JobPosting, SeekerProfile};

/// Recency sub-score. Held constant, so posting age never changes the percentage.
pub const RECENCY_SCORE: f64 = 100.0;

/// Experience sub-score when levels are equal
pub const EXPERIENCE_MATCH_SCORE: f64 = 100.0;

/// Experience sub-score when levels differ
pub const EXPERIENCE_MISMATCH_SCORE: f64 = 50.0;

/// Sub-scores (each 0-100) and the blended percentage for one candidate
#[derive(Debug, Clone, PartialEq)]
pub struct MatchBreakdown {
    pub skills: f64,
    pub experience: f64,
    pub recency: Option<f64>,
    pub overall: u8,
    pub matching_skills: Vec<String>,
}

/// Score a job posting for a seeker
///
/// Scoring formula:
/// overall = round(
///     skills * 0.5 +        # share of seeker skills found in the posting
///     experience * 0.3 +    # 100 on equal level (missing counts as empty), 50 otherwise
///     recency * 0.2         # constant 100
/// )
pub fn score_job_for_seeker(
    seeker_skills: &[String],
    seeker_level: Option<&str>,
    job: &JobPosting,
    weights: &JobMatchWeights,
) -> MatchBreakdown {
    let job_skills = normalize_skills(job.skills.as_deref());
    let matched = matching_skills(seeker_skills, &job_skills);

    let skills = skill_score(matched.len(), seeker_skills.len());
    let experience = experience_score(seeker_level, job.level());

    let overall = blend(&[
        (skills, weights.skills),
        (experience, weights.experience),
        (RECENCY_SCORE, weights.recency),
    ]);

    MatchBreakdown {
        skills,
        experience,
        recency: Some(RECENCY_SCORE),
        overall,
        matching_skills: matched,
    }
}

/// Score a seeker profile for a job
///
/// Scoring formula:
/// overall = round(
///     skills * 0.7 +        # share of required skills the candidate has
///     experience * 0.3      # 100 on equal level, 50 otherwise
/// )
pub fn score_candidate_for_job(
    job_skills: &[String],
    job_level: Option<&str>,
    candidate: &SeekerProfile,
    weights: &CandidateMatchWeights,
) -> MatchBreakdown {
    let candidate_skills = normalize_skills(candidate.skills.as_deref());
    let matched = matching_skills(job_skills, &candidate_skills);

    let skills = skill_score(matched.len(), job_skills.len());
    let experience = experience_score(job_level, candidate.level());

    let overall = blend(&[
        (skills, weights.skills),
        (experience, weights.experience),
    ]);

    MatchBreakdown {
        skills,
        experience,
        recency: None,
        overall,
        matching_skills: matched,
    }
}

/// Percentage of reference skills that matched (0-100)
#[inline]
pub fn skill_score(matched: usize, total: usize) -> f64 {
    100.0 * matched as f64 / total.max(1) as f64
}

/// Full marks when levels are equal. A missing level scores as empty, so two
/// postings/profiles without a level are equal.
#[inline]
pub fn experience_score(a: Option<&str>, b: Option<&str>) -> f64 {
    if a.unwrap_or("") == b.unwrap_or("") {
        EXPERIENCE_MATCH_SCORE
    } else {
        EXPERIENCE_MISMATCH_SCORE
    }
}

/// Eligibility check: both levels present and equal. A missing level never
/// qualifies a posting.
#[inline]
pub fn levels_equal(a: Option<&str>, b: Option<&str>) -> bool {
    matches!((a, b), (Some(a), Some(b)) if a == b)
}

/// Weighted sum of sub-scores, rounded and clamped to 0-100
#[inline]
fn blend(parts: &[(f64, f64)]) -> u8 {
    let total: f64 = parts.iter().map(|(score, weight)| score * weight).sum();
    total.round().clamp(0.0, 100.0) as u8
}
