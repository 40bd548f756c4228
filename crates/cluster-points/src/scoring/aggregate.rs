use super::grades::ScoreMap;
use super::subjects::SubjectCode;

/// Subjects counted towards the overall strength term.
pub const RANKED_SUBJECTS: usize = 7;

/// Ceiling of the relevance term: four subjects at 12 points.
const MAX_RELEVANCE: f64 = 48.0;
/// Ceiling of the overall strength term: seven subjects at 12 points.
const MAX_TOTAL: f64 = 84.0;
const WEIGHT: f64 = 0.94;

/// Highest points among the present subjects of `subjects`, 0 when none was sat.
pub fn best(scores: &ScoreMap, subjects: &[SubjectCode]) -> u32 {
    subjects
        .iter()
        .filter_map(|&subject| scores.get(subject))
        .max()
        .map(u32::from)
        .unwrap_or(0)
}

/// The `n`-th highest points (1-indexed) among present subjects, 0 when fewer are present.
pub fn nth_best(scores: &ScoreMap, subjects: &[SubjectCode], n: usize) -> u32 {
    if n == 0 {
        return 0;
    }

    let mut values: Vec<u8> = subjects
        .iter()
        .filter_map(|&subject| scores.get(subject))
        .collect();
    values.sort_unstable_by(|a, b| b.cmp(a));
    values.get(n - 1).copied().map(u32::from).unwrap_or(0)
}

/// Sum of the seven best points across every subject, 0 with fewer than seven entries.
pub fn top7_total(scores: &ScoreMap) -> u32 {
    if scores.len() < RANKED_SUBJECTS {
        return 0;
    }

    let mut values: Vec<u8> = scores.values().collect();
    values.sort_unstable_by(|a, b| b.cmp(a));
    values
        .into_iter()
        .take(RANKED_SUBJECTS)
        .map(u32::from)
        .sum()
}

/// Blend relevance `r` and overall strength `t` into a cluster score rounded to 3 places.
pub fn cluster_formula(r: u32, t: u32) -> f64 {
    let blended = ((f64::from(r) / MAX_RELEVANCE) * (f64::from(t) / MAX_TOTAL)).sqrt();
    round_to_thousandths(blended * MAX_RELEVANCE * WEIGHT)
}

fn round_to_thousandths(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}
