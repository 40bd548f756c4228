//! Cluster points computation.
//!
//! Raw grade sheets are normalized into a [`ScoreMap`], then scored against the static
//! cluster table in [`rules`]. Every function here is pure; degenerate input scores 0.0.

pub mod aggregate;
pub mod grades;
pub mod rules;
pub mod subjects;

use std::collections::BTreeMap;
use std::ops::RangeInclusive;

pub use aggregate::{best, cluster_formula, nth_best, top7_total, RANKED_SUBJECTS};
pub use grades::{normalize, Grade, RawGrades, ScoreMap};
pub use rules::{rule_for, ClusterRule, Gate, CLUSTER_RULES};
pub use subjects::{
    resolve_subject_name, subject_catalog, SubjectCode, SubjectEntry, SubjectGroup,
    UnknownSubject,
};

/// Valid cluster identifiers.
pub const CLUSTER_IDS: RangeInclusive<u32> = 1..=20;

/// Cluster id to score, ordered by id.
pub type ClusterResults = BTreeMap<u32, f64>;

/// Score one cluster for an already-normalized score map.
///
/// Returns 0.0 when fewer than seven subjects are graded, when the cluster gate is not met,
/// or when `cluster` is outside 1..=20.
pub fn score(cluster: u32, scores: &ScoreMap) -> f64 {
    if scores.len() < RANKED_SUBJECTS {
        return 0.0;
    }

    let Some(rule) = rule_for(cluster) else {
        return 0.0;
    };

    if !rule.gate.admits(scores) {
        return 0.0;
    }

    cluster_formula(rule.relevance(scores), top7_total(scores))
}

/// Normalize `raw_grades` and score a single cluster.
pub fn compute_cluster(cluster: u32, raw_grades: &RawGrades) -> f64 {
    score(cluster, &normalize(raw_grades))
}

/// Score every cluster from 1 to 20.
pub fn compute_all_clusters(raw_grades: &RawGrades) -> ClusterResults {
    let scores = normalize(raw_grades);
    CLUSTER_IDS
        .map(|cluster| (cluster, score(cluster, &scores)))
        .collect()
}
