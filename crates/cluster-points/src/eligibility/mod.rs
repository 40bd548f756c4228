//! Subject-grade requirement checks for degree programmes.
//!
//! This path normalizes grades with [`normalize_lenient`], which keeps present-but-invalid
//! grade tokens (they compare as 0 points). Cluster scoring uses the strict
//! [`crate::scoring::normalize`] instead, which drops them.

mod medicine;
mod requirements;

pub use medicine::{is_medicine_eligible, MEDICINE_SUBJECTS};
pub use requirements::{check_requirements, normalize_lenient};

use serde::{Deserialize, Serialize};

use crate::scoring::Grade;

/// A programme requirement: `/`-separated subject alternatives and a minimum grade.
///
/// Both fields are kept as the host stored them. A minimum grade that does not parse makes
/// the checker skip the requirement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Requirement {
    pub subjects: String,
    pub minimum_grade: String,
}

impl Requirement {
    pub fn new(subjects: impl Into<String>, minimum_grade: impl Into<String>) -> Self {
        Self {
            subjects: subjects.into(),
            minimum_grade: minimum_grade.into(),
        }
    }
}

/// Merge requirements keyed by their subjects string.
///
/// A repeated key keeps its first position and takes the later minimum grade; new keys append.
pub fn merge_requirements(
    current: &mut Vec<Requirement>,
    next: impl IntoIterator<Item = Requirement>,
) {
    for requirement in next {
        match current
            .iter_mut()
            .find(|existing| existing.subjects == requirement.subjects)
        {
            Some(existing) => *existing = requirement,
            None => current.push(requirement),
        }
    }
}

/// Requirement the student did not meet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequirementFailure {
    pub requirement: String,
    pub required: Grade,
    /// Last alternative examined that the student sat, if any.
    pub student_subject: Option<String>,
    pub student_grade: Option<String>,
}

impl RequirementFailure {
    pub fn summary(&self) -> String {
        match (&self.student_subject, &self.student_grade) {
            (Some(subject), Some(grade)) => format!(
                "{} requires {} (best found: {} {})",
                self.requirement, self.required, subject, grade
            ),
            _ => format!(
                "{} requires {} (subject not taken)",
                self.requirement, self.required
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EligibilityVerdict {
    pub passed: bool,
    pub failed: Vec<RequirementFailure>,
}
