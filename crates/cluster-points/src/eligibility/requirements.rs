use std::collections::BTreeMap;

use super::{merge_requirements, EligibilityVerdict, Requirement, RequirementFailure};
use crate::scoring::{resolve_subject_name, Grade, RawGrades};

/// Uppercase and trim both keys and values, dropping blank grades.
///
/// Unlike the scoring normalizer, unknown subjects and invalid grade tokens are kept.
pub fn normalize_lenient(raw_grades: &RawGrades) -> BTreeMap<String, String> {
    raw_grades
        .iter()
        .filter_map(|(subject, grade)| {
            let grade = grade.trim();
            if grade.is_empty() {
                return None;
            }
            Some((subject.trim().to_uppercase(), grade.to_uppercase()))
        })
        .collect()
}

fn grade_points(token: &str) -> u8 {
    Grade::parse(token).map(Grade::points).unwrap_or(0)
}

/// Check a student's grades against a programme's requirements, in the given order.
///
/// Requirements behave as a map keyed by subjects string: a repeated key is checked once, at
/// its first position, against its last minimum grade.
pub fn check_requirements(
    raw_grades: &RawGrades,
    requirements: &[Requirement],
) -> EligibilityVerdict {
    let grades = normalize_lenient(raw_grades);
    let mut keyed = Vec::with_capacity(requirements.len());
    merge_requirements(&mut keyed, requirements.iter().cloned());
    let mut failed = Vec::new();

    for requirement in &keyed {
        let Some(required) = Grade::parse(&requirement.minimum_grade.trim().to_uppercase()) else {
            continue;
        };

        let mut met = false;
        let mut student_subject = None;
        let mut student_grade = None;

        for subject in requirement.subjects.split('/').map(resolve_subject_name) {
            let Some(grade) = grades.get(&subject) else {
                continue;
            };
            if grade_points(grade) >= required.points() {
                met = true;
                break;
            }
            student_grade = Some(grade.clone());
            student_subject = Some(subject);
        }

        if !met {
            failed.push(RequirementFailure {
                requirement: requirement.subjects.clone(),
                required,
                student_subject,
                student_grade,
            });
        }
    }

    EligibilityVerdict {
        passed: failed.is_empty(),
        failed,
    }
}
