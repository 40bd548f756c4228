use serde::{Deserialize, Serialize};

use super::domain::{Programme, UniversityCutoff};
use crate::eligibility::{check_requirements, EligibilityVerdict};
use crate::scoring::RawGrades;

/// Outcome of checking a student's points and grades against one programme.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseCheck {
    pub programme: String,
    pub cluster: u32,
    pub points: f64,
    pub subject_check: EligibilityVerdict,
    pub qualified: Vec<UniversityCutoff>,
    pub not_qualified: Vec<UniversityCutoff>,
}

impl CourseCheck {
    pub fn summary(&self) -> String {
        if !self.subject_check.passed {
            return format!(
                "{}: subject requirements not met ({} failed)",
                self.programme,
                self.subject_check.failed.len()
            );
        }
        format!(
            "{}: qualifies at {} of {} universities",
            self.programme,
            self.qualified.len(),
            self.qualified.len() + self.not_qualified.len()
        )
    }
}

/// Split a programme's universities by cut-off, but only once subject requirements pass.
pub fn check_course(programme: &Programme, raw_grades: &RawGrades, points: f64) -> CourseCheck {
    let subject_check = check_requirements(raw_grades, &programme.requirements);

    let (qualified, not_qualified) = if subject_check.passed {
        programme
            .universities
            .iter()
            .cloned()
            .partition(|university| points >= university.cutoff)
    } else {
        (Vec::new(), Vec::new())
    };

    CourseCheck {
        programme: programme.name.clone(),
        cluster: programme.cluster,
        points,
        subject_check,
        qualified,
        not_qualified,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eligibility::Requirement;

    fn programme() -> Programme {
        Programme {
            name: "Bachelor of Science (Physics)".to_string(),
            cluster: 5,
            requirements: vec![
                Requirement::new("MAT", "C+"),
                Requirement::new("PHY/CHE", "C+"),
            ],
            universities: vec![
                UniversityCutoff {
                    name: "University of Nairobi".to_string(),
                    course_code: Some("1263107".to_string()),
                    cutoff: 38.5,
                },
                UniversityCutoff {
                    name: "Maseno University".to_string(),
                    course_code: None,
                    cutoff: 30.0,
                },
            ],
        }
    }

    fn grades(entries: &[(&str, &str)]) -> RawGrades {
        entries
            .iter()
            .map(|(subject, grade)| (subject.to_string(), grade.to_string()))
            .collect()
    }

    #[test]
    fn splits_universities_on_cutoff_inclusive() {
        let check = check_course(&programme(), &grades(&[("MAT", "B"), ("CHE", "B")]), 30.0);

        assert!(check.subject_check.passed);
        assert_eq!(check.qualified.len(), 1);
        assert_eq!(check.qualified[0].name, "Maseno University");
        assert_eq!(check.not_qualified[0].name, "University of Nairobi");
        assert_eq!(
            check.summary(),
            "Bachelor of Science (Physics): qualifies at 1 of 2 universities"
        );
    }

    #[test]
    fn failed_subjects_leave_both_lists_empty() {
        let check = check_course(&programme(), &grades(&[("MAT", "D")]), 45.0);

        assert!(!check.subject_check.passed);
        assert!(check.qualified.is_empty());
        assert!(check.not_qualified.is_empty());
        assert_eq!(check.subject_check.failed.len(), 2);
    }

    #[test]
    fn form_with_repeated_subject_checks_its_last_grade() {
        let programme = crate::catalog::ProgrammeForm {
            name: "Bachelor of Education (Science)".to_string(),
            cluster: 5,
            requirements: "MAT: A\nMAT: C".to_string(),
            ..Default::default()
        }
        .into_programme()
        .expect("form is valid");

        let check = check_course(&programme, &grades(&[("MAT", "B")]), 40.0);
        assert!(check.subject_check.passed);
    }
}
