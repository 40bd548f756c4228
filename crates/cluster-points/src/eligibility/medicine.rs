use crate::scoring::{normalize, RawGrades, SubjectCode};

/// Sciences a medicine-track applicant must have graded.
pub const MEDICINE_SUBJECTS: [SubjectCode; 4] = [
    SubjectCode::Bio,
    SubjectCode::Che,
    SubjectCode::Mat,
    SubjectCode::Phy,
];

/// True when BIO, CHE, MAT and PHY all carry a valid grade.
///
/// Uses the strict scoring normalizer, so unknown keys and invalid tokens count as missing.
pub fn is_medicine_eligible(raw_grades: &RawGrades) -> bool {
    let scores = normalize(raw_grades);
    MEDICINE_SUBJECTS
        .iter()
        .all(|&subject| scores.contains(subject))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grades(entries: &[(&str, &str)]) -> RawGrades {
        entries
            .iter()
            .map(|(subject, grade)| (subject.to_string(), grade.to_string()))
            .collect()
    }

    #[test]
    fn requires_all_four_sciences() {
        let raw = grades(&[("BIO", "C"), ("CHE", "D-"), ("MAT", "E"), ("PHY", "a")]);
        assert!(is_medicine_eligible(&raw));

        let raw = grades(&[("BIO", "C"), ("CHE", "D-"), ("MAT", "E")]);
        assert!(!is_medicine_eligible(&raw));
    }

    #[test]
    fn invalid_token_counts_as_missing() {
        let raw = grades(&[("BIO", "C"), ("CHE", "B"), ("MAT", "B"), ("PHY", "F")]);
        assert!(!is_medicine_eligible(&raw));
    }

    #[test]
    fn other_subjects_do_not_matter() {
        let raw = grades(&[
            ("BIO", "A"),
            ("CHE", "A"),
            ("MAT", "A"),
            ("PHY", "A"),
            ("ENG", ""),
            ("XYZ", "A"),
        ]);
        assert!(is_medicine_eligible(&raw));
    }
}
