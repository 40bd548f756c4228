use serde::{Deserialize, Serialize};

use crate::eligibility::{merge_requirements, Requirement};
use crate::scoring::{Grade, CLUSTER_IDS};

/// Identifier assigned by the programme store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProgrammeId(pub u64);

/// Published cut-off for one university offering a programme.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UniversityCutoff {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub course_code: Option<String>,
    pub cutoff: f64,
}

/// Degree programme scored under a single cluster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Programme {
    pub name: String,
    pub cluster: u32,
    #[serde(default)]
    pub requirements: Vec<Requirement>,
    #[serde(default)]
    pub universities: Vec<UniversityCutoff>,
}

impl Programme {
    pub fn validate(&self) -> Result<(), ProgrammeValidationError> {
        if self.name.trim().is_empty() {
            return Err(ProgrammeValidationError::MissingName);
        }
        if !CLUSTER_IDS.contains(&self.cluster) {
            return Err(ProgrammeValidationError::ClusterOutOfRange(self.cluster));
        }
        Ok(())
    }

    /// Requirements rendered back into the `Subject: GRADE` text form.
    pub fn requirements_text(&self) -> String {
        self.requirements
            .iter()
            .map(|requirement| format!("{}: {}", requirement.subjects, requirement.minimum_grade))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProgrammeValidationError {
    #[error("course name is required")]
    MissingName,
    #[error("cluster must be between 1 and 20 (found {0})")]
    ClusterOutOfRange(u32),
}

/// Admin entry form: free-text requirement lines and parallel university/cut-off lines.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgrammeForm {
    pub name: String,
    pub cluster: u32,
    #[serde(default)]
    pub requirements: String,
    #[serde(default)]
    pub universities: String,
    #[serde(default)]
    pub cutoffs: String,
}

impl ProgrammeForm {
    pub fn into_programme(self) -> Result<Programme, ProgrammeValidationError> {
        let programme = Programme {
            name: self.name.trim().to_string(),
            cluster: self.cluster,
            requirements: parse_requirements_text(&self.requirements),
            universities: parse_universities_and_cutoffs(&self.universities, &self.cutoffs),
        };
        programme.validate()?;
        Ok(programme)
    }
}

/// Parse one `Subject: GRADE` requirement per line.
///
/// Lines without a colon, with an empty subject, or with a grade outside the twelve-step
/// scale are dropped. A subject listed twice keeps the grade from its last line.
pub fn parse_requirements_text(text: &str) -> Vec<Requirement> {
    let parsed = text.lines().filter_map(|line| {
        let (subject, grade) = line.trim().split_once(':')?;
        let subject = subject.trim();
        let grade = grade.trim().to_uppercase();
        if subject.is_empty() || Grade::parse(&grade).is_none() {
            return None;
        }
        Some(Requirement::new(subject, grade))
    });

    let mut requirements = Vec::new();
    merge_requirements(&mut requirements, parsed);
    requirements
}

/// Pair university names with cut-offs line by line.
///
/// Blank names and cut-offs that are not numbers are skipped; surplus lines on either side
/// are ignored.
pub fn parse_universities_and_cutoffs(names: &str, cutoffs: &str) -> Vec<UniversityCutoff> {
    names
        .lines()
        .zip(cutoffs.lines())
        .filter_map(|(name, cutoff)| {
            let name = name.trim();
            if name.is_empty() {
                return None;
            }
            let cutoff = cutoff.trim().parse::<f64>().ok()?;
            Some(UniversityCutoff {
                name: name.to_string(),
                course_code: None,
                cutoff,
            })
        })
        .collect()
}
