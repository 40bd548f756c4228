use super::normalizer::{is_placeholder, normalize_cell};
use crate::eligibility::Requirement;
use serde::{Deserialize, Deserializer};
use std::io::Read;

#[derive(Debug, Default)]
pub(crate) struct CatalogRow {
    pub(crate) course_name: String,
    pub(crate) cluster: String,
    pub(crate) course_code: String,
    pub(crate) university: String,
    pub(crate) cutoff: String,
    pub(crate) requirements: String,
}

impl CatalogRow {
    pub(crate) fn is_blank(&self) -> bool {
        [
            &self.course_name,
            &self.cluster,
            &self.course_code,
            &self.university,
            &self.cutoff,
            &self.requirements,
        ]
        .iter()
        .all(|cell| cell.is_empty())
    }
}

pub(crate) fn parse_rows<R: Read>(reader: R) -> Result<Vec<CatalogRow>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);
    let mut rows = Vec::new();

    for record in csv_reader.deserialize::<RawCatalogRow>() {
        let raw = record?;
        rows.push(CatalogRow {
            course_name: cell(raw.course_name),
            cluster: cell(raw.cluster),
            course_code: cell(raw.course_code),
            university: cell(raw.university),
            cutoff: cell(raw.cutoff),
            requirements: cell(raw.requirements),
        });
    }

    Ok(rows)
}

fn cell(value: Option<String>) -> String {
    value.as_deref().map(normalize_cell).unwrap_or_default()
}

#[derive(Debug, Deserialize)]
struct RawCatalogRow {
    #[serde(rename = "COURSE NAME", default, deserialize_with = "lenient_string")]
    course_name: Option<String>,
    #[serde(rename = "CLUSTER", default, deserialize_with = "lenient_string")]
    cluster: Option<String>,
    #[serde(rename = "COURSE CODE", default, deserialize_with = "lenient_string")]
    course_code: Option<String>,
    #[serde(rename = "UNIVERSITY", default, deserialize_with = "lenient_string")]
    university: Option<String>,
    #[serde(rename = "CUT-OFF POINTS", default, deserialize_with = "lenient_string")]
    cutoff: Option<String>,
    #[serde(
        rename = "MINIMUM SUBJECT REQUIREMENTS",
        default,
        deserialize_with = "lenient_string"
    )]
    requirements: Option<String>,
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

/// Split a requirements cell on newlines or `;` into `Subject: GRADE` entries.
pub(crate) fn parse_requirement_cell(value: &str) -> Vec<Requirement> {
    let cleaned = normalize_cell(value);
    if cleaned.is_empty() || is_placeholder(&cleaned) {
        return Vec::new();
    }

    cleaned
        .split(['\n', ';'])
        .map(str::trim)
        .filter(|entry| !entry.is_empty() && !is_placeholder(entry))
        .filter_map(|entry| {
            let (subject, grade) = entry.split_once(':')?;
            let subject = subject.trim();
            let grade = grade.trim().to_uppercase();
            if subject.is_empty() || grade.is_empty() || grade == "-" {
                return None;
            }
            Some(Requirement::new(subject, grade))
        })
        .collect()
}
