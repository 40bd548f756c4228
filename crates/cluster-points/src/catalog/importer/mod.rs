mod normalizer;
mod parser;

use std::collections::{BTreeMap, HashSet};
use std::io::Read;
use std::path::Path;

use serde::Serialize;
use tracing::debug;

use super::domain::{Programme, UniversityCutoff};
use crate::eligibility::merge_requirements;
use normalizer::{parse_cluster, parse_cutoff};
use parser::{parse_requirement_cell, CatalogRow};

const UNKNOWN_UNIVERSITY: &str = "Unknown University";

/// Programmes grouped by cluster id, in file order within each cluster.
pub type CourseCatalog = BTreeMap<u32, Vec<Programme>>;

#[derive(Debug)]
pub enum CatalogImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    Empty,
}

impl std::fmt::Display for CatalogImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogImportError::Io(err) => write!(f, "failed to read course catalog: {}", err),
            CatalogImportError::Csv(err) => write!(f, "invalid course catalog CSV: {}", err),
            CatalogImportError::Empty => {
                write!(f, "CSV did not produce a valid course catalog")
            }
        }
    }
}

impl std::error::Error for CatalogImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CatalogImportError::Io(err) => Some(err),
            CatalogImportError::Csv(err) => Some(err),
            CatalogImportError::Empty => None,
        }
    }
}

impl From<std::io::Error> for CatalogImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for CatalogImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// Counts reported after an import.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct CatalogSummary {
    pub clusters: usize,
    pub courses: usize,
    pub universities: usize,
}

impl CatalogSummary {
    pub fn of(catalog: &CourseCatalog) -> Self {
        let courses = catalog.values().map(Vec::len).sum();
        let universities = catalog
            .values()
            .flatten()
            .map(|programme| programme.universities.len())
            .sum();

        Self {
            clusters: catalog.len(),
            courses,
            universities,
        }
    }
}

/// Reads the placement body's course spreadsheet export.
///
/// A row carrying a course name and a positive cluster number starts a course; rows below it
/// without one add universities and requirements to that course.
pub struct CatalogImporter;

impl CatalogImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<CourseCatalog, CatalogImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<CourseCatalog, CatalogImportError> {
        let mut catalog = CourseCatalog::new();
        let mut current: Option<Programme> = None;

        for row in parser::parse_rows(reader)? {
            if row.is_blank() {
                continue;
            }

            let opens_course = if row.course_name.is_empty() {
                None
            } else {
                parse_cluster(&row.cluster)
            };
            if let Some(cluster) = opens_course {
                if let Some(done) = current.take() {
                    push_programme(&mut catalog, done);
                }
                current = Some(Programme {
                    name: row.course_name.clone(),
                    cluster,
                    requirements: Vec::new(),
                    universities: Vec::new(),
                });
            }

            let Some(programme) = current.as_mut() else {
                continue;
            };
            apply_row(programme, row);
        }

        if let Some(done) = current.take() {
            push_programme(&mut catalog, done);
        }

        if catalog.is_empty() {
            return Err(CatalogImportError::Empty);
        }

        debug!(summary = ?CatalogSummary::of(&catalog), "parsed course catalog");
        Ok(catalog)
    }
}

fn apply_row(programme: &mut Programme, row: CatalogRow) {
    if !row.requirements.is_empty() {
        merge_requirements(
            &mut programme.requirements,
            parse_requirement_cell(&row.requirements),
        );
    }

    if !row.university.is_empty() || !row.course_code.is_empty() || !row.cutoff.is_empty() {
        let name = if row.university.is_empty() {
            UNKNOWN_UNIVERSITY.to_string()
        } else {
            row.university
        };
        let course_code = (!row.course_code.is_empty()).then_some(row.course_code);

        programme.universities.push(UniversityCutoff {
            name,
            course_code,
            cutoff: parse_cutoff(&row.cutoff),
        });
    }
}

fn push_programme(catalog: &mut CourseCatalog, mut programme: Programme) {
    let mut seen = HashSet::new();
    programme.universities.retain(|university| {
        seen.insert((university.name.clone(), university.course_code.clone()))
    });
    catalog.entry(programme.cluster).or_default().push(programme);
}
