//! Degree programme catalog: storage, CSV import and per-course qualification checks.

pub mod domain;
pub mod importer;
pub mod qualification;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    parse_requirements_text, parse_universities_and_cutoffs, Programme, ProgrammeForm,
    ProgrammeId, ProgrammeValidationError, UniversityCutoff,
};
pub use importer::{CatalogImportError, CatalogImporter, CatalogSummary, CourseCatalog};
pub use qualification::{check_course, CourseCheck};
pub use repository::{ProgrammeRecord, ProgrammeRepository, RepositoryError};
pub use router::{catalog_router, CourseCheckRequest};
pub use service::{CatalogService, CatalogServiceError, ImportReport};
