use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use super::domain::{Programme, ProgrammeForm, ProgrammeId, ProgrammeValidationError};
use super::importer::CourseCatalog;
use super::qualification::{check_course, CourseCheck};
use super::repository::{ProgrammeRecord, ProgrammeRepository, RepositoryError};
use crate::scoring::{RawGrades, CLUSTER_IDS};

/// Service composing programme validation, storage and course checks.
pub struct CatalogService<R> {
    repository: Arc<R>,
}

/// Result of a bulk catalog import.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ImportReport {
    pub imported: usize,
    pub skipped: usize,
}

impl<R> CatalogService<R>
where
    R: ProgrammeRepository + 'static,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Validate and store a programme entered through the admin form.
    pub fn create(&self, form: ProgrammeForm) -> Result<ProgrammeRecord, CatalogServiceError> {
        self.add(form.into_programme()?)
    }

    /// Store a programme under its trimmed name.
    pub fn add(&self, mut programme: Programme) -> Result<ProgrammeRecord, CatalogServiceError> {
        programme.name = programme.name.trim().to_string();
        programme.validate()?;
        let record = self.repository.insert(programme)?;
        info!(id = record.id.0, name = %record.programme.name, cluster = record.programme.cluster, "programme added");
        Ok(record)
    }

    /// Replace name, cluster, requirements and universities of an existing programme.
    pub fn update(
        &self,
        id: ProgrammeId,
        form: ProgrammeForm,
    ) -> Result<ProgrammeRecord, CatalogServiceError> {
        let programme = form.into_programme()?;
        let record = self.repository.replace(id, programme)?;
        info!(id = id.0, "programme updated");
        Ok(record)
    }

    pub fn delete(&self, id: ProgrammeId) -> Result<(), CatalogServiceError> {
        self.repository.remove(id)?;
        info!(id = id.0, "programme deleted");
        Ok(())
    }

    pub fn get(&self, id: ProgrammeId) -> Result<ProgrammeRecord, CatalogServiceError> {
        let record = self
            .repository
            .fetch(id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(record)
    }

    /// Programmes keyed by cluster. Every cluster id appears, possibly with no programmes.
    pub fn by_cluster(&self) -> Result<BTreeMap<u32, Vec<ProgrammeRecord>>, CatalogServiceError> {
        let mut grouped: BTreeMap<u32, Vec<ProgrammeRecord>> =
            CLUSTER_IDS.map(|cluster| (cluster, Vec::new())).collect();

        for record in self.repository.list()? {
            if let Some(bucket) = grouped.get_mut(&record.programme.cluster) {
                bucket.push(record);
            }
        }

        Ok(grouped)
    }

    /// Programme names per cluster, for listing alongside computed cluster points.
    pub fn names_by_cluster(&self) -> Result<BTreeMap<u32, Vec<String>>, CatalogServiceError> {
        Ok(self
            .by_cluster()?
            .into_iter()
            .map(|(cluster, records)| {
                let names = records
                    .into_iter()
                    .map(|record| record.programme.name)
                    .collect();
                (cluster, names)
            })
            .collect())
    }

    /// Store every programme of a parsed catalog, skipping ones that fail validation.
    pub fn import(&self, catalog: CourseCatalog) -> Result<ImportReport, CatalogServiceError> {
        let mut report = ImportReport::default();

        for programme in catalog.into_values().flatten() {
            if let Err(err) = programme.validate() {
                warn!(name = %programme.name, cluster = programme.cluster, %err, "skipping programme");
                report.skipped += 1;
                continue;
            }
            self.repository.insert(programme)?;
            report.imported += 1;
        }

        info!(imported = report.imported, skipped = report.skipped, "course catalog imported");
        Ok(report)
    }

    /// Check a student against the first programme stored under `name` in `cluster`.
    pub fn check_course(
        &self,
        cluster: u32,
        name: &str,
        points: f64,
        grades: &RawGrades,
    ) -> Result<CourseCheck, CatalogServiceError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ProgrammeValidationError::MissingName.into());
        }

        let record = self
            .repository
            .list()?
            .into_iter()
            .find(|record| record.programme.cluster == cluster && record.programme.name == name)
            .ok_or_else(|| CatalogServiceError::CourseNotFound {
                name: name.to_string(),
                cluster,
            })?;

        Ok(check_course(&record.programme, grades, points))
    }
}

/// Error raised by the catalog service.
#[derive(Debug, thiserror::Error)]
pub enum CatalogServiceError {
    #[error(transparent)]
    Invalid(#[from] ProgrammeValidationError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error("course '{name}' not found for cluster {cluster}")]
    CourseNotFound { name: String, cluster: u32 },
}
