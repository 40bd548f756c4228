use chrono::Utc;
use cluster_points::catalog::{
    CatalogImporter, CatalogService, ImportReport, Programme, ProgrammeId, ProgrammeRecord,
    ProgrammeRepository, RepositoryError,
};
use cluster_points::error::AppError;
use cluster_points::scoring::RawGrades;
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::info;

pub(crate) type Catalog = CatalogService<InMemoryProgrammeRepository>;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) catalog: Arc<Catalog>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryProgrammeRepository {
    records: Arc<Mutex<BTreeMap<ProgrammeId, ProgrammeRecord>>>,
    next_id: Arc<AtomicU64>,
}

impl InMemoryProgrammeRepository {
    fn records(
        &self,
    ) -> Result<MutexGuard<'_, BTreeMap<ProgrammeId, ProgrammeRecord>>, RepositoryError> {
        self.records
            .lock()
            .map_err(|_| RepositoryError::Unavailable("programme store lock poisoned".to_string()))
    }
}

impl ProgrammeRepository for InMemoryProgrammeRepository {
    fn insert(&self, programme: Programme) -> Result<ProgrammeRecord, RepositoryError> {
        let mut guard = self.records()?;
        let id = ProgrammeId(self.next_id.fetch_add(1, Ordering::Relaxed) + 1);
        let record = ProgrammeRecord {
            id,
            programme,
            updated_at: Utc::now(),
        };
        guard.insert(id, record.clone());
        Ok(record)
    }

    fn replace(
        &self,
        id: ProgrammeId,
        programme: Programme,
    ) -> Result<ProgrammeRecord, RepositoryError> {
        let mut guard = self.records()?;
        let record = guard.get_mut(&id).ok_or(RepositoryError::NotFound)?;
        record.programme = programme;
        record.updated_at = Utc::now();
        Ok(record.clone())
    }

    fn remove(&self, id: ProgrammeId) -> Result<(), RepositoryError> {
        let mut guard = self.records()?;
        match guard.remove(&id) {
            Some(_) => Ok(()),
            None => Err(RepositoryError::NotFound),
        }
    }

    fn fetch(&self, id: ProgrammeId) -> Result<Option<ProgrammeRecord>, RepositoryError> {
        Ok(self.records()?.get(&id).cloned())
    }

    fn list(&self) -> Result<Vec<ProgrammeRecord>, RepositoryError> {
        Ok(self.records()?.values().cloned().collect())
    }
}

pub(crate) fn in_memory_catalog() -> Arc<Catalog> {
    Arc::new(CatalogService::new(Arc::new(
        InMemoryProgrammeRepository::default(),
    )))
}

/// Load a course spreadsheet export into the catalog.
pub(crate) fn seed_catalog(catalog: &Catalog, path: &Path) -> Result<ImportReport, AppError> {
    let parsed = CatalogImporter::from_path(path)?;
    let report = catalog.import(parsed)?;
    info!(path = %path.display(), imported = report.imported, "catalog seeded");
    Ok(report)
}

/// Parse a `CODE=GRADE` command-line pair.
pub(crate) fn parse_grade_pair(raw: &str) -> Result<(String, String), String> {
    let (subject, grade) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected CODE=GRADE, got '{raw}'"))?;
    let subject = subject.trim();
    let grade = grade.trim();
    if subject.is_empty() || grade.is_empty() {
        return Err(format!("expected CODE=GRADE, got '{raw}'"));
    }
    Ok((subject.to_uppercase(), grade.to_string()))
}

pub(crate) fn grades_from_pairs(pairs: Vec<(String, String)>) -> RawGrades {
    pairs.into_iter().collect()
}
