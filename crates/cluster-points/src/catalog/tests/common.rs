use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::Utc;
use serde_json::Value;

use crate::catalog::domain::{Programme, ProgrammeForm, ProgrammeId, UniversityCutoff};
use crate::catalog::repository::{ProgrammeRecord, ProgrammeRepository, RepositoryError};
use crate::catalog::CatalogService;
use crate::eligibility::Requirement;
use crate::scoring::RawGrades;

#[derive(Default)]
pub(super) struct MemoryRepository {
    records: Mutex<BTreeMap<ProgrammeId, ProgrammeRecord>>,
}

impl ProgrammeRepository for MemoryRepository {
    fn insert(&self, programme: Programme) -> Result<ProgrammeRecord, RepositoryError> {
        let mut guard = self.records.lock().unwrap();
        let next = guard.keys().next_back().map_or(1, |id| id.0 + 1);
        let record = ProgrammeRecord {
            id: ProgrammeId(next),
            programme,
            updated_at: Utc::now(),
        };
        guard.insert(record.id, record.clone());
        Ok(record)
    }

    fn replace(
        &self,
        id: ProgrammeId,
        programme: Programme,
    ) -> Result<ProgrammeRecord, RepositoryError> {
        let mut guard = self.records.lock().unwrap();
        let record = guard.get_mut(&id).ok_or(RepositoryError::NotFound)?;
        record.programme = programme;
        record.updated_at = Utc::now();
        Ok(record.clone())
    }

    fn remove(&self, id: ProgrammeId) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().unwrap();
        guard.remove(&id).map(|_| ()).ok_or(RepositoryError::NotFound)
    }

    fn fetch(&self, id: ProgrammeId) -> Result<Option<ProgrammeRecord>, RepositoryError> {
        Ok(self.records.lock().unwrap().get(&id).cloned())
    }

    fn list(&self) -> Result<Vec<ProgrammeRecord>, RepositoryError> {
        Ok(self.records.lock().unwrap().values().cloned().collect())
    }
}

pub(super) struct UnavailableRepository;

impl ProgrammeRepository for UnavailableRepository {
    fn insert(&self, _programme: Programme) -> Result<ProgrammeRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("offline".to_string()))
    }

    fn replace(
        &self,
        _id: ProgrammeId,
        _programme: Programme,
    ) -> Result<ProgrammeRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("offline".to_string()))
    }

    fn remove(&self, _id: ProgrammeId) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("offline".to_string()))
    }

    fn fetch(&self, _id: ProgrammeId) -> Result<Option<ProgrammeRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("offline".to_string()))
    }

    fn list(&self) -> Result<Vec<ProgrammeRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("offline".to_string()))
    }
}

pub(super) fn build_service() -> Arc<CatalogService<MemoryRepository>> {
    Arc::new(CatalogService::new(Arc::new(MemoryRepository::default())))
}

pub(super) fn medicine() -> Programme {
    Programme {
        name: "Bachelor of Medicine and Surgery".to_string(),
        cluster: 13,
        requirements: vec![
            Requirement::new("BIO", "B"),
            Requirement::new("CHE", "B"),
            Requirement::new("MAT/PHY", "B"),
            Requirement::new("ENG/KIS", "B"),
        ],
        universities: vec![
            UniversityCutoff {
                name: "University of Nairobi".to_string(),
                course_code: Some("1263101".to_string()),
                cutoff: 44.1,
            },
            UniversityCutoff {
                name: "Moi University".to_string(),
                course_code: Some("1249101".to_string()),
                cutoff: 36.0,
            },
        ],
    }
}

pub(super) fn law_form() -> ProgrammeForm {
    ProgrammeForm {
        name: "Bachelor of Laws".to_string(),
        cluster: 1,
        requirements: "ENG: B+\nKIS: B".to_string(),
        universities: "University of Nairobi\nKenyatta University".to_string(),
        cutoffs: "43.5\n41".to_string(),
    }
}

pub(super) fn sample_grades() -> RawGrades {
    [
        ("ENG", "B+"),
        ("MAT", "A"),
        ("PHY", "A"),
        ("CHE", "B"),
        ("BIO", "B-"),
        ("GEO", "C+"),
        ("CRE", "B"),
    ]
    .into_iter()
    .map(|(subject, grade)| (subject.to_string(), grade.to_string()))
    .collect()
}

pub(super) const CATALOG_CSV: &str = "\
COURSE NAME,CLUSTER,COURSE CODE,UNIVERSITY,CUT-OFF POINTS,MINIMUM SUBJECT REQUIREMENTS
Bachelor of Science (Nursing),13,1111,Kenyatta University,40.5,BIO: C+; CHE: C+
,,1112,Egerton University,37.0,
Bachelor of Commerce,21,2222,Strathmore University,41.2,MAT: C+
";

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("body bytes");
    serde_json::from_slice(&body).expect("json body")
}
