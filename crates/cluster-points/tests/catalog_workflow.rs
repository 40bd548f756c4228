use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use chrono::Utc;
use cluster_points::catalog::{
    CatalogImporter, CatalogService, CatalogSummary, Programme, ProgrammeId, ProgrammeRecord,
    ProgrammeRepository, RepositoryError,
};
use cluster_points::scoring::{compute_cluster, RawGrades};

#[derive(Default)]
struct VecRepository {
    records: Mutex<BTreeMap<ProgrammeId, ProgrammeRecord>>,
}

impl ProgrammeRepository for VecRepository {
    fn insert(&self, programme: Programme) -> Result<ProgrammeRecord, RepositoryError> {
        let mut records = self.records.lock().unwrap();
        let id = ProgrammeId(records.len() as u64 + 1);
        let record = ProgrammeRecord {
            id,
            programme,
            updated_at: Utc::now(),
        };
        records.insert(id, record.clone());
        Ok(record)
    }

    fn replace(
        &self,
        id: ProgrammeId,
        programme: Programme,
    ) -> Result<ProgrammeRecord, RepositoryError> {
        let mut records = self.records.lock().unwrap();
        let record = records.get_mut(&id).ok_or(RepositoryError::NotFound)?;
        record.programme = programme;
        Ok(record.clone())
    }

    fn remove(&self, id: ProgrammeId) -> Result<(), RepositoryError> {
        self.records
            .lock()
            .unwrap()
            .remove(&id)
            .map(|_| ())
            .ok_or(RepositoryError::NotFound)
    }

    fn fetch(&self, id: ProgrammeId) -> Result<Option<ProgrammeRecord>, RepositoryError> {
        Ok(self.records.lock().unwrap().get(&id).cloned())
    }

    fn list(&self) -> Result<Vec<ProgrammeRecord>, RepositoryError> {
        Ok(self.records.lock().unwrap().values().cloned().collect())
    }
}

const CATALOG: &str = "\
COURSE NAME,CLUSTER,COURSE CODE,UNIVERSITY,CUT-OFF POINTS,MINIMUM SUBJECT REQUIREMENTS
Bachelor of Science (Civil Engineering),7,1263C07,University of Nairobi,\"42.511\",\"MAT: B; PHY: B
CHE: C+\"
,,1249C07,Moi University,38.2,
,,1111C07,Technical University of Kenya,39.017,
Bachelor of Pharmacy,13,1263P13,University of Nairobi,41.9,BIO: B+; CHE: B+
,,,,,MAT/PHY: B
";

fn sample_grades() -> RawGrades {
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

#[test]
fn imported_catalog_drives_course_checks() {
    let catalog = CatalogImporter::from_reader(CATALOG.as_bytes()).expect("catalog parses");
    assert_eq!(
        CatalogSummary::of(&catalog),
        CatalogSummary {
            clusters: 2,
            courses: 2,
            universities: 4,
        }
    );

    let service = CatalogService::new(Arc::new(VecRepository::default()));
    let report = service.import(catalog).expect("import succeeds");
    assert_eq!(report.imported, 2);

    let grades = sample_grades();
    let points = compute_cluster(7, &grades);
    assert_eq!(points, 39.017);

    let check = service
        .check_course(7, "Bachelor of Science (Civil Engineering)", points, &grades)
        .expect("course found");
    assert!(check.subject_check.passed);
    let qualified: Vec<&str> = check.qualified.iter().map(|u| u.name.as_str()).collect();
    assert_eq!(
        qualified,
        vec!["Moi University", "Technical University of Kenya"]
    );
    assert_eq!(check.not_qualified.len(), 1);
    assert_eq!(check.not_qualified[0].cutoff, 42.511);
}

#[test]
fn continuation_requirements_apply_to_pharmacy() {
    let catalog = CatalogImporter::from_reader(CATALOG.as_bytes()).expect("catalog parses");
    let service = CatalogService::new(Arc::new(VecRepository::default()));
    service.import(catalog).expect("import succeeds");

    let grades = sample_grades();
    let check = service
        .check_course(13, "Bachelor of Pharmacy", compute_cluster(13, &grades), &grades)
        .expect("course found");

    assert!(!check.subject_check.passed);
    let failed: Vec<&str> = check
        .subject_check
        .failed
        .iter()
        .map(|failure| failure.requirement.as_str())
        .collect();
    assert_eq!(failed, vec!["BIO", "CHE"]);
    assert!(check.qualified.is_empty() && check.not_qualified.is_empty());

    let record = &service.by_cluster().expect("listing")[&13][0];
    assert_eq!(
        record.programme.requirements_text(),
        "BIO: B+\nCHE: B+\nMAT/PHY: B"
    );
}
