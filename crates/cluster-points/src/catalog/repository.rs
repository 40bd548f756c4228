use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{Programme, ProgrammeId};

/// Stored programme together with its store-assigned identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgrammeRecord {
    pub id: ProgrammeId,
    #[serde(flatten)]
    pub programme: Programme,
    pub updated_at: DateTime<Utc>,
}

/// Storage abstraction so the catalog service can be exercised in isolation.
pub trait ProgrammeRepository: Send + Sync {
    fn insert(&self, programme: Programme) -> Result<ProgrammeRecord, RepositoryError>;
    fn replace(
        &self,
        id: ProgrammeId,
        programme: Programme,
    ) -> Result<ProgrammeRecord, RepositoryError>;
    fn remove(&self, id: ProgrammeId) -> Result<(), RepositoryError>;
    fn fetch(&self, id: ProgrammeId) -> Result<Option<ProgrammeRecord>, RepositoryError>;
    /// Every record, ordered by id.
    fn list(&self) -> Result<Vec<ProgrammeRecord>, RepositoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("programme not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
