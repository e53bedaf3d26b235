/// Failures reported by storage adapters. Domain errors wrap or translate these.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// The addressed record (or a record it references) does not exist.
    #[error("repository.not_found")]
    NotFound,
    /// Stored data could not be turned into a domain value, or a value could not be stored.
    #[error("repository.persistence")]
    Persistence,
    /// A uniqueness constraint rejected the write.
    #[error("repository.duplicated")]
    Duplicated,
    #[error("repository.database_error")]
    DatabaseError,
}
