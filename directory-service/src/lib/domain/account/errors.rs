use thiserror::Error;

/// Error channel for the persistence ports.
///
/// Separates the one expected negative outcome (a duplicate encoded login)
/// from infrastructure failure, which must never be reported as an ordinary
/// negative result.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    #[error("encoded login already stored")]
    DuplicateLogin,

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Top-level error for registry operations.
#[derive(Debug, Clone, Error)]
pub enum RegistryError {
    #[error("office registration requires both an office and a company reference")]
    MissingOrgReference,

    #[error("office {office_id} is not part of company {company_id}")]
    InvalidRelationship { office_id: i64, company_id: i64 },

    #[error("persistence failure: {0}")]
    Persistence(String),
}

impl From<StoreError> for RegistryError {
    fn from(err: StoreError) -> Self {
        RegistryError::Persistence(err.to_string())
    }
}

/// Top-level error for the authentication manager.
///
/// Collisions and credential mismatches are not errors; they surface as
/// ordinary negative return values.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    #[error("credential encoding failed: {0}")]
    Encoding(#[from] credential::EncodingError),

    #[error(transparent)]
    Registry(#[from] RegistryError),
}
