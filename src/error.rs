use crate::permission::Permission;
use thiserror::Error;

/// Store-layer error type.
pub type StoreError = Box<dyn std::error::Error + Send + Sync>;

/// Crate result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by this crate.
///
/// Evaluation itself never fails; these surface from parsing, principal
/// construction and the caller-side [`Guard`](crate::Guard).
#[derive(Debug, Error)]
pub enum Error {
    /// Store error wrapper.
    #[error("store error: {0}")]
    Store(#[source] StoreError),
    /// Invalid identifier input.
    #[error("invalid id: {0}")]
    InvalidId(String),
    /// Unknown role name.
    #[error("invalid role: {0}")]
    InvalidRole(String),
    /// Unknown action name.
    #[error("invalid action: {0}")]
    InvalidAction(String),
    /// A principal must hold at least one role.
    #[error("principal must hold at least one role")]
    EmptyRoles,
    /// The principal is not permitted to perform the action.
    #[error("forbidden: missing permission {permission}")]
    Forbidden { permission: Permission },
    /// The requested entity does not exist.
    #[error("{resource} {id} not found")]
    NotFound { resource: &'static str, id: String },
}

impl From<StoreError> for Error {
    fn from(error: StoreError) -> Self {
        Self::Store(error)
    }
}
