use async_trait::async_trait;
use thiserror::Error;
use crate::mannequin::types::MannequinIdentity;

/// Failure reported by an identity backend, carrying its message verbatim
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct ServiceError(pub String);

impl ServiceError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

impl From<reqwest::Error> for ServiceError {
    fn from(e: reqwest::Error) -> Self {
        Self(e.to_string())
    }
}

/// Backend that owns the mannequin-to-user attribution records.
///
/// Each call is a single bounded request; implementations do not retry.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityService: Send + Sync {
    /// Current mannequins of `org`, freshly fetched
    async fn list_mannequins(&self, org: &str) -> Result<Vec<MannequinIdentity>, ServiceError>;

    /// Send the invitation remapping `mannequin_id` onto `target_login`.
    /// The remap is only final once the target user accepts it.
    async fn reclaim(
        &self,
        org: &str,
        mannequin_id: &str,
        target_login: &str,
    ) -> Result<(), ServiceError>;
}
