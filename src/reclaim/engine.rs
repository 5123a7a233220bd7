use std::sync::Arc;
use crate::{
    error::{ReclaimError, Result},
    mannequin::IdentityService,
    reclaim::planner::{PlanAction, ReclaimPlan},
};
use tracing::info;

/// What the executor did with a plan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionResult {
    /// Invitation sent; the target still has to accept it
    Invited,
    /// Nothing sent because the mannequin was already mapped
    Skipped,
}

pub struct ReclaimEngine {
    service: Arc<dyn IdentityService>,
}

impl ReclaimEngine {
    pub fn new(service: Arc<dyn IdentityService>) -> Self {
        Self { service }
    }

    /// Carry out a plan against the identity backend.
    ///
    /// An `Invite` plan issues exactly one reclaim call; a skip plan issues
    /// none. Backend failures are returned as `Remote` and not retried.
    pub async fn execute(&self, plan: &ReclaimPlan, org: &str) -> Result<ExecutionResult> {
        let mannequin = plan.mannequin();

        match plan.action() {
            PlanAction::SkipAlreadyMapped => {
                info!(
                    "Mannequin {} ({}) is already mapped to {}; use --force to reclaim it again",
                    mannequin.login,
                    mannequin.id,
                    mannequin
                        .already_mapped_target_login
                        .as_deref()
                        .or(mannequin.already_mapped_target_id.as_deref())
                        .unwrap_or("another user"),
                );
                Ok(ExecutionResult::Skipped)
            }

            PlanAction::Invite => {
                info!(
                    "Sending reclaim invitation for mannequin {} ({}) to {}",
                    mannequin.login,
                    mannequin.id,
                    plan.target_login()
                );

                self.service
                    .reclaim(org, &mannequin.id, plan.target_login())
                    .await
                    .map_err(|e| ReclaimError::Remote(e.to_string()))?;

                info!(
                    "✓ Invitation sent: {} must accept it before {} is remapped",
                    plan.target_login(),
                    mannequin.login
                );
                Ok(ExecutionResult::Invited)
            }
        }
    }
}
