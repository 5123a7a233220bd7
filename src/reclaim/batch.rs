use std::sync::Arc;
use chrono::{DateTime, Utc};
use colored::Colorize;
use serde::Serialize;
use crate::{
    error::ReclaimError,
    mannequin::{IdentityService, MannequinResolver, ReclaimRequest},
    reclaim::{
        engine::{ExecutionResult, ReclaimEngine},
        manifest::ManifestRow,
        planner::{PlanAction, ReclaimPlanner},
        state::{RequestState, RequestTracker},
    },
};
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum OutcomeStatus {
    Succeeded,
    SkippedAlreadyMapped,
    Failed,
}

/// Result of one request. `request` is `None` only for a manifest row that
/// could not be parsed into a request.
#[derive(Debug, Clone, Serialize)]
pub struct ReclaimOutcome {
    pub request: Option<ReclaimRequest>,
    pub line: Option<usize>,
    pub status: OutcomeStatus,
    pub detail: Option<String>,
}

impl OutcomeStatus {
    /// Outcome status of a terminal request state
    pub fn from_state(state: RequestState) -> Option<Self> {
        match state {
            RequestState::Succeeded => Some(OutcomeStatus::Succeeded),
            RequestState::SkippedAlreadyMapped => Some(OutcomeStatus::SkippedAlreadyMapped),
            RequestState::Failed => Some(OutcomeStatus::Failed),
            _ => None,
        }
    }
}

impl ReclaimOutcome {
    fn finish(tracker: &RequestTracker, request: &ReclaimRequest, detail: String) -> Self {
        // A request that somehow stopped short of a terminal state counts as failed
        let status = OutcomeStatus::from_state(tracker.state()).unwrap_or(OutcomeStatus::Failed);
        Self {
            request: Some(request.clone()),
            line: None,
            status,
            detail: Some(detail),
        }
    }

    fn failed(request: Option<ReclaimRequest>, error: &ReclaimError) -> Self {
        Self {
            request,
            line: None,
            status: OutcomeStatus::Failed,
            detail: Some(error.to_string()),
        }
    }

    pub fn is_failed(&self) -> bool {
        self.status == OutcomeStatus::Failed
    }

    /// One plain status line for this outcome
    pub fn status_line(&self) -> String {
        let subject = match (&self.request, self.line) {
            (Some(req), Some(line)) => format!("line {}: {}", line, req),
            (Some(req), None) => req.to_string(),
            (None, Some(line)) => format!("line {}", line),
            (None, None) => "request".to_string(),
        };

        let detail = self.detail.as_deref().unwrap_or_default();
        let line = match self.status {
            OutcomeStatus::Succeeded => format!("{} {} {}", "✓".green(), subject, detail),
            OutcomeStatus::SkippedAlreadyMapped => format!("{} {} {}", "↷".yellow(), subject, detail),
            OutcomeStatus::Failed => format!("{} {} {}", "✗".red(), subject, detail.red()),
        };
        line.trim_end().to_string()
    }
}

/// Drives requests through resolve, plan and execute
pub struct ReclaimOrchestrator {
    resolver: MannequinResolver,
    engine: ReclaimEngine,
}

impl ReclaimOrchestrator {
    /// One orchestrator per invocation, sharing a single backend
    pub fn new(service: Arc<dyn IdentityService>) -> Self {
        Self {
            resolver: MannequinResolver::new(Arc::clone(&service)),
            engine: ReclaimEngine::new(service),
        }
    }

    /// Resolve, plan and execute one request. Never fails: every error ends
    /// up in the returned outcome, whose status is the tracker's final state.
    pub async fn reclaim_one(&self, request: &ReclaimRequest, org: &str, force: bool) -> ReclaimOutcome {
        let mut tracker = RequestTracker::new();

        tracker.advance(RequestState::Resolving);
        let mannequin = match self
            .resolver
            .resolve(org, request.mannequin_login(), request.mannequin_id())
            .await
        {
            Ok(m) => m,
            Err(e) => {
                tracker.advance(RequestState::Failed);
                warn!("Failed to resolve {}: {}", request, e);
                return ReclaimOutcome::finish(&tracker, request, e.to_string());
            }
        };

        tracker.advance(RequestState::Planning);
        let plan = ReclaimPlanner::plan(mannequin, request.target_login(), force);

        if plan.action() == PlanAction::SkipAlreadyMapped {
            tracker.advance(RequestState::SkippedAlreadyMapped);
        } else {
            tracker.advance(RequestState::Executing);
        }

        let detail = match self.engine.execute(&plan, org).await {
            Ok(ExecutionResult::Skipped) => format!(
                "already mapped to {}; use --force to reclaim again",
                plan.mannequin()
                    .already_mapped_target_login
                    .as_deref()
                    .or(plan.mannequin().already_mapped_target_id.as_deref())
                    .unwrap_or("another user")
            ),
            Ok(ExecutionResult::Invited) => {
                tracker.advance(RequestState::Succeeded);
                format!("invitation sent for mannequin {}", plan.mannequin().id)
            }
            Err(e) => {
                tracker.advance(RequestState::Failed);
                warn!("Failed to reclaim {}: {}", request, e);
                e.to_string()
            }
        };

        ReclaimOutcome::finish(&tracker, request, detail)
    }

    /// Run each request independently, in order. The result has exactly one
    /// outcome per request, in the same order.
    pub async fn reclaim_many(&self, requests: &[ReclaimRequest], org: &str, force: bool) -> Vec<ReclaimOutcome> {
        let mut outcomes = Vec::with_capacity(requests.len());
        for request in requests {
            outcomes.push(self.reclaim_one(request, org, force).await);
        }
        outcomes
    }

    /// Run parsed manifest rows. Malformed rows become failed outcomes in
    /// place; they never stop the rows after them.
    pub async fn reclaim_manifest(&self, rows: Vec<ManifestRow>, org: &str, force: bool) -> BatchSummary {
        info!("Processing {} manifest rows for org {}", rows.len(), org);

        let mut outcomes = Vec::with_capacity(rows.len());
        for row in rows {
            let mut outcome = match row.request {
                Ok(request) => self.reclaim_one(&request, org, force).await,
                Err(e) => {
                    warn!("Skipping manifest line {}: {}", row.line, e);
                    ReclaimOutcome::failed(None, &e)
                }
            };
            outcome.line = Some(row.line);
            outcomes.push(outcome);
        }

        let summary = BatchSummary::from_outcomes(outcomes);
        info!(
            "Manifest complete: {} succeeded, {} skipped, {} failed",
            summary.succeeded, summary.skipped, summary.failed
        );
        summary
    }
}

/// Summary of a batch run
#[derive(Debug, Serialize)]
pub struct BatchSummary {
    pub total: usize,
    pub succeeded: usize,
    pub skipped: usize,
    pub failed: usize,
    pub outcomes: Vec<ReclaimOutcome>,
    pub finished_at: DateTime<Utc>,
}

impl BatchSummary {
    pub fn from_outcomes(outcomes: Vec<ReclaimOutcome>) -> Self {
        let count = |status: OutcomeStatus| outcomes.iter().filter(|o| o.status == status).count();
        Self {
            total: outcomes.len(),
            succeeded: count(OutcomeStatus::Succeeded),
            skipped: count(OutcomeStatus::SkippedAlreadyMapped),
            failed: count(OutcomeStatus::Failed),
            finished_at: Utc::now(),
            outcomes,
        }
    }

    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }

    /// Whether the invocation should exit non-zero after printing this batch
    pub fn exits_with_failure(&self, fail_on_error: bool) -> bool {
        fail_on_error && self.has_failures()
    }

    /// Print one line per outcome followed by the totals
    pub fn print_summary(&self) {
        for outcome in &self.outcomes {
            println!("{}", outcome.status_line());
        }
        println!("\n{}", "=== Mannequin Reclaim Summary ===".cyan().bold());
        println!("Total Rows:   {}", self.total);
        println!("Invited:      {} ✓", self.succeeded.to_string().green());
        println!("Skipped:      {} ↷", self.skipped.to_string().yellow());
        println!("Failed:       {} ✗", self.failed.to_string().red());
        println!("=================================");
    }

    /// Share of rows that ended in an invitation, as a percentage
    pub fn success_rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            (self.succeeded as f64 / self.total as f64) * 100.0
        }
    }
}
