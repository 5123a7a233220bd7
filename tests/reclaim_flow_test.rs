use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use mannequin_reclaim::{
    mannequin::{IdentityService, MannequinIdentity, ReclaimRequest, ServiceError},
    reclaim::{ManifestParser, OutcomeStatus, ReclaimOrchestrator},
    utils,
};

/// In-memory backend that records every reclaim call
#[derive(Default)]
struct FakeDirectory {
    mannequins: Vec<MannequinIdentity>,
    users: Vec<String>,
    calls: Mutex<Vec<(String, String, String)>>,
    listings: Mutex<usize>,
}

impl FakeDirectory {
    fn new(mannequins: Vec<MannequinIdentity>, users: &[&str]) -> Self {
        Self {
            mannequins,
            users: users.iter().map(|u| u.to_string()).collect(),
            ..Default::default()
        }
    }

    fn calls(&self) -> Vec<(String, String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl IdentityService for FakeDirectory {
    async fn list_mannequins(&self, org: &str) -> Result<Vec<MannequinIdentity>, ServiceError> {
        if org != "acme" {
            return Err(ServiceError::new(format!("Organization {} not found", org)));
        }
        *self.listings.lock().unwrap() += 1;
        Ok(self.mannequins.clone())
    }

    async fn reclaim(&self, org: &str, mannequin_id: &str, target_login: &str) -> Result<(), ServiceError> {
        if !self.users.iter().any(|u| u == target_login) {
            return Err(ServiceError::new(format!("Target user {} not found", target_login)));
        }
        self.calls
            .lock()
            .unwrap()
            .push((org.to_string(), mannequin_id.to_string(), target_login.to_string()));
        Ok(())
    }
}

fn directory() -> FakeDirectory {
    FakeDirectory::new(
        vec![
            MannequinIdentity::unmapped("M_alice", "alice-mannequin"),
            MannequinIdentity::unmapped("M_t1", "twin"),
            MannequinIdentity::unmapped("M_t2", "twin"),
            MannequinIdentity {
                id: "M_carol".to_string(),
                login: "carol-mannequin".to_string(),
                already_mapped_target_id: Some("U_carol".to_string()),
                already_mapped_target_login: Some("carol".to_string()),
            },
        ],
        &["bob-real", "carol-new", "dave"],
    )
}

#[tokio::test]
async fn manifest_from_file_reclaims_each_row() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("mannequins.csv");
    std::fs::write(
        &path,
        "mannequin-user,target-user\n\
         alice-mannequin,bob-real\n\
         twin,dave\n\
         carol-mannequin,carol-new\n\
         not-enough-columns\n\
         ghost-mannequin,dave\n\
         alice-mannequin,nobody\n",
    )
    .unwrap();

    let directory = Arc::new(directory());
    let orchestrator = ReclaimOrchestrator::new(directory.clone());

    let lines = utils::read_lines(path.to_str().unwrap()).unwrap();
    let summary = orchestrator
        .reclaim_manifest(ManifestParser::parse(lines), "acme", false)
        .await;

    let statuses: Vec<OutcomeStatus> = summary.outcomes.iter().map(|o| o.status).collect();
    assert_eq!(
        statuses,
        vec![
            OutcomeStatus::Succeeded,
            OutcomeStatus::Failed,
            OutcomeStatus::SkippedAlreadyMapped,
            OutcomeStatus::Failed,
            OutcomeStatus::Failed,
            OutcomeStatus::Failed,
        ]
    );
    let lines: Vec<Option<usize>> = summary.outcomes.iter().map(|o| o.line).collect();
    assert_eq!(lines, vec![Some(2), Some(3), Some(4), Some(5), Some(6), Some(7)]);

    assert_eq!(summary.succeeded, 1);
    assert_eq!(summary.skipped, 1);
    assert_eq!(summary.failed, 4);
    assert_eq!(
        directory.calls(),
        vec![("acme".to_string(), "M_alice".to_string(), "bob-real".to_string())]
    );

    // The malformed row never reached the backend; every other row re-queried it
    assert_eq!(*directory.listings.lock().unwrap(), 5);
}

#[tokio::test]
async fn forced_batch_remaps_previously_mapped_mannequin() {
    let directory = Arc::new(directory());
    let orchestrator = ReclaimOrchestrator::new(directory.clone());

    let requests = vec![
        ReclaimRequest::by_login("carol-mannequin", "carol-new").unwrap(),
        ReclaimRequest::new(Some("twin"), Some("M_t1"), "dave").unwrap(),
    ];
    let outcomes = orchestrator.reclaim_many(&requests, "acme", true).await;

    assert_eq!(outcomes.len(), 2);
    assert!(outcomes.iter().all(|o| o.status == OutcomeStatus::Succeeded));
    assert_eq!(directory.calls().len(), 2);
    assert_eq!(directory.calls()[1].1, "M_t1");
}

#[tokio::test]
async fn unknown_org_fails_single_request() {
    let directory = Arc::new(directory());
    let orchestrator = ReclaimOrchestrator::new(directory.clone());

    let request = ReclaimRequest::by_login("alice-mannequin", "bob-real").unwrap();
    let outcome = orchestrator.reclaim_one(&request, "initech", false).await;

    assert_eq!(outcome.status, OutcomeStatus::Failed);
    assert!(outcome.detail.unwrap().contains("initech"));
    assert!(directory.calls().is_empty());
}
