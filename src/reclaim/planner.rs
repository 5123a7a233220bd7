use serde::Serialize;
use crate::mannequin::MannequinIdentity;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PlanAction {
    /// Send an attribution invitation to the target
    Invite,
    /// Mannequin already has a mapping and the caller did not force
    SkipAlreadyMapped,
}

/// Decision for one resolved mannequin; only [`ReclaimPlanner`] builds these
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReclaimPlan {
    mannequin: MannequinIdentity,
    target_login: String,
    action: PlanAction,
}

impl ReclaimPlan {
    pub fn mannequin(&self) -> &MannequinIdentity {
        &self.mannequin
    }

    pub fn target_login(&self) -> &str {
        &self.target_login
    }

    pub fn action(&self) -> PlanAction {
        self.action
    }
}

pub struct ReclaimPlanner;

impl ReclaimPlanner {
    /// Decide whether the mannequin should be (re)mapped.
    ///
    /// An existing mapping is only overridden when `force` is set.
    pub fn plan(mannequin: MannequinIdentity, target_login: &str, force: bool) -> ReclaimPlan {
        let action = if mannequin.is_mapped() && !force {
            PlanAction::SkipAlreadyMapped
        } else {
            PlanAction::Invite
        };

        ReclaimPlan {
            mannequin,
            target_login: target_login.to_string(),
            action,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapped() -> MannequinIdentity {
        MannequinIdentity {
            id: "M_1".to_string(),
            login: "alice-mannequin".to_string(),
            already_mapped_target_id: Some("U_7".to_string()),
            already_mapped_target_login: Some("alice-old".to_string()),
        }
    }

    #[test]
    fn test_unmapped_is_invited() {
        let unmapped = MannequinIdentity::unmapped("M_1", "alice-mannequin");
        assert_eq!(ReclaimPlanner::plan(unmapped.clone(), "bob", false).action(), PlanAction::Invite);
        assert_eq!(ReclaimPlanner::plan(unmapped, "bob", true).action(), PlanAction::Invite);
    }

    #[test]
    fn test_mapped_is_skipped_without_force() {
        let plan = ReclaimPlanner::plan(mapped(), "bob", false);
        assert_eq!(plan.action(), PlanAction::SkipAlreadyMapped);
        assert_eq!(plan.target_login(), "bob");
        assert_eq!(plan.mannequin().id, "M_1");
    }

    #[test]
    fn test_force_overrides_mapping() {
        assert_eq!(ReclaimPlanner::plan(mapped(), "bob", true).action(), PlanAction::Invite);
    }
}
