use serde::{Deserialize, Serialize};
use std::fmt;
use crate::error::{ReclaimError, Result};

/// One desired remapping of a mannequin onto a real user
///
/// Fields are private so that every instance satisfies the construction
/// rules checked in [`ReclaimRequest::new`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReclaimRequest {
    mannequin_login: Option<String>,
    mannequin_id: Option<String>,
    target_login: String,
}

impl ReclaimRequest {
    /// Build a request. The target must be non-empty, and at least one of
    /// login or id must identify the mannequin.
    pub fn new(
        mannequin_login: Option<&str>,
        mannequin_id: Option<&str>,
        target_login: &str,
    ) -> Result<Self> {
        let mannequin_login = non_empty(mannequin_login);
        let mannequin_id = non_empty(mannequin_id);
        let target_login = target_login.trim();

        if target_login.is_empty() {
            return Err(ReclaimError::InvalidRequest(
                "target login must not be empty".to_string(),
            ));
        }

        if mannequin_login.is_none() && mannequin_id.is_none() {
            return Err(ReclaimError::InvalidRequest(
                "either a mannequin login or a mannequin id is required".to_string(),
            ));
        }

        Ok(Self {
            mannequin_login,
            mannequin_id,
            target_login: target_login.to_string(),
        })
    }

    /// Request identified by login only, as produced from a manifest row
    pub fn by_login(mannequin_login: &str, target_login: &str) -> Result<Self> {
        Self::new(Some(mannequin_login), None, target_login)
    }

    pub fn mannequin_login(&self) -> Option<&str> {
        self.mannequin_login.as_deref()
    }

    pub fn mannequin_id(&self) -> Option<&str> {
        self.mannequin_id.as_deref()
    }

    pub fn target_login(&self) -> &str {
        &self.target_login
    }
}

impl fmt::Display for ReclaimRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.mannequin_login, &self.mannequin_id) {
            (Some(login), Some(id)) => write!(f, "{} ({}) -> {}", login, id, self.target_login),
            (Some(login), None) => write!(f, "{} -> {}", login, self.target_login),
            (None, Some(id)) => write!(f, "[{}] -> {}", id, self.target_login),
            (None, None) => write!(f, "? -> {}", self.target_login),
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// A mannequin as the backend knows it at resolution time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MannequinIdentity {
    pub id: String,
    pub login: String,
    /// Node id of the user this mannequin is already attributed to
    pub already_mapped_target_id: Option<String>,
    pub already_mapped_target_login: Option<String>,
}

impl MannequinIdentity {
    pub fn unmapped(id: &str, login: &str) -> Self {
        Self {
            id: id.to_string(),
            login: login.to_string(),
            already_mapped_target_id: None,
            already_mapped_target_login: None,
        }
    }

    pub fn is_mapped(&self) -> bool {
        self.already_mapped_target_id.is_some()
    }
}
