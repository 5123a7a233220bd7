use std::sync::Arc;
use crate::{
    error::{ReclaimError, Result},
    mannequin::{service::IdentityService, types::MannequinIdentity},
};
use tracing::debug;

/// Finds the single mannequin a request refers to
pub struct MannequinResolver {
    service: Arc<dyn IdentityService>,
}

impl MannequinResolver {
    pub fn new(service: Arc<dyn IdentityService>) -> Self {
        Self { service }
    }

    /// Resolve a mannequin of `org` by login, id, or both.
    ///
    /// Never picks among several same-login mannequins: without an id that
    /// narrows the choice, more than one login match is `Ambiguous`.
    pub async fn resolve(
        &self,
        org: &str,
        login: Option<&str>,
        id: Option<&str>,
    ) -> Result<MannequinIdentity> {
        if login.is_none() && id.is_none() {
            return Err(ReclaimError::InvalidRequest(
                "a mannequin login or id is required to resolve a mannequin".to_string(),
            ));
        }

        let mannequins = self
            .service
            .list_mannequins(org)
            .await
            .map_err(|e| ReclaimError::Remote(e.to_string()))?;

        debug!("Fetched {} mannequins for org {}", mannequins.len(), org);

        select(mannequins, login, id)
    }
}

fn select(
    mannequins: Vec<MannequinIdentity>,
    login: Option<&str>,
    id: Option<&str>,
) -> Result<MannequinIdentity> {
    let login_matches = |m: &MannequinIdentity| {
        login.map_or(true, |l| m.login.eq_ignore_ascii_case(l))
    };

    if let Some(id) = id {
        return mannequins
            .into_iter()
            .find(|m| m.id == id && login_matches(m))
            .ok_or_else(|| match login {
                Some(l) => ReclaimError::MannequinNotFound(format!("{} (id {})", l, id)),
                None => ReclaimError::MannequinNotFound(format!("with id {}", id)),
            });
    }

    // Checked on entry: without an id, a login is present
    let login = login.unwrap_or_default();
    let mut matches: Vec<MannequinIdentity> = mannequins
        .into_iter()
        .filter(|m| login_matches(m))
        .collect();

    match matches.len() {
        0 => Err(ReclaimError::MannequinNotFound(login.to_string())),
        1 => Ok(matches.remove(0)),
        count => Err(ReclaimError::Ambiguous {
            login: login.to_string(),
            count,
        }),
    }
}
