use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use crate::{
    config::Config,
    error::{ReclaimError, Result},
    github::types::*,
    mannequin::{IdentityService, MannequinIdentity, ServiceError},
};
use tracing::{debug, info};

const USER_AGENT: &str = concat!("mannequin-reclaim/", env!("CARGO_PKG_VERSION"));

/// GitHub GraphQL client backing [`IdentityService`]
pub struct GithubClient {
    http: Client,
    graphql_url: String,
    token: String,
    page_size: u32,
    // Organization node ids never change, so they are safe to keep
    org_ids: Mutex<HashMap<String, String>>,
}

impl GithubClient {
    pub fn new(config: &Config, token: String) -> Result<Self> {
        if token.trim().is_empty() {
            return Err(ReclaimError::Config("GitHub token must not be empty".to_string()));
        }

        let http = Client::builder()
            .timeout(Duration::from_secs(config.github.request_timeout_secs))
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            http,
            graphql_url: config.graphql_url(),
            token,
            page_size: config.github.page_size,
            org_ids: Mutex::new(HashMap::new()),
        })
    }

    /// Post one GraphQL document and unwrap its `data`
    async fn post<T: DeserializeOwned>(&self, query: &str, variables: Value) -> std::result::Result<T, ServiceError> {
        let response = self
            .http
            .post(&self.graphql_url)
            .bearer_auth(&self.token)
            .json(&json!({ "query": query, "variables": variables }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ServiceError::new(format!(
                "GitHub API error {}: {}",
                status,
                body.chars().take(200).collect::<String>()
            )));
        }

        let envelope: GraphqlResponse<T> = response.json().await?;
        unwrap_envelope(envelope)
    }

    pub async fn organization_id(&self, org: &str) -> std::result::Result<String, ServiceError> {
        if let Some(id) = self.cached_org_id(org) {
            return Ok(id);
        }

        let data: OrganizationData = self.post(ORGANIZATION_QUERY, json!({ "login": org })).await?;
        let id = data
            .organization
            .map(|o| o.id)
            .ok_or_else(|| ServiceError::new(format!("Organization {} not found", org)))?;

        if let Ok(mut cache) = self.org_ids.lock() {
            cache.insert(org.to_string(), id.clone());
        }
        Ok(id)
    }

    fn cached_org_id(&self, org: &str) -> Option<String> {
        self.org_ids.lock().ok().and_then(|cache| cache.get(org).cloned())
    }

    pub async fn user_id(&self, login: &str) -> std::result::Result<String, ServiceError> {
        let data: UserData = self.post(USER_QUERY, json!({ "login": login })).await?;
        data.user
            .map(|u| u.id)
            .ok_or_else(|| ServiceError::new(format!("Target user {} not found", login)))
    }
}

#[async_trait]
impl IdentityService for GithubClient {
    async fn list_mannequins(&self, org: &str) -> std::result::Result<Vec<MannequinIdentity>, ServiceError> {
        let org_id = self.organization_id(org).await?;

        let mut mannequins = Vec::new();
        let mut after: Option<String> = None;
        loop {
            let data: MannequinsData = self
                .post(
                    MANNEQUINS_QUERY,
                    json!({ "id": org_id, "first": self.page_size, "after": after }),
                )
                .await?;

            let connection = data
                .node
                .ok_or_else(|| ServiceError::new(format!("Organization {} has no mannequin listing", org)))?
                .mannequins;

            mannequins.extend(connection.nodes.into_iter().map(MannequinIdentity::from));

            match next_cursor(connection.page_info)? {
                Some(cursor) => after = Some(cursor),
                None => break,
            }
        }

        debug!("Listed {} mannequins in {}", mannequins.len(), org);
        Ok(mannequins)
    }

    async fn reclaim(
        &self,
        org: &str,
        mannequin_id: &str,
        target_login: &str,
    ) -> std::result::Result<(), ServiceError> {
        let org_id = self.organization_id(org).await?;
        let target_id = self.user_id(target_login).await?;

        let data: AttributionInvitationData = self
            .post(
                ATTRIBUTION_INVITATION_MUTATION,
                json!({ "orgId": org_id, "sourceId": mannequin_id, "targetId": target_id }),
            )
            .await?;

        if data.create_attribution_invitation.is_none() {
            return Err(ServiceError::new(format!(
                "Failed to send reclaim invitation for mannequin {}",
                mannequin_id
            )));
        }

        info!("Attribution invitation created for {} -> {}", mannequin_id, target_login);
        Ok(())
    }
}

/// Cursor for the next page; a page that claims more without a cursor would
/// silently truncate the listing, so it is an error
fn next_cursor(page_info: PageInfo) -> std::result::Result<Option<String>, ServiceError> {
    match page_info {
        PageInfo { has_next_page: false, .. } => Ok(None),
        PageInfo { has_next_page: true, end_cursor: Some(cursor) } => Ok(Some(cursor)),
        PageInfo { has_next_page: true, end_cursor: None } => {
            Err(ServiceError::new("pagination cursor missing"))
        }
    }
}

fn unwrap_envelope<T>(envelope: GraphqlResponse<T>) -> std::result::Result<T, ServiceError> {
    if !envelope.errors.is_empty() {
        let messages: Vec<String> = envelope.errors.into_iter().map(|e| e.message).collect();
        return Err(ServiceError::new(messages.join("; ")));
    }
    envelope
        .data
        .ok_or_else(|| ServiceError::new("GitHub API returned no data"))
}
