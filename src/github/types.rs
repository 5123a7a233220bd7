use serde::Deserialize;
use crate::mannequin::MannequinIdentity;

/// Standard GraphQL response envelope
#[derive(Debug, Deserialize)]
pub struct GraphqlResponse<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Vec<GraphqlError>,
}

#[derive(Debug, Deserialize)]
pub struct GraphqlError {
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct OrganizationData {
    pub organization: Option<NodeRef>,
}

#[derive(Debug, Deserialize)]
pub struct UserData {
    pub user: Option<NodeRef>,
}

#[derive(Debug, Deserialize)]
pub struct NodeRef {
    pub id: String,
}

#[derive(Debug, Deserialize)]
pub struct MannequinsData {
    pub node: Option<OrganizationMannequins>,
}

#[derive(Debug, Deserialize)]
pub struct OrganizationMannequins {
    pub mannequins: MannequinConnection,
}

#[derive(Debug, Deserialize)]
pub struct MannequinConnection {
    #[serde(rename = "pageInfo")]
    pub page_info: PageInfo,
    pub nodes: Vec<MannequinNode>,
}

#[derive(Debug, Deserialize)]
pub struct PageInfo {
    #[serde(rename = "endCursor")]
    pub end_cursor: Option<String>,
    #[serde(rename = "hasNextPage")]
    pub has_next_page: bool,
}

#[derive(Debug, Deserialize)]
pub struct MannequinNode {
    pub id: String,
    pub login: String,
    pub claimant: Option<Claimant>,
}

#[derive(Debug, Deserialize)]
pub struct Claimant {
    pub id: String,
    pub login: Option<String>,
}

impl From<MannequinNode> for MannequinIdentity {
    fn from(node: MannequinNode) -> Self {
        let (mapped_id, mapped_login) = match node.claimant {
            Some(c) => (Some(c.id), c.login),
            None => (None, None),
        };
        MannequinIdentity {
            id: node.id,
            login: node.login,
            already_mapped_target_id: mapped_id,
            already_mapped_target_login: mapped_login,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct AttributionInvitationData {
    #[serde(rename = "createAttributionInvitation")]
    pub create_attribution_invitation: Option<serde_json::Value>,
}

pub const ORGANIZATION_QUERY: &str =
    "query($login: String!) { organization(login: $login) { login id name } }";

pub const USER_QUERY: &str = "query($login: String!) { user(login: $login) { id name } }";

pub const MANNEQUINS_QUERY: &str = "query($id: ID!, $first: Int, $after: String) { \
    node(id: $id) { ... on Organization { mannequins(first: $first, after: $after) { \
    pageInfo { endCursor hasNextPage } nodes { login id claimant { login id } } } } } }";

pub const ATTRIBUTION_INVITATION_MUTATION: &str =
    "mutation($orgId: ID!, $sourceId: ID!, $targetId: ID!) { \
    createAttributionInvitation(input: { ownerId: $orgId, sourceId: $sourceId, targetId: $targetId }) { \
    source { ... on Mannequin { id login } } target { ... on User { id login } } } }";
