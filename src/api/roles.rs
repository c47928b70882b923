use indexmap::IndexMap;
use serde::Deserialize;
use tracing::{debug, info};

use crate::api::client::{ApiClient, UiEnvelope, fetch_offset_paged};
use crate::error::Result;
use crate::model::RoleDetail;

const ROLES_PATH: &str = "/admin/roles";

/// Role listing entry carrying only the fields needed to drive the detail
/// fetches.
#[derive(Debug, Clone, Deserialize)]
pub struct RoleSummary {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Deserialize)]
struct RolesData {
    roles: Vec<RoleSummary>,
}

/// Fetches one batch of role summaries.
pub fn fetch_roles(client: &ApiClient, take: usize, start: usize) -> Result<Vec<RoleSummary>> {
    let envelope: UiEnvelope<RolesData> = client.get_ui(
        ROLES_PATH,
        &[("take", take.to_string()), ("start", start.to_string())],
    )?;
    Ok(envelope.data.roles)
}

/// Fetches the full detail for one role, including members and the
/// per-object-definition permission grants.
pub fn fetch_role_detail(client: &ApiClient, role_id: &str) -> Result<RoleDetail> {
    let envelope: UiEnvelope<RoleDetail> =
        client.get_ui(&format!("{ROLES_PATH}/{role_id}"), &[])?;
    Ok(envelope.data)
}

/// Fetches every role with full details, keyed by role id in the order the
/// service returned them.
pub fn fetch_all_role_details(client: &ApiClient) -> Result<IndexMap<String, RoleDetail>> {
    let summaries = fetch_offset_paged(|take, start| fetch_roles(client, take, start))?;
    info!(count = summaries.len(), "retrieved roles");

    let mut details = IndexMap::with_capacity(summaries.len());
    for summary in summaries {
        debug!(role_id = %summary.id, role = %summary.name, "fetching role detail");
        let detail = fetch_role_detail(client, &summary.id)?;
        details.insert(summary.id, detail);
    }
    Ok(details)
}
