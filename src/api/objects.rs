use indexmap::IndexMap;
use serde::Deserialize;
use tracing::info;

use crate::api::client::ApiClient;
use crate::error::Result;

const OBJECTS_PATH: &str = "/objects";

#[derive(Debug, Deserialize)]
struct ObjectsPage {
    total_items: u64,
}

/// Counts the object instances of one object definition. Only the total is
/// needed, so a page of one item is requested.
pub fn fetch_object_count(client: &ApiClient, definition_id: &str) -> Result<u64> {
    let page: ObjectsPage = client.get_public(
        OBJECTS_PATH,
        &[
            ("workspace_id", client.workspace_id().to_string()),
            ("take", "1".to_string()),
            ("start", "0".to_string()),
            ("filter", definition_id.to_string()),
        ],
    )?;
    Ok(page.total_items)
}

/// Counts object instances for every given definition id. One call per
/// definition, spaced by the client's rate-limit delay.
pub fn fetch_object_counts<'a>(
    client: &ApiClient,
    definition_ids: impl Iterator<Item = &'a String>,
) -> Result<IndexMap<String, u64>> {
    let mut counts = IndexMap::new();
    for definition_id in definition_ids {
        let count = fetch_object_count(client, definition_id)?;
        counts.insert(definition_id.clone(), count);
    }
    info!(count = counts.len(), "counted object instances per definition");
    Ok(counts)
}
