use indexmap::IndexMap;
use serde::Deserialize;
use tracing::info;

use crate::api::client::{ApiClient, UiEnvelope, fetch_offset_paged};
use crate::error::Result;
use crate::model::ObjectDefinition;

const OBJECT_DEFINITIONS_PATH: &str = "/admin/objects";

#[derive(Debug, Deserialize)]
struct ObjectDefinitionsData {
    objects: Vec<ObjectDefinition>,
}

/// Fetches one batch of object definitions.
pub fn fetch_object_definitions(
    client: &ApiClient,
    take: usize,
    start: usize,
) -> Result<Vec<ObjectDefinition>> {
    let envelope: UiEnvelope<ObjectDefinitionsData> = client.get_ui(
        OBJECT_DEFINITIONS_PATH,
        &[("take", take.to_string()), ("start", start.to_string())],
    )?;
    Ok(envelope.data.objects)
}

/// Fetches every object definition, keyed by id in the order the service
/// returned them.
pub fn fetch_all_object_definitions(
    client: &ApiClient,
) -> Result<IndexMap<String, ObjectDefinition>> {
    let definitions = fetch_offset_paged(|take, start| {
        fetch_object_definitions(client, take, start)
    })?;
    info!(count = definitions.len(), "retrieved object definitions");

    Ok(definitions
        .into_iter()
        .map(|definition| (definition.id.clone(), definition))
        .collect())
}
