use std::path::Path;

use tracing::{debug, info, instrument};

use crate::api::{ApiClient, object_definitions, objects, roles, users};
use crate::error::Result;
use crate::model::User;
use crate::render::Renderer;
use crate::report::aggregate::CatalogueAggregate;
use crate::report::table::{self, ReportOptions};

/// Exports the object-definition / role permission matrix: fetch, join,
/// build the table, render. Strictly sequential; any failure aborts the
/// whole run.
#[instrument(level = "info", skip_all, fields(output = %output.display()))]
pub fn permission_matrix(
    client: &ApiClient,
    renderer: &dyn Renderer,
    output: &Path,
    options: &ReportOptions,
) -> Result<()> {
    let role_details = roles::fetch_all_role_details(client)?;
    info!(role_count = role_details.len(), "fetched role details");
    let definitions = object_definitions::fetch_all_object_definitions(client)?;
    let counts = objects::fetch_object_counts(client, definitions.keys())?;

    let aggregate = CatalogueAggregate::build(&role_details, &definitions, &counts)?;
    let table = table::permission_matrix(&aggregate, &role_details, options)?;
    debug!(
        rows = table.row_count(),
        columns = table.column_count(),
        "table constructed"
    );
    renderer.render(&table, output)
}

/// Exports the user / role membership matrix.
#[instrument(level = "info", skip_all, fields(output = %output.display()))]
pub fn user_role_matrix(client: &ApiClient, renderer: &dyn Renderer, output: &Path) -> Result<()> {
    let user_details = users::fetch_all_user_details(client)?;
    info!(user_count = user_details.len(), "fetched user details");

    let user_list: Vec<&User> = user_details.values().collect();
    let table = table::user_matrix(&user_list);
    debug!(
        rows = table.row_count(),
        columns = table.column_count(),
        "table constructed"
    );
    renderer.render(&table, output)
}
