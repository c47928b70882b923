//! Assembles report tables from the aggregated catalogue data.
//!
//! The permission matrix carries a header row, one colored banner row per
//! category, and one tinted data row per object definition. The user matrix
//! is a flat membership grid. Both assign fixed column widths in character
//! units and leave the interpretation of those units to the renderer.

use std::collections::BTreeSet;

use indexmap::IndexMap;

use crate::error::{Result, ToolError};
use crate::model::{ADMINISTRATORS_ROLE, RoleDetail, User};
use crate::render::{Cell, Rgb, StyleSet, Table};
use crate::report::aggregate::{
    CatalogueAggregate, RoleGrantInfo, non_admin_write_role_count, sorted_roles,
};

const NAME_WIDTH: u16 = 25;
const DETAILS_WIDTH: u16 = 8;
const PERMISSIONS_WIDTH: u16 = 13;
const VALUE_WIDTH: u16 = 7;
const SMALL_TEXT: u16 = 8;

/// Report configuration: category display order and prefixes, the reserved
/// administrators role, and the tint factor applied to category colors on
/// data rows.
#[derive(Debug, Clone)]
pub struct ReportOptions {
    pub category_order: Vec<String>,
    pub category_prefixes: IndexMap<String, String>,
    pub admin_role: String,
    pub tint_factor: f64,
}

impl Default for ReportOptions {
    /// Mirrors the order in which categories (a.k.a. layers) are displayed
    /// in the catalogue's display settings.
    fn default() -> Self {
        let category_order = [
            "generic_layer",
            "motivationextension",
            "strategy_layer",
            "migrationimplementationextension",
            "bpmn",
            "business_layer",
            "application_layer",
            "technology_layer",
            "physical_layer",
            "logical_data_dictionary",
        ]
        .into_iter()
        .map(str::to_string)
        .collect();

        let category_prefixes = [
            ("generic_layer", "GEN"),
            ("motivationextension", "MOT"),
            ("strategy_layer", "STRAT"),
            ("migrationimplementationextension", "I&M"),
            ("bpmn", "BPMN"),
            ("business_layer", "BUS"),
            ("application_layer", "APP"),
            ("technology_layer", "TECH"),
            ("physical_layer", "PHYS"),
            ("logical_data_dictionary", "DD"),
        ]
        .into_iter()
        .map(|(category, prefix)| (category.to_string(), prefix.to_string()))
        .collect();

        Self {
            category_order,
            category_prefixes,
            admin_role: ADMINISTRATORS_ROLE.to_string(),
            tint_factor: 0.7,
        }
    }
}

fn header_style() -> StyleSet {
    StyleSet::new().bold()
}

fn header_angle_style() -> StyleSet {
    StyleSet::new().bold().angle()
}

fn header_small_angle_style() -> StyleSet {
    StyleSet::new().bold().text_size(SMALL_TEXT).angle()
}

fn value_style() -> StyleSet {
    StyleSet::new()
}

fn value_long_style() -> StyleSet {
    StyleSet::new().text_size(SMALL_TEXT).wrap_text()
}

fn value_center_style() -> StyleSet {
    StyleSet::new().center()
}

fn flag_cell(set: bool, style: StyleSet) -> Cell {
    Cell::new(if set { "x" } else { "" }, style)
}

/// Blank instead of `0`, keeping the spreadsheet visually sparse.
fn count_cell(count: usize, style: StyleSet) -> Cell {
    if count > 0 {
        Cell::new(count, style)
    } else {
        Cell::blank(style)
    }
}

/// Builds the object-definition / role permission matrix.
///
/// Role columns are ordered by descending member count (encounter order on
/// ties); rows are ordered by category priority, then by the order object
/// definitions were returned by the source.
pub fn permission_matrix(
    aggregate: &CatalogueAggregate,
    roles: &IndexMap<String, RoleDetail>,
    options: &ReportOptions,
) -> Result<Table> {
    let sorted = sorted_roles(roles);
    let mut table = Table::new();

    let mut header = vec![
        Cell::new("object definition", header_style()),
        Cell::new("object definition id", header_small_angle_style()),
        Cell::new("object type", header_small_angle_style()),
        Cell::new("object type id", header_small_angle_style()),
        Cell::new("is BPMN", header_angle_style()),
        Cell::new("object questionnaires", header_angle_style()),
        Cell::new("object count", header_angle_style()),
        Cell::new(
            "#non-admin roles with write permissions",
            header_angle_style(),
        ),
    ];
    for role in &sorted {
        let member_count = role.members.len();
        header.push(Cell::new(
            format!("{} ({member_count}) - default visible?", role.name),
            header_angle_style(),
        ));
        header.push(Cell::new(
            format!("{} ({member_count}) - #write permissions", role.name),
            header_angle_style(),
        ));
        header.push(Cell::new(
            format!("{} ({member_count}) - write permissions", role.name),
            header_angle_style(),
        ));
    }
    table.push_row(header);

    let default_info = RoleGrantInfo::default();

    for (category_id, records) in aggregate.grouped_by_category(&options.category_order) {
        let category = aggregate.categories.get(&category_id).ok_or_else(|| {
            ToolError::MissingData(format!("no category information for '{category_id}'"))
        })?;

        let banner_style = StyleSet::new().bold().background_color(category.color);
        let banner_long_style = StyleSet::new()
            .background_color(category.color)
            .text_size(SMALL_TEXT)
            .wrap_text();

        let mut banner = vec![
            Cell::new(category.name.clone(), banner_style.clone()),
            Cell::blank(banner_long_style.clone()),
            Cell::blank(banner_long_style.clone()),
            Cell::blank(banner_long_style.clone()),
            Cell::blank(banner_style.clone()),
            Cell::blank(banner_long_style),
            Cell::blank(banner_style),
            Cell::blank(value_style()),
        ];
        for _ in &sorted {
            banner.push(Cell::blank(value_style()));
            banner.push(Cell::blank(value_style()));
            banner.push(Cell::blank(value_long_style()));
        }
        table.push_row(banner);

        let tint = category.color.lighten(options.tint_factor);
        let tinted = StyleSet::new().background_color(tint);
        let tinted_small = StyleSet::new().background_color(tint).text_size(SMALL_TEXT);
        let tinted_center = StyleSet::new().background_color(tint).center();
        let tinted_long = StyleSet::new()
            .background_color(tint)
            .text_size(SMALL_TEXT)
            .wrap_text();

        for record in records {
            let name = match options.category_prefixes.get(&category_id) {
                Some(prefix) => format!("[{prefix}] {}", record.name),
                None => record.name.clone(),
            };
            let write_roles = non_admin_write_role_count(record, roles, &options.admin_role);

            let mut row = vec![
                Cell::new(name, tinted.clone()),
                Cell::new(record.id.clone(), tinted_small.clone()),
                Cell::new(record.object_type.name_internal.clone(), tinted_small.clone()),
                Cell::new(record.object_type.template_id.clone(), tinted_small.clone()),
                flag_cell(record.is_bpmn, tinted_center.clone()),
                Cell::new(record.questionnaire_labels.join("\n"), tinted_long.clone()),
                count_cell(record.object_count as usize, tinted.clone()),
                count_cell(write_roles, value_style()),
            ];

            // Role columns in the same order as the header row.
            for role in &sorted {
                let info = record.role_info.get(&role.id).unwrap_or(&default_info);
                let write_permissions = info.write_permissions();
                row.push(flag_cell(info.is_default_visible, value_center_style()));
                row.push(count_cell(write_permissions.len(), value_style()));
                row.push(Cell::new(
                    write_permissions
                        .iter()
                        .map(|permission| permission.display_label())
                        .collect::<Vec<_>>()
                        .join("\n"),
                    value_long_style(),
                ));
            }
            table.push_row(row);
        }
    }

    let mut column = 0u16;
    let mut next_column = |style: StyleSet, table: &mut Table| {
        table.set_column_style(column, style);
        column += 1;
    };
    next_column(StyleSet::new().width(NAME_WIDTH), &mut table);
    for _ in 0..4 {
        next_column(StyleSet::new().width(DETAILS_WIDTH), &mut table);
    }
    next_column(StyleSet::new().width(VALUE_WIDTH), &mut table);
    next_column(StyleSet::new().width(VALUE_WIDTH).border_right(), &mut table);
    next_column(StyleSet::new().width(VALUE_WIDTH).border_right(), &mut table);
    for _ in &sorted {
        next_column(StyleSet::new().width(VALUE_WIDTH), &mut table);
        next_column(StyleSet::new().width(VALUE_WIDTH), &mut table);
        next_column(
            StyleSet::new().width(PERMISSIONS_WIDTH).border_right(),
            &mut table,
        );
    }

    table.set_freeze(1, 1);
    Ok(table)
}

/// Builds the user / role membership matrix: one row per user, one centred
/// `x` per role membership. Role columns are sorted alphabetically.
pub fn user_matrix(users: &[&User]) -> Table {
    let role_names: BTreeSet<&str> = users
        .iter()
        .flat_map(|user| user.roles.iter().map(|role| role.name.as_str()))
        .collect();
    let header_angle = StyleSet::new()
        .bold()
        .angle()
        .background_color(Rgb::new(0xE8E8E8));

    let mut table = Table::new();

    let mut header = vec![
        Cell::new("FIRST_NAME", header_style()),
        Cell::new("LAST_NAME", header_style()),
        Cell::new("EMAIL", header_style()),
    ];
    for role_name in &role_names {
        header.push(Cell::new(*role_name, header_angle.clone()));
    }
    table.push_row(header);

    for user in users {
        let memberships: BTreeSet<&str> =
            user.roles.iter().map(|role| role.name.as_str()).collect();
        let mut row = vec![
            Cell::new(user.first_name.clone(), value_style()),
            Cell::new(user.last_name.clone(), value_style()),
            Cell::new(user.email.clone(), value_style()),
        ];
        for role_name in &role_names {
            row.push(flag_cell(memberships.contains(role_name), value_center_style()));
        }
        table.push_row(row);
    }

    table.set_column_style(0, StyleSet::new().width(15));
    table.set_column_style(1, StyleSet::new().width(25));
    table.set_column_style(2, StyleSet::new().width(35));
    for index in 0..role_names.len() {
        table.set_column_style(3 + index as u16, StyleSet::new().width(6));
    }

    table.set_freeze(1, 3);
    table
}
