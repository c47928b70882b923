use calamine::{DataType, Reader, Xlsx, open_workbook};
use catalogue_tools::model::{
    Access, ObjectDefinition, ObjectDefinitionGrant, ObjectType, Permission, RoleDetail,
    RoleMember,
};
use catalogue_tools::render::{
    Cell, CsvRenderer, ExcelRenderer, Renderer, StyleSet, Table,
};
use catalogue_tools::report::aggregate::CatalogueAggregate;
use catalogue_tools::report::table::{ReportOptions, permission_matrix};
use indexmap::IndexMap;
use std::fs;
use tempfile::tempdir;

fn fixture_roles() -> IndexMap<String, RoleDetail> {
    let permissions = vec![
        Permission {
            key: "manage_objects".to_string(),
            label: "Manage objects".to_string(),
            access: Access::Write,
            position: 0,
        },
        Permission {
            key: "0aF3".to_string(),
            label: "Risk assessment".to_string(),
            access: Access::Write,
            position: 1,
        },
    ];
    let role = RoleDetail {
        id: "r1".to_string(),
        name: "Editor".to_string(),
        internal_name: "editors".to_string(),
        members: vec![RoleMember {
            id: "m1".to_string(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "ada@example.com".to_string(),
        }],
        object_definition_permissions: vec![ObjectDefinitionGrant {
            id: "d1".to_string(),
            name: "Invoice".to_string(),
            name_internal: Some("invoice".to_string()),
            permissions,
            is_default_visible: true,
            is_bpmn: false,
        }],
    };
    IndexMap::from([("r1".to_string(), role)])
}

fn fixture_definitions() -> IndexMap<String, ObjectDefinition> {
    let definition = ObjectDefinition {
        id: "d1".to_string(),
        name: "Invoice".to_string(),
        name_internal: Some("invoice".to_string()),
        is_bpmn: false,
        object_type: ObjectType {
            template_id: "tpl-business".to_string(),
            name: "Business".to_string(),
            name_internal: "business_type".to_string(),
            category: "Business".to_string(),
            category_internal: "business_layer".to_string(),
            color: Some("#1EAAF0".to_string()),
        },
    };
    IndexMap::from([("d1".to_string(), definition)])
}

fn fixture_table() -> Table {
    let roles = fixture_roles();
    let definitions = fixture_definitions();
    let counts = IndexMap::from([("d1".to_string(), 0u64)]);
    let aggregate =
        CatalogueAggregate::build(&roles, &definitions, &counts).expect("aggregate built");
    permission_matrix(&aggregate, &roles, &ReportOptions::default()).expect("table built")
}

#[test]
fn csv_rendering_is_deterministic() {
    let table = fixture_table();
    let temp_dir = tempdir().expect("temporary directory");
    let first_path = temp_dir.path().join("first.csv");
    let second_path = temp_dir.path().join("second.csv");

    CsvRenderer.render(&table, &first_path).expect("first render");
    CsvRenderer.render(&table, &second_path).expect("second render");

    let first = fs::read(&first_path).expect("first file read");
    let second = fs::read(&second_path).expect("second file read");
    assert_eq!(first, second);
}

#[test]
fn csv_rows_join_values_with_semicolons() {
    let mut table = Table::new();
    table.push_row(vec![
        Cell::new("alpha", StyleSet::new().bold()),
        Cell::blank(StyleSet::new()),
        Cell::new(2u64, StyleSet::new()),
    ]);
    table.push_row(vec![
        Cell::new("beta", StyleSet::new()),
        Cell::new("x", StyleSet::new().center()),
        Cell::blank(StyleSet::new()),
    ]);

    let temp_dir = tempdir().expect("temporary directory");
    let path = temp_dir.path().join("plain.csv");
    CsvRenderer.render(&table, &path).expect("rendered");

    let content = fs::read_to_string(&path).expect("file read");
    assert_eq!(content, "alpha; ; 2\nbeta; x; \n");
}

#[test]
fn excel_file_contains_headers_and_typed_values() {
    let table = fixture_table();
    let temp_dir = tempdir().expect("temporary directory");
    let path = temp_dir.path().join("matrix.xlsx");

    ExcelRenderer.render(&table, &path).expect("rendered");

    let mut workbook: Xlsx<_> = open_workbook(&path).expect("workbook opens");
    let range = workbook
        .worksheet_range("Sheet1")
        .expect("sheet present")
        .expect("range read");

    // Header, one category banner, one definition row.
    assert_eq!(range.height(), 3);
    assert_eq!(
        range.get_value((0, 0)),
        Some(&DataType::String("object definition".to_string()))
    );
    assert_eq!(
        range.get_value((1, 0)),
        Some(&DataType::String("Business".to_string()))
    );
    assert_eq!(
        range.get_value((2, 0)),
        Some(&DataType::String("[BUS] Invoice".to_string()))
    );
    // Questionnaire label with its hash prefix.
    assert_eq!(
        range.get_value((2, 5)),
        Some(&DataType::String("#Risk assessment".to_string()))
    );
    // Zero object count renders blank, not 0.
    assert!(matches!(
        range.get_value((2, 6)),
        None | Some(DataType::Empty)
    ));
    // One non-admin role with write permissions, written as a number.
    assert_eq!(range.get_value((2, 7)), Some(&DataType::Float(1.0)));
    // Two write permissions for the Editor role column.
    assert_eq!(range.get_value((2, 9)), Some(&DataType::Float(2.0)));
    assert_eq!(
        range.get_value((2, 10)),
        Some(&DataType::String("Manage objects\n#Risk assessment".to_string()))
    );
}

#[test]
fn excel_render_overwrites_existing_file() {
    let table = fixture_table();
    let temp_dir = tempdir().expect("temporary directory");
    let path = temp_dir.path().join("matrix.xlsx");
    fs::write(&path, b"stale content").expect("stale file written");

    ExcelRenderer.render(&table, &path).expect("rendered");

    let mut workbook: Xlsx<_> = open_workbook(&path).expect("workbook opens");
    let range = workbook
        .worksheet_range("Sheet1")
        .expect("sheet present")
        .expect("range read");
    assert_eq!(range.height(), 3);
}

#[test]
fn csv_render_fails_on_unwritable_path() {
    let table = fixture_table();
    let temp_dir = tempdir().expect("temporary directory");
    let path = temp_dir.path().join("missing-directory").join("matrix.csv");

    let error = CsvRenderer.render(&table, &path).expect_err("path is not writable");

    assert!(matches!(error, catalogue_tools::ToolError::Io(_)));
}
