//! Joins roles, object definitions, object counts, and categories into the
//! per-(object definition, role) structure the table builder consumes.
//!
//! All indexes are `IndexMap`s so that encounter order survives the join:
//! object-definition rows keep the order the source returned them in, and
//! role columns keep their encounter order as the tie-break of the member
//! count sort.

use indexmap::IndexMap;
use tracing::debug;

use crate::error::{Result, ToolError};
use crate::model::{
    DEFAULT_CATEGORY_COLOR, Access, ObjectDefinition, ObjectType, Permission, RoleDetail,
};
use crate::render::Rgb;

/// A category (layer) grouping object definitions, with the display color
/// used for its banner and row tints.
#[derive(Debug, Clone, PartialEq)]
pub struct Category {
    pub name: String,
    pub internal_id: String,
    pub color: Rgb,
}

/// Role-specific slice of an aggregate record: visibility plus the granted
/// permissions. Present for every role, even when nothing was granted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RoleGrantInfo {
    pub is_default_visible: bool,
    pub permissions: Vec<Permission>,
}

impl RoleGrantInfo {
    /// The write-access permissions of this grant, in grant order.
    pub fn write_permissions(&self) -> Vec<&Permission> {
        self.permissions
            .iter()
            .filter(|permission| permission.access == Access::Write)
            .collect()
    }
}

/// One object definition joined with everything a report row needs.
#[derive(Debug, Clone, PartialEq)]
pub struct DefinitionRecord {
    pub id: String,
    pub name: String,
    pub name_internal: Option<String>,
    pub is_bpmn: bool,
    pub object_type: ObjectType,
    pub object_count: u64,
    pub questionnaire_labels: Vec<String>,
    pub role_info: IndexMap<String, RoleGrantInfo>,
}

/// The fully joined aggregate for one report run.
#[derive(Debug, Clone)]
pub struct CatalogueAggregate {
    pub records: IndexMap<String, DefinitionRecord>,
    pub categories: IndexMap<String, Category>,
}

impl CatalogueAggregate {
    /// Runs the whole join: category index, questionnaire labels, permission
    /// index, and role population.
    pub fn build(
        roles: &IndexMap<String, RoleDetail>,
        definitions: &IndexMap<String, ObjectDefinition>,
        counts: &IndexMap<String, u64>,
    ) -> Result<Self> {
        let categories = build_category_index(definitions)?;
        let questionnaires = extract_questionnaire_labels(roles)?;
        let mut records = build_permission_index(definitions, counts, &questionnaires);
        populate_role_info(&mut records, roles);
        debug!(
            definitions = records.len(),
            categories = categories.len(),
            "aggregate constructed"
        );
        Ok(Self {
            records,
            categories,
        })
    }

    /// Groups the records by category, ordered by the given priority list.
    pub fn grouped_by_category(&self, priority: &[String]) -> Vec<(String, Vec<&DefinitionRecord>)> {
        group_by_category(&self.records, priority)
    }
}

/// Builds the category index from the object definitions. The first
/// definition observed for a category wins (display attributes are constant
/// within one object type); a missing color falls back to the default grey.
pub fn build_category_index(
    definitions: &IndexMap<String, ObjectDefinition>,
) -> Result<IndexMap<String, Category>> {
    let mut categories: IndexMap<String, Category> = IndexMap::new();

    for definition in definitions.values() {
        let object_type = &definition.object_type;
        if categories.contains_key(&object_type.category_internal) {
            continue;
        }
        let hex = object_type
            .color
            .as_deref()
            .unwrap_or(DEFAULT_CATEGORY_COLOR);
        let color = Rgb::from_hex(hex)?;
        categories.insert(
            object_type.category_internal.clone(),
            Category {
                name: object_type.category.clone(),
                internal_id: object_type.category_internal.clone(),
                color,
            },
        );
    }

    Ok(categories)
}

/// Derives the questionnaire labels per object definition from one arbitrary
/// role's grants. All roles carry the same static permission set, differing
/// only in granted access, so any role detail serves as the source.
///
/// Fails when no role detail is available: a report cannot be produced
/// without at least one role.
pub fn extract_questionnaire_labels(
    roles: &IndexMap<String, RoleDetail>,
) -> Result<IndexMap<String, Vec<String>>> {
    let role = roles.values().next().ok_or_else(|| {
        ToolError::MissingData("no role detail available to derive questionnaire labels".into())
    })?;

    Ok(role
        .object_definition_permissions
        .iter()
        .map(|grant| {
            let labels = grant
                .permissions
                .iter()
                .filter(|permission| permission.is_questionnaire())
                .map(Permission::display_label)
                .collect();
            (grant.id.clone(), labels)
        })
        .collect())
}

/// Initialises one record per object definition, in source encounter order.
/// A definition without a count or questionnaire entry resolves to zero
/// instances / no questionnaires.
pub fn build_permission_index(
    definitions: &IndexMap<String, ObjectDefinition>,
    counts: &IndexMap<String, u64>,
    questionnaires: &IndexMap<String, Vec<String>>,
) -> IndexMap<String, DefinitionRecord> {
    definitions
        .values()
        .map(|definition| {
            let record = DefinitionRecord {
                id: definition.id.clone(),
                name: definition.name.clone(),
                name_internal: definition.name_internal.clone(),
                is_bpmn: definition.is_bpmn,
                object_type: definition.object_type.clone(),
                object_count: counts.get(&definition.id).copied().unwrap_or(0),
                questionnaire_labels: questionnaires
                    .get(&definition.id)
                    .cloned()
                    .unwrap_or_default(),
                role_info: IndexMap::new(),
            };
            (definition.id.clone(), record)
        })
        .collect()
}

/// Writes each role's grants into the matching records. Every record ends
/// up with an entry for every role, an empty grant when the role granted
/// nothing. A grant for an object-definition id absent from the index is
/// skipped: the definition may have been deleted after the role snapshot
/// was taken.
pub fn populate_role_info(
    records: &mut IndexMap<String, DefinitionRecord>,
    roles: &IndexMap<String, RoleDetail>,
) {
    for record in records.values_mut() {
        for role_id in roles.keys() {
            record
                .role_info
                .insert(role_id.clone(), RoleGrantInfo::default());
        }
    }

    for role in roles.values() {
        for grant in &role.object_definition_permissions {
            let Some(record) = records.get_mut(&grant.id) else {
                continue;
            };
            record.role_info.insert(
                role.id.clone(),
                RoleGrantInfo {
                    is_default_visible: grant.is_default_visible,
                    permissions: grant.permissions.clone(),
                },
            );
        }
    }
}

/// Groups records by category internal id, ordered by the caller-supplied
/// priority list. Categories not present in the list sort after all listed
/// ones, keeping their encounter order, mirroring the display convention of
/// the source catalogue's UI.
pub fn group_by_category<'a>(
    records: &'a IndexMap<String, DefinitionRecord>,
    priority: &[String],
) -> Vec<(String, Vec<&'a DefinitionRecord>)> {
    let mut groups: IndexMap<String, Vec<&DefinitionRecord>> = IndexMap::new();
    for record in records.values() {
        groups
            .entry(record.object_type.category_internal.clone())
            .or_default()
            .push(record);
    }

    let mut ordered: Vec<(String, Vec<&DefinitionRecord>)> = groups.into_iter().collect();
    ordered.sort_by_key(|(category, _)| {
        priority
            .iter()
            .position(|entry| entry == category)
            .unwrap_or(usize::MAX)
    });
    ordered
}

/// Counts the roles, excluding the reserved administrators role, that hold
/// at least one write permission on this object definition.
pub fn non_admin_write_role_count(
    record: &DefinitionRecord,
    roles: &IndexMap<String, RoleDetail>,
    admin_role: &str,
) -> usize {
    record
        .role_info
        .iter()
        .filter(|(role_id, _)| {
            roles
                .get(role_id.as_str())
                .map(|role| role.internal_name != admin_role)
                .unwrap_or(true)
        })
        .filter(|(_, info)| !info.write_permissions().is_empty())
        .count()
}

/// Roles ordered for report columns: descending member count, encounter
/// order on ties (the sort is stable).
pub fn sorted_roles(roles: &IndexMap<String, RoleDetail>) -> Vec<&RoleDetail> {
    let mut sorted: Vec<&RoleDetail> = roles.values().collect();
    sorted.sort_by_key(|role| std::cmp::Reverse(role.members.len()));
    sorted
}
