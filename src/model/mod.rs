//! Read-only snapshot records fetched from the catalogue service.
//!
//! All entities are constructed once per report run from collaborator
//! payloads and never mutated afterwards. Unknown payload fields are
//! ignored during deserialization.

use serde::Deserialize;

/// Internal name of the reserved administrators role, excluded from the
/// non-admin write-permission count.
pub const ADMINISTRATORS_ROLE: &str = "administrators";

/// Fallback category color used when the source omits one.
pub const DEFAULT_CATEGORY_COLOR: &str = "#a9a9a9";

/// Access level carried by a permission entry. Levels other than `read` and
/// `write` are preserved but not distinguished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum Access {
    Read,
    Write,
    Other,
}

impl From<String> for Access {
    fn from(value: String) -> Self {
        match value.as_str() {
            "read" => Access::Read,
            "write" => Access::Write,
            _ => Access::Other,
        }
    }
}

/// A single permission entry within an object-definition grant.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Permission {
    pub key: String,
    pub label: String,
    pub access: Access,
    pub position: i64,
}

impl Permission {
    /// A key that is a pure hexadecimal string denotes a questionnaire
    /// permission rather than a named capability.
    pub fn is_questionnaire(&self) -> bool {
        !self.key.is_empty() && self.key.chars().all(|ch| ch.is_ascii_hexdigit())
    }

    /// Display label; questionnaire permissions are prefixed with `#`.
    pub fn display_label(&self) -> String {
        if self.is_questionnaire() {
            format!("#{}", self.label)
        } else {
            self.label.clone()
        }
    }
}

/// Per-object-definition access grant within a role.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ObjectDefinitionGrant {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub name_internal: Option<String>,
    #[serde(default)]
    pub permissions: Vec<Permission>,
    #[serde(default)]
    pub is_default_visible: bool,
    #[serde(default)]
    pub is_bpmn: bool,
}

/// A member of a role.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RoleMember {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

/// Full role snapshot including members and the per-object-definition
/// permission grants.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RoleDetail {
    pub id: String,
    pub name: String,
    pub internal_name: String,
    #[serde(default)]
    pub members: Vec<RoleMember>,
    #[serde(default)]
    pub object_definition_permissions: Vec<ObjectDefinitionGrant>,
}

/// Object type carried by an object definition; the category fields drive
/// grouping and coloring of the report rows.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ObjectType {
    pub template_id: String,
    pub name: String,
    pub name_internal: String,
    pub category: String,
    pub category_internal: String,
    #[serde(default)]
    pub color: Option<String>,
}

/// A schema entity of the catalogue that object instances conform to.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ObjectDefinition {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub name_internal: Option<String>,
    #[serde(default)]
    pub is_bpmn: bool,
    pub object_type: ObjectType,
}

/// Role membership reference on a user record.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UserRoleRef {
    pub name: String,
}

/// A user account, with role memberships when fetched in detail.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct User {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub roles: Vec<UserRoleRef>,
}
