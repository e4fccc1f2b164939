//! SCIM PATCH requests.
//!
//! Each [`PatchOperation`] variant owns its typed payload. On the wire every
//! variant flattens to the same `{op, path?, value?}` object, so the enum
//! converts through [`RawPatchOperation`] in both directions.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::{Member, PATCH_SCHEMA};

const MEMBERS_PATH: &str = "members";
const MEMBER_FILTER_PREFIX: &str = "members[value eq \"";
const MEMBER_FILTER_SUFFIX: &str = "\"]";

/// Body for `PATCH /{resource}/{id}`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PatchRequest {
    pub schemas: Vec<String>,
    #[serde(rename = "Operations")]
    pub operations: Vec<PatchOperation>,
}

impl PatchRequest {
    pub fn new(operations: Vec<PatchOperation>) -> Self {
        Self {
            schemas: vec![PATCH_SCHEMA.to_string()],
            operations,
        }
    }

    pub fn single(operation: PatchOperation) -> Self {
        Self::new(vec![operation])
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(try_from = "RawPatchOperation", into = "RawPatchOperation")]
pub enum PatchOperation {
    /// `{"op":"add","path":"members","value":[...]}`
    AddMembers(Vec<Member>),
    /// `{"op":"replace","path":"members","value":[...]}`
    ReplaceMembers(Vec<Member>),
    /// `{"op":"replace","value":{"displayName":...}}`
    ReplaceName { display_name: String },
    /// `{"op":"remove","path":"members[value eq \"<id>\"]"}`
    RemoveMember { member_id: String },
    /// `{"op":"replace","value":{"active":...}}`
    ReplaceActive { active: bool },
}

impl PatchOperation {
    /// The SCIM `op` keyword for this operation.
    pub fn op(&self) -> &'static str {
        match self {
            PatchOperation::AddMembers(_) => "add",
            PatchOperation::ReplaceMembers(_)
            | PatchOperation::ReplaceName { .. }
            | PatchOperation::ReplaceActive { .. } => "replace",
            PatchOperation::RemoveMember { .. } => "remove",
        }
    }
}

/// The untyped shape every operation takes on the wire.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RawPatchOperation {
    pub op: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
}

impl From<PatchOperation> for RawPatchOperation {
    fn from(operation: PatchOperation) -> Self {
        let op = operation.op().to_string();
        let (path, value) = match operation {
            PatchOperation::AddMembers(members) | PatchOperation::ReplaceMembers(members) => (
                Some(MEMBERS_PATH.to_string()),
                Some(json!(members)),
            ),
            PatchOperation::ReplaceName { display_name } => {
                (None, Some(json!({ "displayName": display_name })))
            }
            PatchOperation::RemoveMember { member_id } => (
                Some(format!(
                    "{}{}{}",
                    MEMBER_FILTER_PREFIX, member_id, MEMBER_FILTER_SUFFIX
                )),
                None,
            ),
            PatchOperation::ReplaceActive { active } => (None, Some(json!({ "active": active }))),
        };
        RawPatchOperation { op, path, value }
    }
}

impl TryFrom<RawPatchOperation> for PatchOperation {
    type Error = String;

    fn try_from(raw: RawPatchOperation) -> Result<Self, Self::Error> {
        match (raw.op.to_ascii_lowercase().as_str(), raw.path.as_deref()) {
            ("add", Some(MEMBERS_PATH)) => Ok(PatchOperation::AddMembers(members_value(raw.value)?)),
            ("replace", Some(MEMBERS_PATH)) => {
                Ok(PatchOperation::ReplaceMembers(members_value(raw.value)?))
            }
            ("replace", None) => {
                let value = raw.value.unwrap_or(Value::Null);
                if let Some(display_name) = value.get("displayName").and_then(Value::as_str) {
                    Ok(PatchOperation::ReplaceName {
                        display_name: display_name.to_string(),
                    })
                } else if let Some(active) = value.get("active").and_then(Value::as_bool) {
                    Ok(PatchOperation::ReplaceActive { active })
                } else {
                    Err(format!("unsupported replace value: {}", value))
                }
            }
            ("remove", Some(path)) => path
                .strip_prefix(MEMBER_FILTER_PREFIX)
                .and_then(|rest| rest.strip_suffix(MEMBER_FILTER_SUFFIX))
                .map(|member_id| PatchOperation::RemoveMember {
                    member_id: member_id.to_string(),
                })
                .ok_or_else(|| format!("unsupported remove path: {}", path)),
            (op, path) => Err(format!(
                "unsupported patch operation: op={} path={}",
                op,
                path.unwrap_or("<none>")
            )),
        }
    }
}

fn members_value(value: Option<Value>) -> Result<Vec<Member>, String> {
    serde_json::from_value(value.unwrap_or(Value::Null)).map_err(|e| e.to_string())
}
