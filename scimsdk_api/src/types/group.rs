//! Group resources as they appear on the wire.

use serde::{Deserialize, Serialize};

use super::{Meta, GROUP_SCHEMA};

/// Full group record returned by the `/Groups` endpoints.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GroupResource {
    #[serde(default)]
    pub schemas: Vec<String>,
    pub id: String,
    pub display_name: String,
    #[serde(default)]
    pub members: Vec<Member>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Meta>,
}

/// A group member reference: `value` is the user id, `display` its label
/// (the user's email on most servers).
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Member {
    pub value: String,
    pub display: String,
}

impl Member {
    pub fn new(value: &str, display: &str) -> Self {
        Self {
            value: value.to_string(),
            display: display.to_string(),
        }
    }
}

/// Body for `POST /Groups` and `PUT /Groups/{id}`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GroupRequest {
    pub schemas: Vec<String>,
    pub display_name: String,
    pub members: Vec<Member>,
}

impl GroupRequest {
    pub fn new(display_name: &str, members: Vec<Member>) -> Self {
        Self {
            schemas: vec![GROUP_SCHEMA.to_string()],
            display_name: display_name.to_string(),
            members,
        }
    }
}
