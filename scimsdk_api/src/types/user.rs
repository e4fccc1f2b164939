//! User resources as they appear on the wire.

use serde::{Deserialize, Serialize};

use super::{Meta, USER_SCHEMA};

/// Full user record returned by the `/Users` endpoints.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserResource {
    #[serde(default)]
    pub schemas: Vec<String>,

    /// Server-assigned identifier.
    pub id: String,

    #[serde(default)]
    pub active: bool,

    #[serde(default)]
    pub display_name: String,

    #[serde(default)]
    pub emails: Vec<UserEmail>,

    /// Groups the user belongs to. Read-only on the server side.
    #[serde(default)]
    pub groups: Vec<UserGroupRef>,

    #[serde(default)]
    pub name: UserName,

    /// Login name, usually an email address.
    pub user_name: String,

    #[serde(default)]
    pub user_type: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Meta>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct UserEmail {
    #[serde(default)]
    pub primary: bool,
    pub value: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct UserGroupRef {
    pub value: String,
    #[serde(rename = "$ref", default)]
    pub reference: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserName {
    #[serde(default)]
    pub family_name: String,
    #[serde(default)]
    pub formatted: String,
    #[serde(default)]
    pub given_name: String,
}

/// Body for `POST /Users` and `PUT /Users/{id}`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserRequest {
    pub schemas: Vec<String>,
    pub user_name: String,
    pub name: UserNameRequest,
    pub active: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserNameRequest {
    pub given_name: String,
    pub family_name: String,
}

impl UserRequest {
    pub fn new(user_name: &str, given_name: &str, family_name: &str, active: bool) -> Self {
        Self {
            schemas: vec![USER_SCHEMA.to_string()],
            user_name: user_name.to_string(),
            name: UserNameRequest {
                given_name: given_name.to_string(),
                family_name: family_name.to_string(),
            },
            active,
        }
    }
}
