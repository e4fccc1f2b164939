//! Public user and group shapes, independent of the wire format.

use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct User {
    pub id: String,
    pub active: bool,
    pub display_name: String,
    pub emails: Vec<UserEmail>,
    pub groups: Vec<UserGroup>,
    pub name: UserName,
    pub user_name: String,
    pub user_type: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct UserEmail {
    pub primary: bool,
    pub value: String,
}

/// A group the user belongs to: its id and the server's reference to it.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct UserGroup {
    pub value: String,
    pub reference: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct UserName {
    pub family_name: String,
    pub formatted: String,
    pub given_name: String,
}

/// Input for creating a user. `user_name`, `given_name` and `family_name`
/// are required.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct CreateUser {
    pub user_name: String,
    pub given_name: String,
    pub family_name: String,
    pub active: bool,
}

/// Input for replacing a user wholesale. Same requirements as [`CreateUser`].
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct ReplaceUser {
    pub user_name: String,
    pub given_name: String,
    pub family_name: String,
    pub active: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq)]
pub struct UpdateUser {
    pub active: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Group {
    pub id: String,
    pub display_name: String,
    pub members: Vec<GroupMember>,
    pub meta: Option<GroupMeta>,
}

/// A member of a group: the user id and the user's email.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupMember {
    pub id: String,
    pub email: String,
}

impl GroupMember {
    pub fn new(id: &str, email: &str) -> Self {
        Self {
            id: id.to_string(),
            email: email.to_string(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct GroupMeta {
    pub resource_type: String,
    pub location: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct CreateGroupBody {
    pub display_name: String,
    pub members: Vec<GroupMember>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct ReplaceGroupBody {
    pub display_name: String,
    pub members: Vec<GroupMember>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct UpdateGroupReplaceName {
    pub display_name: String,
}

/// Listing options. Zero means "use the default" (page size 5, offset 1);
/// negative values are rejected.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct PaginationOptions {
    pub page_size: i64,
    pub offset: i64,
    pub filter: Option<String>,
}

impl PaginationOptions {
    pub fn with_page_size(mut self, page_size: i64) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn with_offset(mut self, offset: i64) -> Self {
        self.offset = offset;
        self
    }

    pub fn with_filter(mut self, filter: &str) -> Self {
        self.filter = Some(filter.to_string());
        self
    }
}
