use scimsdk_lib::types::{Group, User};
use serde::Serialize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

#[derive(Clone, Debug)]
pub enum OutputFormat {
    Table,
    Json,
    Markdown,
}

#[derive(Tabled, Serialize)]
struct UserRow {
    #[tabled(rename = "ID")]
    #[serde(rename = "ID")]
    id: String,
    #[tabled(rename = "User Name")]
    #[serde(rename = "User Name")]
    user_name: String,
    #[tabled(rename = "Name")]
    #[serde(rename = "Name")]
    name: String,
    #[tabled(rename = "Active")]
    #[serde(rename = "Active")]
    active: String,
    #[tabled(rename = "Groups")]
    #[serde(rename = "Groups")]
    groups: usize,
}

#[derive(Tabled, Serialize)]
struct GroupRow {
    #[tabled(rename = "ID")]
    #[serde(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    #[serde(rename = "Name")]
    display_name: String,
    #[tabled(rename = "Members")]
    #[serde(rename = "Members")]
    members: usize,
    #[tabled(rename = "Emails")]
    #[serde(rename = "Emails")]
    emails: String,
}

#[derive(Serialize)]
struct StatusRow<'a> {
    id: &'a str,
    action: &'a str,
    ok: bool,
}

fn build_user_rows(users: &[User]) -> Vec<UserRow> {
    users
        .iter()
        .map(|u| UserRow {
            id: u.id.clone(),
            user_name: u.user_name.clone(),
            name: display_name(u),
            active: if u.active { "yes" } else { "no" }.to_string(),
            groups: u.groups.len(),
        })
        .collect()
}

fn build_group_rows(groups: &[Group]) -> Vec<GroupRow> {
    groups
        .iter()
        .map(|g| GroupRow {
            id: g.id.clone(),
            display_name: g.display_name.clone(),
            members: g.members.len(),
            emails: g
                .members
                .iter()
                .map(|m| m.email.as_str())
                .collect::<Vec<_>>()
                .join(", "),
        })
        .collect()
}

// Prefer the server's formatted name, then the display name, then the parts.
fn display_name(user: &User) -> String {
    if !user.name.formatted.is_empty() {
        return user.name.formatted.clone();
    }
    if !user.display_name.is_empty() {
        return user.display_name.clone();
    }
    format!("{} {}", user.name.given_name, user.name.family_name)
        .trim()
        .to_string()
}

fn render<T: Tabled>(rows: Vec<T>, format: &OutputFormat) -> String {
    let mut table = Table::new(rows);
    if let OutputFormat::Markdown = format {
        table.with(Style::markdown());
    }
    table.to_string()
}

pub fn print_users_table(users: &[User], format: &OutputFormat) {
    println!("{}", render(build_user_rows(users), format));
}

pub fn print_groups_table(groups: &[Group], format: &OutputFormat) {
    println!("{}", render(build_group_rows(groups), format));
}

/// Reports the boolean outcome of a PATCH or DELETE.
pub fn print_status(format: &OutputFormat, action: &str, id: &str, ok: bool) {
    match format {
        OutputFormat::Json => print_json(&StatusRow { id, action, ok }),
        _ if ok => println!("{} {}", id, action),
        _ => println!("{} not {}", id, action),
    }
}

pub fn print_json<T: serde::Serialize>(data: &T) {
    match serde_json::to_string_pretty(data) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize to JSON: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scimsdk_lib::scimsdk_api::types::{GroupResource, ListResponse, UserResource};

    fn load_users_fixture() -> Vec<User> {
        let json_str = include_str!("../../scimsdk_api/tests/fixtures/users_page.json");
        let page: ListResponse<UserResource> = serde_json::from_str(json_str).unwrap();
        page.resources.into_iter().map(User::from).collect()
    }

    fn load_group_fixture() -> Group {
        let json_str = include_str!("../../scimsdk_api/tests/fixtures/group.json");
        let resource: GroupResource = serde_json::from_str(json_str).unwrap();
        resource.into()
    }

    #[test]
    fn test_build_user_rows_mapping() {
        let rows = build_user_rows(&load_users_fixture());
        assert_eq!(rows.len(), 2);

        assert_eq!(rows[0].id, "a-0001");
        assert_eq!(rows[0].user_name, "alice@example.com");
        assert_eq!(rows[0].name, "Alice Liddell");
        assert_eq!(rows[0].active, "yes");
        assert_eq!(rows[0].groups, 1);

        assert_eq!(rows[1].name, "Bob Stone");
        assert_eq!(rows[1].active, "no");
        assert_eq!(rows[1].groups, 0);
    }

    #[test]
    fn test_display_name_falls_back_to_parts() {
        let mut user = User::default();
        user.name.given_name = "Carol".to_string();
        user.name.family_name = "Reed".to_string();
        assert_eq!(display_name(&user), "Carol Reed");
    }

    #[test]
    fn test_build_group_rows_mapping() {
        let rows = build_group_rows(&[load_group_fixture()]);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, "r-0001");
        assert_eq!(rows[0].display_name, "Engineering");
        assert_eq!(rows[0].members, 2);
        assert_eq!(rows[0].emails, "alice@example.com, bob@example.com");
    }

    #[test]
    fn test_build_group_rows_empty() {
        assert!(build_group_rows(&[]).is_empty());
    }

    #[test]
    fn test_markdown_table_structure() {
        let out = render(build_group_rows(&[load_group_fixture()]), &OutputFormat::Markdown);
        let lines: Vec<&str> = out.lines().collect();
        assert!(lines[0].contains("| ID"));
        assert!(lines[1].starts_with("|-"));
        assert!(lines[2].contains("Engineering"));
    }

    #[test]
    fn test_json_users_serializable() {
        let rows = build_user_rows(&load_users_fixture());
        let value = serde_json::to_value(&rows).unwrap();
        assert_eq!(value[0]["User Name"], "alice@example.com");
        assert_eq!(value[1]["Active"], "no");
    }
}
