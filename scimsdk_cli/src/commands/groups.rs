use anyhow::{bail, Result};
use clap::{Args, Subcommand};
use scimsdk_lib::types::{CreateGroupBody, GroupMember, ReplaceGroupBody, UpdateGroupReplaceName};
use scimsdk_lib::{Client, Context};

use super::{collect, ListArgs};
use crate::output::{print_groups_table, print_json, print_status, OutputFormat};

#[derive(Args)]
pub struct GroupsArgs {
    #[command(subcommand)]
    pub command: GroupsCommand,
}

#[derive(Subcommand)]
pub enum GroupsCommand {
    /// List groups page by page
    List(ListArgs),
    /// Get a single group by ID
    Find { id: String },
    /// Create a group
    Create(GroupFields),
    /// Replace a group's name and member list
    Replace {
        id: String,
        #[command(flatten)]
        fields: GroupFields,
    },
    /// Change a group's display name
    Rename {
        id: String,
        #[arg(long)]
        name: String,
    },
    /// Add members to a group
    AddMember {
        id: String,
        /// Member as USER_ID:EMAIL (repeatable)
        #[arg(long = "member", required = true)]
        members: Vec<String>,
    },
    /// Replace all members of a group
    SetMembers {
        id: String,
        /// Member as USER_ID:EMAIL (repeatable)
        #[arg(long = "member")]
        members: Vec<String>,
    },
    /// Remove one member from a group
    RemoveMember { id: String, member_id: String },
    /// Delete a group
    Delete { id: String },
}

#[derive(Args)]
pub struct GroupFields {
    #[arg(long)]
    pub name: String,

    /// Member as USER_ID:EMAIL (repeatable)
    #[arg(long = "member")]
    pub members: Vec<String>,
}

/// Parses `USER_ID:EMAIL` member arguments.
pub fn parse_members(raw: &[String]) -> Result<Vec<GroupMember>> {
    raw.iter()
        .map(|entry| match entry.split_once(':') {
            Some((id, email)) => Ok(GroupMember::new(id.trim(), email.trim())),
            None => bail!("invalid member '{}': expected USER_ID:EMAIL", entry),
        })
        .collect()
}

pub async fn run(
    args: &GroupsArgs,
    client: &Client,
    ctx: &Context,
    format: &OutputFormat,
) -> Result<()> {
    let groups = client.groups();
    match &args.command {
        GroupsCommand::List(list) => {
            let it = groups.list(ctx, Some(list.options()))?;
            let found = collect(it, list.limit).await?;
            match format {
                OutputFormat::Json => print_json(&found),
                _ => print_groups_table(&found, format),
            }
        }
        GroupsCommand::Find { id } => {
            let group = groups.find(ctx, id).await?;
            match format {
                OutputFormat::Json => print_json(&group),
                _ => print_groups_table(&[group], format),
            }
        }
        GroupsCommand::Create(fields) => {
            let body = CreateGroupBody {
                display_name: fields.name.clone(),
                members: parse_members(&fields.members)?,
            };
            let group = groups.create(ctx, body).await?;
            match format {
                OutputFormat::Json => print_json(&group),
                _ => print_groups_table(&[group], format),
            }
        }
        GroupsCommand::Replace { id, fields } => {
            let body = ReplaceGroupBody {
                display_name: fields.name.clone(),
                members: parse_members(&fields.members)?,
            };
            let group = groups.replace(ctx, id, body).await?;
            match format {
                OutputFormat::Json => print_json(&group),
                _ => print_groups_table(&[group], format),
            }
        }
        GroupsCommand::Rename { id, name } => {
            let body = UpdateGroupReplaceName {
                display_name: name.clone(),
            };
            let ok = groups.update_replace_name(ctx, id, body).await?;
            print_status(format, "renamed", id, ok);
        }
        GroupsCommand::AddMember { id, members } => {
            let members = parse_members(members)?;
            let ok = groups.update_add_members(ctx, id, &members).await?;
            print_status(format, "updated", id, ok);
        }
        GroupsCommand::SetMembers { id, members } => {
            let members = parse_members(members)?;
            let ok = groups.update_replace_members(ctx, id, &members).await?;
            print_status(format, "updated", id, ok);
        }
        GroupsCommand::RemoveMember { id, member_id } => {
            let ok = groups
                .update_remove_member_by_id(ctx, id, member_id)
                .await?;
            print_status(format, "updated", id, ok);
        }
        GroupsCommand::Delete { id } => {
            let ok = groups.delete(ctx, id).await?;
            print_status(format, "deleted", id, ok);
        }
    }
    Ok(())
}
