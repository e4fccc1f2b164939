use anyhow::Result;
use clap::{ArgAction, Args, Subcommand};
use scimsdk_lib::types::{CreateUser, ReplaceUser, UpdateUser};
use scimsdk_lib::{Client, Context};

use super::{collect, ListArgs};
use crate::output::{print_json, print_status, print_users_table, OutputFormat};

#[derive(Args)]
pub struct UsersArgs {
    #[command(subcommand)]
    pub command: UsersCommand,
}

#[derive(Subcommand)]
pub enum UsersCommand {
    /// List users page by page
    List(ListArgs),
    /// Get a single user by ID
    Find { id: String },
    /// Create a user
    Create(UserFields),
    /// Replace every field of a user
    Replace {
        id: String,
        #[command(flatten)]
        fields: UserFields,
    },
    /// Activate or deactivate a user
    SetActive {
        id: String,
        #[arg(action = ArgAction::Set)]
        active: bool,
    },
    /// Delete a user
    Delete { id: String },
}

#[derive(Args)]
pub struct UserFields {
    /// Login name, usually an email address
    #[arg(long)]
    pub user_name: String,

    #[arg(long)]
    pub given_name: String,

    #[arg(long)]
    pub family_name: String,

    /// Create the user deactivated
    #[arg(long)]
    pub inactive: bool,
}

pub async fn run(
    args: &UsersArgs,
    client: &Client,
    ctx: &Context,
    format: &OutputFormat,
) -> Result<()> {
    let users = client.users();
    match &args.command {
        UsersCommand::List(list) => {
            let it = users.list(ctx, Some(list.options()))?;
            let found = collect(it, list.limit).await?;
            match format {
                OutputFormat::Json => print_json(&found),
                _ => print_users_table(&found, format),
            }
        }
        UsersCommand::Find { id } => {
            let user = users.find(ctx, id).await?;
            match format {
                OutputFormat::Json => print_json(&user),
                _ => print_users_table(&[user], format),
            }
        }
        UsersCommand::Create(fields) => {
            let user = users
                .create(
                    ctx,
                    CreateUser {
                        user_name: fields.user_name.clone(),
                        given_name: fields.given_name.clone(),
                        family_name: fields.family_name.clone(),
                        active: !fields.inactive,
                    },
                )
                .await?;
            match format {
                OutputFormat::Json => print_json(&user),
                _ => print_users_table(&[user], format),
            }
        }
        UsersCommand::Replace { id, fields } => {
            let user = users
                .replace(
                    ctx,
                    id,
                    ReplaceUser {
                        user_name: fields.user_name.clone(),
                        given_name: fields.given_name.clone(),
                        family_name: fields.family_name.clone(),
                        active: !fields.inactive,
                    },
                )
                .await?;
            match format {
                OutputFormat::Json => print_json(&user),
                _ => print_users_table(&[user], format),
            }
        }
        UsersCommand::SetActive { id, active } => {
            let ok = users
                .update(ctx, id, UpdateUser { active: *active })
                .await?;
            print_status(format, "updated", id, ok);
        }
        UsersCommand::Delete { id } => {
            let ok = users.delete(ctx, id).await?;
            print_status(format, "deleted", id, ok);
        }
    }
    Ok(())
}
