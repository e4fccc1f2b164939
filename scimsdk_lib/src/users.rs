//! User operations and the mapping between [`User`] and the wire resource.

use async_trait::async_trait;
use scimsdk_api::types::{PatchOperation, PatchRequest, UserRequest, UserResource};
use scimsdk_api::{
    Context, Error, PageSource, PaginationCursor, ResourceIterator, ResourcePage, ResourceService,
};

use crate::types::{
    CreateUser, PaginationOptions, ReplaceUser, UpdateUser, User, UserEmail, UserGroup, UserName,
};
use crate::validation::{require, validate_pagination};

impl From<UserResource> for User {
    fn from(resource: UserResource) -> Self {
        Self {
            id: resource.id,
            active: resource.active,
            display_name: resource.display_name,
            emails: resource
                .emails
                .into_iter()
                .map(|email| UserEmail {
                    primary: email.primary,
                    value: email.value,
                })
                .collect(),
            groups: resource
                .groups
                .into_iter()
                .map(|group| UserGroup {
                    value: group.value,
                    reference: group.reference,
                })
                .collect(),
            name: UserName {
                family_name: resource.name.family_name,
                formatted: resource.name.formatted,
                given_name: resource.name.given_name,
            },
            user_name: resource.user_name,
            user_type: resource.user_type,
        }
    }
}

fn user_request(
    user_name: &str,
    given_name: &str,
    family_name: &str,
    active: bool,
) -> Result<UserRequest, Error> {
    require("user_name", user_name, "the user name is required")?;
    require("given_name", given_name, "the user given name is required")?;
    require("family_name", family_name, "the user family name is required")?;
    Ok(UserRequest::new(user_name, given_name, family_name, active))
}

impl TryFrom<&CreateUser> for UserRequest {
    type Error = Error;

    fn try_from(user: &CreateUser) -> Result<Self, Self::Error> {
        user_request(&user.user_name, &user.given_name, &user.family_name, user.active)
    }
}

impl TryFrom<&ReplaceUser> for UserRequest {
    type Error = Error;

    fn try_from(user: &ReplaceUser) -> Result<Self, Self::Error> {
        user_request(&user.user_name, &user.given_name, &user.family_name, user.active)
    }
}

impl From<UpdateUser> for PatchRequest {
    fn from(update: UpdateUser) -> Self {
        PatchRequest::single(PatchOperation::ReplaceActive {
            active: update.active,
        })
    }
}

/// User operations, obtained from [`crate::Client::users`].
#[derive(Clone)]
pub struct UserModule {
    service: ResourceService<UserResource>,
}

impl UserModule {
    pub(crate) fn new(service: ResourceService<UserResource>) -> Self {
        Self { service }
    }

    pub async fn create(&self, ctx: &Context, user: CreateUser) -> Result<User, Error> {
        let request = UserRequest::try_from(&user)?;
        let resource = self.service.create(ctx, &request).await?;
        tracing::debug!("Created user {}", resource.id);
        Ok(resource.into())
    }

    /// Returns a lazy iterator over users. Nothing is fetched until the
    /// first call to `advance`.
    pub fn list(
        &self,
        ctx: &Context,
        options: Option<PaginationOptions>,
    ) -> Result<ResourceIterator<User>, Error> {
        let cursor = validate_pagination(&options.unwrap_or_default())?;
        Ok(ResourceIterator::new(
            ctx.clone(),
            cursor,
            UserPages(self.service.clone()),
        ))
    }

    pub async fn find(&self, ctx: &Context, id: &str) -> Result<User, Error> {
        Ok(self.service.find(ctx, id).await?.into())
    }

    pub async fn replace(&self, ctx: &Context, id: &str, user: ReplaceUser) -> Result<User, Error> {
        let request = UserRequest::try_from(&user)?;
        Ok(self.service.replace(ctx, id, &request).await?.into())
    }

    /// Sets the user's `active` flag.
    pub async fn update(&self, ctx: &Context, id: &str, user: UpdateUser) -> Result<bool, Error> {
        self.service.update(ctx, id, &user.into()).await
    }

    pub async fn delete(&self, ctx: &Context, id: &str) -> Result<bool, Error> {
        self.service.delete(ctx, id).await
    }
}

struct UserPages(ResourceService<UserResource>);

#[async_trait]
impl PageSource<User> for UserPages {
    async fn fetch_page(
        &self,
        ctx: &Context,
        cursor: &PaginationCursor,
    ) -> Result<ResourcePage<User>, Error> {
        Ok(self.0.list_page(ctx, cursor).await?.map(User::from))
    }
}
