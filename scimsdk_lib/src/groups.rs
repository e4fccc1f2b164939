//! Group operations and the mapping between [`Group`] and the wire resource.

use async_trait::async_trait;
use scimsdk_api::types::{GroupRequest, GroupResource, Member, PatchOperation, PatchRequest};
use scimsdk_api::{
    Context, Error, PageSource, PaginationCursor, ResourceIterator, ResourcePage, ResourceService,
};

use crate::types::{
    CreateGroupBody, Group, GroupMember, GroupMeta, PaginationOptions, ReplaceGroupBody,
    UpdateGroupReplaceName,
};
use crate::validation::{require, validate_members, validate_pagination};

const DISPLAY_NAME_REQUIRED: &str = "the group display name is required";

impl From<GroupResource> for Group {
    fn from(resource: GroupResource) -> Self {
        Self {
            id: resource.id,
            display_name: resource.display_name,
            members: resource
                .members
                .into_iter()
                .map(|member| GroupMember {
                    id: member.value,
                    email: member.display,
                })
                .collect(),
            meta: resource.meta.map(|meta| GroupMeta {
                resource_type: meta.resource_type,
                location: meta.location.unwrap_or_default(),
            }),
        }
    }
}

fn wire_members(members: &[GroupMember]) -> Vec<Member> {
    members
        .iter()
        .map(|member| Member::new(&member.id, &member.email))
        .collect()
}

fn group_request(display_name: &str, members: &[GroupMember]) -> Result<GroupRequest, Error> {
    require("display_name", display_name, DISPLAY_NAME_REQUIRED)?;
    validate_members(members)?;
    Ok(GroupRequest::new(display_name, wire_members(members)))
}

impl TryFrom<&CreateGroupBody> for GroupRequest {
    type Error = Error;

    fn try_from(body: &CreateGroupBody) -> Result<Self, Self::Error> {
        group_request(&body.display_name, &body.members)
    }
}

impl TryFrom<&ReplaceGroupBody> for GroupRequest {
    type Error = Error;

    fn try_from(body: &ReplaceGroupBody) -> Result<Self, Self::Error> {
        group_request(&body.display_name, &body.members)
    }
}

/// Group operations, obtained from [`crate::Client::groups`].
#[derive(Clone)]
pub struct GroupModule {
    service: ResourceService<GroupResource>,
}

impl GroupModule {
    pub(crate) fn new(service: ResourceService<GroupResource>) -> Self {
        Self { service }
    }

    pub async fn create(&self, ctx: &Context, body: CreateGroupBody) -> Result<Group, Error> {
        let request = GroupRequest::try_from(&body)?;
        let resource = self.service.create(ctx, &request).await?;
        tracing::debug!("Created group {} ({})", resource.id, resource.display_name);
        Ok(resource.into())
    }

    /// Returns a lazy iterator over groups. Nothing is fetched until the
    /// first call to `advance`.
    pub fn list(
        &self,
        ctx: &Context,
        options: Option<PaginationOptions>,
    ) -> Result<ResourceIterator<Group>, Error> {
        let cursor = validate_pagination(&options.unwrap_or_default())?;
        Ok(ResourceIterator::new(
            ctx.clone(),
            cursor,
            GroupPages(self.service.clone()),
        ))
    }

    pub async fn find(&self, ctx: &Context, id: &str) -> Result<Group, Error> {
        Ok(self.service.find(ctx, id).await?.into())
    }

    pub async fn replace(
        &self,
        ctx: &Context,
        id: &str,
        body: ReplaceGroupBody,
    ) -> Result<Group, Error> {
        let request = GroupRequest::try_from(&body)?;
        Ok(self.service.replace(ctx, id, &request).await?.into())
    }

    /// Adds members to the group, keeping the existing ones.
    pub async fn update_add_members(
        &self,
        ctx: &Context,
        id: &str,
        members: &[GroupMember],
    ) -> Result<bool, Error> {
        validate_members(members)?;
        let patch = PatchRequest::single(PatchOperation::AddMembers(wire_members(members)));
        self.service.update(ctx, id, &patch).await
    }

    /// Replaces the whole member list.
    pub async fn update_replace_members(
        &self,
        ctx: &Context,
        id: &str,
        members: &[GroupMember],
    ) -> Result<bool, Error> {
        validate_members(members)?;
        let patch = PatchRequest::single(PatchOperation::ReplaceMembers(wire_members(members)));
        self.service.update(ctx, id, &patch).await
    }

    pub async fn update_replace_name(
        &self,
        ctx: &Context,
        id: &str,
        body: UpdateGroupReplaceName,
    ) -> Result<bool, Error> {
        require("display_name", &body.display_name, DISPLAY_NAME_REQUIRED)?;
        let patch = PatchRequest::single(PatchOperation::ReplaceName {
            display_name: body.display_name,
        });
        self.service.update(ctx, id, &patch).await
    }

    pub async fn update_remove_member_by_id(
        &self,
        ctx: &Context,
        id: &str,
        member_id: &str,
    ) -> Result<bool, Error> {
        require("member_id", member_id, "the group member id is required")?;
        let patch = PatchRequest::single(PatchOperation::RemoveMember {
            member_id: member_id.to_string(),
        });
        self.service.update(ctx, id, &patch).await
    }

    pub async fn delete(&self, ctx: &Context, id: &str) -> Result<bool, Error> {
        self.service.delete(ctx, id).await
    }
}

struct GroupPages(ResourceService<GroupResource>);

#[async_trait]
impl PageSource<Group> for GroupPages {
    async fn fetch_page(
        &self,
        ctx: &Context,
        cursor: &PaginationCursor,
    ) -> Result<ResourcePage<Group>, Error> {
        Ok(self.0.list_page(ctx, cursor).await?.map(Group::from))
    }
}
