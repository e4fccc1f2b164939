mod meta;
pub use self::meta::{
    ErrorBody, ListResponse, Meta, GROUP_SCHEMA, LIST_RESPONSE_SCHEMA, PATCH_SCHEMA, USER_SCHEMA,
};

mod user;
pub use self::user::{UserEmail, UserGroupRef, UserName, UserNameRequest, UserRequest, UserResource};

mod group;
pub use self::group::{GroupRequest, GroupResource, Member};

mod patch;
pub use self::patch::{PatchOperation, PatchRequest, RawPatchOperation};
