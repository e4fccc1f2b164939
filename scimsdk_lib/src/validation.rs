//! Field-presence checks run before any request is built.

use scimsdk_api::{Error, PaginationCursor};

use crate::types::{GroupMember, PaginationOptions};

/// Fails with a validation error on `field` when `value` is blank.
pub fn require(field: &'static str, value: &str, message: &str) -> Result<(), Error> {
    if value.trim().is_empty() {
        return Err(Error::validation(field, message));
    }
    Ok(())
}

pub fn validate_members(members: &[GroupMember]) -> Result<(), Error> {
    for member in members {
        require("members.id", &member.id, "the group member id is required")?;
        require(
            "members.email",
            &member.email,
            "the group member email is required",
        )?;
    }
    Ok(())
}

/// Converts listing options into a cursor, rejecting negative values.
pub fn validate_pagination(options: &PaginationOptions) -> Result<PaginationCursor, Error> {
    let page_size = non_negative("page_size", options.page_size, "the page size")?;
    let offset = non_negative("offset", options.offset, "the offset")?;
    let mut cursor = PaginationCursor::default()
        .with_page_size(page_size)
        .with_offset(offset);
    cursor.filter = options.filter.clone();
    Ok(cursor.normalized())
}

fn non_negative(field: &'static str, value: i64, label: &str) -> Result<u32, Error> {
    if value < 0 {
        return Err(Error::validation(
            field,
            format!("{} must not be negative, got {}", label, value),
        ));
    }
    u32::try_from(value)
        .map_err(|_| Error::validation(field, format!("{} is too large: {}", label, value)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_values_are_rejected() {
        let err = require("display_name", "  ", "the group display name is required").unwrap_err();
        assert!(matches!(
            err,
            Error::Validation {
                field: "display_name",
                ..
            }
        ));
        assert!(require("display_name", "Ops", "unused").is_ok());
    }

    #[test]
    fn members_need_id_and_email() {
        assert!(validate_members(&[GroupMember::new("u-1", "a@example.com")]).is_ok());
        let err = validate_members(&[GroupMember::new("", "a@example.com")]).unwrap_err();
        assert!(err.to_string().contains("member id"));
        let err = validate_members(&[GroupMember::new("u-1", "")]).unwrap_err();
        assert!(err.to_string().contains("member email"));
    }

    #[test]
    fn pagination_defaults_and_negatives() {
        let cursor = validate_pagination(&PaginationOptions::default()).unwrap();
        assert_eq!(cursor.page_size, 5);
        assert_eq!(cursor.offset, 1);

        let cursor = validate_pagination(
            &PaginationOptions::default()
                .with_page_size(2)
                .with_offset(4)
                .with_filter("displayName eq \"x\""),
        )
        .unwrap();
        assert_eq!(cursor.page_size, 2);
        assert_eq!(cursor.offset, 4);
        assert_eq!(cursor.filter.as_deref(), Some("displayName eq \"x\""));

        let err = validate_pagination(&PaginationOptions::default().with_page_size(-1)).unwrap_err();
        assert!(matches!(err, Error::Validation { field: "page_size", .. }));
        let err = validate_pagination(&PaginationOptions::default().with_offset(-3)).unwrap_err();
        assert!(matches!(err, Error::Validation { field: "offset", .. }));
    }
}
