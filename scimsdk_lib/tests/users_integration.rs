use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use scimsdk_lib::scimsdk_api::transport::{FnTransport, RawResponse};
use scimsdk_lib::scimsdk_api::RequestEnvelope;
use scimsdk_lib::types::{CreateUser, PaginationOptions, ReplaceUser, UpdateUser};
use scimsdk_lib::{Client, ClientOptions, Context, Error};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn user_json(id: &str, active: bool) -> serde_json::Value {
    json!({
        "schemas": ["urn:ietf:params:scim:schemas:core:2.0:User"],
        "id": id,
        "active": active,
        "displayName": "Alice Liddell",
        "emails": [{"primary": true, "value": "alice@example.com"}],
        "groups": [],
        "name": {"familyName": "Liddell", "formatted": "Alice Liddell", "givenName": "Alice"},
        "userName": "alice@example.com",
        "userType": "user"
    })
}

fn alice() -> CreateUser {
    CreateUser {
        user_name: "alice@example.com".to_string(),
        given_name: "Alice".to_string(),
        family_name: "Liddell".to_string(),
        active: true,
    }
}

fn client_for(server: &MockServer) -> Client {
    Client::new(
        "  test-token  ",
        Some(ClientOptions::default().with_api_url(&server.uri())),
    )
}

#[tokio::test]
async fn create_user_sends_scim_body_with_trimmed_token() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/Users"))
        .and(header("authorization", "Bearer test-token"))
        .and(body_json(json!({
            "schemas": ["urn:ietf:params:scim:schemas:core:2.0:User"],
            "userName": "alice@example.com",
            "name": {"givenName": "Alice", "familyName": "Liddell"},
            "active": true
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(user_json("a-1", true)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let user = client_for(&mock_server)
        .users()
        .create(&Context::background(), alice())
        .await
        .unwrap();
    assert_eq!(user.id, "a-1");
    assert_eq!(user.name.given_name, "Alice");
    assert_eq!(user.emails[0].value, "alice@example.com");
}

#[tokio::test]
async fn invalid_user_issues_no_request() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();
    let transport = FnTransport::new(move |_: &RequestEnvelope| {
        counter.fetch_add(1, Ordering::SeqCst);
        Ok(RawResponse::json(201, &user_json("a-1", true)))
    });
    let client = Client::with_transport("tok", None, Arc::new(transport));
    let ctx = Context::background();

    let err = client
        .users()
        .create(
            &ctx,
            CreateUser {
                family_name: String::new(),
                ..alice()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Validation { field: "family_name", .. }));

    let err = client
        .users()
        .replace(&ctx, "a-1", ReplaceUser::default())
        .await
        .unwrap_err();
    assert!(err.is_validation());

    let err = client.users().find(&ctx, "").await.unwrap_err();
    assert!(err.is_validation());

    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn replace_update_delete_user() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/Users/a-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_json("a-1", false)))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/Users/a-1"))
        .and(body_json(json!({
            "schemas": ["urn:ietf:params:scim:api:messages:2.0:PatchOp"],
            "Operations": [{"op": "replace", "value": {"active": true}}]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_json("a-1", true)))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/Users/a-1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let users = client_for(&mock_server).users();
    let ctx = Context::background();
    let replaced = users
        .replace(
            &ctx,
            "a-1",
            ReplaceUser {
                user_name: "alice@example.com".to_string(),
                given_name: "Alice".to_string(),
                family_name: "Liddell".to_string(),
                active: false,
            },
        )
        .await
        .unwrap();
    assert!(!replaced.active);
    assert!(users
        .update(&ctx, "a-1", UpdateUser { active: true })
        .await
        .unwrap());
    assert!(users.delete(&ctx, "a-1").await.unwrap());
}

#[tokio::test]
async fn update_failure_is_an_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/Users/a-1"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(json!({"detail": "invalid token", "status": "401"})),
        )
        .mount(&mock_server)
        .await;

    let err = client_for(&mock_server)
        .users()
        .update(&Context::background(), "a-1", UpdateUser { active: false })
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(401));
    assert_eq!(err.to_string(), "invalid token");
}

#[tokio::test]
async fn list_with_offset_past_the_end_is_empty() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/Users"))
        .and(query_param("startIndex", "10"))
        .and(query_param("count", "2"))
        .and(query_param("filter", "active eq true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "schemas": ["urn:ietf:params:scim:api:messages:2.0:ListResponse"],
            "itemsPerPage": 0,
            "totalResults": 3
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut it = client_for(&mock_server)
        .users()
        .list(
            &Context::background(),
            Some(
                PaginationOptions::default()
                    .with_page_size(2)
                    .with_offset(10)
                    .with_filter("active eq true"),
            ),
        )
        .unwrap();

    assert!(!it.advance().await);
    assert!(it.is_empty());
    assert!(it.last_error().is_none());
    assert!(it.current().is_none());
}

#[tokio::test]
async fn list_defaults_to_five_per_page() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/Users"))
        .and(query_param("startIndex", "1"))
        .and(query_param("count", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "itemsPerPage": 1,
            "totalResults": 1,
            "Resources": [user_json("a-1", true)]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let users = client_for(&mock_server)
        .users()
        .list(&Context::background(), None)
        .unwrap()
        .try_collect()
        .await
        .unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].id, "a-1");
}

#[tokio::test]
async fn expired_context_fails_every_user_operation() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();
    let transport = FnTransport::new(move |_: &RequestEnvelope| {
        counter.fetch_add(1, Ordering::SeqCst);
        Ok(RawResponse::json(200, &user_json("a-1", true)))
    });
    let client = Client::with_transport("tok", None, Arc::new(transport));
    let ctx = Context::with_timeout(Duration::ZERO);
    let users = client.users();

    let mut it = users.list(&ctx, None).unwrap();
    assert!(!it.advance().await);
    let list_err = it.take_error().unwrap();

    let errors = vec![
        users.create(&ctx, alice()).await.unwrap_err(),
        users.find(&ctx, "a-1").await.unwrap_err(),
        list_err,
        users
            .replace(
                &ctx,
                "a-1",
                ReplaceUser {
                    user_name: "alice@example.com".to_string(),
                    given_name: "Alice".to_string(),
                    family_name: "Liddell".to_string(),
                    active: true,
                },
            )
            .await
            .unwrap_err(),
        users
            .update(&ctx, "a-1", UpdateUser { active: false })
            .await
            .unwrap_err(),
        users.delete(&ctx, "a-1").await.unwrap_err(),
    ];
    for err in errors {
        assert_eq!(err.to_string(), "context deadline exceeded");
    }
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}
