//! Integration tests for client handles carried by resources.
//!
//! Resources returned by an operation must make follow-up calls with the
//! client that produced them, and resources that cannot address themselves
//! must fail before any request is sent.

use mailchimp_api::rest::resources::{
    BatchSubscribeRequest, List, Member, MemberRequest, MemberStatus, TagUpdate,
};
use mailchimp_api::{ApiKey, Endpoint, MailchimpClient, MailchimpConfig, Resource, ResourceError};
use md5::{Digest, Md5};
use serde_json::{json, Value};
use wiremock::matchers::{any, body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> MailchimpClient {
    let config = MailchimpConfig::builder()
        .api_key(ApiKey::new("0123456789abcdef-us6").unwrap())
        .endpoint(Endpoint::new(format!("{}/3.0", server.uri())).unwrap())
        .build()
        .unwrap();
    MailchimpClient::new(&config).unwrap()
}

fn md5_hex(input: &str) -> String {
    format!("{:x}", Md5::digest(input.as_bytes()))
}

// ============================================================================
// Propagation
// ============================================================================

#[tokio::test]
async fn test_listed_resources_make_follow_up_calls() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/3.0/lists"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "lists": [
                {"id": "aaa111", "name": "First"},
                {"id": "bbb222", "name": "Second"}
            ],
            "total_items": 2
        })))
        .mount(&server)
        .await;
    for id in ["aaa111", "bbb222"] {
        Mock::given(method("GET"))
            .and(path(format!("/3.0/lists/{id}/members")))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "members": [{"id": "h1", "email_address": "ada@example.com", "list_id": id}],
                "list_id": id,
                "total_items": 1
            })))
            .expect(1)
            .mount(&server)
            .await;
    }

    let client = client_for(&server);
    let lists = client.get_lists(None).await.unwrap();
    assert_eq!(lists.total_items, 2);

    for list in lists.iter() {
        assert!(list.has_client());
        let members = list.get_members(None).await.unwrap();
        assert_eq!(members.list_id(), Some(list.id.as_str()));
        assert!(members[0].has_client());
    }
}

#[tokio::test]
async fn test_member_from_page_reaches_its_own_path() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/3.0/lists/abc123/members"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "members": [{"id": "f00d", "email_address": "ada@example.com", "list_id": "abc123"}],
            "total_items": 1
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/3.0/lists/abc123/members/f00d/tags"))
        .and(body_json(json!({"tags": [{"name": "vip", "status": "active"}]})))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let members = client.list_handle("abc123").get_members(None).await.unwrap();

    let updated = members[0].update_tags(&[TagUpdate::add("vip")]).await.unwrap();
    assert!(updated);
}

#[tokio::test]
async fn test_created_resource_shares_engine() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/3.0/lists"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "new1", "name": "N"})))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/3.0/lists/new1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let list = client.create_list(&Default::default()).await.unwrap();

    assert!(list.client().unwrap().shares_engine_with(&client));
    assert!(list.delete().await.unwrap());
}

#[tokio::test]
async fn test_batch_subscribe_stamps_every_member() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/3.0/lists/abc123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "new_members": [{"id": "n1", "list_id": "abc123"}, {"id": "n2", "list_id": "abc123"}],
            "updated_members": [{"id": "u1", "list_id": "abc123"}],
            "errors": [{"email_address": "bad@", "error": "invalid", "error_code": "ERROR_GENERIC"}],
            "total_created": 2,
            "total_updated": 1,
            "error_count": 1
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let request = BatchSubscribeRequest {
        members: vec![
            MemberRequest::new("one@example.com", MemberStatus::Subscribed),
            MemberRequest::new("two@example.com", MemberStatus::Subscribed),
        ],
        update_existing: true,
    };
    let response = client
        .list_handle("abc123")
        .batch_subscribe_members(&request)
        .await
        .unwrap();

    assert_eq!(response.total_created, 2);
    assert_eq!(response.errors[0].error_code, "ERROR_GENERIC");
    assert!(response
        .new_members
        .iter()
        .chain(response.updated_members.iter())
        .all(|m| m.has_client()));

    let requests = server.received_requests().await.unwrap();
    let body: Value = requests[0].body_json().unwrap();
    assert_eq!(body["update_existing"], true);
    assert_eq!(body["members"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_campaign_send_uses_action_path() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/3.0/campaigns/c42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "c42",
            "type": "regular",
            "status": "save"
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/3.0/campaigns/c42/actions/send"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let campaign = client.get_campaign("c42", None).await.unwrap();
    assert_eq!(campaign.status, "save");
    assert!(campaign.send().await.unwrap());

    let requests = server.received_requests().await.unwrap();
    assert!(requests[1].body.is_empty());
}

// ============================================================================
// Members addressed by email
// ============================================================================

#[tokio::test]
async fn test_member_for_api_calls_creates_note() {
    let server = MockServer::start().await;
    let hash = md5_hex("ada@example.com");
    Mock::given(method("POST"))
        .and(path(format!("/3.0/lists/abc123/members/{hash}/notes")))
        .and(body_json(json!({"note": "Called about renewal"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 7,
            "note": "Called about renewal",
            "list_id": "abc123",
            "email_id": hash
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let member = client.member_for_api_calls("abc123", "Ada@Example.com");
    assert_eq!(member.id, hash);

    let note = member.create_note("Called about renewal").await.unwrap();
    assert_eq!(note.id, 7);
}

#[tokio::test]
async fn test_email_id_is_hashed_for_member_operations() {
    let server = MockServer::start().await;
    let hash = md5_hex("grace@example.com");
    Mock::given(method("PUT"))
        .and(path(format!("/3.0/lists/abc123/members/{hash}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": hash,
            "email_address": "grace@example.com",
            "status": "subscribed",
            "list_id": "abc123"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let member = client
        .list_handle("abc123")
        .add_or_update_member(
            "grace@example.com",
            &MemberRequest::new("grace@example.com", MemberStatus::Subscribed),
        )
        .await
        .unwrap();

    assert_eq!(member.status, Some(MemberStatus::Subscribed));
    assert!(member.has_client());
}

// ============================================================================
// Preconditions
// ============================================================================

#[tokio::test]
async fn test_missing_identity_sends_nothing() {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(&server);

    let error = client.list_handle("").get_members(None).await.unwrap_err();
    assert!(matches!(
        error,
        ResourceError::MissingIdentity { resource: "List", field: "id" }
    ));

    let error = client.get_list("", None).await.unwrap_err();
    assert!(error.is_precondition());

    let error = client
        .member_for_api_calls("", "ada@example.com")
        .delete()
        .await
        .unwrap_err();
    assert!(matches!(
        error,
        ResourceError::MissingIdentity { resource: "Member", field: "list_id" }
    ));

    let error = client.get_batch("", None).await.unwrap_err();
    assert!(error.is_precondition());

    let error = client.get_template(0, None).await.unwrap_err();
    assert!(error.is_precondition());
}

#[tokio::test]
async fn test_hand_built_resource_has_no_client() {
    let mut list = List::default();
    list.id = "abc123".to_string();

    let error = list.get_members(None).await.unwrap_err();
    assert!(matches!(error, ResourceError::MissingClient { resource: "List" }));

    let member = Member::default();
    let error = member.get_notes(None).await.unwrap_err();
    assert!(error.is_precondition());
}

#[tokio::test]
async fn test_attached_client_enables_hand_built_resource() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/3.0/lists/abc123/activity"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "activity": [{"day": "2024-05-01", "emails_sent": 10}],
            "total_items": 1
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut list = List::default();
    list.id = "abc123".to_string();
    list.attach_client(&client_for(&server));

    let activity = list.get_activity(None).await.unwrap();
    assert_eq!(activity.len(), 1);
}
