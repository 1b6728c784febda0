//! Contract tests for the blocking adapter: every blocking operation
//! delegates to the matching asynchronous method, returns a successful
//! outcome unmodified, and surfaces an exceptional status unchanged.

mod support;

use dirlink_client::DirectoryClient;
use dirlink_core::request::{
    AbandonRequest, AddRequest, BindRequest, CompareRequest, DeleteRequest, ExtendedRequest,
    Modification, ModifyDnRequest, ModifyRequest, SearchRequest, SearchScope,
};
use dirlink_core::{Entry, Error, ResultCode};
use support::StubConnection;

fn client(code: ResultCode) -> DirectoryClient {
    DirectoryClient::new(Box::new(StubConnection::new(code)))
}

fn search_request() -> SearchRequest {
    SearchRequest::new("cn=test", SearchScope::Base, "(objectClass=*)")
}

fn assert_rejected(err: &Error, code: ResultCode) {
    assert!(matches!(err, Error::Rejected(_)), "unexpected error: {err}");
    assert_eq!(err.result_code(), code);
}

#[tokio::test]
async fn add_request_success() {
    let result = client(ResultCode::Success)
        .add(&AddRequest::new("cn=test").with_attribute("objectClass", ["person"]))
        .await
        .unwrap();
    assert_eq!(result.result_code(), ResultCode::Success);
}

#[tokio::test]
async fn add_request_fail() {
    let err = client(ResultCode::UnwillingToPerform)
        .add(&AddRequest::new("cn=test"))
        .await
        .unwrap_err();
    assert_rejected(&err, ResultCode::UnwillingToPerform);
}

#[tokio::test]
async fn bind_request_success() {
    let result = client(ResultCode::Success)
        .bind(&BindRequest::simple("cn=admin,dc=example,dc=com", "secret"))
        .await
        .unwrap();
    assert_eq!(result.result_code(), ResultCode::Success);
}

#[tokio::test]
async fn bind_request_fail() {
    let err = client(ResultCode::UnwillingToPerform)
        .bind(&BindRequest::simple("cn=admin,dc=example,dc=com", "secret"))
        .await
        .unwrap_err();
    assert_rejected(&err, ResultCode::UnwillingToPerform);
}

#[tokio::test]
async fn compare_request_success() {
    let result = client(ResultCode::CompareTrue)
        .compare(&CompareRequest::new("cn=test", "cn", "test"))
        .await
        .unwrap();
    assert!(result.matched());
}

#[tokio::test]
async fn compare_request_fail() {
    let err = client(ResultCode::UnwillingToPerform)
        .compare(&CompareRequest::new("cn=test", "cn", "test"))
        .await
        .unwrap_err();
    assert_rejected(&err, ResultCode::UnwillingToPerform);
}

#[tokio::test]
async fn delete_request_success() {
    let result = client(ResultCode::Success)
        .delete(&DeleteRequest::new("cn=test"))
        .await
        .unwrap();
    assert_eq!(result.result_code(), ResultCode::Success);
}

#[tokio::test]
async fn delete_request_fail() {
    let err = client(ResultCode::UnwillingToPerform)
        .delete(&DeleteRequest::new("cn=test"))
        .await
        .unwrap_err();
    assert_rejected(&err, ResultCode::UnwillingToPerform);
}

#[tokio::test]
async fn extended_request_success() {
    let result = client(ResultCode::Success)
        .extended(&ExtendedRequest::new("1.3.6.1.4.1.1466.20037"))
        .await
        .unwrap();
    assert_eq!(result.result_code(), ResultCode::Success);
}

#[tokio::test]
async fn extended_request_fail() {
    let err = client(ResultCode::UnwillingToPerform)
        .extended(&ExtendedRequest::new("1.3.6.1.4.1.1466.20037"))
        .await
        .unwrap_err();
    assert_rejected(&err, ResultCode::UnwillingToPerform);
}

#[tokio::test]
async fn modify_request_success() {
    let request = ModifyRequest::new("cn=test").with_modification(Modification::Replace {
        attribute: "description".to_string(),
        values: vec!["updated".to_string()],
    });
    let result = client(ResultCode::Success).modify(&request).await.unwrap();
    assert_eq!(result.result_code(), ResultCode::Success);
}

#[tokio::test]
async fn modify_request_fail() {
    let err = client(ResultCode::UnwillingToPerform)
        .modify(&ModifyRequest::new("cn=test"))
        .await
        .unwrap_err();
    assert_rejected(&err, ResultCode::UnwillingToPerform);
}

#[tokio::test]
async fn modify_dn_request_success() {
    let result = client(ResultCode::Success)
        .modify_dn(&ModifyDnRequest::new("cn=test", "cn=newrdn"))
        .await
        .unwrap();
    assert_eq!(result.result_code(), ResultCode::Success);
}

#[tokio::test]
async fn modify_dn_request_fail() {
    let err = client(ResultCode::UnwillingToPerform)
        .modify_dn(&ModifyDnRequest::new("cn=test", "cn=newrdn"))
        .await
        .unwrap_err();
    assert_rejected(&err, ResultCode::UnwillingToPerform);
}

#[tokio::test]
async fn abandon_request_success() {
    client(ResultCode::Success)
        .abandon(&AbandonRequest::new(7))
        .await
        .unwrap();
}

#[tokio::test]
async fn abandon_request_fail() {
    let err = client(ResultCode::UnwillingToPerform)
        .abandon(&AbandonRequest::new(7))
        .await
        .unwrap_err();
    assert_rejected(&err, ResultCode::UnwillingToPerform);
}

#[tokio::test]
async fn search_request_success() {
    let entry = Entry::new("cn=test").with_attribute("cn", ["test"]);
    let connection =
        StubConnection::new(ResultCode::Success).with_entries(vec![entry.clone()]);
    let client = DirectoryClient::new(Box::new(connection));

    let mut entries = Vec::new();
    let result = client.search(&search_request(), &mut entries).await.unwrap();

    assert_eq!(result.result_code(), ResultCode::Success);
    assert_eq!(entries, vec![entry]);
}

#[tokio::test]
async fn search_request_preserves_delivery_order() {
    let delivered = vec![
        Entry::new("uid=a,dc=example,dc=com"),
        Entry::new("uid=b,dc=example,dc=com"),
        Entry::new("uid=c,dc=example,dc=com"),
    ];
    let connection =
        StubConnection::new(ResultCode::Success).with_entries(delivered.clone());
    let client = DirectoryClient::new(Box::new(connection));

    let mut entries = Vec::new();
    client.search(&search_request(), &mut entries).await.unwrap();
    assert_eq!(entries, delivered);
}

#[tokio::test]
async fn search_request_with_no_matches_leaves_sequence_empty() {
    let mut entries = Vec::new();
    let result = client(ResultCode::Success)
        .search(&search_request(), &mut entries)
        .await
        .unwrap();
    assert_eq!(result.result_code(), ResultCode::Success);
    assert!(entries.is_empty());
}

#[tokio::test]
async fn search_request_fail() {
    let mut entries = Vec::new();
    let err = client(ResultCode::UnwillingToPerform)
        .search(&search_request(), &mut entries)
        .await
        .unwrap_err();
    assert_rejected(&err, ResultCode::UnwillingToPerform);
    assert!(entries.is_empty());
}

#[tokio::test]
async fn search_with_handler_streams_entries() {
    use std::sync::{Arc, Mutex};

    let connection = StubConnection::new(ResultCode::Success).with_entries(vec![
        Entry::new("uid=a,dc=example,dc=com"),
        Entry::new("uid=b,dc=example,dc=com"),
    ]);
    let client = DirectoryClient::new(Box::new(connection));

    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    client
        .search_with_handler(
            &search_request(),
            Arc::new(move |entry| sink.lock().unwrap().push(entry.dn().to_string())),
        )
        .await
        .unwrap();

    assert_eq!(
        *seen.lock().unwrap(),
        ["uid=a,dc=example,dc=com", "uid=b,dc=example,dc=com"]
    );
}

#[tokio::test]
async fn close_is_visible_through_the_client() {
    let client = client(ResultCode::Success);
    assert!(!client.is_closed());
    client.close();
    assert!(client.is_closed());
}
