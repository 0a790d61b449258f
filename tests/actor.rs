mod common;

use common::*;
use ofs_client::{ClientError, ListingView, RefreshOutcome, Screen};
use serde_json::json;

#[tokio::test]
async fn test_login_and_navigate_through_handle() {
    let (handle, transport, _store) = Harness::new().into_handle();
    transport
        .reply("/user/login", login_ok("sid-1"))
        .reply("/file/list", list_ok(vec![dir("docs", "/docs")]))
        .reply("/file/list", list_ok(vec![file("a.txt", "/docs/a.txt", 0)]));

    handle.login("alice", "secret").await.unwrap();
    let snap = handle.snapshot();
    assert_eq!(snap.screen, Screen::Dashboard);
    assert_eq!(snap.file_count, 1);

    let outcome = handle.navigate_to("/docs").await.unwrap();
    assert_eq!(outcome, RefreshOutcome::Loaded(1));

    handle.set_filter("A").await.unwrap();
    let snap = handle.snapshot();
    assert_eq!(snap.path, "/docs");
    assert_eq!(snap.entries.len(), 1);

    handle.set_filter("z").await.unwrap();
    let snap = handle.snapshot();
    assert!(snap.entries.is_empty());
    assert_eq!(snap.file_count, 1);
    assert_eq!(snap.listing, ListingView::Loaded { count: 1 });
}

#[tokio::test]
async fn test_subscribers_see_updates() {
    let (handle, transport, _store) = Harness::new().into_handle();
    let mut rx = handle.subscribe();
    rx.borrow_and_update();

    handle.toggle_signup().await.unwrap();

    assert!(rx.has_changed().unwrap());
    assert_eq!(rx.borrow_and_update().screen, Screen::Signup);
    assert_eq!(transport.request_count(), 0);
}

#[tokio::test]
async fn test_validation_errors_come_back_through_handle() {
    let (handle, transport, _store) = Harness::new().into_handle();

    let err = handle.login("alice", "").await.unwrap_err();

    assert!(matches!(err, ClientError::Validation(_)));
    assert_eq!(transport.request_count(), 0);
    assert_eq!(
        handle.snapshot().notice.unwrap().text,
        "Please enter both username and password"
    );
}

#[tokio::test]
async fn test_create_file_then_delete_through_handle() {
    let (handle, transport, _store) = Harness::new().into_handle();
    transport
        .reply("/user/login", login_ok("sid-1"))
        .reply("/file/list", list_ok(vec![]))
        .reply("/file/create", ok())
        .reply("/file/list", list_ok(vec![file("notes.txt", "/notes.txt", 2)]))
        .reply("/file/read", json!({"success": true, "content": "hi"}))
        .reply("/file/delete", ok())
        .reply("/file/list", list_ok(vec![]));

    handle.login("alice", "secret").await.unwrap();
    handle.show_create_file_form().await.unwrap();
    let path = handle.create_file("notes.txt", "hi").await.unwrap();
    assert_eq!(path, "/notes.txt");
    assert!(handle.snapshot().form.is_none());

    let entry = handle.snapshot().entries[0].clone();
    handle.open(&entry).await.unwrap();
    assert_eq!(handle.snapshot().preview.unwrap().text, "hi");

    let err = handle.delete_current_file(false).await.unwrap_err();
    assert!(matches!(err, ClientError::ConfirmationRequired));
    assert!(transport.requests_to("/file/delete").is_empty());

    handle.delete_current_file(true).await.unwrap();
    let snap = handle.snapshot();
    assert!(snap.preview.is_none());
    assert_eq!(snap.listing, ListingView::Empty);
}

#[tokio::test]
async fn test_invalid_session_through_handle() {
    let (handle, transport, store) = Harness::new().into_handle();
    transport
        .reply("/user/login", login_ok("sid-1"))
        .reply("/file/list", list_ok(vec![]))
        .reply("/file/list", failure("Invalid session"));

    handle.login("alice", "secret").await.unwrap();
    let err = handle.refresh().await.unwrap_err();

    assert!(matches!(err, ClientError::InvalidSession));
    let snap = handle.snapshot();
    assert_eq!(snap.screen, Screen::Login);
    assert_eq!(snap.listing, ListingView::SessionExpired);
    assert!(store.is_empty());
}

#[tokio::test]
async fn test_shutdown_stops_actor() {
    let (handle, _transport, _store) = Harness::new().into_handle();
    handle.shutdown().await.unwrap();

    let err = handle.toggle_signup().await.unwrap_err();
    assert!(matches!(err, ClientError::ActorStopped));
}
