//! Persistence integration tests: file backend, reload, seeding, and
//! recovery from failed writes.

mod helpers;

use std::sync::Arc;

use devpulse_core::error::ErrorKind;
use devpulse_core::events::ActivityEvent;
use devpulse_core::traits::store::KeyValueStore;
use devpulse_core::types::{PostId, ThreadId};
use devpulse_entity::notification::NotificationKind;
use devpulse_service::Session;
use devpulse_storage::keys;

use helpers::{FlakyStore, TestApp, john, mike, sarah, test_config, uid};

#[tokio::test]
async fn test_file_session_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config("file", dir.path().to_str().unwrap(), true);

    let (threads, notifications) = {
        let session = Session::from_config(&config).await.unwrap();
        session
            .fanout
            .send_direct_message(&sarah(), uid("1"), "ping", None)
            .await
            .unwrap();
        session
            .notifications
            .mark_all_read(&uid("1"))
            .await
            .unwrap();
        session.close().await.unwrap();
        (
            session.threads.snapshot().await,
            session.notifications.snapshot().await,
        )
    };

    let reopened = Session::from_config(&config).await.unwrap();
    assert_eq!(reopened.threads.snapshot().await, threads);
    assert_eq!(reopened.notifications.snapshot().await, notifications);
    assert!(dir.path().join("devpulse_chats.json").is_file());
    assert!(dir.path().join("devpulse_notifications.json").is_file());
}

#[tokio::test]
async fn test_seed_only_when_key_absent() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config("file", dir.path().to_str().unwrap(), true);

    let session = Session::from_config(&config).await.unwrap();
    session
        .threads
        .mark_read(&ThreadId::from("chat1"), &uid("1"))
        .await
        .unwrap();
    drop(session);

    // Reseeding would bring the unread demo message back.
    let session = Session::from_config(&config).await.unwrap();
    assert_eq!(session.threads.unread_message_count(&uid("1")).await, 0);

    session.store().delete(&keys::chats()).await.unwrap();
    let session = Session::from_config(&config).await.unwrap();
    assert_eq!(session.threads.unread_message_count(&uid("1")).await, 1);
}

#[tokio::test]
async fn test_failed_write_keeps_mutation_until_flush() {
    let flaky = Arc::new(FlakyStore::default());
    let app = TestApp::on_store(flaky.clone(), true).await;
    let threads = &app.session.threads;
    let chat1 = ThreadId::from("chat1");

    flaky.set_failing(true);
    let err = threads
        .send_message(&chat1, &uid("1"), "offline reply", None)
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Persistence);

    // The message is kept in memory and the store is flagged.
    let thread = threads.get_thread(&chat1).await.unwrap();
    assert_eq!(
        thread.last_message().map(|m| m.content.as_str()),
        Some("offline reply")
    );
    assert!(threads.is_dirty().await);
    assert!(!flaky.raw(&keys::chats()).await.unwrap().contains("offline reply"));

    flaky.set_failing(false);
    app.session.close().await.unwrap();
    assert!(!threads.is_dirty().await);
    assert!(flaky.raw(&keys::chats()).await.unwrap().contains("offline reply"));
}

#[tokio::test]
async fn test_next_mutation_retries_failed_write() {
    let flaky = Arc::new(FlakyStore::default());
    let app = TestApp::on_store(flaky.clone(), false).await;
    let session = &app.session;

    flaky.set_failing(true);
    let err = session
        .likes
        .like(&PostId::from("1"), &uid("3"))
        .await
        .unwrap_err();
    assert!(err.is_persistence());

    flaky.set_failing(false);
    session.likes.like(&PostId::from("2"), &uid("3")).await.unwrap();

    let stored = flaky.raw(&keys::likes()).await.unwrap();
    assert!(stored.contains("\"post_id\":\"1\""));
    assert!(stored.contains("\"post_id\":\"2\""));
}

#[tokio::test]
async fn test_corrupt_collection_fails_to_open() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("devpulse_notifications.json"), "not json").unwrap();
    let config = test_config("file", dir.path().to_str().unwrap(), true);

    let err = Session::from_config(&config).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Serialization);
}

#[tokio::test]
async fn test_failed_thread_creation_still_delivers() {
    let flaky = Arc::new(FlakyStore::default());
    let app = TestApp::on_store(flaky.clone(), false).await;

    flaky.set_failing(true);
    let outcome = app
        .session
        .fanout
        .send_direct_message(&mike(), uid("1"), "hey", None)
        .await
        .unwrap();
    assert!(outcome.write_error.as_ref().is_some_and(|e| e.is_persistence()));

    // Thread, message and notification all exist in memory.
    let threads = app.session.threads.snapshot().await;
    assert_eq!(threads.len(), 1);
    assert_eq!(threads[0].messages.len(), 1);
    assert_eq!(app.session.notifications.unread_count(&uid("1")).await, 1);

    flaky.set_failing(false);
    app.session.close().await.unwrap();
    let stored = flaky.raw(&keys::chats()).await.unwrap();
    assert!(stored.contains("\"participants\":[\"3\",\"1\"]"));
    assert!(stored.contains("\"content\":\"hey\""));
}

#[tokio::test]
async fn test_failed_like_write_still_notifies_once() {
    let flaky = Arc::new(FlakyStore::default());
    let app = TestApp::on_store(flaky.clone(), false).await;
    let post = PostId::from("101");
    let like = || ActivityEvent::PostLiked {
        post_id: post.clone(),
        author_id: uid("1"),
    };

    flaky.set_failing(true);
    let first = app.session.fanout.publish(&mike(), like()).await.unwrap();
    assert!(!first.is_saved());
    assert!(first.notification.is_some());
    assert_eq!(app.session.notifications.unread_count(&uid("1")).await, 1);

    // A retry once the store recovers stores the like without a second notice.
    flaky.set_failing(false);
    let retry = app.session.fanout.publish(&mike(), like()).await.unwrap();
    assert!(retry.notification.is_none());
    assert!(retry.is_saved());
    assert_eq!(app.session.likes.like_count(&post).await, 1);
    assert_eq!(app.session.notifications.unread_count(&uid("1")).await, 1);
    assert!(flaky.raw(&keys::likes()).await.unwrap().contains("\"post_id\":\"101\""));

    app.session.close().await.unwrap();
    assert!(flaky.raw(&keys::notifications()).await.unwrap().contains("liked your post"));
}

#[tokio::test]
async fn test_failed_message_write_still_notifies_recipient() {
    let flaky = Arc::new(FlakyStore::default());
    let app = TestApp::on_store(flaky.clone(), true).await;
    let chat1 = ThreadId::from("chat1");
    let before = app.session.threads.get_thread(&chat1).await.unwrap().messages.len();

    flaky.set_failing(true);
    let outcome = app
        .session
        .fanout
        .send_direct_message(&john(), uid("2"), "offline hello", None)
        .await
        .unwrap();
    assert!(outcome.write_error.is_some());
    let delivered = outcome.message.unwrap();
    assert_eq!(delivered.thread_id, chat1);

    let feed = app.session.notifications.notifications_for_user(&uid("2")).await;
    assert_eq!(feed.len(), 1);
    assert_eq!(feed[0].kind, NotificationKind::Message);
    assert_eq!(feed[0].subject_id.as_deref(), Some("chat1"));

    // The message is in the thread exactly once.
    let thread = app.session.threads.get_thread(&chat1).await.unwrap();
    assert_eq!(thread.messages.len(), before + 1);
    assert_eq!(thread.last_message(), Some(&delivered.message));

    flaky.set_failing(false);
    app.session.close().await.unwrap();
    assert!(flaky.raw(&keys::chats()).await.unwrap().contains("offline hello"));
    assert!(flaky.raw(&keys::notifications()).await.unwrap().contains("offline hello"));
}

#[tokio::test]
async fn test_session_opens_while_store_rejects_writes() {
    let flaky = Arc::new(FlakyStore::default());
    flaky.set_failing(true);
    let app = TestApp::on_store(flaky.clone(), true).await;

    assert_eq!(app.session.unread.counts(&uid("1")).await.total(), 4);
    assert!(app.session.threads.is_dirty().await);
    assert!(app.session.notifications.is_dirty().await);
    assert_eq!(flaky.raw(&keys::chats()).await, None);

    flaky.set_failing(false);
    app.session.close().await.unwrap();
    assert!(!app.session.threads.is_dirty().await);
    assert!(flaky.raw(&keys::chats()).await.unwrap().contains("chat1"));
    assert!(flaky.raw(&keys::notifications()).await.is_some());
}
