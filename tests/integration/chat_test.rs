//! Thread store integration tests.

mod helpers;

use devpulse_core::error::ErrorKind;
use devpulse_core::types::ThreadId;

use helpers::{TestApp, uid};

#[tokio::test]
async fn test_unread_count_across_threads() {
    let app = TestApp::seeded().await;
    let threads = &app.session.threads;

    // chat1 has one unread message from "2"; chat2 is fully read.
    assert_eq!(threads.unread_message_count(&uid("1")).await, 1);

    threads
        .mark_read(&ThreadId::from("chat1"), &uid("1"))
        .await
        .unwrap();
    assert_eq!(threads.unread_message_count(&uid("1")).await, 0);
}

#[tokio::test]
async fn test_send_updates_thread_and_counts() {
    let app = TestApp::seeded().await;
    let threads = &app.session.threads;
    let chat1 = ThreadId::from("chat1");
    let before = threads.get_thread(&chat1).await.unwrap().last_activity;

    let msg = threads
        .send_message(&chat1, &uid("2"), "hello", None)
        .await
        .unwrap();

    assert!(!msg.read);
    assert_eq!(msg.sender_id, "2");
    let thread = threads.get_thread(&chat1).await.unwrap();
    assert_eq!(thread.last_activity, msg.timestamp);
    assert!(thread.last_activity > before);
    assert_eq!(threads.unread_message_count(&uid("1")).await, 2);
    // A sender never has their own message unread.
    assert_eq!(threads.unread_message_count(&uid("2")).await, 0);
}

#[tokio::test]
async fn test_at_most_one_direct_thread_per_pair() {
    let app = TestApp::empty().await;
    let threads = &app.session.threads;
    let pairs = [("1", "2"), ("2", "1"), ("1", "3"), ("3", "1"), ("1", "2"), ("2", "3")];

    for (a, b) in pairs {
        threads.create_thread(vec![uid(a), uid(b)]).await.unwrap();
    }
    threads
        .create_thread(vec![uid("1"), uid("2"), uid("3")])
        .await
        .unwrap();

    let all = threads.snapshot().await;
    assert_eq!(all.len(), 4);
    for (a, b) in [("1", "2"), ("1", "3"), ("2", "3")] {
        let direct = all
            .iter()
            .filter(|t| t.is_direct_between(&uid(a), &uid(b)))
            .count();
        assert_eq!(direct, 1, "pair {a}/{b}");
    }
}

#[tokio::test]
async fn test_mark_read_twice_equals_once() {
    let app = TestApp::seeded().await;
    let threads = &app.session.threads;
    let chat1 = ThreadId::from("chat1");

    threads.mark_read(&chat1, &uid("1")).await.unwrap();
    let once = threads.snapshot().await;
    threads.mark_read(&chat1, &uid("1")).await.unwrap();
    assert_eq!(threads.snapshot().await, once);
}

#[tokio::test]
async fn test_rejected_operations_do_not_mutate() {
    let app = TestApp::seeded().await;
    let threads = &app.session.threads;
    let before = threads.snapshot().await;

    let err = threads
        .send_message(&ThreadId::from("missing"), &uid("1"), "hi", None)
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);

    let err = threads
        .send_message(&ThreadId::from("chat1"), &uid("1"), "  \n", None)
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::InvalidArgument);

    let err = threads.create_thread(vec![uid("1")]).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::InvalidArgument);

    let err = threads
        .mark_read(&ThreadId::from("missing"), &uid("1"))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);

    assert_eq!(threads.snapshot().await, before);
}
