//! Notification store and fan-out integration tests.

mod helpers;

use devpulse_core::events::ActivityEvent;
use devpulse_core::types::{NotificationId, PostId};
use devpulse_entity::notification::{NewNotification, NotificationKind};

use helpers::{TestApp, john, mike, uid};

#[tokio::test]
async fn test_comment_fans_out_to_post_author() {
    let app = TestApp::empty().await;
    let comment = "I tried this with useReducer and it worked great for me";

    let outcome = app
        .session
        .fanout
        .publish(
            &mike(),
            ActivityEvent::PostCommented {
                post_id: PostId::from("101"),
                author_id: uid("1"),
                comment: comment.into(),
            },
        )
        .await
        .unwrap();

    let feed = app.session.notifications.notifications_for_user(&uid("1")).await;
    assert_eq!(feed.len(), 1);
    let n = &feed[0];
    assert_eq!(Some(n), outcome.notification.as_ref());
    assert_eq!(n.kind, NotificationKind::Comment);
    assert_eq!(n.actor_id, "3");
    assert_eq!(
        n.summary,
        "commented on your post: \"I tried this with useReducer a...\""
    );
}

#[tokio::test]
async fn test_mark_all_read_only_touches_recipient() {
    let app = TestApp::seeded().await;
    let notifications = &app.session.notifications;

    let other = notifications
        .append(NewNotification {
            kind: NotificationKind::Follow,
            actor_id: uid("1"),
            actor_username: "johndoe".into(),
            recipient_id: uid("2"),
            subject_id: None,
            summary: "started following you".into(),
        })
        .await
        .unwrap()
        .unwrap();

    // Demo data: 3 unread and 2 read for user "1".
    assert_eq!(notifications.unread_count(&uid("1")).await, 3);
    assert_eq!(notifications.mark_all_read(&uid("1")).await.unwrap(), 3);
    assert_eq!(notifications.unread_count(&uid("1")).await, 0);

    let theirs = notifications.notifications_for_user(&uid("2")).await;
    assert_eq!(theirs.len(), 1);
    assert_eq!(theirs[0].id, other.id);
    assert!(theirs[0].is_unread());
}

#[tokio::test]
async fn test_self_actions_never_notify() {
    let app = TestApp::empty().await;
    let me = john();

    for event in [
        ActivityEvent::PostLiked {
            post_id: PostId::from("7"),
            author_id: uid("1"),
        },
        ActivityEvent::PostCommented {
            post_id: PostId::from("7"),
            author_id: uid("1"),
            comment: "note to self".into(),
        },
        ActivityEvent::UserFollowed {
            followed_id: uid("1"),
        },
    ] {
        let outcome = app.session.fanout.publish(&me, event).await.unwrap();
        assert!(outcome.notification.is_none());
    }
    assert!(app.session.notifications.snapshot().await.is_empty());
}

#[tokio::test]
async fn test_mark_read_unknown_is_noop() {
    let app = TestApp::seeded().await;
    let before = app.session.notifications.snapshot().await;
    let changed = app
        .session
        .notifications
        .mark_read(&NotificationId::from("does-not-exist"))
        .await
        .unwrap();
    assert!(!changed);
    assert_eq!(app.session.notifications.snapshot().await, before);
}
