//! Direct message, like, and badge flows through the fan-out.

mod helpers;

use devpulse_core::events::{ActivityEvent, Actor, DomainEvent};
use devpulse_core::types::{CommunityId, PostId, ThreadId};
use devpulse_entity::notification::NotificationKind;
use devpulse_service::{SessionContext, badge_label};

use helpers::{TestApp, mike, sarah, uid};

#[tokio::test]
async fn test_direct_message_round_trip() {
    let app = TestApp::seeded().await;
    let session = &app.session;

    let outcome = session
        .fanout
        .send_direct_message(&sarah(), uid("1"), "Are you free on Friday?", None)
        .await
        .unwrap();

    let delivered = outcome.message.unwrap();
    assert_eq!(delivered.thread_id, "chat1");
    let n = outcome.notification.unwrap();
    assert_eq!(n.kind, NotificationKind::Message);
    assert_eq!(n.summary, "sent you a message: \"Are you free on Friday?\"");

    let counts = session.unread.counts(&uid("1")).await;
    assert_eq!(counts.messages, 2);
    assert_eq!(counts.notifications, 4);

    // Opening the thread clears the message badge but not the notification.
    session
        .threads
        .mark_read(&ThreadId::from("chat1"), &uid("1"))
        .await
        .unwrap();
    let counts = session.unread.counts(&uid("1")).await;
    assert_eq!(counts.messages, 0);
    assert_eq!(counts.notifications, 4);
}

#[tokio::test]
async fn test_first_message_between_strangers_opens_thread() {
    let app = TestApp::seeded().await;
    let session = &app.session;

    let outcome = session
        .fanout
        .send_direct_message(&mike(), uid("2"), "", Some("https://example.com/cat.png".into()))
        .await
        .unwrap();

    let thread_id = outcome.message.unwrap().thread_id;
    let thread = session.threads.get_thread(&thread_id).await.unwrap();
    assert_eq!(thread.participants, vec![uid("3"), uid("2")]);
    assert_eq!(
        outcome.notification.unwrap().summary,
        "sent you an attachment"
    );
    assert_eq!(
        session
            .threads
            .find_direct_thread(&uid("2"), &uid("3"))
            .await
            .map(|t| t.id),
        Some(thread_id)
    );
}

#[tokio::test]
async fn test_like_unlike_like_notifies_once_per_like() {
    let app = TestApp::empty().await;
    let session = &app.session;
    let post = PostId::from("101");
    let like = || ActivityEvent::PostLiked {
        post_id: PostId::from("101"),
        author_id: uid("1"),
    };

    assert!(session.fanout.publish(&mike(), like()).await.unwrap().notification.is_some());
    assert!(session.fanout.publish(&mike(), like()).await.unwrap().notification.is_none());
    assert_eq!(session.likes.like_count(&post).await, 1);

    assert!(session.likes.unlike(&post, &uid("3")).await.unwrap());
    assert_eq!(session.likes.like_count(&post).await, 0);
    // Unliking keeps the earlier notification.
    assert_eq!(session.notifications.snapshot().await.len(), 1);

    assert!(session.fanout.publish(&mike(), like()).await.unwrap().notification.is_some());
    assert_eq!(session.notifications.unread_count(&uid("1")).await, 2);
}

#[tokio::test]
async fn test_dispatch_keeps_event_actor() {
    let app = TestApp::empty().await;
    let event = DomainEvent::new(
        Actor::new("5", "alexchen"),
        ActivityEvent::CommunityJoinRequested {
            community_id: CommunityId::from("frontend-dev"),
            community_name: "Frontend Developers".into(),
            owner_id: uid("1"),
        },
    );

    let n = app
        .session
        .fanout
        .dispatch(event)
        .await
        .unwrap()
        .notification
        .unwrap();
    assert_eq!(n.actor_id, "5");
    assert_eq!(n.actor_username, "alexchen");
    assert_eq!(n.subject_id.as_deref(), Some("frontend-dev"));
    assert_eq!(
        n.summary,
        "requested to join your Frontend Developers community"
    );
}

#[tokio::test]
async fn test_badge_caps_at_nine() {
    let app = TestApp::empty().await;
    let session = &app.session;
    let cap = app.config.messaging.badge_cap;

    for i in 0..12 {
        let follower = SessionContext::new(format!("fan-{i}"), format!("fan{i}"));
        session
            .fanout
            .publish(
                &follower,
                ActivityEvent::UserFollowed {
                    followed_id: uid("1"),
                },
            )
            .await
            .unwrap();
    }

    let counts = session.unread.counts(&uid("1")).await;
    assert_eq!(counts.notifications, 12);
    assert_eq!(badge_label(counts.notifications, cap).as_deref(), Some("9+"));
    assert_eq!(badge_label(counts.messages, cap), None);
}
