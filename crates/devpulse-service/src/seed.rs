//! Demo data written to an empty store on first start.
//!
//! Timestamps are relative to `now` so the data set always looks recent.

use chrono::{DateTime, Duration, Utc};

use devpulse_core::types::{MessageId, NotificationId, ThreadId, UserId};
use devpulse_entity::notification::{Notification, NotificationKind};
use devpulse_entity::thread::{Message, Thread};

fn message(
    id: &str,
    sender: &str,
    content: &str,
    attachment_url: Option<&str>,
    timestamp: DateTime<Utc>,
    read: bool,
) -> Message {
    Message {
        id: MessageId::new(id),
        sender_id: UserId::new(sender),
        content: content.to_string(),
        attachment_url: attachment_url.map(str::to_string),
        timestamp,
        read,
    }
}

/// Two threads for user `1`: `chat1` with one unread message, `chat2` fully read.
pub fn demo_threads(now: DateTime<Utc>) -> Vec<Thread> {
    let hours = |h: i64| now - Duration::hours(h);

    let chat1 = Thread {
        id: ThreadId::new("chat1"),
        participants: vec![UserId::new("1"), UserId::new("2")],
        messages: vec![
            message(
                "m1",
                "2",
                "Hi John! I saw your post about React hooks. Very interesting!",
                None,
                hours(24),
                true,
            ),
            message(
                "m2",
                "1",
                "Thanks Sarah! I've been experimenting with custom hooks lately.",
                None,
                hours(23),
                true,
            ),
            message(
                "m3",
                "2",
                "Would love to collaborate on a project sometime. Are you available for freelance work?",
                None,
                hours(1),
                false,
            ),
        ],
        last_activity: hours(1),
    };

    let chat2 = Thread {
        id: ThreadId::new("chat2"),
        participants: vec![UserId::new("1"), UserId::new("3")],
        messages: vec![
            message(
                "m4",
                "3",
                "Hey John, do you have experience with GraphQL?",
                None,
                hours(48),
                true,
            ),
            message(
                "m5",
                "1",
                "Yes, I've used it in a couple of projects. Need help with something?",
                None,
                hours(47),
                true,
            ),
            message(
                "m6",
                "3",
                "I'm having trouble with nested queries. Could you take a look at my code?",
                Some("https://images.unsplash.com/photo-1518791841217-8f162f1e1131"),
                hours(46),
                true,
            ),
            message(
                "m7",
                "1",
                "Sure, send over your repo and I'll check it out tomorrow.",
                None,
                hours(45),
                true,
            ),
        ],
        last_activity: hours(45),
    };

    vec![chat1, chat2]
}

/// Five notifications for user `1`, three of them unread.
pub fn demo_notifications(now: DateTime<Utc>) -> Vec<Notification> {
    let entry = |id: &str,
                 kind: NotificationKind,
                 actor: &str,
                 username: &str,
                 subject: Option<&str>,
                 summary: &str,
                 read: bool,
                 age: Duration| Notification {
        id: NotificationId::new(id),
        recipient_id: UserId::new("1"),
        kind,
        actor_id: UserId::new(actor),
        actor_username: username.to_string(),
        subject_id: subject.map(str::to_string),
        summary: summary.to_string(),
        read,
        created_at: now - age,
    };

    vec![
        entry(
            "1",
            NotificationKind::Follow,
            "2",
            "sarahjones",
            None,
            "started following you",
            false,
            Duration::hours(1),
        ),
        entry(
            "2",
            NotificationKind::Like,
            "3",
            "mikesmith",
            Some("101"),
            "liked your post about React hooks",
            true,
            Duration::days(1),
        ),
        entry(
            "3",
            NotificationKind::Comment,
            "4",
            "emilywong",
            Some("101"),
            "commented on your post: \"Great insight! Have you tried...\"",
            false,
            Duration::days(2),
        ),
        entry(
            "4",
            NotificationKind::CommunityJoinRequest,
            "5",
            "alexchen",
            Some("frontend-dev"),
            "requested to join your Frontend Developers community",
            false,
            Duration::days(3),
        ),
        entry(
            "5",
            NotificationKind::Message,
            "6",
            "davidlee",
            None,
            "sent you a message: \"Hey, I saw your post about...\"",
            true,
            Duration::days(4),
        ),
    ]
}
