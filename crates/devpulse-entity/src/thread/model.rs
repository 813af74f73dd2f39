//! Thread entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use devpulse_core::types::{ThreadId, UserId};

use super::message::Message;

/// A conversation between a fixed set of participants.
///
/// A *direct* thread has exactly two distinct participants. Messages are
/// kept in insertion order, which is also chronological order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thread {
    /// Unique thread identifier.
    pub id: ThreadId,
    /// Distinct participant ids, in the order they were supplied.
    pub participants: Vec<UserId>,
    /// Messages in chronological order.
    #[serde(default)]
    pub messages: Vec<Message>,
    /// Timestamp of the latest message, or the creation time if empty.
    pub last_activity: DateTime<Utc>,
}

impl Thread {
    /// Create an empty thread with a fresh id.
    ///
    /// The caller is responsible for passing distinct participants.
    pub fn new(participants: Vec<UserId>) -> Self {
        Self {
            id: ThreadId::generate(),
            participants,
            messages: Vec::new(),
            last_activity: Utc::now(),
        }
    }

    /// Whether this is a 1:1 conversation.
    pub fn is_direct(&self) -> bool {
        self.participants.len() == 2 && self.participants[0] != self.participants[1]
    }

    /// Whether `user` takes part in the thread.
    pub fn has_participant(&self, user: &UserId) -> bool {
        self.participants.contains(user)
    }

    /// Whether the participant set is exactly `{a, b}`.
    pub fn is_direct_between(&self, a: &UserId, b: &UserId) -> bool {
        a != b && self.is_direct() && self.has_participant(a) && self.has_participant(b)
    }

    /// The other participant of a direct thread, seen from `viewer`.
    pub fn counterpart(&self, viewer: &UserId) -> Option<&UserId> {
        if !self.is_direct() || !self.has_participant(viewer) {
            return None;
        }
        self.participants.iter().find(|p| *p != viewer)
    }

    /// The most recent message, if any.
    pub fn last_message(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// Number of messages unread by `viewer` in this thread.
    pub fn unread_for(&self, viewer: &UserId) -> usize {
        self.messages
            .iter()
            .filter(|m| m.is_unread_for(viewer))
            .count()
    }

    /// Append a message and advance `last_activity` to its timestamp.
    pub fn push_message(&mut self, message: Message) {
        self.last_activity = message.timestamp;
        self.messages.push(message);
    }

    /// Mark every message not sent by `viewer` as read.
    ///
    /// Returns the number of messages that changed state.
    pub fn mark_read_for(&mut self, viewer: &UserId) -> usize {
        let mut changed = 0;
        for message in self.messages.iter_mut().filter(|m| m.is_unread_for(viewer)) {
            message.read = true;
            changed += 1;
        }
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uid(s: &str) -> UserId {
        UserId::from(s)
    }

    fn direct() -> Thread {
        Thread::new(vec![uid("1"), uid("2")])
    }

    #[test]
    fn test_direct_thread_detection() {
        let thread = direct();
        assert!(thread.is_direct());
        assert!(thread.is_direct_between(&uid("2"), &uid("1")));
        assert!(!thread.is_direct_between(&uid("1"), &uid("1")));
        assert!(!thread.is_direct_between(&uid("1"), &uid("3")));

        let group = Thread::new(vec![uid("1"), uid("2"), uid("3")]);
        assert!(!group.is_direct());
        assert!(!group.is_direct_between(&uid("1"), &uid("2")));
    }

    #[test]
    fn test_counterpart() {
        let thread = direct();
        assert_eq!(thread.counterpart(&uid("1")), Some(&uid("2")));
        assert_eq!(thread.counterpart(&uid("2")), Some(&uid("1")));
        assert_eq!(thread.counterpart(&uid("9")), None);
    }

    #[test]
    fn test_push_message_advances_last_activity() {
        let mut thread = direct();
        let mut msg = Message::new(uid("2"), "hi".into(), None);
        msg.timestamp = thread.last_activity + chrono::Duration::seconds(5);
        let ts = msg.timestamp;
        thread.push_message(msg);
        assert_eq!(thread.last_activity, ts);
        assert_eq!(thread.last_message().map(|m| m.content.as_str()), Some("hi"));
    }

    #[test]
    fn test_mark_read_for_skips_own_messages() {
        let mut thread = direct();
        thread.push_message(Message::new(uid("2"), "a".into(), None));
        thread.push_message(Message::new(uid("2"), "b".into(), None));
        thread.push_message(Message::new(uid("1"), "c".into(), None));

        assert_eq!(thread.unread_for(&uid("1")), 2);
        assert_eq!(thread.unread_for(&uid("2")), 1);

        assert_eq!(thread.mark_read_for(&uid("1")), 2);
        assert_eq!(thread.mark_read_for(&uid("1")), 0);
        assert_eq!(thread.unread_for(&uid("1")), 0);
        // The message sent by "1" is still unread for "2".
        assert_eq!(thread.unread_for(&uid("2")), 1);
    }
}
