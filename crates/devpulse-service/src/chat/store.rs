//! Thread store: lookup, creation, message delivery, and read state.

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::Mutex;
use tracing::{debug, info};

use devpulse_core::error::AppError;
use devpulse_core::result::AppResult;
use devpulse_core::traits::store::KeyValueStore;
use devpulse_core::types::{ThreadId, UserId};
use devpulse_entity::thread::{Message, Thread};
use devpulse_storage::{PersistentCollection, keys};

use crate::seed;

/// Owns every conversation thread of the session.
///
/// Each mutation holds the collection lock from validation through
/// persistence, so mutations of the thread collection never interleave.
#[derive(Debug)]
pub struct MessageThreadStore {
    threads: Mutex<PersistentCollection<Thread>>,
}

impl MessageThreadStore {
    /// Load the thread collection, seeding demo threads when it is absent
    /// and `seed_demo_data` is set.
    pub async fn open(store: Arc<dyn KeyValueStore>, seed_demo_data: bool) -> AppResult<Self> {
        let threads = PersistentCollection::load(store, keys::chats(), || {
            if seed_demo_data {
                seed::demo_threads(Utc::now())
            } else {
                Vec::new()
            }
        })
        .await?;
        info!(count = threads.items().len(), "Thread store opened");
        Ok(Self {
            threads: Mutex::new(threads),
        })
    }

    /// All threads containing `user_id`, most recent activity first.
    ///
    /// Threads with equal `last_activity` are ordered by id.
    pub async fn threads_for_user(&self, user_id: &UserId) -> Vec<Thread> {
        let threads = self.threads.lock().await;
        let mut result: Vec<Thread> = threads
            .items()
            .iter()
            .filter(|t| t.has_participant(user_id))
            .cloned()
            .collect();
        result.sort_by(|a, b| {
            b.last_activity
                .cmp(&a.last_activity)
                .then_with(|| a.id.cmp(&b.id))
        });
        result
    }

    /// Look up a thread by id.
    pub async fn get_thread(&self, thread_id: &ThreadId) -> Option<Thread> {
        let threads = self.threads.lock().await;
        threads.items().iter().find(|t| &t.id == thread_id).cloned()
    }

    /// The thread whose participant set is exactly `{a, b}`.
    pub async fn find_direct_thread(&self, a: &UserId, b: &UserId) -> Option<Thread> {
        let threads = self.threads.lock().await;
        find_direct(threads.items(), a, b).cloned()
    }

    /// Create a thread for `participants`.
    ///
    /// Duplicate ids are dropped, keeping the first occurrence. Two
    /// participants that already share a direct thread get that thread
    /// back unchanged.
    pub async fn create_thread(&self, participants: Vec<UserId>) -> AppResult<Thread> {
        let (thread, written) = self.open_thread(participants).await?;
        written.map(|()| thread)
    }

    /// [`create_thread`](Self::create_thread) that hands the thread back
    /// together with the write result. An `Err` write leaves the thread in
    /// memory.
    pub(crate) async fn open_thread(
        &self,
        participants: Vec<UserId>,
    ) -> AppResult<(Thread, AppResult<()>)> {
        let mut distinct: Vec<UserId> = Vec::with_capacity(participants.len());
        for participant in participants {
            if !distinct.contains(&participant) {
                distinct.push(participant);
            }
        }
        if distinct.len() < 2 {
            return Err(AppError::invalid_argument(
                "A thread needs at least two distinct participants",
            ));
        }

        let mut threads = self.threads.lock().await;
        if let [a, b] = distinct.as_slice() {
            if let Some(existing) = find_direct(threads.items(), a, b) {
                debug!(thread_id = %existing.id, "Reusing existing direct thread");
                return Ok((existing.clone(), Ok(())));
            }
        }

        let thread = Thread::new(distinct);
        threads.items_mut().push(thread.clone());
        info!(thread_id = %thread.id, participants = thread.participants.len(), "Thread created");
        let written = threads.persist().await;
        Ok((thread, written))
    }

    /// Append a message from `sender_id` to a thread.
    ///
    /// The message starts unread and the thread's `last_activity` moves to
    /// the message timestamp.
    pub async fn send_message(
        &self,
        thread_id: &ThreadId,
        sender_id: &UserId,
        content: &str,
        attachment_url: Option<String>,
    ) -> AppResult<Message> {
        let (message, written) = self
            .post_message(thread_id, sender_id, content, attachment_url)
            .await?;
        written.map(|()| message)
    }

    /// [`send_message`](Self::send_message) that hands the message back
    /// together with the write result.
    pub(crate) async fn post_message(
        &self,
        thread_id: &ThreadId,
        sender_id: &UserId,
        content: &str,
        attachment_url: Option<String>,
    ) -> AppResult<(Message, AppResult<()>)> {
        let attachment_url = attachment_url.filter(|url| !url.trim().is_empty());
        if content.trim().is_empty() && attachment_url.is_none() {
            return Err(AppError::invalid_argument(
                "Message content must not be empty",
            ));
        }

        let mut threads = self.threads.lock().await;
        let Some(index) = threads.items().iter().position(|t| &t.id == thread_id) else {
            return Err(AppError::not_found(format!("Thread not found: {thread_id}")));
        };
        if !threads.items()[index].has_participant(sender_id) {
            return Err(AppError::invalid_argument(format!(
                "User {sender_id} is not a participant of thread {thread_id}"
            )));
        }

        let message = Message::new(sender_id.clone(), content.to_string(), attachment_url);
        threads.items_mut()[index].push_message(message.clone());
        debug!(
            thread_id = %thread_id,
            message_id = %message.id,
            sender_id = %sender_id,
            attachment = message.has_attachment(),
            "Message sent"
        );
        let written = threads.persist().await;
        Ok((message, written))
    }

    /// Mark every message in the thread not sent by `viewer_id` as read.
    ///
    /// Returns how many messages changed state.
    pub async fn mark_read(&self, thread_id: &ThreadId, viewer_id: &UserId) -> AppResult<usize> {
        let mut threads = self.threads.lock().await;
        let Some(index) = threads.items().iter().position(|t| &t.id == thread_id) else {
            return Err(AppError::not_found(format!("Thread not found: {thread_id}")));
        };

        if threads.items()[index].unread_for(viewer_id) == 0 {
            threads.flush().await?;
            return Ok(0);
        }

        let changed = threads.items_mut()[index].mark_read_for(viewer_id);
        debug!(thread_id = %thread_id, viewer_id = %viewer_id, changed, "Thread marked read");
        threads.persist().await?;
        Ok(changed)
    }

    /// Messages unread by `user_id` across all of their threads.
    pub async fn unread_message_count(&self, user_id: &UserId) -> usize {
        let threads = self.threads.lock().await;
        unread_in(threads.items(), user_id)
    }

    /// Clone of the full collection.
    pub async fn snapshot(&self) -> Vec<Thread> {
        self.threads.lock().await.snapshot()
    }

    /// Retry a write that failed earlier.
    pub async fn flush(&self) -> AppResult<()> {
        self.threads.lock().await.flush().await
    }

    /// Whether the durable copy is behind memory.
    pub async fn is_dirty(&self) -> bool {
        self.threads.lock().await.is_dirty()
    }
}

fn find_direct<'a>(threads: &'a [Thread], a: &UserId, b: &UserId) -> Option<&'a Thread> {
    threads.iter().find(|t| t.is_direct_between(a, b))
}

/// Unread messages for `user_id` across `threads`.
pub(crate) fn unread_in(threads: &[Thread], user_id: &UserId) -> usize {
    threads
        .iter()
        .filter(|t| t.has_participant(user_id))
        .map(|t| t.unread_for(user_id))
        .sum()
}
