//! Fan-out rules: one per activity event.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, warn};

use devpulse_core::error::AppError;
use devpulse_core::events::{ActivityEvent, Actor, DomainEvent};
use devpulse_core::result::AppResult;
use devpulse_core::types::{ThreadId, UserId};
use devpulse_entity::notification::{NewNotification, Notification, NotificationKind};
use devpulse_entity::thread::Message;

use super::formatter::NotificationFormatter;
use crate::chat::MessageThreadStore;
use crate::context::SessionContext;
use crate::engagement::LikeLedger;
use crate::notification::NotificationStore;

/// A direct message delivered as part of a dispatch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeliveredMessage {
    /// The direct thread the message landed in.
    pub thread_id: ThreadId,
    /// The stored message.
    pub message: Message,
}

/// Everything a single dispatch produced.
///
/// A failed store write does not undo the rest of the dispatch: the
/// records below are kept in memory and `write_error` holds the first
/// failure. The next successful write of the affected collection, or a
/// flush, stores them.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FanoutOutcome {
    /// The notification written, if any.
    pub notification: Option<Notification>,
    /// The message delivered, for direct-message events.
    pub message: Option<DeliveredMessage>,
    /// First store write that failed during the dispatch.
    #[serde(skip)]
    pub write_error: Option<AppError>,
}

impl FanoutOutcome {
    /// Whether every write of the dispatch reached the store.
    pub fn is_saved(&self) -> bool {
        self.write_error.is_none()
    }
}

/// Translates domain events into thread messages and notification records.
#[derive(Debug, Clone)]
pub struct EventFanout {
    threads: Arc<MessageThreadStore>,
    notifications: Arc<NotificationStore>,
    likes: Arc<LikeLedger>,
    formatter: NotificationFormatter,
}

impl EventFanout {
    /// Creates a new fan-out over the session's stores.
    pub fn new(
        threads: Arc<MessageThreadStore>,
        notifications: Arc<NotificationStore>,
        likes: Arc<LikeLedger>,
        formatter: NotificationFormatter,
    ) -> Self {
        Self {
            threads,
            notifications,
            likes,
            formatter,
        }
    }

    /// Wrap `payload` in an event raised by the session user and dispatch it.
    pub async fn publish(
        &self,
        ctx: &SessionContext,
        payload: ActivityEvent,
    ) -> AppResult<FanoutOutcome> {
        self.dispatch(DomainEvent::new(ctx.actor(), payload)).await
    }

    /// Apply the rule matching the event's variant.
    ///
    /// Rejected input returns an error before anything changes. Store write
    /// failures are reported through [`FanoutOutcome::write_error`].
    pub async fn dispatch(&self, event: DomainEvent) -> AppResult<FanoutOutcome> {
        let DomainEvent { id, actor, payload, .. } = event;
        debug!(event_id = %id, event = payload.name(), actor_id = %actor.user_id, "Dispatching event");

        let notify = |kind: NotificationKind,
                      recipient_id: UserId,
                      subject_id: Option<String>,
                      summary: String| NewNotification {
            kind,
            actor_id: actor.user_id.clone(),
            actor_username: actor.username.clone(),
            recipient_id,
            subject_id,
            summary,
        };

        let mut unsaved = None;
        let (new, message) = match payload {
            ActivityEvent::PostLiked { post_id, author_id } => {
                let added = keep(
                    self.likes.record_like(&post_id, &actor.user_id).await,
                    &mut unsaved,
                );
                if !added {
                    return Ok(FanoutOutcome {
                        write_error: unsaved,
                        ..FanoutOutcome::default()
                    });
                }
                let new = notify(
                    NotificationKind::Like,
                    author_id,
                    Some(post_id.into_inner()),
                    self.formatter.post_liked(),
                );
                (new, None)
            }
            ActivityEvent::PostCommented {
                post_id,
                author_id,
                comment,
            } => {
                let new = notify(
                    NotificationKind::Comment,
                    author_id,
                    Some(post_id.into_inner()),
                    self.formatter.post_commented(&comment),
                );
                (new, None)
            }
            ActivityEvent::CommunityJoinRequested {
                community_id,
                community_name,
                owner_id,
            } => {
                let new = notify(
                    NotificationKind::CommunityJoinRequest,
                    owner_id,
                    Some(community_id.into_inner()),
                    self.formatter.join_requested(&community_name),
                );
                (new, None)
            }
            ActivityEvent::CommunityJoinApproved {
                community_id,
                community_name,
                requester_id,
            } => {
                let new = notify(
                    NotificationKind::CommunityJoinApproved,
                    requester_id,
                    Some(community_id.into_inner()),
                    self.formatter.join_approved(&community_name),
                );
                (new, None)
            }
            ActivityEvent::UserFollowed { followed_id } => {
                let new = notify(
                    NotificationKind::Follow,
                    followed_id,
                    None,
                    self.formatter.followed(),
                );
                (new, None)
            }
            ActivityEvent::DirectMessageSent {
                recipient_id,
                content,
                attachment_url,
            } => {
                let delivered = self
                    .deliver_direct(&actor.user_id, &recipient_id, &content, attachment_url, &mut unsaved)
                    .await?;
                let new = self.message_notice(&actor, recipient_id, &delivered.thread_id, &content);
                (new, Some(delivered))
            }
        };

        let notification = keep(self.notifications.insert(new).await, &mut unsaved);
        if let Some(notification) = &notification {
            info!(
                event_id = %id,
                notification_id = %notification.id,
                recipient_id = %notification.recipient_id,
                kind = %notification.kind,
                "Event fanned out"
            );
        }
        if let Some(e) = &unsaved {
            warn!(event_id = %id, error = %e, "Event applied in memory only");
        }
        Ok(FanoutOutcome {
            notification,
            message,
            write_error: unsaved,
        })
    }

    /// Send a direct message from the session user to `recipient_id`.
    pub async fn send_direct_message(
        &self,
        ctx: &SessionContext,
        recipient_id: UserId,
        content: impl Into<String>,
        attachment_url: Option<String>,
    ) -> AppResult<FanoutOutcome> {
        self.publish(
            ctx,
            ActivityEvent::DirectMessageSent {
                recipient_id,
                content: content.into(),
                attachment_url,
            },
        )
        .await
    }

    /// Post into an existing thread as the session user.
    ///
    /// In a direct thread the other participant gets a message
    /// notification, exactly as for [`send_direct_message`](Self::send_direct_message).
    /// Group threads only receive the message.
    pub async fn reply(
        &self,
        ctx: &SessionContext,
        thread_id: &ThreadId,
        content: impl Into<String>,
        attachment_url: Option<String>,
    ) -> AppResult<FanoutOutcome> {
        let content = content.into();
        let thread = self
            .threads
            .get_thread(thread_id)
            .await
            .ok_or_else(|| AppError::not_found(format!("Thread not found: {thread_id}")))?;

        let mut unsaved = None;
        let message = keep(
            self.threads
                .post_message(thread_id, &ctx.user_id, &content, attachment_url)
                .await?,
            &mut unsaved,
        );
        let notification = match thread.counterpart(&ctx.user_id) {
            Some(recipient_id) => {
                let new = self.message_notice(&ctx.actor(), recipient_id.clone(), thread_id, &content);
                keep(self.notifications.insert(new).await, &mut unsaved)
            }
            None => None,
        };
        debug!(thread_id = %thread_id, notified = notification.is_some(), "Reply posted");

        Ok(FanoutOutcome {
            notification,
            message: Some(DeliveredMessage {
                thread_id: thread_id.clone(),
                message,
            }),
            write_error: unsaved,
        })
    }

    fn message_notice(
        &self,
        sender: &Actor,
        recipient_id: UserId,
        thread_id: &ThreadId,
        content: &str,
    ) -> NewNotification {
        NewNotification {
            kind: NotificationKind::Message,
            actor_id: sender.user_id.clone(),
            actor_username: sender.username.clone(),
            recipient_id,
            subject_id: Some(thread_id.to_string()),
            summary: self.formatter.message_sent(content),
        }
    }

    /// Find or open the direct thread between the two users and append the
    /// message to it.
    async fn deliver_direct(
        &self,
        sender_id: &UserId,
        recipient_id: &UserId,
        content: &str,
        attachment_url: Option<String>,
        unsaved: &mut Option<AppError>,
    ) -> AppResult<DeliveredMessage> {
        if sender_id == recipient_id {
            return Err(AppError::invalid_argument(
                "Cannot send a direct message to yourself",
            ));
        }
        if content.trim().is_empty() && attachment_url.as_deref().is_none_or(|u| u.trim().is_empty()) {
            return Err(AppError::invalid_argument(
                "Message content must not be empty",
            ));
        }

        let thread_id = match self.threads.find_direct_thread(sender_id, recipient_id).await {
            Some(thread) => thread.id,
            None => {
                let opened = self
                    .threads
                    .open_thread(vec![sender_id.clone(), recipient_id.clone()])
                    .await?;
                keep(opened, unsaved).id
            }
        };

        let message = keep(
            self.threads
                .post_message(&thread_id, sender_id, content, attachment_url)
                .await?,
            unsaved,
        );
        Ok(DeliveredMessage { thread_id, message })
    }
}

/// Take the value of a mutation applied in memory, remembering the first
/// write that failed.
fn keep<T>((value, written): (T, AppResult<()>), unsaved: &mut Option<AppError>) -> T {
    if let Err(e) = written {
        unsaved.get_or_insert(e);
    }
    value
}
