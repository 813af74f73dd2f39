//! Notification summary templates.

use devpulse_core::config::messaging::MessagingConfig;

/// Renders notification summaries.
///
/// Summaries never include the actor's name; the front end shows it next
/// to the summary.
#[derive(Debug, Clone)]
pub struct NotificationFormatter {
    preview_length: usize,
    ellipsis: String,
}

impl Default for NotificationFormatter {
    fn default() -> Self {
        Self::new(&MessagingConfig::default())
    }
}

impl NotificationFormatter {
    /// Creates a formatter from messaging settings.
    pub fn new(config: &MessagingConfig) -> Self {
        Self {
            preview_length: config.preview_length,
            ellipsis: config.ellipsis.clone(),
        }
    }

    /// Cut `text` to the preview length, appending the ellipsis marker when
    /// anything was dropped. Lengths count characters, not bytes.
    pub fn preview(&self, text: &str) -> String {
        match text.char_indices().nth(self.preview_length) {
            Some((cut, _)) => format!("{}{}", &text[..cut], self.ellipsis),
            None => text.to_string(),
        }
    }

    /// `liked your post`
    pub fn post_liked(&self) -> String {
        "liked your post".to_string()
    }

    /// `commented on your post: "<preview>"`
    pub fn post_commented(&self, comment: &str) -> String {
        format!("commented on your post: \"{}\"", self.preview(comment))
    }

    /// `requested to join your <name> community`
    pub fn join_requested(&self, community_name: &str) -> String {
        format!("requested to join your {community_name} community")
    }

    /// `your request to join <name> was approved`
    pub fn join_approved(&self, community_name: &str) -> String {
        format!("your request to join {community_name} was approved")
    }

    /// `started following you`
    pub fn followed(&self) -> String {
        "started following you".to_string()
    }

    /// `sent you a message: "<preview>"`, or a plain attachment notice when
    /// the message has no text.
    pub fn message_sent(&self, content: &str) -> String {
        if content.trim().is_empty() {
            "sent you an attachment".to_string()
        } else {
            format!("sent you a message: \"{}\"", self.preview(content))
        }
    }
}
