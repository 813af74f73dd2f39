//! Unread badge CLI command.

use serde::Serialize;

use devpulse_core::config::AppConfig;
use devpulse_core::result::AppResult;
use devpulse_service::{Session, SessionContext, badge_label};

use crate::output::{self, OutputFormat};

#[derive(Debug, Serialize)]
struct BadgeReport {
    user_id: String,
    messages: usize,
    notifications: usize,
    message_badge: Option<String>,
    notification_badge: Option<String>,
}

/// Print both navigation badges for the acting user
pub async fn execute(
    session: &Session,
    ctx: &SessionContext,
    config: &AppConfig,
    format: OutputFormat,
) -> AppResult<()> {
    let counts = session.unread.counts(&ctx.user_id).await;
    let cap = config.messaging.badge_cap;
    let report = BadgeReport {
        user_id: ctx.user_id.to_string(),
        messages: counts.messages,
        notifications: counts.notifications,
        message_badge: badge_label(counts.messages, cap),
        notification_badge: badge_label(counts.notifications, cap),
    };

    match format {
        OutputFormat::Json => output::print_json(&report),
        OutputFormat::Table => {
            println!("Badges for {} ({})", ctx.username, ctx.user_id);
            output::print_kv("Messages", report.message_badge.as_deref().unwrap_or("-"));
            output::print_kv(
                "Notifications",
                report.notification_badge.as_deref().unwrap_or("-"),
            );
        }
    }

    Ok(())
}
