//! Notification feed CLI commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use devpulse_core::error::AppError;
use devpulse_core::result::AppResult;
use devpulse_core::types::NotificationId;
use devpulse_entity::notification::Notification;
use devpulse_service::{Session, SessionContext};

use crate::output::{self, OutputFormat};

/// Arguments for notification commands
#[derive(Debug, Args)]
pub struct NotifyArgs {
    /// Notification subcommand
    #[command(subcommand)]
    pub command: NotifyCommand,
}

/// Notification subcommands
#[derive(Debug, Subcommand)]
pub enum NotifyCommand {
    /// List your notifications, newest first
    List {
        /// Only unread notifications
        #[arg(long)]
        unread: bool,
    },
    /// Mark one notification read
    Read {
        /// Notification ID
        id: String,
    },
    /// Mark all your notifications read
    ReadAll {
        /// Skip confirmation
        #[arg(long)]
        force: bool,
    },
    /// Count unread notifications
    Unread,
}

/// Notification display row
#[derive(Debug, Serialize, Tabled)]
struct NotificationRow {
    /// Notification ID
    id: String,
    /// Kind
    kind: String,
    /// Notification text
    text: String,
    /// Subject
    subject: String,
    /// When
    when: String,
    /// Read
    read: String,
}

impl From<&Notification> for NotificationRow {
    fn from(n: &Notification) -> Self {
        Self {
            id: n.id.to_string(),
            kind: n.kind.to_string(),
            text: format!("{} {}", n.actor_username, n.summary),
            subject: n.subject_id.clone().unwrap_or_default(),
            when: output::timestamp(&n.created_at),
            read: output::read_marker(n.read),
        }
    }
}

/// Execute notification commands
pub async fn execute(
    args: &NotifyArgs,
    session: &Session,
    ctx: &SessionContext,
    format: OutputFormat,
) -> AppResult<()> {
    match &args.command {
        NotifyCommand::List { unread } => {
            let mut notifications = session
                .notifications
                .notifications_for_user(&ctx.user_id)
                .await;
            if *unread {
                notifications.retain(Notification::is_unread);
            }
            match format {
                OutputFormat::Json => output::print_json(&notifications),
                OutputFormat::Table => {
                    let rows: Vec<NotificationRow> =
                        notifications.iter().map(NotificationRow::from).collect();
                    output::print_list(&rows, format);
                }
            }
        }
        NotifyCommand::Read { id } => {
            let id = NotificationId::from(id.as_str());
            let owned = session
                .notifications
                .notifications_for_user(&ctx.user_id)
                .await
                .iter()
                .any(|n| n.id == id);
            if !owned {
                output::print_warning(&format!("No notification {id} for you"));
                return Ok(());
            }
            if session.notifications.mark_read(&id).await? {
                output::print_success(&format!("Notification {id} marked read"));
            } else {
                output::print_warning(&format!("Notification {id} was already read"));
            }
        }
        NotifyCommand::ReadAll { force } => {
            if !force {
                let confirm = dialoguer::Confirm::new()
                    .with_prompt("Mark ALL your notifications as read?")
                    .default(true)
                    .interact()
                    .map_err(|e| AppError::internal(format!("Input error: {e}")))?;

                if !confirm {
                    println!("Cancelled.");
                    return Ok(());
                }
            }

            let changed = session.notifications.mark_all_read(&ctx.user_id).await?;
            output::print_success(&format!("Marked {changed} notification(s) read"));
        }
        NotifyCommand::Unread => {
            let count = session.notifications.unread_count(&ctx.user_id).await;
            match format {
                OutputFormat::Json => output::print_json(&serde_json::json!({ "unread": count })),
                OutputFormat::Table => println!("Unread notifications: {count}"),
            }
        }
    }

    Ok(())
}
