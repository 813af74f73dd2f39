//! Thread and direct message CLI commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use devpulse_core::error::AppError;
use devpulse_core::result::AppResult;
use devpulse_core::types::{ThreadId, UserId};
use devpulse_entity::thread::Thread;
use devpulse_service::{FanoutOutcome, Session, SessionContext};

use crate::output::{self, OutputFormat};

/// Arguments for chat commands
#[derive(Debug, Args)]
pub struct ChatArgs {
    /// Chat subcommand
    #[command(subcommand)]
    pub command: ChatCommand,
}

/// Chat subcommands
#[derive(Debug, Subcommand)]
pub enum ChatCommand {
    /// List your threads, most recent first
    List,
    /// Show a thread's messages and mark them read
    Show {
        /// Thread ID
        thread_id: String,
        /// Leave the messages unread
        #[arg(long)]
        peek: bool,
    },
    /// Send a direct message, opening a thread if needed
    Send {
        /// Recipient user ID
        recipient: String,
        /// Message text
        #[arg(default_value = "")]
        content: String,
        /// Attachment URL
        #[arg(short, long)]
        attachment: Option<String>,
    },
    /// Post a message into an existing thread
    Reply {
        /// Thread ID
        thread_id: String,
        /// Message text
        content: String,
        /// Attachment URL
        #[arg(short, long)]
        attachment: Option<String>,
    },
    /// Create a thread with the given participants (you are included)
    Create {
        /// Other participant user IDs
        #[arg(required = true)]
        participants: Vec<String>,
    },
    /// Mark a thread read
    Read {
        /// Thread ID
        thread_id: String,
    },
    /// Count unread messages
    Unread,
}

/// Thread display row
#[derive(Debug, Serialize, Tabled)]
struct ThreadRow {
    /// Thread ID
    id: String,
    /// Other participants
    with: String,
    /// Latest message
    last_message: String,
    /// Unread
    unread: usize,
    /// Last activity
    last_activity: String,
}

impl ThreadRow {
    fn new(thread: &Thread, viewer: &UserId) -> Self {
        let with = match thread.counterpart(viewer) {
            Some(other) => other.to_string(),
            None => thread
                .participants
                .iter()
                .filter(|p| *p != viewer)
                .map(UserId::as_str)
                .collect::<Vec<_>>()
                .join(", "),
        };
        let last_message = match thread.last_message() {
            Some(m) if m.content.trim().is_empty() && m.has_attachment() => "[attachment]".into(),
            Some(m) => m.content.clone(),
            None => "No messages yet".into(),
        };
        Self {
            id: thread.id.to_string(),
            with,
            last_message,
            unread: thread.unread_for(viewer),
            last_activity: output::timestamp(&thread.last_activity),
        }
    }
}

/// Message display row
#[derive(Debug, Serialize, Tabled)]
struct MessageRow {
    /// From
    from: String,
    /// Message
    content: String,
    /// Attachment
    attachment: String,
    /// Sent
    sent: String,
    /// Read
    read: String,
}

/// Execute chat commands
pub async fn execute(
    args: &ChatArgs,
    session: &Session,
    ctx: &SessionContext,
    format: OutputFormat,
) -> AppResult<()> {
    match &args.command {
        ChatCommand::List => {
            let threads = session.threads.threads_for_user(&ctx.user_id).await;
            let rows: Vec<ThreadRow> = threads
                .iter()
                .map(|t| ThreadRow::new(t, &ctx.user_id))
                .collect();
            output::print_list(&rows, format);
        }
        ChatCommand::Show { thread_id, peek } => {
            let thread_id = ThreadId::from(thread_id.as_str());
            let thread = session
                .threads
                .get_thread(&thread_id)
                .await
                .filter(|t| t.has_participant(&ctx.user_id))
                .ok_or_else(|| AppError::not_found(format!("Thread not found: {thread_id}")))?;

            match format {
                OutputFormat::Json => output::print_json(&thread),
                OutputFormat::Table => {
                    let rows: Vec<MessageRow> = thread
                        .messages
                        .iter()
                        .map(|m| MessageRow {
                            from: if m.sender_id == ctx.user_id {
                                "you".to_string()
                            } else {
                                m.sender_id.to_string()
                            },
                            content: m.content.clone(),
                            attachment: m.attachment_url.clone().unwrap_or_default(),
                            sent: output::timestamp(&m.timestamp),
                            read: output::read_marker(m.read),
                        })
                        .collect();
                    output::print_list(&rows, format);
                }
            }

            if !peek {
                session.threads.mark_read(&thread_id, &ctx.user_id).await?;
            }
        }
        ChatCommand::Send {
            recipient,
            content,
            attachment,
        } => {
            let outcome = session
                .fanout
                .send_direct_message(
                    ctx,
                    UserId::from(recipient.as_str()),
                    content.as_str(),
                    attachment.clone(),
                )
                .await?;
            report(&outcome, format);
        }
        ChatCommand::Reply {
            thread_id,
            content,
            attachment,
        } => {
            let outcome = session
                .fanout
                .reply(
                    ctx,
                    &ThreadId::from(thread_id.as_str()),
                    content.as_str(),
                    attachment.clone(),
                )
                .await?;
            report(&outcome, format);
        }
        ChatCommand::Create { participants } => {
            let mut ids = vec![ctx.user_id.clone()];
            ids.extend(participants.iter().map(|p| UserId::from(p.as_str())));
            let thread = session.threads.create_thread(ids).await?;
            match format {
                OutputFormat::Json => output::print_json(&thread),
                OutputFormat::Table => {
                    output::print_success(&format!("Thread {} ready", thread.id));
                    output::print_kv(
                        "Participants",
                        &thread
                            .participants
                            .iter()
                            .map(UserId::as_str)
                            .collect::<Vec<_>>()
                            .join(", "),
                    );
                }
            }
        }
        ChatCommand::Read { thread_id } => {
            let changed = session
                .threads
                .mark_read(&ThreadId::from(thread_id.as_str()), &ctx.user_id)
                .await?;
            if changed == 0 {
                output::print_warning("No unread messages in this thread");
            } else {
                output::print_success(&format!("Marked {changed} message(s) read"));
            }
        }
        ChatCommand::Unread => {
            let count = session.threads.unread_message_count(&ctx.user_id).await;
            match format {
                OutputFormat::Json => output::print_json(&serde_json::json!({ "unread": count })),
                OutputFormat::Table => println!("Unread messages: {count}"),
            }
        }
    }

    Ok(())
}

fn report(outcome: &FanoutOutcome, format: OutputFormat) {
    match format {
        OutputFormat::Json => output::print_json(outcome),
        OutputFormat::Table => {
            if let Some(delivered) = &outcome.message {
                output::print_success(&format!(
                    "Message {} sent in thread {}",
                    delivered.message.id, delivered.thread_id
                ));
            }
        }
    }
    output::print_unsaved(outcome.write_error.as_ref());
}
