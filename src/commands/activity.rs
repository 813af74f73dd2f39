//! Feed, follow, and community event CLI commands.

use clap::{Args, Subcommand};

use devpulse_core::events::ActivityEvent;
use devpulse_core::result::AppResult;
use devpulse_core::types::{CommunityId, PostId, UserId};
use devpulse_service::{FanoutOutcome, Session, SessionContext};

use crate::output::{self, OutputFormat};

/// Arguments for activity commands
#[derive(Debug, Args)]
pub struct ActivityArgs {
    /// Activity subcommand
    #[command(subcommand)]
    pub command: ActivityCommand,
}

/// Activity subcommands
#[derive(Debug, Subcommand)]
pub enum ActivityCommand {
    /// Like a post
    Like {
        /// Post ID
        post_id: String,
        /// The post author's user ID
        #[arg(long)]
        author: String,
    },
    /// Remove your like from a post
    Unlike {
        /// Post ID
        post_id: String,
    },
    /// Comment on a post
    Comment {
        /// Post ID
        post_id: String,
        /// The post author's user ID
        #[arg(long)]
        author: String,
        /// Comment text
        text: String,
    },
    /// Follow a user
    Follow {
        /// User ID to follow
        user_id: String,
    },
    /// Ask to join a community
    JoinRequest {
        /// Community ID
        community_id: String,
        /// Community display name
        #[arg(long)]
        name: String,
        /// The community owner's user ID
        #[arg(long)]
        owner: String,
    },
    /// Approve a pending join request
    JoinApproved {
        /// Community ID
        community_id: String,
        /// Community display name
        #[arg(long)]
        name: String,
        /// The requesting user's ID
        #[arg(long)]
        requester: String,
    },
}

impl ActivityCommand {
    /// The event this command raises, if it raises one.
    fn event(&self) -> Option<ActivityEvent> {
        let event = match self {
            Self::Like { post_id, author } => ActivityEvent::PostLiked {
                post_id: PostId::from(post_id.as_str()),
                author_id: UserId::from(author.as_str()),
            },
            Self::Unlike { .. } => return None,
            Self::Comment {
                post_id,
                author,
                text,
            } => ActivityEvent::PostCommented {
                post_id: PostId::from(post_id.as_str()),
                author_id: UserId::from(author.as_str()),
                comment: text.clone(),
            },
            Self::Follow { user_id } => ActivityEvent::UserFollowed {
                followed_id: UserId::from(user_id.as_str()),
            },
            Self::JoinRequest {
                community_id,
                name,
                owner,
            } => ActivityEvent::CommunityJoinRequested {
                community_id: CommunityId::from(community_id.as_str()),
                community_name: name.clone(),
                owner_id: UserId::from(owner.as_str()),
            },
            Self::JoinApproved {
                community_id,
                name,
                requester,
            } => ActivityEvent::CommunityJoinApproved {
                community_id: CommunityId::from(community_id.as_str()),
                community_name: name.clone(),
                requester_id: UserId::from(requester.as_str()),
            },
        };
        Some(event)
    }
}

/// Execute activity commands
pub async fn execute(
    args: &ActivityArgs,
    session: &Session,
    ctx: &SessionContext,
    format: OutputFormat,
) -> AppResult<()> {
    if let ActivityCommand::Unlike { post_id } = &args.command {
        let post_id = PostId::from(post_id.as_str());
        if session.likes.unlike(&post_id, &ctx.user_id).await? {
            output::print_success(&format!(
                "Unliked post {post_id} ({} like(s) left)",
                session.likes.like_count(&post_id).await
            ));
        } else {
            output::print_warning(&format!("You have not liked post {post_id}"));
        }
        return Ok(());
    }

    let Some(event) = args.command.event() else {
        return Ok(());
    };
    let outcome = session.fanout.publish(ctx, event).await?;
    report(&outcome, format);

    if let ActivityCommand::Like { post_id, .. } = &args.command {
        let post_id = PostId::from(post_id.as_str());
        output::print_kv("Likes", &session.likes.like_count(&post_id).await.to_string());
    }

    Ok(())
}

fn report(outcome: &FanoutOutcome, format: OutputFormat) {
    match (format, &outcome.notification) {
        (OutputFormat::Json, _) => output::print_json(outcome),
        (OutputFormat::Table, Some(n)) => {
            output::print_success(&format!("Notified {}: {}", n.recipient_id, n.summary));
        }
        (OutputFormat::Table, None) => output::print_warning("No notification sent"),
    }
    output::print_unsaved(outcome.write_error.as_ref());
}
