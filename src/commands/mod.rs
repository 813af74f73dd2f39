//! CLI command definitions and dispatch.

pub mod activity;
pub mod badges;
pub mod chat;
pub mod notify;
pub mod store;

use clap::{Parser, Subcommand};

use devpulse_core::config::AppConfig;
use devpulse_core::result::AppResult;
use devpulse_service::{Session, SessionContext};

use crate::output::OutputFormat;

/// DevPulse: direct messages and notifications for a developer network
#[derive(Debug, Parser)]
#[command(name = "devpulse", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: String,

    /// Configuration overlay loaded from `config/<env>.toml`
    #[arg(long, env = "DEVPULSE_ENV", default_value = "development")]
    pub env: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Act as this user id instead of the configured one
    #[arg(short, long, global = true)]
    pub user: Option<String>,

    /// Username shown on notifications raised by --user
    #[arg(long, global = true)]
    pub username: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Threads and direct messages
    Chat(chat::ChatArgs),
    /// Notification feed
    Notify(notify::NotifyArgs),
    /// Raise feed, follow, and community events
    Activity(activity::ActivityArgs),
    /// Unread badge counts
    Badges,
    /// Persistent store maintenance
    Store(store::StoreArgs),
}

impl Cli {
    /// Load the configuration named on the command line.
    pub fn load_config(&self) -> AppResult<AppConfig> {
        AppConfig::load(&self.config, &self.env)
    }

    /// The acting identity: configured default, overridden by flags.
    pub fn session_context(&self, config: &AppConfig) -> SessionContext {
        let mut ctx = SessionContext::from_config(&config.session);
        if let Some(user) = &self.user {
            ctx.user_id = user.as_str().into();
            ctx.username = self.username.clone().unwrap_or_else(|| format!("user{user}"));
        } else if let Some(username) = &self.username {
            ctx.username = username.clone();
        }
        ctx
    }

    /// Execute the CLI command
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        let session = Session::from_config(config).await?;
        let ctx = self.session_context(config);
        tracing::debug!(user_id = %ctx.user_id, "Acting identity resolved");

        let result = match &self.command {
            Commands::Chat(args) => chat::execute(args, &session, &ctx, self.format).await,
            Commands::Notify(args) => notify::execute(args, &session, &ctx, self.format).await,
            Commands::Activity(args) => {
                activity::execute(args, &session, &ctx, self.format).await
            }
            Commands::Badges => badges::execute(&session, &ctx, config, self.format).await,
            Commands::Store(args) => store::execute(args, &session, self.format).await,
        };

        // Retries any write the command left dirty.
        let closed = session.close().await;
        result.and(closed)
    }
}
