//! Notification inspection and read-state commands.

use std::sync::Arc;

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use crate::output::{self, OutputFormat};
use ofwtrack_core::config::AppConfig;
use ofwtrack_core::error::AppError;
use ofwtrack_core::types::{NotificationId, PageRequest, UserId};
use ofwtrack_database::repositories::NotificationRepository;
use ofwtrack_entity::notification::Notification;
use ofwtrack_service::ReadStateManager;

/// Arguments for notification commands
#[derive(Debug, Args)]
pub struct NotificationsArgs {
    /// Notification subcommand
    #[command(subcommand)]
    pub command: NotificationsCommand,
}

/// Notification subcommands
#[derive(Debug, Subcommand)]
pub enum NotificationsCommand {
    /// Count a user's notifications
    Count {
        /// Recipient user ID
        #[arg(long)]
        user: UserId,
        /// Only count unread notifications
        #[arg(long)]
        unread: bool,
    },
    /// List a user's notifications, newest first
    List {
        /// Recipient user ID
        #[arg(long)]
        user: UserId,
        /// Page number
        #[arg(long, default_value_t = 1)]
        page: u64,
        /// Page size
        #[arg(long, default_value_t = 20)]
        page_size: u64,
        /// Only list unread notifications
        #[arg(long)]
        unread: bool,
    },
    /// Mark one notification read
    MarkRead {
        /// Notification ID
        #[arg(long)]
        id: NotificationId,
        /// Recipient user ID
        #[arg(long)]
        user: UserId,
    },
    /// Mark every unread notification of a user read
    MarkAllRead {
        /// Recipient user ID
        #[arg(long)]
        user: UserId,
    },
}

/// Notification display row
#[derive(Debug, Serialize, Tabled)]
struct NotificationRow {
    /// Notification ID
    id: String,
    /// Category
    category: String,
    /// Priority
    priority: String,
    /// Title
    title: String,
    /// Action
    action: String,
    /// Read
    read: String,
    /// Created
    created: String,
}

impl From<&Notification> for NotificationRow {
    fn from(n: &Notification) -> Self {
        Self {
            id: n.id.to_string(),
            category: n.category.to_string(),
            priority: n.priority.to_string(),
            title: n.title.clone(),
            action: if n.action_required { "✓" } else { "" }.to_string(),
            read: if n.is_read { "✓" } else { "✗" }.to_string(),
            created: n.created_at.format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}

/// Execute notification commands
pub async fn execute(
    args: &NotificationsArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let pool = super::create_db_pool(config).await?;
    let read_state = ReadStateManager::new(Arc::new(NotificationRepository::new(pool.clone())));

    match &args.command {
        NotificationsCommand::Count { user, unread } => {
            let count = read_state.count(*user, *unread).await?;
            match format {
                OutputFormat::Json => output::print_item(
                    &serde_json::json!({ "user": user, "unread_only": unread, "count": count }),
                    format,
                ),
                OutputFormat::Table => {
                    output::print_kv("User", &user.to_string());
                    output::print_kv(if *unread { "Unread" } else { "Total" }, &count.to_string());
                }
            }
        }
        NotificationsCommand::List {
            user,
            page,
            page_size,
            unread,
        } => {
            let page = read_state
                .list(*user, PageRequest::new(*page, *page_size), *unread)
                .await?;
            let rows: Vec<NotificationRow> = page.items.iter().map(NotificationRow::from).collect();
            output::print_list(&rows, format);
            if format == OutputFormat::Table {
                println!(
                    "Page {}/{} ({} total)",
                    page.page, page.total_pages, page.total_items
                );
            }
        }
        NotificationsCommand::MarkRead { id, user } => {
            if read_state.mark_read(*id, *user).await? {
                output::print_success(&format!("Notification {id} marked read"));
            } else {
                output::print_warning(&format!("Notification {id} was already read or not found"));
            }
            sync_unread(config, &pool, *user).await?;
        }
        NotificationsCommand::MarkAllRead { user } => {
            let changed = read_state.mark_all_read(*user).await?;
            output::print_success(&format!("Marked {changed} notifications read"));
            sync_unread(config, &pool, *user).await?;
        }
    }

    Ok(())
}

async fn sync_unread(config: &AppConfig, pool: &sqlx::PgPool, user: UserId) -> Result<(), AppError> {
    let dispatcher = super::create_dispatcher(config, pool)?;
    let remaining = dispatcher.sync_unread_count(user).await?;
    output::print_kv("Unread remaining", &remaining.to_string());
    Ok(())
}
