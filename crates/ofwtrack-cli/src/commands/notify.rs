//! Manual workflow notification dispatch.

use clap::{Args, Subcommand};
use serde::Serialize;

use crate::output::{self, OutputFormat};
use ofwtrack_core::config::AppConfig;
use ofwtrack_core::error::AppError;
use ofwtrack_core::types::{DivisionId, NotificationId, RequestId, UserId};
use ofwtrack_database::DirectoryLookup;
use ofwtrack_database::repositories::DirectoryRepository;
use ofwtrack_entity::request::{RequestSnapshot, RequestStatus};
use ofwtrack_service::WorkflowEvent;

/// Arguments for the notify command
#[derive(Debug, Args)]
pub struct NotifyArgs {
    /// Notify subcommand
    #[command(subcommand)]
    pub command: NotifyCommand,
}

/// Notify subcommands
#[derive(Debug, Subcommand)]
pub enum NotifyCommand {
    /// Tell a requester their request changed status
    Status {
        /// Request ID
        #[arg(long)]
        request: RequestId,
        /// Request reference number shown in the message
        #[arg(long)]
        reference: Option<String>,
        /// Requester user ID
        #[arg(long)]
        requester: UserId,
        /// Division the request belongs to
        #[arg(long)]
        division: Option<DivisionId>,
        /// Whether the request is urgent
        #[arg(long)]
        urgent: bool,
        /// User ID of whoever changed the status
        #[arg(long)]
        changer: UserId,
        /// Previous status
        #[arg(long = "old")]
        old_status: String,
        /// New status
        #[arg(long = "new")]
        new_status: String,
    },
}

/// Summary printed after a dispatch
#[derive(Debug, Serialize)]
struct DispatchSummary {
    primary: NotificationId,
    records: usize,
    push_failures: usize,
    degraded: bool,
}

/// Execute notify commands
pub async fn execute(
    args: &NotifyArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let pool = super::create_db_pool(config).await?;
    let dispatcher = super::create_dispatcher(config, &pool)?;
    let directory = DirectoryRepository::new(pool.clone());

    match &args.command {
        NotifyCommand::Status {
            request,
            reference,
            requester,
            division,
            urgent,
            changer,
            old_status,
            new_status,
        } => {
            let changer = directory
                .find_by_id(*changer)
                .await?
                .ok_or_else(|| AppError::not_found(format!("User {changer} not found")))?;

            let new_status = RequestStatus::from(new_status.as_str());
            let mut snapshot =
                RequestSnapshot::new(*request, *requester, *division, *urgent, new_status.clone());
            if let Some(reference) = reference {
                snapshot = snapshot.with_reference(reference.as_str());
            }

            let event = WorkflowEvent::StatusChanged {
                old_status: RequestStatus::from(old_status.as_str()),
                new_status,
            };
            let report = dispatcher.dispatch(event, &snapshot, &changer).await?;

            if report.degraded {
                output::print_warning("Recipient resolution failed; fallback notification sent");
            }
            for failure in &report.push_failures {
                output::print_warning(&format!(
                    "Push to {} not delivered ({})",
                    failure.recipient_id, failure.reason
                ));
            }

            let summary = DispatchSummary {
                primary: report.primary.id,
                records: report.records.len(),
                push_failures: report.push_failures.len(),
                degraded: report.degraded,
            };
            match format {
                OutputFormat::Json => output::print_item(&summary, format),
                OutputFormat::Table => {
                    output::print_success(&format!(
                        "Dispatched {} notification(s)",
                        summary.records
                    ));
                    output::print_kv("Primary", &summary.primary.to_string());
                    output::print_kv("Title", &report.primary.title);
                    output::print_kv("Message", &report.primary.message);
                }
            }
        }
    }

    Ok(())
}
