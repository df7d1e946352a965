//! Notification dispatcher: resolves recipients, persists, pushes.

use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use tracing::{debug, error, info, warn};

use ofwtrack_core::config::RealtimeConfig;
use ofwtrack_core::error::AppError;
use ofwtrack_core::result::AppResult;
use ofwtrack_core::types::UserId;
use ofwtrack_database::{DirectoryLookup, NotificationStore};
use ofwtrack_entity::actor::Actor;
use ofwtrack_entity::notification::{NewNotification, Notification};
use ofwtrack_entity::request::{ApprovalType, RequestSnapshot, RequestStatus};
use ofwtrack_service::{
    EventContext, NotificationFactory, RecipientResolver, ResolutionEntry, WorkflowEvent,
};

use crate::channel::{ChannelType, RealtimeChannel};
use crate::message::OutboundMessage;
use crate::message::builder::{build_notification, build_unread_count};
use crate::metrics::DispatchMetrics;

use super::report::{DispatchReport, PushFailure, PushFailureReason};

/// One persisted record and the outcome of its push.
struct Delivered {
    notification: Notification,
    push_failure: Option<PushFailure>,
}

/// Turns workflow events into persisted, pushed notifications.
///
/// Persistence is the correctness-critical step: its failures reach the
/// caller. Pushes are bounded by `push_timeout_ms` and never fail a call.
#[derive(Debug, Clone)]
pub struct DispatchService {
    /// Notification store
    store: Arc<dyn NotificationStore>,
    /// Recipient resolution
    resolver: RecipientResolver,
    /// Row construction
    factory: NotificationFactory,
    /// Realtime push backend
    channel: Arc<dyn RealtimeChannel>,
    /// Configuration
    config: RealtimeConfig,
    /// Counters
    metrics: Arc<DispatchMetrics>,
}

impl DispatchService {
    /// Create a new dispatcher
    pub fn new(
        store: Arc<dyn NotificationStore>,
        directory: Arc<dyn DirectoryLookup>,
        channel: Arc<dyn RealtimeChannel>,
        config: RealtimeConfig,
    ) -> Self {
        Self {
            store,
            resolver: RecipientResolver::new(directory),
            factory: NotificationFactory::new(),
            channel,
            config,
            metrics: Arc::new(DispatchMetrics::new()),
        }
    }

    /// Dispatch counters.
    pub fn metrics(&self) -> &Arc<DispatchMetrics> {
        &self.metrics
    }

    /// A request was submitted.
    pub async fn notify_created(
        &self,
        request: &RequestSnapshot,
        requester: &Actor,
    ) -> AppResult<Notification> {
        self.primary(WorkflowEvent::Created, request, requester)
            .await
    }

    /// A request was approved at some stage.
    pub async fn notify_approved(
        &self,
        request: &RequestSnapshot,
        approver: &Actor,
        approval_type: ApprovalType,
    ) -> AppResult<Notification> {
        self.primary(WorkflowEvent::Approved { approval_type }, request, approver)
            .await
    }

    /// A request was rejected.
    pub async fn notify_rejected(
        &self,
        request: &RequestSnapshot,
        rejector: &Actor,
        reason: Option<String>,
        rejection_type: Option<String>,
    ) -> AppResult<Notification> {
        let event = WorkflowEvent::Rejected {
            reason,
            rejection_type,
        };
        self.primary(event, request, rejector).await
    }

    /// A request is ready to be collected.
    pub async fn notify_ready_for_pickup(
        &self,
        request: &RequestSnapshot,
        notifier: &Actor,
    ) -> AppResult<Notification> {
        self.primary(WorkflowEvent::ReadyForPickup, request, notifier)
            .await
    }

    /// A request was closed out.
    pub async fn notify_completed(
        &self,
        request: &RequestSnapshot,
        completer: &Actor,
    ) -> AppResult<Notification> {
        self.primary(WorkflowEvent::Completed, request, completer)
            .await
    }

    /// A request moved between arbitrary statuses.
    pub async fn notify_status_changed(
        &self,
        request: &RequestSnapshot,
        changer: &Actor,
        old_status: RequestStatus,
        new_status: RequestStatus,
    ) -> AppResult<Notification> {
        let event = WorkflowEvent::StatusChanged {
            old_status,
            new_status,
        };
        self.primary(event, request, changer).await
    }

    async fn primary(
        &self,
        event: WorkflowEvent,
        request: &RequestSnapshot,
        actor: &Actor,
    ) -> AppResult<Notification> {
        self.dispatch(event, request, actor)
            .await
            .map(|report| report.primary)
    }

    /// Dispatch one workflow event.
    ///
    /// The requester's record is persisted and pushed first. The remaining
    /// recipients follow, concurrently when `parallel_fanout` is set. Every
    /// entry is attempted; if any persist failed the first such error is
    /// returned afterwards.
    pub async fn dispatch(
        &self,
        event: WorkflowEvent,
        request: &RequestSnapshot,
        actor: &Actor,
    ) -> AppResult<DispatchReport> {
        self.metrics.record_event();

        let resolution = match self.resolver.resolve(&event, request, actor).await {
            Ok(resolution) => resolution,
            Err(e) => {
                warn!(
                    event = %event.kind(),
                    request_id = %request.id,
                    error = %e,
                    "Recipient resolution failed; sending fallback notification"
                );
                return self.fallback(&event, request, actor, &e.to_string()).await;
            }
        };

        let Some(requester_entry) = resolution.requester_entry() else {
            warn!(
                event = %event.kind(),
                request_id = %request.id,
                "Resolution produced no requester entry; sending fallback notification"
            );
            return self
                .fallback(&event, request, actor, "no recipients resolved")
                .await;
        };

        let ctx = EventContext {
            event: &event,
            request,
            actor,
            requester: Some(&resolution.requester),
        };

        let first = self.deliver(requester_entry, &ctx).await;
        let others: Vec<&ResolutionEntry> = resolution.others().collect();
        let rest = if self.config.parallel_fanout {
            join_all(others.iter().map(|entry| self.deliver(entry, &ctx))).await
        } else {
            let mut out = Vec::with_capacity(others.len());
            for entry in &others {
                out.push(self.deliver(entry, &ctx).await);
            }
            out
        };

        let mut records = Vec::with_capacity(rest.len() + 1);
        let mut push_failures = Vec::new();
        let mut first_error: Option<AppError> = None;

        for outcome in std::iter::once(first).chain(rest) {
            match outcome {
                Ok(delivered) => {
                    records.push(delivered.notification);
                    push_failures.extend(delivered.push_failure);
                }
                Err(e) => {
                    if first_error.is_none() {
                        first_error = Some(e);
                    }
                }
            }
        }

        if let Some(e) = first_error {
            return Err(e);
        }

        info!(
            event = %event.kind(),
            request_id = %request.id,
            records = records.len(),
            push_failures = push_failures.len(),
            "Dispatched workflow notifications"
        );

        let Some(primary) = records.first().cloned() else {
            return Err(AppError::internal("Dispatch produced no notification records"));
        };
        Ok(DispatchReport {
            primary,
            records,
            push_failures,
            degraded: false,
        })
    }

    /// Persist and push caller-built notifications independently.
    ///
    /// A failing entry is logged and skipped; the rest still go through.
    pub async fn bulk_create(&self, notifications: Vec<NewNotification>) -> Vec<Notification> {
        let outcomes = join_all(notifications.iter().map(|n| self.persist_and_push(n))).await;
        let total = outcomes.len();

        let created: Vec<Notification> = outcomes
            .into_iter()
            .filter_map(|outcome| match outcome {
                Ok(delivered) => Some(delivered.notification),
                Err(e) => {
                    error!(error = %e, "Failed to create notification in bulk");
                    None
                }
            })
            .collect();

        info!(requested = total, created = created.len(), "Bulk notification create finished");
        created
    }

    /// Push the recipient's current unread count to their channel.
    ///
    /// The count is returned even if the push fails.
    pub async fn sync_unread_count(&self, recipient_id: UserId) -> AppResult<i64> {
        let count = self.store.count_where(recipient_id, true).await?;
        let channel = ChannelType::User(recipient_id).to_channel_string();
        match self.push(&channel, &build_unread_count(count)).await {
            Ok(()) => debug!(recipient_id = %recipient_id, count, "Pushed unread count"),
            Err(reason) => warn!(
                recipient_id = %recipient_id,
                count,
                reason = %reason,
                "Unread count push failed"
            ),
        }
        Ok(count)
    }

    async fn fallback(
        &self,
        event: &WorkflowEvent,
        request: &RequestSnapshot,
        actor: &Actor,
        error_text: &str,
    ) -> AppResult<DispatchReport> {
        self.metrics.record_fallback();
        let ctx = EventContext {
            event,
            request,
            actor,
            requester: None,
        };
        let row = self.factory.fallback(&ctx, error_text);
        let delivered = self.persist_and_push(&row).await?;

        Ok(DispatchReport {
            primary: delivered.notification.clone(),
            records: vec![delivered.notification],
            push_failures: delivered.push_failure.into_iter().collect(),
            degraded: true,
        })
    }

    async fn deliver(
        &self,
        entry: &ResolutionEntry,
        ctx: &EventContext<'_>,
    ) -> AppResult<Delivered> {
        let row = self.factory.build(entry, ctx);
        self.persist_and_push(&row).await
    }

    async fn persist_and_push(&self, row: &NewNotification) -> AppResult<Delivered> {
        self.factory.validate(row)?;

        let id = self.store.insert(row).await.map_err(|e| {
            error!(
                recipient_id = %row.recipient_id,
                category = %row.category,
                error = %e,
                "Failed to persist notification"
            );
            e
        })?;
        self.metrics.record_persisted();
        let notification = row.clone().into_notification(id);

        let channel = ChannelType::User(notification.recipient_id).to_channel_string();
        let push_failure = match self.push(&channel, &build_notification(&notification)).await {
            Ok(()) => None,
            Err(reason) => {
                warn!(
                    notification_id = %notification.id,
                    recipient_id = %notification.recipient_id,
                    category = %notification.category,
                    reason = %reason,
                    "Realtime push failed; notification remains persisted"
                );
                Some(PushFailure {
                    notification_id: notification.id,
                    recipient_id: notification.recipient_id,
                    category: notification.category,
                    reason,
                })
            }
        };

        Ok(Delivered {
            notification,
            push_failure,
        })
    }

    async fn push(&self, channel: &str, message: &OutboundMessage) -> Result<(), PushFailureReason> {
        let deadline = Duration::from_millis(self.config.push_timeout_ms);
        let outcome = match tokio::time::timeout(deadline, self.channel.publish(channel, message)).await {
            Ok(Ok(true)) => Ok(()),
            Ok(Ok(false)) => Err(PushFailureReason::NotDelivered),
            Ok(Err(e)) => Err(PushFailureReason::Error(e.to_string())),
            Err(_) => Err(PushFailureReason::TimedOut),
        };
        match outcome {
            Ok(()) => self.metrics.record_pushed(),
            Err(_) => self.metrics.record_push_failed(),
        }
        outcome
    }
}
