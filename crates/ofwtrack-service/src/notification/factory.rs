//! Materialization of resolution entries into notification rows.

use chrono::{DateTime, SubsecRound, Utc};
use serde_json::{Map, Value, json};

use ofwtrack_core::error::AppError;
use ofwtrack_core::result::AppResult;
use ofwtrack_entity::actor::Actor;
use ofwtrack_entity::notification::{
    NewNotification, NotificationCategory, NotificationPriority,
};
use ofwtrack_entity::request::RequestSnapshot;

use super::event::WorkflowEvent;
use super::resolver::ResolutionEntry;

/// Everything the factory needs to know about the triggering event.
#[derive(Debug, Clone, Copy)]
pub struct EventContext<'a> {
    /// The event.
    pub event: &'a WorkflowEvent,
    /// The request at event time.
    pub request: &'a RequestSnapshot,
    /// The user who caused the event.
    pub actor: &'a Actor,
    /// The request's owner, when it could be looked up.
    pub requester: Option<&'a Actor>,
}

/// Builds [`NewNotification`] rows. Stateless.
#[derive(Debug, Clone, Copy, Default)]
pub struct NotificationFactory;

impl NotificationFactory {
    /// Creates a new factory.
    pub fn new() -> Self {
        Self
    }

    /// Build the row for one resolution entry, stamped now.
    pub fn build(&self, entry: &ResolutionEntry, ctx: &EventContext<'_>) -> NewNotification {
        self.build_at(entry, ctx, Utc::now())
    }

    /// Build the row for one resolution entry with an explicit timestamp.
    ///
    /// The timestamp is cut to microseconds, the precision the store keeps.
    pub fn build_at(
        &self,
        entry: &ResolutionEntry,
        ctx: &EventContext<'_>,
        now: DateTime<Utc>,
    ) -> NewNotification {
        let now = now.trunc_subsecs(6);
        NewNotification {
            recipient_id: entry.recipient_id,
            title: entry.title.clone(),
            message: entry.message.clone(),
            category: entry.category,
            request_id: Some(ctx.request.id),
            priority: entry.priority,
            action_required: entry.action_required,
            sender_name: Some(ctx.actor.display_name.clone()),
            sender_email: ctx.actor.email.clone(),
            payload: Value::Object(payload(ctx, now)),
            created_at: now,
        }
    }

    /// Build the degraded requester row used when resolution failed.
    ///
    /// The failure text is carried in `payload.error`.
    pub fn fallback(&self, ctx: &EventContext<'_>, error: &str) -> NewNotification {
        let now = Utc::now().trunc_subsecs(6);
        let mut payload = payload(ctx, now);
        payload.insert("error".to_string(), Value::String(error.to_string()));

        NewNotification {
            recipient_id: ctx.request.requester_id,
            title: "Request Update".to_string(),
            message: format!(
                "There is an update on your request {}.",
                ctx.request.display_ref()
            ),
            category: NotificationCategory::RequestCreated,
            request_id: Some(ctx.request.id),
            priority: NotificationPriority::Medium,
            action_required: false,
            sender_name: Some(ctx.actor.display_name.clone()),
            sender_email: ctx.actor.email.clone(),
            payload: Value::Object(payload),
            created_at: now,
        }
    }

    /// Reject rows that must not reach the store.
    pub fn validate(&self, notification: &NewNotification) -> AppResult<()> {
        if notification.title.trim().is_empty() {
            return Err(AppError::validation("Notification title must not be empty"));
        }
        if notification.message.trim().is_empty() {
            return Err(AppError::validation(
                "Notification message must not be empty",
            ));
        }
        if !notification.payload.is_object() {
            return Err(AppError::validation(
                "Notification payload must be a JSON object",
            ));
        }
        Ok(())
    }
}

fn payload(ctx: &EventContext<'_>, now: DateTime<Utc>) -> Map<String, Value> {
    let request = ctx.request;
    let mut map = Map::new();
    map.insert("event".into(), json!(ctx.event.kind().as_str()));
    map.insert("request_id".into(), json!(request.id.to_string()));
    map.insert("request_reference".into(), json!(request.display_ref()));
    map.insert("is_urgent".into(), json!(request.is_urgent));
    map.insert("status".into(), json!(request.status.as_str()));
    map.insert(
        "requester_name".into(),
        json!(ctx.requester.map(|r| r.display_name.as_str())),
    );
    map.insert(
        "requester_division".into(),
        json!(request.division_id.map(|d| d.to_string())),
    );
    map.insert("actor_name".into(), json!(ctx.actor.display_name));
    map.insert("actor_role".into(), json!(ctx.actor.role.as_str()));
    map.insert("timestamp".into(), json!(now.to_rfc3339()));

    match ctx.event {
        WorkflowEvent::Approved { approval_type } => {
            map.insert("approval_type".into(), json!(approval_type.as_str()));
        }
        WorkflowEvent::Rejected {
            reason,
            rejection_type,
        } => {
            map.insert("reason".into(), json!(reason));
            map.insert("rejection_type".into(), json!(rejection_type));
        }
        WorkflowEvent::StatusChanged {
            old_status,
            new_status,
        } => {
            map.insert("old_status".into(), json!(old_status.as_str()));
            map.insert("new_status".into(), json!(new_status.as_str()));
        }
        WorkflowEvent::Created | WorkflowEvent::ReadyForPickup | WorkflowEvent::Completed => {}
    }
    map
}

#[cfg(test)]
mod tests {
    use super::*;
    use ofwtrack_core::error::ErrorKind;
    use ofwtrack_core::types::{DivisionId, RequestId, UserId};
    use ofwtrack_entity::actor::ActorRole;
    use ofwtrack_entity::request::{ApprovalType, RequestStatus};

    fn fixtures() -> (RequestSnapshot, Actor, Actor) {
        let division = DivisionId::new();
        let requester = Actor::new(UserId::new(), "R. Bautista", ActorRole::FocalPerson, Some(division));
        let actor = Actor::new(UserId::new(), "M. Reyes", ActorRole::Admin, None)
            .with_email("m.reyes@example.org");
        let request = RequestSnapshot::new(
            RequestId::new(),
            requester.id,
            Some(division),
            true,
            RequestStatus::Approved,
        );
        (request, requester, actor)
    }

    fn entry(recipient: UserId) -> ResolutionEntry {
        ResolutionEntry {
            recipient_id: recipient,
            title: "Request Approved".to_string(),
            message: "Your request has been approved.".to_string(),
            category: NotificationCategory::RequestApproved,
            priority: NotificationPriority::Low,
            action_required: false,
        }
    }

    #[test]
    fn test_build_copies_entry_and_sender() {
        let (request, requester, actor) = fixtures();
        let event = WorkflowEvent::Approved {
            approval_type: ApprovalType::Admin,
        };
        let ctx = EventContext {
            event: &event,
            request: &request,
            actor: &actor,
            requester: Some(&requester),
        };

        let row = NotificationFactory::new().build(&entry(requester.id), &ctx);

        assert_eq!(row.recipient_id, requester.id);
        assert_eq!(row.request_id, Some(request.id));
        assert_eq!(row.sender_name.as_deref(), Some("M. Reyes"));
        assert_eq!(row.sender_email.as_deref(), Some("m.reyes@example.org"));
        assert_eq!(row.payload["event"], "approved");
        assert_eq!(row.payload["approval_type"], "admin");
        assert_eq!(row.payload["requester_name"], "R. Bautista");
        assert_eq!(row.payload["actor_role"], "admin");
        assert_eq!(row.payload["is_urgent"], true);
        assert!(row.payload.get("reason").is_none());
    }

    #[test]
    fn test_rejection_payload_keeps_null_reason() {
        let (request, requester, actor) = fixtures();
        let event = WorkflowEvent::Rejected {
            reason: None,
            rejection_type: Some("incomplete".to_string()),
        };
        let ctx = EventContext {
            event: &event,
            request: &request,
            actor: &actor,
            requester: Some(&requester),
        };

        let row = NotificationFactory::new().build(&entry(requester.id), &ctx);
        assert_eq!(row.payload["reason"], Value::Null);
        assert_eq!(row.payload["rejection_type"], "incomplete");
    }

    #[test]
    fn test_fallback_targets_requester_with_error() {
        let (request, _, actor) = fixtures();
        let event = WorkflowEvent::Completed;
        let ctx = EventContext {
            event: &event,
            request: &request,
            actor: &actor,
            requester: None,
        };

        let row = NotificationFactory::new().fallback(&ctx, "directory unavailable");

        assert_eq!(row.recipient_id, request.requester_id);
        assert_eq!(row.category, NotificationCategory::RequestCreated);
        assert_eq!(row.priority, NotificationPriority::Medium);
        assert_eq!(row.payload["error"], "directory unavailable");
        assert_eq!(row.payload["requester_name"], Value::Null);
        assert!(NotificationFactory::new().validate(&row).is_ok());
    }

    #[test]
    fn test_timestamps_are_cut_to_microseconds() {
        use chrono::{TimeDelta, TimeZone, Timelike};

        let (request, requester, actor) = fixtures();
        let event = WorkflowEvent::Completed;
        let ctx = EventContext {
            event: &event,
            request: &request,
            actor: &actor,
            requester: Some(&requester),
        };
        let factory = NotificationFactory::new();
        let at = Utc.with_ymd_and_hms(2026, 3, 14, 9, 30, 0).unwrap()
            + TimeDelta::nanoseconds(123_456_789);

        let row = factory.build_at(&entry(requester.id), &ctx, at);
        assert_eq!(row.created_at.nanosecond(), 123_456_000);

        let fallback = factory.fallback(&ctx, "directory unavailable");
        assert_eq!(fallback.created_at.nanosecond() % 1_000, 0);
    }

    #[test]
    fn test_validate_rejects_blank_text() {
        let (request, requester, actor) = fixtures();
        let event = WorkflowEvent::Created;
        let ctx = EventContext {
            event: &event,
            request: &request,
            actor: &actor,
            requester: Some(&requester),
        };
        let factory = NotificationFactory::new();

        let mut row = factory.build(&entry(requester.id), &ctx);
        row.title = "  ".to_string();
        let err = factory.validate(&row).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);

        row.title = "Request Submitted".to_string();
        row.message = String::new();
        assert!(factory.validate(&row).is_err());
    }
}
