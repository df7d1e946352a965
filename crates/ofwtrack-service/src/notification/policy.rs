//! Recipient resolution policy.
//!
//! The policy is a static, ordered decision table. Every row names the
//! event kind it belongs to, an audience selector that returns `None`
//! when the row's condition does not hold, and a renderer for the text.
//! All matching rows contribute, in table order; this is fan-out, not a
//! single branch.
//!
//! Planning is pure. Turning an [`Audience`] into user ids needs the
//! directory and happens in [`super::resolver`].

use ofwtrack_core::types::DivisionId;
use ofwtrack_entity::actor::{Actor, ActorRole};
use ofwtrack_entity::notification::{NotificationCategory, NotificationPriority};
use ofwtrack_entity::request::{ApprovalType, RequestSnapshot};

use super::event::{EventKind, WorkflowEvent};

/// Who a planned notice is addressed to, before directory expansion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Audience {
    /// The request's owner.
    Requester,
    /// The division chief of a division, if one exists.
    DivisionChief(DivisionId),
    /// Every admin.
    Admins,
}

/// Rendered text and flags shared by every recipient of one table row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedNotice {
    /// Who receives it.
    pub audience: Audience,
    /// Notification category.
    pub category: NotificationCategory,
    /// Rendered title.
    pub title: String,
    /// Rendered message.
    pub message: String,
    /// Priority level.
    pub priority: NotificationPriority,
    /// Whether recipients must act.
    pub action_required: bool,
}

/// Inputs every rule sees.
#[derive(Debug, Clone, Copy)]
pub struct PlanInput<'a> {
    /// The triggering event.
    pub event: &'a WorkflowEvent,
    /// The request at event time.
    pub request: &'a RequestSnapshot,
    /// The user who caused the event.
    pub actor: &'a Actor,
    /// Display name of the request's owner.
    pub requester_name: &'a str,
}

struct Template {
    category: NotificationCategory,
    title: String,
    message: String,
    priority: NotificationPriority,
    action_required: bool,
}

struct Rule {
    event: EventKind,
    audience: fn(&PlanInput<'_>) -> Option<Audience>,
    render: fn(&PlanInput<'_>) -> Template,
}

const RULES: &[Rule] = &[
    Rule {
        event: EventKind::Created,
        audience: always_requester,
        render: created_confirmation,
    },
    Rule {
        event: EventKind::Created,
        audience: focal_person_division_chief,
        render: created_chief_review,
    },
    Rule {
        event: EventKind::Created,
        audience: created_admins,
        render: created_admin_alert,
    },
    Rule {
        event: EventKind::Approved,
        audience: requester_unless_final,
        render: approved_notice,
    },
    Rule {
        event: EventKind::Approved,
        audience: evaluator_chief_admins,
        render: approved_final_review,
    },
    Rule {
        event: EventKind::Approved,
        audience: requester_if_final,
        render: approved_final_notice,
    },
    Rule {
        event: EventKind::Rejected,
        audience: always_requester,
        render: rejected_notice,
    },
    Rule {
        event: EventKind::ReadyForPickup,
        audience: always_requester,
        render: pickup_notice,
    },
    Rule {
        event: EventKind::Completed,
        audience: always_requester,
        render: completed_notice,
    },
    Rule {
        event: EventKind::StatusChanged,
        audience: always_requester,
        render: status_notice,
    },
];

/// Evaluate the decision table for one event.
///
/// Exactly one returned notice is addressed to [`Audience::Requester`].
pub fn plan(input: &PlanInput<'_>) -> Vec<PlannedNotice> {
    let kind = input.event.kind();
    RULES
        .iter()
        .filter(|rule| rule.event == kind)
        .filter_map(|rule| {
            let audience = (rule.audience)(input)?;
            let t = (rule.render)(input);
            Some(PlannedNotice {
                audience,
                category: t.category,
                title: t.title,
                message: t.message,
                priority: t.priority,
                action_required: t.action_required,
            })
        })
        .collect()
}

// Audience selectors.

fn always_requester(_: &PlanInput<'_>) -> Option<Audience> {
    Some(Audience::Requester)
}

fn focal_person_division_chief(input: &PlanInput<'_>) -> Option<Audience> {
    if input.actor.has_role(ActorRole::FocalPerson) {
        input.actor.division_id.map(Audience::DivisionChief)
    } else {
        None
    }
}

fn created_admins(input: &PlanInput<'_>) -> Option<Audience> {
    (input.actor.has_role(ActorRole::DivisionChief) || input.request.is_urgent)
        .then_some(Audience::Admins)
}

fn is_final_approval(input: &PlanInput<'_>) -> bool {
    matches!(
        input.event,
        WorkflowEvent::Approved {
            approval_type: ApprovalType::Admin
        }
    ) && input.actor.has_role(ActorRole::Admin)
}

fn requester_unless_final(input: &PlanInput<'_>) -> Option<Audience> {
    (!is_final_approval(input)).then_some(Audience::Requester)
}

fn requester_if_final(input: &PlanInput<'_>) -> Option<Audience> {
    is_final_approval(input).then_some(Audience::Requester)
}

fn evaluator_chief_admins(input: &PlanInput<'_>) -> Option<Audience> {
    let evaluator = matches!(
        input.event,
        WorkflowEvent::Approved {
            approval_type: ApprovalType::Evaluator
        }
    );
    (evaluator && input.actor.has_role(ActorRole::DivisionChief)).then_some(Audience::Admins)
}

// Renderers.

fn created_confirmation(input: &PlanInput<'_>) -> Template {
    Template {
        category: NotificationCategory::RequestCreated,
        title: "Request Submitted".to_string(),
        message: format!(
            "Your request {} has been submitted successfully and is awaiting review.",
            input.request.display_ref()
        ),
        priority: NotificationPriority::Low,
        action_required: false,
    }
}

fn created_chief_review(input: &PlanInput<'_>) -> Template {
    let urgent = input.request.is_urgent;
    let (category, title, kind) = if urgent {
        (
            NotificationCategory::UrgentRequest,
            "Urgent Request for Review",
            "an URGENT request",
        )
    } else {
        (
            NotificationCategory::RequestCreated,
            "New Request for Review",
            "a new request",
        )
    };
    Template {
        category,
        title: title.to_string(),
        message: format!(
            "{} submitted {} ({}) that requires your review.",
            input.requester_name,
            kind,
            input.request.display_ref()
        ),
        priority: NotificationPriority::for_urgency(urgent),
        action_required: true,
    }
}

fn created_admin_alert(input: &PlanInput<'_>) -> Template {
    let urgent = input.request.is_urgent;
    if urgent {
        Template {
            category: NotificationCategory::UrgentRequest,
            title: "Urgent Request Alert".to_string(),
            message: format!(
                "An urgent request ({}) from {} requires immediate attention.",
                input.request.display_ref(),
                input.requester_name
            ),
            priority: NotificationPriority::Urgent,
            action_required: true,
        }
    } else {
        Template {
            category: NotificationCategory::RequestCreated,
            title: "New Request for Admin Review".to_string(),
            message: format!(
                "{} submitted request {} that requires admin review.",
                input.requester_name,
                input.request.display_ref()
            ),
            priority: NotificationPriority::Medium,
            action_required: true,
        }
    }
}

fn approved_notice(input: &PlanInput<'_>) -> Template {
    let message = match input.event {
        WorkflowEvent::Approved {
            approval_type: ApprovalType::Evaluator,
        } => format!(
            "Your request {} has been approved by {} and forwarded for final review.",
            input.request.display_ref(),
            input.actor.display_name
        ),
        _ => format!(
            "Your request {} has been approved by {}.",
            input.request.display_ref(),
            input.actor.display_name
        ),
    };
    Template {
        category: NotificationCategory::RequestApproved,
        title: "Request Approved".to_string(),
        message,
        priority: NotificationPriority::Low,
        action_required: false,
    }
}

fn approved_final_review(input: &PlanInput<'_>) -> Template {
    Template {
        category: NotificationCategory::RequestUnderReview,
        title: "Request Ready for Final Review".to_string(),
        message: format!(
            "Request {} from {} was approved by {} (Division Chief) and is ready for final review.",
            input.request.display_ref(),
            input.requester_name,
            input.actor.display_name
        ),
        priority: NotificationPriority::for_urgency(input.request.is_urgent),
        action_required: true,
    }
}

fn approved_final_notice(input: &PlanInput<'_>) -> Template {
    Template {
        category: NotificationCategory::RequestApproved,
        title: "Request Fully Approved".to_string(),
        message: format!(
            "Your request {} has received final approval from {}.",
            input.request.display_ref(),
            input.actor.display_name
        ),
        priority: NotificationPriority::Low,
        action_required: false,
    }
}

fn rejected_notice(input: &PlanInput<'_>) -> Template {
    let title = match input.actor.role.title_label() {
        Some(label) => format!("Request Rejected by {label}"),
        None => "Request Rejected".to_string(),
    };
    let mut message = format!(
        "Your request {} was rejected by {}.",
        input.request.display_ref(),
        input.actor.display_name
    );
    if let WorkflowEvent::Rejected {
        reason: Some(reason),
        ..
    } = input.event
    {
        let reason = reason.trim();
        if !reason.is_empty() {
            message.push_str(" Reason: ");
            message.push_str(reason);
        }
    }
    Template {
        category: NotificationCategory::RequestRejected,
        title,
        message,
        priority: NotificationPriority::Medium,
        action_required: false,
    }
}

fn pickup_notice(input: &PlanInput<'_>) -> Template {
    Template {
        category: NotificationCategory::RequestReadyPickup,
        title: "Request Ready for Pickup".to_string(),
        message: format!(
            "Your request {} is ready for pickup.",
            input.request.display_ref()
        ),
        priority: NotificationPriority::Medium,
        action_required: true,
    }
}

fn completed_notice(input: &PlanInput<'_>) -> Template {
    Template {
        category: NotificationCategory::RequestCompleted,
        title: "Request Completed".to_string(),
        message: format!(
            "Your request {} has been completed.",
            input.request.display_ref()
        ),
        priority: NotificationPriority::Low,
        action_required: false,
    }
}

fn status_notice(input: &PlanInput<'_>) -> Template {
    let phrase = match input.event {
        WorkflowEvent::StatusChanged { new_status, .. } => new_status.phrase(),
        _ => input.request.status.phrase(),
    };
    Template {
        category: NotificationCategory::General,
        title: "Request Status Updated".to_string(),
        message: format!("Your request {} {}.", input.request.display_ref(), phrase),
        priority: NotificationPriority::Low,
        action_required: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ofwtrack_core::types::{RequestId, UserId};
    use ofwtrack_entity::request::RequestStatus;

    fn request(is_urgent: bool) -> RequestSnapshot {
        RequestSnapshot::new(
            RequestId::new(),
            UserId::new(),
            Some(DivisionId::new()),
            is_urgent,
            RequestStatus::Pending,
        )
        .with_reference("OFW-0042")
    }

    fn actor(role: ActorRole, division: Option<DivisionId>) -> Actor {
        Actor::new(UserId::new(), "J. Dela Cruz", role, division)
    }

    fn run(event: WorkflowEvent, req: &RequestSnapshot, actor: &Actor) -> Vec<PlannedNotice> {
        plan(&PlanInput {
            event: &event,
            request: req,
            actor,
            requester_name: "R. Bautista",
        })
    }

    fn all_events() -> Vec<WorkflowEvent> {
        vec![
            WorkflowEvent::Created,
            WorkflowEvent::Approved {
                approval_type: ApprovalType::Evaluator,
            },
            WorkflowEvent::Approved {
                approval_type: ApprovalType::Admin,
            },
            WorkflowEvent::Rejected {
                reason: None,
                rejection_type: None,
            },
            WorkflowEvent::ReadyForPickup,
            WorkflowEvent::Completed,
            WorkflowEvent::StatusChanged {
                old_status: RequestStatus::Pending,
                new_status: RequestStatus::UnderReview,
            },
        ]
    }

    #[test]
    fn test_requester_addressed_exactly_once() {
        let roles = [
            ActorRole::Requester,
            ActorRole::FocalPerson,
            ActorRole::DivisionChief,
            ActorRole::Admin,
        ];
        for urgent in [false, true] {
            let req = request(urgent);
            for role in roles {
                let a = actor(role, req.division_id);
                for event in all_events() {
                    let notices = run(event.clone(), &req, &a);
                    let to_requester = notices
                        .iter()
                        .filter(|n| n.audience == Audience::Requester)
                        .count();
                    assert_eq!(to_requester, 1, "{event:?} by {role} urgent={urgent}");
                    assert_eq!(notices[0].audience, Audience::Requester);
                }
            }
        }
    }

    #[test]
    fn test_created_by_focal_person_targets_chief() {
        let req = request(false);
        let a = actor(ActorRole::FocalPerson, req.division_id);
        let notices = run(WorkflowEvent::Created, &req, &a);

        assert_eq!(notices.len(), 2);
        assert_eq!(notices[0].priority, NotificationPriority::Low);
        assert!(!notices[0].action_required);
        assert_eq!(
            notices[1].audience,
            Audience::DivisionChief(req.division_id.unwrap())
        );
        assert_eq!(notices[1].priority, NotificationPriority::Medium);
        assert!(notices[1].action_required);
        assert!(notices[1].message.contains("R. Bautista"));
    }

    #[test]
    fn test_created_by_focal_person_without_division() {
        let req = request(false);
        let a = actor(ActorRole::FocalPerson, None);
        let notices = run(WorkflowEvent::Created, &req, &a);
        assert_eq!(notices.len(), 1);
    }

    #[test]
    fn test_urgent_focal_person_escalates_to_chief_and_admins() {
        let req = request(true);
        let a = actor(ActorRole::FocalPerson, req.division_id);
        let notices = run(WorkflowEvent::Created, &req, &a);

        let audiences: Vec<_> = notices.iter().map(|n| n.audience).collect();
        assert_eq!(
            audiences,
            vec![
                Audience::Requester,
                Audience::DivisionChief(req.division_id.unwrap()),
                Audience::Admins
            ]
        );
        assert_eq!(notices[1].category, NotificationCategory::UrgentRequest);
        assert_eq!(notices[2].title, "Urgent Request Alert");
        assert_eq!(notices[2].priority, NotificationPriority::Urgent);
    }

    #[test]
    fn test_created_by_division_chief_non_urgent() {
        let req = request(false);
        let a = actor(ActorRole::DivisionChief, req.division_id);
        let notices = run(WorkflowEvent::Created, &req, &a);

        assert_eq!(notices.len(), 2);
        assert_eq!(notices[1].audience, Audience::Admins);
        assert_eq!(notices[1].priority, NotificationPriority::Medium);
        assert_eq!(notices[1].title, "New Request for Admin Review");
    }

    #[test]
    fn test_evaluator_approval_by_chief_forwards_to_admins() {
        let req = request(false);
        let a = actor(ActorRole::DivisionChief, req.division_id);
        let notices = run(
            WorkflowEvent::Approved {
                approval_type: ApprovalType::Evaluator,
            },
            &req,
            &a,
        );

        assert_eq!(notices.len(), 2);
        assert_eq!(notices[0].category, NotificationCategory::RequestApproved);
        assert_eq!(notices[1].category, NotificationCategory::RequestUnderReview);
        assert!(notices[1].action_required);
    }

    #[test]
    fn test_evaluator_approval_by_admin_does_not_forward() {
        let req = request(false);
        let a = actor(ActorRole::Admin, None);
        let notices = run(
            WorkflowEvent::Approved {
                approval_type: ApprovalType::Evaluator,
            },
            &req,
            &a,
        );
        assert_eq!(notices.len(), 1);
    }

    #[test]
    fn test_final_admin_approval_is_its_own_notice() {
        let req = request(false);
        let a = actor(ActorRole::Admin, None);
        let notices = run(
            WorkflowEvent::Approved {
                approval_type: ApprovalType::Admin,
            },
            &req,
            &a,
        );

        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].title, "Request Fully Approved");
        assert!(notices[0].message.contains("final approval"));
    }

    #[test]
    fn test_rejection_title_and_reason() {
        let req = request(false);
        let a = Actor::new(UserId::new(), "A. Cruz", ActorRole::Admin, None);
        let notices = run(
            WorkflowEvent::Rejected {
                reason: Some("Missing documents".to_string()),
                rejection_type: None,
            },
            &req,
            &a,
        );

        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].title, "Request Rejected by Admin");
        assert!(notices[0].message.contains("A. Cruz"));
        assert!(notices[0].message.ends_with("Reason: Missing documents"));
    }

    #[test]
    fn test_rejection_without_role_label_or_reason() {
        let req = request(false);
        let a = actor(ActorRole::FocalPerson, None);
        let notices = run(
            WorkflowEvent::Rejected {
                reason: Some("   ".to_string()),
                rejection_type: None,
            },
            &req,
            &a,
        );
        assert_eq!(notices[0].title, "Request Rejected");
        assert!(!notices[0].message.contains("Reason"));
    }

    #[test]
    fn test_pickup_requires_action() {
        let req = request(false);
        let a = actor(ActorRole::Admin, None);
        let notices = run(WorkflowEvent::ReadyForPickup, &req, &a);
        assert_eq!(notices[0].priority, NotificationPriority::Medium);
        assert!(notices[0].action_required);
    }

    #[test]
    fn test_status_phrase_and_unknown_fallback() {
        let req = request(false);
        let a = actor(ActorRole::Admin, None);

        let known = run(
            WorkflowEvent::StatusChanged {
                old_status: RequestStatus::Pending,
                new_status: RequestStatus::UnderReview,
            },
            &req,
            &a,
        );
        assert_eq!(known[0].message, "Your request OFW-0042 is now under review.");
        assert_eq!(known[0].category, NotificationCategory::General);

        let unknown = run(
            WorkflowEvent::StatusChanged {
                old_status: RequestStatus::Pending,
                new_status: RequestStatus::from("on_hold"),
            },
            &req,
            &a,
        );
        assert_eq!(unknown[0].message, "Your request OFW-0042 has been updated.");
    }
}
