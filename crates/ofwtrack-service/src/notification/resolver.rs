//! Expansion of planned audiences into concrete recipients.

use std::sync::Arc;

use thiserror::Error;
use tracing::debug;

use ofwtrack_core::error::AppError;
use ofwtrack_core::types::UserId;
use ofwtrack_database::DirectoryLookup;
use ofwtrack_entity::actor::{Actor, ActorRole};
use ofwtrack_entity::notification::{NotificationCategory, NotificationPriority};
use ofwtrack_entity::request::RequestSnapshot;

use super::event::WorkflowEvent;
use super::policy::{self, Audience, PlanInput, PlannedNotice};

/// Why an event could not be resolved into recipients.
#[derive(Debug, Error)]
pub enum ResolutionError {
    /// The request's owner is not in the directory.
    #[error("requester {0} not found in directory")]
    RequesterNotFound(UserId),
    /// A directory lookup failed.
    #[error("directory lookup failed: {0}")]
    Directory(#[source] AppError),
}

/// One recipient and the text they should receive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionEntry {
    /// The user to notify.
    pub recipient_id: UserId,
    /// Rendered title.
    pub title: String,
    /// Rendered message.
    pub message: String,
    /// Notification category.
    pub category: NotificationCategory,
    /// Priority level.
    pub priority: NotificationPriority,
    /// Whether the recipient must act.
    pub action_required: bool,
}

/// Result of resolving one event.
#[derive(Debug, Clone)]
pub struct Resolution {
    /// The request's owner, as read from the directory.
    pub requester: Actor,
    /// Every recipient. Exactly one entry targets the requester and it
    /// always comes first.
    pub entries: Vec<ResolutionEntry>,
}

impl Resolution {
    /// The entry addressed to the requester.
    pub fn requester_entry(&self) -> Option<&ResolutionEntry> {
        self.entries
            .iter()
            .find(|e| e.recipient_id == self.requester.id)
    }

    /// Entries addressed to anyone other than the requester, in order.
    pub fn others(&self) -> impl Iterator<Item = &ResolutionEntry> {
        self.entries
            .iter()
            .filter(move |e| e.recipient_id != self.requester.id)
    }
}

/// Decides who is told about a workflow event.
#[derive(Debug, Clone)]
pub struct RecipientResolver {
    /// User directory.
    directory: Arc<dyn DirectoryLookup>,
}

impl RecipientResolver {
    /// Creates a new resolver over the given directory.
    pub fn new(directory: Arc<dyn DirectoryLookup>) -> Self {
        Self { directory }
    }

    /// Look up the request's owner, reusing `actor` when they are the same user.
    pub async fn requester_for(
        &self,
        request: &RequestSnapshot,
        actor: &Actor,
    ) -> Result<Actor, ResolutionError> {
        if actor.id == request.requester_id {
            return Ok(actor.clone());
        }
        self.directory
            .find_by_id(request.requester_id)
            .await
            .map_err(ResolutionError::Directory)?
            .ok_or(ResolutionError::RequesterNotFound(request.requester_id))
    }

    /// Resolve an event into the full recipient list.
    ///
    /// A missing division chief or an empty admin list simply contributes
    /// no entries. Chiefs and admins who are themselves the requester are
    /// skipped so the requester is never notified twice.
    pub async fn resolve(
        &self,
        event: &WorkflowEvent,
        request: &RequestSnapshot,
        actor: &Actor,
    ) -> Result<Resolution, ResolutionError> {
        let requester = self.requester_for(request, actor).await?;

        let planned = policy::plan(&PlanInput {
            event,
            request,
            actor,
            requester_name: &requester.display_name,
        });

        let mut entries = Vec::with_capacity(planned.len());
        for notice in planned {
            for recipient_id in self.expand(notice.audience, &requester).await? {
                entries.push(entry_for(recipient_id, &notice));
            }
        }

        debug!(
            event = %event.kind(),
            request_id = %request.id,
            recipients = entries.len(),
            "Resolved notification recipients"
        );

        Ok(Resolution { requester, entries })
    }

    async fn expand(
        &self,
        audience: Audience,
        requester: &Actor,
    ) -> Result<Vec<UserId>, ResolutionError> {
        match audience {
            Audience::Requester => Ok(vec![requester.id]),
            Audience::DivisionChief(division_id) => {
                let chief = self
                    .directory
                    .find_by_role_and_division(ActorRole::DivisionChief, division_id)
                    .await
                    .map_err(ResolutionError::Directory)?;
                Ok(chief
                    .map(|c| c.id)
                    .filter(|id| *id != requester.id)
                    .into_iter()
                    .collect())
            }
            Audience::Admins => {
                let admins = self
                    .directory
                    .find_all_by_role(ActorRole::Admin)
                    .await
                    .map_err(ResolutionError::Directory)?;
                Ok(admins
                    .into_iter()
                    .map(|a| a.id)
                    .filter(|id| *id != requester.id)
                    .collect())
            }
        }
    }
}

fn entry_for(recipient_id: UserId, notice: &PlannedNotice) -> ResolutionEntry {
    ResolutionEntry {
        recipient_id,
        title: notice.title.clone(),
        message: notice.message.clone(),
        category: notice.category,
        priority: notice.priority,
        action_required: notice.action_required,
    }
}
