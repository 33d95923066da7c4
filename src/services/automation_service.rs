use std::sync::Arc;

use chrono::{Duration, Utc};
use tracing::warn;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{
    ActionConfig, ActionKind, AutomationRule, TriggerEvent, TriggerKind,
};
use crate::repository::{AutomationRepository, CardRepository, LabelRepository, ListRepository};

/// Decide whether an enabled rule fires for an event. Present config fields
/// must equal the event's values; absent fields match any event of the kind.
pub fn rule_matches(rule: &AutomationRule, event: &TriggerEvent) -> bool {
    if !rule.is_enabled {
        return false;
    }
    if rule.trigger_kind != event.kind.to_string() {
        return false;
    }

    let config = rule.trigger_config();
    match event.kind {
        TriggerKind::CardCreated => config.list_id.map_or(true, |id| event.list_id == Some(id)),
        TriggerKind::CardMoved => config
            .to_list_id
            .map_or(true, |id| event.list_id == Some(id)),
        TriggerKind::LabelAdded => config.label_id.map_or(true, |id| event.label_id == Some(id)),
        TriggerKind::CardCompleted | TriggerKind::DueDateSet => true,
    }
}

/// Reject rule configs whose action is missing its required parameter.
pub fn validate_action_config(kind: ActionKind, config: &ActionConfig) -> AppResult<()> {
    let missing = match kind {
        ActionKind::MoveToList => config.list_id.is_none().then_some("list_id"),
        ActionKind::AddLabel | ActionKind::RemoveLabel => {
            config.label_id.is_none().then_some("label_id")
        }
        ActionKind::SetDueDate => config.days_from_now.is_none().then_some("days_from_now"),
        ActionKind::MarkCompleted | ActionKind::ArchiveCard => None,
    };

    match missing {
        Some(field) => Err(AppError::ValidationError(format!(
            "Action {} requires {}",
            kind, field
        ))),
        None => Ok(()),
    }
}

pub struct AutomationService {
    automation_repo: Arc<AutomationRepository>,
    card_repo: Arc<CardRepository>,
    list_repo: Arc<ListRepository>,
    label_repo: Arc<LabelRepository>,
}

impl AutomationService {
    pub fn new(
        automation_repo: Arc<AutomationRepository>,
        card_repo: Arc<CardRepository>,
        list_repo: Arc<ListRepository>,
        label_repo: Arc<LabelRepository>,
    ) -> Self {
        Self {
            automation_repo,
            card_repo,
            list_repo,
            label_repo,
        }
    }

    /// Fire every matching enabled rule of the event's board, in creation
    /// order. Single pass: actions mutate cards directly and never produce
    /// events of their own, so rules cannot cascade.
    pub async fn dispatch(&self, event: &TriggerEvent) -> AppResult<()> {
        let rules = self
            .automation_repo
            .list_enabled_by_board(event.board_id)
            .await?;

        for rule in rules.iter().filter(|r| rule_matches(r, event)) {
            if self.execute_action(rule, event).await? {
                self.automation_repo.record_run(rule.id).await?;
            }
        }

        Ok(())
    }

    /// Returns false when the action was skipped because its target list or
    /// label no longer exists or belongs to another board.
    async fn execute_action(&self, rule: &AutomationRule, event: &TriggerEvent) -> AppResult<bool> {
        let config = rule.action_config();

        match rule.action_kind.as_str() {
            "move_to_list" => {
                let Some(list_id) = config.list_id else {
                    warn!("Rule {} has no list_id, skipping", rule.id);
                    return Ok(false);
                };
                match self.resolve_list(list_id, event.board_id).await? {
                    Some(list_id) => {
                        let position = self.card_repo.next_position_in_list(list_id).await?;
                        self.card_repo
                            .move_to_list(event.card_id, list_id, position)
                            .await?;
                    }
                    None => {
                        warn!("Rule {} targets unavailable list {}, skipping", rule.id, list_id);
                        return Ok(false);
                    }
                }
            }
            "add_label" | "remove_label" => {
                let Some(label_id) = config.label_id else {
                    warn!("Rule {} has no label_id, skipping", rule.id);
                    return Ok(false);
                };
                if self.resolve_label(label_id, event.board_id).await?.is_none() {
                    warn!("Rule {} targets unavailable label {}, skipping", rule.id, label_id);
                    return Ok(false);
                }
                if rule.action_kind == "add_label" {
                    self.label_repo.attach(event.card_id, label_id).await?;
                } else {
                    self.label_repo.detach(event.card_id, label_id).await?;
                }
            }
            "mark_completed" => {
                self.card_repo.set_completed(event.card_id, true).await?;
            }
            "archive_card" => {
                self.card_repo.set_archived(event.card_id, true).await?;
            }
            "set_due_date" => {
                let Some(days) = config.days_from_now else {
                    warn!("Rule {} has no days_from_now, skipping", rule.id);
                    return Ok(false);
                };
                let due_date = Utc::now() + Duration::days(days);
                self.card_repo.set_due_date(event.card_id, due_date).await?;
            }
            other => {
                warn!("Rule {} has unknown action kind {}, skipping", rule.id, other);
                return Ok(false);
            }
        }

        Ok(true)
    }

    async fn resolve_list(&self, list_id: Uuid, board_id: Uuid) -> AppResult<Option<Uuid>> {
        let list = self.list_repo.find_by_id(list_id).await?;
        Ok(list.filter(|l| l.board_id == board_id).map(|l| l.id))
    }

    async fn resolve_label(&self, label_id: Uuid, board_id: Uuid) -> AppResult<Option<Uuid>> {
        let label = self.label_repo.find_by_id(label_id).await?;
        Ok(label.filter(|l| l.board_id == board_id).map(|l| l.id))
    }
}
