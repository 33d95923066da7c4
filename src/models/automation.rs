use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub enum TriggerKind {
    #[serde(rename = "card_created")]
    CardCreated,
    #[serde(rename = "card_moved")]
    CardMoved,
    #[serde(rename = "card_completed")]
    CardCompleted,
    #[serde(rename = "label_added")]
    LabelAdded,
    #[serde(rename = "due_date_set")]
    DueDateSet,
}

impl std::fmt::Display for TriggerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TriggerKind::CardCreated => write!(f, "card_created"),
            TriggerKind::CardMoved => write!(f, "card_moved"),
            TriggerKind::CardCompleted => write!(f, "card_completed"),
            TriggerKind::LabelAdded => write!(f, "label_added"),
            TriggerKind::DueDateSet => write!(f, "due_date_set"),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub enum ActionKind {
    #[serde(rename = "move_to_list")]
    MoveToList,
    #[serde(rename = "add_label")]
    AddLabel,
    #[serde(rename = "remove_label")]
    RemoveLabel,
    #[serde(rename = "mark_completed")]
    MarkCompleted,
    #[serde(rename = "archive_card")]
    ArchiveCard,
    #[serde(rename = "set_due_date")]
    SetDueDate,
}

impl std::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ActionKind::MoveToList => write!(f, "move_to_list"),
            ActionKind::AddLabel => write!(f, "add_label"),
            ActionKind::RemoveLabel => write!(f, "remove_label"),
            ActionKind::MarkCompleted => write!(f, "mark_completed"),
            ActionKind::ArchiveCard => write!(f, "archive_card"),
            ActionKind::SetDueDate => write!(f, "set_due_date"),
        }
    }
}

impl ActionKind {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "move_to_list" => Some(ActionKind::MoveToList),
            "add_label" => Some(ActionKind::AddLabel),
            "remove_label" => Some(ActionKind::RemoveLabel),
            "mark_completed" => Some(ActionKind::MarkCompleted),
            "archive_card" => Some(ActionKind::ArchiveCard),
            "set_due_date" => Some(ActionKind::SetDueDate),
            _ => None,
        }
    }
}

/// Trigger narrowing stored as JSONB. Absent fields match any event of the
/// rule's kind; present fields must equal the event's value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TriggerConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub list_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_list_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label_id: Option<Uuid>,
}

/// Action parameters stored as JSONB. Which field is required depends on
/// the action kind.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActionConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub list_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days_from_now: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AutomationRule {
    pub id: Uuid,
    pub board_id: Uuid,
    pub name: String,
    pub trigger_kind: String,
    pub trigger_config: serde_json::Value,
    pub action_kind: String,
    pub action_config: serde_json::Value,
    pub is_enabled: bool,
    pub run_count: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_run_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl AutomationRule {
    pub fn trigger_config(&self) -> TriggerConfig {
        serde_json::from_value(self.trigger_config.clone()).unwrap_or_default()
    }

    pub fn action_config(&self) -> ActionConfig {
        serde_json::from_value(self.action_config.clone()).unwrap_or_default()
    }
}

/// A card mutation observed by the automation engine. Events are produced
/// once per mutation and never by rule actions themselves.
#[derive(Debug, Clone)]
pub struct TriggerEvent {
    pub board_id: Uuid,
    pub card_id: Uuid,
    pub kind: TriggerKind,
    pub list_id: Option<Uuid>,
    pub label_id: Option<Uuid>,
}

impl TriggerEvent {
    pub fn card_created(board_id: Uuid, card_id: Uuid, list_id: Uuid) -> Self {
        Self {
            board_id,
            card_id,
            kind: TriggerKind::CardCreated,
            list_id: Some(list_id),
            label_id: None,
        }
    }

    pub fn card_moved(board_id: Uuid, card_id: Uuid, to_list_id: Uuid) -> Self {
        Self {
            board_id,
            card_id,
            kind: TriggerKind::CardMoved,
            list_id: Some(to_list_id),
            label_id: None,
        }
    }

    pub fn card_completed(board_id: Uuid, card_id: Uuid) -> Self {
        Self {
            board_id,
            card_id,
            kind: TriggerKind::CardCompleted,
            list_id: None,
            label_id: None,
        }
    }

    pub fn label_added(board_id: Uuid, card_id: Uuid, label_id: Uuid) -> Self {
        Self {
            board_id,
            card_id,
            kind: TriggerKind::LabelAdded,
            list_id: None,
            label_id: Some(label_id),
        }
    }

    pub fn due_date_set(board_id: Uuid, card_id: Uuid) -> Self {
        Self {
            board_id,
            card_id,
            kind: TriggerKind::DueDateSet,
            list_id: None,
            label_id: None,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateAutomationRuleRequest {
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: String,
    pub trigger_kind: TriggerKind,
    #[serde(default)]
    pub trigger_config: Option<TriggerConfig>,
    pub action_kind: ActionKind,
    #[serde(default)]
    pub action_config: Option<ActionConfig>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateAutomationRuleRequest {
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: Option<String>,
    pub trigger_kind: Option<TriggerKind>,
    pub trigger_config: Option<TriggerConfig>,
    pub action_kind: Option<ActionKind>,
    pub action_config: Option<ActionConfig>,
    pub is_enabled: Option<bool>,
}
