use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use super::{CardFieldValue, Label};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Card {
    pub id: Uuid,
    pub board_id: Uuid,
    pub list_id: Uuid,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub position: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
    pub is_completed: bool,
    pub is_archived: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_color: Option<String>,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,

    // Relations (not from DB, populated separately)
    #[sqlx(skip)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<Label>>,
    #[sqlx(skip)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_field_values: Option<Vec<CardFieldValue>>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateCardRequest {
    #[validate(length(min = 1, max = 512, message = "Title must be 1-512 characters"))]
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
    pub cover_color: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateCardRequest {
    #[validate(length(min = 1, max = 512, message = "Title must be 1-512 characters"))]
    pub title: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
    pub cover_color: Option<String>,
    pub is_completed: Option<bool>,
    pub is_archived: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct MoveCardRequest {
    pub list_id: Option<Uuid>,
    pub position: Option<f64>,
}

/// Search filters for board-wide card queries. The count query and the
/// page query must both be driven by the same filter.
#[derive(Debug, Clone, Default)]
pub struct CardFilter {
    pub q: Option<String>,
    pub label_id: Option<Uuid>,
    pub due_before: Option<DateTime<Utc>>,
    pub is_completed: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct CardSearchQuery {
    pub q: Option<String>,
    pub label_id: Option<Uuid>,
    pub due_before: Option<DateTime<Utc>>,
    pub is_completed: Option<bool>,
    #[serde(default)]
    pub limit: i64,
    #[serde(default)]
    pub page: i64,
}

impl CardSearchQuery {
    pub fn filter(&self) -> CardFilter {
        CardFilter {
            q: self.q.clone(),
            label_id: self.label_id,
            due_before: self.due_before,
            is_completed: self.is_completed,
        }
    }
}
