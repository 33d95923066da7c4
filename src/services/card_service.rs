use std::sync::Arc;

use tracing::warn;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{
    Card, CardFieldValue, CreateCardRequest, CustomField, Label, List, MoveCardRequest,
    TriggerEvent, UpdateCardRequest,
};
use crate::repository::{CardRepository, CustomFieldRepository, LabelRepository, ListRepository};
use crate::utils::is_valid_field_value;

use super::AutomationService;

pub struct CardService {
    card_repo: Arc<CardRepository>,
    list_repo: Arc<ListRepository>,
    label_repo: Arc<LabelRepository>,
    field_repo: Arc<CustomFieldRepository>,
    automation: Arc<AutomationService>,
}

impl CardService {
    pub fn new(
        card_repo: Arc<CardRepository>,
        list_repo: Arc<ListRepository>,
        label_repo: Arc<LabelRepository>,
        field_repo: Arc<CustomFieldRepository>,
        automation: Arc<AutomationService>,
    ) -> Self {
        Self {
            card_repo,
            list_repo,
            label_repo,
            field_repo,
            automation,
        }
    }

    pub async fn create_card(
        &self,
        list: &List,
        req: CreateCardRequest,
        created_by: Uuid,
    ) -> AppResult<Card> {
        let card = self
            .card_repo
            .create(
                list.board_id,
                list.id,
                &req.title,
                req.description.as_deref(),
                req.due_date,
                req.cover_color.as_deref(),
                created_by,
            )
            .await?;

        self.emit(TriggerEvent::card_created(card.board_id, card.id, card.list_id))
            .await;
        if card.due_date.is_some() {
            self.emit(TriggerEvent::due_date_set(card.board_id, card.id))
                .await;
        }

        Ok(card)
    }

    pub async fn update_card(&self, card: &Card, req: UpdateCardRequest) -> AppResult<Card> {
        let updated = self
            .card_repo
            .update(
                card.id,
                req.title.as_deref(),
                req.description.as_deref(),
                req.due_date,
                req.cover_color.as_deref(),
                req.is_completed,
                req.is_archived,
            )
            .await?;

        if updated.is_completed && !card.is_completed {
            self.emit(TriggerEvent::card_completed(updated.board_id, updated.id))
                .await;
        }
        if updated.due_date.is_some() && updated.due_date != card.due_date {
            self.emit(TriggerEvent::due_date_set(updated.board_id, updated.id))
                .await;
        }

        Ok(updated)
    }

    /// Move a card within its board, to another list and/or position.
    pub async fn move_card(&self, card: &Card, req: MoveCardRequest) -> AppResult<Card> {
        let target_list_id = req.list_id.unwrap_or(card.list_id);

        if target_list_id != card.list_id {
            let list = self
                .list_repo
                .find_by_id(target_list_id)
                .await?
                .ok_or_else(|| AppError::NotFound("List not found".to_string()))?;
            if list.board_id != card.board_id {
                return Err(AppError::BadRequest(
                    "Cannot move card to another board".to_string(),
                ));
            }
        }

        let position = match req.position {
            Some(p) => p,
            None => self.card_repo.next_position_in_list(target_list_id).await?,
        };

        let moved = self
            .card_repo
            .move_to_list(card.id, target_list_id, position)
            .await?;

        if moved.list_id != card.list_id {
            self.emit(TriggerEvent::card_moved(moved.board_id, moved.id, moved.list_id))
                .await;
        }

        Ok(moved)
    }

    pub async fn attach_label(&self, card: &Card, label: &Label) -> AppResult<()> {
        if label.board_id != card.board_id {
            return Err(AppError::BadRequest(
                "Label belongs to another board".to_string(),
            ));
        }
        if self.label_repo.is_attached(card.id, label.id).await? {
            return Err(AppError::Conflict("Label already attached".to_string()));
        }

        self.label_repo.attach(card.id, label.id).await?;

        self.emit(TriggerEvent::label_added(card.board_id, card.id, label.id))
            .await;

        Ok(())
    }

    pub async fn detach_label(&self, card: &Card, label: &Label) -> AppResult<()> {
        let removed = self.label_repo.detach(card.id, label.id).await?;
        if !removed {
            return Err(AppError::NotFound("Label not attached".to_string()));
        }

        Ok(())
    }

    pub async fn set_field_value(
        &self,
        card: &Card,
        field: &CustomField,
        value: &str,
    ) -> AppResult<CardFieldValue> {
        if field.board_id != card.board_id {
            return Err(AppError::BadRequest(
                "Field belongs to another board".to_string(),
            ));
        }
        if !is_valid_field_value(&field.field_type, value, &field.option_values()) {
            return Err(AppError::ValidationError(format!(
                "Value does not conform to {} field",
                field.field_type
            )));
        }

        self.field_repo.upsert_value(card.id, field.id, value).await
    }

    pub async fn clear_field_value(&self, card: &Card, field: &CustomField) -> AppResult<()> {
        let removed = self.field_repo.clear_value(card.id, field.id).await?;
        if !removed {
            return Err(AppError::NotFound(
                "No value set for this field".to_string(),
            ));
        }

        Ok(())
    }

    /// Card with its labels and custom field values embedded.
    pub async fn card_detail(&self, mut card: Card) -> AppResult<Card> {
        card.labels = Some(self.label_repo.labels_for_card(card.id).await?);
        card.custom_field_values = Some(self.field_repo.values_for_card(card.id).await?);

        Ok(card)
    }

    // Rule processing failures must not undo the card mutation itself.
    async fn emit(&self, event: TriggerEvent) {
        if let Err(e) = self.automation.dispatch(&event).await {
            warn!("Automation dispatch failed for card {}: {}", event.card_id, e);
        }
    }
}
