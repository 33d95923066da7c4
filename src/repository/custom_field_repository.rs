use sqlx::PgPool;
use uuid::Uuid;

use crate::error::AppResult;
use crate::models::{CardFieldValue, CustomField};

use super::list_repository::POSITION_STEP;

#[derive(Clone)]
pub struct CustomFieldRepository {
    pool: PgPool,
}

impl CustomFieldRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        board_id: Uuid,
        name: &str,
        field_type: &str,
        options: Option<serde_json::Value>,
    ) -> AppResult<CustomField> {
        let field = sqlx::query_as::<_, CustomField>(
            r#"
            INSERT INTO custom_fields (board_id, name, field_type, options, position)
            VALUES ($1, $2, $3, $4, (
                SELECT COALESCE(MAX(position), 0) + $5 FROM custom_fields WHERE board_id = $1
            ))
            RETURNING *
            "#,
        )
        .bind(board_id)
        .bind(name)
        .bind(field_type)
        .bind(options)
        .bind(POSITION_STEP)
        .fetch_one(&self.pool)
        .await?;

        Ok(field)
    }

    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<CustomField>> {
        let field = sqlx::query_as::<_, CustomField>("SELECT * FROM custom_fields WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(field)
    }

    pub async fn list_by_board(&self, board_id: Uuid) -> AppResult<Vec<CustomField>> {
        let fields = sqlx::query_as::<_, CustomField>(
            "SELECT * FROM custom_fields WHERE board_id = $1 ORDER BY position ASC",
        )
        .bind(board_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(fields)
    }

    pub async fn update(
        &self,
        id: Uuid,
        name: Option<&str>,
        options: Option<serde_json::Value>,
        position: Option<f64>,
    ) -> AppResult<CustomField> {
        let field = sqlx::query_as::<_, CustomField>(
            r#"
            UPDATE custom_fields
            SET name = COALESCE($2, name),
                options = COALESCE($3, options),
                position = COALESCE($4, position),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(options)
        .bind(position)
        .fetch_one(&self.pool)
        .await?;

        Ok(field)
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        sqlx::query("DELETE FROM custom_fields WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    pub async fn upsert_value(
        &self,
        card_id: Uuid,
        field_id: Uuid,
        value: &str,
    ) -> AppResult<CardFieldValue> {
        let row = sqlx::query_as::<_, CardFieldValue>(
            r#"
            INSERT INTO card_custom_field_values (card_id, field_id, value)
            VALUES ($1, $2, $3)
            ON CONFLICT (card_id, field_id)
            DO UPDATE SET value = EXCLUDED.value, updated_at = NOW()
            RETURNING *
            "#,
        )
        .bind(card_id)
        .bind(field_id)
        .bind(value)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn clear_value(&self, card_id: Uuid, field_id: Uuid) -> AppResult<bool> {
        let result = sqlx::query(
            "DELETE FROM card_custom_field_values WHERE card_id = $1 AND field_id = $2",
        )
        .bind(card_id)
        .bind(field_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn values_for_card(&self, card_id: Uuid) -> AppResult<Vec<CardFieldValue>> {
        let values = sqlx::query_as::<_, CardFieldValue>(
            r#"
            SELECT v.* FROM card_custom_field_values v
            JOIN custom_fields f ON f.id = v.field_id
            WHERE v.card_id = $1
            ORDER BY f.position ASC
            "#,
        )
        .bind(card_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(values)
    }
}
