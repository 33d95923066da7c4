use sqlx::PgPool;
use uuid::Uuid;

use crate::error::AppResult;
use crate::models::Label;

#[derive(Clone)]
pub struct LabelRepository {
    pool: PgPool,
}

impl LabelRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, board_id: Uuid, name: &str, color: &str) -> AppResult<Label> {
        let label = sqlx::query_as::<_, Label>(
            r#"
            INSERT INTO labels (board_id, name, color)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(board_id)
        .bind(name)
        .bind(color)
        .fetch_one(&self.pool)
        .await?;

        Ok(label)
    }

    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Label>> {
        let label = sqlx::query_as::<_, Label>("SELECT * FROM labels WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(label)
    }

    pub async fn list_by_board(&self, board_id: Uuid) -> AppResult<Vec<Label>> {
        let labels = sqlx::query_as::<_, Label>(
            "SELECT * FROM labels WHERE board_id = $1 ORDER BY created_at ASC",
        )
        .bind(board_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(labels)
    }

    pub async fn update(
        &self,
        id: Uuid,
        name: Option<&str>,
        color: Option<&str>,
    ) -> AppResult<Label> {
        let label = sqlx::query_as::<_, Label>(
            r#"
            UPDATE labels
            SET name = COALESCE($2, name),
                color = COALESCE($3, color)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(color)
        .fetch_one(&self.pool)
        .await?;

        Ok(label)
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        sqlx::query("DELETE FROM labels WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    pub async fn is_attached(&self, card_id: Uuid, label_id: Uuid) -> AppResult<bool> {
        let row: (bool,) = sqlx::query_as(
            "SELECT EXISTS (SELECT 1 FROM card_labels WHERE card_id = $1 AND label_id = $2)",
        )
        .bind(card_id)
        .bind(label_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.0)
    }

    pub async fn attach(&self, card_id: Uuid, label_id: Uuid) -> AppResult<()> {
        sqlx::query(
            "INSERT INTO card_labels (card_id, label_id) VALUES ($1, $2) ON CONFLICT DO NOTHING",
        )
        .bind(card_id)
        .bind(label_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn detach(&self, card_id: Uuid, label_id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM card_labels WHERE card_id = $1 AND label_id = $2")
            .bind(card_id)
            .bind(label_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn labels_for_card(&self, card_id: Uuid) -> AppResult<Vec<Label>> {
        let labels = sqlx::query_as::<_, Label>(
            r#"
            SELECT l.* FROM labels l
            JOIN card_labels cl ON cl.label_id = l.id
            WHERE cl.card_id = $1
            ORDER BY cl.added_at ASC
            "#,
        )
        .bind(card_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(labels)
    }
}
