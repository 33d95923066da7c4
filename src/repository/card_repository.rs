use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::AppResult;
use crate::models::{Card, CardFilter};

use super::list_repository::POSITION_STEP;

// Shared by the count and page queries so both always see the same rows.
const SEARCH_WHERE: &str = r#"
    board_id = $1
    AND ($2::text IS NULL OR title ILIKE '%' || $2 || '%')
    AND ($3::uuid IS NULL OR EXISTS (
        SELECT 1 FROM card_labels cl WHERE cl.card_id = cards.id AND cl.label_id = $3
    ))
    AND ($4::timestamptz IS NULL OR due_date < $4)
    AND ($5::boolean IS NULL OR is_completed = $5)
"#;

#[derive(Clone)]
pub struct CardRepository {
    pool: PgPool,
}

impl CardRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        board_id: Uuid,
        list_id: Uuid,
        title: &str,
        description: Option<&str>,
        due_date: Option<DateTime<Utc>>,
        cover_color: Option<&str>,
        created_by: Uuid,
    ) -> AppResult<Card> {
        let card = sqlx::query_as::<_, Card>(
            r#"
            INSERT INTO cards (board_id, list_id, title, description, due_date, cover_color, created_by, position)
            VALUES ($1, $2, $3, $4, $5, $6, $7, (
                SELECT COALESCE(MAX(position), 0) + $8 FROM cards WHERE list_id = $2
            ))
            RETURNING *
            "#,
        )
        .bind(board_id)
        .bind(list_id)
        .bind(title)
        .bind(description)
        .bind(due_date)
        .bind(cover_color)
        .bind(created_by)
        .bind(POSITION_STEP)
        .fetch_one(&self.pool)
        .await?;

        Ok(card)
    }

    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Card>> {
        let card = sqlx::query_as::<_, Card>("SELECT * FROM cards WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(card)
    }

    pub async fn count_by_list(&self, list_id: Uuid) -> AppResult<i64> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM cards WHERE list_id = $1")
            .bind(list_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0)
    }

    pub async fn list_by_list(
        &self,
        list_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> AppResult<Vec<Card>> {
        let cards = sqlx::query_as::<_, Card>(
            "SELECT * FROM cards WHERE list_id = $1 ORDER BY position ASC LIMIT $2 OFFSET $3",
        )
        .bind(list_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(cards)
    }

    pub async fn count_search(&self, board_id: Uuid, filter: &CardFilter) -> AppResult<i64> {
        let sql = format!("SELECT COUNT(*) FROM cards WHERE {}", SEARCH_WHERE);
        let count: (i64,) = sqlx::query_as(&sql)
            .bind(board_id)
            .bind(filter.q.as_deref())
            .bind(filter.label_id)
            .bind(filter.due_before)
            .bind(filter.is_completed)
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0)
    }

    pub async fn search(
        &self,
        board_id: Uuid,
        filter: &CardFilter,
        limit: i64,
        offset: i64,
    ) -> AppResult<Vec<Card>> {
        let sql = format!(
            "SELECT * FROM cards WHERE {} ORDER BY created_at DESC LIMIT $6 OFFSET $7",
            SEARCH_WHERE
        );
        let cards = sqlx::query_as::<_, Card>(&sql)
            .bind(board_id)
            .bind(filter.q.as_deref())
            .bind(filter.label_id)
            .bind(filter.due_before)
            .bind(filter.is_completed)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;

        Ok(cards)
    }

    pub async fn update(
        &self,
        id: Uuid,
        title: Option<&str>,
        description: Option<&str>,
        due_date: Option<DateTime<Utc>>,
        cover_color: Option<&str>,
        is_completed: Option<bool>,
        is_archived: Option<bool>,
    ) -> AppResult<Card> {
        let card = sqlx::query_as::<_, Card>(
            r#"
            UPDATE cards
            SET title = COALESCE($2, title),
                description = COALESCE($3, description),
                due_date = COALESCE($4, due_date),
                cover_color = COALESCE($5, cover_color),
                is_completed = COALESCE($6, is_completed),
                is_archived = COALESCE($7, is_archived),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(title)
        .bind(description)
        .bind(due_date)
        .bind(cover_color)
        .bind(is_completed)
        .bind(is_archived)
        .fetch_one(&self.pool)
        .await?;

        Ok(card)
    }

    pub async fn move_to_list(&self, id: Uuid, list_id: Uuid, position: f64) -> AppResult<Card> {
        let card = sqlx::query_as::<_, Card>(
            "UPDATE cards SET list_id = $2, position = $3, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(list_id)
        .bind(position)
        .fetch_one(&self.pool)
        .await?;

        Ok(card)
    }

    pub async fn next_position_in_list(&self, list_id: Uuid) -> AppResult<f64> {
        let max: (Option<f64>,) =
            sqlx::query_as("SELECT MAX(position) FROM cards WHERE list_id = $1")
                .bind(list_id)
                .fetch_one(&self.pool)
                .await?;

        Ok(max.0.unwrap_or(0.0) + POSITION_STEP)
    }

    pub async fn set_completed(&self, id: Uuid, is_completed: bool) -> AppResult<Card> {
        let card = sqlx::query_as::<_, Card>(
            "UPDATE cards SET is_completed = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(is_completed)
        .fetch_one(&self.pool)
        .await?;

        Ok(card)
    }

    pub async fn set_archived(&self, id: Uuid, is_archived: bool) -> AppResult<Card> {
        let card = sqlx::query_as::<_, Card>(
            "UPDATE cards SET is_archived = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(is_archived)
        .fetch_one(&self.pool)
        .await?;

        Ok(card)
    }

    pub async fn set_due_date(&self, id: Uuid, due_date: DateTime<Utc>) -> AppResult<Card> {
        let card = sqlx::query_as::<_, Card>(
            "UPDATE cards SET due_date = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(due_date)
        .fetch_one(&self.pool)
        .await?;

        Ok(card)
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        sqlx::query("DELETE FROM cards WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
