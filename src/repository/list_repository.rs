use sqlx::PgPool;
use uuid::Uuid;

use crate::error::AppResult;
use crate::models::List;

/// Gap between appended positions, leaving room for fractional inserts.
pub const POSITION_STEP: f64 = 65536.0;

#[derive(Clone)]
pub struct ListRepository {
    pool: PgPool,
}

impl ListRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, board_id: Uuid, name: &str) -> AppResult<List> {
        let list = sqlx::query_as::<_, List>(
            r#"
            INSERT INTO lists (board_id, name, position)
            VALUES ($1, $2, (
                SELECT COALESCE(MAX(position), 0) + $3 FROM lists WHERE board_id = $1
            ))
            RETURNING *
            "#,
        )
        .bind(board_id)
        .bind(name)
        .bind(POSITION_STEP)
        .fetch_one(&self.pool)
        .await?;

        Ok(list)
    }

    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<List>> {
        let list = sqlx::query_as::<_, List>("SELECT * FROM lists WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(list)
    }

    pub async fn list_by_board(&self, board_id: Uuid) -> AppResult<Vec<List>> {
        let lists = sqlx::query_as::<_, List>(
            "SELECT * FROM lists WHERE board_id = $1 ORDER BY position ASC",
        )
        .bind(board_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(lists)
    }

    pub async fn update(
        &self,
        id: Uuid,
        name: Option<&str>,
        position: Option<f64>,
        is_archived: Option<bool>,
    ) -> AppResult<List> {
        let list = sqlx::query_as::<_, List>(
            r#"
            UPDATE lists
            SET name = COALESCE($2, name),
                position = COALESCE($3, position),
                is_archived = COALESCE($4, is_archived),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(position)
        .bind(is_archived)
        .fetch_one(&self.pool)
        .await?;

        Ok(list)
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        sqlx::query("DELETE FROM lists WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
