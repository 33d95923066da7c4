use sqlx::PgPool;
use uuid::Uuid;

use crate::error::AppResult;
use crate::models::Board;

#[derive(Clone)]
pub struct BoardRepository {
    pool: PgPool,
}

impl BoardRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        workspace_id: Uuid,
        name: &str,
        description: Option<&str>,
        owner_id: Uuid,
        background_color: Option<&str>,
    ) -> AppResult<Board> {
        let board = sqlx::query_as::<_, Board>(
            r#"
            INSERT INTO boards (workspace_id, name, description, owner_id, background_color)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(workspace_id)
        .bind(name)
        .bind(description)
        .bind(owner_id)
        .bind(background_color)
        .fetch_one(&self.pool)
        .await?;

        Ok(board)
    }

    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Board>> {
        let board = sqlx::query_as::<_, Board>("SELECT * FROM boards WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(board)
    }

    pub async fn count_by_workspace(&self, workspace_id: Uuid) -> AppResult<i64> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM boards WHERE workspace_id = $1")
            .bind(workspace_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0)
    }

    pub async fn list_by_workspace(
        &self,
        workspace_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> AppResult<Vec<Board>> {
        let boards = sqlx::query_as::<_, Board>(
            "SELECT * FROM boards WHERE workspace_id = $1 ORDER BY created_at DESC LIMIT $2 OFFSET $3",
        )
        .bind(workspace_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(boards)
    }

    pub async fn update(
        &self,
        id: Uuid,
        name: Option<&str>,
        description: Option<&str>,
        background_color: Option<&str>,
        is_closed: Option<bool>,
    ) -> AppResult<Board> {
        let board = sqlx::query_as::<_, Board>(
            r#"
            UPDATE boards
            SET name = COALESCE($2, name),
                description = COALESCE($3, description),
                background_color = COALESCE($4, background_color),
                is_closed = COALESCE($5, is_closed),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(description)
        .bind(background_color)
        .bind(is_closed)
        .fetch_one(&self.pool)
        .await?;

        Ok(board)
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        sqlx::query("DELETE FROM boards WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
