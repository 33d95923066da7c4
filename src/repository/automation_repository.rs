use sqlx::PgPool;
use uuid::Uuid;

use crate::error::AppResult;
use crate::models::AutomationRule;

#[derive(Clone)]
pub struct AutomationRepository {
    pool: PgPool,
}

impl AutomationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        board_id: Uuid,
        name: &str,
        trigger_kind: &str,
        trigger_config: serde_json::Value,
        action_kind: &str,
        action_config: serde_json::Value,
    ) -> AppResult<AutomationRule> {
        let rule = sqlx::query_as::<_, AutomationRule>(
            r#"
            INSERT INTO automation_rules (board_id, name, trigger_kind, trigger_config, action_kind, action_config)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(board_id)
        .bind(name)
        .bind(trigger_kind)
        .bind(trigger_config)
        .bind(action_kind)
        .bind(action_config)
        .fetch_one(&self.pool)
        .await?;

        Ok(rule)
    }

    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<AutomationRule>> {
        let rule =
            sqlx::query_as::<_, AutomationRule>("SELECT * FROM automation_rules WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(rule)
    }

    pub async fn list_by_board(&self, board_id: Uuid) -> AppResult<Vec<AutomationRule>> {
        let rules = sqlx::query_as::<_, AutomationRule>(
            "SELECT * FROM automation_rules WHERE board_id = $1 ORDER BY created_at ASC",
        )
        .bind(board_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rules)
    }

    /// Enabled rules in creation order, the order they fire in.
    pub async fn list_enabled_by_board(&self, board_id: Uuid) -> AppResult<Vec<AutomationRule>> {
        let rules = sqlx::query_as::<_, AutomationRule>(
            "SELECT * FROM automation_rules WHERE board_id = $1 AND is_enabled = true ORDER BY created_at ASC",
        )
        .bind(board_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rules)
    }

    pub async fn update(
        &self,
        id: Uuid,
        name: Option<&str>,
        trigger_kind: Option<&str>,
        trigger_config: Option<serde_json::Value>,
        action_kind: Option<&str>,
        action_config: Option<serde_json::Value>,
        is_enabled: Option<bool>,
    ) -> AppResult<AutomationRule> {
        let rule = sqlx::query_as::<_, AutomationRule>(
            r#"
            UPDATE automation_rules
            SET name = COALESCE($2, name),
                trigger_kind = COALESCE($3, trigger_kind),
                trigger_config = COALESCE($4, trigger_config),
                action_kind = COALESCE($5, action_kind),
                action_config = COALESCE($6, action_config),
                is_enabled = COALESCE($7, is_enabled),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(trigger_kind)
        .bind(trigger_config)
        .bind(action_kind)
        .bind(action_config)
        .bind(is_enabled)
        .fetch_one(&self.pool)
        .await?;

        Ok(rule)
    }

    pub async fn record_run(&self, id: Uuid) -> AppResult<()> {
        sqlx::query(
            "UPDATE automation_rules SET run_count = run_count + 1, last_run_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        sqlx::query("DELETE FROM automation_rules WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
