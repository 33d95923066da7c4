use anyhow::Result;
use sqlx::PgPool;
use tracing::{info, warn};

/// Run database migrations
pub async fn run_migrations(pool: &PgPool) -> Result<()> {
    let migrations = vec![
        // Enable UUID extension
        r#"CREATE EXTENSION IF NOT EXISTS "uuid-ossp";"#,

        // Workspaces table
        r#"CREATE TABLE IF NOT EXISTS workspaces (
            id UUID PRIMARY KEY DEFAULT uuid_generate_v4(),
            name VARCHAR(255) NOT NULL,
            description TEXT,
            owner_id UUID NOT NULL,
            visibility VARCHAR(20) NOT NULL DEFAULT 'private' CHECK (visibility IN ('private', 'public')),
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        );"#,

        // Boards table
        r#"CREATE TABLE IF NOT EXISTS boards (
            id UUID PRIMARY KEY DEFAULT uuid_generate_v4(),
            workspace_id UUID NOT NULL REFERENCES workspaces(id) ON DELETE CASCADE,
            name VARCHAR(255) NOT NULL,
            description TEXT,
            owner_id UUID NOT NULL,
            is_closed BOOLEAN NOT NULL DEFAULT false,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        );"#,

        // Lists table
        r#"CREATE TABLE IF NOT EXISTS lists (
            id UUID PRIMARY KEY DEFAULT uuid_generate_v4(),
            board_id UUID NOT NULL REFERENCES boards(id) ON DELETE CASCADE,
            name VARCHAR(255) NOT NULL,
            position DOUBLE PRECISION NOT NULL DEFAULT 0,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        );"#,

        // Cards table
        r#"CREATE TABLE IF NOT EXISTS cards (
            id UUID PRIMARY KEY DEFAULT uuid_generate_v4(),
            board_id UUID NOT NULL REFERENCES boards(id) ON DELETE CASCADE,
            list_id UUID NOT NULL REFERENCES lists(id) ON DELETE CASCADE,
            title VARCHAR(512) NOT NULL,
            description TEXT,
            position DOUBLE PRECISION NOT NULL DEFAULT 0,
            due_date TIMESTAMPTZ,
            is_completed BOOLEAN NOT NULL DEFAULT false,
            is_archived BOOLEAN NOT NULL DEFAULT false,
            created_by UUID NOT NULL,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        );"#,

        // Labels table
        r#"CREATE TABLE IF NOT EXISTS labels (
            id UUID PRIMARY KEY DEFAULT uuid_generate_v4(),
            board_id UUID NOT NULL REFERENCES boards(id) ON DELETE CASCADE,
            name VARCHAR(100) NOT NULL,
            color VARCHAR(7) NOT NULL,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        );"#,

        // Card labels join table
        r#"CREATE TABLE IF NOT EXISTS card_labels (
            card_id UUID NOT NULL REFERENCES cards(id) ON DELETE CASCADE,
            label_id UUID NOT NULL REFERENCES labels(id) ON DELETE CASCADE,
            added_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            PRIMARY KEY (card_id, label_id)
        );"#,

        // Custom fields table
        r#"CREATE TABLE IF NOT EXISTS custom_fields (
            id UUID PRIMARY KEY DEFAULT uuid_generate_v4(),
            board_id UUID NOT NULL REFERENCES boards(id) ON DELETE CASCADE,
            name VARCHAR(100) NOT NULL,
            field_type VARCHAR(20) NOT NULL CHECK (field_type IN ('text', 'number', 'date', 'checkbox', 'dropdown')),
            options JSONB,
            position DOUBLE PRECISION NOT NULL DEFAULT 0,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        );"#,

        // Card custom field values table
        r#"CREATE TABLE IF NOT EXISTS card_custom_field_values (
            id UUID PRIMARY KEY DEFAULT uuid_generate_v4(),
            card_id UUID NOT NULL REFERENCES cards(id) ON DELETE CASCADE,
            field_id UUID NOT NULL REFERENCES custom_fields(id) ON DELETE CASCADE,
            value TEXT NOT NULL,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            UNIQUE (card_id, field_id)
        );"#,

        // Automation rules table
        r#"CREATE TABLE IF NOT EXISTS automation_rules (
            id UUID PRIMARY KEY DEFAULT uuid_generate_v4(),
            board_id UUID NOT NULL REFERENCES boards(id) ON DELETE CASCADE,
            name VARCHAR(255) NOT NULL,
            trigger_type VARCHAR(30) NOT NULL CHECK (trigger_type IN (
                'card_created', 'card_moved', 'card_completed', 'label_added', 'due_date_set'
            )),
            trigger_config JSONB NOT NULL DEFAULT '{}',
            action_kind VARCHAR(30) NOT NULL CHECK (action_kind IN (
                'move_to_list', 'add_label', 'remove_label',
                'mark_completed', 'archive_card', 'set_due_date'
            )),
            action_config JSONB NOT NULL DEFAULT '{}',
            is_enabled BOOLEAN NOT NULL DEFAULT true,
            run_count BIGINT NOT NULL DEFAULT 0,
            last_run_at TIMESTAMPTZ,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        );"#,

        // Indexes
        r#"CREATE INDEX IF NOT EXISTS idx_workspaces_owner ON workspaces(owner_id);"#,
        r#"CREATE INDEX IF NOT EXISTS idx_boards_workspace ON boards(workspace_id);"#,
        r#"CREATE INDEX IF NOT EXISTS idx_boards_owner ON boards(owner_id);"#,
        r#"CREATE INDEX IF NOT EXISTS idx_lists_board ON lists(board_id);"#,
        r#"CREATE INDEX IF NOT EXISTS idx_cards_board ON cards(board_id);"#,
        r#"CREATE INDEX IF NOT EXISTS idx_cards_list ON cards(list_id);"#,
        r#"CREATE INDEX IF NOT EXISTS idx_cards_due_date ON cards(due_date);"#,
        r#"CREATE INDEX IF NOT EXISTS idx_card_labels_label ON card_labels(label_id);"#,
        r#"CREATE INDEX IF NOT EXISTS idx_labels_board ON labels(board_id);"#,
        r#"CREATE INDEX IF NOT EXISTS idx_custom_fields_board ON custom_fields(board_id);"#,
        r#"CREATE INDEX IF NOT EXISTS idx_cfv_card ON card_custom_field_values(card_id);"#,
        r#"CREATE INDEX IF NOT EXISTS idx_cfv_field ON card_custom_field_values(field_id);"#,
        r#"CREATE INDEX IF NOT EXISTS idx_automation_rules_board ON automation_rules(board_id, is_enabled);"#,

        // Board backgrounds shipped after launch
        r#"ALTER TABLE boards ADD COLUMN IF NOT EXISTS background_color VARCHAR(7);"#,

        // Card covers shipped after launch
        r#"ALTER TABLE cards ADD COLUMN IF NOT EXISTS cover_color VARCHAR(7);"#,

        // List archiving shipped after launch
        r#"ALTER TABLE lists ADD COLUMN IF NOT EXISTS is_archived BOOLEAN NOT NULL DEFAULT false;"#,

        // Align automation column naming with action_kind
        r#"ALTER TABLE automation_rules RENAME COLUMN trigger_type TO trigger_kind;"#,
    ];

    for (i, migration) in migrations.iter().enumerate() {
        match sqlx::query(migration).execute(pool).await {
            Ok(_) => {}
            Err(e) => {
                warn!("Migration {} may have already been applied or failed: {}", i + 1, e);
            }
        }
    }

    info!("All migrations completed successfully");
    Ok(())
}
