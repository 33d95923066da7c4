use chrono::Utc;
use serde_json::json;
use uuid::Uuid;

use crate::models::{ActionConfig, ActionKind, AutomationRule, TriggerEvent};
use crate::services::{rule_matches, validate_action_config};

fn make_rule(
    board_id: Uuid,
    trigger_kind: &str,
    trigger_config: serde_json::Value,
) -> AutomationRule {
    AutomationRule {
        id: Uuid::new_v4(),
        board_id,
        name: "Test rule".to_string(),
        trigger_kind: trigger_kind.to_string(),
        trigger_config,
        action_kind: "archive_card".to_string(),
        action_config: json!({}),
        is_enabled: true,
        run_count: 0,
        last_run_at: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

#[test]
fn test_rule_fires_only_for_its_trigger_kind() {
    let board_id = Uuid::new_v4();
    let card_id = Uuid::new_v4();
    let rule = make_rule(board_id, "card_completed", json!({}));

    assert!(rule_matches(
        &rule,
        &TriggerEvent::card_completed(board_id, card_id)
    ));
    assert!(!rule_matches(
        &rule,
        &TriggerEvent::card_created(board_id, card_id, Uuid::new_v4())
    ));
    assert!(!rule_matches(
        &rule,
        &TriggerEvent::due_date_set(board_id, card_id)
    ));
}

#[test]
fn test_disabled_rule_never_fires() {
    let board_id = Uuid::new_v4();
    let mut rule = make_rule(board_id, "card_completed", json!({}));
    rule.is_enabled = false;

    assert!(!rule_matches(
        &rule,
        &TriggerEvent::card_completed(board_id, Uuid::new_v4())
    ));
}

#[test]
fn test_card_created_narrowed_to_one_list() {
    let board_id = Uuid::new_v4();
    let card_id = Uuid::new_v4();
    let wanted_list = Uuid::new_v4();
    let other_list = Uuid::new_v4();
    let rule = make_rule(board_id, "card_created", json!({ "list_id": wanted_list }));

    assert!(rule_matches(
        &rule,
        &TriggerEvent::card_created(board_id, card_id, wanted_list)
    ));
    assert!(!rule_matches(
        &rule,
        &TriggerEvent::card_created(board_id, card_id, other_list)
    ));
}

#[test]
fn test_card_created_without_filter_matches_any_list() {
    let board_id = Uuid::new_v4();
    let rule = make_rule(board_id, "card_created", json!({}));

    assert!(rule_matches(
        &rule,
        &TriggerEvent::card_created(board_id, Uuid::new_v4(), Uuid::new_v4())
    ));
}

#[test]
fn test_card_moved_narrowed_to_destination_list() {
    let board_id = Uuid::new_v4();
    let card_id = Uuid::new_v4();
    let destination = Uuid::new_v4();
    let rule = make_rule(board_id, "card_moved", json!({ "to_list_id": destination }));

    assert!(rule_matches(
        &rule,
        &TriggerEvent::card_moved(board_id, card_id, destination)
    ));
    assert!(!rule_matches(
        &rule,
        &TriggerEvent::card_moved(board_id, card_id, Uuid::new_v4())
    ));
}

#[test]
fn test_label_added_narrowed_to_one_label() {
    let board_id = Uuid::new_v4();
    let card_id = Uuid::new_v4();
    let wanted_label = Uuid::new_v4();
    let rule = make_rule(board_id, "label_added", json!({ "label_id": wanted_label }));

    assert!(rule_matches(
        &rule,
        &TriggerEvent::label_added(board_id, card_id, wanted_label)
    ));
    assert!(!rule_matches(
        &rule,
        &TriggerEvent::label_added(board_id, card_id, Uuid::new_v4())
    ));
}

#[test]
fn test_due_date_set_has_no_narrowing() {
    let board_id = Uuid::new_v4();
    let rule = make_rule(board_id, "due_date_set", json!({}));

    assert!(rule_matches(
        &rule,
        &TriggerEvent::due_date_set(board_id, Uuid::new_v4())
    ));
}

#[test]
fn test_malformed_trigger_config_behaves_as_unfiltered() {
    let board_id = Uuid::new_v4();
    let rule = make_rule(board_id, "card_created", json!("not an object"));

    assert!(rule_matches(
        &rule,
        &TriggerEvent::card_created(board_id, Uuid::new_v4(), Uuid::new_v4())
    ));
}

#[test]
fn test_move_to_list_action_requires_list_id() {
    let empty = ActionConfig::default();
    assert!(validate_action_config(ActionKind::MoveToList, &empty).is_err());

    let config = ActionConfig {
        list_id: Some(Uuid::new_v4()),
        ..Default::default()
    };
    assert!(validate_action_config(ActionKind::MoveToList, &config).is_ok());
}

#[test]
fn test_label_actions_require_label_id() {
    let empty = ActionConfig::default();
    assert!(validate_action_config(ActionKind::AddLabel, &empty).is_err());
    assert!(validate_action_config(ActionKind::RemoveLabel, &empty).is_err());

    let config = ActionConfig {
        label_id: Some(Uuid::new_v4()),
        ..Default::default()
    };
    assert!(validate_action_config(ActionKind::AddLabel, &config).is_ok());
    assert!(validate_action_config(ActionKind::RemoveLabel, &config).is_ok());
}

#[test]
fn test_set_due_date_action_requires_days() {
    let empty = ActionConfig::default();
    assert!(validate_action_config(ActionKind::SetDueDate, &empty).is_err());

    let config = ActionConfig {
        days_from_now: Some(3),
        ..Default::default()
    };
    assert!(validate_action_config(ActionKind::SetDueDate, &config).is_ok());
}

#[test]
fn test_parameterless_actions_accept_empty_config() {
    let empty = ActionConfig::default();
    assert!(validate_action_config(ActionKind::MarkCompleted, &empty).is_ok());
    assert!(validate_action_config(ActionKind::ArchiveCard, &empty).is_ok());
}

#[test]
fn test_events_carry_their_context() {
    let board_id = Uuid::new_v4();
    let card_id = Uuid::new_v4();
    let list_id = Uuid::new_v4();
    let label_id = Uuid::new_v4();

    let created = TriggerEvent::card_created(board_id, card_id, list_id);
    assert_eq!(created.list_id, Some(list_id));
    assert_eq!(created.label_id, None);

    let moved = TriggerEvent::card_moved(board_id, card_id, list_id);
    assert_eq!(moved.list_id, Some(list_id));

    let labeled = TriggerEvent::label_added(board_id, card_id, label_id);
    assert_eq!(labeled.label_id, Some(label_id));
    assert_eq!(labeled.list_id, None);

    let completed = TriggerEvent::card_completed(board_id, card_id);
    assert_eq!(completed.list_id, None);
    assert_eq!(completed.label_id, None);
}
