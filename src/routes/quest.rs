//! `/api/quest/*`: active quest and completion history.

use crate::game::character::Quest;
use crate::game::session::with_runner;
use crate::routes::util::{error_fragment, get_param, message_fragment, parse_form_body};

// ── GET /api/quest ─────────────────────────────────────────────────

/// Handle GET /api/quest
pub fn handle_quest_get(_query: &str) -> String {
    with_runner(|r| r.render_quest_log())
}

// ── POST /api/quest ────────────────────────────────────────────────

/// Handle POST /api/quest
/// Body: `{"id": "...", "status": "...", "objectives": [{"text": "...", "complete": false}]}`
/// Replaces the active quest and returns the re-rendered log.
pub fn handle_quest_post(body: &str) -> String {
    let quest: Quest = match serde_json::from_str(body) {
        Ok(q) => q,
        Err(e) => return error_fragment(&e.into()),
    };
    if quest.id.trim().is_empty() {
        return message_fragment("Missing quest id");
    }
    with_runner(|r| {
        match r.update_quest_log(&quest.id, &quest.status, quest.objectives.clone()) {
            Ok(()) => r.render_quest_log(),
            Err(e) => error_fragment(&e),
        }
    })
}

// ── POST /api/quest/complete ───────────────────────────────────────

/// Handle POST /api/quest/complete
/// Body: id={quest}
pub fn handle_complete_post(body: &str) -> String {
    let params = parse_form_body(body);
    let id = get_param(&params, "id").unwrap_or("").trim();
    if id.is_empty() {
        return message_fragment("Missing quest id");
    }
    with_runner(|r| match r.complete_quest(id) {
        Ok(_) => r.render_quest_log(),
        Err(e) => error_fragment(&e),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::game::session::{NetRunner, install};

    fn reset_state() {
        install(NetRunner::headless(Config::default()));
    }

    #[test]
    fn quest_post_replaces_active_quest() {
        reset_state();
        let html = handle_quest_post(
            r#"{"id":"IMPORT-101","status":"active","objectives":[{"text":"Upload the CSV","complete":true},{"text":"Run the Job"}]}"#,
        );
        assert!(html.contains("IMPORT-101"));
        assert!(html.contains("1/2 objectives"));
        let html = handle_quest_post(r#"{"id":"EXPORT-101","status":"active"}"#);
        assert!(html.contains("EXPORT-101"));
        assert!(!html.contains("Upload the CSV"));
        reset_state();
    }

    #[test]
    fn quest_post_rejects_bad_bodies() {
        reset_state();
        assert!(handle_quest_post("nope").contains("Invalid"));
        assert!(handle_quest_post(r#"{"id":" ","status":"x"}"#).contains("Missing quest id"));
    }

    #[test]
    fn complete_post_records_once() {
        reset_state();
        let html = handle_complete_post("id=Q1");
        assert!(html.contains("✓ Q1"));
        handle_complete_post("id=Q1");
        assert_eq!(
            with_runner(|r| r.get_character().quests_completed),
            vec!["Q1".to_string()]
        );
        assert_eq!(with_runner(|r| r.notifications().live().len()), 1);
        reset_state();
    }

    #[test]
    fn quest_get_without_quest() {
        reset_state();
        assert!(handle_quest_get("").contains("No active quest."));
    }
}
