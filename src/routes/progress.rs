//! `/api/xp` and `/api/skill`: progression awards.

use crate::game::session::with_runner;
use crate::routes::util::{error_fragment, get_param, message_fragment, parse_form_body};

// ── POST /api/xp ───────────────────────────────────────────────────

/// Handle POST /api/xp
/// Body: amount={n}. Returns the refreshed status panel.
/// Zero, negative or non-numeric amounts are rejected without touching state.
pub fn handle_xp_post(body: &str) -> String {
    let params = parse_form_body(body);
    let amount = match get_param(&params, "amount").map(|s| s.trim().parse::<i64>()) {
        Some(Ok(n)) if n > 0 => u32::try_from(n).unwrap_or(u32::MAX),
        Some(Ok(_)) => return message_fragment("XP award must be positive"),
        _ => return message_fragment("Missing or invalid amount parameter"),
    };
    match with_runner(|r| r.gain_xp(amount)) {
        Ok(_) => with_runner(|r| r.refresh_status_display()),
        Err(e) => error_fragment(&e),
    }
}

// ── POST /api/skill ────────────────────────────────────────────────

/// Handle POST /api/skill
/// Body: name={skill}&description={text}
pub fn handle_skill_post(body: &str) -> String {
    let params = parse_form_body(body);
    let name = get_param(&params, "name").unwrap_or("").trim();
    if name.is_empty() {
        return message_fragment("Missing skill name");
    }
    let description = get_param(&params, "description").unwrap_or("");
    match with_runner(|r| r.acquire_skill(name, description)) {
        Ok(true) => String::new(),
        Ok(false) => r#"<span class="text-slate-400 font-mono text-sm">Skill already known</span>"#
            .to_string(),
        Err(e) => error_fragment(&e),
    }
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
    fn xp_post_levels_up() {
        reset_state();
        let html = handle_xp_post("amount=150");
        assert!(html.contains("LVL <strong>2</strong>"));
        assert!(html.contains("XP 50 / 150"));
        reset_state();
    }

    #[test]
    fn xp_post_rejects_non_positive() {
        reset_state();
        assert!(handle_xp_post("amount=0").contains("must be positive"));
        assert!(handle_xp_post("amount=-20").contains("must be positive"));
        assert!(handle_xp_post("amount=lots").contains("invalid amount"));
        assert!(handle_xp_post("").contains("invalid amount"));
        assert_eq!(with_runner(|r| r.get_character().xp), 0);
    }

    #[test]
    fn skill_post_is_idempotent() {
        reset_state();
        assert_eq!(handle_skill_post("name=LOCKPICK&description=Open+locks"), "");
        assert!(handle_skill_post("name=LOCKPICK").contains("already known"));
        assert_eq!(
            with_runner(|r| r.get_character().skills),
            vec!["LOCKPICK".to_string()]
        );
        reset_state();
    }

    #[test]
    fn skill_post_needs_a_name() {
        reset_state();
        assert!(handle_skill_post("name=+++").contains("Missing skill name"));
    }
}
