//! Click targets inside rendered fragments: toasts, popups, the dialogue
//! box, choice buttons and the character-creation form.

use crate::game::dialogue::DialogueStep;
use crate::game::notify::NotificationKind;
use crate::game::session::{with_runner, with_runner_mut};
use crate::routes::util::{error_fragment, get_param, message_fragment, parse_form_body};

fn id_param(params: &[(String, String)], key: &str) -> Option<u64> {
    get_param(params, key)?.trim().parse().ok()
}

// ── Notifications ──────────────────────────────────────────────────

/// Handle POST /api/notify
/// Body: message={text}&kind={info|xp|quest|skill|level|error}
pub fn handle_notify_post(body: &str) -> String {
    let params = parse_form_body(body);
    let message = match get_param(&params, "message") {
        Some(m) if !m.trim().is_empty() => m,
        _ => return message_fragment("Missing message parameter"),
    };
    let kind = NotificationKind::parse(get_param(&params, "kind").unwrap_or("info"));
    let id = with_runner(|r| r.notify(message, kind));
    id.to_string()
}

/// Handle POST /api/notify/dismiss
/// Body: id={toast}
pub fn handle_notify_dismiss_post(body: &str) -> String {
    let params = parse_form_body(body);
    match id_param(&params, "id") {
        Some(id) => {
            with_runner(|r| r.dismiss_notification(id));
            String::new()
        }
        None => message_fragment("Missing or invalid id parameter"),
    }
}

// ── Popups ─────────────────────────────────────────────────────────

/// Handle POST /api/popup/dismiss
/// Body: id={popup}
pub fn handle_popup_dismiss_post(body: &str) -> String {
    let params = parse_form_body(body);
    match id_param(&params, "id") {
        Some(id) => {
            with_runner(|r| r.dismiss_popup(id));
            String::new()
        }
        None => message_fragment("Missing or invalid id parameter"),
    }
}

// ── Dialogue ───────────────────────────────────────────────────────

/// Handle POST /api/dialogue/advance
/// First click completes the reveal, the next one closes the box.
pub fn handle_dialogue_advance_post(_body: &str) -> String {
    match with_runner_mut(|r| r.advance_dialogue()) {
        Ok(DialogueStep::FastForwarded) => "revealed".to_string(),
        Ok(DialogueStep::Dismissed) => "dismissed".to_string(),
        Err(e) => error_fragment(&e),
    }
}

/// Handle POST /api/dialogue/dismiss
pub fn handle_dialogue_dismiss_post(_body: &str) -> String {
    match with_runner_mut(|r| r.dismiss_dialogue()) {
        Ok(()) => "dismissed".to_string(),
        Err(e) => error_fragment(&e),
    }
}

// ── Choice ─────────────────────────────────────────────────────────

/// Handle POST /api/choice/select
/// Body: index={n}
pub fn handle_choice_select_post(body: &str) -> String {
    let params = parse_form_body(body);
    let index = match get_param(&params, "index").and_then(|s| s.trim().parse::<usize>().ok()) {
        Some(i) => i,
        None => return message_fragment("Missing or invalid index parameter"),
    };
    match with_runner_mut(|r| r.select_choice(index)) {
        Ok(_) => String::new(),
        Err(e) => error_fragment(&e),
    }
}

// ── Character creation ─────────────────────────────────────────────

/// Handle POST /api/creation/submit
/// Body: name={handle}. An invalid name re-renders the form with the error.
pub fn handle_creation_submit_post(body: &str) -> String {
    let params = parse_form_body(body);
    let raw = get_param(&params, "name").unwrap_or("");
    match with_runner_mut(|r| r.submit_character_name(raw)) {
        Ok(_) => with_runner(|r| r.refresh_status_display()),
        Err(e) => error_fragment(&e),
    }
}
