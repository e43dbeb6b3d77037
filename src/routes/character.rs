//! `/api/character/*` and `/api/status`: the stored record itself.

use crate::game::character::Character;
use crate::game::session::{with_runner, with_runner_mut};
use crate::routes::util::{error_fragment, get_param, parse_form_body};

// ── GET /api/character ─────────────────────────────────────────────

/// Handle GET /api/character
/// Returns the record as JSON (defaults if nothing is stored yet).
pub fn handle_character_get(_query: &str) -> String {
    let character = with_runner(|r| r.get_character());
    serde_json::to_string(&character).unwrap_or_else(|_| "{}".to_string())
}

// ── POST /api/character ────────────────────────────────────────────

/// Handle POST /api/character
/// Body: the full record as JSON. Overwrites the stored record and returns
/// the refreshed status panel.
pub fn handle_character_post(body: &str) -> String {
    let character: Character = match serde_json::from_str(body) {
        Ok(c) => c,
        Err(e) => return error_fragment(&e.into()),
    };
    with_runner(|r| match r.save_character(&character) {
        Ok(()) => r.refresh_status_display(),
        Err(e) => error_fragment(&e),
    })
}

// ── POST /api/character/reset ──────────────────────────────────────

/// Handle POST /api/character/reset
/// Clears the stored record; the page reloads with a fresh character.
pub fn handle_reset_post(_body: &str) -> String {
    match with_runner_mut(|r| r.reset_character()) {
        Ok(()) => r#"<span class="text-emerald-400 font-mono text-sm">Character wiped. Rebooting…</span>"#
            .to_string(),
        Err(e) => error_fragment(&e),
    }
}

// ── GET /api/character/export ──────────────────────────────────────

/// Handle GET /api/character/export
/// Returns the record as a URL-safe base64 string.
pub fn handle_export_get(_query: &str) -> String {
    with_runner(|r| r.export_character()).unwrap_or_else(|e| error_fragment(&e))
}

// ── POST /api/character/import ─────────────────────────────────────

/// Handle POST /api/character/import
/// Body: `state={base64}` or the bare base64 string.
pub fn handle_import_post(body: &str) -> String {
    let params = parse_form_body(body);
    let blob = get_param(&params, "state").unwrap_or(body.trim());
    match with_runner(|r| r.import_character(blob)) {
        Ok(c) => format!(
            r#"<span class="text-emerald-400 font-mono text-sm">Imported {} (level {})</span>"#,
            crate::game::markup::escape(&c.name),
            c.level
        ),
        Err(e) => error_fragment(&e),
    }
}

// ── GET /api/status ────────────────────────────────────────────────

/// Handle GET /api/status
/// Re-renders the status panel and returns it.
pub fn handle_status_get(_query: &str) -> String {
    with_runner(|r| r.refresh_status_display())
}
