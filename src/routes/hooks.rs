//! Passive page hooks: inline terminals and scroll-reveal elements.

use crate::game::session::{with_runner, with_runner_mut};
use crate::game::terminal::{TerminalSpec, render_terminal_output};
use crate::routes::util::{error_fragment, get_param, message_fragment, parse_form_body};

// ── POST /api/terminal ─────────────────────────────────────────────

/// Handle POST /api/terminal
/// Body: expected={cmd}&input={typed}[&skill={name}&skill_desc={text}][&xp={n}]
/// Returns the echoed command and the response line.
pub fn handle_terminal_post(body: &str) -> String {
    let params = parse_form_body(body);
    let input = get_param(&params, "input").unwrap_or("");
    let expected = get_param(&params, "expected").unwrap_or("");

    let xp = match get_param(&params, "xp").map(str::trim).filter(|s| !s.is_empty()) {
        Some(raw) => match raw.parse::<u32>() {
            Ok(n) => Some(n),
            Err(_) => return message_fragment("Invalid xp parameter"),
        },
        None => None,
    };
    let skill = get_param(&params, "skill")
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|name| {
            (
                name.to_string(),
                get_param(&params, "skill_desc").unwrap_or("").to_string(),
            )
        });

    let spec = TerminalSpec {
        expected: expected.to_string(),
        skill,
        xp,
    };
    match with_runner(|r| r.check_terminal(&spec, input)) {
        Ok(outcome) => render_terminal_output(input, &outcome),
        Err(e) => error_fragment(&e),
    }
}

// ── POST /api/reveal ───────────────────────────────────────────────

/// Handle POST /api/reveal
/// Body: element={id}&event={name[:arg]}
/// Each element fires at most once per session; repeats return nothing.
pub fn handle_reveal_post(body: &str) -> String {
    let params = parse_form_body(body);
    let (element, event) = match (get_param(&params, "element"), get_param(&params, "event")) {
        (Some(el), Some(ev)) if !el.trim().is_empty() && !ev.trim().is_empty() => (el.trim(), ev.trim()),
        _ => return message_fragment("Missing element or event parameter"),
    };
    match with_runner_mut(|r| r.fire_reveal(element, event)) {
        Ok(_) => String::new(),
        Err(e) => error_fragment(&e),
    }
}
