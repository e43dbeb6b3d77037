//! NetRunner in-browser character engine.
//!
//! Exports `handle_request(method, path, query, body)` for the HTMX bridge to
//! call, plus promise-returning prompt functions (`show_dialogue`,
//! `show_choice`, `show_character_creation`) for narrative scripts. Uses
//! `matchit` for URL routing.

use wasm_bindgen::prelude::*;

pub mod config;
pub mod error;
pub mod game;
pub mod platform;
pub mod routes;

/// Process an HTTP-like request and return an HTML fragment.
///
/// # Arguments
/// * `method`: HTTP method ("GET" or "POST")
/// * `path`: URL path (e.g., "/api/xp")
/// * `query`: Query string. Empty for POST requests.
/// * `body`: URL-encoded form data, or JSON where a route says so.
///
/// # Returns
/// An HTML string fragment suitable for HTMX to swap into the DOM.
#[wasm_bindgen]
pub fn handle_request(method: &str, path: &str, query: &str, body: &str) -> String {
    let mut router = matchit::Router::new();

    // Character store
    router.insert("/api/character", "character").ok();
    router.insert("/api/character/reset", "character_reset").ok();
    router.insert("/api/character/export", "character_export").ok();
    router.insert("/api/character/import", "character_import").ok();
    router.insert("/api/status", "status").ok();

    // Progression
    router.insert("/api/xp", "xp").ok();
    router.insert("/api/skill", "skill").ok();
    router.insert("/api/quest", "quest").ok();
    router.insert("/api/quest/complete", "quest_complete").ok();

    // Presenters
    router.insert("/api/notify", "notify").ok();
    router.insert("/api/notify/dismiss", "notify_dismiss").ok();
    router.insert("/api/popup/dismiss", "popup_dismiss").ok();
    router.insert("/api/dialogue/advance", "dialogue_advance").ok();
    router.insert("/api/dialogue/dismiss", "dialogue_dismiss").ok();
    router.insert("/api/choice/select", "choice_select").ok();
    router.insert("/api/creation/submit", "creation_submit").ok();

    // Page hooks
    router.insert("/api/terminal", "terminal").ok();
    router.insert("/api/reveal", "reveal").ok();

    match router.at(path) {
        Ok(matched) => match (*matched.value, method) {
            ("character", "GET") => routes::character::handle_character_get(query),
            ("character", "POST") => routes::character::handle_character_post(body),
            ("character_reset", "POST") => routes::character::handle_reset_post(body),
            ("character_export", "GET") => routes::character::handle_export_get(query),
            ("character_import", "POST") => routes::character::handle_import_post(body),
            ("status", "GET") => routes::character::handle_status_get(query),

            ("xp", "POST") => routes::progress::handle_xp_post(body),
            ("skill", "POST") => routes::progress::handle_skill_post(body),
            ("quest", "GET") => routes::quest::handle_quest_get(query),
            ("quest", "POST") => routes::quest::handle_quest_post(body),
            ("quest_complete", "POST") => routes::quest::handle_complete_post(body),

            ("notify", "POST") => routes::prompt::handle_notify_post(body),
            ("notify_dismiss", "POST") => routes::prompt::handle_notify_dismiss_post(body),
            ("popup_dismiss", "POST") => routes::prompt::handle_popup_dismiss_post(body),
            ("dialogue_advance", "POST") => routes::prompt::handle_dialogue_advance_post(body),
            ("dialogue_dismiss", "POST") => routes::prompt::handle_dialogue_dismiss_post(body),
            ("choice_select", "POST") => routes::prompt::handle_choice_select_post(body),
            ("creation_submit", "POST") => routes::prompt::handle_creation_submit_post(body),

            ("terminal", "POST") => routes::hooks::handle_terminal_post(body),
            ("reveal", "POST") => routes::hooks::handle_reveal_post(body),

            _ => method_not_allowed(),
        },
        Err(_) => not_found(),
    }
}

fn not_found() -> String {
    r#"<span class="nr-error text-red-400 font-mono">404 route not found</span>"#.to_string()
}

fn method_not_allowed() -> String {
    r#"<span class="nr-error text-red-400 font-mono">405 method not allowed</span>"#.to_string()
}

// ── Browser entry points ───────────────────────────────────────────

#[cfg(target_arch = "wasm32")]
fn browser_runner(config: config::Config) -> game::session::NetRunner {
    use platform::web::{BrowserScheduler, DomSurface, LocalStorage};
    use std::rc::Rc;

    let storage = LocalStorage::new(&config.storage_key);
    game::session::NetRunner::new(
        config,
        Rc::new(storage),
        Rc::new(BrowserScheduler),
        Rc::new(DomSurface),
    )
}

#[cfg(target_arch = "wasm32")]
fn to_js(err: error::NetRunnerError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Module start: logging, panic hook, and a session backed by localStorage.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    tracing_wasm::set_as_global_default();

    game::session::install(browser_runner(config::Config::default()));
    game::session::with_runner(|r| r.refresh_status_display());
    tracing::info!("NetRunner engine ready");
}

/// Replace the session with one built from a JSON config. Open prompts are
/// abandoned.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn configure(json: &str) -> Result<(), JsValue> {
    let config = config::Config::from_json(json).map_err(to_js)?;
    game::session::install(browser_runner(config));
    game::session::with_runner(|r| r.refresh_status_display());
    Ok(())
}

/// Show a dialogue line. Resolves once the player dismisses it.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn show_dialogue(speaker: &str, text: &str, portrait: Option<String>) -> js_sys::Promise {
    let done = game::session::with_runner_mut(|r| r.show_dialogue(speaker, text, portrait.as_deref()));
    wasm_bindgen_futures::future_to_promise(async move {
        done.await.map_err(to_js)?;
        Ok(JsValue::UNDEFINED)
    })
}

/// Show a choice prompt. `options_json` is an array of
/// `{"text": "...", "flag": "..."}`. Resolves with the picked index.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn show_choice(prompt: &str, options_json: &str) -> Result<js_sys::Promise, JsValue> {
    let options: Vec<game::choice::ChoiceOption> =
        serde_json::from_str(options_json).map_err(|e| to_js(e.into()))?;
    let picked = game::session::with_runner_mut(|r| r.show_choice(prompt, options)).map_err(to_js)?;
    Ok(wasm_bindgen_futures::future_to_promise(async move {
        let index = picked.await.map_err(to_js)?;
        Ok(JsValue::from_f64(index as f64))
    }))
}

/// Show the character-creation form. Resolves with the accepted name.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn show_character_creation() -> Result<js_sys::Promise, JsValue> {
    let named = game::session::with_runner_mut(|r| r.show_character_creation()).map_err(to_js)?;
    Ok(wasm_bindgen_futures::future_to_promise(async move {
        let name = named.await.map_err(to_js)?;
        Ok(JsValue::from_str(&name))
    }))
}
