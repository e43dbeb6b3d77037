//! Status panel: name, class, level, XP bar and stats.

use crate::game::character::Character;
use crate::game::markup::escape;

pub fn render_status(character: &Character) -> String {
    let mut html = String::with_capacity(1024);
    html.push_str(r#"<div class="nr-status font-mono text-sm text-slate-200 bg-slate-950/90 border border-cyan-700 rounded p-3">"#);
    html.push_str(&format!(
        r#"<p class="text-cyan-300 font-bold">{} <span class="text-xs text-slate-400">{}</span></p>"#,
        escape(&character.name),
        escape(&character.class_name)
    ));
    html.push_str(&format!(
        r#"<p class="mb-1">LVL <strong>{}</strong></p>"#,
        character.level
    ));

    // XP bar
    html.push_str(&format!(
        r#"<div class="w-full h-2 bg-slate-800 rounded" title="{} / {} XP"><div class="h-2 bg-cyan-400 rounded" style="width: {}%"></div></div>"#,
        character.xp,
        character.xp_to_next,
        character.xp_percent()
    ));
    html.push_str(&format!(
        r#"<p class="text-xs text-slate-400 mb-2">XP {} / {}</p>"#,
        character.xp, character.xp_to_next
    ));

    html.push_str(r#"<dl class="grid grid-cols-2 gap-x-3 text-xs">"#);
    for (label, value) in character.stats.entries() {
        html.push_str(&format!(
            r#"<dt class="text-slate-400">{}</dt><dd class="text-right">{}</dd>"#,
            label, value
        ));
    }
    html.push_str("</dl>");

    if !character.skills.is_empty() {
        html.push_str(r#"<p class="text-xs text-fuchsia-300 mt-2">"#);
        let skills: Vec<String> = character.skills.iter().map(|s| escape(s)).collect();
        html.push_str(&skills.join(" · "));
        html.push_str("</p>");
    }

    html.push_str("</div>");
    html
}
