//! Quest log rendering.

use crate::game::character::{Character, Objective, Quest};
use crate::game::markup::escape;

impl Quest {
    pub fn new(id: &str, status: &str, objectives: Vec<Objective>) -> Self {
        Self {
            id: id.to_string(),
            status: status.to_string(),
            objectives,
        }
    }

    pub fn objectives_done(&self) -> usize {
        self.objectives.iter().filter(|o| o.complete).count()
    }
}

impl Objective {
    pub fn new(text: &str, complete: bool) -> Self {
        Self {
            text: text.to_string(),
            complete,
        }
    }
}

/// Render the quest log: the active quest with its checklist, then the
/// completed-quest history.
pub fn render_quest_log(character: &Character) -> String {
    let mut html = String::with_capacity(1024);
    html.push_str(r#"<div class="nr-quest-log font-mono text-sm text-slate-200">"#);

    match &character.current_quest {
        Some(quest) => {
            html.push_str(&format!(
                r#"<p class="text-amber-300 font-bold">{} <span class="text-xs text-slate-400">[{}]</span></p>"#,
                escape(&quest.id),
                escape(&quest.status)
            ));
            html.push_str(&format!(
                r#"<p class="text-xs text-slate-500 mb-1">{}/{} objectives</p>"#,
                quest.objectives_done(),
                quest.objectives.len()
            ));
            html.push_str(r#"<ul class="mb-2">"#);
            for objective in &quest.objectives {
                let (mark, class) = if objective.complete {
                    ("[x]", "text-emerald-400 line-through")
                } else {
                    ("[ ]", "text-slate-200")
                };
                html.push_str(&format!(
                    r#"<li class="{}">{} {}</li>"#,
                    class,
                    mark,
                    escape(&objective.text)
                ));
            }
            html.push_str("</ul>");
        }
        None => {
            html.push_str(r#"<p class="text-slate-500 italic mb-2">No active quest.</p>"#);
        }
    }

    if !character.quests_completed.is_empty() {
        html.push_str(r#"<p class="text-xs text-slate-400 border-t border-slate-700 pt-1">Completed</p>"#);
        html.push_str(r#"<ul class="text-xs text-emerald-500">"#);
        for id in &character.quests_completed {
            html.push_str(&format!("<li>✓ {}</li>", escape(id)));
        }
        html.push_str("</ul>");
    }

    html.push_str("</div>");
    html
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_log() {
        let html = render_quest_log(&Character::default());
        assert!(html.contains("No active quest."));
        assert!(!html.contains("Completed"));
    }

    #[test]
    fn active_quest_with_objectives() {
        let mut c = Character::default();
        c.current_quest = Some(Quest::new(
            "Q1",
            "active",
            vec![
                Objective::new("Read the CSV", true),
                Objective::new("Write the Job", false),
            ],
        ));
        let html = render_quest_log(&c);
        assert!(html.contains("Q1"));
        assert!(html.contains("1/2 objectives"));
        assert!(html.contains("[x] Read the CSV"));
        assert!(html.contains("[ ] Write the Job"));
    }

    #[test]
    fn history_listed() {
        let mut c = Character::default();
        c.record_quest("Q0");
        let html = render_quest_log(&c);
        assert!(html.contains("Completed"));
        assert!(html.contains("✓ Q0"));
    }
}
